pub mod answer;
pub mod archive;
pub mod audit;
pub mod dispatch;
pub mod doubt;
pub mod leaderboard;
pub mod practice;
pub mod schema;
pub mod shared;
pub mod subject;
pub mod user;
