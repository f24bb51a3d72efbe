mod answer;
mod doubt;
mod practice;
mod subject;
mod user;

pub use answer::AnswerCommands;
pub use doubt::DoubtCommands;
pub use practice::PracticeCommands;
pub use subject::SubjectCommands;
pub use user::UserCommands;
