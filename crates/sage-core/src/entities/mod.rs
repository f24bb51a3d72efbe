//! Entity structs for all Sage domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `sage-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema`.

mod answer;
mod audit;
mod doubt;
mod practice;
mod subject;
mod user;

pub use answer::Answer;
pub use audit::AuditEntry;
pub use doubt::Doubt;
pub use practice::PracticeAnswer;
pub use subject::Subject;
pub use user::User;
