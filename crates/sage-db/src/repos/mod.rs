//! Repository modules implementing the Sage workflow.
//!
//! Each module adds methods to `SageService` via `impl SageService` blocks.

pub mod answer;
pub mod audit;
pub mod doubt;
pub mod practice;
pub mod subject;
pub mod user;
pub mod views;
