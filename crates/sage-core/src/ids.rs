//! ID prefix constants.
//!
//! IDs are generated by the database as `{prefix}-{8 hex chars}`, e.g. `dbt-a3f8b2c1`.

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_DOUBT: &str = "dbt";
pub const PREFIX_ANSWER: &str = "ans";
pub const PREFIX_PRACTICE: &str = "prc";
pub const PREFIX_SUBJECT: &str = "sub";
pub const PREFIX_AUDIT: &str = "aud";

/// Every prefix in use, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_USER,
    PREFIX_DOUBT,
    PREFIX_ANSWER,
    PREFIX_PRACTICE,
    PREFIX_SUBJECT,
    PREFIX_AUDIT,
];
