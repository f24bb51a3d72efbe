use anyhow::bail;
use sage_core::entities::{Answer, AuditEntry, Doubt, PracticeAnswer, Subject, User};
use sage_core::identity::Identity;
use sage_core::views::{
    ArchiveEntry, LeaderboardEntry, ProfessorAnswerView, ReviewQueueItem, ReviewReceipt,
    StudentDoubtView,
};
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

pub const TYPE_NAMES: &[&str] = &[
    "user",
    "identity",
    "doubt",
    "answer",
    "practice_answer",
    "subject",
    "audit_entry",
    "student_doubt_view",
    "professor_answer_view",
    "review_queue_item",
    "archive_entry",
    "leaderboard_entry",
    "review_receipt",
];

/// Handle `sage schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_for_type(&args.type_name)?;
    output(&schema, flags.format)
}

fn schema_for_type(type_name: &str) -> anyhow::Result<Schema> {
    let normalized = type_name.trim().replace('-', "_").to_ascii_lowercase();
    let schema = match normalized.as_str() {
        "user" => schema_for!(User),
        "identity" => schema_for!(Identity),
        "doubt" => schema_for!(Doubt),
        "answer" => schema_for!(Answer),
        "practice_answer" => schema_for!(PracticeAnswer),
        "subject" => schema_for!(Subject),
        "audit_entry" => schema_for!(AuditEntry),
        "student_doubt_view" => schema_for!(StudentDoubtView),
        "professor_answer_view" => schema_for!(ProfessorAnswerView),
        "review_queue_item" => schema_for!(ReviewQueueItem),
        "archive_entry" => schema_for!(ArchiveEntry),
        "leaderboard_entry" => schema_for!(LeaderboardEntry),
        "review_receipt" => schema_for!(ReviewReceipt),
        _ => bail!(
            "unknown schema type '{type_name}' (expected one of: {})",
            TYPE_NAMES.join(", ")
        ),
    };
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::{TYPE_NAMES, schema_for_type};

    #[test]
    fn every_listed_type_has_a_schema() {
        for name in TYPE_NAMES {
            let schema = schema_for_type(name).expect("schema should exist");
            let json = serde_json::to_value(&schema).expect("schema should serialize");
            assert!(json.is_object(), "{name} schema is an object");
        }
    }

    #[test]
    fn hyphenated_names_are_accepted() {
        assert!(schema_for_type("practice-answer").is_ok());
    }

    #[test]
    fn unknown_type_is_an_error() {
        let err = schema_for_type("course").expect_err("should fail");
        assert!(err.to_string().contains("unknown schema type 'course'"));
    }
}
