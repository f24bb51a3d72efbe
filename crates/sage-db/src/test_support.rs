//! Shared test utilities for sage-db unit tests.

use sage_core::entities::{Doubt, PracticeAnswer, User};
use sage_core::enums::Role;
use sage_core::input::{DoubtDraft, PracticeDraft, UserDraft};

use crate::SageDb;
use crate::service::{SageService, WorkflowSettings};

/// Create an in-memory `SageService` with default settings.
pub async fn test_service() -> SageService {
    let db = SageDb::open_local(":memory:").await.unwrap();
    SageService::from_db(db, WorkflowSettings::default())
}

/// Register a user whose email is derived from the name.
pub async fn seed_user(svc: &SageService, name: &str, role: Role) -> User {
    svc.register_user(UserDraft {
        name: Some(name.into()),
        email: Some(format!("{}@campus.edu", name.to_lowercase())),
        role: Some(role.as_str().into()),
    })
    .await
    .unwrap()
}

pub async fn seed_doubt(
    svc: &SageService,
    student_id: &str,
    question: &str,
    professor: Option<&str>,
) -> Doubt {
    svc.submit_doubt(DoubtDraft {
        user_id: Some(student_id.into()),
        question: Some(question.into()),
        professor: professor.map(String::from),
        ..Default::default()
    })
    .await
    .unwrap()
}

pub async fn seed_practice(
    svc: &SageService,
    doubt_id: &str,
    student_id: &str,
    text: &str,
) -> PracticeAnswer {
    svc.submit_practice(PracticeDraft {
        doubt_id: Some(doubt_id.into()),
        student_id: Some(student_id.into()),
        answer_text: Some(text.into()),
    })
    .await
    .unwrap()
}
