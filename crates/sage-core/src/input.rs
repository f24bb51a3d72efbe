//! Boundary input parsing.
//!
//! Callers hand the workflow loosely typed drafts (every field optional, as
//! they arrive from CLI flags or request bodies). `validate()` turns a draft
//! into a command whose required fields are guaranteed present, or fails with
//! `CoreError::Validation`. Whitespace-only strings count as absent.
//! Identifiers and short labels are trimmed; free text (questions and
//! answer bodies) keeps its original whitespace.

use serde::{Deserialize, Serialize};

use crate::enums::{ReviewOutcome, Role};
use crate::errors::CoreError;

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, field: &str) -> Result<String, CoreError> {
    optional(value).ok_or_else(|| CoreError::validation(format!("{field} is required")))
}

/// Like [`required`], but the accepted value is returned untrimmed.
fn required_text(value: Option<String>, field: &str) -> Result<String, CoreError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CoreError::validation(format!("{field} is required")))
}

// ---------------------------------------------------------------------------
// ProfessorAssignment
// ---------------------------------------------------------------------------

/// Who a doubt is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessorAssignment {
    /// Open to any professor.
    Unassigned,
    /// Addressed to one professor by user ID.
    Assigned(String),
}

impl ProfessorAssignment {
    /// Absent or blank input means unassigned.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(id) if !id.is_empty() => Self::Assigned(id.to_string()),
            _ => Self::Unassigned,
        }
    }

    #[must_use]
    pub fn professor_id(&self) -> Option<&str> {
        match self {
            Self::Unassigned => None,
            Self::Assigned(id) => Some(id),
        }
    }
}

// ---------------------------------------------------------------------------
// Doubts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoubtDraft {
    pub user_id: Option<String>,
    pub question: Option<String>,
    pub branch: Option<String>,
    pub semester: Option<u32>,
    pub course: Option<String>,
    pub professor: Option<String>,
}

/// A validated doubt submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDoubt {
    pub user_id: String,
    pub question: String,
    pub branch: Option<String>,
    pub semester: Option<u32>,
    pub course: Option<String>,
    pub professor: ProfessorAssignment,
}

impl DoubtDraft {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `user_id` or `question` is absent.
    pub fn validate(self) -> Result<NewDoubt, CoreError> {
        Ok(NewDoubt {
            user_id: required(self.user_id, "user_id")?,
            question: required_text(self.question, "question")?,
            branch: optional(self.branch),
            semester: self.semester,
            course: optional(self.course),
            professor: ProfessorAssignment::parse(self.professor.as_deref()),
        })
    }
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerDraft {
    pub doubt_id: Option<String>,
    pub answer_text: Option<String>,
    pub answered_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub doubt_id: String,
    pub answer_text: String,
    pub answered_by: String,
}

impl AnswerDraft {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if any field is absent.
    pub fn validate(self) -> Result<NewAnswer, CoreError> {
        Ok(NewAnswer {
            doubt_id: required(self.doubt_id, "doubt_id")?,
            answer_text: required_text(self.answer_text, "answer_text")?,
            answered_by: required(self.answered_by, "answered_by")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Practice answers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PracticeDraft {
    pub doubt_id: Option<String>,
    pub student_id: Option<String>,
    pub answer_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPractice {
    pub doubt_id: String,
    pub student_id: String,
    pub answer_text: String,
}

impl PracticeDraft {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if any field is absent.
    pub fn validate(self) -> Result<NewPractice, CoreError> {
        Ok(NewPractice {
            doubt_id: required(self.doubt_id, "doubt_id")?,
            student_id: required(self.student_id, "student_id")?,
            answer_text: required_text(self.answer_text, "answer_text")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewDraft {
    pub practice_id: Option<String>,
    pub outcome: Option<String>,
    #[serde(default)]
    pub publish: bool,
    pub reviewer_id: Option<String>,
}

/// A validated review verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub practice_id: String,
    pub outcome: ReviewOutcome,
    pub publish: bool,
    pub reviewer_id: String,
}

impl ReviewDraft {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if a field is absent or the outcome
    /// is neither `correct` nor `incorrect`.
    pub fn validate(self) -> Result<Review, CoreError> {
        let practice_id = required(self.practice_id, "practice_id")?;
        let outcome = required(self.outcome, "outcome")?.parse::<ReviewOutcome>()?;
        Ok(Review {
            practice_id,
            outcome,
            publish: self.publish,
            reviewer_id: required(self.reviewer_id, "reviewer_id")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Users and reference data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserDraft {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` on absent fields or an unknown role.
    pub fn validate(self) -> Result<NewUser, CoreError> {
        let name = required(self.name, "name")?;
        let email = required(self.email, "email")?.to_ascii_lowercase();
        let role = required(self.role, "role")?.parse::<Role>()?;
        Ok(NewUser { name, email, role })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectQuery {
    pub department_id: Option<String>,
    pub semester: Option<u32>,
}

impl SubjectQuery {
    /// Returns `(department_id, semester)`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if either parameter is absent.
    pub fn validate(self) -> Result<(String, u32), CoreError> {
        let department = required(self.department_id, "department_id")?;
        let semester = self
            .semester
            .ok_or_else(|| CoreError::validation("semester is required"))?;
        Ok((department, semester))
    }
}

/// Optional filters for the answered-doubt archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ArchiveFilter {
    pub semester: Option<u32>,
    pub course: Option<String>,
    pub search: Option<String>,
}

impl ArchiveFilter {
    /// Drop blank string filters so they do not restrict results.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            semester: self.semester,
            course: optional(self.course),
            search: optional(self.search),
        }
    }
}
