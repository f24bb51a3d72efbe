//! # sage-core
//!
//! Core types, ID prefixes, and error types for Sage.
//!
//! This crate provides the foundational types shared across all Sage crates:
//! - Entity structs for the workflow objects (users, doubts, answers, practice answers)
//! - Status enums with state machine transitions
//! - Boundary input drafts that validate loosely typed input into commands
//! - Read projections returned by the query views
//! - Workflow policy constants (reward points, leaderboard size)
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod input;
pub mod policy;
pub mod views;
