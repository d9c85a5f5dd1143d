//! Core of a single-screen quiz-show companion: a question bank grouped by
//! difficulty level, an import pipeline (CSV or JSON, merged into the bank),
//! and a moderator-driven session walking questions one at a time with point
//! adjustments, an optional countdown and a final ranking.
//!
//! Presentation and clipboard access live outside this crate: the session
//! exposes state accessors and pushes user-visible notices through the
//! [`output::GameOutput`] trait, and persistence goes through an injected
//! [`storage::SnapshotStore`].

pub mod bank;
pub mod game;
pub mod output;
pub mod storage;
