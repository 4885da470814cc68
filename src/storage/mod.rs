//! Event storage
//!
//! The query engine works on events already in memory. This module is the
//! collaborator that gets them there: a SQLite database holding events, their
//! narrative blocks and their requests.

pub mod event_repository;
pub mod schema;

pub use event_repository::{EventRepository, ImportSummary};
