//! # Apparitions
//!
//! Apparitions catalogs historical religious apparition events and serves a
//! filterable, sortable listing plus per-event detail pages.
//!
//! The interesting part lives in [`parsing`] and [`query`]: every event carries
//! a free-text `years` field ("1531", "1981-1983", "1917, 1925",
//! "1981-present") which is parsed into year intervals, matched against a
//! caller-supplied year window and used as a sort key.
//!
//! ## Features
//!
//! - Year-range parsing that skips malformed fragments instead of failing
//! - Category and year-window filtering over an in-memory event collection
//! - Stable sorting by name, category or first year in either direction
//! - URL slug derivation with diacritic stripping
//! - SQLite storage, a JSON HTTP API and a command-line tool around the engine
//!
//! ## Example
//!
//! ```rust
//! use apparitions::core::Event;
//! use apparitions::query::{run_listing, ListingQuery};
//!
//! let events = vec![
//!     Event::new(1, "Apparition", "Our Lady of Lourdes", "1858"),
//!     Event::new(2, "Apparition", "Our Lady of Guadalupe", "1531"),
//! ];
//! let query = ListingQuery { start_year: 1800, sort_by: "year_asc".to_string(), ..Default::default() };
//! let listing = run_listing(&events, &query);
//! assert_eq!(listing.len(), 1);
//! assert_eq!(listing[0].name, "Our Lady of Lourdes");
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::needless_pass_by_value)]

/// Event records and slug derivation
pub mod core;

/// Runtime configuration shared by the binaries
pub mod config;

/// Parsing of the free-text `years` field
pub mod parsing;

/// Filtering, matching and sorting of event collections
pub mod query;

/// SQLite-backed event repository
pub mod storage;

/// JSON HTTP API over the listing pipeline
pub mod http;

pub mod error {
    //! Error types and result definitions

    use thiserror::Error;

    /// Result type alias for Apparitions operations
    pub type Result<T> = std::result::Result<T, Error>;

    /// Main error type for Apparitions
    ///
    /// The filtering and sorting engine never produces one of these: malformed
    /// input there degrades to "no match" or "no reorder". Only the storage,
    /// import and server layers are fallible.
    #[derive(Error, Debug)]
    pub enum Error {
        /// Configuration error
        #[error("Configuration error: {0}")]
        Config(String),
        /// Storage error
        #[error("Storage error: {0}")]
        Storage(#[from] rusqlite::Error),
        /// Serialization error
        #[error("Serialization error: {0}")]
        Serialization(#[from] serde_json::Error),
        /// IO error
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
        /// Requested record does not exist
        #[error("Not found: {0}")]
        NotFound(String),
        /// Other error
        #[error("Error: {0}")]
        Other(String),
    }
}

// Re-export commonly used types
pub use error::{Error, Result};
