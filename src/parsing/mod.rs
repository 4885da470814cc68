//! Parsing of free-text event fields
//!
//! Events record when they happened as human-authored text. The
//! [`years_parser`] turns that text into closed year intervals that the query
//! engine can compare against a year window.

pub mod years_parser;

pub use years_parser::{
    normalize_dashes, parse_intervals, tokenize, YearInterval, YearToken, OPEN_END_YEAR,
};
