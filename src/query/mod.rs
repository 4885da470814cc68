//! Event Query Module
//!
//! Turns a full event collection plus caller criteria into an ordered listing.
//!
//! # Components
//!
//! - **matcher** - Year-window predicate over a raw years field
//! - **first_year** - Representative year used as the sort key
//! - **filter** - Category and year-window filtering
//! - **sort** - Stable ordering by name, category or year
//!
//! # Flow
//!
//! raw events → [`filter_events`] → [`apply_sorting`] → ordered references.
//!
//! Every function here is pure and synchronous. Callers pass a collection they
//! will not mutate for the duration of the call and get references back.

pub mod filter;
pub mod first_year;
pub mod matcher;
pub mod sort;

pub use filter::{filter_events, EventFilter};
pub use first_year::extract_first_year;
pub use matcher::{matches, YearWindow};
pub use sort::{
    apply_sorting, sort_label, sort_link_params, EventKeys, SortDirection, SortField, SortSpec,
    SupportedSort, DEFAULT_SORT, SUPPORTED_SORTS,
};

use serde::{Deserialize, Serialize};

/// Criteria for one listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub start_year: i32,
    #[serde(default)]
    pub end_year: i32,
    #[serde(default)]
    pub sort_by: String,
}

impl ListingQuery {
    pub fn filter(&self) -> EventFilter {
        EventFilter::new(self.categories.iter().cloned(), self.window())
    }

    pub fn window(&self) -> YearWindow {
        YearWindow::new(self.start_year, self.end_year)
    }
}

/// Filter then sort `events`.
pub fn run_listing<'a, T: EventKeys>(events: &'a [T], query: &ListingQuery) -> Vec<&'a T> {
    let mut listing = filter_events(events, &query.filter());
    apply_sorting(&mut listing, &query.sort_by);
    listing
}
