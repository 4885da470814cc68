use crate::parsing::{parse_intervals, OPEN_END_YEAR};
use serde::{Deserialize, Serialize};

/// Caller-supplied `[start_year, end_year]` filter bound.
///
/// `0` on either side means unbounded on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearWindow {
    pub start_year: i32,
    pub end_year: i32,
}

impl YearWindow {
    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self { start_year, end_year }
    }

    /// The window that filters nothing.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_unbounded(&self) -> bool {
        self.start_year == 0 && self.end_year == 0
    }

    /// End year with `0` replaced by [`OPEN_END_YEAR`].
    pub fn effective_end(&self) -> i32 {
        if self.end_year == 0 {
            OPEN_END_YEAR
        } else {
            self.end_year
        }
    }

    /// Whether any interval of `years_raw` overlaps this window.
    ///
    /// The unbounded window matches every field, even one with no readable
    /// year. Otherwise a field that parses to nothing never matches.
    pub fn matches(&self, years_raw: &str) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let end = self.effective_end();
        parse_intervals(years_raw).iter().any(|interval| interval.overlaps(self.start_year, end))
    }
}

/// Year-window predicate over a raw years field.
pub fn matches(years_raw: &str, start_year: i32, end_year: i32) -> bool {
    YearWindow::new(start_year, end_year).matches(years_raw)
}
