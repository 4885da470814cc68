use std::borrow::Cow;
use std::fmt;

/// Upper bound standing in for "still ongoing".
///
/// Used as the end of open-ended ranges such as `1981-present` and as the
/// effective end of a year window whose end is unbounded.
pub const OPEN_END_YEAR: i32 = 10_000;

/// Word marking an open-ended range.
const PRESENT_MARKER: &str = "present";

/// A closed year interval `[start, end]`. Single years are `[y, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearInterval {
    pub start: i32,
    pub end: i32,
}

impl YearInterval {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn single(year: i32) -> Self {
        Self { start: year, end: year }
    }

    /// Inclusive overlap with `[window_start, window_end]`.
    pub fn overlaps(&self, window_start: i32, window_end: i32) -> bool {
        self.start <= window_end && self.end >= window_start
    }
}

impl fmt::Display for YearInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else if self.end == OPEN_END_YEAR {
            write!(f, "{}-{}", self.start, PRESENT_MARKER)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// One comma-separated segment of a years field, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearToken {
    /// A bare year: `1531`
    Single(i32),
    /// A closed range: `1981-1983`
    Range(i32, i32),
    /// A range running to the present: `1981-present`
    OpenEnded(i32),
    /// Anything that could not be read; carries the offending segment
    Malformed(String),
}

impl YearToken {
    /// The interval this token contributes, if any.
    pub fn interval(&self) -> Option<YearInterval> {
        match *self {
            YearToken::Single(year) => Some(YearInterval::single(year)),
            YearToken::Range(start, end) => Some(YearInterval::new(start, end)),
            YearToken::OpenEnded(start) => Some(YearInterval::new(start, OPEN_END_YEAR)),
            YearToken::Malformed(_) => None,
        }
    }
}

/// Replace en-dashes and em-dashes with ASCII hyphens.
pub fn normalize_dashes(raw: &str) -> Cow<'_, str> {
    if raw.contains(['\u{2013}', '\u{2014}']) {
        Cow::Owned(raw.replace(['\u{2013}', '\u{2014}'], "-"))
    } else {
        Cow::Borrowed(raw)
    }
}

pub(crate) fn parse_year(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

fn classify(segment: &str) -> YearToken {
    let malformed = || YearToken::Malformed(segment.to_string());

    if segment.contains(PRESENT_MARKER) {
        // Only the part before the separator carries a year.
        let prefix = segment.split('-').next().unwrap_or_default();
        return parse_year(prefix).map_or_else(malformed, YearToken::OpenEnded);
    }

    if segment.contains('-') {
        let parts: Vec<&str> = segment.split('-').collect();
        if let [start, end] = parts.as_slice() {
            if let (Some(start), Some(end)) = (parse_year(start), parse_year(end)) {
                return YearToken::Range(start, end);
            }
        }
        return malformed();
    }

    parse_year(segment).map_or_else(malformed, YearToken::Single)
}

/// Split a years field into classified segments.
///
/// Blank segments (an empty field, a trailing comma) produce no token.
pub fn tokenize(raw: &str) -> Vec<YearToken> {
    normalize_dashes(raw)
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(classify)
        .collect()
}

/// Parse a years field into intervals, skipping malformed segments.
///
/// Order follows the field; duplicates are kept.
pub fn parse_intervals(raw: &str) -> Vec<YearInterval> {
    tokenize(raw)
        .into_iter()
        .filter_map(|token| {
            if let YearToken::Malformed(segment) = &token {
                tracing::trace!(years = raw, segment = segment.as_str(), "skipping year segment");
            }
            token.interval()
        })
        .collect()
}
