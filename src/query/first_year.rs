use crate::parsing::years_parser::{normalize_dashes, parse_year};

/// Representative year of a years field, used only as a sort key.
///
/// Looks at the first comma-separated segment alone and, if it is a range,
/// at the part before the hyphen. Anything unreadable yields `0`. There is no
/// "present" handling here, so `"1925, 1531"` sorts as 1925 even though it
/// also matches windows around 1531.
pub fn extract_first_year(years_raw: &str) -> i32 {
    let normalized = normalize_dashes(years_raw);
    let first = normalized.split(',').next().unwrap_or_default().trim();
    let start = first.split('-').next().unwrap_or_default();
    parse_year(start).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_year() {
        assert_eq!(extract_first_year("2026"), 2026);
    }

    #[test]
    fn test_unreadable_is_zero() {
        assert_eq!(extract_first_year(""), 0);
        assert_eq!(extract_first_year("abc"), 0);
        assert_eq!(extract_first_year("present"), 0);
    }

    #[test]
    fn test_range_and_list_take_first() {
        assert_eq!(extract_first_year("1981-1983"), 1981);
        assert_eq!(extract_first_year("1531\u{2013}1537"), 1531);
        assert_eq!(extract_first_year("1917, 1925"), 1917);
        assert_eq!(extract_first_year("1981-present"), 1981);
    }

    #[test]
    fn test_first_segment_only() {
        assert_eq!(extract_first_year("1925, 1531"), 1925);
        assert_eq!(extract_first_year("unknown, 1531"), 0);
    }
}
