use crate::core::Event;
use crate::query::first_year::extract_first_year;
use serde::Serialize;
use std::cmp::Ordering;

/// Sort applied when a caller does not ask for one.
pub const DEFAULT_SORT: &str = "year_desc";

/// Read access to the fields the engine filters and sorts on.
///
/// Raw records and presentation wrappers both implement this, so the engine
/// never needs to know which one it is ordering.
pub trait EventKeys {
    fn name(&self) -> &str;
    fn category(&self) -> &str;
    fn years(&self) -> &str;
}

impl EventKeys for Event {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn years(&self) -> &str {
        &self.years
    }
}

impl<T: EventKeys + ?Sized> EventKeys for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn category(&self) -> &str {
        (**self).category()
    }

    fn years(&self) -> &str {
        (**self).years()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Category,
    Year,
}

impl SortField {
    fn from_name(field: &str) -> Option<Self> {
        match field {
            "name" => Some(SortField::Name),
            "category" => Some(SortField::Category),
            "year" => Some(SortField::Year),
            _ => None,
        }
    }

    fn compare<T: EventKeys>(self, a: &T, b: &T) -> Ordering {
        match self {
            SortField::Name => a.name().to_lowercase().cmp(&b.name().to_lowercase()),
            SortField::Category => a.category().to_lowercase().cmp(&b.category().to_lowercase()),
            SortField::Year => extract_first_year(a.years()).cmp(&extract_first_year(b.years())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A parsed `<field>_<direction>` sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parse a sort specification such as `name_desc`.
    ///
    /// Returns `None` unless the text splits into exactly two
    /// underscore-separated parts with a known field. Any direction other
    /// than `desc` sorts ascending.
    pub fn parse(spec: &str) -> Option<Self> {
        let parts: Vec<&str> = spec.split('_').collect();
        let [field, direction] = parts.as_slice() else {
            return None;
        };
        let field = SortField::from_name(field)?;
        let direction =
            if *direction == "desc" { SortDirection::Desc } else { SortDirection::Asc };
        Some(SortSpec { field, direction })
    }

    pub fn compare<T: EventKeys>(&self, a: &T, b: &T) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Sort `events` in place according to `spec`.
///
/// The sort is stable in both directions: events with equal keys keep their
/// relative order. A malformed or unknown spec leaves the slice untouched.
pub fn apply_sorting<T: EventKeys>(events: &mut [T], spec: &str) {
    match SortSpec::parse(spec) {
        Some(sort) => events.sort_by(|a, b| sort.compare(a, b)),
        None => tracing::debug!(sort_by = spec, "ignoring unrecognized sort specification"),
    }
}

/// One entry of the fixed sort catalogue offered to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SupportedSort {
    pub name: &'static str,
    pub slug: &'static str,
    pub orientation: SortDirection,
}

pub const SUPPORTED_SORTS: [SupportedSort; 6] = [
    SupportedSort { name: "Name", slug: "name_asc", orientation: SortDirection::Asc },
    SupportedSort { name: "Name", slug: "name_desc", orientation: SortDirection::Desc },
    SupportedSort { name: "Year", slug: "year_asc", orientation: SortDirection::Asc },
    SupportedSort { name: "Year", slug: "year_desc", orientation: SortDirection::Desc },
    SupportedSort { name: "Category", slug: "category_asc", orientation: SortDirection::Asc },
    SupportedSort { name: "Category", slug: "category_desc", orientation: SortDirection::Desc },
];

/// Display label of a supported sort slug.
pub fn sort_label(slug: &str) -> Option<&'static str> {
    SUPPORTED_SORTS.iter().find(|sort| sort.slug == slug).map(|sort| sort.name)
}

/// Query pairs for a link that switches to `sort`, keeping every other
/// parameter and replacing any existing `sort_by`.
pub fn sort_link_params(params: &[(String, String)], sort: &SupportedSort) -> Vec<(String, String)> {
    params
        .iter()
        .filter(|(key, _)| key != "sort_by")
        .cloned()
        .chain(std::iter::once(("sort_by".to_string(), sort.slug.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.name.as_str()).collect()
    }

    fn sample() -> Vec<Event> {
        vec![
            Event::new(1, "Apparition", "Guadalupe", "1531"),
            Event::new(2, "Apparition", "Fátima", "1917"),
            Event::new(3, "Apparition", "Lourdes", "1858"),
        ]
    }

    #[test]
    fn test_parse_spec() {
        assert_eq!(
            SortSpec::parse("year_desc"),
            Some(SortSpec { field: SortField::Year, direction: SortDirection::Desc })
        );
        assert_eq!(
            SortSpec::parse("name_sideways"),
            Some(SortSpec { field: SortField::Name, direction: SortDirection::Asc })
        );
        assert_eq!(SortSpec::parse("bogus"), None);
        assert_eq!(SortSpec::parse("name_asc_extra"), None);
        assert_eq!(SortSpec::parse("country_asc"), None);
        assert_eq!(SortSpec::parse(""), None);
    }

    #[test]
    fn test_name_desc() {
        let mut events = sample();
        apply_sorting(&mut events, "name_desc");
        assert_eq!(names(&events), vec!["Lourdes", "Guadalupe", "Fátima"]);
    }

    #[test]
    fn test_year_asc() {
        let mut events = sample();
        apply_sorting(&mut events, "year_asc");
        assert_eq!(names(&events), vec!["Guadalupe", "Lourdes", "Fátima"]);
    }

    #[test]
    fn test_bogus_spec_keeps_order() {
        let mut events = sample();
        apply_sorting(&mut events, "bogus");
        assert_eq!(names(&events), vec!["Guadalupe", "Fátima", "Lourdes"]);
    }

    #[test]
    fn test_sort_label() {
        assert_eq!(sort_label("year_desc"), Some("Year"));
        assert_eq!(sort_label("nope"), None);
    }

    #[test]
    fn test_sort_link_replaces_sort_by() {
        let params = vec![
            ("category".to_string(), "Apparition".to_string()),
            ("sort_by".to_string(), "name_asc".to_string()),
        ];
        let link = sort_link_params(&params, &SUPPORTED_SORTS[3]);
        assert_eq!(
            link,
            vec![
                ("category".to_string(), "Apparition".to_string()),
                ("sort_by".to_string(), "year_desc".to_string()),
            ]
        );
    }
}
