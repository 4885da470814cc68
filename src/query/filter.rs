use crate::query::matcher::YearWindow;
use crate::query::sort::EventKeys;
use std::collections::BTreeSet;

/// Category and year-window criteria for a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Allowed categories, compared exactly. Empty means every category.
    pub categories: BTreeSet<String>,
    pub window: YearWindow,
}

impl EventFilter {
    pub fn new<I, S>(categories: I, window: YearWindow) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { categories: categories.into_iter().map(Into::into).collect(), window }
    }

    pub fn allows_category(&self, category: &str) -> bool {
        self.categories.is_empty() || self.categories.contains(category)
    }

    pub fn retains<T: EventKeys>(&self, event: &T) -> bool {
        self.allows_category(event.category()) && self.window.matches(event.years())
    }
}

/// Events passing `filter`, in their original relative order.
pub fn filter_events<'a, T: EventKeys>(events: &'a [T], filter: &EventFilter) -> Vec<&'a T> {
    events.iter().filter(|event| filter.retains(*event)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Event;

    #[test]
    fn test_category_is_case_sensitive() {
        let events = vec![
            Event::new(1, "Apparition", "Lourdes", "1858"),
            Event::new(2, "apparition", "Kibeho", "1981-1989"),
        ];
        let filter = EventFilter::new(["Apparition"], YearWindow::unbounded());
        let kept = filter_events(&events, &filter);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn test_both_predicates_apply() {
        let events = vec![
            Event::new(1, "Apparition", "Guadalupe", "1531"),
            Event::new(2, "Locution", "Akita", "1973"),
            Event::new(3, "Apparition", "Lourdes", "1858"),
        ];
        let filter = EventFilter::new(["Apparition", "Locution"], YearWindow::new(1800, 0));
        let ids: Vec<i64> = filter_events(&events, &filter).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
