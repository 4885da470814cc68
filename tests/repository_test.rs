//! Event Repository Integration Tests
//!
//! Exercises schema creation, seeding, slug backfill and reads against an
//! in-memory SQLite database.

use apparitions::core::{Event, EventBlock, EventRequest};
use apparitions::query::{run_listing, ListingQuery};
use apparitions::storage::EventRepository;

fn fresh_repository() -> EventRepository {
    let repository = EventRepository::open_in_memory().expect("Failed to open in-memory database");
    repository.init_schema().expect("Failed to create schema");
    repository
}

fn kibeho() -> Event {
    let mut event = Event::new(0, "Apparition", "Our Lady of Kibeho", "1981\u{2013}1989");
    event.description = "Apparitions to students at a college in Kibeho, Rwanda.".to_string();
    event.country = Some("Rwanda".to_string());
    event.blocks = vec![
        EventBlock {
            title: "Recognition".to_string(),
            content: "Approved by the local bishop in 2001.".to_string(),
            ordering: 2,
            church_authority: "Catholic Church".to_string(),
            authority_position: "approved".to_string(),
            ..EventBlock::default()
        },
        EventBlock {
            title: "Background".to_string(),
            content: "Three visionaries were recognised.".to_string(),
            ordering: 1,
            ..EventBlock::default()
        },
    ];
    event.requests = vec![EventRequest { request: "Pray the rosary.".to_string(), ..EventRequest::default() }];
    event
}

#[test]
fn test_seed_only_when_empty() {
    let repository = fresh_repository();
    assert_eq!(repository.seed_if_empty().unwrap(), 3);
    assert_eq!(repository.seed_if_empty().unwrap(), 0);
    assert_eq!(repository.all_events().unwrap().len(), 3);
}

#[test]
fn test_ensure_slugs_backfills_missing_only() {
    let repository = fresh_repository();
    repository.seed_if_empty().unwrap();

    let mut stored = Event::new(0, "Apparition", "Our Lady of Akita", "1973");
    stored.stored_slug = "akita".to_string();
    repository.insert_event(&stored).unwrap();

    assert_eq!(repository.ensure_slugs().unwrap(), 3);
    assert_eq!(repository.ensure_slugs().unwrap(), 0);

    assert!(repository.event_by_slug("our-lady-of-fatima").unwrap().is_some());
    assert!(repository.event_by_slug("akita").unwrap().is_some());
    assert!(repository.event_by_slug("our-lady-of-akita").unwrap().is_none());
}

#[test]
fn test_all_events_storage_order_and_blocks() {
    let repository = fresh_repository();
    repository.seed_if_empty().unwrap();
    repository.insert_event(&kibeho()).unwrap();

    let events = repository.all_events().unwrap();
    let years: Vec<&str> = events.iter().map(|e| e.years.as_str()).collect();
    assert_eq!(years, vec!["1981\u{2013}1989", "1917", "1858", "1531"]);

    let kibeho = &events[0];
    let titles: Vec<&str> = kibeho.blocks.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Background", "Recognition"]);
    assert!(kibeho.requests.is_empty());
    assert_eq!(kibeho.country.as_deref(), Some("Rwanda"));
}

#[test]
fn test_event_by_slug_loads_everything() {
    let repository = fresh_repository();
    let id = repository.insert_event(&kibeho()).unwrap();
    repository.ensure_slugs().unwrap();

    let event = repository.event_by_slug("our-lady-of-kibeho").unwrap().expect("event exists");
    assert_eq!(event.id, id);
    assert_eq!(event.stored_slug, "our-lady-of-kibeho");
    assert_eq!(event.blocks.len(), 2);
    assert_eq!(event.requests.len(), 1);
    assert_eq!(event.requests[0].request, "Pray the rosary.");
    assert!(event.is_church_approved("Catholic"));
    assert!(event.image_filename.is_none());
}

#[test]
fn test_missing_slug_is_none() {
    let repository = fresh_repository();
    repository.seed_if_empty().unwrap();
    assert!(repository.event_by_slug("nowhere").unwrap().is_none());
}

#[test]
fn test_categories_are_distinct_and_sorted() {
    let repository = fresh_repository();
    repository.seed_if_empty().unwrap();
    repository.insert_event(&Event::new(0, "Locution", "Our Lady of Akita", "1973")).unwrap();
    assert_eq!(repository.categories().unwrap(), vec!["Apparition", "Locution"]);
}

#[test]
fn test_storage_feeds_listing() {
    let repository = fresh_repository();
    repository.seed_if_empty().unwrap();
    repository.insert_event(&kibeho()).unwrap();
    let events = repository.all_events().unwrap();

    let query = ListingQuery { start_year: 1900, sort_by: "year_asc".to_string(), ..Default::default() };
    let names: Vec<&str> = run_listing(&events, &query).iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Our Lady of Fátima", "Our Lady of Kibeho"]);
}

#[test]
fn test_file_database_is_initialized_once() {
    let path = std::env::temp_dir().join(format!(
        "apparitions_repository_test_{}.sqlite3",
        std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH).unwrap().as_nanos()
    ));

    {
        let repository = EventRepository::open_initialized(&path).unwrap();
        assert_eq!(repository.all_events().unwrap().len(), 3);
    }
    {
        let repository = EventRepository::open_initialized(&path).unwrap();
        let events = repository.all_events().unwrap();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| !e.stored_slug.is_empty()));
    }

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_names_without_slug_characters_stay_unset() {
    let repository = fresh_repository();
    repository.insert_event(&Event::new(0, "Apparition", "¿?", "1900")).unwrap();
    repository.insert_event(&Event::new(0, "Apparition", "Our Lady of Knock", "1879")).unwrap();

    assert_eq!(repository.ensure_slugs().unwrap(), 1);
    assert_eq!(repository.ensure_slugs().unwrap(), 0);

    let events = repository.all_events().unwrap();
    let unnamed = events.iter().find(|e| e.name == "¿?").unwrap();
    assert!(unnamed.stored_slug.is_empty());
    assert!(repository.event_by_slug("").unwrap().is_none());
}
