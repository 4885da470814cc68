use crate::core::{slug_for, Event, EventBlock, EventRequest};
use crate::error::Result;
use crate::storage::schema;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const EVENT_COLUMNS: &str = "id, COALESCE(category, ''), COALESCE(name, ''), \
     COALESCE(description, ''), COALESCE(wikipedia_section_title, ''), \
     NULLIF(image_filename, ''), COALESCE(years, ''), COALESCE(slug, ''), NULLIF(country, '')";

fn decode_event(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        category: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        wikipedia_section_title: row.get(4)?,
        image_filename: row.get(5)?,
        years: row.get(6)?,
        stored_slug: row.get(7)?,
        country: row.get(8)?,
        blocks: Vec::new(),
        requests: Vec::new(),
    })
}

/// Outcome of [`EventRepository::import_events`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub slugs_derived: usize,
}

/// Read and write access to the event tables.
///
/// The connection is not shared between threads; servers wrap the repository
/// in a mutex and copy events out before filtering.
pub struct EventRepository {
    conn: Connection,
}

impl EventRepository {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Open, migrate, seed and backfill slugs in one go.
    pub fn open_initialized(path: impl AsRef<Path>) -> Result<Self> {
        let repository = Self::open(path)?;
        repository.init_schema()?;
        repository.seed_if_empty()?;
        repository.ensure_slugs()?;
        Ok(repository)
    }

    pub fn init_schema(&self) -> Result<()> {
        schema::migrate(&self.conn)?;
        Ok(())
    }

    /// Insert the seed events when the table is empty. Returns how many were added.
    pub fn seed_if_empty(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;
        for (category, name, description, section, image, years) in schema::SEED_EVENTS {
            tx.execute(
                "INSERT INTO events (category, name, description, wikipedia_section_title, \
                 image_filename, years) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![category, name, description, section, image, years],
            )?;
        }
        tx.commit()?;
        tracing::info!(count = schema::SEED_EVENTS.len(), "seeded empty events table");
        Ok(schema::SEED_EVENTS.len())
    }

    /// Store a derived slug for every event that has none. Stored slugs are
    /// left alone, and names that derive to an empty slug stay unset.
    /// Returns the number of events updated.
    pub fn ensure_slugs(&self) -> Result<usize> {
        let missing: Vec<(i64, String)> = {
            let mut stmt = self.conn.prepare(
                "SELECT id, COALESCE(name, '') FROM events WHERE slug IS NULL OR slug = ''",
            )?;
            let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
            rows.collect::<rusqlite::Result<_>>()?
        };

        let mut stmt = self.conn.prepare("UPDATE events SET slug = ?1 WHERE id = ?2")?;
        let mut updated = 0;
        for (id, name) in missing {
            let slug = slug_for(&name);
            if slug.is_empty() {
                tracing::warn!(id, name = name.as_str(), "event name yields an empty slug, skipping");
                continue;
            }
            match stmt.execute(params![slug, id]) {
                Ok(_) => {
                    tracing::info!(name = name.as_str(), slug = slug.as_str(), "updated event slug");
                    updated += 1;
                }
                Err(e) => {
                    tracing::warn!(name = name.as_str(), error = %e, "failed to update event slug");
                }
            }
        }
        Ok(updated)
    }

    /// Every event with its blocks, latest first by leading year.
    ///
    /// Requests are not loaded here; [`Self::event_by_slug`] loads them.
    pub fn all_events(&self) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM events ORDER BY CAST(years AS INTEGER) DESC",
            EVENT_COLUMNS
        ))?;
        let mut events = stmt.query_map([], decode_event)?.collect::<rusqlite::Result<Vec<_>>>()?;
        for event in &mut events {
            event.blocks = self.blocks_for_event(event.id)?;
        }
        Ok(events)
    }

    /// The event stored under `slug`, with its blocks and requests.
    pub fn event_by_slug(&self, slug: &str) -> Result<Option<Event>> {
        let event = self
            .conn
            .query_row(
                &format!("SELECT {} FROM events WHERE slug = ?1", EVENT_COLUMNS),
                params![slug],
                decode_event,
            )
            .optional()?;

        let Some(mut event) = event else {
            return Ok(None);
        };
        event.blocks = self.blocks_for_event(event.id)?;
        event.requests = self.requests_for_event(event.id)?;
        Ok(Some(event))
    }

    pub fn blocks_for_event(&self, event_id: i64) -> Result<Vec<EventBlock>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, event_id, COALESCE(title, ''), COALESCE(content, ''), ordering, \
             COALESCE(church_authority, ''), COALESCE(authority_position, '') \
             FROM event_blocks WHERE event_id = ?1 ORDER BY ordering, id",
        )?;
        let blocks = stmt
            .query_map(params![event_id], |row| {
                Ok(EventBlock {
                    id: row.get(0)?,
                    event_id: row.get(1)?,
                    title: row.get(2)?,
                    content: row.get(3)?,
                    ordering: row.get(4)?,
                    church_authority: row.get(5)?,
                    authority_position: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(blocks)
    }

    pub fn requests_for_event(&self, event_id: i64) -> Result<Vec<EventRequest>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, event_id, COALESCE(request, '') FROM marys_requests \
             WHERE event_id = ?1 ORDER BY id",
        )?;
        let requests = stmt
            .query_map(params![event_id], |row| {
                Ok(EventRequest { id: row.get(0)?, event_id: row.get(1)?, request: row.get(2)? })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(requests)
    }

    /// Distinct categories in alphabetical order.
    pub fn categories(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT COALESCE(category, '') AS c FROM events ORDER BY c",
        )?;
        let categories: Vec<String> =
            stmt.query_map([], |row| row.get(0))?.collect::<rusqlite::Result<_>>()?;
        Ok(categories)
    }

    /// Insert `event` with its blocks and requests and return its new id.
    ///
    /// Ids on the argument are ignored. An empty slug is stored as NULL so
    /// that [`Self::ensure_slugs`] fills it in.
    pub fn insert_event(&self, event: &Event) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        let slug = (!event.stored_slug.is_empty()).then_some(event.stored_slug.as_str());
        tx.execute(
            "INSERT INTO events (category, name, description, wikipedia_section_title, \
             image_filename, years, slug, country) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                event.category,
                event.name,
                event.description,
                event.wikipedia_section_title,
                event.image_filename,
                event.years,
                slug,
                event.country,
            ],
        )?;
        let event_id = tx.last_insert_rowid();

        for block in &event.blocks {
            tx.execute(
                "INSERT INTO event_blocks (event_id, title, content, ordering, church_authority, \
                 authority_position) VALUES (?1, ?2, ?3, ?4, NULLIF(?5, ''), NULLIF(?6, ''))",
                params![
                    event_id,
                    block.title,
                    block.content,
                    block.ordering,
                    block.church_authority,
                    block.authority_position,
                ],
            )?;
        }
        for request in &event.requests {
            tx.execute(
                "INSERT INTO marys_requests (event_id, request) VALUES (?1, ?2)",
                params![event_id, request.request],
            )?;
        }

        tx.commit()?;
        Ok(event_id)
    }

    /// Insert every event, then derive slugs for those that arrived without one.
    pub fn import_events(&self, events: &[Event]) -> Result<ImportSummary> {
        for event in events {
            let id = self.insert_event(event)?;
            tracing::info!(id, name = event.name.as_str(), "imported event");
        }
        let slugs_derived = self.ensure_slugs()?;
        Ok(ImportSummary { imported: events.len(), slugs_derived })
    }
}
