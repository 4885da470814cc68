use rusqlite::Connection;

pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT,
    name TEXT,
    description TEXT,
    wikipedia_section_title TEXT,
    image_filename TEXT,
    years TEXT,
    slug TEXT,
    country TEXT
);
CREATE TABLE IF NOT EXISTS marys_requests (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id INTEGER REFERENCES events(id) ON DELETE CASCADE,
    request TEXT
);
CREATE TABLE IF NOT EXISTS event_blocks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_id INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
    language TEXT NOT NULL DEFAULT 'en',
    title TEXT,
    content TEXT,
    ordering INTEGER NOT NULL DEFAULT 0,
    church_authority TEXT,
    authority_position TEXT
);
";

/// Columns added to `events` after the first release, with their types.
const LATER_EVENT_COLUMNS: [(&str, &str); 2] = [("slug", "TEXT"), ("country", "TEXT")];

/// (category, name, description, wikipedia_section_title, image_filename, years)
pub const SEED_EVENTS: [(&str, &str, &str, &str, &str, &str); 3] = [
    (
        "Apparition",
        "Our Lady of Guadalupe",
        "A series of five Marian apparitions in December 1531, and the image on a cloak enshrined within the Basilica of Our Lady of Guadalupe in Mexico City.",
        "Our_Lady_of_Guadalupe",
        "guadalupe.jpg",
        "1531",
    ),
    (
        "Apparition",
        "Our Lady of Lourdes",
        "Apparitions of the Virgin Mary to Saint Bernadette Soubirous in 1858 in the grotto of Massabielle.",
        "Our_Lady_of_Lourdes",
        "lourdes.jpg",
        "1858",
    ),
    (
        "Apparition",
        "Our Lady of Fátima",
        "Reported apparitions to three shepherd children at the Cova da Iria, in Fátima, Portugal.",
        "Our_Lady_of_Fátima",
        "fatima.jpg",
        "1917",
    ),
];

fn column_names(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    names.collect()
}

/// Create missing tables and bring a legacy `events` table up to date.
pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_TABLES)?;

    let existing = column_names(conn, "events")?;
    for (column, sql_type) in LATER_EVENT_COLUMNS {
        if !existing.iter().any(|name| name == column) {
            tracing::info!(column, "adding missing column to events");
            conn.execute_batch(&format!("ALTER TABLE events ADD COLUMN {} {}", column, sql_type))?;
        }
    }
    Ok(())
}
