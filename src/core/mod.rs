//! Core data structures for the apparition catalog

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Authority position recorded on a block when the church approved the event.
pub const APPROVED_POSITION: &str = "approved";

/// One catalogued apparition event.
///
/// Events are read-only once loaded: the query engine filters, sorts and
/// derives from them but never writes back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub id: i64,
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub wikipedia_section_title: String,
    /// Free-text year specification, e.g. `"1531"` or `"1981-present"`.
    pub years: String,
    /// Slug as stored; empty when storage has none yet.
    #[serde(default, rename = "slug")]
    pub stored_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    pub blocks: Vec<EventBlock>,
    #[serde(default)]
    pub requests: Vec<EventRequest>,
}

/// A narrative section of an event, optionally tagged with a church authority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBlock {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub event_id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub ordering: i64,
    #[serde(default)]
    pub church_authority: String,
    #[serde(default)]
    pub authority_position: String,
}

/// A statement attributed to an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventRequest {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub event_id: i64,
    pub request: String,
}

impl Event {
    pub fn new(id: i64, category: &str, name: &str, years: &str) -> Self {
        Self {
            id,
            category: category.to_string(),
            name: name.to_string(),
            years: years.to_string(),
            ..Self::default()
        }
    }

    /// Identifier used in URLs.
    ///
    /// A stored slug is authoritative and comes back borrowed. The slug is
    /// derived from the name only when storage has none.
    pub fn slug(&self) -> Cow<'_, str> {
        if self.stored_slug.is_empty() {
            Cow::Owned(slug::slug_for(&self.name))
        } else {
            Cow::Borrowed(&self.stored_slug)
        }
    }

    /// Whether a block records `church` (matched as a substring of the
    /// block's authority, e.g. "Catholic Church") as having approved the event.
    pub fn is_church_approved(&self, church: &str) -> bool {
        self.blocks.iter().any(|block| {
            block.church_authority.contains(church)
                && block.authority_position == APPROVED_POSITION
        })
    }
}

/// Decode the import format: a JSON array of events.
pub fn events_from_json(json: &str) -> crate::Result<Vec<Event>> {
    Ok(serde_json::from_str(json)?)
}

pub mod slug;
pub use slug::slug_for;
