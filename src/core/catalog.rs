//! # Category Catalog
//!
//! The ordered `(label, group, payload)` entries that populate a category
//! list. Group entries render as headers and are never selectable; item
//! entries carry the payload reported when the user activates them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogEntry {
    pub label: String,
    #[serde(default)]
    pub group: bool,
    pub payload: Option<String>,
}

impl CatalogEntry {
    pub fn group(label: &str) -> Self {
        Self {
            label: label.to_string(),
            group: true,
            payload: None,
        }
    }

    pub fn item(label: &str, payload: &str) -> Self {
        Self {
            label: label.to_string(),
            group: false,
            payload: Some(payload.to_string()),
        }
    }

    /// Payload reported on activation. Items without an explicit payload
    /// report their label; groups report nothing.
    pub fn payload(&self) -> Option<&str> {
        if self.group {
            None
        } else {
            Some(self.payload.as_deref().unwrap_or(&self.label))
        }
    }
}

const DEFAULT_CATALOG: &[(&str, Option<&str>)] = &[
    ("Menu", None),
    ("All discussions", Some("all_discussion")),
    ("My threads", Some("my_threads")),
    ("Viewed threads", Some("viewed_threads")),
    ("Bookmarks", Some("bookmarks")),
    ("Scheduled threads", Some("scheduled_threads")),
    ("Main category", None),
    ("Freebies", Some("freebies")),
    ("Trade", Some("trade")),
    ("Work and services", Some("work_and_services")),
    ("Arbitration", Some("arbitration")),
    ("Thematic category", None),
    ("Thematic questions", Some("thematic_questions")),
    ("Ask ChatGPT", Some("ask_chatgpt")),
    ("Articles", Some("articles")),
    ("Software", Some("software")),
    ("Gaming category", None),
    ("PUBG", Some("pubg")),
    ("Counter-Strike 2", Some("counter_strike_2")),
    ("Dota 2", Some("dota_2")),
    ("Overwatch 2", Some("overwatch_2")),
    ("Fortnite", Some("fortnite")),
    ("Valorant", Some("valorant")),
    ("GTA", Some("gta")),
    ("World of Tanks", Some("world_of_tanks")),
    ("miHoYo", Some("mihoyo")),
    ("Deadlock", Some("deadlock")),
    ("Other games", Some("other_games")),
    ("General category", None),
    ("Offtopic", Some("offtopic")),
    ("Computers", Some("computers")),
    ("Phones", Some("phones")),
    ("Web development", Some("web_development")),
    ("Programming", Some("programming")),
    ("Graphics", Some("graphics")),
    ("Forum life", Some("forum_life")),
    ("Test section", Some("test_section")),
];

/// The built-in forum section catalog, used when the config supplies none.
pub fn default_catalog() -> Vec<CatalogEntry> {
    DEFAULT_CATALOG
        .iter()
        .map(|&(label, payload)| match payload {
            Some(payload) => CatalogEntry::item(label, payload),
            None => CatalogEntry::group(label),
        })
        .collect()
}

/// Reject entries that could not be rendered or selected sensibly.
pub fn validate(entries: &[CatalogEntry]) -> Result<(), String> {
    for (i, entry) in entries.iter().enumerate() {
        if entry.label.trim().is_empty() {
            return Err(format!("category #{i} has an empty label"));
        }
        if entry.group && entry.payload.is_some() {
            return Err(format!(
                "category group '{}' must not carry a payload",
                entry.label
            ));
        }
    }
    Ok(())
}
