use std::fs;
use std::path::PathBuf;

use bazaar_core::{ListingId, RECENT_QUERY_CAP};
use bazaar_engine::AtomicFileWriter;
use bazaar_logging::{bazaar_error, bazaar_warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

const FAVORITES_FILENAME: &str = "favorites.json";
const RECENT_QUERIES_FILENAME: &str = "recent_queries.json";

/// File-backed store for the two persisted ledgers, each a JSON array under
/// a fixed key.
///
/// Loads are fail-safe: a missing, unreadable, or malformed entry yields the
/// empty ledger. Saves go through the atomic writer and swallow failures
/// after logging; the in-memory ledger stays authoritative for the session.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn load_favorites(&self) -> Vec<ListingId> {
        self.load_array(FAVORITES_FILENAME)
    }

    pub fn save_favorites(&self, ids: &[ListingId]) {
        self.save_array(FAVORITES_FILENAME, ids);
    }

    pub fn load_recent_queries(&self) -> Vec<String> {
        let mut queries: Vec<String> = self.load_array(RECENT_QUERIES_FILENAME);
        queries.truncate(RECENT_QUERY_CAP);
        queries
    }

    pub fn save_recent_queries(&self, queries: &[String]) {
        self.save_array(RECENT_QUERIES_FILENAME, queries);
    }

    fn load_array<T: DeserializeOwned>(&self, filename: &str) -> Vec<T> {
        let path = self.dir.join(filename);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Vec::new();
            }
            Err(err) => {
                bazaar_warn!("Failed to read ledger from {:?}: {}", path, err);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(values) => values,
            Err(err) => {
                bazaar_warn!("Failed to parse ledger from {:?}: {}", path, err);
                Vec::new()
            }
        }
    }

    fn save_array<T: Serialize>(&self, filename: &str, values: &[T]) {
        let content = match serde_json::to_string(values) {
            Ok(text) => text,
            Err(err) => {
                bazaar_error!("Failed to serialize ledger {}: {}", filename, err);
                return;
            }
        };

        let writer = AtomicFileWriter::new(self.dir.clone());
        if let Err(err) = writer.write(filename, &content) {
            bazaar_error!("Failed to write ledger {} to {:?}: {}", filename, self.dir, err);
        }
    }
}
