//! Bounded LRU cache of parsed catalogs, keyed by upload name.
//!
//! Entries are tagged with a content hash so a changed file re-uploaded
//! under the same name reparses instead of serving stale rows. The host
//! owns one cache for its process lifetime.

use std::sync::Arc;

use blake3::Hasher;
use tracing::{debug, info};

use credscout_parser::{parse_catalog, ProgramCatalog};

use crate::error::{PipelineError, Result};

struct CacheEntry {
    name: String,
    content_hash: String,
    catalog: Arc<ProgramCatalog>,
}

pub struct CatalogCache {
    capacity: usize,
    // front = most recently used
    entries: Vec<CacheEntry>,
}

impl CatalogCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Vec::new(),
        }
    }

    /// Returns the parsed catalog for this upload, reusing the cached table
    /// when both the name and the content hash match.
    pub fn load(&mut self, name: &str, contents: &[u8]) -> Result<Arc<ProgramCatalog>> {
        let hash = content_hash(contents);

        if let Some(pos) = self.entries.iter().position(|entry| entry.name == name) {
            if self.entries[pos].content_hash == hash {
                let entry = self.entries.remove(pos);
                let catalog = Arc::clone(&entry.catalog);
                self.entries.insert(0, entry);
                debug!(name, "catalog cache hit");
                return Ok(catalog);
            }
            // same name, different bytes: the upload changed
            self.entries.remove(pos);
            info!(name, "catalog contents changed, reparsing");
        }

        let content_str = std::str::from_utf8(contents).map_err(|_| {
            PipelineError::Validation("catalog file was not valid UTF-8".to_string())
        })?;
        let catalog = Arc::new(parse_catalog(content_str)?);
        info!(
            name,
            rows = catalog.height(),
            source = catalog.source.as_str(),
            "catalog loaded"
        );

        self.entries.insert(
            0,
            CacheEntry {
                name: name.to_string(),
                content_hash: hash,
                catalog: Arc::clone(&catalog),
            },
        );
        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop() {
                debug!(name = evicted.name.as_str(), "evicted least recently used catalog");
            }
        }

        Ok(catalog)
    }

    /// Drops the entry for an upload name, forcing the next load to reparse.
    pub fn invalidate(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.name != name);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn content_hash(contents: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(contents);
    hasher.finalize().to_hex().to_string()
}
