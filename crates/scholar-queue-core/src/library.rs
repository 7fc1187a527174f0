//! Local ledger of saved papers.
//!
//! Each Save on an active query appends one row to `library.json` in the data
//! directory. Saving the same query twice keeps a single row.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::StoreError;
use crate::normalize::normalize_query;
use crate::page::PageActions;

pub const LIBRARY_FILE: &str = "library.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedEntry {
    /// Queue line as the user typed it.
    pub query: String,
    /// Normalized query that was searched.
    pub search: String,
    /// RFC 3339 timestamp.
    pub saved_at: String,
}

#[derive(Debug, Clone)]
pub struct Library {
    path: PathBuf,
}

impl Library {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ledger stored as `<data_dir>/library.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(LIBRARY_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All saved rows, oldest first. Missing, unreadable or corrupt ledgers
    /// read as empty.
    pub fn entries(&self) -> Vec<SavedEntry> {
        self.read_entries().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "could not read library ledger");
            Vec::new()
        })
    }

    /// Missing and malformed ledgers are empty; any other read failure is an error.
    fn read_entries(&self) -> Result<Vec<SavedEntry>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };
        Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "library ledger is malformed, treating as empty");
            Vec::new()
        }))
    }

    pub fn contains(&self, query: &str) -> bool {
        self.entries().iter().any(|e| e.query == query)
    }

    /// Record `query` as saved. Returns `false` if it was already present.
    ///
    /// A ledger that exists but cannot be read is left untouched.
    pub fn save(&self, query: &str) -> Result<bool, StoreError> {
        let mut entries = self.read_entries()?;
        if entries.iter().any(|e| e.query == query) {
            return Ok(false);
        }
        entries.push(SavedEntry {
            query: query.to_string(),
            search: normalize_query(query),
            saved_at: chrono::Local::now().to_rfc3339(),
        });

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(true)
    }
}

impl PageActions for Library {
    fn click_save(&mut self, query: &str) {
        match self.save(query) {
            Ok(true) => tracing::info!(query, "saved to library"),
            Ok(false) => tracing::debug!(query, "already in library"),
            Err(e) => tracing::warn!(query, error = %e, "failed to save to library"),
        }
    }

    fn highlight_save(&mut self, _query: &str) {}
}
