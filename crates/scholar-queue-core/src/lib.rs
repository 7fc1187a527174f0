//! Persisted query queue for batch scholarly search.
//!
//! Queue lines (paper titles or DOIs) are stored in a [`QueueStore`], stepped
//! through one at a time by a [`Session`], and turned into search-engine URLs
//! by [`normalize_query`] and [`SearchEngine`].

use thiserror::Error;

pub mod config_file;
pub mod library;
pub mod machine;
pub mod navigate;
pub mod normalize;
pub mod page;
pub mod position;
pub mod queue;
pub mod session;
pub mod storage;

// Re-export for convenience
pub use library::{Library, SavedEntry};
pub use machine::{Effect, MachineConfig, QueueUpdate, Step, Trigger, step};
pub use navigate::{DEFAULT_SEARCH_URL, Navigator, SearchEngine};
pub use normalize::{QueryKind, classify, extract_doi, normalize_query};
pub use page::{NoopPage, PageActions, Presenter};
pub use position::{PanelPosition, load_position, save_position};
pub use queue::{QueueSnapshot, QueueState, QueueStore};
pub use session::{Host, Session};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum NavigateError {
    #[error("failed to open {url}: {reason}")]
    Launch { url: String, reason: String },
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
    #[error("navigation error: {0}")]
    Navigate(#[from] NavigateError),
}
