//! Progress - per-pattern user state, persisted to a durable slot.
//!
//! Two layers:
//! - [`ProgressState`]: plain in-memory upsert/query over records.
//! - [`ProgressStore`]: wraps a state with a [`StorageBackend`](crate::StorageBackend),
//!   rehydrating on open and writing the whole collection through after
//!   every mutation.
//!
//! ## Example
//!
//! ```
//! use pattern_playground::{InMemoryStorage, ProgressStore};
//!
//! let storage = InMemoryStorage::new();
//! let mut store = ProgressStore::open(storage.clone());
//! store.save_progress("context-api", "const UserContext = createContext(null);");
//! store.mark_completed("context-api");
//!
//! let reopened = ProgressStore::open(storage);
//! assert!(reopened.get_progress("context-api").unwrap().completed);
//! ```

mod config;
mod envelope;
mod record;
mod state;
mod store;

pub use config::{ProgressStoreConfig, DEFAULT_STORAGE_KEY, SCHEMA_VERSION};
pub use envelope::StateUpcaster;
pub use record::ProgressRecord;
pub use state::{ProgressState, SaveOutcome};
pub use store::{ProgressStore, PROGRESS_COMPLETED, PROGRESS_SAVED};
