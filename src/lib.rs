//! Core of the React Pattern Playground: the embedded pattern catalog and the
//! persisted per-pattern progress store.
//!
//! The two halves share no runtime state. The catalog is read-only and
//! validated on load; the progress store owns user state and mirrors it to a
//! durable storage slot.

mod catalog;
mod progress;
mod storage;

pub use catalog::{
    catalog, Catalog, CatalogError, Category, Difficulty, PatternCode, PatternDescription,
    PatternRecord, MIN_CODE_CHARS, MIN_PROSE_CHARS,
};
pub use progress::{
    ProgressRecord, ProgressState, ProgressStore, ProgressStoreConfig, SaveOutcome,
    StateUpcaster, DEFAULT_STORAGE_KEY, PROGRESS_COMPLETED, PROGRESS_SAVED, SCHEMA_VERSION,
};
pub use storage::{FileStorage, InMemoryStorage, StorageBackend, StorageError};
