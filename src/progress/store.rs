use chrono::{SubsecRound, Utc};
#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;

use crate::storage::{StorageBackend, StorageError};

use super::envelope;
use super::{ProgressRecord, ProgressState, ProgressStoreConfig};

/// Emitted with the pattern id after `save_progress` has been applied.
pub const PROGRESS_SAVED: &str = "ProgressSaved";

/// Emitted with the pattern id after `mark_completed` changed a record.
pub const PROGRESS_COMPLETED: &str = "ProgressCompleted";

/// The single owner of user progress for one storage slot.
///
/// In-memory state is authoritative. Every mutation rewrites the whole slot;
/// a failed write is logged and the next successful write repairs the slot.
pub struct ProgressStore<S> {
    state: ProgressState,
    storage: S,
    config: ProgressStoreConfig,
    #[cfg(feature = "emitter")]
    emitter: EventEmitter,
}

impl<S: StorageBackend> ProgressStore<S> {
    /// Open the store on the default slot, rehydrating whatever it holds.
    pub fn open(storage: S) -> Self {
        Self::with_config(storage, ProgressStoreConfig::default())
    }

    /// Open the store with explicit configuration.
    ///
    /// An absent, unreadable, corrupt or incompatible slot yields an empty
    /// store. Nothing is written until the first mutation.
    pub fn with_config(storage: S, config: ProgressStoreConfig) -> Self {
        let state = load(&storage, &config);
        Self {
            state,
            storage,
            config,
            #[cfg(feature = "emitter")]
            emitter: EventEmitter::new(),
        }
    }

    /// Upsert the user's code for a pattern and persist.
    pub fn save_progress(&mut self, pattern_id: &str, user_code: &str) {
        let now = Utc::now().trunc_subsecs(3);
        let outcome = self.state.save(pattern_id, user_code, now);
        tracing::debug!(pattern_id, ?outcome, "progress saved");

        self.write_through();
        self.emit(PROGRESS_SAVED, pattern_id);
    }

    /// Mark a pattern as completed and persist. Does nothing, and writes
    /// nothing, if the pattern has no saved progress yet.
    pub fn mark_completed(&mut self, pattern_id: &str) {
        if !self.state.mark_completed(pattern_id) {
            tracing::debug!(pattern_id, "no progress to complete");
            return;
        }

        self.write_through();
        self.emit(PROGRESS_COMPLETED, pattern_id);
    }

    pub fn get_progress(&self, pattern_id: &str) -> Option<&ProgressRecord> {
        self.state.get(pattern_id)
    }

    /// Live collection in first-save order.
    pub fn progress(&self) -> &[ProgressRecord] {
        self.state.records()
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn completed_count(&self) -> usize {
        self.state.completed_count()
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Write the current collection to the slot, reporting failures.
    pub fn flush(&self) -> Result<(), StorageError> {
        let value = envelope::encode(self.state.records(), self.config.version())?;
        self.storage.write(self.config.storage_key(), &value)
    }

    /// Forget all progress, in memory and in the slot.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        self.state.clear();
        self.storage.remove(self.config.storage_key())?;
        tracing::debug!(key = %self.config.storage_key(), "progress reset");
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &ProgressStoreConfig {
        &self.config
    }

    /// Register a listener for `PROGRESS_SAVED` or `PROGRESS_COMPLETED`.
    /// Listeners receive the pattern id and run off the caller's thread.
    #[cfg(feature = "emitter")]
    pub fn on_change<F>(&mut self, event: &str, listener: F) -> String
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.emitter.on(event, listener)
    }

    fn write_through(&self) {
        if let Err(err) = self.flush() {
            tracing::warn!(
                key = %self.config.storage_key(),
                error = %err,
                "failed to persist progress, keeping in-memory state"
            );
        }
    }

    #[cfg(feature = "emitter")]
    fn emit(&mut self, event: &str, pattern_id: &str) {
        self.emitter.emit(event, pattern_id.to_string());
    }

    #[cfg(not(feature = "emitter"))]
    fn emit(&mut self, _event: &str, _pattern_id: &str) {}
}

fn load<S: StorageBackend>(storage: &S, config: &ProgressStoreConfig) -> ProgressState {
    let key = config.storage_key();
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key = %key, "no stored progress");
            return ProgressState::new();
        }
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "could not read stored progress, starting empty");
            return ProgressState::new();
        }
    };

    match envelope::decode(&raw, config) {
        Ok(records) => {
            let state = ProgressState::from_records(records);
            tracing::debug!(key = %key, records = state.len(), "progress rehydrated");
            state
        }
        Err(err) => {
            tracing::warn!(key = %key, error = %err, "discarding stored progress");
            ProgressState::new()
        }
    }
}
