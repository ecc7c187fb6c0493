//! Pure in-memory progress collection. No storage, no clock: callers pass
//! the timestamp in.

use chrono::{DateTime, Utc};

use super::ProgressRecord;

/// What a save did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Updated,
}

/// Keyed set of progress records in first-save order. At most one record per
/// pattern id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    records: Vec<ProgressRecord>,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from loaded records. When an id repeats, the first occurrence wins.
    pub fn from_records(records: Vec<ProgressRecord>) -> Self {
        let mut state = Self::new();
        for record in records {
            if state.get(&record.pattern_id).is_none() {
                state.records.push(record);
            }
        }
        state
    }

    pub fn records(&self) -> &[ProgressRecord] {
        &self.records
    }

    pub fn get(&self, pattern_id: &str) -> Option<&ProgressRecord> {
        self.records
            .iter()
            .find(|record| record.pattern_id == pattern_id)
    }

    /// Upsert the user's code. An existing record keeps its `completed` flag
    /// and position; its timestamp never moves backwards.
    pub fn save(&mut self, pattern_id: &str, user_code: &str, now: DateTime<Utc>) -> SaveOutcome {
        match self
            .records
            .iter_mut()
            .find(|record| record.pattern_id == pattern_id)
        {
            Some(record) => {
                record.user_code = user_code.to_string();
                record.last_modified = record.last_modified.max(now);
                SaveOutcome::Updated
            }
            None => {
                self.records
                    .push(ProgressRecord::new(pattern_id, user_code, now));
                SaveOutcome::Inserted
            }
        }
    }

    /// Flag a record as completed. Returns false, leaving the collection
    /// untouched, when no record exists for the id.
    pub fn mark_completed(&mut self, pattern_id: &str) -> bool {
        match self
            .records
            .iter_mut()
            .find(|record| record.pattern_id == pattern_id)
        {
            Some(record) => {
                record.completed = true;
                true
            }
            None => false,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.records.iter().filter(|record| record.completed).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
