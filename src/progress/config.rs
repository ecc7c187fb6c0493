use super::StateUpcaster;

/// Storage slot used when no other key is configured.
pub const DEFAULT_STORAGE_KEY: &str = "rpp_progress";

/// Schema version written alongside the persisted progress.
pub const SCHEMA_VERSION: u32 = 1;

/// Where and how a `ProgressStore` persists its state.
#[derive(Debug, Clone)]
pub struct ProgressStoreConfig {
    storage_key: String,
    version: u32,
    upcasters: Vec<StateUpcaster>,
}

impl Default for ProgressStoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            version: SCHEMA_VERSION,
            upcasters: Vec::new(),
        }
    }
}

impl ProgressStoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the durable slot name.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the schema version this store reads and writes.
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Register a migration step for slots written by an older schema version.
    pub fn with_upcaster(mut self, upcaster: StateUpcaster) -> Self {
        self.upcasters.push(upcaster);
        self
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn upcasters(&self) -> &[StateUpcaster] {
        &self.upcasters
    }
}
