//! On-disk shape of the progress slot:
//! `{ "state": { "progress": [ ... ] }, "version": 1 }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{ProgressRecord, ProgressStoreConfig};

/// A pure migration of the raw `state` object from one schema version to the next.
///
/// Upcasters chain automatically (v1 -> v2 -> v3) and stop at the store's
/// configured version. A step whose `to_version` is not greater than its
/// `from_version`, or lies beyond the configured version, is ignored.
#[derive(Debug, Clone, Copy)]
pub struct StateUpcaster {
    pub from_version: u32,
    pub to_version: u32,
    pub transform: fn(Value) -> Value,
}

#[derive(Debug, Error)]
pub(crate) enum DecodeError {
    #[error("slot is not a progress envelope: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("slot has schema version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: StateRef<'a>,
    version: u32,
}

#[derive(Serialize)]
struct StateRef<'a> {
    progress: &'a [ProgressRecord],
}

#[derive(Deserialize)]
struct RawEnvelope {
    state: Value,
    version: u32,
}

#[derive(Deserialize)]
struct PersistedState {
    progress: Vec<ProgressRecord>,
}

pub(crate) fn encode(progress: &[ProgressRecord], version: u32) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeRef {
        state: StateRef { progress },
        version,
    })
}

pub(crate) fn decode(raw: &str, config: &ProgressStoreConfig) -> Result<Vec<ProgressRecord>, DecodeError> {
    let envelope: RawEnvelope = serde_json::from_str(raw)?;
    let expected = config.version();

    if envelope.version > expected {
        return Err(DecodeError::UnsupportedVersion {
            found: envelope.version,
            expected,
        });
    }

    let (state, version) = upcast(envelope.state, envelope.version, expected, config.upcasters());
    if version != expected {
        return Err(DecodeError::UnsupportedVersion {
            found: version,
            expected,
        });
    }

    let state: PersistedState = serde_json::from_value(state)?;
    Ok(state.progress)
}

fn upcast(
    mut state: Value,
    mut version: u32,
    target: u32,
    upcasters: &[StateUpcaster],
) -> (Value, u32) {
    while version < target {
        let step = upcasters.iter().find(|u| {
            u.from_version == version && u.to_version > u.from_version && u.to_version <= target
        });
        match step {
            Some(u) => {
                state = (u.transform)(state);
                version = u.to_version;
            }
            None => break,
        }
    }
    (state, version)
}
