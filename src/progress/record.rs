use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-pattern user state: the edited snippet and whether the pattern is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub pattern_id: String,
    pub user_code: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(with = "iso_millis")]
    pub last_modified: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn new(
        pattern_id: impl Into<String>,
        user_code: impl Into<String>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        Self {
            pattern_id: pattern_id.into(),
            user_code: user_code.into(),
            completed: false,
            last_modified,
        }
    }
}

/// `2024-05-01T12:00:00.123Z` on the way out, any RFC 3339 timestamp on the way in.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}
