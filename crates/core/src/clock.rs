use chrono::{DateTime, Utc};

/// Current wall-clock time truncated to millisecond precision, the resolution
/// the persisted format carries.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// `SKU-<epoch-ms>`, used when a variant is saved with a blank SKU.
pub fn synthetic_sku(at: DateTime<Utc>) -> String {
    format!("SKU-{}", at.timestamp_millis())
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix
/// (`2024-05-01T10:00:00.000Z`).
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(|e| serde::de::Error::custom(format!("invalid timestamp {raw:?}: {e}")))
    }
}
