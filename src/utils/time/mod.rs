// Time-of-day helpers for slot hours
// Slots arrive as "HH:MM" or "HH:MM:SS" strings from the API

use chrono::{NaiveTime, Timelike};

/// Parse a slot hour, accepting both `HH:MM` and `HH:MM:SS`.
pub fn parse_hour(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
}

pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Gutter label for a slot, e.g. `10:30` becomes `10.30`.
pub fn format_hour(time: NaiveTime) -> String {
    time.format("%H.%M").to_string()
}

/// Serde adapter for slot hours.
pub mod hour_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format("%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_hour(&raw)
            .map_err(|err| serde::de::Error::custom(format!("invalid slot hour '{}': {}", raw, err)))
    }
}
