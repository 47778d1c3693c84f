use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Dates in GTFS tables are `YYYYMMDD` without separators.
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(&value, "%Y%m%d").map_err(serde::de::Error::custom)
}

/// Weekday flags are `0` or `1`, nothing else.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match u8::deserialize(deserializer)? {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(serde::de::Error::custom(format!(
            "expected 0 or 1, got {value}"
        ))),
    }
}
