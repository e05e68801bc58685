use serde::{Deserialize, Deserializer, Serializer};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

/// Deserialize an RFC 3339 formatted string into an OffsetDateTime
pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OffsetDateTime::parse(&s, &Rfc3339).map_err(serde::de::Error::custom)
}

/// Serialize an OffsetDateTime into an RFC 3339 formatted string
pub fn serialize<S>(datetime: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let s = datetime
        .format(&Rfc3339)
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&s)
}

/// Current time in the local offset, falling back to UTC when the local
/// offset cannot be determined.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Formats a datetime as `YYYY-MM-DD`, used for export filenames.
pub fn date_stamp(datetime: OffsetDateTime) -> String {
    datetime
        .format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| datetime.date().to_string())
}

/// Formats a datetime as a terse `HH:MM` clock label for transcript display.
pub fn clock_label(datetime: OffsetDateTime) -> String {
    format!("{:02}:{:02}", datetime.hour(), datetime.minute())
}
