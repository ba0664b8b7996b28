// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! Utilities to assist `serde` deserialisation of common exchange wire formats.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer};
use std::{fmt::Display, str::FromStr, time::Duration};

/// Deserialise a `DateTime<Utc>` from a `Duration` since the epoch.
pub fn datetime_utc_from_epoch_duration(duration: Duration) -> DateTime<Utc> {
    DateTime::<Utc>::from(std::time::UNIX_EPOCH + duration)
}

/// Deserialise a `T` that implements `FromStr` from a `String`.
pub fn de_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let data: String = Deserialize::deserialize(deserializer)?;
    data.parse::<T>().map_err(de::Error::custom)
}

/// Deserialise a `DateTime<Utc>` from a `u64` milliseconds since the epoch.
pub fn de_u64_epoch_ms_as_datetime_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let epoch_ms: u64 = Deserialize::deserialize(deserializer)?;
    Ok(datetime_utc_from_epoch_duration(Duration::from_millis(
        epoch_ms,
    )))
}

/// Deserialise a `DateTime<Utc>` from a `String` milliseconds since the epoch.
pub fn de_str_u64_epoch_ms_as_datetime_utc<'de, D>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let epoch_ms: String = Deserialize::deserialize(deserializer)?;
    let epoch_ms = epoch_ms.parse::<u64>().map_err(de::Error::custom)?;
    Ok(datetime_utc_from_epoch_duration(Duration::from_millis(
        epoch_ms,
    )))
}

/// Deserialise a `DateTime<Utc>` from a `String` floating point milliseconds since the epoch.
pub fn de_str_f64_epoch_ms_as_datetime_utc<'de, D>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let epoch_ms: String = Deserialize::deserialize(deserializer)?;
    let epoch_ms = epoch_ms.parse::<f64>().map_err(de::Error::custom)?;
    Ok(datetime_utc_from_epoch_duration(Duration::from_secs_f64(
        epoch_ms / 1000.0,
    )))
}

/// Deserialise a `DateTime<Utc>` from a `String` floating point seconds since the epoch.
pub fn de_str_f64_epoch_s_as_datetime_utc<'de, D>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let epoch_s: String = Deserialize::deserialize(deserializer)?;
    let epoch_s = epoch_s.parse::<f64>().map_err(de::Error::custom)?;
    Ok(datetime_utc_from_epoch_duration(Duration::from_secs_f64(
        epoch_s,
    )))
}

/// Take the next value from a `Vec`-backed `SeqAccess`, erroring if the sequence is shorter
/// than expected. Useful when an exchange encodes a struct as a bare JSON array.
pub fn extract_next<'de, SeqAccessor, T>(
    seq: &mut SeqAccessor,
    name: &'static str,
) -> Result<T, SeqAccessor::Error>
where
    SeqAccessor: de::SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::missing_field(name))
}

/// Serialise a single `T` as a one-element JSON array - the inverse of exchanges that encode a
/// singleton value as a vector.
pub fn se_element_to_vector<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
    T: serde::Serialize,
{
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(1))?;
    seq.serialize_element(value)?;
    seq.end()
}
