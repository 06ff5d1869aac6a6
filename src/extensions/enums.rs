use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::errors::{Error, Result};

/// Comma-separated list of every variant's canonical spelling, used in
/// parse error hints.
pub fn valid_csv<T>() -> String
where
    T: IntoEnumIterator + AsRef<str>,
{
    T::iter()
        .map(|v| v.as_ref().to_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a strum enum, turning a miss into `Error::Parse` that lists the
/// accepted values. `what` names the thing being parsed ("day of week").
pub fn parse_or_hint<T>(raw: &str, what: &str) -> Result<T>
where
    T: IntoEnumIterator + AsRef<str> + FromStr,
{
    T::from_str(raw.trim()).map_err(|_| {
        Error::Parse(format!(
            "Invalid {what}: '{}'. Valid values: {}",
            raw.trim(),
            valid_csv::<T>()
        ))
    })
}
