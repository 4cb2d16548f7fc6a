//! Parsers for the loosely formatted string fields of the people resource.
//!
//! Each returns a plain `String` reason on failure; the caller wraps it into a
//! `MalformedRecord` together with the record it came from.

use chrono::{DateTime, Utc};

use crate::types::NewAddress;

/// Source timestamps look like `2016-07-13T12:29:07 -01:00`.
const REGISTERED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S %:z";

/// Parses a balance of the form `$2,418.59` into cents.
pub fn parse_balance(raw: &str) -> Result<i64, String> {
    let cleaned = raw.trim().replace(['$', ','], "");
    let (sign, unsigned) = match cleaned.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, cleaned.as_str()),
    };
    let (dollars, cents) = unsigned
        .split_once('.')
        .ok_or_else(|| format!("balance '{raw}' has no cents part"))?;

    if dollars.is_empty() || !dollars.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("balance '{raw}' has an invalid dollar amount"));
    }
    if cents.len() != 2 || !cents.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("balance '{raw}' must have exactly two cent digits"));
    }

    let dollars: i64 = dollars
        .parse()
        .map_err(|_| format!("balance '{raw}' is out of range"))?;
    let cents: i64 = cents
        .parse()
        .map_err(|_| format!("balance '{raw}' has an invalid cent amount"))?;

    // The sign covers the whole amount, cents included.
    dollars
        .checked_mul(100)
        .and_then(|d| d.checked_add(cents))
        .map(|total| sign * total)
        .ok_or_else(|| format!("balance '{raw}' is out of range"))
}

/// Splits `street, city, state, post code` into its four trimmed parts.
pub fn parse_address(raw: &str) -> Result<NewAddress, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();

    match parts.as_slice() {
        [street, city, state, post_code] => Ok(NewAddress {
            street_address: street.to_string(),
            city_name: city.to_string(),
            state_name: state.to_string(),
            post_code: post_code.to_string(),
        }),
        _ => Err(format!(
            "address '{raw}' has {} comma separated parts, expected 4",
            parts.len()
        )),
    }
}

/// Normalizes a registration timestamp to UTC.
pub fn parse_registered(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_str(raw, REGISTERED_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("registered timestamp '{raw}' is invalid: {e}"))
}
