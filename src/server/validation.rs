use crate::query::parse_id;
use crate::server::response::{ApiError, QueryResultExt};

/// Parses every path id up front so a malformed one is reported before any
/// lookup runs.
pub fn parse_path_ids<const N: usize>(
    raw: [&str; N],
    entity: &'static str,
) -> Result<[i64; N], ApiError> {
    let mut ids = [0; N];
    for (id, raw) in ids.iter_mut().zip(raw) {
        *id = parse_id(raw).api_err(entity)?;
    }
    Ok(ids)
}
