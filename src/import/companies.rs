use serde::Deserialize;

use crate::error::{Error, Result};
use crate::resources::RawRecord;
use crate::types::Company;

#[derive(Debug, Deserialize)]
struct CompanyRecord {
    index: i64,
    company: String,
}

/// Validates every company record before anything is written.
pub(crate) fn stage_companies(records: &[RawRecord]) -> Result<Vec<Company>> {
    records
        .iter()
        .map(|record| {
            let parsed: CompanyRecord = serde_json::from_value(record.clone().into())
                .map_err(|e| Error::malformed("company", e.to_string(), record))?;

            Ok(Company {
                id: parsed.index,
                name: parsed.company,
            })
        })
        .collect()
}
