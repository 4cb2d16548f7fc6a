//! Import pipeline: turns raw company and people records into rows.
//!
//! Companies must be imported before the people that work for them. Every
//! entry point is all-or-nothing: a failure in any record rolls back the whole
//! batch.

mod companies;
pub mod fields;
mod people;

#[cfg(test)]
pub(crate) mod fixtures;

pub use people::{EXPECTED_FIELDS, company_index};

use serde::Serialize;

use crate::error::Result;
use crate::resources::{RawRecord, Resource, ResourceLoader};
use crate::store::Store;

/// What an import run wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub companies: usize,
    pub citizens: usize,
    pub friendships: usize,
}

/// Imports company records as one bulk insert.
pub fn import_companies(store: &dyn Store, records: &[RawRecord]) -> Result<ImportSummary> {
    let companies = companies::stage_companies(records)?;

    store.transaction(&mut |writer| writer.insert_companies(&companies))?;

    tracing::info!("Imported {} companies", companies.len());
    Ok(ImportSummary {
        companies: companies.len(),
        ..ImportSummary::default()
    })
}

/// Imports people records. Friend edges are wired after every citizen of the
/// batch has been created.
pub fn import_people(store: &dyn Store, records: &[RawRecord]) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();

    store.transaction(&mut |writer| {
        let (citizens, friendships) = people::write_people(writer, records)?;
        summary.citizens = citizens;
        summary.friendships = friendships;
        Ok(())
    })?;

    tracing::info!(
        "Imported {} citizens with {} friendships",
        summary.citizens,
        summary.friendships
    );
    Ok(summary)
}

/// Loads both resources and imports companies then people in a single
/// transaction.
pub fn import_resources(store: &dyn Store, loader: &dyn ResourceLoader) -> Result<ImportSummary> {
    let company_records = loader.load(Resource::Companies)?;
    let people_records = loader.load(Resource::People)?;

    let companies = companies::stage_companies(&company_records)?;
    let mut summary = ImportSummary {
        companies: companies.len(),
        ..ImportSummary::default()
    };

    store.transaction(&mut |writer| {
        writer.insert_companies(&companies)?;
        let (citizens, friendships) = people::write_people(writer, &people_records)?;
        summary.citizens = citizens;
        summary.friendships = friendships;
        Ok(())
    })?;

    tracing::info!(
        "Imported {} companies and {} citizens with {} friendships",
        summary.companies,
        summary.citizens,
        summary.friendships
    );
    Ok(summary)
}
