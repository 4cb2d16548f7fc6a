use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::fields::{parse_address, parse_balance, parse_registered};
use crate::error::{Error, Result};
use crate::resources::RawRecord;
use crate::store::ImportWriter;
use crate::types::{FoodCategory, Gender, NewAddress, NewCitizen, NewFood};

/// A people record must carry exactly these keys.
pub const EXPECTED_FIELDS: [&str; 20] = [
    "_id",
    "index",
    "guid",
    "has_died",
    "balance",
    "picture",
    "age",
    "eyeColor",
    "name",
    "gender",
    "company_id",
    "email",
    "phone",
    "address",
    "about",
    "registered",
    "tags",
    "friends",
    "greeting",
    "favouriteFood",
];

#[derive(Debug, Deserialize)]
struct PersonRecord {
    #[serde(rename = "_id")]
    external_id: String,
    index: i64,
    guid: String,
    has_died: bool,
    balance: String,
    picture: String,
    age: u16,
    #[serde(rename = "eyeColor")]
    eye_color: String,
    name: String,
    gender: String,
    company_id: Option<i64>,
    email: String,
    phone: String,
    address: String,
    about: String,
    registered: String,
    tags: Vec<String>,
    friends: Vec<FriendRef>,
    greeting: String,
    #[serde(rename = "favouriteFood")]
    favourite_food: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FriendRef {
    index: i64,
}

/// A validated people record, not yet written.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StagedCitizen {
    pub id: i64,
    pub external_id: String,
    pub guid: String,
    pub name: String,
    pub age: u16,
    pub has_died: bool,
    pub phone_number: String,
    pub email: String,
    pub balance_in_cents: i64,
    pub picture_url: String,
    pub about: String,
    pub greeting: String,
    pub registered_at: DateTime<Utc>,
    pub gender: Gender,
    pub eye_color: String,
    pub address: NewAddress,
    pub company_id: Option<i64>,
    pub tags: Vec<String>,
    pub foods: Vec<NewFood>,
    pub friends: Vec<i64>,
}

/// The source `company_id` is one-based while company indices start at zero.
#[must_use]
pub fn company_index(company_id: i64) -> i64 {
    company_id - 1
}

fn check_fields(record: &RawRecord) -> std::result::Result<(), String> {
    let expected: HashSet<&str> = EXPECTED_FIELDS.into_iter().collect();
    let actual: HashSet<&str> = record.keys().map(String::as_str).collect();

    if actual == expected {
        return Ok(());
    }

    let mut missing: Vec<&str> = expected.difference(&actual).copied().collect();
    let mut unexpected: Vec<&str> = actual.difference(&expected).copied().collect();
    missing.sort_unstable();
    unexpected.sort_unstable();

    Err(format!(
        "field set mismatch, missing {missing:?}, unexpected {unexpected:?}"
    ))
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

/// Validates one people record and parses its string fields.
pub(crate) fn stage_citizen(record: &RawRecord) -> Result<StagedCitizen> {
    let malformed = |reason: String| Error::malformed("citizen", reason, record);

    check_fields(record).map_err(malformed)?;

    let parsed: PersonRecord =
        serde_json::from_value(record.clone().into()).map_err(|e| malformed(e.to_string()))?;

    let balance_in_cents = parse_balance(&parsed.balance).map_err(malformed)?;
    let address = parse_address(&parsed.address).map_err(malformed)?;
    let registered_at = parse_registered(&parsed.registered).map_err(malformed)?;

    let foods = dedup_preserving_order(parsed.favourite_food)
        .into_iter()
        .map(|name| NewFood {
            category: FoodCategory::of(&name),
            name,
        })
        .collect();

    let mut friends: Vec<i64> = parsed.friends.iter().map(|f| f.index).collect();
    friends.sort_unstable();
    friends.dedup();

    Ok(StagedCitizen {
        id: parsed.index,
        external_id: parsed.external_id,
        guid: parsed.guid,
        name: parsed.name,
        age: parsed.age,
        has_died: parsed.has_died,
        phone_number: parsed.phone,
        email: parsed.email,
        balance_in_cents,
        picture_url: parsed.picture,
        about: parsed.about,
        greeting: parsed.greeting,
        registered_at,
        gender: Gender::from_source(&parsed.gender),
        eye_color: parsed.eye_color,
        address,
        company_id: parsed.company_id.map(company_index),
        tags: dedup_preserving_order(parsed.tags),
        foods,
        friends,
    })
}

/// Rejects sequence ids repeated within the batch or already in the store.
fn check_collisions(
    writer: &dyn ImportWriter,
    staged: &[(&RawRecord, StagedCitizen)],
) -> Result<()> {
    let mut seen = HashSet::new();
    for (_, citizen) in staged {
        if !seen.insert(citizen.id) {
            return Err(Error::Conflict(format!(
                "citizen index {} appears more than once in the batch",
                citizen.id
            )));
        }
    }

    let ids: Vec<i64> = seen.into_iter().collect();
    let mut existing: Vec<i64> = writer.existing_citizen_ids(&ids)?.into_iter().collect();
    if !existing.is_empty() {
        existing.sort_unstable();
        return Err(Error::Conflict(format!(
            "citizens {existing:?} already exist; purge before re-importing"
        )));
    }
    Ok(())
}

fn write_citizen(
    writer: &dyn ImportWriter,
    record: &RawRecord,
    citizen: &StagedCitizen,
) -> Result<()> {
    if let Some(company_id) = citizen.company_id {
        if !writer.company_exists(company_id)? {
            return Err(Error::malformed(
                "citizen",
                format!("company {company_id} does not exist; import companies first"),
                record,
            ));
        }
    }

    let eye_color_id = writer.get_or_create_eye_color(&citizen.eye_color)?;

    // Conflict-ignoring inserts do not report ids for rows that already
    // existed, so the referenced rows are fetched back by name.
    writer.insert_foods_ignoring_conflicts(&citizen.foods)?;
    let food_names: Vec<String> = citizen.foods.iter().map(|f| f.name.clone()).collect();
    let food_ids: Vec<i64> = writer
        .fetch_foods_by_name(&food_names)?
        .into_iter()
        .map(|f| f.id)
        .collect();

    writer.insert_tags_ignoring_conflicts(&citizen.tags)?;
    let tag_ids: Vec<i64> = writer
        .fetch_tags_by_name(&citizen.tags)?
        .into_iter()
        .map(|t| t.id)
        .collect();

    let address_id = writer.insert_address(&citizen.address)?;

    writer.insert_citizen(&NewCitizen {
        id: citizen.id,
        external_id: citizen.external_id.clone(),
        guid: citizen.guid.clone(),
        name: citizen.name.clone(),
        age: citizen.age,
        has_died: citizen.has_died,
        phone_number: citizen.phone_number.clone(),
        email: citizen.email.clone(),
        balance_in_cents: citizen.balance_in_cents,
        picture_url: citizen.picture_url.clone(),
        about: citizen.about.clone(),
        greeting: citizen.greeting.clone(),
        registered_at: citizen.registered_at,
        gender: citizen.gender,
        eye_color_id,
        address_id,
        company_id: citizen.company_id,
    })?;

    writer.link_citizen_foods(citizen.id, &food_ids)?;
    writer.link_citizen_tags(citizen.id, &tag_ids)?;

    tracing::debug!("Staged citizen {} ({})", citizen.id, citizen.name);
    Ok(())
}

/// Second pass: once every citizen of the batch exists, wire the directed
/// friend edges. Returns the number of edges written.
fn write_friendships(
    writer: &dyn ImportWriter,
    staged: &[(&RawRecord, StagedCitizen)],
) -> Result<usize> {
    let referenced: Vec<i64> = staged
        .iter()
        .flat_map(|(_, citizen)| citizen.friends.iter().copied())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let existing = writer.existing_citizen_ids(&referenced)?;

    let mut edges = 0;
    for (record, citizen) in staged {
        if let Some(dangling) = citizen.friends.iter().find(|&&id| !existing.contains(&id)) {
            return Err(Error::malformed(
                "citizen",
                format!("friend index {dangling} does not match any citizen"),
                record,
            ));
        }

        writer.add_friends(citizen.id, &citizen.friends)?;
        edges += citizen.friends.len();
    }
    Ok(edges)
}

/// Writes a whole people batch through `writer`. Must run inside one
/// transaction: any error leaves earlier writes to be rolled back.
pub(crate) fn write_people(
    writer: &dyn ImportWriter,
    records: &[RawRecord],
) -> Result<(usize, usize)> {
    let staged = records
        .iter()
        .map(|record| stage_citizen(record).map(|citizen| (record, citizen)))
        .collect::<Result<Vec<_>>>()?;

    check_collisions(writer, &staged)?;

    for (record, citizen) in &staged {
        write_citizen(writer, record, citizen)?;
    }

    let friendships = write_friendships(writer, &staged)?;
    Ok((staged.len(), friendships))
}
