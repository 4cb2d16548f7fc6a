//! Read-only queries over imported citizens and companies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{Citizen, Company, FoodCategory};

/// Eye color a common friend must have to be reported.
pub const COMMON_FRIEND_EYE_COLOR: &str = "brown";

/// Parses a caller supplied identifier. Runs before any store lookup.
pub fn parse_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::InvalidIdentifierFormat(raw.to_string()))
}

pub fn get_citizen(store: &dyn Store, id: i64) -> Result<Citizen> {
    store.get_citizen(id)?.ok_or(Error::NotFound)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitizenProfile {
    pub citizen: Citizen,
    pub fruits: Vec<String>,
    pub vegetables: Vec<String>,
}

/// A citizen together with their favourite fruits and vegetables.
pub fn citizen_profile(store: &dyn Store, id: i64) -> Result<CitizenProfile> {
    let citizen = get_citizen(store, id)?;
    let foods = store.list_citizen_foods(id)?;

    let names_in = |category: FoodCategory| {
        foods
            .iter()
            .filter(|f| f.category == category)
            .map(|f| f.name.clone())
            .collect::<Vec<_>>()
    };

    Ok(CitizenProfile {
        fruits: names_in(FoodCategory::Fruit),
        vegetables: names_in(FoodCategory::Vegetable),
        citizen,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub citizens: [Citizen; 2],
    /// Ordered by sequence id.
    pub common_friends: Vec<Citizen>,
}

fn is_live_brown_eyed(citizen: &Citizen) -> bool {
    citizen.is_alive() && citizen.eye_color.color_name == COMMON_FRIEND_EYE_COLOR
}

fn qualifying_friends(store: &dyn Store, id: i64) -> Result<BTreeMap<i64, Citizen>> {
    Ok(store
        .list_friends(id)?
        .into_iter()
        .filter(is_live_brown_eyed)
        .map(|c| (c.id, c))
        .collect())
}

/// Both citizens, ordered by id, plus the friends they have in common that
/// are alive and brown-eyed. Only edges leaving `a` and `b` count.
///
/// `a` and `b` must name two distinct citizens; comparing a citizen with
/// itself is `NotFound`.
pub fn compare_citizens(store: &dyn Store, a: i64, b: i64) -> Result<Comparison> {
    if a == b {
        return Err(Error::NotFound);
    }
    let (a, b) = (a.min(b), a.max(b));

    let citizen_a = get_citizen(store, a)?;
    let citizen_b = get_citizen(store, b)?;

    let friends_of_a = qualifying_friends(store, a)?;
    let mut friends_of_b = qualifying_friends(store, b)?;

    let common_friends = friends_of_a
        .into_keys()
        .filter_map(|id| friends_of_b.remove(&id))
        .collect();

    Ok(Comparison {
        citizens: [citizen_a, citizen_b],
        common_friends,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CompanyEmployees {
    Employees {
        company: Company,
        /// Ordered by sequence id.
        employees: Vec<Citizen>,
    },
    /// The company exists but nobody works there.
    NoEmployees(Company),
}

pub fn get_company_employees(store: &dyn Store, company_id: i64) -> Result<CompanyEmployees> {
    let company = store.get_company(company_id)?.ok_or(Error::NotFound)?;
    let employees = store.list_company_employees(company_id)?;

    if employees.is_empty() {
        return Ok(CompanyEmployees::NoEmployees(company));
    }

    Ok(CompanyEmployees::Employees { company, employees })
}
