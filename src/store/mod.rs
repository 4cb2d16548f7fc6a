mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use std::collections::HashSet;

use crate::error::Result;
use crate::types::*;

/// Store defines the database interface.
///
/// Reads go straight to the store. Writes only happen inside
/// [`Store::transaction`], through the [`ImportWriter`] it hands out.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    /// Runs `f` in a single transaction. Commits when `f` returns `Ok`,
    /// rolls back every write made through the writer otherwise.
    fn transaction(&self, f: &mut dyn FnMut(&dyn ImportWriter) -> Result<()>) -> Result<()>;

    // Citizen operations
    fn get_citizen(&self, id: i64) -> Result<Option<Citizen>>;
    fn list_citizen_foods(&self, citizen_id: i64) -> Result<Vec<Food>>;
    fn list_citizen_tags(&self, citizen_id: i64) -> Result<Vec<Tag>>;
    /// Citizens that `citizen_id` lists as friends, ordered by id.
    fn list_friends(&self, citizen_id: i64) -> Result<Vec<Citizen>>;

    // Company operations
    fn get_company(&self, id: i64) -> Result<Option<Company>>;
    fn list_companies(&self) -> Result<Vec<Company>>;
    fn list_company_employees(&self, company_id: i64) -> Result<Vec<Citizen>>;

    // Reference data
    fn list_tags(&self) -> Result<Vec<Tag>>;
    fn list_foods(&self) -> Result<Vec<Food>>;
    fn list_eye_colors(&self) -> Result<Vec<EyeColor>>;

    fn count_entities(&self) -> Result<EntityCounts>;

    /// Removes every entity of every type. Returns what was there before.
    fn purge(&self) -> Result<EntityCounts>;
}

/// Write surface available inside a [`Store::transaction`].
pub trait ImportWriter {
    /// Bulk insert; a colliding id fails the whole call.
    fn insert_companies(&self, companies: &[Company]) -> Result<()>;
    fn company_exists(&self, id: i64) -> Result<bool>;

    /// Returns the id of the eye color named `color_name`, creating it if needed.
    fn get_or_create_eye_color(&self, color_name: &str) -> Result<i64>;

    /// Inserts foods, silently skipping names that already exist.
    fn insert_foods_ignoring_conflicts(&self, foods: &[NewFood]) -> Result<()>;
    fn fetch_foods_by_name(&self, names: &[String]) -> Result<Vec<Food>>;

    /// Inserts tags, silently skipping names that already exist.
    fn insert_tags_ignoring_conflicts(&self, names: &[String]) -> Result<()>;
    fn fetch_tags_by_name(&self, names: &[String]) -> Result<Vec<Tag>>;

    fn insert_address(&self, address: &NewAddress) -> Result<i64>;
    fn insert_citizen(&self, citizen: &NewCitizen) -> Result<()>;
    fn link_citizen_foods(&self, citizen_id: i64, food_ids: &[i64]) -> Result<()>;
    fn link_citizen_tags(&self, citizen_id: i64, tag_ids: &[i64]) -> Result<()>;

    /// The subset of `ids` that already have a citizen row.
    fn existing_citizen_ids(&self, ids: &[i64]) -> Result<HashSet<i64>>;
    /// Adds directed edges from `citizen_id` to each of `friend_ids`.
    fn add_friends(&self, citizen_id: i64, friend_ids: &[i64]) -> Result<()>;
}
