use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

use super::schema::SCHEMA;
use super::{ImportWriter, Store};
use crate::error::{Error, Result};
use crate::types::*;

const CITIZEN_COLUMNS: &str = "c.id, c.external_id, c.guid, c.name, c.age, c.has_died,
        c.phone_number, c.email, c.balance_in_cents, c.picture_url, c.about, c.greeting,
        c.registered_at, c.gender_code, e.id, e.color_name,
        a.id, a.street_address, a.city_name, a.state_name, a.post_code, c.company_id";

const CITIZEN_JOINS: &str = "citizens c
        JOIN eye_colors e ON e.id = c.eye_color_id
        JOIN addresses a ON a.id = c.address_id";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Returns a guard to the underlying database connection.
    /// This allows consuming applications to execute custom SQL.
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn()
    }
}

fn parse_datetime(s: &str, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

fn conflict_on_constraint(err: rusqlite::Error, message: impl FnOnce() -> String) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::Conflict(message())
        }
        e => Error::from(e),
    }
}

fn row_to_citizen(row: &Row<'_>) -> rusqlite::Result<Citizen> {
    let gender_code: u8 = row.get(13)?;
    let gender = Gender::from_code(gender_code).unwrap_or_else(|| {
        tracing::warn!("Unknown gender code in database: {gender_code}");
        Gender::Unknown
    });

    Ok(Citizen {
        id: row.get(0)?,
        external_id: row.get(1)?,
        guid: row.get(2)?,
        name: row.get(3)?,
        age: row.get(4)?,
        has_died: row.get(5)?,
        phone_number: row.get(6)?,
        email: row.get(7)?,
        balance_in_cents: row.get(8)?,
        picture_url: row.get(9)?,
        about: row.get(10)?,
        greeting: row.get(11)?,
        registered_at: parse_datetime(&row.get::<_, String>(12)?, 12)?,
        gender,
        eye_color: EyeColor {
            id: row.get(14)?,
            color_name: row.get(15)?,
        },
        address: Address {
            id: row.get(16)?,
            street_address: row.get(17)?,
            city_name: row.get(18)?,
            state_name: row.get(19)?,
            post_code: row.get(20)?,
        },
        company_id: row.get(21)?,
    })
}

fn row_to_food(row: &Row<'_>) -> rusqlite::Result<Food> {
    let category = row
        .get::<_, String>(2)?
        .parse::<FoodCategory>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into()))?;

    Ok(Food {
        id: row.get(0)?,
        name: row.get(1)?,
        category,
    })
}

fn row_to_tag(row: &Row<'_>) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn query_citizens(conn: &Connection, filter: &str, id: i64) -> Result<Vec<Citizen>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CITIZEN_COLUMNS} FROM {CITIZEN_JOINS} {filter} ORDER BY c.id"
    ))?;

    let rows = stmt.query_map(params![id], row_to_citizen)?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    let count = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(count)
}

fn count_all(conn: &Connection) -> Result<EntityCounts> {
    Ok(EntityCounts {
        citizens: count_rows(conn, "citizens")?,
        companies: count_rows(conn, "companies")?,
        eye_colors: count_rows(conn, "eye_colors")?,
        addresses: count_rows(conn, "addresses")?,
        tags: count_rows(conn, "tags")?,
        foods: count_rows(conn, "foods")?,
        friendships: count_rows(conn, "citizen_friends")?,
    })
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn transaction(&self, f: &mut dyn FnMut(&dyn ImportWriter) -> Result<()>) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        // Dropping `tx` without committing rolls it back.
        f(&SqliteWriter { conn: &*tx })?;

        tx.commit()?;
        Ok(())
    }

    // Citizen operations

    fn get_citizen(&self, id: i64) -> Result<Option<Citizen>> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {CITIZEN_COLUMNS} FROM {CITIZEN_JOINS} WHERE c.id = ?1"),
            params![id],
            row_to_citizen,
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_citizen_foods(&self, citizen_id: i64) -> Result<Vec<Food>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT f.id, f.name, f.category FROM foods f
             JOIN citizen_foods cf ON cf.food_id = f.id
             WHERE cf.citizen_id = ?1
             ORDER BY f.name",
        )?;

        let rows = stmt.query_map(params![citizen_id], row_to_food)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_citizen_tags(&self, citizen_id: i64) -> Result<Vec<Tag>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT t.id, t.name FROM tags t
             JOIN citizen_tags ct ON ct.tag_id = t.id
             WHERE ct.citizen_id = ?1
             ORDER BY t.name",
        )?;

        let rows = stmt.query_map(params![citizen_id], row_to_tag)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_friends(&self, citizen_id: i64) -> Result<Vec<Citizen>> {
        let conn = self.conn();
        query_citizens(
            &conn,
            "JOIN citizen_friends cf ON cf.friend_id = c.id WHERE cf.citizen_id = ?1",
            citizen_id,
        )
    }

    // Company operations

    fn get_company(&self, id: i64) -> Result<Option<Company>> {
        let conn = self.conn();
        conn.query_row(
            "SELECT id, name FROM companies WHERE id = ?1",
            params![id],
            |row| {
                Ok(Company {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(Error::from)
    }

    fn list_companies(&self) -> Result<Vec<Company>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT id, name FROM companies ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok(Company {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_company_employees(&self, company_id: i64) -> Result<Vec<Citizen>> {
        let conn = self.conn();
        query_citizens(&conn, "WHERE c.company_id = ?1", company_id)
    }

    // Reference data

    fn list_tags(&self) -> Result<Vec<Tag>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT id, name FROM tags ORDER BY name")?;

        let rows = stmt.query_map([], row_to_tag)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_foods(&self) -> Result<Vec<Food>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT id, name, category FROM foods ORDER BY name")?;

        let rows = stmt.query_map([], row_to_food)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn list_eye_colors(&self) -> Result<Vec<EyeColor>> {
        let conn = self.conn();
        let mut stmt = conn.prepare("SELECT id, color_name FROM eye_colors ORDER BY color_name")?;

        let rows = stmt.query_map([], |row| {
            Ok(EyeColor {
                id: row.get(0)?,
                color_name: row.get(1)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn count_entities(&self) -> Result<EntityCounts> {
        count_all(&self.conn())
    }

    fn purge(&self) -> Result<EntityCounts> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let removed = count_all(&tx)?;

        // Join tables and citizens first; the reference tables are protected
        // while citizens still point at them.
        for table in [
            "citizen_friends",
            "citizen_tags",
            "citizen_foods",
            "citizens",
            "eye_colors",
            "foods",
            "tags",
            "companies",
            "addresses",
        ] {
            tx.execute(&format!("DELETE FROM {table}"), [])?;
        }

        tx.commit()?;
        Ok(removed)
    }
}

/// Writes made through this go into the transaction opened by
/// [`SqliteStore::transaction`].
struct SqliteWriter<'a> {
    conn: &'a Connection,
}

impl ImportWriter for SqliteWriter<'_> {
    fn insert_companies(&self, companies: &[Company]) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO companies (id, name) VALUES (?1, ?2)")?;

        for company in companies {
            stmt.execute(params![company.id, company.name])
                .map_err(|e| {
                    conflict_on_constraint(e, || {
                        format!("company {} already exists; purge before re-importing", company.id)
                    })
                })?;
        }
        Ok(())
    }

    fn company_exists(&self, id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM companies WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn get_or_create_eye_color(&self, color_name: &str) -> Result<i64> {
        let existing: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM eye_colors WHERE color_name = ?1",
                params![color_name],
                |row| row.get(0),
            )
            .optional()?;

        match existing {
            Some(id) => Ok(id),
            None => {
                self.conn.execute(
                    "INSERT INTO eye_colors (color_name) VALUES (?1)",
                    params![color_name],
                )?;
                Ok(self.conn.last_insert_rowid())
            }
        }
    }

    fn insert_foods_ignoring_conflicts(&self, foods: &[NewFood]) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO foods (name, category) VALUES (?1, ?2)
             ON CONFLICT (name) DO NOTHING",
        )?;

        for food in foods {
            stmt.execute(params![food.name, food.category.as_str()])?;
        }
        Ok(())
    }

    fn fetch_foods_by_name(&self, names: &[String]) -> Result<Vec<Food>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, name, category FROM foods WHERE name IN ({}) ORDER BY id",
            placeholders(names.len())
        ))?;

        let rows = stmt.query_map(params_from_iter(names), row_to_food)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn insert_tags_ignoring_conflicts(&self, names: &[String]) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO tags (name) VALUES (?1) ON CONFLICT (name) DO NOTHING")?;

        for name in names {
            stmt.execute(params![name])?;
        }
        Ok(())
    }

    fn fetch_tags_by_name(&self, names: &[String]) -> Result<Vec<Tag>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT id, name FROM tags WHERE name IN ({}) ORDER BY id",
            placeholders(names.len())
        ))?;

        let rows = stmt.query_map(params_from_iter(names), row_to_tag)?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::from)
    }

    fn insert_address(&self, address: &NewAddress) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO addresses (street_address, city_name, state_name, post_code)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                address.street_address,
                address.city_name,
                address.state_name,
                address.post_code,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn insert_citizen(&self, citizen: &NewCitizen) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO citizens (
                    id, external_id, guid, name, age, has_died, phone_number, email,
                    balance_in_cents, picture_url, about, greeting, registered_at, gender_code,
                    eye_color_id, address_id, company_id
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9,
                           ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
                params![
                    citizen.id,
                    citizen.external_id,
                    citizen.guid,
                    citizen.name,
                    citizen.age,
                    citizen.has_died,
                    citizen.phone_number,
                    citizen.email,
                    citizen.balance_in_cents,
                    citizen.picture_url,
                    citizen.about,
                    citizen.greeting,
                    format_datetime(&citizen.registered_at),
                    citizen.gender.code(),
                    citizen.eye_color_id,
                    citizen.address_id,
                    citizen.company_id,
                ],
            )
            .map_err(|e| {
                conflict_on_constraint(e, || {
                    format!(
                        "citizen {} (_id {}, guid {}) collides with an existing row",
                        citizen.id, citizen.external_id, citizen.guid
                    )
                })
            })?;
        Ok(())
    }

    fn link_citizen_foods(&self, citizen_id: i64, food_ids: &[i64]) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR IGNORE INTO citizen_foods (citizen_id, food_id) VALUES (?1, ?2)",
        )?;

        for food_id in food_ids {
            stmt.execute(params![citizen_id, food_id])?;
        }
        Ok(())
    }

    fn link_citizen_tags(&self, citizen_id: i64, tag_ids: &[i64]) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR IGNORE INTO citizen_tags (citizen_id, tag_id) VALUES (?1, ?2)",
        )?;

        for tag_id in tag_ids {
            stmt.execute(params![citizen_id, tag_id])?;
        }
        Ok(())
    }

    fn existing_citizen_ids(&self, ids: &[i64]) -> Result<HashSet<i64>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT id FROM citizens WHERE id IN ({})",
            placeholders(ids.len())
        ))?;

        let rows = stmt.query_map(params_from_iter(ids), |row| row.get(0))?;

        rows.collect::<std::result::Result<HashSet<_>, _>>()
            .map_err(Error::from)
    }

    fn add_friends(&self, citizen_id: i64, friend_ids: &[i64]) -> Result<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT OR IGNORE INTO citizen_friends (citizen_id, friend_id) VALUES (?1, ?2)",
        )?;

        for friend_id in friend_ids {
            stmt.execute(params![citizen_id, friend_id])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, SqliteStore) {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();
        (temp, store)
    }

    fn new_citizen(
        id: i64,
        eye_color_id: i64,
        address_id: i64,
        company_id: Option<i64>,
    ) -> NewCitizen {
        NewCitizen {
            id,
            external_id: format!("ext-{id}"),
            guid: format!("guid-{id}"),
            name: format!("Citizen {id}"),
            age: 30,
            has_died: false,
            phone_number: "+1 (910) 567-3630".to_string(),
            email: format!("citizen{id}@example.com"),
            balance_in_cents: 100,
            picture_url: "http://placehold.it/32x32".to_string(),
            about: "About".to_string(),
            greeting: "Hello".to_string(),
            registered_at: Utc.with_ymd_and_hms(2016, 7, 13, 13, 29, 7).unwrap(),
            gender: Gender::Female,
            eye_color_id,
            address_id,
            company_id,
        }
    }

    fn new_address(street: &str) -> NewAddress {
        NewAddress {
            street_address: street.to_string(),
            city_name: "City".to_string(),
            state_name: "State".to_string(),
            post_code: "1234".to_string(),
        }
    }

    fn insert_citizen(store: &SqliteStore, id: i64, color: &str, company_id: Option<i64>) {
        store
            .transaction(&mut |w| {
                let eye = w.get_or_create_eye_color(color)?;
                let address = w.insert_address(&new_address(&format!("{id} Street")))?;
                w.insert_citizen(&new_citizen(id, eye, address, company_id))
            })
            .unwrap();
    }

    #[test]
    fn test_initialize_creates_tables() {
        let (_temp, store) = test_store();

        let conn = store.conn();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        for table in [
            "addresses",
            "citizen_foods",
            "citizen_friends",
            "citizen_tags",
            "citizens",
            "companies",
            "eye_colors",
            "foods",
            "tags",
        ] {
            assert!(tables.contains(&table.to_string()), "missing table {table}");
        }
    }

    #[test]
    fn test_initialize_is_repeatable() {
        let (_temp, store) = test_store();
        store.initialize().unwrap();
    }

    #[test]
    fn test_citizen_round_trip() {
        let (_temp, store) = test_store();
        store
            .transaction(&mut |w| {
                w.insert_companies(&[Company {
                    id: 57,
                    name: "SOME_COMPANY".to_string(),
                }])
            })
            .unwrap();
        insert_citizen(&store, 0, "blue", Some(57));

        let citizen = store.get_citizen(0).unwrap().unwrap();
        assert_eq!(citizen.external_id, "ext-0");
        assert_eq!(citizen.gender, Gender::Female);
        assert_eq!(citizen.eye_color.color_name, "blue");
        assert_eq!(citizen.address.street_address, "0 Street");
        assert_eq!(citizen.company_id, Some(57));
        assert_eq!(
            citizen.registered_at,
            Utc.with_ymd_and_hms(2016, 7, 13, 13, 29, 7).unwrap()
        );

        assert!(store.get_citizen(1).unwrap().is_none());
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let (_temp, store) = test_store();

        let result = store.transaction(&mut |w| {
            w.insert_companies(&[Company {
                id: 0,
                name: "ROLLED_BACK".to_string(),
            }])?;
            w.get_or_create_eye_color("green")?;
            Err(Error::Config("boom".to_string()))
        });

        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(store.count_entities().unwrap(), EntityCounts::default());
    }

    #[test]
    fn test_company_id_collision_is_conflict() {
        let (_temp, store) = test_store();
        let company = Company {
            id: 3,
            name: "ACME".to_string(),
        };

        store
            .transaction(&mut |w| w.insert_companies(std::slice::from_ref(&company)))
            .unwrap();
        let result = store.transaction(&mut |w| w.insert_companies(std::slice::from_ref(&company)));

        assert!(matches!(result, Err(Error::Conflict(_))));
        assert_eq!(store.list_companies().unwrap().len(), 1);
    }

    #[test]
    fn test_get_or_create_eye_color_is_idempotent() {
        let (_temp, store) = test_store();
        let mut ids = Vec::new();

        store
            .transaction(&mut |w| {
                ids.push(w.get_or_create_eye_color("brown")?);
                ids.push(w.get_or_create_eye_color("brown")?);
                ids.push(w.get_or_create_eye_color("blue")?);
                Ok(())
            })
            .unwrap();

        assert_eq!(ids[0], ids[1]);
        assert_ne!(ids[0], ids[2]);
        assert_eq!(store.list_eye_colors().unwrap().len(), 2);
    }

    #[test]
    fn test_conflict_ignoring_inserts_then_fetch() {
        let (_temp, store) = test_store();
        let names = vec!["apple".to_string(), "mushroom".to_string()];
        let mut fetched = Vec::new();

        store
            .transaction(&mut |w| {
                let foods: Vec<NewFood> = names
                    .iter()
                    .map(|name| NewFood {
                        name: name.clone(),
                        category: FoodCategory::of(name),
                    })
                    .collect();
                w.insert_foods_ignoring_conflicts(&foods)?;
                w.insert_foods_ignoring_conflicts(&foods)?;
                fetched = w.fetch_foods_by_name(&names)?;

                w.insert_tags_ignoring_conflicts(&["a".to_string(), "a".to_string()])?;
                Ok(())
            })
            .unwrap();

        assert_eq!(fetched.len(), 2);
        assert_eq!(store.list_foods().unwrap().len(), 2);
        assert_eq!(store.list_tags().unwrap().len(), 1);
        let apple = fetched.iter().find(|f| f.name == "apple").unwrap();
        assert_eq!(apple.category, FoodCategory::Fruit);
    }

    #[test]
    fn test_friend_edges_are_directed() {
        let (_temp, store) = test_store();
        insert_citizen(&store, 0, "brown", None);
        insert_citizen(&store, 1, "brown", None);

        store.transaction(&mut |w| w.add_friends(0, &[1, 1])).unwrap();

        let friends: Vec<i64> = store.list_friends(0).unwrap().iter().map(|c| c.id).collect();
        assert_eq!(friends, vec![1]);
        assert!(store.list_friends(1).unwrap().is_empty());
    }

    #[test]
    fn test_existing_citizen_ids() {
        let (_temp, store) = test_store();
        insert_citizen(&store, 4, "brown", None);
        let mut existing = HashSet::new();

        store
            .transaction(&mut |w| {
                existing = w.existing_citizen_ids(&[3, 4, 5])?;
                Ok(())
            })
            .unwrap();

        assert_eq!(existing, HashSet::from([4]));
    }

    #[test]
    fn test_company_delete_clears_citizen_reference() {
        let (_temp, store) = test_store();
        store
            .transaction(&mut |w| {
                w.insert_companies(&[Company {
                    id: 1,
                    name: "ACME".to_string(),
                }])
            })
            .unwrap();
        insert_citizen(&store, 0, "brown", Some(1));

        store
            .connection()
            .execute("DELETE FROM companies WHERE id = 1", [])
            .unwrap();

        let citizen = store.get_citizen(0).unwrap().unwrap();
        assert_eq!(citizen.company_id, None);
    }

    #[test]
    fn test_referenced_eye_color_and_address_are_protected() {
        let (_temp, store) = test_store();
        insert_citizen(&store, 0, "brown", None);

        let conn = store.connection();
        assert!(conn.execute("DELETE FROM eye_colors", []).is_err());
        assert!(conn.execute("DELETE FROM addresses", []).is_err());
        conn.execute("DELETE FROM citizens WHERE id = 0", []).unwrap();
        conn.execute("DELETE FROM eye_colors", []).unwrap();
    }

    #[test]
    fn test_purge_removes_everything() {
        let (_temp, store) = test_store();
        store
            .transaction(&mut |w| {
                w.insert_companies(&[Company {
                    id: 1,
                    name: "ACME".to_string(),
                }])
            })
            .unwrap();
        insert_citizen(&store, 0, "brown", Some(1));
        insert_citizen(&store, 1, "blue", Some(1));
        store.transaction(&mut |w| w.add_friends(0, &[0, 1])).unwrap();

        let removed = store.purge().unwrap();
        assert_eq!(removed.citizens, 2);
        assert_eq!(removed.companies, 1);
        assert_eq!(removed.eye_colors, 2);
        assert_eq!(removed.addresses, 2);
        assert_eq!(removed.friendships, 2);

        assert_eq!(store.count_entities().unwrap(), EntityCounts::default());
    }
}
