use serde_json::{Value, json};
use tempfile::TempDir;

use crate::resources::RawRecord;
use crate::store::{SqliteStore, Store};

pub fn test_store() -> (TempDir, SqliteStore) {
    let temp = TempDir::new().unwrap();
    let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
    store.initialize().unwrap();
    (temp, store)
}

pub fn records(value: Value) -> Vec<RawRecord> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_object().unwrap().clone())
        .collect()
}

/// A well formed people record employed by company index 57.
pub fn citizen(index: i64) -> RawRecord {
    let value = json!({
        "_id": format!("595eeb9b96d80a5bc7afb1{index:02}"),
        "index": index,
        "guid": format!("5e71dc5d-61c0-4f3b-8b92-d77310c7fa{index:02}"),
        "has_died": true,
        "balance": "$2,418.59",
        "picture": "http://placehold.it/32x32",
        "age": 61,
        "eyeColor": "blue",
        "name": "Carmella Lambert",
        "gender": "female",
        "company_id": 58,
        "email": "carmellalambert@earthmark.com",
        "phone": "+1 (910) 567-3630",
        "address": "628 Sumner Place, Sperryville, American Samoa, 9819",
        "about": "Non duis dolore ad enim.\r\n",
        "registered": "2016-07-13T12:29:07 -01:00",
        "tags": ["test_tag", "test_tag_two"],
        "friends": [],
        "greeting": "Hello!",
        "favouriteFood": ["beetroot", "strawberry", "mushroom"]
    });
    value.as_object().unwrap().clone()
}

pub fn with(mut record: RawRecord, key: &str, value: Value) -> RawRecord {
    record.insert(key.to_string(), value);
    record
}

pub fn friends(indices: &[i64]) -> Value {
    Value::Array(indices.iter().map(|i| json!({"index": i})).collect())
}

/// Creates the company that `citizen` records refer to.
pub fn seed_company(store: &SqliteStore) {
    let records = records(json!([{"index": 57, "company": "SOME_COMPANY"}]));
    crate::import::import_companies(store, &records).unwrap();
}
