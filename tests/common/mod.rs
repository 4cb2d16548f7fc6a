#![allow(dead_code)]

pub mod test_server;

use serde_json::{Value, json};

/// A well formed people record. `company_id` is one-based like the source data.
pub fn person(index: i64, name: &str, eye_color: &str, has_died: bool, friends: &[i64]) -> Value {
    json!({
        "_id": format!("595eeb9b96d80a5bc7afb1{index:02}"),
        "index": index,
        "guid": format!("5e71dc5d-61c0-4f3b-8b92-d77310c7fa{index:02}"),
        "has_died": has_died,
        "balance": "$1,234.56",
        "picture": "http://placehold.it/32x32",
        "age": 50 + index,
        "eyeColor": eye_color,
        "name": name,
        "gender": "male",
        "company_id": 1,
        "email": format!("citizen{index}@example.com"),
        "phone": format!("+1 (111) 111-11{index:02}"),
        "address": format!("{index} Main Street, Town {index}, State, {index}{index}{index}"),
        "about": "About.",
        "registered": "2015-01-05T01:02:03 -10:00",
        "tags": ["id", "ex"],
        "friends": friends.iter().map(|i| json!({"index": i})).collect::<Vec<_>>(),
        "greeting": "Hello!",
        "favouriteFood": ["carrot", "apple", "mushroom"]
    })
}

pub fn companies() -> Value {
    json!([
        {"index": 0, "company": "PERMADYNE"},
        {"index": 1, "company": "LINGOAGE"}
    ])
}

/// Citizens 1 and 2 both list 3 (alive, brown), 4 (alive, blue) and
/// 5 (dead, brown). Everybody works for company 0.
pub fn people() -> Value {
    json!([
        person(1, "Test Citizen 1", "green", false, &[3, 4, 5]),
        person(2, "Test Citizen 2", "green", false, &[3, 4, 5]),
        person(3, "Test Citizen 3", "brown", false, &[]),
        person(4, "Test Citizen 4", "blue", false, &[]),
        person(5, "Test Citizen 5", "brown", true, &[1]),
    ])
}
