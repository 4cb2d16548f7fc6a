use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EyeColor {
    pub id: i64,
    pub color_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub street_address: String,
    pub city_name: String,
    pub state_name: String,
    pub post_code: String,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.street_address, self.city_name, self.state_name, self.post_code
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Fruit,
    Vegetable,
    Other,
}

impl FoodCategory {
    pub const KNOWN_FRUITS: &'static [&'static str] = &["orange", "apple", "banana", "strawberry"];
    pub const KNOWN_VEGETABLES: &'static [&'static str] =
        &["beetroot", "celery", "carrot", "cucumber"];

    /// Categorizes a food by exact, case-sensitive name match.
    #[must_use]
    pub fn of(name: &str) -> Self {
        if Self::KNOWN_FRUITS.contains(&name) {
            FoodCategory::Fruit
        } else if Self::KNOWN_VEGETABLES.contains(&name) {
            FoodCategory::Vegetable
        } else {
            FoodCategory::Other
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Fruit => "fruit",
            FoodCategory::Vegetable => "vegetable",
            FoodCategory::Other => "other",
        }
    }
}

impl FromStr for FoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fruit" => Ok(FoodCategory::Fruit),
            "vegetable" => Ok(FoodCategory::Vegetable),
            "other" => Ok(FoodCategory::Other),
            other => Err(format!("unknown food category '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub category: FoodCategory,
}

/// ISO/IEC 5218 sex codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Unknown,
    Male,
    Female,
    NotApplicable,
}

impl Gender {
    /// Maps the free-text source value. Anything unrecognized is `Unknown`.
    #[must_use]
    pub fn from_source(value: &str) -> Self {
        match value {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unknown,
        }
    }

    #[must_use]
    pub fn code(&self) -> u8 {
        match self {
            Gender::Unknown => 0,
            Gender::Male => 1,
            Gender::Female => 2,
            Gender::NotApplicable => 9,
        }
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Gender::Unknown),
            1 => Some(Gender::Male),
            2 => Some(Gender::Female),
            9 => Some(Gender::NotApplicable),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citizen {
    /// Sequence id, taken verbatim from the source `index`.
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
    pub eye_color: EyeColor,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
}

impl Citizen {
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.has_died
    }
}

/// An address row to be inserted. Addresses are never shared between citizens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub street_address: String,
    pub city_name: String,
    pub state_name: String,
    pub post_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFood {
    pub name: String,
    pub category: FoodCategory,
}

/// A citizen row whose reference rows have already been resolved to ids.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCitizen {
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
    pub eye_color_id: i64,
    pub address_id: i64,
    pub company_id: Option<i64>,
}

/// Row counts per entity type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounts {
    pub citizens: i64,
    pub companies: i64,
    pub eye_colors: i64,
    pub addresses: i64,
    pub tags: i64,
    pub foods: i64,
    pub friendships: i64,
}
