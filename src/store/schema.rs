pub const SCHEMA: &str = r#"
-- Companies keep the id supplied by the source "index"
CREATE TABLE IF NOT EXISTS companies (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

-- Reference rows are created lazily during import, one row per name.
-- Plain rowid keys (no AUTOINCREMENT) so a purge resets them.
CREATE TABLE IF NOT EXISTS eye_colors (
    id INTEGER PRIMARY KEY,
    color_name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS foods (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    category TEXT NOT NULL CHECK (category IN ('fruit', 'vegetable', 'other'))
);

-- One address per citizen, never shared
CREATE TABLE IF NOT EXISTS addresses (
    id INTEGER PRIMARY KEY,
    street_address TEXT NOT NULL,
    city_name TEXT NOT NULL,
    state_name TEXT NOT NULL,
    post_code TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS citizens (
    id INTEGER PRIMARY KEY,            -- source "index", caller supplied
    external_id TEXT NOT NULL UNIQUE,  -- source "_id"
    guid TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    age INTEGER NOT NULL CHECK (age >= 0),
    has_died INTEGER NOT NULL DEFAULT 0,
    phone_number TEXT NOT NULL,
    email TEXT NOT NULL,
    balance_in_cents INTEGER NOT NULL DEFAULT 0,
    picture_url TEXT NOT NULL,
    about TEXT NOT NULL,
    greeting TEXT NOT NULL,
    registered_at TEXT NOT NULL,
    gender_code INTEGER NOT NULL CHECK (gender_code IN (0, 1, 2, 9)),

    eye_color_id INTEGER NOT NULL REFERENCES eye_colors(id) ON DELETE RESTRICT,
    address_id INTEGER NOT NULL REFERENCES addresses(id) ON DELETE RESTRICT,
    -- NULL = unemployed
    company_id INTEGER REFERENCES companies(id) ON DELETE SET NULL
);

-- Directed: (citizen_id, friend_id) means citizen_id lists friend_id
CREATE TABLE IF NOT EXISTS citizen_friends (
    citizen_id INTEGER NOT NULL REFERENCES citizens(id) ON DELETE CASCADE,
    friend_id INTEGER NOT NULL REFERENCES citizens(id) ON DELETE CASCADE,
    PRIMARY KEY (citizen_id, friend_id)
);

CREATE TABLE IF NOT EXISTS citizen_tags (
    citizen_id INTEGER NOT NULL REFERENCES citizens(id) ON DELETE CASCADE,
    tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
    PRIMARY KEY (citizen_id, tag_id)
);

CREATE TABLE IF NOT EXISTS citizen_foods (
    citizen_id INTEGER NOT NULL REFERENCES citizens(id) ON DELETE CASCADE,
    food_id INTEGER NOT NULL REFERENCES foods(id) ON DELETE CASCADE,
    PRIMARY KEY (citizen_id, food_id)
);

CREATE INDEX IF NOT EXISTS idx_citizens_company ON citizens(company_id);
CREATE INDEX IF NOT EXISTS idx_citizens_eye_color ON citizens(eye_color_id);
CREATE INDEX IF NOT EXISTS idx_citizen_friends_friend ON citizen_friends(friend_id);
CREATE INDEX IF NOT EXISTS idx_citizen_tags_tag ON citizen_tags(tag_id);
CREATE INDEX IF NOT EXISTS idx_citizen_foods_food ON citizen_foods(food_id);
"#;
