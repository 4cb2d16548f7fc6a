//! # Paranuara
//!
//! Imports the companies and people datasets into SQLite and answers
//! read-only questions about citizens: a single citizen's profile, the live
//! brown-eyed friends two citizens have in common, and a company's employees.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use paranuara::import::import_resources;
//! use paranuara::resources::JsonDirLoader;
//! use paranuara::server::{AppState, create_router};
//! use paranuara::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/paranuara.db").unwrap();
//! store.initialize().unwrap();
//! import_resources(&store, &JsonDirLoader::new("./resources")).unwrap();
//!
//! let router = create_router(Arc::new(AppState::new(Arc::new(store))));
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `paranuara` binary. Disable with `default-features = false`.

pub mod config;
pub mod error;
pub mod import;
pub mod query;
pub mod resources;
pub mod server;
pub mod store;
pub mod types;
