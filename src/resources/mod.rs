mod loader;

pub use loader::{JsonDirLoader, RawRecord, Resource, ResourceLoader};
