use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};

/// One source record, untouched.
pub type RawRecord = serde_json::Map<String, Value>;

/// The named datasets the import understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Companies,
    People,
}

impl Resource {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Companies => "companies",
            Resource::People => "people",
        }
    }

    #[must_use]
    pub fn file_name(&self) -> &'static str {
        match self {
            Resource::Companies => "companies.json",
            Resource::People => "people.json",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reads raw records. No validation of record shape happens here.
pub trait ResourceLoader: Send + Sync {
    fn load(&self, resource: Resource) -> Result<Vec<RawRecord>>;
}

/// Loads `<dir>/companies.json` and `<dir>/people.json`.
#[derive(Debug, Clone)]
pub struct JsonDirLoader {
    dir: PathBuf,
}

impl JsonDirLoader {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path_of(&self, resource: Resource) -> PathBuf {
        self.dir.join(resource.file_name())
    }
}

fn unavailable(resource: Resource, reason: impl fmt::Display) -> Error {
    Error::ResourceUnavailable {
        resource: resource.name().to_string(),
        reason: reason.to_string(),
    }
}

impl ResourceLoader for JsonDirLoader {
    fn load(&self, resource: Resource) -> Result<Vec<RawRecord>> {
        let path = self.path_of(resource);
        let contents = fs::read_to_string(&path)
            .map_err(|e| unavailable(resource, format!("{}: {e}", path.display())))?;

        let value: Value = serde_json::from_str(&contents)
            .map_err(|e| unavailable(resource, format!("{}: {e}", path.display())))?;

        let Value::Array(entries) = value else {
            return Err(unavailable(resource, "top level value is not an array"));
        };

        let records = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| match entry {
                Value::Object(record) => Ok(record),
                _ => Err(unavailable(resource, format!("entry {i} is not an object"))),
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Loaded {} {} records from {}", records.len(), resource, path.display());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_records() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("companies.json"),
            r#"[{"index": 0, "company": "PERMADYNE"}, {"index": 1}]"#,
        )
        .unwrap();

        let records = JsonDirLoader::new(temp.path()).load(Resource::Companies).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["company"], "PERMADYNE");
        assert!(!records[1].contains_key("company"));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let temp = TempDir::new().unwrap();

        let err = JsonDirLoader::new(temp.path()).load(Resource::People).unwrap_err();

        assert!(matches!(
            err,
            Error::ResourceUnavailable { ref resource, .. } if resource == "people"
        ));
    }

    #[test]
    fn test_unparsable_file_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let loader = JsonDirLoader::new(temp.path());

        fs::write(loader.path_of(Resource::People), "[{\"index\": 0,").unwrap();
        assert!(matches!(
            loader.load(Resource::People),
            Err(Error::ResourceUnavailable { .. })
        ));

        fs::write(loader.path_of(Resource::People), r#"{"index": 0}"#).unwrap();
        assert!(loader.load(Resource::People).is_err());

        fs::write(loader.path_of(Resource::People), "[1, 2]").unwrap();
        assert!(loader.load(Resource::People).is_err());
    }
}
