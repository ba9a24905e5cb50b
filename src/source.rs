//! Data sources that deliver raw employee records.
//!
//! The grid treats fetching as a black box: a source either returns the raw
//! record array or fails with [`GridError::Fetch`]. Nothing here retries.

use crate::error::{GridError, Result};
use crate::types::RawRecord;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the bundled data asset.
pub const DEFAULT_DATA_PATH: &str = "assets/data/company.json";

/// Something that can produce the raw record array.
pub trait RecordSource {
    /// Fetch every raw record, in source order.
    fn fetch(&self) -> Result<Vec<RawRecord>>;
}

/// Reads the record array from a JSON file on disk.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileSource {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}

impl RecordSource for JsonFileSource {
    fn fetch(&self) -> Result<Vec<RawRecord>> {
        let bytes = fs::read(&self.path).map_err(|e| {
            GridError::Fetch(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        parse_records(&bytes)
    }
}

/// An in-memory source, mostly for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    records: Vec<RawRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    /// Build a source from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(parse_records(json.as_bytes())?))
    }
}

impl RecordSource for StaticSource {
    fn fetch(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }
}

/// Decode a JSON array of record-shaped objects.
///
/// Anything that is not JSON, or not an array, is a fetch failure. Elements
/// are decoded leniently: non-string or absent fields become `None` and are
/// rejected later by the store with their position.
pub fn parse_records(bytes: &[u8]) -> Result<Vec<RawRecord>> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| GridError::Fetch(format!("payload is not JSON: {}", e)))?;

    let Value::Array(items) = value else {
        return Err(GridError::Fetch("payload is not a JSON array".to_string()));
    };

    Ok(items.iter().map(raw_from_value).collect())
}

fn raw_from_value(value: &Value) -> RawRecord {
    let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
    RawRecord {
        name: text("name"),
        gender: text("gender"),
        company: text("company"),
    }
}
