//! Core types for the employee grid.

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable identifier for a record, assigned once at load time.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A canonical employee entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identity (assigned by the store, never reused).
    pub id: RecordId,
    pub name: String,
    pub gender: String,
    pub company: String,
}

impl Record {
    /// Read a field value.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Gender => &self.gender,
            Field::Company => &self.company,
        }
    }

    /// Overwrite a field value.
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Gender => self.gender = value,
            Field::Company => self.company = value,
        }
    }

    /// Copy every editable field from `other`, keeping this record's id.
    pub fn assign_fields(&mut self, other: &Record) {
        for field in Field::ALL {
            self.set(field, other.get(field).to_string());
        }
    }
}

/// A record as delivered by the data source, before an id is assigned.
///
/// Fields are optional here so that shape problems are reported by the store
/// with the offending position instead of by the JSON decoder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl RawRecord {
    /// Create a fully populated raw record.
    pub fn new(
        name: impl Into<String>,
        gender: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            gender: Some(gender.into()),
            company: Some(company.into()),
        }
    }

    pub(crate) fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Gender => self.gender.as_deref(),
            Field::Company => self.company.as_deref(),
        }
    }
}

/// Editable fields of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Gender,
    Company,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Gender, Field::Company];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Gender => "gender",
            Field::Company => "company",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Field::Name),
            "gender" => Ok(Field::Gender),
            "company" => Ok(Field::Company),
            other => Err(GridError::UnknownField(other.to_string())),
        }
    }
}

/// Column to sort the grid by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    Name,
    Gender,
    Company,
}

impl SortKey {
    /// The text column this key compares, `None` for the numeric id.
    pub fn field(self) -> Option<Field> {
        match self {
            SortKey::Id => None,
            SortKey::Name => Some(Field::Name),
            SortKey::Gender => Some(Field::Gender),
            SortKey::Company => Some(Field::Company),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field() {
            Some(field) => f.write_str(field.as_str()),
            None => f.write_str("id"),
        }
    }
}

impl FromStr for SortKey {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // Column header used by the grid markup.
            "id" | "index" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "gender" => Ok(SortKey::Gender),
            "company" => Ok(SortKey::Company),
            other => Err(GridError::UnknownSortKey(other.to_string())),
        }
    }
}

/// An editable copy of a record inside an edit session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingRow {
    /// Working values (id is the origin record's id).
    pub record: Record,

    /// Touched since the session began.
    pub dirty: bool,

    /// View state: whether the row's additional details are shown.
    /// Never part of a commit.
    pub details_expanded: bool,
}

impl WorkingRow {
    /// Start a clean row from a canonical record.
    pub fn from_record(record: &Record) -> Self {
        Self {
            record: record.clone(),
            dirty: false,
            details_expanded: false,
        }
    }

    pub fn id(&self) -> RecordId {
        self.record.id
    }
}

/// Edit session state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Clean,
    Dirty,
}

/// When a field write marks its row dirty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DirtyPolicy {
    /// Any write marks the row dirty, even if the value is unchanged.
    #[default]
    Touch,

    /// Only a write that differs from the session-start value marks the row.
    Change,
}
