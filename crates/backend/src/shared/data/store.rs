//! Generic record store interface.
//!
//! Every persisted entity is addressed by a [`RecordKind`] and travels as a
//! flat field map, so cross-cutting layers (the soft-delete decorator, the
//! reconciler) can operate on any kind without per-entity code.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use contracts::domain::common::EntityMetadata;
use uuid::Uuid;

use super::error::DataError;

/// Column holding the soft-delete marker on every table
pub const DELETED_FLAG: &str = "is_deleted";
/// Column holding the deletion timestamp
pub const DELETED_AT: &str = "deleted_at";

// ============================================================================
// Entity kinds and schema
// ============================================================================

/// Declared type of a column, drives row decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Real,
    Bool,
}

/// Every entity kind the store can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Holiday,
    Sport,
    SportType,
    Place,
    Benefit,
    Image,
    Itinerary,
}

/// Lifecycle columns present on every table
const BASE_COLUMNS: [(&str, ColumnType); 4] = [
    ("created_at", ColumnType::Text),
    ("updated_at", ColumnType::Text),
    (DELETED_FLAG, ColumnType::Bool),
    (DELETED_AT, ColumnType::Text),
];

impl RecordKind {
    pub fn table(&self) -> &'static str {
        match self {
            RecordKind::Holiday => "a001_holiday",
            RecordKind::Sport => "a002_sport",
            RecordKind::SportType => "a003_sport_type",
            RecordKind::Place => "c001_place",
            RecordKind::Benefit => "c002_benefit",
            RecordKind::Image => "c003_image",
            RecordKind::Itinerary => "c004_itinerary",
        }
    }

    /// Domain columns of the kind, lifecycle columns excluded
    fn domain_columns(&self) -> &'static [(&'static str, ColumnType)] {
        match self {
            RecordKind::Holiday => &[
                ("id", ColumnType::Text),
                ("title", ColumnType::Text),
                ("price", ColumnType::Integer),
                ("description", ColumnType::Text),
                ("duration", ColumnType::Text),
            ],
            RecordKind::Sport => &[
                ("id", ColumnType::Text),
                ("title", ColumnType::Text),
                ("price", ColumnType::Integer),
                ("description", ColumnType::Text),
                ("duration", ColumnType::Text),
                ("city", ColumnType::Text),
                ("location", ColumnType::Text),
                ("status", ColumnType::Bool),
                ("sport_type_id", ColumnType::Text),
            ],
            RecordKind::SportType => &[
                ("id", ColumnType::Text),
                ("name", ColumnType::Text),
            ],
            RecordKind::Place => &[
                ("id", ColumnType::Text),
                ("holiday_id", ColumnType::Text),
                ("name", ColumnType::Text),
            ],
            RecordKind::Benefit => &[
                ("id", ColumnType::Text),
                ("holiday_id", ColumnType::Text),
                ("name", ColumnType::Text),
            ],
            RecordKind::Image => &[
                ("id", ColumnType::Text),
                ("holiday_id", ColumnType::Text),
                ("sport_id", ColumnType::Text),
                ("filename", ColumnType::Text),
            ],
            RecordKind::Itinerary => &[
                ("id", ColumnType::Text),
                ("holiday_id", ColumnType::Text),
                ("sport_id", ColumnType::Text),
                ("day", ColumnType::Integer),
                ("description", ColumnType::Text),
            ],
        }
    }

    /// Full column list: domain columns then lifecycle columns
    pub fn columns(&self) -> Vec<(&'static str, ColumnType)> {
        let mut cols = self.domain_columns().to_vec();
        cols.extend_from_slice(&BASE_COLUMNS);
        cols
    }
}

// ============================================================================
// Values and rows
// ============================================================================

/// Scalar value of one field. Timestamps travel as RFC 3339 text so that
/// lexicographic and chronological order coincide.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
    Null,
}

impl FieldValue {
    pub fn uuid(value: Uuid) -> Self {
        FieldValue::Text(value.to_string())
    }

    pub fn timestamp(value: DateTime<Utc>) -> Self {
        FieldValue::Text(value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Numeric view used for comparisons across Integer/Real
    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Real(r) => Some(*r),
            FieldValue::Bool(b) => Some(*b as i64 as f64),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Real(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// Ordered field name → value map; one row on the wire
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Lifecycle fields every freshly inserted row starts with
pub fn base_row(id: Uuid) -> FieldMap {
    let now = Utc::now();
    let mut row = FieldMap::new();
    row.insert("id".into(), FieldValue::uuid(id));
    row.insert("created_at".into(), FieldValue::timestamp(now));
    row.insert("updated_at".into(), FieldValue::timestamp(now));
    row.insert(DELETED_FLAG.into(), FieldValue::Bool(false));
    row.insert(DELETED_AT.into(), FieldValue::Null);
    row
}

/// One stored row as returned by a read operation
#[derive(Debug, Clone)]
pub struct Record {
    fields: FieldMap,
}

impl Record {
    pub fn new(fields: FieldMap) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> &FieldValue {
        self.fields.get(field).unwrap_or(&FieldValue::Null)
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn text(&self, field: &str) -> Result<&str, DataError> {
        match self.get(field) {
            FieldValue::Text(s) => Ok(s),
            other => Err(decode_error(field, "text", other)),
        }
    }

    pub fn integer(&self, field: &str) -> Result<i64, DataError> {
        match self.get(field) {
            FieldValue::Integer(i) => Ok(*i),
            other => Err(decode_error(field, "integer", other)),
        }
    }

    pub fn flag(&self, field: &str) -> Result<bool, DataError> {
        match self.get(field) {
            FieldValue::Bool(b) => Ok(*b),
            FieldValue::Integer(i) => Ok(*i != 0),
            other => Err(decode_error(field, "bool", other)),
        }
    }

    pub fn uuid(&self, field: &str) -> Result<Uuid, DataError> {
        let raw = self.text(field)?;
        Uuid::parse_str(raw)
            .map_err(|e| DataError::Store(anyhow::anyhow!("field `{}` is not a uuid: {}", field, e)))
    }

    pub fn timestamp(&self, field: &str) -> Result<DateTime<Utc>, DataError> {
        let raw = self.text(field)?;
        DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| {
                DataError::Store(anyhow::anyhow!("field `{}` is not a timestamp: {}", field, e))
            })
    }

    pub fn opt_timestamp(&self, field: &str) -> Result<Option<DateTime<Utc>>, DataError> {
        if self.get(field).is_null() {
            return Ok(None);
        }
        self.timestamp(field).map(Some)
    }

    /// Decode the lifecycle columns into contract metadata
    pub fn metadata(&self) -> Result<EntityMetadata, DataError> {
        Ok(EntityMetadata {
            created_at: self.timestamp("created_at")?,
            updated_at: self.timestamp("updated_at")?,
            is_deleted: self.flag(DELETED_FLAG)?,
            deleted_at: self.opt_timestamp(DELETED_AT)?,
        })
    }
}

fn decode_error(field: &str, expected: &str, got: &FieldValue) -> DataError {
    DataError::Store(anyhow::anyhow!(
        "field `{}`: expected {}, got {:?}",
        field,
        expected,
        got
    ))
}

// ============================================================================
// Filters and select options
// ============================================================================

/// Predicate on one field
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(FieldValue),
    Ne(FieldValue),
    /// Inclusive on both bounds
    Between(FieldValue, FieldValue),
    In(Vec<FieldValue>),
    /// SQL LIKE pattern, caller supplies the wildcards
    Like(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Field(String, Condition),
    /// Disjunction: any of the fields matches the LIKE pattern
    AnyLike(Vec<String>, String),
}

/// Conjunction of clauses; empty means "match everything"
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.clauses
            .push(Clause::Field(field.into(), Condition::Eq(value.into())));
        self
    }

    pub fn ne(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.clauses
            .push(Clause::Field(field.into(), Condition::Ne(value.into())));
        self
    }

    pub fn between(
        mut self,
        field: &str,
        low: impl Into<FieldValue>,
        high: impl Into<FieldValue>,
    ) -> Self {
        self.clauses.push(Clause::Field(
            field.into(),
            Condition::Between(low.into(), high.into()),
        ));
        self
    }

    pub fn is_in(mut self, field: &str, values: Vec<FieldValue>) -> Self {
        self.clauses
            .push(Clause::Field(field.into(), Condition::In(values)));
        self
    }

    pub fn like(mut self, field: &str, pattern: &str) -> Self {
        self.clauses.push(Clause::Field(
            field.into(),
            Condition::Like(pattern.into()),
        ));
        self
    }

    pub fn any_like(mut self, fields: &[&str], pattern: &str) -> Self {
        self.clauses.push(Clause::AnyLike(
            fields.iter().map(|f| f.to_string()).collect(),
            pattern.into(),
        ));
        self
    }

    /// Whether the caller constrained this field at all
    pub fn has(&self, field: &str) -> bool {
        self.clauses
            .iter()
            .any(|c| matches!(c, Clause::Field(f, _) if f == field))
    }

    /// Replace any existing clause on the field with the given condition
    pub fn set(&mut self, field: &str, condition: Condition) {
        self.clauses
            .retain(|c| !matches!(c, Clause::Field(f, _) if f == field));
        self.clauses
            .push(Clause::Field(field.to_string(), condition));
    }

    /// Add the condition only if the caller was silent on the field
    pub fn set_if_absent(&mut self, field: &str, condition: Condition) {
        if !self.has(field) {
            self.clauses
                .push(Clause::Field(field.to_string(), condition));
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// Ordering, limit and offset of a read-many
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    pub order: Vec<(String, SortDir)>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SelectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, field: &str, dir: SortDir) -> Self {
        self.order.push((field.into(), dir));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

// ============================================================================
// Store interface
// ============================================================================

/// Generic persistence operations, object-safe so the soft-delete decorator
/// can wrap any backing implementation
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// First row matching the filter
    async fn find_one(&self, kind: RecordKind, filter: Filter) -> Result<Option<Record>, DataError>;

    async fn find_many(
        &self,
        kind: RecordKind,
        filter: Filter,
        options: SelectOptions,
    ) -> Result<Vec<Record>, DataError>;

    async fn count(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError>;

    /// Insert a batch of rows; returns the number inserted
    async fn insert(&self, kind: RecordKind, rows: Vec<FieldMap>) -> Result<u64, DataError>;

    /// Apply the payload to the first matching row; returns rows affected
    async fn update_one(
        &self,
        kind: RecordKind,
        filter: Filter,
        payload: FieldMap,
    ) -> Result<u64, DataError>;

    /// Apply the payload to every matching row; returns rows affected
    async fn update_many(
        &self,
        kind: RecordKind,
        filter: Filter,
        payload: FieldMap,
    ) -> Result<u64, DataError>;

    /// Remove the first matching row; returns rows affected
    async fn delete_one(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError>;

    /// Remove every matching row; returns rows affected
    async fn delete_many(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError>;
}
