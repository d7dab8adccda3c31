//! SQL implementation of [`RecordStore`] over the shared sqlite connection.
//!
//! Queries are assembled from filter/order maps into parameterized
//! statements and executed through sea-orm's raw `Statement` interface.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, Statement, Value};

use super::error::DataError;
use super::store::{
    Clause, ColumnType, Condition, FieldMap, FieldValue, Filter, Record, RecordKind, RecordStore,
    SelectOptions, SortDir,
};

pub struct SqlStore {
    conn: &'static DatabaseConnection,
}

impl SqlStore {
    pub fn new(conn: &'static DatabaseConnection) -> Self {
        Self { conn }
    }

    fn statement(sql: String, values: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(DatabaseBackend::Sqlite, sql, values)
    }
}

fn bind(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(s) => Value::String(Some(Box::new(s.clone()))),
        FieldValue::Integer(i) => Value::BigInt(Some(*i)),
        FieldValue::Real(r) => Value::Double(Some(*r)),
        FieldValue::Bool(b) => Value::Bool(Some(*b)),
        FieldValue::Null => Value::String(None),
    }
}

/// WHERE clause (with leading keyword) plus its bind values
fn build_where(filter: &Filter) -> (String, Vec<Value>) {
    let mut parts: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    for clause in filter.clauses() {
        match clause {
            Clause::Field(field, condition) => match condition {
                Condition::Eq(FieldValue::Null) => parts.push(format!("{field} IS NULL")),
                Condition::Eq(v) => {
                    parts.push(format!("{field} = ?"));
                    values.push(bind(v));
                }
                Condition::Ne(FieldValue::Null) => parts.push(format!("{field} IS NOT NULL")),
                Condition::Ne(v) => {
                    parts.push(format!("{field} <> ?"));
                    values.push(bind(v));
                }
                Condition::Between(low, high) => {
                    parts.push(format!("{field} BETWEEN ? AND ?"));
                    values.push(bind(low));
                    values.push(bind(high));
                }
                Condition::In(list) => {
                    if list.is_empty() {
                        // IN () is a syntax error; match nothing instead
                        parts.push("1 = 0".to_string());
                    } else {
                        let placeholders = vec!["?"; list.len()].join(", ");
                        parts.push(format!("{field} IN ({placeholders})"));
                        values.extend(list.iter().map(bind));
                    }
                }
                Condition::Like(pattern) => {
                    parts.push(format!("{field} LIKE ?"));
                    values.push(bind(&FieldValue::Text(pattern.clone())));
                }
            },
            Clause::AnyLike(fields, pattern) => {
                let ors: Vec<String> = fields.iter().map(|f| format!("{f} LIKE ?")).collect();
                parts.push(format!("({})", ors.join(" OR ")));
                values.extend(fields.iter().map(|_| bind(&FieldValue::Text(pattern.clone()))));
            }
        }
    }

    if parts.is_empty() {
        (String::new(), values)
    } else {
        (format!(" WHERE {}", parts.join(" AND ")), values)
    }
}

fn build_tail(options: &SelectOptions) -> String {
    let mut tail = String::new();
    if !options.order.is_empty() {
        let fields: Vec<String> = options
            .order
            .iter()
            .map(|(field, dir)| {
                let dir = match dir {
                    SortDir::Asc => "ASC",
                    SortDir::Desc => "DESC",
                };
                format!("{field} {dir}")
            })
            .collect();
        tail.push_str(&format!(" ORDER BY {}", fields.join(", ")));
    }
    if let Some(limit) = options.limit {
        tail.push_str(&format!(" LIMIT {limit}"));
    }
    if let Some(offset) = options.offset {
        if options.limit.is_none() {
            // sqlite requires LIMIT before OFFSET
            tail.push_str(" LIMIT -1");
        }
        tail.push_str(&format!(" OFFSET {offset}"));
    }
    tail
}

fn map_db_err(e: DbErr) -> DataError {
    let text = e.to_string();
    if text.contains("UNIQUE constraint") || text.contains("FOREIGN KEY constraint") {
        DataError::Constraint(text)
    } else {
        DataError::Store(anyhow::Error::new(e))
    }
}

fn decode_row(kind: RecordKind, row: &sea_orm::QueryResult) -> Result<Record, DataError> {
    let mut fields = FieldMap::new();
    for (name, ty) in kind.columns() {
        let value = match ty {
            ColumnType::Text => row
                .try_get::<Option<String>>("", name)
                .map_err(map_db_err)?
                .map(FieldValue::Text),
            ColumnType::Integer => row
                .try_get::<Option<i64>>("", name)
                .map_err(map_db_err)?
                .map(FieldValue::Integer),
            ColumnType::Real => row
                .try_get::<Option<f64>>("", name)
                .map_err(map_db_err)?
                .map(FieldValue::Real),
            ColumnType::Bool => row
                .try_get::<Option<i64>>("", name)
                .map_err(map_db_err)?
                .map(|v| FieldValue::Bool(v != 0)),
        };
        fields.insert(name.to_string(), value.unwrap_or(FieldValue::Null));
    }
    Ok(Record::new(fields))
}

fn column_names(kind: RecordKind) -> String {
    kind.columns()
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl RecordStore for SqlStore {
    async fn find_one(&self, kind: RecordKind, filter: Filter) -> Result<Option<Record>, DataError> {
        let rows = self
            .find_many(kind, filter, SelectOptions::new().limit(1))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn find_many(
        &self,
        kind: RecordKind,
        filter: Filter,
        options: SelectOptions,
    ) -> Result<Vec<Record>, DataError> {
        let (where_sql, values) = build_where(&filter);
        let sql = format!(
            "SELECT {} FROM {}{}{}",
            column_names(kind),
            kind.table(),
            where_sql,
            build_tail(&options)
        );
        let rows = self
            .conn
            .query_all(Self::statement(sql, values))
            .await
            .map_err(map_db_err)?;
        rows.iter().map(|row| decode_row(kind, row)).collect()
    }

    async fn count(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError> {
        let (where_sql, values) = build_where(&filter);
        let sql = format!("SELECT COUNT(*) AS cnt FROM {}{}", kind.table(), where_sql);
        let row = self
            .conn
            .query_one(Self::statement(sql, values))
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| DataError::Store(anyhow::anyhow!("count returned no row")))?;
        let count: i64 = row.try_get("", "cnt").map_err(map_db_err)?;
        Ok(count as u64)
    }

    async fn insert(&self, kind: RecordKind, rows: Vec<FieldMap>) -> Result<u64, DataError> {
        let mut inserted = 0;
        for row in rows {
            let columns: Vec<&str> = row.keys().map(String::as_str).collect();
            let placeholders = vec!["?"; columns.len()].join(", ");
            let sql = format!(
                "INSERT INTO {} ({}) VALUES ({})",
                kind.table(),
                columns.join(", "),
                placeholders
            );
            let values: Vec<Value> = row.values().map(bind).collect();
            let result = self
                .conn
                .execute(Self::statement(sql, values))
                .await
                .map_err(map_db_err)?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    async fn update_one(
        &self,
        kind: RecordKind,
        filter: Filter,
        payload: FieldMap,
    ) -> Result<u64, DataError> {
        // Constrained to one row via an id subquery; sqlite has no UPDATE LIMIT
        let (where_sql, where_values) = build_where(&filter);
        let assignments: Vec<String> = payload.keys().map(|k| format!("{k} = ?")).collect();
        let sql = format!(
            "UPDATE {table} SET {set} WHERE id IN (SELECT id FROM {table}{where_sql} LIMIT 1)",
            table = kind.table(),
            set = assignments.join(", "),
        );
        let mut values: Vec<Value> = payload.values().map(bind).collect();
        values.extend(where_values);
        let result = self
            .conn
            .execute(Self::statement(sql, values))
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected())
    }

    async fn update_many(
        &self,
        kind: RecordKind,
        filter: Filter,
        payload: FieldMap,
    ) -> Result<u64, DataError> {
        let (where_sql, where_values) = build_where(&filter);
        let assignments: Vec<String> = payload.keys().map(|k| format!("{k} = ?")).collect();
        let sql = format!(
            "UPDATE {} SET {}{}",
            kind.table(),
            assignments.join(", "),
            where_sql
        );
        let mut values: Vec<Value> = payload.values().map(bind).collect();
        values.extend(where_values);
        let result = self
            .conn
            .execute(Self::statement(sql, values))
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected())
    }

    async fn delete_one(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError> {
        let (where_sql, values) = build_where(&filter);
        let sql = format!(
            "DELETE FROM {table} WHERE id IN (SELECT id FROM {table}{where_sql} LIMIT 1)",
            table = kind.table(),
        );
        let result = self
            .conn
            .execute(Self::statement(sql, values))
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected())
    }

    async fn delete_many(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError> {
        let (where_sql, values) = build_where(&filter);
        let sql = format!("DELETE FROM {}{}", kind.table(), where_sql);
        let result = self
            .conn
            .execute(Self::statement(sql, values))
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected())
    }
}
