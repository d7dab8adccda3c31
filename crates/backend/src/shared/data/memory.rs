//! In-memory [`RecordStore`] used by unit tests.
//!
//! Evaluates the same filter/ordering semantics as the SQL store so the
//! decorator and the reconciler can be exercised without a database file.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::error::DataError;
use super::store::{
    Clause, Condition, FieldMap, FieldValue, Filter, Record, RecordKind, RecordStore,
    SelectOptions, SortDir,
};

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<RecordKind, Vec<FieldMap>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

const NULL: FieldValue = FieldValue::Null;

fn value_of<'a>(row: &'a FieldMap, field: &str) -> &'a FieldValue {
    row.get(field).unwrap_or(&NULL)
}

fn values_eq(a: &FieldValue, b: &FieldValue) -> bool {
    if a == b {
        return true;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn values_cmp(a: &FieldValue, b: &FieldValue) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x.partial_cmp(&y);
    }
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// SQL LIKE with `%` and `_` wildcards, ASCII case-insensitive
fn like_match(text: &str, pattern: &str) -> bool {
    fn rec(t: &[char], p: &[char]) -> bool {
        match p.first() {
            None => t.is_empty(),
            Some('%') => rec(t, &p[1..]) || (!t.is_empty() && rec(&t[1..], p)),
            Some('_') => !t.is_empty() && rec(&t[1..], &p[1..]),
            Some(c) => t.first() == Some(c) && rec(&t[1..], &p[1..]),
        }
    }
    let t: Vec<char> = text.to_lowercase().chars().collect();
    let p: Vec<char> = pattern.to_lowercase().chars().collect();
    rec(&t, &p)
}

fn condition_matches(value: &FieldValue, condition: &Condition) -> bool {
    match condition {
        Condition::Eq(v) => values_eq(value, v),
        Condition::Ne(v) => !value.is_null() && !values_eq(value, v),
        Condition::Between(low, high) => {
            matches!(values_cmp(value, low), Some(Ordering::Greater | Ordering::Equal))
                && matches!(values_cmp(value, high), Some(Ordering::Less | Ordering::Equal))
        }
        Condition::In(list) => list.iter().any(|v| values_eq(value, v)),
        Condition::Like(pattern) => match value {
            FieldValue::Text(s) => like_match(s, pattern),
            _ => false,
        },
    }
}

fn row_matches(row: &FieldMap, filter: &Filter) -> bool {
    filter.clauses().iter().all(|clause| match clause {
        Clause::Field(field, condition) => condition_matches(value_of(row, field), condition),
        Clause::AnyLike(fields, pattern) => fields.iter().any(|field| {
            condition_matches(value_of(row, field), &Condition::Like(pattern.clone()))
        }),
    })
}

fn sort_rows(rows: &mut [FieldMap], order: &[(String, SortDir)]) {
    rows.sort_by(|a, b| {
        for (field, dir) in order {
            let ord = values_cmp(value_of(a, field), value_of(b, field))
                .unwrap_or(Ordering::Equal);
            let ord = match dir {
                SortDir::Asc => ord,
                SortDir::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_one(&self, kind: RecordKind, filter: Filter) -> Result<Option<Record>, DataError> {
        let tables = self.tables.lock().unwrap();
        let rows = tables.get(&kind).map(Vec::as_slice).unwrap_or(&[]);
        Ok(rows
            .iter()
            .find(|row| row_matches(row, &filter))
            .map(|row| Record::new(row.clone())))
    }

    async fn find_many(
        &self,
        kind: RecordKind,
        filter: Filter,
        options: SelectOptions,
    ) -> Result<Vec<Record>, DataError> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<FieldMap> = tables
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .filter(|row| row_matches(row, &filter))
            .cloned()
            .collect();
        sort_rows(&mut rows, &options.order);
        let offset = options.offset.unwrap_or(0) as usize;
        let rows = rows.into_iter().skip(offset);
        let rows: Vec<FieldMap> = match options.limit {
            Some(limit) => rows.take(limit as usize).collect(),
            None => rows.collect(),
        };
        Ok(rows.into_iter().map(Record::new).collect())
    }

    async fn count(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError> {
        let tables = self.tables.lock().unwrap();
        let rows = tables.get(&kind).map(Vec::as_slice).unwrap_or(&[]);
        Ok(rows.iter().filter(|row| row_matches(row, &filter)).count() as u64)
    }

    async fn insert(&self, kind: RecordKind, rows: Vec<FieldMap>) -> Result<u64, DataError> {
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(kind).or_default();
        let inserted = rows.len() as u64;
        table.extend(rows);
        Ok(inserted)
    }

    async fn update_one(
        &self,
        kind: RecordKind,
        filter: Filter,
        payload: FieldMap,
    ) -> Result<u64, DataError> {
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(kind).or_default();
        if let Some(row) = table.iter_mut().find(|row| row_matches(row, &filter)) {
            row.extend(payload);
            return Ok(1);
        }
        Ok(0)
    }

    async fn update_many(
        &self,
        kind: RecordKind,
        filter: Filter,
        payload: FieldMap,
    ) -> Result<u64, DataError> {
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(kind).or_default();
        let mut affected = 0;
        for row in table.iter_mut().filter(|row| row_matches(row, &filter)) {
            row.extend(payload.clone());
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete_one(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError> {
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(kind).or_default();
        if let Some(pos) = table.iter().position(|row| row_matches(row, &filter)) {
            table.remove(pos);
            return Ok(1);
        }
        Ok(0)
    }

    async fn delete_many(&self, kind: RecordKind, filter: Filter) -> Result<u64, DataError> {
        let mut tables = self.tables.lock().unwrap();
        let table = tables.entry(kind).or_default();
        let before = table.len();
        table.retain(|row| !row_matches(row, &filter));
        Ok((before - table.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::store::base_row;
    use uuid::Uuid;

    fn place_row(name: &str, holiday: Uuid) -> FieldMap {
        let mut row = base_row(Uuid::new_v4());
        row.insert("holiday_id".into(), FieldValue::uuid(holiday));
        row.insert("name".into(), FieldValue::Text(name.into()));
        row
    }

    fn priced_row(title: &str, price: i64, duration: &str) -> FieldMap {
        let mut row = base_row(Uuid::new_v4());
        row.insert("title".into(), FieldValue::Text(title.into()));
        row.insert("price".into(), FieldValue::Integer(price));
        row.insert("duration".into(), FieldValue::Text(duration.into()));
        row
    }

    #[tokio::test]
    async fn filters_by_equality() {
        let store = MemoryStore::new();
        let holiday = Uuid::new_v4();
        store
            .insert(
                RecordKind::Place,
                vec![place_row("Bali", holiday), place_row("Lombok", Uuid::new_v4())],
            )
            .await
            .unwrap();

        let rows = store
            .find_many(
                RecordKind::Place,
                Filter::new().eq("holiday_id", FieldValue::uuid(holiday)),
                SelectOptions::new(),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text("name").unwrap(), "Bali");
    }

    #[tokio::test]
    async fn between_is_inclusive_on_both_bounds() {
        let store = MemoryStore::new();
        store
            .insert(
                RecordKind::Holiday,
                vec![
                    priced_row("low", 499_999, "2D1N"),
                    priced_row("edge", 500_000, "3D2N"),
                    priced_row("high", 1_500_000, "4D3N"),
                ],
            )
            .await
            .unwrap();

        let rows = store
            .find_many(
                RecordKind::Holiday,
                Filter::new().between("price", 500_000.0, 1_500_000.0),
                SelectOptions::new().order_by("price", SortDir::Asc),
            )
            .await
            .unwrap();
        let titles: Vec<&str> = rows.iter().map(|r| r.text("title").unwrap()).collect();
        assert_eq!(titles, vec!["edge", "high"]);
    }

    #[tokio::test]
    async fn orders_limits_and_offsets() {
        let store = MemoryStore::new();
        store
            .insert(
                RecordKind::Holiday,
                vec![
                    priced_row("c", 300, "x"),
                    priced_row("a", 100, "x"),
                    priced_row("b", 200, "x"),
                ],
            )
            .await
            .unwrap();

        let rows = store
            .find_many(
                RecordKind::Holiday,
                Filter::new(),
                SelectOptions::new()
                    .order_by("price", SortDir::Asc)
                    .limit(2)
                    .offset(1),
            )
            .await
            .unwrap();
        let titles: Vec<&str> = rows.iter().map(|r| r.text("title").unwrap()).collect();
        assert_eq!(titles, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn any_like_matches_across_fields() {
        let store = MemoryStore::new();
        let mut row = priced_row("Canyon hike", 100, "1D");
        row.insert("city".into(), FieldValue::Text("Ubud".into()));
        store.insert(RecordKind::Sport, vec![row]).await.unwrap();

        let hits = store
            .count(
                RecordKind::Sport,
                Filter::new().any_like(&["title", "city"], "%ubud%"),
            )
            .await
            .unwrap();
        assert_eq!(hits, 1);

        let misses = store
            .count(
                RecordKind::Sport,
                Filter::new().any_like(&["title", "city"], "%jakarta%"),
            )
            .await
            .unwrap();
        assert_eq!(misses, 0);
    }

    #[tokio::test]
    async fn update_one_touches_a_single_row() {
        let store = MemoryStore::new();
        let holiday = Uuid::new_v4();
        store
            .insert(
                RecordKind::Place,
                vec![place_row("Bali", holiday), place_row("Bali", holiday)],
            )
            .await
            .unwrap();

        let mut payload = FieldMap::new();
        payload.insert("name".into(), FieldValue::Text("Nusa Penida".into()));
        let affected = store
            .update_one(RecordKind::Place, Filter::new().eq("name", "Bali"), payload)
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let remaining = store
            .count(RecordKind::Place, Filter::new().eq("name", "Bali"))
            .await
            .unwrap();
        assert_eq!(remaining, 1);
    }
}
