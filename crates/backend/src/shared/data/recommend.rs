//! Price-proximity peer recommendations.
//!
//! Shares the filter/ordering vocabulary of the store: a bounded price
//! window around a reference record, optional same-category restriction,
//! deterministic ordering, capped result size. Always excludes the
//! reference record itself and, running through the soft-delete decorator,
//! never returns deleted peers.

use uuid::Uuid;

use super::error::DataError;
use super::store::{FieldValue, Filter, Record, RecordKind, RecordStore, SelectOptions, SortDir};

/// Parameters of one recommendation query. The multiplier pair and the cap
/// come from per-use-case configuration, not constants.
#[derive(Debug, Clone)]
pub struct RecommendationSpec {
    pub reference_id: Uuid,
    /// Price of the reference record
    pub price: i64,
    pub low: f64,
    pub high: f64,
    /// Restrict peers to the same category: (FK column, category id)
    pub same_category: Option<(&'static str, Uuid)>,
    pub limit: u64,
}

/// Peers of the reference record: price within `[price·low, price·high]`
/// inclusive, ordered by price then duration ascending
pub async fn find_peers(
    store: &dyn RecordStore,
    kind: RecordKind,
    spec: &RecommendationSpec,
) -> Result<Vec<Record>, DataError> {
    let lower = spec.price as f64 * spec.low;
    let upper = spec.price as f64 * spec.high;

    let mut filter = Filter::new()
        .ne("id", FieldValue::uuid(spec.reference_id))
        .between("price", lower, upper);
    if let Some((column, category_id)) = spec.same_category {
        filter = filter.eq(column, FieldValue::uuid(category_id));
    }

    let options = SelectOptions::new()
        .order_by("price", SortDir::Asc)
        .order_by("duration", SortDir::Asc)
        .limit(spec.limit);

    store.find_many(kind, filter, options).await
}
