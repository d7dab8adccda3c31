//! Child-collection specs and record mappers shared by the holiday and
//! sport aggregates.
//!
//! Each spec fixes the natural key of its collection: place name, benefit
//! name, image filename, itinerary day. Images and itineraries are owned by
//! both aggregate kinds, so their specs take the parent FK column.

use contracts::domain::common::{BenefitTag, ImageRef, ItineraryDraft, ItineraryEntry, Place};

use crate::shared::data::error::DataError;
use crate::shared::data::reconcile::ChildSpec;
use crate::shared::data::store::{FieldMap, FieldValue, Record, RecordKind};

pub fn places() -> ChildSpec<String, String> {
    ChildSpec {
        kind: RecordKind::Place,
        parent_field: "holiday_id",
        key_of_desired: |name| name.clone(),
        key_of_record: |record| record.text("name").map(str::to_string),
        insert_fields: |name| {
            let mut fields = FieldMap::new();
            fields.insert("name".into(), FieldValue::Text(name.clone()));
            fields
        },
        // The name is the key itself, so a matched place never changes
        changed_fields: |_, _| Ok(FieldMap::new()),
    }
}

pub fn benefits() -> ChildSpec<String, String> {
    ChildSpec {
        kind: RecordKind::Benefit,
        parent_field: "holiday_id",
        key_of_desired: |name| name.clone(),
        key_of_record: |record| record.text("name").map(str::to_string),
        insert_fields: |name| {
            let mut fields = FieldMap::new();
            fields.insert("name".into(), FieldValue::Text(name.clone()));
            fields
        },
        changed_fields: |_, _| Ok(FieldMap::new()),
    }
}

pub fn images(parent_field: &'static str) -> ChildSpec<String, String> {
    ChildSpec {
        kind: RecordKind::Image,
        parent_field,
        key_of_desired: |filename| filename.clone(),
        key_of_record: |record| record.text("filename").map(str::to_string),
        insert_fields: |filename| {
            let mut fields = FieldMap::new();
            fields.insert("filename".into(), FieldValue::Text(filename.clone()));
            fields
        },
        changed_fields: |_, _| Ok(FieldMap::new()),
    }
}

pub fn itineraries(parent_field: &'static str) -> ChildSpec<ItineraryDraft, i64> {
    ChildSpec {
        kind: RecordKind::Itinerary,
        parent_field,
        key_of_desired: |draft| draft.day,
        key_of_record: |record| record.integer("day"),
        insert_fields: |draft| {
            let mut fields = FieldMap::new();
            fields.insert("day".into(), FieldValue::Integer(draft.day));
            fields.insert(
                "description".into(),
                FieldValue::Text(draft.description.clone()),
            );
            fields
        },
        changed_fields: |record, draft| {
            let mut fields = FieldMap::new();
            if record.text("description")? != draft.description {
                fields.insert(
                    "description".into(),
                    FieldValue::Text(draft.description.clone()),
                );
            }
            Ok(fields)
        },
    }
}

// ============================================================================
// Record → contract mappers
// ============================================================================

pub fn to_place(record: &Record) -> Result<Place, DataError> {
    Ok(Place {
        id: record.uuid("id")?,
        name: record.text("name")?.to_string(),
    })
}

pub fn to_benefit(record: &Record) -> Result<BenefitTag, DataError> {
    Ok(BenefitTag {
        id: record.uuid("id")?,
        name: record.text("name")?.to_string(),
    })
}

pub fn to_image(record: &Record) -> Result<ImageRef, DataError> {
    Ok(ImageRef {
        id: record.uuid("id")?,
        filename: record.text("filename")?.to_string(),
    })
}

pub fn to_itinerary(record: &Record) -> Result<ItineraryEntry, DataError> {
    Ok(ItineraryEntry {
        id: record.uuid("id")?,
        day: record.integer("day")?,
        description: record.text("description")?.to_string(),
    })
}
