//! Request body validation against the writable-column allow-list of an entity.

use crate::entity::{ColumnInfo, EntityDef, UnknownFields};
use crate::error::AppError;
use crate::sql::BindValue;
use serde_json::{Map, Value};

pub type WriteSet = Vec<(&'static ColumnInfo, BindValue)>;

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body. Every key must be a writable column; absent columns stay null.
    pub fn for_create(
        entity: &EntityDef,
        body: &Map<String, Value>,
    ) -> Result<WriteSet, AppError> {
        reject_unknown(entity, body)?;
        collect(entity, body)
    }

    /// Validate only the fields present in body. Unknown keys are dropped or rejected per entity.
    pub fn for_update(
        entity: &EntityDef,
        body: &Map<String, Value>,
    ) -> Result<WriteSet, AppError> {
        if entity.unknown_on_update == UnknownFields::Reject {
            reject_unknown(entity, body)?;
        }
        collect(entity, body)
    }
}

fn reject_unknown(entity: &EntityDef, body: &Map<String, Value>) -> Result<(), AppError> {
    let mut unknown: Vec<&str> = body
        .keys()
        .map(String::as_str)
        .filter(|k| entity.column(k).is_none())
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort_unstable();
    Err(AppError::Validation(format!(
        "unknown {} field(s): {}",
        entity.label,
        unknown.join(", ")
    )))
}

/// Writable columns present in body, in declaration order.
fn collect(entity: &EntityDef, body: &Map<String, Value>) -> Result<WriteSet, AppError> {
    entity
        .columns
        .iter()
        .filter_map(|c| body.get(c.name).map(|v| (c, v)))
        .map(|(c, v)| BindValue::from_json(c, v).map(|b| (c, b)))
        .collect()
}
