use crate::domain::models::RowRecord;
use serde_json::Value;

const DC_FIELD: usize = 0;
const PO_DATE_FIELD: usize = 6;
const PRODUCT_FIELD: usize = 18;
const QTY_FIELD: usize = 19;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExtractError {
    #[error("`data` is not an object")]
    DataNotObject,
    #[error("group {group:?} is not a list of line items")]
    GroupNotArray { group: String },
    #[error("line item {index} in group {group:?} is not an array")]
    ItemNotArray { group: String, index: usize },
    #[error("line item {index} in group {group:?} has {len} fields, expected at least {}", QTY_FIELD + 1)]
    ItemTooShort {
        group: String,
        index: usize,
        len: usize,
    },
    #[error("line item {index} in group {group:?} has non-numeric quantity {value}")]
    BadQuantity {
        group: String,
        index: usize,
        value: String,
    },
}

/// Flattens one document payload into rows, one per line item.
///
/// A structurally malformed line item fails the whole document so that a document
/// either contributes all of its items or none. A null or blank quantity is not
/// malformed: the row is kept with quantity 0.
pub fn extract_rows(document_id: &str, payload: &Value) -> Result<Vec<RowRecord>, ExtractError> {
    let groups = match payload.get("data") {
        Some(Value::Object(map)) => map,
        _ => return Err(ExtractError::DataNotObject),
    };

    let mut rows = Vec::new();
    for (group, items) in groups {
        let Value::Array(items) = items else {
            return Err(ExtractError::GroupNotArray {
                group: group.clone(),
            });
        };
        for (index, item) in items.iter().enumerate() {
            let Value::Array(fields) = item else {
                return Err(ExtractError::ItemNotArray {
                    group: group.clone(),
                    index,
                });
            };
            if fields.len() <= QTY_FIELD {
                return Err(ExtractError::ItemTooShort {
                    group: group.clone(),
                    index,
                    len: fields.len(),
                });
            }
            let quantity = match quantity_value(&fields[QTY_FIELD]) {
                Quantity::Value(q) => q,
                Quantity::Missing => {
                    tracing::warn!(
                        document_id,
                        group = %group,
                        index,
                        "line item has no quantity, counted as 0"
                    );
                    0.0
                }
                Quantity::Invalid => {
                    return Err(ExtractError::BadQuantity {
                        group: group.clone(),
                        index,
                        value: fields[QTY_FIELD].to_string(),
                    })
                }
            };
            rows.push(RowRecord {
                po_date: text_value(&fields[PO_DATE_FIELD]),
                po_number: document_id.to_string(),
                distribution_center: text_value(&fields[DC_FIELD]),
                product_name: text_value(&fields[PRODUCT_FIELD]),
                quantity,
            });
        }
    }
    Ok(rows)
}

fn text_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

enum Quantity {
    Value(f64),
    Missing,
    Invalid,
}

fn quantity_value(v: &Value) -> Quantity {
    let parsed = match v {
        Value::Null => return Quantity::Missing,
        Value::String(s) if s.trim().is_empty() => return Quantity::Missing,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|q| q.is_finite()),
        _ => None,
    };
    parsed.map_or(Quantity::Invalid, Quantity::Value)
}
