//! Reconciles the two on-disk box shapes into [`PackedBox`].
//!
//! Old data files store a box as a bare list of items. Current files store
//! `{ "type", "items", "actual_weight" }`. Both are resolved here, once, at
//! load time; nothing downstream sees the legacy shape. Normalization never
//! fails: missing or malformed fields fall back to defaults.

use crate::domain::model::{Collection, Item, PackedBox, UNKNOWN_BOX_TYPE};
use serde_json::{Map, Value};

/// A persisted box record as found on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredRecord {
    Legacy(Vec<Item>),
    Canonical(PackedBox),
}

impl StoredRecord {
    pub fn classify(name: &str, raw: &Value) -> Self {
        match raw {
            Value::Array(entries) => StoredRecord::Legacy(read_items(name, entries)),
            Value::Object(fields) => StoredRecord::Canonical(read_canonical(name, fields)),
            other => {
                tracing::warn!(
                    "Box '{}' has an unrecognized record ({}); treating it as empty",
                    name,
                    value_kind(other)
                );
                StoredRecord::Legacy(Vec::new())
            }
        }
    }

    pub fn into_canonical(self, name: &str) -> PackedBox {
        match self {
            StoredRecord::Legacy(items) => PackedBox {
                name: name.to_string(),
                box_type: UNKNOWN_BOX_TYPE.to_string(),
                items,
                declared_weight_kg: 0.0,
                weight_is_integer: true,
            },
            StoredRecord::Canonical(packed) => packed,
        }
    }
}

/// Builds a collection from the raw persisted document.
pub fn normalize(document: &Value) -> Collection {
    let mut collection = Collection::new();

    let Value::Object(entries) = document else {
        tracing::warn!(
            "Data document is a {} rather than an object; starting empty",
            value_kind(document)
        );
        return collection;
    };

    let mut legacy = 0usize;
    for (name, raw) in entries {
        if name.trim() != name {
            tracing::warn!("Box name {:?} has surrounding whitespace; keeping it as stored", name);
        }

        let record = StoredRecord::classify(name, raw);
        if matches!(record, StoredRecord::Legacy(_)) {
            legacy += 1;
        }
        // Object keys are unique, so every record is kept.
        collection.insert(record.into_canonical(name));
    }

    if legacy > 0 {
        tracing::debug!("Normalized {} legacy box record(s)", legacy);
    }
    collection
}

fn read_canonical(name: &str, fields: &Map<String, Value>) -> PackedBox {
    let box_type = fields
        .get("type")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(UNKNOWN_BOX_TYPE)
        .to_string();

    let items = match fields.get("items") {
        Some(Value::Array(entries)) => read_items(name, entries),
        Some(other) => {
            tracing::warn!(
                "Box '{}' has items stored as {}; ignoring them",
                name,
                value_kind(other)
            );
            Vec::new()
        }
        None => Vec::new(),
    };

    let stored_weight = fields.get("actual_weight");
    let declared_weight_kg = stored_weight.and_then(read_weight);
    let weight_is_integer = match (stored_weight, declared_weight_kg) {
        (Some(Value::Number(n)), Some(_)) => !n.is_f64(),
        (_, None) => true,
        _ => false,
    };

    PackedBox {
        name: name.to_string(),
        box_type,
        items,
        declared_weight_kg: declared_weight_kg.unwrap_or(0.0),
        weight_is_integer,
    }
}

fn read_items(box_name: &str, entries: &[Value]) -> Vec<Item> {
    entries
        .iter()
        .filter_map(|entry| {
            let item = read_item(entry);
            if item.is_none() {
                tracing::debug!(
                    "Dropping {} entry from the items of '{}'",
                    value_kind(entry),
                    box_name
                );
            }
            item
        })
        .collect()
}

fn read_item(entry: &Value) -> Option<Item> {
    match entry {
        Value::Object(fields) => {
            let name = fields
                .get("item")
                .or_else(|| fields.get("name"))
                .map(text)
                .unwrap_or_default();
            let description = fields.get("description").map(text).unwrap_or_default();
            let quantity = fields.get("quantity").and_then(read_quantity).unwrap_or(1);
            Some(Item {
                name,
                description,
                quantity,
            })
        }
        Value::String(name) => Some(Item::new(name.clone(), "", 1)),
        _ => None,
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn read_quantity(value: &Value) -> Option<u32> {
    let quantity = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u32::try_from(quantity).ok().filter(|q| *q > 0)
}

fn read_weight(value: &Value) -> Option<f64> {
    let weight = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (weight.is_finite() && weight >= 0.0).then_some(weight)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
