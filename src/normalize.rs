//! Mapping of loosely shaped catalog records onto [`PlantRecord`] and
//! [`CategoryRecord`].
//!
//! Every field resolves through a fixed synonym list, first present value
//! wins. Nothing here fails: absent, null and non-object input all produce a
//! fully populated record.

use crate::models::{CategoryRecord, PlantRecord, RawCategory, RawPlant};
use serde_json::Value;

pub const DEFAULT_NAME: &str = "Unnamed";
pub const DEFAULT_CATEGORY: &str = "Tree";

pub fn normalize_plant(raw: &RawPlant) -> PlantRecord {
    PlantRecord {
        id: first_text([
            &raw.id,
            &raw.plant_id,
            &raw.plant_id_camel,
            &raw.plant_id_upper,
        ]),
        name: first_text([
            &raw.name,
            &raw.plant_name,
            &raw.plant_name_camel,
            &raw.title,
        ])
        .unwrap_or_else(|| DEFAULT_NAME.to_string()),
        category: category_label(&raw.category, &raw.category_name),
        price: coerce_price(raw.price.as_ref()),
        image: first_text([&raw.image, &raw.img, &raw.thumbnail, &raw.photo]).unwrap_or_default(),
        description: first_text([&raw.description, &raw.desc, &raw.details]).unwrap_or_default(),
    }
}

pub fn normalize_category(raw: &RawCategory) -> CategoryRecord {
    CategoryRecord {
        id: first_text([&raw.id, &raw.category_id, &raw.cat_id]),
        label: category_label(&raw.category, &raw.category_name),
    }
}

pub fn plant_from_value(value: &Value) -> PlantRecord {
    normalize_plant(&RawPlant::from_value(value))
}

pub fn category_from_value(value: &Value) -> CategoryRecord {
    normalize_category(&RawCategory::from_value(value))
}

fn category_label(category: &Option<Value>, category_name: &Option<Value>) -> String {
    first_text([category, category_name]).unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

fn first_text<const N: usize>(candidates: [&Option<Value>; N]) -> Option<String> {
    candidates
        .into_iter()
        .find_map(|candidate| candidate.as_ref().and_then(scalar_text))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerces a price to a finite number. Unparsable or absent input is 0.
/// Negative prices pass through unchanged.
pub fn coerce_price(value: Option<&Value>) -> f64 {
    let coerced = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => parse_numeric(s),
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };
    if coerced.is_finite() { coerced } else { 0.0 }
}

/// Parses numeric text the way a browser coerces a form value: whitespace is
/// trimmed, empty text is zero, anything else must be a plain decimal.
/// Hex, octal and binary literals (`0x10`) and `Infinity` are not accepted
/// and coerce to zero.
pub fn parse_numeric(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let plain = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !plain {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}
