//! The value-shape rule shared by every request that carries template fields.
//!
//! Create, update, dry-run validation and PDF generation all accept an
//! optional map of placeholder values. A value may be a number (integer of
//! any width or float), a string, an array or an object. Booleans and nulls
//! are rejected.

use serde_json::Value;

use crate::error::DesignError;
use crate::types::Fields;

/// Whether a single field value has a shape templates can bind.
pub fn is_supported_value(value: &Value) -> bool {
    matches!(
        value,
        Value::Number(_) | Value::String(_) | Value::Array(_) | Value::Object(_)
    )
}

/// Check every value of `fields`, failing on the first unsupported one.
///
/// Keys are visited in the map's iteration order, so the reported key is
/// deterministic for a given map.
pub fn validate_fields(fields: &Fields) -> Result<(), DesignError> {
    match fields.iter().find(|(_, value)| !is_supported_value(value)) {
        Some((key, _)) => Err(DesignError::UnsupportedFieldType { field: key.clone() }),
        None => Ok(()),
    }
}

/// Combine stored design defaults with the fields supplied at render time.
///
/// Request values override stored defaults key by key; stored defaults fill
/// in any key the request omits. Returns `None` only when neither side has
/// a field map, in which case the template is rendered unbound.
pub fn merge_fields(stored: Option<&Fields>, request: Option<&Fields>) -> Option<Fields> {
    match (stored, request) {
        (None, None) => None,
        (Some(stored), None) => Some(stored.clone()),
        (None, Some(request)) => Some(request.clone()),
        (Some(stored), Some(request)) => {
            let mut merged = stored.clone();
            for (key, value) in request {
                merged.insert(key.clone(), value.clone());
            }
            Some(merged)
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn accepts_numbers_strings_arrays_and_maps() {
        let f = fields(json!({
            "amount": 10,
            "ratio": 10.2,
            "big": u64::MAX,
            "name": "invoice",
            "items": [1, 2, 3],
            "address": { "city": "Lisbon" }
        }));
        assert!(validate_fields(&f).is_ok());
    }

    #[test]
    fn rejects_boolean_naming_the_key() {
        let f = fields(json!({ "amount": 10, "paid": true }));
        assert_matches!(
            validate_fields(&f),
            Err(DesignError::UnsupportedFieldType { field }) if field == "paid"
        );
    }

    #[test]
    fn rejects_null_naming_the_key() {
        let f = fields(json!({ "note": null }));
        let err = validate_fields(&f).unwrap_err();
        assert_eq!(err.to_string(), "unsupported field type for field note");
    }

    #[test]
    fn empty_map_is_valid() {
        assert!(validate_fields(&Fields::new()).is_ok());
    }

    #[test]
    fn merge_prefers_request_values() {
        let stored = fields(json!({ "amount": 1, "currency": "EUR" }));
        let request = fields(json!({ "amount": 99 }));

        let merged = merge_fields(Some(&stored), Some(&request)).unwrap();
        assert_eq!(merged["amount"], json!(99));
        assert_eq!(merged["currency"], json!("EUR"));
    }

    #[test]
    fn merge_falls_back_to_either_side() {
        let stored = fields(json!({ "amount": 1 }));
        assert_eq!(merge_fields(Some(&stored), None), Some(stored.clone()));
        assert_eq!(merge_fields(None, Some(&stored)), Some(stored));
        assert_eq!(merge_fields(None, None), None);
    }
}
