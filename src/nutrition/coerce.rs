//! Numeric coercion across serialization boundaries
//!
//! Upstream payloads and persisted rows arrive with nutrient values as JSON
//! numbers, numeric strings (decimal database drivers serialize this way),
//! or null. This helper is the single total conversion used everywhere a
//! JSON value must become a number.

use serde_json::Value;

/// Coerce a JSON value to a number, or None
///
/// Rules:
/// - `null` -> None
/// - numbers -> their f64 value
/// - strings -> parsed as f64 if the trimmed string parses to a finite
///   value; otherwise None ("NaN" and "inf" parse in Rust but are rejected)
/// - booleans -> 1.0 / 0.0
/// - arrays and objects -> None
///
/// Unparseable input maps to None rather than NaN, so a bad upstream value
/// can never poison a running total.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce an optional field from a JSON object, treating a missing key as null
pub fn coerce_field(obj: &Value, key: &str) -> Option<f64> {
    obj.get(key).and_then(coerce_numeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_is_none() {
        assert_eq!(coerce_numeric(&Value::Null), None);
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(coerce_numeric(&json!(0)), Some(0.0));
        assert_eq!(coerce_numeric(&json!(250)), Some(250.0));
        assert_eq!(coerce_numeric(&json!(12.5)), Some(12.5));
        assert_eq!(coerce_numeric(&json!(-3)), Some(-3.0));
    }

    #[test]
    fn test_numeric_strings_parse() {
        let v = coerce_numeric(&json!("3.14")).unwrap();
        assert!((v - 3.14).abs() < 1e-9);
        assert_eq!(coerce_numeric(&json!(" 42 ")), Some(42.0));
        assert_eq!(coerce_numeric(&json!("0")), Some(0.0));
    }

    #[test]
    fn test_zero_is_distinct_from_null() {
        assert_eq!(coerce_numeric(&json!(0)), Some(0.0));
        assert_ne!(coerce_numeric(&json!(0)), None);
    }

    #[test]
    fn test_non_numeric_is_none() {
        assert_eq!(coerce_numeric(&json!("abc")), None);
        assert_eq!(coerce_numeric(&json!("")), None);
        assert_eq!(coerce_numeric(&json!("  ")), None);
        assert_eq!(coerce_numeric(&json!([1, 2])), None);
        assert_eq!(coerce_numeric(&json!({"value": 1})), None);
    }

    #[test]
    fn test_non_finite_strings_rejected() {
        // These parse as f64 but would poison a running total
        assert_eq!(coerce_numeric(&json!("NaN")), None);
        assert_eq!(coerce_numeric(&json!("inf")), None);
        assert_eq!(coerce_numeric(&json!("-infinity")), None);
    }

    #[test]
    fn test_bools() {
        assert_eq!(coerce_numeric(&json!(true)), Some(1.0));
        assert_eq!(coerce_numeric(&json!(false)), Some(0.0));
    }

    #[test]
    fn test_coerce_field_missing_key() {
        let obj = json!({"calories": "200"});
        assert_eq!(coerce_field(&obj, "calories"), Some(200.0));
        assert_eq!(coerce_field(&obj, "protein"), None);
    }
}
