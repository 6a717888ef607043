//!
//! Small helpers.
//!
use serde_json::Value;

/// Scalar rendering of a value, the way it goes into markup.
///
/// Null renders empty, bools render as "1"/"0" so they survive a
/// form round-trip, everything else renders its JSON form.
pub fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Form truthiness of a value.
///
/// Empty strings, "0", 0, null, false, and empty arrays count as
/// false. Matches what a checkbox round-trip submits.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use crate::util::{scalar, truthy};
    use serde_json::json;

    #[test]
    fn test_scalar() {
        assert_eq!(scalar(&json!(null)), "");
        assert_eq!(scalar(&json!(true)), "1");
        assert_eq!(scalar(&json!(false)), "0");
        assert_eq!(scalar(&json!(7)), "7");
        assert_eq!(scalar(&json!(1.5)), "1.5");
        assert_eq!(scalar(&json!("x")), "x");
    }

    #[test]
    fn test_truthy() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(!truthy(&json!("0")));
        assert!(!truthy(&json!([])));
        assert!(truthy(&json!(true)));
        assert!(truthy(&json!(1)));
        assert!(truthy(&json!("x")));
        assert!(truthy(&json!([1])));
    }
}
