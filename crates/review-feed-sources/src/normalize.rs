use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Rating assumed when a provider omits one.
pub const DEFAULT_RATING: u8 = 5;

/// Trim review text. Whitespace-only text disqualifies the record.
pub fn clean_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Coerce a provider rating into the 1-5 range.
///
/// Integers, floats, and numeric strings are accepted and clamped into
/// range. A missing rating defaults to 5. Anything non-numeric disqualifies
/// the record.
pub fn coerce_rating(raw: Option<&Value>) -> Option<u8> {
    let value = match raw {
        None | Some(Value::Null) => return Some(DEFAULT_RATING),
        Some(value) => value,
    };

    let numeric = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    let clamped = (numeric.round() as i64).clamp(MIN_RATING as i64, MAX_RATING as i64);
    Some(clamped as u8)
}

/// Stable id component for records whose payload carries no native id.
pub fn content_hash_id(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Interpret a JSON value as epoch seconds where possible.
pub fn value_as_epoch(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f as i64)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  great tour  "), Some("great tour".to_string()));
        assert_eq!(clean_text(""), None);
        assert_eq!(clean_text("   \n\t "), None);
    }

    #[test]
    fn test_coerce_rating_clamps_or_drops() {
        let cases = [
            (json!(-1), Some(1)),
            (json!(0), Some(1)),
            (json!(1), Some(1)),
            (json!(5), Some(5)),
            (json!(6), Some(5)),
            (json!("abc"), None),
        ];
        for (raw, expected) in cases {
            assert_eq!(coerce_rating(Some(&raw)), expected, "rating {:?}", raw);
        }
    }

    #[test]
    fn test_coerce_rating_accepts_numeric_variants() {
        assert_eq!(coerce_rating(Some(&json!("4"))), Some(4));
        assert_eq!(coerce_rating(Some(&json!(4.6))), Some(5));
        assert_eq!(coerce_rating(Some(&json!(2.4))), Some(2));
        assert_eq!(coerce_rating(None), Some(DEFAULT_RATING));
        assert_eq!(coerce_rating(Some(&json!(null))), Some(DEFAULT_RATING));
        assert_eq!(coerce_rating(Some(&json!([3]))), None);
    }

    #[test]
    fn test_content_hash_is_stable() {
        assert_eq!(content_hash_id("same text"), content_hash_id("same text"));
        assert_ne!(content_hash_id("one"), content_hash_id("two"));
    }

    #[test]
    fn test_value_as_epoch() {
        assert_eq!(value_as_epoch(&json!(1700000000)), Some(1_700_000_000));
        assert_eq!(value_as_epoch(&json!("1700000000")), Some(1_700_000_000));
        assert_eq!(value_as_epoch(&json!(1700000000.9)), Some(1_700_000_000));
        assert_eq!(value_as_epoch(&json!("soon")), None);
        assert_eq!(value_as_epoch(&json!({})), None);
    }
}
