//! Field lookups over loosely shaped JSON rows.
//!
//! Upstream field names changed over time, so most values are read by trying
//! several keys in order. A key counts as present when it exists and is not
//! `null`; the first present key decides the value even if it cannot be
//! converted, later keys are not consulted.

use serde_json::Value;

pub fn first_present<'a>(row: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| row.get(key))
        .find(|value| !value.is_null())
}

pub fn first_number(row: &Value, keys: &[&str]) -> Option<f64> {
    first_present(row, keys).and_then(as_number)
}

pub fn first_count(row: &Value, keys: &[&str]) -> Option<u64> {
    first_present(row, keys).and_then(as_count)
}

pub fn first_label(row: &Value, keys: &[&str]) -> Option<String> {
    first_present(row, keys).map(as_label)
}

/// Non-empty string under `key`, numbers rendered as text.
pub fn non_empty_label(row: &Value, key: &str) -> Option<String> {
    row.get(key)
        .filter(|value| !value.is_null())
        .map(as_label)
        .filter(|label| !label.is_empty())
}

pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// 2^64, the first float past `u64::MAX`.
const COUNT_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Whole non-negative numbers, also when sent as `12.0` or `"12"`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|n| n.fract() == 0.0 && (0.0..COUNT_LIMIT).contains(n))
                .map(|n| n as u64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub fn as_label(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_is_skipped_but_zero_is_not() {
        let row = json!({"review_count": null, "reviews": 0, "count": 9});
        assert_eq!(first_count(&row, &["review_count", "reviews", "count"]), Some(0));
    }

    #[test]
    fn first_present_key_wins_even_when_unconvertible() {
        let row = json!({"avg_rating": "n/a", "rating": 4.0});
        assert_eq!(first_number(&row, &["avg_rating", "rating"]), None);
    }

    #[test]
    fn numeric_text_is_accepted() {
        let row = json!({"count": "12", "rating": " 3.5"});
        assert_eq!(first_count(&row, &["count"]), Some(12));
        assert_eq!(first_number(&row, &["rating"]), Some(3.5));
    }

    #[test]
    fn integral_floats_are_counts() {
        assert_eq!(as_count(&json!(7.0)), Some(7));
        assert_eq!(as_count(&json!(7.5)), None);
        assert_eq!(as_count(&json!(-1)), None);
    }

    #[test]
    fn floats_past_u64_are_not_counts() {
        assert_eq!(as_count(&json!(1e19)), Some(10_000_000_000_000_000_000));
        assert_eq!(as_count(&json!(COUNT_LIMIT)), None);
        assert_eq!(as_count(&json!(1e30)), None);
        assert_eq!(as_count(&json!(-0.0)), Some(0));
    }

    #[test]
    fn labels_render_scalars() {
        let row = json!({"year": 2014, "name": "", "game": "B00X"});
        assert_eq!(first_label(&row, &["year"]), Some("2014".to_owned()));
        assert_eq!(non_empty_label(&row, "name"), None);
        assert_eq!(non_empty_label(&row, "game"), Some("B00X".to_owned()));
        assert_eq!(first_label(&row, &["missing"]), None);
    }
}
