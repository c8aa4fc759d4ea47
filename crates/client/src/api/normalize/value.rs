//! Field-level helpers for loosely-typed backend records.

use rust_decimal::Decimal;
use serde_json::Value;

/// Return the first non-null value among `keys` in a JSON object.
pub(crate) fn pick<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(key))
        .find(|value| !value.is_null())
}

/// Coerce a JSON value to an integer: accepts numbers and numeric strings.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Coerce a JSON value to a decimal: accepts numbers and numeric strings.
pub(crate) fn coerce_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// First integer-coercible field among `keys`.
pub(crate) fn int_field(record: &Value, keys: &[&str]) -> Option<i64> {
    pick(record, keys).and_then(coerce_int)
}

/// First decimal-coercible field among `keys`.
pub(crate) fn decimal_field(record: &Value, keys: &[&str]) -> Option<Decimal> {
    pick(record, keys).and_then(coerce_decimal)
}

/// First string field among `keys`.
pub(crate) fn str_field<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a str> {
    pick(record, keys).and_then(Value::as_str)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pick_skips_null() {
        let record = json!({"idProducto": null, "id": 7});
        assert_eq!(pick(&record, &["idProducto", "id"]), Some(&json!(7)));
    }

    #[test]
    fn test_pick_order_matters() {
        let record = json!({"nombre": "Teclado", "name": "Keyboard"});
        assert_eq!(
            str_field(&record, &["nombre", "name"]),
            Some("Teclado")
        );
    }

    #[test]
    fn test_coerce_int_variants() {
        assert_eq!(coerce_int(&json!(5)), Some(5));
        assert_eq!(coerce_int(&json!("5")), Some(5));
        assert_eq!(coerce_int(&json!(" 12 ")), Some(12));
        assert_eq!(coerce_int(&json!("abc")), None);
        assert_eq!(coerce_int(&json!(true)), None);
        assert_eq!(coerce_int(&json!(null)), None);
    }

    #[test]
    fn test_coerce_decimal_variants() {
        assert_eq!(coerce_decimal(&json!(19.99)), Some(Decimal::new(1999, 2)));
        assert_eq!(coerce_decimal(&json!("19.99")), Some(Decimal::new(1999, 2)));
        assert_eq!(coerce_decimal(&json!([])), None);
    }

    #[test]
    fn test_field_helpers_absent() {
        let record = json!({});
        assert_eq!(int_field(&record, &["id"]), None);
        assert_eq!(decimal_field(&record, &["precio", "price"]), None);
        assert_eq!(str_field(&record, &["nombre"]), None);
    }
}
