use serde_json::Value;

use crate::error::{DealsError, Result};

/// Read an integer cent amount the API sends as a number or numeric string.
/// Absent (or null) means zero. Fractional numbers truncate toward zero.
pub fn parse_cents(value: Option<&Value>) -> Result<i64> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(cents), _) => Ok(cents),
            (None, Some(f)) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
            _ => Err(DealsError::Decode(format!("cent amount out of range: {n}"))),
        },
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| DealsError::Decode(format!("cent amount is not an integer: {s:?}"))),
        Some(other) => Err(DealsError::Decode(format!(
            "unexpected cent amount: {other}"
        ))),
    }
}

/// Cents to major units.
pub fn cents_to_major(cents: i64) -> f64 {
    cents as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_and_number_cents() {
        assert_eq!(parse_cents(Some(&json!("1999"))).unwrap(), 1999);
        assert_eq!(parse_cents(Some(&json!(2500))).unwrap(), 2500);
        assert_eq!(parse_cents(Some(&json!(1999.0))).unwrap(), 1999);
        assert_eq!(parse_cents(Some(&json!(19.5))).unwrap(), 19);
        assert_eq!(cents_to_major(1999), 19.99);
    }

    #[test]
    fn missing_is_zero() {
        assert_eq!(parse_cents(None).unwrap(), 0);
        assert_eq!(parse_cents(Some(&Value::Null)).unwrap(), 0);
    }

    #[test]
    fn rejects_non_integer_amounts() {
        assert!(matches!(
            parse_cents(Some(&json!("19.99"))),
            Err(DealsError::Decode(_))
        ));
        assert!(parse_cents(Some(&json!(["1"]))).is_err());
    }
}
