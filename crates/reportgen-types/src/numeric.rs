//! Lenient numeric deserialization.
//!
//! Imported files and AI replies are not guaranteed to carry clean unsigned
//! integers: `4.0`, `"7"`, `null` and negative numbers all show up. Every count
//! in the data model goes through [`lenient_u32`] so that a sloppy payload is
//! normalized instead of rejected.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Convert an arbitrary JSON value into a count.
///
/// Floats are rounded, numeric strings are parsed, negatives clamp to 0 and
/// anything non-numeric becomes 0.
pub fn count_from_value(value: &Value) -> u32 {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u.min(u32::MAX as u64) as u32
            } else if let Some(f) = n.as_f64() {
                clamp_f64(f)
            } else {
                0
            }
        }
        Value::String(s) => s.trim().parse::<f64>().map(clamp_f64).unwrap_or(0),
        Value::Bool(b) => u32::from(*b),
        _ => 0,
    }
}

fn clamp_f64(f: f64) -> u32 {
    if !f.is_finite() || f <= 0.0 {
        0
    } else if f >= u32::MAX as f64 {
        u32::MAX
    } else {
        f.round() as u32
    }
}

/// Serde adapter for `u32` fields that accepts any JSON scalar.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(count_from_value(&value))
}

/// Serde adapter for `Option<u32>` fields; `null` stays `None`.
pub fn lenient_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(count_from_value(&other)),
    })
}

/// Serde adapter for string fields that tolerates `null` and scalars.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// Serde adapter for sequences where `null` means "empty".
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integers_pass_through() {
        assert_eq!(count_from_value(&json!(7)), 7);
        assert_eq!(count_from_value(&json!(0)), 0);
    }

    #[test]
    fn test_floats_round() {
        assert_eq!(count_from_value(&json!(4.0)), 4);
        assert_eq!(count_from_value(&json!(6.6)), 7);
        assert_eq!(count_from_value(&json!(2.4)), 2);
    }

    #[test]
    fn test_negatives_clamp_to_zero() {
        assert_eq!(count_from_value(&json!(-3)), 0);
        assert_eq!(count_from_value(&json!(-0.5)), 0);
    }

    #[test]
    fn test_strings_and_garbage() {
        assert_eq!(count_from_value(&json!("12")), 12);
        assert_eq!(count_from_value(&json!(" 9 ")), 9);
        assert_eq!(count_from_value(&json!("abc")), 0);
        assert_eq!(count_from_value(&json!(null)), 0);
        assert_eq!(count_from_value(&json!([1, 2])), 0);
    }

    #[test]
    fn test_huge_values_saturate() {
        assert_eq!(count_from_value(&json!(1e20)), u32::MAX);
        assert_eq!(count_from_value(&json!(u64::MAX)), u32::MAX);
    }
}
