//! Custom serde helpers for provider wire formats.

/// Deserializes a Unix-millis JSON number into `i64`.
///
/// The market-chart endpoint usually sends integer millis, but some series
/// carry float timestamps (`1711843200000.0`), so both are accepted.
pub mod timestamp_ms {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = f64::deserialize(deserializer)?;
        if !millis.is_finite() || millis < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "Invalid timestamp: {}",
                millis
            )));
        }
        Ok(millis.round() as i64)
    }
}

/// Deserializes a JSON number or `null` into `f64`, mapping `null` to `0.0`.
pub mod null_as_zero {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Point(
        #[serde(deserialize_with = "super::timestamp_ms::deserialize")] i64,
        #[serde(deserialize_with = "super::null_as_zero::deserialize")] f64,
    );

    #[test]
    fn test_integer_and_float_timestamps() {
        let a: Point = serde_json::from_str("[1711843200000, 1.5]").unwrap();
        let b: Point = serde_json::from_str("[1711843200000.0, 1.5]").unwrap();
        assert_eq!(a.0, 1711843200000);
        assert_eq!(a.0, b.0);
    }

    #[test]
    fn test_negative_timestamp_rejected() {
        assert!(serde_json::from_str::<Point>("[-5, 1.0]").is_err());
    }

    #[test]
    fn test_null_value_is_zero() {
        let p: Point = serde_json::from_str("[1000, null]").unwrap();
        assert_eq!(p.1, 0.0);
    }
}
