//! Decimal helpers for prices, ratings and totals.
//!
//! Amounts travel as strings on the wire (`"9.99"`), but older cart snapshots
//! and hand-written payloads may carry plain JSON numbers, so the serde
//! adapters here accept either.

use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode};

/// Parse a decimal amount, trimming surrounding whitespace.
pub fn parse_decimal(raw: &str) -> Option<BigDecimal> {
    BigDecimal::from_str(raw.trim()).ok()
}

/// Round to cents, half up.
pub fn round_amount(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

/// Render an amount with exactly two decimal places.
pub fn format_amount(value: &BigDecimal) -> String {
    round_amount(value).to_string()
}

/// Two amounts are equal once both are rounded to cents.
pub fn same_amount(a: &BigDecimal, b: &BigDecimal) -> bool {
    round_amount(a) == round_amount(b)
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Text(String),
    Number(serde_json::Number),
}

impl RawDecimal {
    fn into_decimal<E: serde::de::Error>(self) -> Result<BigDecimal, E> {
        let text = match self {
            RawDecimal::Text(text) => text,
            RawDecimal::Number(number) => number.to_string(),
        };
        parse_decimal(&text).ok_or_else(|| E::custom(format!("invalid decimal '{}'", text)))
    }
}

/// `#[serde(with = "decimal_text")]` for `BigDecimal` fields.
pub mod decimal_text {
    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::RawDecimal;

    pub fn serialize<S: Serializer>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigDecimal, D::Error> {
        RawDecimal::deserialize(deserializer)?.into_decimal()
    }
}

/// `#[serde(with = "decimal_text_opt")]` for `Option<BigDecimal>` fields.
pub mod decimal_text_opt {
    use bigdecimal::BigDecimal;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::RawDecimal;

    pub fn serialize<S: Serializer>(
        value: &Option<BigDecimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_some(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BigDecimal>, D::Error> {
        Option::<RawDecimal>::deserialize(deserializer)?
            .map(RawDecimal::into_decimal)
            .transpose()
    }
}
