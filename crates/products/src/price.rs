use core::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use catalog_core::{json_type_name, DomainError, ValueObject};

/// Exact decimal price. Scale is preserved, so `"25.00"` renders back as `"25.00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl ValueObject for Price {}

impl Price {
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Parse a textual price, trimming surrounding whitespace and double quotes.
    ///
    /// Input that does not fit a `Decimal` exactly (more than 28 fractional
    /// digits) is rejected rather than rounded.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '"');
        Decimal::from_str_exact(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self)
            .map_err(|e| DomainError::validation(format!("Invalid price [{raw}]: {e}")))
    }

    /// Convert a JSON value (string or number) into a price.
    pub fn from_json(value: &Value) -> Result<Self, DomainError> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) => Self::parse(&n.to_string()),
            other => Err(DomainError::validation(format!(
                "Invalid product: body of request contained bad or no data: \
                 price must be a string or number, not {}",
                json_type_name(other)
            ))),
        }
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_scale_in_text_form() {
        assert_eq!(Price::parse("25.00").unwrap().to_string(), "25.00");
    }

    #[test]
    fn trims_quotes_and_whitespace() {
        let p = Price::parse(" \"12.50\" ").unwrap();
        assert_eq!(p.amount(), Decimal::new(1250, 2));
    }

    #[test]
    fn rejects_digits_beyond_decimal_precision() {
        assert!(Price::parse("0.00000000000000000000000000001").is_err());
        assert!(Price::parse("0.123456789012345678901234567891").is_err());
        assert_eq!(
            Price::parse("0.0000000000000000000000000001").unwrap().to_string(),
            "0.0000000000000000000000000001"
        );
    }

    #[test]
    fn accepts_scientific_notation() {
        assert_eq!(Price::parse("1e2").unwrap().amount(), Decimal::from(100));
    }

    #[test]
    fn rejects_garbage() {
        match Price::parse("cheap").unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("cheap")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn from_json_accepts_numbers_and_strings() {
        assert_eq!(Price::from_json(&json!(15)).unwrap().amount(), Decimal::from(15));
        assert_eq!(Price::from_json(&json!("15.0")).unwrap().amount(), Decimal::new(150, 1));
        assert!(Price::from_json(&json!(null)).is_err());
        assert!(Price::from_json(&json!([1])).is_err());
    }

    #[test]
    fn negativity() {
        assert!(Price::parse("-0.01").unwrap().is_negative());
        assert!(!Price::parse("0").unwrap().is_negative());
        assert!(!Price::parse("-0").unwrap().is_negative());
    }
}
