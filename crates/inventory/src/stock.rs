use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, Entity, ProductId, StockId};

/// Stock record: the on-hand quantity of one product.
///
/// At most one record exists per product; stock-in updates it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub id: StockId,
    pub product_id: ProductId,
    pub quantity: u64,
}

impl Entity for StockRecord {
    type Id = StockId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// A validated, strictly positive stock-in quantity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u64")]
pub struct StockDelta(u64);

impl StockDelta {
    pub fn new(delta: i64) -> DomainResult<Self> {
        if delta <= 0 {
            return Err(DomainError::invalid_delta(format!(
                "delta must be a positive integer (got {delta})"
            )));
        }
        Ok(Self(delta as u64))
    }

    /// Parse raw user input (e.g. a numeric text field).
    pub fn parse(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_delta("quantity is required"));
        }
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| DomainError::invalid_delta(format!("`{trimmed}` is not a whole number")))?;
        Self::new(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for StockDelta {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StockDelta> for u64 {
    fn from(value: StockDelta) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_negative_deltas_are_invalid() {
        assert!(matches!(StockDelta::new(0), Err(DomainError::InvalidDelta(_))));
        assert!(matches!(StockDelta::new(-1), Err(DomainError::InvalidDelta(_))));
        assert_eq!(StockDelta::new(3).unwrap().get(), 3);
    }

    #[test]
    fn parse_rejects_empty_and_non_numeric_input() {
        for input in ["", "   ", "abc", "1.5", "5kg", "-2", "0"] {
            assert!(
                matches!(StockDelta::parse(input), Err(DomainError::InvalidDelta(_))),
                "input {input:?} should be rejected"
            );
        }
        assert_eq!(StockDelta::parse(" 12 ").unwrap().get(), 12);
    }
}
