//! Monetary amounts are stored as `NUMERIC(12,2)`: at most ten integer
//! digits and exactly two decimals.

use bigdecimal::BigDecimal;

use super::errors::DomainError;

const SCALE: i64 = 2;

fn ceiling() -> BigDecimal {
    BigDecimal::from(10_000_000_000_i64)
}

/// Whether `amount` can be stored without overflowing the column.
pub fn fits(amount: &BigDecimal) -> bool {
    amount.abs() < ceiling()
}

/// Rejects a price that is negative, would be rounded on storage, or does
/// not fit the column.
pub fn validate_price(price: &BigDecimal) -> Result<(), DomainError> {
    if *price < BigDecimal::from(0) {
        return Err(DomainError::invalid("Price must not be negative."));
    }
    if price.with_scale(SCALE) != *price {
        return Err(DomainError::invalid(
            "Price must have at most two decimal places.",
        ));
    }
    if !fits(price) {
        return Err(DomainError::invalid("Price is too large."));
    }
    Ok(())
}
