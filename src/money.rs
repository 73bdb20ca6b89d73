use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Converts a major-unit amount into cents, rounding half away from zero.
pub(crate) fn to_cents(value: Decimal) -> Result<i64> {
    (value * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| anyhow::anyhow!("Amount out of range: {value}"))
}

/// Cents as a major-unit decimal, e.g. `1234` → `12.34`.
pub(crate) fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
