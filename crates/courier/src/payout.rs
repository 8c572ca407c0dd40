//! Flat per-kilometer payout policy.

use rust_decimal::{Decimal, RoundingStrategy};

/// Flat-rate payout: `rate_per_km * distance`, rounded to 2 decimal places.
///
/// Rounding is half-to-even; half-up would silently diverge on tie values
/// such as 0.125.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutPolicy {
    rate_per_km: Decimal,
}

impl PayoutPolicy {
    pub fn new(rate_per_km: Decimal) -> Self {
        Self { rate_per_km }
    }

    pub fn rate_per_km(&self) -> Decimal {
        self.rate_per_km
    }

    pub fn calculate(&self, distance_km: Decimal) -> Decimal {
        (self.rate_per_km * distance_km)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
    }
}

impl Default for PayoutPolicy {
    /// 10 per kilometer.
    fn default() -> Self {
        Self::new(Decimal::from(10))
    }
}
