//! Cart pricing.
//!
//! Amounts are minor units. Sums use checked arithmetic so an overflowing
//! cart is reported instead of wrapping.

use thiserror::Error;

use crate::domain::carts::records::CartItemRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("cart total overflows")]
    Overflow,
}

/// Sum of `unit_price * quantity` over `(unit_price, quantity)` lines.
pub fn compute_total<I>(lines: I) -> Result<u64, PricingError>
where
    I: IntoIterator<Item = (u64, u32)>,
{
    lines.into_iter().try_fold(0_u64, |total, (unit_price, quantity)| {
        unit_price
            .checked_mul(u64::from(quantity))
            .and_then(|line| total.checked_add(line))
            .ok_or(PricingError::Overflow)
    })
}

/// A cart total and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartTotal {
    /// Stored when the cart was saved.
    Snapshot(u64),

    /// Recomputed from the current items.
    Live(u64),
}

impl CartTotal {
    /// Use `snapshot` when present, otherwise sum `items`. Only the shared
    /// view resolves this way; active carts use [`CartTotal::Live`].
    pub fn prefer_snapshot(
        snapshot: Option<u64>,
        items: &[CartItemRecord],
    ) -> Result<Self, PricingError> {
        match snapshot {
            Some(amount) => Ok(Self::Snapshot(amount)),
            None => compute_total(items.iter().map(|item| (item.unit_price, item.quantity)))
                .map(Self::Live),
        }
    }

    #[must_use]
    pub const fn amount(self) -> u64 {
        match self {
            Self::Snapshot(amount) | Self::Live(amount) => amount,
        }
    }

    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            Self::Snapshot(_) => "snapshot",
            Self::Live(_) => "live",
        }
    }
}
