//! Fixed-point accumulation in millionths of a currency unit
//!
//! Balances are accumulated in micro-units so equal splits keep sub-cent
//! precision across many expenses; rounding to cents happens once, when a
//! `Balance` is emitted. The accumulator is 128-bit so no sequence of
//! `i64` cent amounts can overflow it.

use crate::models::Money;

/// Micro-units per cent
const MICROS_PER_CENT: i128 = 10_000;

/// A signed amount in millionths of the currency unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Micros(i128);

impl Micros {
    pub(crate) const ZERO: Self = Self(0);

    pub(crate) fn from_money(money: Money) -> Self {
        Self(i128::from(money.cents()) * MICROS_PER_CENT)
    }

    #[cfg(test)]
    pub(crate) fn raw(self) -> i128 {
        self.0
    }

    /// Round to whole cents, ties toward positive infinity (-0.005 becomes 0.00).
    ///
    /// Totals beyond the `i64` cent range saturate.
    pub(crate) fn round_to_money(self) -> Money {
        let cents = self
            .0
            .saturating_add(MICROS_PER_CENT / 2)
            .div_euclid(MICROS_PER_CENT);
        let cents = i64::try_from(cents).unwrap_or(if cents < 0 { i64::MIN } else { i64::MAX });
        Money::from_cents(cents)
    }

    /// Divide `total` into `parts` shares whose sum is exactly `total`.
    ///
    /// Every share is `total / parts`; the leftover micro-units go one each
    /// to the leading shares.
    pub(crate) fn split_evenly(total: Money, parts: usize) -> Vec<Micros> {
        if parts == 0 {
            return Vec::new();
        }
        let total = Self::from_money(total).0;
        let n = parts as i128;
        let base = total.div_euclid(n);
        let extra = total.rem_euclid(n) as usize;
        (0..parts)
            .map(|i| Micros(if i < extra { base + 1 } else { base }))
            .collect()
    }
}

impl std::ops::AddAssign for Micros {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl std::ops::SubAssign for Micros {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}
