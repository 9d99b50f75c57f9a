use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

/// Signed money amount represented as **integer cents**.
///
/// The arithmetic operators saturate at the `i64` bounds; use
/// [`MoneyCents::checked_add`] / [`MoneyCents::checked_sub`] to detect
/// overflow.
///
/// Use this type for **all** monetary values in the engine (transaction
/// amounts, bucket nets, totals) to avoid floating-point drift.
///
/// Transaction amounts are never negative; the sign only shows up in
/// accumulated nets:
/// - positive = money moved out (spent, invested, lent)
/// - negative = money moved back in (refund, withdrawal, repayment)
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_sub(rhs.0).map(MoneyCents)
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for MoneyCents {
    fn sub_assign(&mut self, rhs: MoneyCents) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(self.0.saturating_neg())
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a MoneyCents> for MoneyCents {
    fn sum<I: Iterator<Item = &'a MoneyCents>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
