//! Monetary amounts for book prices and debts.
//!
//! Uses `rust_decimal` internally so that summing many prices never drifts
//! the way binary floats do. Values are rendered with exactly 2 decimal
//! places.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A monetary amount, displayed with 2 decimal places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use library_standing::Money;
///
/// let price = Money::from_str("10.5").unwrap();
/// assert_eq!(price.to_string(), "10.50");
/// assert_eq!(price.currency(), "$10.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    /// The number of decimal places shown.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Renders the amount as `$X.YY`.
    pub fn currency(&self) -> String {
        format!("${}", self)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    /// Accepts plain decimals (`12.5`) and scientific notation (`1.25e1`).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed))?;
        Ok(Money(decimal))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{:.2}", rounded)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}
