//! Discount Kinds

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

/// How a rule's discount value is interpreted.
#[derive(Clone, Copy)]
pub enum DiscountKind<'a> {
    /// A fixed amount off the basis, capped at the basis.
    Fixed(Money<'a, Currency>),

    /// A percentage of the basis.
    Percentage(Percentage),
}

impl<'a> DiscountKind<'a> {
    /// Percentage discount from percentage points (`15` is 15%).
    #[must_use]
    pub fn percent(points: Decimal) -> Self {
        Self::Percentage(Percentage::from(points / Decimal::ONE_HUNDRED))
    }

    /// Fixed discount.
    #[must_use]
    pub fn fixed(amount: Money<'a, Currency>) -> Self {
        Self::Fixed(amount)
    }

    /// Machine name, as recorded in audit metadata.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fix",
            Self::Percentage(_) => "percentage",
        }
    }

    /// The configured value: major currency units for fixed discounts,
    /// percentage points for percentages.
    pub fn value(&self) -> Decimal {
        match self {
            Self::Fixed(amount) => Decimal::new(amount.to_minor_units(), amount.currency().exponent),
            Self::Percentage(percent) => (*percent) * Decimal::ONE_HUNDRED,
        }
    }
}

impl fmt::Debug for DiscountKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(amount) => f.debug_tuple("Fixed").field(amount).finish(),
            Self::Percentage(_) => f.debug_tuple("Percentage").field(&self.value()).finish(),
        }
    }
}
