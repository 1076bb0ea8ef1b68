//! Order Lines

use rusty_money::{Money, iso::Currency};

use crate::{categories::CategorySet, ids::VariantId};

/// A single purchased variant with its quantity and unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine<'a> {
    variant: VariantId,
    categories: CategorySet,
    quantity: u32,
    unit_price: Money<'a, Currency>,
}

impl<'a> OrderLine<'a> {
    /// Create a new order line.
    ///
    /// Lines are checked when they are added to an [`OrderSnapshot`](crate::orders::OrderSnapshot).
    pub fn new(
        variant: VariantId,
        categories: CategorySet,
        quantity: u32,
        unit_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            variant,
            categories,
            quantity,
            unit_price,
        }
    }

    /// Variant purchased on this line.
    pub fn variant(&self) -> &VariantId {
        &self.variant
    }

    /// Categories the variant belongs to.
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Quantity purchased.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price of a single unit.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Line amount (`quantity * unit_price`) in minor units, or `None` on overflow.
    pub fn amount_minor(&self) -> Option<i64> {
        self.unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
    }

    /// Line amount (`quantity * unit_price`), or `None` on overflow.
    pub fn amount(&self) -> Option<Money<'a, Currency>> {
        self.amount_minor()
            .map(|minor| Money::from_minor(minor, self.unit_price.currency()))
    }
}
