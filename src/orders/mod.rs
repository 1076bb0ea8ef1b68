//! Orders
//!
//! The order snapshot handed over by checkout for a single evaluation.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{categories::CategorySet, ids::VariantId};

mod lines;

pub use lines::OrderLine;

/// Errors raised when an order snapshot is malformed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// A line was submitted with a zero quantity.
    #[error("line {line} has a zero quantity")]
    ZeroQuantity {
        /// Line index
        line: usize,
    },

    /// A line was submitted with a negative unit price.
    #[error("line {line} has a negative unit price")]
    NegativePrice {
        /// Line index
        line: usize,
    },

    /// A line's currency differs from the order currency (index, line currency, order currency).
    #[error("line {0} has currency {1}, but order has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// Line or order totals do not fit in minor units.
    #[error("amount on line {line} overflowed")]
    Overflow {
        /// Line index
        line: usize,
    },
}

/// Order snapshot taken at checkout.
#[derive(Debug, Clone)]
pub struct OrderSnapshot<'a> {
    lines: Vec<OrderLine<'a>>,
    currency: &'static Currency,
    loyalty_member: bool,
    evaluated_at: Timestamp,
}

impl<'a> OrderSnapshot<'a> {
    /// Create an empty order snapshot.
    #[must_use]
    pub fn new(currency: &'static Currency, evaluated_at: Timestamp) -> Self {
        Self {
            lines: Vec::new(),
            currency,
            loyalty_member: false,
            evaluated_at,
        }
    }

    /// Create an order snapshot with the given lines.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] for the first line with a zero quantity, a negative
    /// unit price, or a currency other than `currency`.
    pub fn with_lines(
        lines: impl Into<Vec<OrderLine<'a>>>,
        currency: &'static Currency,
        evaluated_at: Timestamp,
    ) -> Result<Self, OrderError> {
        let lines = lines.into();

        lines
            .iter()
            .enumerate()
            .try_for_each(|(i, line)| check_line(i, line, currency))?;

        Ok(Self {
            lines,
            currency,
            loyalty_member: false,
            evaluated_at,
        })
    }

    /// Set whether the customer is a loyalty member.
    #[must_use]
    pub fn loyalty_member(mut self, loyalty_member: bool) -> Self {
        self.loyalty_member = loyalty_member;
        self
    }

    /// Add a line to the order.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the line is malformed; the order is left unchanged.
    pub fn push(&mut self, line: OrderLine<'a>) -> Result<(), OrderError> {
        check_line(self.lines.len(), &line, self.currency)?;
        self.lines.push(line);

        Ok(())
    }

    /// Iterate over the order lines.
    pub fn iter(&self) -> impl Iterator<Item = &OrderLine<'a>> {
        self.lines.iter()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the order has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Order currency.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Whether the customer is a loyalty member.
    pub fn is_loyalty_member(&self) -> bool {
        self.loyalty_member
    }

    /// When checkout took the snapshot.
    pub fn evaluated_at(&self) -> Timestamp {
        self.evaluated_at
    }

    /// Sum of all line amounts.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Overflow`] if the subtotal cannot be represented.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, OrderError> {
        Ok(Money::from_minor(
            self.sum_minor(|_| true)?,
            self.currency,
        ))
    }

    /// Sum of line amounts, in minor units, for lines matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Overflow`] if the sum cannot be represented.
    pub fn sum_minor<F>(&self, mut filter: F) -> Result<i64, OrderError>
    where
        F: FnMut(&OrderLine<'a>) -> bool,
    {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| filter(line))
            .try_fold(0i64, |acc, (i, line)| {
                line.amount_minor()
                    .and_then(|amount| acc.checked_add(amount))
                    .ok_or(OrderError::Overflow { line: i })
            })
    }

    /// Total quantity of lines matching `filter`.
    pub fn quantity_where<F>(&self, mut filter: F) -> u64
    where
        F: FnMut(&OrderLine<'a>) -> bool,
    {
        self.lines
            .iter()
            .filter(|line| filter(line))
            .map(|line| u64::from(line.quantity()))
            .sum()
    }

    /// Total quantity across the whole order.
    pub fn total_quantity(&self) -> u64 {
        self.quantity_where(|_| true)
    }

    /// Check if any line belongs to one of `categories`.
    pub fn has_categories(&self, categories: &CategorySet) -> bool {
        self.lines
            .iter()
            .any(|line| line.categories().intersects(categories))
    }

    /// Check if any line is for `variant`.
    pub fn has_variant(&self, variant: &VariantId) -> bool {
        self.lines.iter().any(|line| line.variant() == variant)
    }
}

fn check_line(
    index: usize,
    line: &OrderLine<'_>,
    currency: &'static Currency,
) -> Result<(), OrderError> {
    if line.quantity() == 0 {
        return Err(OrderError::ZeroQuantity { line: index });
    }

    if line.unit_price().to_minor_units() < 0 {
        return Err(OrderError::NegativePrice { line: index });
    }

    let line_currency = line.unit_price().currency();

    if line_currency != currency {
        return Err(OrderError::CurrencyMismatch(
            index,
            line_currency.iso_alpha_code,
            currency.iso_alpha_code,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{INR, USD};
    use testresult::TestResult;

    use super::*;

    fn line(variant: &str, categories: &[&str], quantity: u32, minor: i64) -> OrderLine<'static> {
        OrderLine::new(
            VariantId::from(variant),
            CategorySet::from_strs(categories),
            quantity,
            Money::from_minor(minor, INR),
        )
    }

    #[test]
    fn with_lines_computes_subtotal_and_quantities() -> TestResult {
        let order = OrderSnapshot::with_lines(
            [
                line("tv", &["electronics"], 1, 100_000),
                line("cable", &["electronics", "accessories"], 2, 5_000),
                line("mug", &["kitchen"], 4, 2_500),
            ],
            INR,
            Timestamp::UNIX_EPOCH,
        )?;

        assert_eq!(order.subtotal()?, Money::from_minor(120_000, INR));
        assert_eq!(order.total_quantity(), 7);
        assert_eq!(
            order.quantity_where(|l| l.categories().contains(&"electronics".into())),
            3
        );
        assert!(order.has_variant(&VariantId::from("mug")));
        assert!(!order.has_categories(&CategorySet::from_strs(&["garden"])));

        Ok(())
    }

    #[test]
    fn empty_order_has_zero_subtotal() -> TestResult {
        let order = OrderSnapshot::new(INR, Timestamp::UNIX_EPOCH);

        assert!(order.is_empty());
        assert_eq!(order.subtotal()?, Money::from_minor(0, INR));

        Ok(())
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let result = OrderSnapshot::with_lines(
            [line("tv", &[], 1, 100), line("mug", &[], 0, 100)],
            INR,
            Timestamp::UNIX_EPOCH,
        );

        assert!(matches!(result, Err(OrderError::ZeroQuantity { line: 1 })));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut order = OrderSnapshot::new(INR, Timestamp::UNIX_EPOCH);

        let result = order.push(line("tv", &[], 1, -1));

        assert_eq!(result, Err(OrderError::NegativePrice { line: 0 }));
        assert!(order.is_empty());
    }

    #[test]
    fn currency_mismatch_is_rejected() {
        let usd_line = OrderLine::new(
            VariantId::from("tv"),
            CategorySet::empty(),
            1,
            Money::from_minor(100, USD),
        );

        let result = OrderSnapshot::with_lines([usd_line], INR, Timestamp::UNIX_EPOCH);

        assert_eq!(
            result.err(),
            Some(OrderError::CurrencyMismatch(0, "USD", "INR"))
        );
    }

    #[test]
    fn subtotal_overflow_is_reported() -> TestResult {
        let order = OrderSnapshot::with_lines(
            [line("a", &[], 1, i64::MAX), line("b", &[], 1, 1)],
            INR,
            Timestamp::UNIX_EPOCH,
        )?;

        assert_eq!(order.subtotal().err(), Some(OrderError::Overflow { line: 1 }));

        Ok(())
    }

    #[test]
    fn loyalty_flag_defaults_to_false() {
        let order = OrderSnapshot::new(INR, Timestamp::UNIX_EPOCH);

        assert!(!order.is_loyalty_member());
        assert!(order.loyalty_member(true).is_loyalty_member());
    }
}
