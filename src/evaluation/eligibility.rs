//! Rule Eligibility

use std::fmt;

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};

use crate::{
    orders::{OrderLine, OrderSnapshot},
    rules::{DiscountKind, DiscountRule, RuleTarget},
};

/// Why a rule was skipped for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligible {
    /// The rule is switched off.
    Inactive,

    /// The validity window has not started.
    NotStarted,

    /// The validity window has ended.
    Expired,

    /// The rule is for loyalty members only.
    RequiresLoyalty,

    /// The rule's scope has no target (no categories or no variant).
    MissingTarget,

    /// A monetary condition or fixed value is in another currency.
    CurrencyMismatch,

    /// The order subtotal is below the rule's minimum.
    BelowMinimumOrder,

    /// No order line matches the rule's target.
    NoMatchingLines,

    /// The quantity in scope is below the rule's minimum.
    BelowMinimumQuantity,
}

impl Ineligible {
    /// Short machine-readable reason.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::NotStarted => "not_started",
            Self::Expired => "expired",
            Self::RequiresLoyalty => "requires_loyalty",
            Self::MissingTarget => "missing_target",
            Self::CurrencyMismatch => "currency_mismatch",
            Self::BelowMinimumOrder => "below_minimum_order",
            Self::NoMatchingLines => "no_matching_lines",
            Self::BelowMinimumQuantity => "below_minimum_quantity",
        }
    }
}

impl fmt::Display for Ineligible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RuleTarget<'_> {
    /// Check whether an order line falls inside this target.
    pub fn matches(&self, line: &OrderLine<'_>) -> bool {
        match self {
            Self::Order => true,
            Self::Categories(categories) => line.categories().intersects(categories),
            Self::Variant(variant) => line.variant() == *variant,
        }
    }
}

/// Check every eligibility condition of `rule` against `order` at `now`.
///
/// On success the resolved target is returned.
///
/// # Errors
///
/// Returns the first [`Ineligible`] reason found.
pub fn check_eligibility<'r>(
    rule: &'r DiscountRule<'_>,
    order: &OrderSnapshot<'_>,
    subtotal: &Money<'_, Currency>,
    now: Timestamp,
) -> Result<RuleTarget<'r>, Ineligible> {
    if !rule.is_active() {
        return Err(Ineligible::Inactive);
    }

    if now < rule.starts_at() {
        return Err(Ineligible::NotStarted);
    }

    if !rule.is_within_window(now) {
        return Err(Ineligible::Expired);
    }

    if rule.requires_loyalty() && !order.is_loyalty_member() {
        return Err(Ineligible::RequiresLoyalty);
    }

    let target = rule.target().ok_or(Ineligible::MissingTarget)?;

    let currency = order.currency();
    let fixed_currency = match rule.kind() {
        DiscountKind::Fixed(amount) => Some(amount.currency()),
        DiscountKind::Percentage(_) => None,
    };

    if fixed_currency.is_some_and(|c| c != currency)
        || rule.min_order_amount().is_some_and(|m| m.currency() != currency)
    {
        return Err(Ineligible::CurrencyMismatch);
    }

    if rule
        .min_order_amount()
        .is_some_and(|minimum| subtotal.to_minor_units() < minimum.to_minor_units())
    {
        return Err(Ineligible::BelowMinimumOrder);
    }

    if !order.iter().any(|line| target.matches(line)) {
        return Err(Ineligible::NoMatchingLines);
    }

    if let Some(minimum) = rule.min_quantity() {
        let quantity = order.quantity_where(|line| target.matches(line));

        if quantity < u64::from(minimum) {
            return Err(Ineligible::BelowMinimumQuantity);
        }
    }

    Ok(target)
}
