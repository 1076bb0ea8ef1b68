//! Discount Rules
//!
//! Rule records supplied by the catalog. A rule is a configuration value and is
//! never mutated by evaluation.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};

use crate::{
    categories::CategorySet,
    ids::{RuleId, VariantId},
};

mod kind;
mod scope;
mod validation;

pub use kind::DiscountKind;
pub use scope::{DiscountScope, RuleTarget};
pub use validation::RuleValidationError;

/// A discount rule.
#[derive(Debug, Clone)]
pub struct DiscountRule<'a> {
    id: RuleId,
    name: Option<String>,
    scope: DiscountScope,
    kind: DiscountKind<'a>,
    min_order_amount: Option<Money<'a, Currency>>,
    min_quantity: Option<u32>,
    categories: Option<CategorySet>,
    variant: Option<VariantId>,
    requires_loyalty: bool,
    stackable: bool,
    starts_at: Timestamp,
    ends_at: Option<Timestamp>,
    active: bool,
    created_at: Timestamp,
}

impl<'a> DiscountRule<'a> {
    /// Create an active, non-stackable rule with no conditions, valid from `starts_at`
    /// with no end date.
    ///
    /// The creation time defaults to `starts_at`.
    pub fn new(
        id: impl Into<RuleId>,
        scope: DiscountScope,
        kind: DiscountKind<'a>,
        starts_at: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            scope,
            kind,
            min_order_amount: None,
            min_quantity: None,
            categories: None,
            variant: None,
            requires_loyalty: false,
            stackable: false,
            starts_at,
            ends_at: None,
            active: true,
            created_at: starts_at,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Require a minimum order subtotal.
    #[must_use]
    pub fn with_min_order_amount(mut self, amount: Money<'a, Currency>) -> Self {
        self.min_order_amount = Some(amount);
        self
    }

    /// Require a minimum quantity in the rule's scope.
    #[must_use]
    pub fn with_min_quantity(mut self, quantity: u32) -> Self {
        self.min_quantity = Some(quantity);
        self
    }

    /// Target categories (category scope).
    #[must_use]
    pub fn with_categories(mut self, categories: CategorySet) -> Self {
        self.categories = Some(categories);
        self
    }

    /// Target variant (item scope).
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<VariantId>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Only apply to loyalty members.
    #[must_use]
    pub fn loyalty_only(mut self, requires_loyalty: bool) -> Self {
        self.requires_loyalty = requires_loyalty;
        self
    }

    /// Allow this rule to stack with other stackable rules.
    #[must_use]
    pub fn stackable(mut self, stackable: bool) -> Self {
        self.stackable = stackable;
        self
    }

    /// Set the (inclusive) end of the validity window.
    #[must_use]
    pub fn with_end(mut self, ends_at: Timestamp) -> Self {
        self.ends_at = Some(ends_at);
        self
    }

    /// Set the active flag.
    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Set the creation time, used to break ties between non-stackable rules.
    #[must_use]
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Rule identifier.
    pub fn id(&self) -> &RuleId {
        &self.id
    }

    /// Display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Configured scope.
    pub fn scope(&self) -> DiscountScope {
        self.scope
    }

    /// Discount kind and value.
    pub fn kind(&self) -> &DiscountKind<'a> {
        &self.kind
    }

    /// Minimum order subtotal condition.
    pub fn min_order_amount(&self) -> Option<&Money<'a, Currency>> {
        self.min_order_amount.as_ref()
    }

    /// Minimum quantity condition.
    pub fn min_quantity(&self) -> Option<u32> {
        self.min_quantity
    }

    /// Target categories.
    pub fn categories(&self) -> Option<&CategorySet> {
        self.categories.as_ref()
    }

    /// Target variant.
    pub fn variant(&self) -> Option<&VariantId> {
        self.variant.as_ref()
    }

    /// Whether the rule is restricted to loyalty members.
    pub fn requires_loyalty(&self) -> bool {
        self.requires_loyalty
    }

    /// Whether the rule stacks.
    pub fn is_stackable(&self) -> bool {
        self.stackable
    }

    /// Whether the rule is switched on.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start of the validity window.
    pub fn starts_at(&self) -> Timestamp {
        self.starts_at
    }

    /// End of the validity window, `None` when open-ended.
    pub fn ends_at(&self) -> Option<Timestamp> {
        self.ends_at
    }

    /// Creation time.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Check whether `now` falls within `[starts_at, ends_at]`.
    pub fn is_within_window(&self, now: Timestamp) -> bool {
        self.starts_at <= now && self.ends_at.is_none_or(|end| now <= end)
    }

    /// Resolve the scope together with its target.
    ///
    /// Returns `None` when a category rule has no categories or an item rule
    /// has no variant.
    pub fn target(&self) -> Option<RuleTarget<'_>> {
        match self.scope {
            DiscountScope::Order => Some(RuleTarget::Order),
            DiscountScope::Category => self
                .categories
                .as_ref()
                .filter(|categories| !categories.is_empty())
                .map(RuleTarget::Categories),
            DiscountScope::Item => self.variant.as_ref().map(RuleTarget::Variant),
        }
    }
}

/// Active rules whose validity window contains `now`, in their original order.
pub fn currently_valid<'r, 'a>(
    rules: &'r [DiscountRule<'a>],
    now: Timestamp,
) -> impl Iterator<Item = &'r DiscountRule<'a>> {
    rules
        .iter()
        .filter(move |rule| rule.is_active() && rule.is_within_window(now))
}
