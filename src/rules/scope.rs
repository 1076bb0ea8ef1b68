//! Discount Scopes

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{categories::CategorySet, ids::VariantId};

/// Granularity a discount rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountScope {
    /// The whole order.
    Order,

    /// Lines belonging to one of the rule's target categories.
    Category,

    /// Lines for the rule's target variant.
    Item,
}

impl DiscountScope {
    /// All scopes, in breakdown order.
    pub const ALL: [Self; 3] = [Self::Order, Self::Category, Self::Item];

    /// Machine name, as persisted against applied discounts.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Category => "category",
            Self::Item => "item",
        }
    }

    /// Human-readable name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Order => "Order",
            Self::Category => "Category",
            Self::Item => "Item",
        }
    }
}

impl fmt::Display for DiscountScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rule's scope resolved together with its target.
///
/// Only well-formed rules resolve to a target, see [`DiscountRule::target`](crate::rules::DiscountRule::target).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget<'r> {
    /// Whole order.
    Order,

    /// Lines in any of these categories.
    Categories(&'r CategorySet),

    /// Lines for this variant.
    Variant(&'r VariantId),
}

impl RuleTarget<'_> {
    /// Scope of this target.
    pub const fn scope(&self) -> DiscountScope {
        match self {
            Self::Order => DiscountScope::Order,
            Self::Categories(_) => DiscountScope::Category,
            Self::Variant(_) => DiscountScope::Item,
        }
    }
}
