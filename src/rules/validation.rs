//! Rule Validation
//!
//! Checks run when a rule is created or edited. Evaluation never calls these;
//! a misconfigured rule is simply ineligible there.

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    categories::CategorySet,
    rules::{DiscountKind, DiscountRule, DiscountScope},
};

/// Problems found in a rule's configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RuleValidationError {
    /// A category rule without target categories.
    #[error("category is required for category-scoped discounts")]
    MissingCategories,

    /// An item rule without a target variant.
    #[error("product variant is required for item-scoped discounts")]
    MissingVariant,

    /// A negative discount value.
    #[error("discount value cannot be negative")]
    NegativeValue,

    /// A percentage outside `[0, 100]`.
    #[error("percentage discount must be between 0 and 100")]
    PercentageOutOfRange,

    /// The validity window ends before it starts.
    #[error("end date must be after start date")]
    EndBeforeStart,
}

impl DiscountRule<'_> {
    /// Validate the rule's configuration, returning every problem found.
    ///
    /// # Errors
    ///
    /// Returns the list of [`RuleValidationError`]s if any check fails.
    pub fn validate(&self) -> Result<(), SmallVec<[RuleValidationError; 2]>> {
        let mut errors = SmallVec::new();

        match self.scope() {
            DiscountScope::Order => {}
            DiscountScope::Category => {
                if self.categories().is_none_or(CategorySet::is_empty) {
                    errors.push(RuleValidationError::MissingCategories);
                }
            }
            DiscountScope::Item => {
                if self.variant().is_none() {
                    errors.push(RuleValidationError::MissingVariant);
                }
            }
        }

        let value = self.kind().value();

        if value < Decimal::ZERO {
            errors.push(RuleValidationError::NegativeValue);
        } else if matches!(self.kind(), DiscountKind::Percentage(_)) && value > Decimal::ONE_HUNDRED {
            errors.push(RuleValidationError::PercentageOutOfRange);
        }

        if self.ends_at().is_some_and(|end| end < self.starts_at()) {
            errors.push(RuleValidationError::EndBeforeStart);
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
