//! Evaluation
//!
//! Runs an order snapshot against a set of candidate rules: eligibility, basis
//! and amount per rule, stacking resolution, then the aggregate cap.

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    breakdown::{AppliedDiscount, DiscountBreakdown},
    config::{ConfigError, EvaluatorConfig},
    discounts::{DiscountError, calculate_discount},
    orders::{OrderError, OrderSnapshot},
    rules::DiscountRule,
};

mod eligibility;
mod stacking;

pub use eligibility::{Ineligible, check_eligibility};

/// Errors that abort an evaluation.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// The order snapshot could not be aggregated.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// A discount amount could not be computed.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// The configuration does not fit the order currency.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Summing applied discounts overflowed.
    #[error("discount total overflowed")]
    Overflow,
}

/// An eligible rule with its computed amount, before stacking.
#[derive(Debug, Clone)]
pub(crate) struct Candidate<'r, 'a> {
    pub(crate) position: usize,
    pub(crate) rule: &'r DiscountRule<'a>,
    pub(crate) basis: Money<'a, Currency>,
    pub(crate) amount: Money<'a, Currency>,
}

/// Discount evaluator.
///
/// Holds only configuration, so one evaluator can be shared across threads and
/// orders.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Create an evaluator with the given configuration.
    pub const fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub const fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate `rules` against `order` at `now`.
    ///
    /// Rules that are not eligible, including misconfigured ones, are skipped.
    /// Eligible rules that compute to zero are dropped.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] if the order cannot be aggregated, the
    /// configuration does not fit the order currency, or an amount overflows.
    #[tracing::instrument(
        name = "evaluator.evaluate",
        skip_all,
        fields(lines = order.len(), rules = rules.len(), currency = order.currency().iso_alpha_code)
    )]
    pub fn evaluate<'a>(
        &self,
        order: &OrderSnapshot<'a>,
        rules: &[DiscountRule<'a>],
        now: Timestamp,
    ) -> Result<DiscountBreakdown<'a>, EvaluationError> {
        self.config.check_currency(order.currency())?;

        let subtotal = order.subtotal()?;
        let mut candidates = Vec::with_capacity(rules.len());

        for (position, rule) in rules.iter().enumerate() {
            let target = match check_eligibility(rule, order, &subtotal, now) {
                Ok(target) => target,
                Err(reason) => {
                    debug!(rule = %rule.id(), %reason, "rule not eligible");
                    continue;
                }
            };

            let basis = Money::from_minor(
                order.sum_minor(|line| target.matches(line))?,
                order.currency(),
            );

            let amount = calculate_discount(rule.kind(), &basis, &self.config)?;

            if amount.to_minor_units() <= 0 {
                debug!(rule = %rule.id(), "rule computed to zero");
                continue;
            }

            candidates.push(Candidate {
                position,
                rule,
                basis,
                amount,
            });
        }

        let applied: Vec<AppliedDiscount<'a>> = stacking::resolve(candidates)
            .into_iter()
            .map(|candidate| AppliedDiscount::new(candidate.rule, candidate.basis, candidate.amount))
            .collect();

        let uncapped_minor = applied
            .iter()
            .try_fold(0i64, |acc, discount| {
                acc.checked_add(discount.amount().to_minor_units())
            })
            .ok_or(EvaluationError::Overflow)?;

        let total_minor = uncapped_minor.min(subtotal.to_minor_units());

        if total_minor < uncapped_minor {
            info!(
                uncapped = uncapped_minor,
                subtotal = subtotal.to_minor_units(),
                "discount total capped at subtotal"
            );
        }

        let breakdown = DiscountBreakdown::new(
            applied,
            subtotal,
            Money::from_minor(total_minor, order.currency()),
            Money::from_minor(uncapped_minor, order.currency()),
        );

        debug!(
            total = %breakdown.total(),
            applied = breakdown.applied_count(),
            "evaluation complete"
        );

        Ok(breakdown)
    }

    /// Evaluate `rules` against `order` at the time the snapshot was taken.
    ///
    /// # Errors
    ///
    /// See [`Evaluator::evaluate`].
    pub fn evaluate_snapshot<'a>(
        &self,
        order: &OrderSnapshot<'a>,
        rules: &[DiscountRule<'a>],
    ) -> Result<DiscountBreakdown<'a>, EvaluationError> {
        self.evaluate(order, rules, order.evaluated_at())
    }
}

/// Evaluate with the default configuration (2 places, half-up).
///
/// # Errors
///
/// See [`Evaluator::evaluate`].
pub fn evaluate<'a>(
    order: &OrderSnapshot<'a>,
    rules: &[DiscountRule<'a>],
    now: Timestamp,
) -> Result<DiscountBreakdown<'a>, EvaluationError> {
    Evaluator::default().evaluate(order, rules, now)
}
