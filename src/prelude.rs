//! Rebate prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    breakdown::{AppliedDiscount, AuditMetadata, BreakdownView, DiscountBreakdown, ScopeDistribution},
    categories::CategorySet,
    config::{ConfigError, EvaluatorConfig, Rounding},
    discounts::{DiscountError, calculate_discount},
    evaluation::{EvaluationError, Evaluator, Ineligible, evaluate},
    ids::{CategoryId, RuleId, VariantId},
    orders::{OrderError, OrderLine, OrderSnapshot},
    rules::{
        DiscountKind, DiscountRule, DiscountScope, RuleTarget, RuleValidationError, currently_valid,
    },
};
