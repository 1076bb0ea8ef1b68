//! Discount Breakdown
//!
//! The result of an evaluation: which rules applied, how much each took off,
//! grouped by scope.

use std::{cmp::Reverse, io};

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::Serialize;
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::{
    ids::RuleId,
    rules::{DiscountRule, DiscountScope},
};

/// Rule details recorded against an applied discount for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditMetadata {
    /// Rule name at the time of evaluation.
    pub rule_name: Option<String>,

    /// `"fix"` or `"percentage"`.
    pub discount_type: &'static str,

    /// Configured value: major units for fixed discounts, points for percentages.
    pub discount_value: String,

    /// Whether the rule was stackable.
    pub is_stackable: bool,
}

/// A rule that contributed to the final discount.
#[derive(Debug, Clone)]
pub struct AppliedDiscount<'a> {
    rule_id: RuleId,
    scope: DiscountScope,
    amount: Money<'a, Currency>,
    basis: Money<'a, Currency>,
    metadata: AuditMetadata,
}

impl<'a> AppliedDiscount<'a> {
    pub(crate) fn new(
        rule: &DiscountRule<'a>,
        basis: Money<'a, Currency>,
        amount: Money<'a, Currency>,
    ) -> Self {
        Self {
            rule_id: rule.id().clone(),
            scope: rule.scope(),
            amount,
            basis,
            metadata: AuditMetadata {
                rule_name: rule.name().map(str::to_owned),
                discount_type: rule.kind().as_str(),
                discount_value: rule.kind().value().normalize().to_string(),
                is_stackable: rule.is_stackable(),
            },
        }
    }

    /// Identifier of the applied rule.
    pub fn rule_id(&self) -> &RuleId {
        &self.rule_id
    }

    /// Name of the applied rule, if it has one.
    pub fn rule_name(&self) -> Option<&str> {
        self.metadata.rule_name.as_deref()
    }

    /// Scope the rule applied at.
    pub fn scope(&self) -> DiscountScope {
        self.scope
    }

    /// Discount amount, rounded once.
    pub fn amount(&self) -> &Money<'a, Currency> {
        &self.amount
    }

    /// Amount the discount was computed against.
    pub fn basis(&self) -> &Money<'a, Currency> {
        &self.basis
    }

    /// Audit metadata.
    pub fn metadata(&self) -> &AuditMetadata {
        &self.metadata
    }
}

/// Applied discounts for a single scope.
#[derive(Debug, Clone)]
pub struct ScopeDistribution<'a> {
    scope: DiscountScope,
    total: Money<'a, Currency>,
    discounts: Vec<AppliedDiscount<'a>>,
}

impl<'a> ScopeDistribution<'a> {
    /// Scope of this group.
    pub fn scope(&self) -> DiscountScope {
        self.scope
    }

    /// Sum of the group's discounts.
    pub fn total(&self) -> &Money<'a, Currency> {
        &self.total
    }

    /// Number of discounts in the group.
    pub fn count(&self) -> usize {
        self.discounts.len()
    }

    /// Discounts in the group, largest first.
    pub fn discounts(&self) -> &[AppliedDiscount<'a>] {
        &self.discounts
    }
}

/// Evaluation result.
#[derive(Debug, Clone)]
pub struct DiscountBreakdown<'a> {
    distribution: SmallVec<[ScopeDistribution<'a>; 3]>,
    subtotal: Money<'a, Currency>,
    total: Money<'a, Currency>,
    uncapped_total: Money<'a, Currency>,
}

impl<'a> DiscountBreakdown<'a> {
    /// Group `applied` by scope.
    ///
    /// `total` is the capped total; `uncapped_total` the plain sum of `applied`.
    pub(crate) fn new(
        mut applied: Vec<AppliedDiscount<'a>>,
        subtotal: Money<'a, Currency>,
        total: Money<'a, Currency>,
        uncapped_total: Money<'a, Currency>,
    ) -> Self {
        let currency = subtotal.currency();

        // Stable, so equal amounts keep evaluation order
        applied.sort_by_key(|discount| (discount.scope, Reverse(discount.amount.to_minor_units())));

        let mut distribution: SmallVec<[ScopeDistribution<'a>; 3]> = SmallVec::new();

        for discount in applied {
            if let Some(group) = distribution
                .last_mut()
                .filter(|group| group.scope == discount.scope)
            {
                group.discounts.push(discount);
            } else {
                distribution.push(ScopeDistribution {
                    scope: discount.scope,
                    total: Money::from_minor(0, currency),
                    discounts: vec![discount],
                });
            }
        }

        for group in &mut distribution {
            let total_minor = group
                .discounts
                .iter()
                .map(|discount| discount.amount.to_minor_units())
                .sum();

            group.total = Money::from_minor(total_minor, currency);
        }

        Self {
            distribution,
            subtotal,
            total,
            uncapped_total,
        }
    }

    /// Total discount, never more than the subtotal.
    pub fn total(&self) -> &Money<'a, Currency> {
        &self.total
    }

    /// Sum of applied discounts before the subtotal cap.
    pub fn uncapped_total(&self) -> &Money<'a, Currency> {
        &self.uncapped_total
    }

    /// Whether the total was clamped to the subtotal.
    pub fn is_capped(&self) -> bool {
        self.total.to_minor_units() < self.uncapped_total.to_minor_units()
    }

    /// Order subtotal the discounts were evaluated against.
    pub fn subtotal(&self) -> &Money<'a, Currency> {
        &self.subtotal
    }

    /// Subtotal less the total discount.
    pub fn payable(&self) -> Money<'a, Currency> {
        let minor = self.subtotal.to_minor_units() - self.total.to_minor_units();

        Money::from_minor(minor.max(0), self.subtotal.currency())
    }

    /// Number of applied discounts.
    pub fn applied_count(&self) -> usize {
        self.distribution.iter().map(ScopeDistribution::count).sum()
    }

    /// Scope groups, in order, item scope last. Empty scopes are omitted.
    pub fn distribution(&self) -> &[ScopeDistribution<'a>] {
        &self.distribution
    }

    /// Every applied discount, grouped by scope.
    pub fn applied(&self) -> impl Iterator<Item = &AppliedDiscount<'a>> {
        self.distribution
            .iter()
            .flat_map(|group| group.discounts.iter())
    }

    /// Serialisable display view.
    pub fn view(&self) -> BreakdownView {
        BreakdownView {
            total_discount: decimal_string(&self.total),
            applied_count: self.applied_count(),
            distribution: self
                .distribution
                .iter()
                .map(|group| ScopeView {
                    scope: group.scope,
                    scope_display: group.scope.display_name(),
                    total_amount: decimal_string(&group.total),
                    discount_count: group.count(),
                    discounts: group
                        .discounts
                        .iter()
                        .map(|discount| DiscountView {
                            rule_name: discount.rule_name().unwrap_or("Unknown").to_owned(),
                            amount: decimal_string(&discount.amount),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Render the breakdown as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_table(&self, out: &mut impl io::Write) -> io::Result<()> {
        let mut builder = Builder::default();
        let mut group_boundaries: SmallVec<[usize; 3]> = SmallVec::new();

        builder.push_record(["Scope", "Rule", "Basis", "Discount"]);

        let mut row = 1;

        for group in &self.distribution {
            group_boundaries.push(row);

            for discount in &group.discounts {
                builder.push_record([
                    group.scope.display_name().to_string(),
                    discount
                        .rule_name()
                        .map_or_else(|| discount.rule_id.to_string(), str::to_owned),
                    discount.basis.to_string(),
                    discount.amount.to_string(),
                ]);

                row += 1;
            }
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());
        let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

        theme.remove_horizontal_lines();

        for &boundary in &group_boundaries {
            theme.insert_horizontal_line(boundary, separator);
        }

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..4), Alignment::right());

        writeln!(out, "\n{table}")?;

        let discount = if self.is_capped() {
            format!("{} (capped from {})", self.total, self.uncapped_total)
        } else {
            self.total.to_string()
        };

        writeln!(out, " Subtotal: {}", self.subtotal)?;
        writeln!(out, " Discount: {discount}")?;
        writeln!(out, " Payable:  {}", self.payable())?;

        writeln!(out)
    }
}

/// Display shape of a [`DiscountBreakdown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownView {
    /// Total discount, as a decimal string.
    pub total_discount: String,

    /// Number of applied discounts.
    pub applied_count: usize,

    /// Scope groups.
    pub distribution: Vec<ScopeView>,
}

/// Display shape of a [`ScopeDistribution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeView {
    /// Scope machine name.
    pub scope: DiscountScope,

    /// Scope display name.
    pub scope_display: &'static str,

    /// Group total, as a decimal string.
    pub total_amount: String,

    /// Number of discounts in the group.
    pub discount_count: usize,

    /// Discounts, largest first.
    pub discounts: Vec<DiscountView>,
}

/// Display shape of an [`AppliedDiscount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscountView {
    /// Rule name, `"Unknown"` when unnamed.
    pub rule_name: String,

    /// Amount, as a decimal string.
    pub amount: String,
}

fn decimal_string(money: &Money<'_, Currency>) -> String {
    Decimal::new(money.to_minor_units(), money.currency().exponent).to_string()
}
