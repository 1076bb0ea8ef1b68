//! Rule Fixtures

use decimal_percentage::Percentage;
use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::Money;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, products::parse_price},
    ids::{CategoryId, VariantId},
    rules::{DiscountKind, DiscountRule, DiscountScope},
};

/// Wrapper for rules in YAML
#[derive(Debug, Deserialize)]
pub struct RulesFixture {
    /// Rules, in the order the catalog supplies them
    pub rules: Vec<RuleFixture>,
}

/// Discount type in YAML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindFixture {
    /// Fixed amount, value is a price (e.g., "150.00 INR")
    #[serde(alias = "fix")]
    Fixed,

    /// Percentage, value is "15%" or "0.15"
    Percentage,
}

/// Rule Fixture
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleFixture {
    /// Rule identifier
    pub id: String,

    /// Display name
    pub name: Option<String>,

    /// Scope
    pub scope: DiscountScope,

    /// Discount type
    pub kind: KindFixture,

    /// Discount value
    pub value: String,

    /// Minimum order subtotal (e.g., "500.00 INR")
    pub min_order_amount: Option<String>,

    /// Minimum quantity in scope
    pub min_quantity: Option<u32>,

    /// Target categories
    pub categories: Option<Vec<String>>,

    /// Target variant
    pub variant: Option<String>,

    /// Loyalty members only
    #[serde(default)]
    pub requires_loyalty: bool,

    /// Stacks with other stackable rules
    #[serde(default)]
    pub stackable: bool,

    /// Start of the validity window
    pub starts_at: Timestamp,

    /// End of the validity window
    pub ends_at: Option<Timestamp>,

    /// Whether the rule is switched on
    #[serde(default = "enabled")]
    pub active: bool,

    /// Creation time, defaults to `starts_at`
    pub created_at: Option<Timestamp>,
}

fn enabled() -> bool {
    true
}

impl TryFrom<RuleFixture> for DiscountRule<'_> {
    type Error = FixtureError;

    fn try_from(fixture: RuleFixture) -> Result<Self, Self::Error> {
        let kind = match fixture.kind {
            KindFixture::Fixed => {
                let (minor_units, currency) = parse_price(&fixture.value)?;

                DiscountKind::fixed(Money::from_minor(minor_units, currency))
            }
            KindFixture::Percentage => DiscountKind::Percentage(parse_percentage(&fixture.value)?),
        };

        let mut rule = DiscountRule::new(fixture.id, fixture.scope, kind, fixture.starts_at)
            .loyalty_only(fixture.requires_loyalty)
            .stackable(fixture.stackable)
            .active(fixture.active);

        if let Some(name) = fixture.name {
            rule = rule.named(name);
        }

        if let Some(amount) = fixture.min_order_amount {
            let (minor_units, currency) = parse_price(&amount)?;

            rule = rule.with_min_order_amount(Money::from_minor(minor_units, currency));
        }

        if let Some(quantity) = fixture.min_quantity {
            rule = rule.with_min_quantity(quantity);
        }

        if let Some(categories) = fixture.categories {
            rule = rule.with_categories(categories.into_iter().map(CategoryId::new).collect());
        }

        if let Some(variant) = fixture.variant {
            rule = rule.with_variant(VariantId::new(variant));
        }

        if let Some(ends_at) = fixture.ends_at {
            rule = rule.with_end(ends_at);
        }

        if let Some(created_at) = fixture.created_at {
            rule = rule.with_created_at(created_at);
        }

        Ok(rule)
    }
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// # Errors
///
/// Returns an error if the string is not a decimal, with or without a `%` suffix.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    let (number, scale) = match trimmed.strip_suffix('%') {
        Some(points) => (points.trim(), Decimal::ONE_HUNDRED),
        None => (trimmed, Decimal::ONE),
    };

    let value = number
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

    Ok(Percentage::from(value / scale))
}
