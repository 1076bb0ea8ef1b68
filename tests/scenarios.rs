//! Checkout scenarios driven by the `checkout` fixture set.

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, INR},
};
use testresult::TestResult;

use rebate::{
    categories::CategorySet,
    config::{EvaluatorConfig, Rounding},
    evaluation::{Evaluator, evaluate},
    fixtures::Fixture,
    orders::OrderSnapshot,
    rules::{DiscountKind, DiscountRule, DiscountScope, currently_valid},
};

fn inr(minor: i64) -> Money<'static, Currency> {
    Money::from_minor(minor, INR)
}

/// Checkout products and orders with the named rule set.
fn fixture(rules: &str) -> TestResult<Fixture<'static>> {
    let mut fixture = Fixture::new();

    fixture
        .load_products("checkout")?
        .load_orders("checkout")?
        .load_rules(rules)?;

    Ok(fixture)
}

fn applied_ids(fixture: &Fixture<'static>, order: &str) -> TestResult<Vec<String>> {
    let order = fixture.order(order)?;
    let breakdown = evaluate(order, fixture.rules(), order.evaluated_at())?;

    Ok(breakdown
        .applied()
        .map(|discount| discount.rule_id().to_string())
        .collect())
}

#[test]
fn stackable_order_and_category_discounts() -> TestResult {
    let fixture = fixture("festival")?;
    let order = fixture.order("festival")?;

    assert_eq!(order.subtotal()?, inr(150_000));

    let breakdown = evaluate(order, fixture.rules(), order.evaluated_at())?;

    assert_eq!(breakdown.total(), &inr(20_000));
    assert_eq!(breakdown.applied_count(), 2);
    assert_eq!(breakdown.distribution().len(), 2);

    let view = serde_json::to_value(breakdown.view())?;

    assert_eq!(
        view,
        serde_json::json!({
            "total_discount": "200.00",
            "applied_count": 2,
            "distribution": [
                {
                    "scope": "order",
                    "scope_display": "Order",
                    "total_amount": "150.00",
                    "discount_count": 1,
                    "discounts": [{ "rule_name": "10% off over ₹500", "amount": "150.00" }]
                },
                {
                    "scope": "category",
                    "scope_display": "Category",
                    "total_amount": "50.00",
                    "discount_count": 1,
                    "discounts": [{ "rule_name": "15% off Electronics", "amount": "50.00" }]
                }
            ]
        })
    );

    Ok(())
}

#[test]
fn only_the_largest_non_stackable_discount_applies() -> TestResult {
    let fixture = fixture("exclusive")?;
    let order = fixture.order("festival")?;

    let breakdown = evaluate(order, fixture.rules(), order.evaluated_at())?;

    assert_eq!(applied_ids(&fixture, "festival")?, vec!["hundred-twenty"]);
    assert_eq!(breakdown.total(), &inr(12_000));

    Ok(())
}

#[test]
fn minimum_quantity_on_a_variant() -> TestResult {
    let fixture = fixture("bulk")?;

    assert!(applied_ids(&fixture, "single-headphones")?.is_empty());

    let order = fixture.order("pair-of-headphones")?;
    let breakdown = evaluate(order, fixture.rules(), order.evaluated_at())?;

    // 20% of 666.66
    assert_eq!(breakdown.total(), &inr(13_333));

    Ok(())
}

#[test]
fn full_rule_catalog() -> TestResult {
    let fixture = fixture("checkout")?;

    assert_eq!(
        applied_ids(&fixture, "festival")?,
        vec!["order10", "flat100", "electronics15"]
    );

    let order = fixture.order("festival")?;
    let breakdown = evaluate(order, fixture.rules(), order.evaluated_at())?;

    assert_eq!(breakdown.total(), &inr(30_000));
    assert_eq!(breakdown.payable(), inr(120_000));

    Ok(())
}

#[test]
fn loyalty_members_get_the_loyalty_reward() -> TestResult {
    let fixture = fixture("checkout")?;

    assert_eq!(
        applied_ids(&fixture, "loyal")?,
        vec!["loyal12", "order10", "electronics15"]
    );

    let order = fixture.order("loyal")?;
    let breakdown = evaluate(order, fixture.rules(), order.evaluated_at())?;

    assert_eq!(breakdown.total(), &inr(38_000));

    Ok(())
}

#[test]
fn validity_windows_are_respected() -> TestResult {
    let fixture = fixture("checkout")?;
    let order = fixture.order("festival")?;

    let november: Timestamp = "2025-11-05T10:00:00Z".parse()?;
    let breakdown = evaluate(order, fixture.rules(), november)?;

    assert_eq!(breakdown.total(), &inr(15_000));
    assert!(breakdown.applied().all(|discount| discount.rule_id().as_str() != "order10"));

    let september: Timestamp = "2025-09-15T10:00:00Z".parse()?;
    let breakdown = evaluate(order, fixture.rules(), september)?;

    assert_eq!(breakdown.applied_count(), 0);
    assert_eq!(breakdown.total(), &inr(0));

    Ok(())
}

#[test]
fn currently_valid_lists_live_rules() -> TestResult {
    let fixture = fixture("checkout")?;
    let now: Timestamp = "2025-10-20T10:00:00Z".parse()?;

    let live: Vec<&str> = currently_valid(fixture.rules(), now)
        .map(|rule| rule.id().as_str())
        .collect();

    assert_eq!(
        live,
        vec![
            "order10",
            "electronics15",
            "flat100",
            "loyal12",
            "headphones-pair",
            "misconfigured"
        ]
    );

    Ok(())
}

#[test]
fn misconfigured_rules_fail_validation_but_not_evaluation() -> TestResult {
    let fixture = fixture("checkout")?;

    let invalid: Vec<&str> = fixture
        .rules()
        .iter()
        .filter(|rule| rule.validate().is_err())
        .map(|rule| rule.id().as_str())
        .collect();

    assert_eq!(invalid, vec!["misconfigured"]);
    assert!(!applied_ids(&fixture, "festival")?.contains(&"misconfigured".to_string()));

    Ok(())
}

#[test]
fn orders_below_every_minimum_get_nothing() -> TestResult {
    let fixture = fixture("checkout")?;
    let order = fixture.order("stationery")?;

    let breakdown = evaluate(order, fixture.rules(), order.evaluated_at())?;

    assert_eq!(breakdown.applied_count(), 0);
    assert_eq!(breakdown.payable(), inr(36_150));

    Ok(())
}

#[test]
fn total_is_capped_at_subtotal() -> TestResult {
    let fixture = fixture("checkout")?;
    let order: &OrderSnapshot<'static> = fixture.order("small")?;
    let now = order.evaluated_at();

    let rules = [
        DiscountRule::new(
            "flat300",
            DiscountScope::Order,
            DiscountKind::fixed(inr(30_000)),
            now,
        )
        .stackable(true),
        DiscountRule::new(
            "kitchen10",
            DiscountScope::Category,
            DiscountKind::percent(Decimal::TEN),
            now,
        )
        .with_categories(CategorySet::from_strs(&["kitchen"]))
        .stackable(true),
    ];

    let breakdown = evaluate(order, &rules, now)?;

    // Fixed amount is capped at the ₹250 basis, then 10% adds ₹25
    assert_eq!(breakdown.uncapped_total(), &inr(27_500));
    assert_eq!(breakdown.total(), &inr(25_000));
    assert!(breakdown.is_capped());
    assert_eq!(breakdown.payable(), inr(0));

    // Per-rule amounts are reported as computed
    let amounts: Vec<i64> = breakdown
        .applied()
        .map(|discount| discount.amount().to_minor_units())
        .collect();

    assert_eq!(amounts, vec![25_000, 2_500]);

    Ok(())
}

#[test]
fn rounding_follows_configuration() -> TestResult {
    let fixture = fixture("festival")?;
    let order = fixture.order("festival")?;

    let config = EvaluatorConfig::from_yaml_str("precision: 2\nrounding: down\n")?;

    assert_eq!(config.rounding, Rounding::Down);

    let breakdown = Evaluator::new(config).evaluate_snapshot(order, fixture.rules())?;

    // 15% of 333.33 truncates to 49.99
    assert_eq!(breakdown.total(), &inr(19_999));

    Ok(())
}

#[test]
fn table_rendering() -> TestResult {
    let fixture = fixture("checkout")?;
    let order = fixture.order("festival")?;
    let breakdown = evaluate(order, fixture.rules(), order.evaluated_at())?;

    let mut out = Vec::new();

    breakdown.write_table(&mut out)?;

    let rendered = String::from_utf8(out)?;

    assert!(rendered.contains("15% off Electronics"));
    assert!(rendered.contains("Payable:"));

    Ok(())
}
