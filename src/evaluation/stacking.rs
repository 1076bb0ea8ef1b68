//! Stacking Resolution

use std::cmp::Ordering;

use tracing::debug;

use super::Candidate;

/// Keep every stackable candidate plus the single best non-stackable one.
///
/// The best non-stackable candidate has the largest amount; ties go to the
/// earliest created rule, then to the rule supplied first. The result is in
/// the order the rules were supplied.
pub(crate) fn resolve<'r, 'a>(candidates: Vec<Candidate<'r, 'a>>) -> Vec<Candidate<'r, 'a>> {
    let (mut kept, exclusive): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|candidate| candidate.rule.is_stackable());

    let dropped = exclusive.len().saturating_sub(1);

    if let Some(best) = exclusive.into_iter().min_by(compare_exclusive) {
        debug!(
            rule = %best.rule.id(),
            amount = %best.amount,
            dropped,
            "selected non-stackable discount"
        );

        kept.push(best);
    }

    kept.sort_by_key(|candidate| candidate.position);
    kept
}

/// Order non-stackable candidates best first.
fn compare_exclusive(a: &Candidate<'_, '_>, b: &Candidate<'_, '_>) -> Ordering {
    b.amount
        .to_minor_units()
        .cmp(&a.amount.to_minor_units())
        .then_with(|| a.rule.created_at().cmp(&b.rule.created_at()))
        .then_with(|| a.position.cmp(&b.position))
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan};
    use rust_decimal::Decimal;
    use rusty_money::{Money, iso::INR};
    use testresult::TestResult;

    use crate::rules::{DiscountKind, DiscountRule, DiscountScope};

    use super::*;

    fn rule(id: &str, stackable: bool, created_at: Timestamp) -> DiscountRule<'static> {
        DiscountRule::new(
            id,
            DiscountScope::Order,
            DiscountKind::percent(Decimal::TEN),
            Timestamp::UNIX_EPOCH,
        )
        .stackable(stackable)
        .with_created_at(created_at)
    }

    fn candidate<'r>(
        position: usize,
        rule: &'r DiscountRule<'static>,
        minor: i64,
    ) -> Candidate<'r, 'static> {
        Candidate {
            position,
            rule,
            basis: Money::from_minor(100_000, INR),
            amount: Money::from_minor(minor, INR),
        }
    }

    fn ids(candidates: &[Candidate<'_, '_>]) -> Vec<String> {
        candidates
            .iter()
            .map(|candidate| candidate.rule.id().to_string())
            .collect()
    }

    #[test]
    fn largest_non_stackable_wins() {
        let epoch = Timestamp::UNIX_EPOCH;
        let a = rule("a", false, epoch);
        let b = rule("b", false, epoch);

        let kept = resolve(vec![candidate(0, &a, 10_000), candidate(1, &b, 12_000)]);

        assert_eq!(ids(&kept), vec!["b"]);
    }

    #[test]
    fn stackable_rules_are_all_kept() {
        let epoch = Timestamp::UNIX_EPOCH;
        let a = rule("a", true, epoch);
        let b = rule("b", false, epoch);
        let c = rule("c", true, epoch);

        let kept = resolve(vec![
            candidate(0, &a, 1_000),
            candidate(1, &b, 500),
            candidate(2, &c, 2_000),
        ]);

        assert_eq!(ids(&kept), vec!["a", "b", "c"]);
    }

    #[test]
    fn ties_go_to_earliest_created() -> TestResult {
        let epoch = Timestamp::UNIX_EPOCH;
        let older = rule("older", false, epoch);
        let newer = rule("newer", false, epoch.checked_add(1.hour())?);

        let kept = resolve(vec![candidate(0, &newer, 5_000), candidate(1, &older, 5_000)]);

        assert_eq!(ids(&kept), vec!["older"]);

        Ok(())
    }

    #[test]
    fn full_ties_go_to_first_supplied() {
        let epoch = Timestamp::UNIX_EPOCH;
        let first = rule("first", false, epoch);
        let second = rule("second", false, epoch);

        let kept = resolve(vec![candidate(0, &first, 5_000), candidate(1, &second, 5_000)]);

        assert_eq!(ids(&kept), vec!["first"]);
    }

    #[test]
    fn no_candidates() {
        assert!(resolve(Vec::new()).is_empty());
    }
}
