//! Rebate
//!
//! Rebate evaluates an order snapshot against a catalog of discount rules and
//! reports which rules applied, how much each took off, and the capped total.
//!
//! ```
//! use jiff::Timestamp;
//! use rust_decimal::Decimal;
//! use rusty_money::{Money, iso::INR};
//! use rebate::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let now: Timestamp = "2025-10-20T10:00:00Z".parse()?;
//!
//! let order = OrderSnapshot::with_lines(
//!     [OrderLine::new(
//!         VariantId::from("kettle"),
//!         CategorySet::from_strs(&["kitchen"]),
//!         2,
//!         Money::from_minor(75_000, INR),
//!     )],
//!     INR,
//!     now,
//! )?;
//!
//! let rules = [DiscountRule::new(
//!     "order10",
//!     DiscountScope::Order,
//!     DiscountKind::percent(Decimal::TEN),
//!     now,
//! )];
//!
//! let breakdown = evaluate(&order, &rules, now)?;
//!
//! assert_eq!(breakdown.total(), &Money::from_minor(15_000, INR));
//! # Ok(())
//! # }
//! ```

pub mod breakdown;
pub mod categories;
pub mod config;
pub mod discounts;
pub mod evaluation;
pub mod fixtures;
pub mod ids;
pub mod orders;
pub mod prelude;
pub mod rules;
pub mod utils;
