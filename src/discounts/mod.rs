//! Discounts
//!
//! Computes the amount a single rule takes off its basis.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    config::{ConfigError, EvaluatorConfig},
    rules::DiscountKind,
};

/// Errors specific to discount calculations.
#[derive(Debug, Error)]
pub enum DiscountError {
    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Fixed discount currency differs from the basis currency (discount, basis).
    #[error("discount has currency {0}, but basis has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Configuration does not fit the basis currency.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Calculate the discount `kind` takes off `basis`.
///
/// Fixed amounts are capped at the basis and never negative. Percentages are
/// taken of the basis. The result is rounded once, to `config.precision` places.
///
/// # Errors
///
/// Returns a [`DiscountError`] if:
/// - the configured precision is finer than the basis currency allows,
/// - a fixed amount is in a different currency to the basis,
/// - the calculation overflows.
pub fn calculate_discount<'a>(
    kind: &DiscountKind<'a>,
    basis: &Money<'a, Currency>,
    config: &EvaluatorConfig,
) -> Result<Money<'a, Currency>, DiscountError> {
    let currency = basis.currency();

    config.check_currency(currency)?;

    let basis_minor = basis.to_minor_units().max(0);
    let basis_major = minor_to_decimal(basis_minor, currency);

    let raw = match kind {
        DiscountKind::Fixed(amount) => {
            if amount.currency() != currency {
                return Err(DiscountError::CurrencyMismatch(
                    amount.currency().iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            minor_to_decimal(amount.to_minor_units().clamp(0, basis_minor), currency)
        }
        DiscountKind::Percentage(percent) => {
            // decimal_percentage only exposes its value through multiplication
            let fraction = (*percent) * Decimal::ONE;

            // Overflow is always far beyond the basis
            fraction
                .checked_mul(basis_major)
                .unwrap_or(if fraction.is_sign_negative() {
                    Decimal::ZERO
                } else {
                    basis_major
                })
                .clamp(Decimal::ZERO, basis_major)
        }
    };

    let minor = round_to_minor(raw, currency, config)?;

    Ok(Money::from_minor(minor.clamp(0, basis_minor), currency))
}

fn minor_to_decimal(minor: i64, currency: &Currency) -> Decimal {
    Decimal::new(minor, currency.exponent)
}

/// Round a major-unit amount to the configured precision and convert it to minor units.
fn round_to_minor(
    amount: Decimal,
    currency: &Currency,
    config: &EvaluatorConfig,
) -> Result<i64, DiscountError> {
    let mut rounded = amount.round_dp_with_strategy(config.precision, config.strategy());

    rounded.rescale(currency.exponent);

    i64::try_from(rounded.mantissa()).map_err(|_err| DiscountError::PercentConversion)
}
