//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, INR, USD},
};
use serde::Deserialize;

use crate::{categories::CategorySet, fixtures::FixtureError};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of variant key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Categories the product belongs to
    #[serde(default)]
    pub categories: Vec<String>,

    /// Unit price (e.g., "333.33 INR")
    pub price: String,
}

/// A catalog product loaded from a fixture.
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product name
    pub name: String,

    /// Category memberships
    pub categories: CategorySet,

    /// Unit price
    pub price: Money<'a, Currency>,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        let category_refs: Vec<&str> = fixture.categories.iter().map(String::as_str).collect();

        Ok(Product {
            name: fixture.name,
            categories: CategorySet::from_strs(&category_refs),
            price: Money::from_minor(minor_units, currency),
        })
    }
}

/// Parse price string (e.g., "1500.00 INR") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a decimal with at most the currency's minor-unit
/// precision, or if the currency code is not recognised.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = match currency_code {
        "INR" => INR,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.scale() > currency.exponent {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::from(10_i64.pow(currency.exponent)))
        .and_then(|value| value.to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("2.99INR");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));

        let result = parse_price("2.99 INR extra");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_rejects_sub_minor_precision() {
        let result = parse_price("333.333 INR");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_accepts_supported_currencies() -> Result<(), FixtureError> {
        let (inr_minor, inr) = parse_price("333.33 INR")?;
        let (usd_minor, usd) = parse_price("1 USD")?;
        let (eur_minor, eur) = parse_price("2.5 EUR")?;

        assert_eq!(inr_minor, 33_333);
        assert_eq!(inr, INR);
        assert_eq!(usd_minor, 100);
        assert_eq!(usd, USD);
        assert_eq!(eur_minor, 250);
        assert_eq!(eur, EUR);

        Ok(())
    }

    #[test]
    fn product_fixture_converts() -> Result<(), FixtureError> {
        let product = Product::try_from(ProductFixture {
            name: "Headphones".to_string(),
            categories: vec!["electronics".to_string(), "audio".to_string()],
            price: "333.33 INR".to_string(),
        })?;

        assert_eq!(product.name, "Headphones");
        assert_eq!(product.categories.len(), 2);
        assert_eq!(product.price, Money::from_minor(33_333, INR));

        Ok(())
    }
}
