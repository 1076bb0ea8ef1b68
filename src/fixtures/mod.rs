//! Fixtures

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    fixtures::{orders::OrdersFixture, products::ProductsFixture, rules::RulesFixture},
    ids::VariantId,
    orders::{OrderError, OrderLine, OrderSnapshot},
    rules::DiscountRule,
};

pub mod orders;
pub mod products;
pub mod rules;

pub use products::Product;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Order not found
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Order fixture produced an invalid snapshot
    #[error("Invalid order {0}: {1}")]
    Order(String, OrderError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Variant key -> product
    products: FxHashMap<String, Product<'a>>,

    /// Order key -> snapshot
    orders: FxHashMap<String, OrderSnapshot<'a>>,

    /// Rules, in fixture order
    rules: Vec<DiscountRule<'a>>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: FxHashMap::default(),
            orders: FxHashMap::default(),
            rules: Vec::new(),
            currency: None,
        }
    }

    fn read(&self, kind: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(kind).join(format!("{name}.yml"));

        Ok(fs::read_to_string(&file_path)?)
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = serde_norway::from_str(&self.read("products", name)?)?;

        for (key, product_fixture) in fixture.products {
            let (_, currency) = products::parse_price(&product_fixture.price)?;
            let product: Product<'a> = product_fixture.try_into()?;

            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            self.products.insert(key, product);
        }

        Ok(self)
    }

    /// Load orders from a YAML fixture file
    ///
    /// Lines reference products by key, so products must be loaded first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a referenced product
    /// doesn't exist, or an order is not a valid snapshot.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let currency = self.currency()?;
        let fixture: OrdersFixture = serde_norway::from_str(&self.read("orders", name)?)?;

        for (key, order_fixture) in fixture.orders {
            let lines = order_fixture
                .lines
                .iter()
                .map(|line| {
                    let product = self.product(&line.product)?;

                    Ok(OrderLine::new(
                        VariantId::new(line.product.as_str()),
                        product.categories.clone(),
                        line.quantity,
                        product.price,
                    ))
                })
                .collect::<Result<Vec<_>, FixtureError>>()?;

            let order = OrderSnapshot::with_lines(lines, currency, order_fixture.evaluated_at)
                .map_err(|err| FixtureError::Order(key.clone(), err))?
                .loyalty_member(order_fixture.loyalty_member);

            self.orders.insert(key, order);
        }

        Ok(self)
    }

    /// Load rules from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a value is malformed.
    pub fn load_rules(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: RulesFixture = serde_norway::from_str(&self.read("rules", name)?)?;

        for rule_fixture in fixture.rules {
            self.rules.push(rule_fixture.try_into()?);
        }

        Ok(self)
    }

    /// Load a complete fixture set (products, orders, and rules with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_orders(name)?
            .load_rules(name)?;

        Ok(fixture)
    }

    /// Get a product by its variant key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product<'a>, FixtureError> {
        self.products
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get an order snapshot by its key
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found.
    pub fn order(&self, key: &str) -> Result<&OrderSnapshot<'a>, FixtureError> {
        self.orders
            .get(key)
            .ok_or_else(|| FixtureError::OrderNotFound(key.to_string()))
    }

    /// Get all rules, in fixture order
    pub fn rules(&self) -> &[DiscountRule<'a>] {
        &self.rules
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
