//! Order Fixtures

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Wrapper for orders in YAML
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Map of order key -> order fixture
    pub orders: FxHashMap<String, OrderFixture>,
}

/// Order Fixture
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Whether the customer is a loyalty member
    #[serde(default)]
    pub loyalty_member: bool,

    /// When the snapshot was taken
    pub evaluated_at: Timestamp,

    /// Order lines, in order
    pub lines: Vec<LineFixture>,
}

/// Order Line Fixture
#[derive(Debug, Deserialize)]
pub struct LineFixture {
    /// Product (variant) key
    pub product: String,

    /// Quantity
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}
