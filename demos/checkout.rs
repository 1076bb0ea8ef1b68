//! Checkout Example
//!
//! Evaluates one order from a fixture set against the set's discount rules and
//! prints the breakdown.
//!
//! Use `-f` to load a fixture set by name
//! Use `-o` to pick the order to evaluate
//! Use `-c` to load an evaluator configuration file
//! Use `--json` to also print the display view

use std::{io, time::Instant};

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rebate::{
    config::EvaluatorConfig,
    evaluation::Evaluator,
    fixtures::Fixture,
    rules::currently_valid,
    utils::{ExampleCheckoutArgs, LogFormat},
};

/// Checkout Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = ExampleCheckoutArgs::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_err| EnvFilter::new("info"));

    match args.log_format {
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(filter)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }

    let config = match args.config.as_deref() {
        Some(path) => EvaluatorConfig::load(path)?,
        None => EvaluatorConfig::default(),
    };

    let fixture = Fixture::from_set(&args.fixture)?;
    let order = fixture.order(&args.order)?;
    let now = args.at.unwrap_or_else(|| order.evaluated_at());

    let live = currently_valid(fixture.rules(), now).count();

    info!(
        fixture = %args.fixture,
        order = %args.order,
        rules = fixture.rules().len(),
        live,
        "evaluating order"
    );

    let start = Instant::now();
    let breakdown = Evaluator::new(config).evaluate(order, fixture.rules(), now)?;
    let elapsed = start.elapsed().as_secs_f32();

    for line in order.iter() {
        let variant = line.variant().as_str();
        let name = fixture
            .product(variant)
            .map_or(variant, |product| product.name.as_str());

        println!("{name} x{} @ {}", line.quantity(), line.unit_price());
    }

    println!();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    breakdown.write_table(&mut handle)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown.view())?);
    }

    println!("\nEvaluated in {elapsed}s");

    Ok(())
}
