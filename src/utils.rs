//! Utils

use clap::{Parser, ValueEnum};

/// Log output format for the demos
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable lines
    #[default]
    Compact,

    /// One JSON object per event
    Json,
}

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct ExampleCheckoutArgs {
    /// Fixture set to use for products, orders and rules
    #[arg(short, long, default_value = "checkout")]
    pub fixture: String,

    /// Order to evaluate from the fixture set
    #[arg(short, long, default_value = "festival")]
    pub order: String,

    /// Evaluator configuration file (YAML); defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    /// Evaluate at this instant instead of the order's snapshot time
    #[arg(long)]
    pub at: Option<jiff::Timestamp>,

    /// Print the display view as JSON after the table
    #[arg(long)]
    pub json: bool,

    /// Log filter
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t)]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn checkout_args_defaults() -> TestResult {
        let args = ExampleCheckoutArgs::try_parse_from(["checkout"])?;

        assert_eq!(args.fixture, "checkout");
        assert_eq!(args.order, "festival");
        assert!(args.config.is_none());
        assert!(!args.json);

        Ok(())
    }

    #[test]
    fn checkout_args_parse_overrides() -> TestResult {
        let args = ExampleCheckoutArgs::try_parse_from([
            "checkout",
            "--order",
            "loyal",
            "--at",
            "2025-10-21T00:00:00Z",
            "--log-format",
            "json",
            "--json",
        ])?;

        assert_eq!(args.order, "loyal");
        assert_eq!(args.at, Some("2025-10-21T00:00:00Z".parse()?));
        assert_eq!(args.log_format, LogFormat::Json);
        assert!(args.json);

        Ok(())
    }
}
