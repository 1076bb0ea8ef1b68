//! Evaluator Configuration
//!
//! Currency precision and rounding, passed explicitly to the evaluator.

use std::{fs, path::Path};

use rust_decimal::RoundingStrategy;
use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a config file
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Rounding precision finer than the currency's minor unit.
    #[error("precision of {precision} places exceeds {currency} minor unit of {exponent} places")]
    PrecisionExceedsCurrency {
        /// Configured precision
        precision: u32,
        /// Currency code
        currency: &'static str,
        /// Currency exponent
        exponent: u32,
    },
}

/// Rounding mode applied to each computed discount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Round half away from zero.
    #[default]
    HalfUp,

    /// Round half to even (banker's rounding).
    HalfEven,

    /// Truncate towards zero.
    Down,
}

impl From<Rounding> for RoundingStrategy {
    fn from(rounding: Rounding) -> Self {
        match rounding {
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
            Rounding::Down => RoundingStrategy::ToZero,
        }
    }
}

/// Evaluator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorConfig {
    /// Decimal places each discount amount is rounded to.
    pub precision: u32,

    /// Rounding mode.
    pub rounding: Rounding,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            rounding: Rounding::HalfUp,
        }
    }
}

impl EvaluatorConfig {
    /// Parse a configuration from YAML. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the document is not valid configuration.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Check the precision can be represented in `currency` minor units.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PrecisionExceedsCurrency`] if it cannot.
    pub fn check_currency(&self, currency: &Currency) -> Result<(), ConfigError> {
        if self.precision > currency.exponent {
            return Err(ConfigError::PrecisionExceedsCurrency {
                precision: self.precision,
                currency: currency.iso_alpha_code,
                exponent: currency.exponent,
            });
        }

        Ok(())
    }

    /// Rounding strategy for `rust_decimal`.
    pub fn strategy(&self) -> RoundingStrategy {
        self.rounding.into()
    }
}
