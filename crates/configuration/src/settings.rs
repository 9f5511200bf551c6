use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional; a missing section falls back to its `Default`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetSettings,
    pub report: ReportSettings,
    pub currency: CurrencySettings,
    pub logging: LoggingSettings,
}

/// Where the order dataset lives and how strictly it is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// Path to the delimited order-item file.
    pub path: PathBuf,
    /// Field delimiter. Must be a single ASCII character.
    pub delimiter: String,
    /// Abort the load on the first row that violates the schema instead of skipping it.
    pub strict: bool,
}

/// Controls for the aggregated report.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// How many categories the top and bottom rankings show.
    pub top_n: usize,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Localized currency conventions used for the revenue headline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CurrencySettings {
    /// ISO 4217 code, shown in JSON output.
    pub code: String,
    pub symbol: String,
    pub grouping_separator: String,
    pub decimal_separator: String,
    pub fraction_digits: u32,
    pub space_after_symbol: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is not set (e.g. "info").
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---
// This allows a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("all_data.csv"),
            delimiter: ",".to_string(),
            strict: false,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_n: 10,
            format: OutputFormat::Table,
        }
    }
}

impl Default for CurrencySettings {
    // Indonesian Rupiah, id_ID conventions.
    fn default() -> Self {
        Self {
            code: "IDR".to_string(),
            symbol: "Rp".to_string(),
            grouping_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            fraction_digits: 2,
            space_after_symbol: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl DatasetSettings {
    /// The delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(ConfigError::ValidationError(format!(
                "dataset.delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ))),
        }
    }
}

impl Config {
    /// Checks the cross-field rules that deserialization alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dataset.delimiter_byte()?;

        if self.report.top_n == 0 {
            return Err(ConfigError::ValidationError(
                "report.top_n must be at least 1".to_string(),
            ));
        }

        let currency = &self.currency;
        if currency.symbol.is_empty() {
            return Err(ConfigError::ValidationError(
                "currency.symbol must not be empty".to_string(),
            ));
        }
        if currency.decimal_separator.is_empty() {
            return Err(ConfigError::ValidationError(
                "currency.decimal_separator must not be empty".to_string(),
            ));
        }
        if currency.grouping_separator == currency.decimal_separator {
            return Err(ConfigError::ValidationError(
                "currency grouping and decimal separators must differ".to_string(),
            ));
        }
        if currency.fraction_digits > 8 {
            return Err(ConfigError::ValidationError(format!(
                "currency.fraction_digits must be at most 8, got {}",
                currency.fraction_digits
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.report.top_n, 10);
        assert_eq!(config.currency.code, "IDR");
        assert_eq!(config.dataset.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn test_zero_top_n_is_rejected() {
        let mut config = Config::default();
        config.report.top_n = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_multi_character_delimiter_is_rejected() {
        let mut config = Config::default();
        config.dataset.delimiter = "||".to_string();
        assert!(config.validate().is_err());
        config.dataset.delimiter = String::new();
        assert!(config.validate().is_err());
        config.dataset.delimiter = ";".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_identical_currency_separators_are_rejected() {
        let mut config = Config::default();
        config.currency.grouping_separator = ",".to_string();
        assert!(config.validate().is_err());
    }
}
