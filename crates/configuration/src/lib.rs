use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, Dashboard, DataSettings, SortSettings};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, validates it, and returns it.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

/// Rejects configurations that parse but make no sense to run with.
fn validate(config: &Config) -> Result<(), ConfigError> {
    let dashboard = &config.dashboard;

    if dashboard.start_date > dashboard.end_date {
        return Err(ConfigError::ValidationError(format!(
            "start_date {} is after end_date {}",
            dashboard.start_date, dashboard.end_date
        )));
    }

    if dashboard.comparison_currency == Some(dashboard.currency) {
        return Err(ConfigError::ValidationError(format!(
            "comparison currency must differ from the primary ({})",
            dashboard.currency
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{Currency, SortDirection, SortKey};

    fn config(
        currency: Currency,
        comparison: Option<Currency>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Config {
        Config {
            dashboard: Dashboard {
                currency,
                comparison_currency: comparison,
                start_date: start,
                end_date: end,
                sort: SortSettings {
                    key: SortKey::Date,
                    direction: SortDirection::Desc,
                },
                show_price_overlay: false,
            },
            data: DataSettings { mock_seed: 42 },
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn valid_config_passes() {
        let cfg = config(Currency::Eur, Some(Currency::Gbp), date(1), date(31));
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let cfg = config(Currency::Eur, None, date(31), date(1));
        assert!(matches!(
            validate(&cfg),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn self_comparison_is_rejected() {
        let cfg = config(Currency::Eur, Some(Currency::Eur), date(1), date(31));
        assert!(matches!(
            validate(&cfg),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
