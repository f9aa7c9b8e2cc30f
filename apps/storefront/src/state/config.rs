//! # Storefront Configuration
//!
//! Currency display, delivery fee rules and order tracking settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PIZZERIA_DELIVERY_FEE=6.50                                          │
//! │     PIZZERIA_POLL_INTERVAL_SECS=10                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/pizzeria/storefront.toml (Linux)                         │
//! │     ~/Library/Application Support/com.pizzeria.storefront/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     BRL, R$ 5,00 fee below R$ 40,00, 45/30 minutes, 15s polling        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! [currency]
//! code = "BRL"
//! symbol = "R$"
//! decimal_separator = ","
//!
//! [delivery]
//! fee = 5.0
//! free_delivery_threshold = 40.0
//! delivery_minutes = 45
//! pickup_minutes = 30
//!
//! [tracking]
//! poll_interval_secs = 15
//! poll_limit = 240
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after startup, so no mutex needed.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use pizzeria_core::Money;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Currency Settings
// =============================================================================

/// How money is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// ISO 4217 code
    #[serde(default = "default_currency_code")]
    pub code: String,

    /// Symbol shown before amounts
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,

    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,
}

fn default_currency_code() -> String {
    "BRL".to_string()
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

fn default_decimal_separator() -> char {
    ','
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
            decimal_separator: default_decimal_separator(),
        }
    }
}

// =============================================================================
// Delivery Settings
// =============================================================================

/// Delivery fee rule and delivery estimates.
///
/// ## Fee Rule
/// ```text
/// delivery AND subtotal < free_delivery_threshold  →  fee
/// otherwise                                        →  0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliverySettings {
    #[serde(default = "default_delivery_fee")]
    pub fee: Money,

    /// Subtotal from which delivery is free
    #[serde(default = "default_free_delivery_threshold")]
    pub free_delivery_threshold: Money,

    /// Estimated minutes until a delivery order arrives
    #[serde(default = "default_delivery_minutes")]
    pub delivery_minutes: u32,

    /// Estimated minutes until a pickup order is ready
    #[serde(default = "default_pickup_minutes")]
    pub pickup_minutes: u32,
}

fn default_delivery_fee() -> Money {
    Money::from_cents(500)
}

fn default_free_delivery_threshold() -> Money {
    Money::from_cents(4000)
}

fn default_delivery_minutes() -> u32 {
    45
}

fn default_pickup_minutes() -> u32 {
    30
}

impl Default for DeliverySettings {
    fn default() -> Self {
        DeliverySettings {
            fee: default_delivery_fee(),
            free_delivery_threshold: default_free_delivery_threshold(),
            delivery_minutes: default_delivery_minutes(),
            pickup_minutes: default_pickup_minutes(),
        }
    }
}

// =============================================================================
// Tracking Settings
// =============================================================================

/// Order status polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSettings {
    /// Interval between status polls (seconds).
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Polls before the tracker gives up. 0 polls forever.
    #[serde(default = "default_poll_limit")]
    pub poll_limit: u32,
}

fn default_poll_interval() -> u64 {
    15
}

fn default_poll_limit() -> u32 {
    240
}

impl Default for TrackingSettings {
    fn default() -> Self {
        TrackingSettings {
            poll_interval_secs: default_poll_interval(),
            poll_limit: default_poll_limit(),
        }
    }
}

impl TrackingSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub delivery: DeliverySettings,

    #[serde(default)]
    pub tracking: TrackingSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let code = &self.currency.code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Invalid(format!(
                "currency code must be three uppercase letters, got: {}",
                code
            )));
        }

        if self.currency.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("currency symbol is required".into()));
        }

        if self.delivery.fee.is_negative() || self.delivery.free_delivery_threshold.is_negative() {
            return Err(ConfigError::Invalid(
                "delivery fee and free delivery threshold must not be negative".into(),
            ));
        }

        if self.delivery.delivery_minutes == 0 || self.delivery.pickup_minutes == 0 {
            return Err(ConfigError::Invalid(
                "delivery and pickup estimates must be greater than 0".into(),
            ));
        }

        if self.tracking.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `PIZZERIA_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// Unparseable values are logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(code) = lookup("PIZZERIA_CURRENCY_CODE") {
            self.currency.code = code.to_uppercase();
        }

        if let Some(symbol) = lookup("PIZZERIA_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(sep) = lookup("PIZZERIA_DECIMAL_SEPARATOR") {
            match sep.chars().next() {
                Some(c) if sep.chars().count() == 1 => self.currency.decimal_separator = c,
                _ => warn!(value = %sep, "Decimal separator must be a single character"),
            }
        }

        override_parsed(&lookup, "PIZZERIA_DELIVERY_FEE", &mut self.delivery.fee);
        override_parsed(
            &lookup,
            "PIZZERIA_FREE_DELIVERY_THRESHOLD",
            &mut self.delivery.free_delivery_threshold,
        );
        override_parsed(
            &lookup,
            "PIZZERIA_DELIVERY_MINUTES",
            &mut self.delivery.delivery_minutes,
        );
        override_parsed(
            &lookup,
            "PIZZERIA_PICKUP_MINUTES",
            &mut self.delivery.pickup_minutes,
        );
        override_parsed(
            &lookup,
            "PIZZERIA_POLL_INTERVAL_SECS",
            &mut self.tracking.poll_interval_secs,
        );
        override_parsed(&lookup, "PIZZERIA_POLL_LIMIT", &mut self.tracking.poll_limit);
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "pizzeria", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Formats money for display, rounding half to even at two places.
    ///
    /// ## Example
    /// ```rust
    /// use pizzeria_core::Money;
    /// use storefront_lib::state::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(2400)), "R$ 24,00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let rounded = amount.rounded(pizzeria_core::money::DISPLAY_DECIMALS);
        let digits = format!("{:.2}", rounded.abs().amount())
            .replace('.', &self.currency.decimal_separator.to_string());

        format!(
            "{}{} {}",
            if rounded.is_negative() { "-" } else { "" },
            self.currency.symbol,
            digits
        )
    }
}

fn override_parsed<T, F>(lookup: &F, key: &str, target: &mut T)
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(key) {
        match raw.trim().parse::<T>() {
            Ok(value) => {
                debug!(key, "Overriding config from environment");
                *target = value;
            }
            Err(_) => warn!(key, value = %raw, "Ignoring unparseable config override"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.currency.code, "BRL");
        assert_eq!(config.delivery.fee, Money::from_cents(500));
        assert_eq!(config.delivery.free_delivery_threshold, Money::from_cents(4000));
        assert_eq!(config.delivery.delivery_minutes, 45);
        assert_eq!(config.delivery.pickup_minutes, 30);
        assert_eq!(config.tracking.poll_interval(), Duration::from_secs(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StorefrontConfig::from_toml(
            r#"
            [delivery]
            fee = 7.5
            "#,
        )
        .unwrap();

        assert_eq!(config.delivery.fee, Money::from_cents(750));
        assert_eq!(config.delivery.pickup_minutes, 30);
        assert_eq!(config.currency.symbol, "R$");
    }

    #[test]
    fn test_malformed_toml() {
        let err = StorefrontConfig::from_toml("[delivery\nfee = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_overrides() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(lookup(&[
            ("PIZZERIA_CURRENCY_CODE", "usd"),
            ("PIZZERIA_CURRENCY_SYMBOL", "$"),
            ("PIZZERIA_DECIMAL_SEPARATOR", "."),
            ("PIZZERIA_DELIVERY_FEE", "6.50"),
            ("PIZZERIA_POLL_LIMIT", "10"),
        ]));

        assert_eq!(config.currency.code, "USD");
        assert_eq!(config.delivery.fee, Money::from_cents(650));
        assert_eq!(config.tracking.poll_limit, 10);
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$ 12.34");
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(lookup(&[
            ("PIZZERIA_DELIVERY_FEE", "five"),
            ("PIZZERIA_DECIMAL_SEPARATOR", "::"),
            ("PIZZERIA_PICKUP_MINUTES", "-3"),
        ]));

        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();

        config.currency.code = "REAIS".to_string();
        assert!(config.validate().is_err());

        config.currency.code = "BRL".to_string();
        config.delivery.fee = Money::from_cents(-1);
        assert!(config.validate().is_err());

        config.delivery.fee = Money::zero();
        config.tracking.poll_interval_secs = 0;
        assert!(config.validate().is_err());

        config.tracking.poll_interval_secs = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(2400)), "R$ 24,00");
        assert_eq!(config.format_currency(Money::zero()), "R$ 0,00");
        assert_eq!(config.format_currency(Money::from_cents(-550)), "-R$ 5,50");
        // 23.775 rounds half to even
        assert_eq!(
            config.format_currency(Money::from_cents(4755).half()),
            "R$ 23,78"
        );
    }

    #[test]
    fn test_toml_round_trip_sections() {
        let toml_str = toml::to_string_pretty(&StorefrontConfig::default()).unwrap();
        assert!(toml_str.contains("[currency]"));
        assert!(toml_str.contains("[delivery]"));
        assert!(toml_str.contains("[tracking]"));
    }
}
