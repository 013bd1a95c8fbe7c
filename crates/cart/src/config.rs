//! Storefront configuration.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainResult, Money};

use crate::format::CurrencyFormat;
use crate::pricing::PricingPolicy;

pub const DELIVERY_FEE_VAR: &str = "STOREFRONT_DELIVERY_FEE";
pub const CURRENCY_LOCALE_VAR: &str = "STOREFRONT_CURRENCY_LOCALE";

const DEFAULT_DELIVERY_FEE: Money = Money::new(300);
const DEFAULT_CURRENCY_LOCALE: &str = "ru-RU";

/// Delivery fee and currency locale for a storefront session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub fixed_delivery_fee: Money,
    pub currency_locale: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            fixed_delivery_fee: DEFAULT_DELIVERY_FEE,
            currency_locale: DEFAULT_CURRENCY_LOCALE.to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Read `STOREFRONT_DELIVERY_FEE` and `STOREFRONT_CURRENCY_LOCALE`,
    /// falling back to defaults for anything unset or unusable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StorefrontConfig::from_env`] with an injectable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(DELIVERY_FEE_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(fee) if fee > 0 => config.fixed_delivery_fee = Money::new(fee),
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default = %DEFAULT_DELIVERY_FEE,
                        "{DELIVERY_FEE_VAR} is not a positive integer; using default"
                    );
                }
            }
        }

        if let Some(locale) = lookup(CURRENCY_LOCALE_VAR) {
            let locale = locale.trim();
            if locale.is_empty() {
                tracing::warn!("{CURRENCY_LOCALE_VAR} is empty; using default");
            } else {
                config.currency_locale = locale.to_string();
            }
        }

        config
    }

    pub fn pricing(&self) -> DomainResult<PricingPolicy> {
        PricingPolicy::new(self.fixed_delivery_fee)
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::for_locale(&self.currency_locale)
    }
}
