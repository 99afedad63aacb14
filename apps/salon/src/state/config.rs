//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`ZARLETTE_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// Store identity shows up on receipts; the login credentials back the
/// default static authenticator. The REST endpoint has its own config
/// (`zarlette_api::ApiConfig`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Store name (displayed on receipts and the login screen)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Username accepted by the static authenticator
    #[serde(skip_serializing)]
    pub login_username: String,

    /// Password accepted by the static authenticator
    #[serde(skip_serializing)]
    pub login_password: String,
}

impl Default for AppConfig {
    /// Returns default configuration suitable for development.
    fn default() -> Self {
        AppConfig {
            store_name: "Zarlette Salon".to_string(),
            currency_symbol: "₱".to_string(),
            login_username: "admin".to_string(),
            login_password: "12345".to_string(),
        }
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `ZARLETTE_STORE_NAME`: Override store name
    /// - `ZARLETTE_CURRENCY_SYMBOL`: Override currency symbol
    /// - `ZARLETTE_LOGIN_USERNAME` / `ZARLETTE_LOGIN_PASSWORD`: Override
    ///   the static login credentials
    pub fn from_env() -> Self {
        let mut config = AppConfig::default();

        if let Ok(store_name) = std::env::var("ZARLETTE_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(symbol) = std::env::var("ZARLETTE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Ok(username) = std::env::var("ZARLETTE_LOGIN_USERNAME") {
            config.login_username = username;
        }

        if let Ok(password) = std::env::var("ZARLETTE_LOGIN_PASSWORD") {
            config.login_password = password;
        }

        config
    }

    /// Formats a monetary amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_amount(Money::from_major(140)), "₱140.000");
    /// ```
    pub fn format_amount(&self, amount: zarlette_core::Money) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zarlette_core::Money;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.store_name, "Zarlette Salon");
        assert_eq!(config.login_username, "admin");
        assert_eq!(config.login_password, "12345");
    }

    #[test]
    fn test_format_amount() {
        let config = AppConfig::default();
        assert_eq!(config.format_amount(Money::from_major(140)), "₱140.000");
        assert_eq!(config.format_amount(Money::from_mils(10_500)), "₱10.500");
    }

    #[test]
    fn test_credentials_stay_out_of_serialized_config() {
        let v = serde_json::to_value(AppConfig::default()).unwrap();
        assert!(v.get("loginUsername").is_none());
        assert!(v.get("loginPassword").is_none());
        assert_eq!(v["storeName"], "Zarlette Salon");
    }
}
