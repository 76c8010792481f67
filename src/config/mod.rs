use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub mod database;
pub mod extension_settings;
pub mod server;

pub use database::DatabaseConfig;
pub use extension_settings::ExtensionSettings;
pub use server::ServerConfig;

/// Placeholder replaced by the order reference in the return URL template
pub const ORDER_REF_PLACEHOLDER: &str = "{order_ref}";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub duitku: GatewayConfig,
    pub tripay: GatewayConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Invoice page the payer returns to, e.g. `https://billing.example.com/invoices/{order_ref}`
    pub return_url_template: String,
    pub http_timeout_secs: u64,
    pub checkout_cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Deployment settings for one gateway.
///
/// `settings` holds the extension settings (merchant code, keys) keyed by the
/// names the gateway declares in its config schema.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    pub base_url: Option<String>,
    pub settings: Vec<(String, String)>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: match env::var("LOG_FORMAT").as_deref() {
                    Ok("json") => LogFormat::Json,
                    _ => LogFormat::Pretty,
                },
                return_url_template: env::var("RETURN_URL_TEMPLATE").unwrap_or_else(|_| {
                    AppConfig::default().return_url_template
                }),
                http_timeout_secs: env::var("GATEWAY_HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid GATEWAY_HTTP_TIMEOUT_SECS".to_string())
                    })?,
                checkout_cache_ttl_secs: env::var("CHECKOUT_CACHE_TTL_SECS")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid CHECKOUT_CACHE_TTL_SECS".to_string())
                    })?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            duitku: GatewayConfig::from_env(
                "DUITKU",
                &["merchant_code", "api_key", "callback_url"],
            ),
            tripay: GatewayConfig::from_env(
                "TRIPAY",
                &["api_key", "private_key", "merchant_code", "payment_method"],
            ),
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.app.validate()
    }

    /// Extension settings for every gateway, keyed by gateway display name
    pub fn extension_settings(&self) -> ExtensionSettings {
        let mut settings = ExtensionSettings::new();
        for (gateway, config) in [("Duitku", &self.duitku), ("Tripay", &self.tripay)] {
            for (key, value) in &config.settings {
                settings.set(gateway, key, value.clone());
            }
        }
        settings
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.http_timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Gateway HTTP timeout must be greater than 0".to_string(),
            ));
        }

        if self.checkout_cache_ttl_secs == 0 {
            return Err(AppError::Configuration(
                "Checkout cache TTL must be greater than 0".to_string(),
            ));
        }

        if !self.return_url_template.contains(ORDER_REF_PLACEHOLDER) {
            return Err(AppError::Configuration(format!(
                "RETURN_URL_TEMPLATE must contain {}",
                ORDER_REF_PLACEHOLDER
            )));
        }

        Ok(())
    }

    /// Invoice page URL for an order
    pub fn return_url(&self, order_ref: &str) -> String {
        self.return_url_template
            .replace(ORDER_REF_PLACEHOLDER, order_ref)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn checkout_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.checkout_cache_ttl_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: "development".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            return_url_template: "http://localhost:8080/invoices/{order_ref}".to_string(),
            http_timeout_secs: 30,
            checkout_cache_ttl_secs: 3600,
        }
    }
}

impl GatewayConfig {
    /// Read `{PREFIX}_BASE_URL` and `{PREFIX}_{KEY}` for each setting key.
    /// Unset settings are left out and reported by the gateway when used.
    fn from_env(prefix: &str, keys: &[&str]) -> Self {
        let settings = keys
            .iter()
            .filter_map(|key| {
                env::var(format!("{}_{}", prefix, key.to_ascii_uppercase()))
                    .ok()
                    .map(|value| (key.to_string(), value))
            })
            .collect();

        Self {
            base_url: env::var(format!("{}_BASE_URL", prefix)).ok(),
            settings,
        }
    }
}
