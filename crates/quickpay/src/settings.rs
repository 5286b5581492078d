//! Settings of the QuickPay integration, read from `config/<env>.toml` and `QUICKPAY__` variables.

use std::path::PathBuf;

use config::{Config, Environment, File};
use error_stack::{report, ResultExt};
use gateway_env::{config::Log, Env};
use masking::{PeekInterface, Secret};
use serde::Deserialize;

use crate::{consts, errors::SettingsError, options::PaymentOptions};
use common_utils::errors::CustomResult;

/// Settings of the integration.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Merchant credentials and payment window endpoint
    pub quickpay: GatewaySettings,
    /// Defaults applied to every request
    #[serde(default)]
    pub payment: PaymentOptions,
    /// Logger settings
    #[serde(default)]
    pub log: Log,
}

/// Merchant credentials and payment window endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct GatewaySettings {
    /// QuickPay merchant id
    pub merchant: String,
    /// Shared secret entering every `md5check`
    pub secret: Secret<String>,
    /// Payment window the request form is posted to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout of the request to the payment window
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    consts::PAYMENT_WINDOW_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    consts::DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Settings {
    /// Loads the settings of the environment named by `RUN_ENV`.
    pub fn new() -> CustomResult<Self, SettingsError> {
        Self::with_config_path(gateway_env::which(), None)
    }

    /// Loads settings from `explicit_config_path`, or from `config/<env>.toml` under the workspace
    /// root when none is given. Environment variables override file values.
    pub fn with_config_path(
        environment: Env,
        explicit_config_path: Option<PathBuf>,
    ) -> CustomResult<Self, SettingsError> {
        let config_path = explicit_config_path.unwrap_or_else(|| {
            gateway_env::workspace_path()
                .join("config")
                .join(format!("{}.toml", environment.config_file_name()))
        });

        let settings: Self = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix(consts::SETTINGS_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .change_context(SettingsError::ConfigLoadFailed)?
            .try_deserialize()
            .change_context(SettingsError::ConfigLoadFailed)
            .attach_printable_lazy(|| format!("environment: {environment}"))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Rejects settings the payment window would refuse.
    pub fn validate(&self) -> CustomResult<(), SettingsError> {
        if self.quickpay.secret.peek().trim().is_empty() {
            return Err(report!(SettingsError::InvalidConfigValue {
                field_name: "quickpay.secret"
            }));
        }
        if self.quickpay.merchant.len() != 8
            || !self.quickpay.merchant.chars().all(|c| c.is_ascii_digit())
        {
            return Err(report!(SettingsError::InvalidConfigValue {
                field_name: "quickpay.merchant"
            }));
        }
        if url::Url::parse(&self.quickpay.base_url).is_err() {
            return Err(report!(SettingsError::InvalidConfigValue {
                field_name: "quickpay.base_url"
            }));
        }
        Ok(())
    }
}
