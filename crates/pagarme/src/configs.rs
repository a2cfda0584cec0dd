//! Connector settings, read from `config/<environment>.toml` and `PAGARME__*` environment
//! variables.

use std::path::PathBuf;

use common_utils::errors::CustomResult;
use error_stack::{report, ResultExt};
use masking::Secret;
use payment_interfaces::{
    configs::{AuthMethod, Connectors},
    types::ConnectorAuthType,
};
use router_env::{env, logger, Env, Log};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.pagar.me/1/";

const ENV_PREFIX: &str = "PAGARME";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to load configuration")]
    ConfigurationLoadFailed,
    #[error("Invalid configuration value provided: {0}")]
    InvalidConfigurationValue(&'static str),
}

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub log: Log,
    pub connectors: Connectors,
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
}

impl Settings {
    /// Settings for the environment named by `RUN_ENV`
    pub fn new() -> CustomResult<Self, SettingsError> {
        Self::with_config_path(None)
    }

    pub fn with_config_path(config_path: Option<PathBuf>) -> CustomResult<Self, SettingsError> {
        let environment = env::which();
        let config_path = config_path.unwrap_or_else(|| default_config_path(environment));

        let config = config::Config::builder()
            .set_default("connectors.pagarme.base_url", DEFAULT_BASE_URL)
            .change_context(SettingsError::ConfigurationLoadFailed)?
            .add_source(config::File::from(config_path.clone()).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .change_context(SettingsError::ConfigurationLoadFailed)
            .attach_printable_lazy(|| {
                format!("Unable to read configuration from {}", config_path.display())
            })?;

        let mut settings: Self = config
            .try_deserialize()
            .change_context(SettingsError::ConfigurationLoadFailed)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&mut self) -> CustomResult<(), SettingsError> {
        let base_url = &mut self.connectors.pagarme.base_url;
        if base_url.trim().is_empty() {
            return Err(report!(SettingsError::InvalidConfigurationValue(
                "connectors.pagarme.base_url"
            )));
        }
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        if self.api_key.is_none() {
            logger::warn!("No API key configured, requests will be rejected");
        }
        Ok(())
    }

    /// Credentials in the form the connector expects, placed as `auth_method` says
    pub fn connector_auth_type(&self) -> ConnectorAuthType {
        match (&self.api_key, self.connectors.pagarme.auth_method) {
            (Some(api_key), AuthMethod::BodyField) => ConnectorAuthType::BodyKey {
                api_key: api_key.clone(),
            },
            (Some(api_key), AuthMethod::BasicAuth) => ConnectorAuthType::HeaderKey {
                api_key: api_key.clone(),
            },
            (None, _) => ConnectorAuthType::NoKey,
        }
    }
}

fn default_config_path(environment: Env) -> PathBuf {
    env::workspace_path()
        .join("config")
        .join(format!("{environment}.toml"))
}
