use std::{path::PathBuf, time::Duration};

use freight_routing::ors_api::{ORS_API_URL, OrsClientParams};
use jiff::{SignedDuration, SpanRelativeTo};
use thiserror::Error;

use crate::{
    credentials::{CredentialChain, EnvSecretStore, ManualInput, SecretsFile},
    gazetteer::{Gazetteer, GazetteerError, GazetteerPreset},
};

pub const GAZETTEER_ENV_VAR: &str = "FREIGHT_GAZETTEER";
pub const GAZETTEER_FILE_ENV_VAR: &str = "FREIGHT_GAZETTEER_FILE";
pub const ORS_BASE_URL_ENV_VAR: &str = "ORS_BASE_URL";
pub const HTTP_TIMEOUT_ENV_VAR: &str = "FREIGHT_HTTP_TIMEOUT";
pub const BIND_ENV_VAR: &str = "FREIGHT_BIND";
pub const SECRETS_FILE_ENV_VAR: &str = "FREIGHT_SECRETS_FILE";
pub const SESSION_TTL_ENV_VAR: &str = "FREIGHT_SESSION_TTL";

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid duration for {var}: {value}")]
    InvalidDuration { var: &'static str, value: String },

    #[error(transparent)]
    Gazetteer(#[from] GazetteerError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GazetteerSource {
    Preset(GazetteerPreset),
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct FreightConfig {
    pub gazetteer: GazetteerSource,
    pub ors_base_url: String,
    pub http_timeout: Duration,
    pub bind_address: String,
    pub secrets_file: Option<PathBuf>,

    /// Idle time after which a web session is discarded
    pub session_ttl: Duration,
}

impl Default for FreightConfig {
    fn default() -> Self {
        Self {
            gazetteer: GazetteerSource::Preset(GazetteerPreset::Cambodia),
            ors_base_url: String::from(ORS_API_URL),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            bind_address: String::from(DEFAULT_BIND_ADDRESS),
            secrets_file: None,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

/// Accepts "30s", "1m 30s", ISO 8601 ("PT30S") or a plain number of seconds.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();

    let signed = if let Ok(duration) = input.parse::<SignedDuration>() {
        duration
    } else if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        duration
    } else if let Ok(seconds) = input.parse::<u64>() {
        SignedDuration::from_secs(seconds as i64)
    } else {
        return None;
    };

    Duration::try_from(signed).ok().filter(|duration| !duration.is_zero())
}

impl FreightConfig {
    /// Reads the configuration from the process environment. Call
    /// `dotenvy` first for `.env` files to be taken into account.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = FreightConfig::default();

        if let Some(path) = lookup(GAZETTEER_FILE_ENV_VAR) {
            config.gazetteer = GazetteerSource::File(PathBuf::from(path));
        } else if let Some(preset) = lookup(GAZETTEER_ENV_VAR) {
            config.gazetteer = GazetteerSource::Preset(preset.parse()?);
        }

        if let Some(url) = lookup(ORS_BASE_URL_ENV_VAR) {
            config.ors_base_url = url;
        }

        if let Some(value) = lookup(HTTP_TIMEOUT_ENV_VAR) {
            config.http_timeout =
                parse_duration(&value).ok_or(ConfigError::InvalidDuration {
                    var: HTTP_TIMEOUT_ENV_VAR,
                    value,
                })?;
        }

        if let Some(bind) = lookup(BIND_ENV_VAR) {
            config.bind_address = bind;
        }

        config.secrets_file = lookup(SECRETS_FILE_ENV_VAR).map(PathBuf::from);

        if let Some(value) = lookup(SESSION_TTL_ENV_VAR) {
            config.session_ttl =
                parse_duration(&value).ok_or(ConfigError::InvalidDuration {
                    var: SESSION_TTL_ENV_VAR,
                    value,
                })?;
        }

        Ok(config)
    }

    pub fn load_gazetteer(&self) -> Result<Gazetteer, GazetteerError> {
        match &self.gazetteer {
            GazetteerSource::Preset(preset) => Ok(Gazetteer::from_preset(*preset)),
            GazetteerSource::File(path) => Gazetteer::from_file(path),
        }
    }

    pub fn ors_params(&self) -> OrsClientParams {
        OrsClientParams {
            base_url: self.ors_base_url.clone(),
            timeout: self.http_timeout,
        }
    }

    /// Deployment secrets first, then whatever the user typed in.
    pub fn credential_chain(&self, manual_input: Option<String>) -> CredentialChain {
        let mut chain = CredentialChain::new().with(EnvSecretStore::default());

        if let Some(path) = &self.secrets_file {
            chain.push(Box::new(SecretsFile::new(path.clone())));
        }

        chain.with(ManualInput::new(manual_input))
    }
}
