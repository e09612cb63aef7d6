use std::path::PathBuf;

use freight_routing::api_key::ApiKey;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

pub const ORS_API_KEY_ENV_VAR: &str = "ORS_API_KEY";

#[derive(Debug, Error)]
#[error("An API key is required: none was found in the secret store or the input field")]
pub struct CredentialMissing;

/// One place an API key may come from.
pub trait CredentialProvider: Send + Sync {
    fn name(&self) -> &str;

    fn credential(&self) -> Option<String>;
}

/// Deployment secret exposed as an environment variable.
pub struct EnvSecretStore {
    var: String,
}

impl EnvSecretStore {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvSecretStore {
    fn default() -> Self {
        EnvSecretStore::new(ORS_API_KEY_ENV_VAR)
    }
}

impl CredentialProvider for EnvSecretStore {
    fn name(&self) -> &str {
        "environment"
    }

    fn credential(&self) -> Option<String> {
        std::env::var(&self.var).ok()
    }
}

#[derive(Deserialize)]
struct SecretsFileContent {
    ors_api_key: Option<String>,
}

/// Deployment secret stored in a TOML file with an `ors_api_key` entry.
pub struct SecretsFile {
    path: PathBuf,
}

impl SecretsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialProvider for SecretsFile {
    fn name(&self) -> &str {
        "secrets file"
    }

    fn credential(&self) -> Option<String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                debug!("Secrets file {:?} not readable: {}", self.path, err);
                return None;
            }
        };

        match toml::from_str::<SecretsFileContent>(&content) {
            Ok(secrets) => secrets.ors_api_key,
            Err(err) => {
                warn!("Secrets file {:?} is not valid TOML: {}", self.path, err);
                None
            }
        }
    }
}

/// Key typed in by the user.
pub struct ManualInput(Option<String>);

impl ManualInput {
    pub fn new(value: Option<String>) -> Self {
        ManualInput(value)
    }
}

impl CredentialProvider for ManualInput {
    fn name(&self) -> &str {
        "input field"
    }

    fn credential(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Providers in priority order, the first non-blank value wins.
#[derive(Default)]
pub struct CredentialChain {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl CredentialChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn push(&mut self, provider: Box<dyn CredentialProvider>) {
        self.providers.push(provider);
    }

    pub fn resolve(&self) -> Result<ApiKey, CredentialMissing> {
        for provider in &self.providers {
            if let Some(key) = provider.credential().and_then(ApiKey::new) {
                debug!("Using API key from {}", provider.name());
                return Ok(key);
            }
        }

        Err(CredentialMissing)
    }
}
