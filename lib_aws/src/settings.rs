use std::{fs, path::Path};

use lib_core::{define_cli_error, CliError, IOError, Printer};
use serde::{Deserialize, Serialize};

use crate::session::SessionConfig;

define_cli_error!(
    AwsSettingsError,
    "Invalid AWS session settings in '{path}'.",
    { path: &std::path::Display<'_> }
);

/// Session settings as stored in a YAML file:
///
/// ```yaml
/// region: eu-west-2
/// debug_api_calls: false
/// resolver_url: https://api.beta.eu-west-2.example.com
/// signing_name: eks
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub region: String,
    pub debug_api_calls: bool,
    pub resolver_url: Option<String>,
    pub signing_name: Option<String>,
}

impl SessionSettings {
    /// Reads settings from `path`. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !lib_core::exists(path) {
            return Ok(SessionSettings::default());
        }
        let content = fs::read_to_string(path).map_err(|e| IOError::with_debug(&e))?;
        if content.trim().is_empty() {
            return Ok(SessionSettings::default());
        }
        serde_yaml::from_str(&content).map_err(|e| AwsSettingsError::with_debug(&path.display(), &e))
    }

    pub fn into_config(self, logger: Printer) -> SessionConfig {
        SessionConfig {
            logger: Some(logger),
            debug_api_calls: self.debug_api_calls,
            region: self.region,
            resolver_url: self.resolver_url,
            signing_name: self.signing_name,
        }
    }
}
