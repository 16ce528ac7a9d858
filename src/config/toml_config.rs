use crate::domain::classify::MilitaryClassifier;
use crate::domain::model::BoundingBox;
use crate::utils::error::{AlertError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "aircraft-alert.toml";

/// Optional on-disk configuration. Every section and key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub monitor: MonitorSection,
    #[serde(default)]
    pub bounds: Option<BoundingBox>,
    #[serde(default)]
    pub endpoints: EndpointsSection,
    #[serde(default)]
    pub opensky: OpenSkySection,
    #[serde(default)]
    pub pushover: PushoverSection,
    #[serde(default)]
    pub military: Option<MilitaryClassifier>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorSection {
    pub radius_km: Option<f64>,
    pub check_interval_secs: Option<u64>,
    pub favourites_file: Option<PathBuf>,
    pub auto_bounds: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointsSection {
    pub postcodes_url: Option<String>,
    pub opensky_url: Option<String>,
    pub pushover_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenSkySection {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PushoverSection {
    pub user: Option<String>,
    pub token: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AlertError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AlertError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Load `explicit` if given (it must exist), otherwise `./aircraft-alert.toml` when present.
    pub fn load(explicit: Option<&Path>) -> Result<Option<Self>> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(AlertError::ConfigError {
                        message: format!("Config file not found: {}", path.display()),
                    });
                }
                tracing::info!("📁 Loading configuration from: {}", path.display());
                Self::from_file(path).map(Some)
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    tracing::info!("📁 Loading configuration from: {}", path.display());
                    Self::from_file(path).map(Some)
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Replace `${VAR}` with the environment value. Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AlertError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

/// A config string that is set and is not a leftover `${VAR}` placeholder.
pub(crate) fn resolved(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && !v.contains("${"))
        .map(str::to_string)
}
