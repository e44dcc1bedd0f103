use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ScrapeError;
use crate::format::slugify;

fn default_recent_days() -> i64 {
    14
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TeamConfig {
    pub team_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ClubConfig {
    pub club_name: String,
    pub site_id: String,
    pub teams: Vec<TeamConfig>,
}

impl ClubConfig {
    /// Directory under the results root where this club's output lands.
    #[must_use]
    pub fn results_dir(&self, results_root: &Path) -> PathBuf {
        results_root.join(slugify(&self.club_name))
    }
}

/// Fresh session tokens from the out-of-band interactive login flow.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Credentials {
    pub wtrl_sid: String,
    pub wtrl_ouid: String,
    pub ctoken: String,
}

/// Loaded explicitly and passed by reference into the client constructors;
/// there is no process-wide configuration singleton.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default)]
    pub netlify_auth_token: String,
    pub wtrl_sid: String,
    pub wtrl_ouid: String,
    pub ctoken: String,
    pub clubs: Vec<ClubConfig>,
    /// Trailing window, in days, within which a non-finalised race is
    /// considered recent and eligible for refresh.
    #[serde(default = "default_recent_days")]
    pub recent_days: i64,
    #[serde(skip)]
    pub file_path: Option<PathBuf>,
}

impl Config {
    /// # Errors
    ///
    /// Will return `Err` if the file is missing or not valid JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ScrapeError::Other(format!("config file {}: {e}", path.display())))?;
        let mut config: Config = serde_json::from_str(&text)
            .map_err(|e| ScrapeError::Other(format!("config file {}: {e}", path.display())))?;
        config.file_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Rewrites the session token fields in the config file and returns the
    /// reloaded configuration.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the config was not loaded from a file, or the
    /// file cannot be rewritten.
    pub fn save_credentials(&self, credentials: &Credentials) -> Result<Self, ScrapeError> {
        let path = self
            .file_path
            .as_ref()
            .ok_or_else(|| ScrapeError::Other("config file path is missing".into()))?;

        let text = fs::read_to_string(path)
            .map_err(|e| ScrapeError::Other(format!("config file {}: {e}", path.display())))?;
        let mut raw: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| ScrapeError::Other(format!("config file {}: {e}", path.display())))?;

        raw["wtrl_sid"] = serde_json::Value::String(credentials.wtrl_sid.clone());
        raw["wtrl_ouid"] = serde_json::Value::String(credentials.wtrl_ouid.clone());
        raw["ctoken"] = serde_json::Value::String(credentials.ctoken.clone());

        fs::write(path, serde_json::to_string_pretty(&raw)?)
            .map_err(|e| ScrapeError::Other(format!("config file {}: {e}", path.display())))?;

        Self::load(path)
    }
}
