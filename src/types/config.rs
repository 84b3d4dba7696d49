use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::Error;

/// Environment variables accepted for the API key, in priority order.
pub const API_KEY_VARS: [&str; 3] = ["GENIMI_API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Full `generateContent` URL override.
pub const ENDPOINT_VAR: &str = "GEMINI_API_URL";

/// Base directory override.
pub const HOME_VAR: &str = "PROMPT_RUNNER_HOME";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub const CONTEXT_FILE_NAME: &str = "camera_lens_combinations.json";

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub endpoint: Option<String>,
    pub base_dir: PathBuf,
}

impl Config {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// Empty values are treated as unset. Fails with
    /// [`Error::MissingCredential`] when none of [`API_KEY_VARS`] resolves.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let (var, api_key) = API_KEY_VARS
            .iter()
            .find_map(|name| non_empty(*name).map(|value| (*name, value)))
            .ok_or_else(|| Error::MissingCredential {
                names: API_KEY_VARS.to_vec(),
            })?;
        debug!("Using API key from {var}");

        let base_dir = non_empty(HOME_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_base_dir);

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            endpoint: non_empty(ENDPOINT_VAR),
            base_dir,
        })
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn golden_dir(&self) -> PathBuf {
        self.base_dir.join("golden")
    }

    pub fn context_path(&self) -> PathBuf {
        self.base_dir.join(CONTEXT_FILE_NAME)
    }

    /// Create the `data` and `golden` working directories if missing.
    pub fn ensure_work_dirs(&self) -> Result<(), Error> {
        for dir in [self.data_dir(), self.golden_dir()] {
            fs::create_dir_all(&dir)?;
            debug!("Working directory ready: {}", dir.display());
        }
        Ok(())
    }
}

/// Parent of the directory holding the running executable.
fn default_base_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
