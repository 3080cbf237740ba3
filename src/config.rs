use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{RecipeError, Result};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "bakers.toml";

/// Settings read from the optional TOML config file.
///
/// Command-line flags and environment variables override these.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Working recipe JSON file.
    pub recipe_file: PathBuf,

    /// Saved-recipe library JSON file.
    pub library_file: PathBuf,

    /// Log level for this crate when `RUST_LOG` is unset.
    pub log_level: String,

    /// Page URL that share fragments are appended to, e.g.
    /// `https://example.org/calculator`.
    pub share_base_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recipe_file: PathBuf::from("recipe.json"),
            library_file: PathBuf::from("recipe_library.json"),
            log_level: "warn".to_string(),
            share_base_url: None,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text; absent keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// `tracing` filter directive for this crate.
    pub fn log_directive(&self) -> String {
        format!("bakers_percent_rs={}", self.log_level)
    }
}

/// Load settings.
///
/// An explicit path must exist. Without one, `bakers.toml` in the working
/// directory is used if present, otherwise defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(path) if !path.exists() => {
            return Err(RecipeError::InvalidInput(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.exists() {
                return Ok(Settings::default());
            }
            fallback
        }
    };

    let content = fs::read_to_string(path)?;
    Settings::from_toml(&content)
}
