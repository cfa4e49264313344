//! # Persistence
//!
//! Stores the mapping settings and the recorded bindings between sessions:
//!
//! ```text
//! ~/.config/padmap/
//! ├── settings.toml   MappingSettings
//! └── mappings.json   recorded binding sets
//! ```
//!
//! Missing files are not an error: settings fall back to their defaults and
//! mappings simply stay empty. Everything else is reported with `eyre` context.

use crate::config::MappingSettings;
use crate::mapping::{Committed, ControllerMappings};
use color_eyre::{eyre::eyre, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CONFIG_DIR: &str = ".config/padmap";
const SETTINGS_FILE: &str = "settings.toml";
const MAPPINGS_FILE: &str = "mappings.json";

#[derive(Debug, Clone)]
pub struct MappingStore {
    base_path: PathBuf,
}

impl Default for MappingStore {
    fn default() -> Self {
        let mut base_path = get_home_dir();
        base_path.push(CONFIG_DIR);
        Self { base_path }
    }
}

impl MappingStore {
    /// Store rooted at an explicit directory instead of the user's config directory.
    pub fn at(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn settings_path(&self) -> PathBuf {
        self.base_path.join(SETTINGS_FILE)
    }

    pub fn mappings_path(&self) -> PathBuf {
        self.base_path.join(MAPPINGS_FILE)
    }

    pub async fn load_settings(&self) -> Result<MappingSettings> {
        let path = self.settings_path();

        if !tokio::fs::try_exists(&path)
            .await
            .map_err(|e| eyre!("Failed to check if settings file exists: {}", e))?
        {
            warn!(
                "Settings file {} does not exist, using default",
                path.display()
            );
            return Ok(MappingSettings::default());
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| eyre!("Failed to read settings file: {}", e))?;

        let settings = MappingSettings::from_toml_str(&content)
            .map_err(|e| eyre!("Failed to parse settings file: {}", e))?;
        debug!("Loaded settings: {:?}", settings);
        Ok(settings)
    }

    pub async fn save_settings(&self, settings: &MappingSettings) -> Result<()> {
        self.ensure_base_dir().await?;

        let content = settings
            .to_toml_string()
            .map_err(|e| eyre!("Failed to serialize settings: {}", e))?;

        tokio::fs::write(self.settings_path(), content)
            .await
            .map_err(|e| eyre!("Failed to write settings file: {}", e))?;

        info!("Settings saved to {}", self.settings_path().display());
        Ok(())
    }

    /// Restores the stored bindings into `mappings`. Returns `false` if nothing was stored.
    pub async fn load_mappings(&self, mappings: &mut ControllerMappings<Committed>) -> Result<bool> {
        let path = self.mappings_path();

        if !tokio::fs::try_exists(&path)
            .await
            .map_err(|e| eyre!("Failed to check if mappings file exists: {}", e))?
        {
            info!("No stored mappings at {}", path.display());
            return Ok(false);
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| eyre!("Failed to read mappings file: {}", e))?;

        mappings
            .fill_from_str(&content)
            .map_err(|e| eyre!("Failed to restore mappings from {}: {}", path.display(), e))?;

        info!("Mappings loaded from {}", path.display());
        Ok(true)
    }

    /// Writes every recorded binding set. Default bindings are never stored.
    pub async fn save_mappings(&self, mappings: &ControllerMappings<Committed>) -> Result<()> {
        self.ensure_base_dir().await?;

        let content = mappings
            .to_json_string()
            .map_err(|e| eyre!("Failed to serialize mappings: {}", e))?;

        tokio::fs::write(self.mappings_path(), content)
            .await
            .map_err(|e| eyre!("Failed to write mappings file: {}", e))?;

        info!("Mappings saved to {}", self.mappings_path().display());
        Ok(())
    }

    async fn ensure_base_dir(&self) -> Result<()> {
        if !tokio::fs::try_exists(&self.base_path)
            .await
            .map_err(|e| eyre!("Failed to check if config directory exists: {}", e))?
        {
            tokio::fs::create_dir_all(&self.base_path)
                .await
                .map_err(|e| eyre!("Failed to create config directory: {}", e))?;
        }
        Ok(())
    }
}

fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| {
        warn!("Could not determine home directory, using current directory");
        PathBuf::from(".")
    })
}
