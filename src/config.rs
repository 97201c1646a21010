use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{KinshipError, Result};

/// Name of the configuration file stored inside the `.kinship` directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the hidden directory holding resolver settings.
pub const KINSHIP_DIR: &str = ".kinship";

/// What to do when more than one member is flagged `isSelf`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// Reject the collection with `AmbiguousReferencePerson`.
    #[default]
    Strict,
    /// Take the first flagged member and log a warning.
    FirstWins,
}

/// Persisted resolver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Schema version of the configuration.
    pub version: u32,
    pub reference_policy: ReferencePolicy,
    /// Derive missing generations from parent/child/spouse links.
    pub infer_generations: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            version: 1,
            reference_policy: ReferencePolicy::Strict,
            infer_generations: false,
        }
    }
}

/// Returns the path to the `.kinship` directory within the given root.
pub fn get_kinship_dir(root: &Path) -> PathBuf {
    root.join(KINSHIP_DIR)
}

/// Returns the path to `config.json` within the `.kinship` directory.
pub fn get_config_path(root: &Path) -> PathBuf {
    get_kinship_dir(root).join(CONFIG_FILENAME)
}

/// Loads the configuration from disk, or the defaults when no file exists.
pub fn load_config(root: &Path) -> Result<ResolverConfig> {
    let config_path = get_config_path(root);

    if !config_path.exists() {
        return Ok(ResolverConfig::default());
    }

    let contents = fs::read_to_string(&config_path).map_err(|e| KinshipError::Config {
        message: format!(
            "cannot read resolver config '{}': {}",
            config_path.display(),
            e
        ),
    })?;

    serde_json::from_str(&contents).map_err(|e| KinshipError::Config {
        message: format!(
            "resolver config '{}' is not valid: {}",
            config_path.display(),
            e
        ),
    })
}

/// Saves the configuration, writing a temporary file and renaming it into
/// place so a partial write never leaves a corrupt config behind.
pub fn save_config(root: &Path, config: &ResolverConfig) -> Result<()> {
    let kinship_dir = get_kinship_dir(root);
    fs::create_dir_all(&kinship_dir).map_err(|e| KinshipError::Config {
        message: format!(
            "cannot create kinship directory '{}': {}",
            kinship_dir.display(),
            e
        ),
    })?;

    let config_path = get_config_path(root);
    let tmp_path = config_path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| KinshipError::Config {
        message: format!("cannot encode resolver config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| KinshipError::Config {
        message: format!(
            "cannot write resolver config to '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, &config_path).map_err(|e| KinshipError::Config {
        message: format!(
            "cannot move resolver config from '{}' into '{}': {}",
            tmp_path.display(),
            config_path.display(),
            e
        ),
    })?;

    Ok(())
}
