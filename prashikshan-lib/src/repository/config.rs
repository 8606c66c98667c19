use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{
    fs::{config_dir, state_dir},
    repository::workflow::credits::CreditPolicy,
};

const FILE_NAME: &str = "core.toml";

/// Handle to the core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// The core configuration, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Where collections are stored. Falls back to the XDG state directory.
    pub data_dir: Option<PathBuf>,
    /// How much an approved logbook entry advances a student's progress
    pub progress_step: u8,
    /// Recorded as `approvedBy` on credit grants made from this installation
    pub approver: String,
    pub credit_policy: CreditPolicy,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            progress_step: 5,
            approver: "Faculty".into(),
            credit_policy: CreditPolicy::default(),
        }
    }
}

impl CoreConfig {
    /// Load the configuration from the XDG config directory, creating it with defaults if it
    /// doesn't exist yet.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(&config_dir()?.join(FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(path)?;
            return Ok(cfg);
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!("Ignoring unreadable config at {}: {err}", path.display());
                return Ok(Self::default());
            }
        };

        Ok(toml::from_str(&contents).unwrap_or_else(|err| {
            warn!("Ignoring malformed config at {}: {err}", path.display());
            Self::default()
        }))
    }

    pub fn save(&self) -> Result<(), Error> {
        self.save_to(&config_dir()?.join(FILE_NAME))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Error> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;

        Ok(())
    }

    /// Directory holding the collection files
    pub fn data_dir(&self) -> io::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => state_dir(),
        }
    }

    pub fn into_handle(self) -> Cfg {
        Arc::new(RwLock::new(self))
    }

    #[cfg(test)]
    /// Default configuration that never touches the user's config directory.
    pub(crate) fn mock() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_creates_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg, CoreConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);

        let cfg = CoreConfig {
            progress_step: 10,
            approver: "Prof. Rao".into(),
            ..CoreConfig::default()
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(CoreConfig::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn test_malformed_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "progress_step = \"lots\"").unwrap();

        assert_eq!(CoreConfig::load_from(&path).unwrap(), CoreConfig::default());
    }

    #[test]
    fn test_unreadable_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert_eq!(CoreConfig::load_from(&path).unwrap(), CoreConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "approver = \"Prof. Iyer\"\n").unwrap();

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg.approver, "Prof. Iyer");
        assert_eq!(cfg.progress_step, 5);
        assert_eq!(cfg.credit_policy, CreditPolicy::default());
    }
}
