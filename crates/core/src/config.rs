//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_MODEL_PATH, DEFAULT_PATIENTS_FILE};
use crate::{PremiumError, PremiumResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    patients_file: PathBuf,
    model_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `PremiumError::InvalidInput` if either path is empty or the patients file
    /// path names an existing directory.
    pub fn new(patients_file: PathBuf, model_path: PathBuf) -> PremiumResult<Self> {
        if patients_file.as_os_str().is_empty() {
            return Err(PremiumError::InvalidInput(
                "patients file path cannot be empty".into(),
            ));
        }
        if patients_file.is_dir() {
            return Err(PremiumError::InvalidInput(format!(
                "patients file path is a directory: {}",
                patients_file.display()
            )));
        }
        if model_path.as_os_str().is_empty() {
            return Err(PremiumError::InvalidInput(
                "model path cannot be empty".into(),
            ));
        }

        Ok(Self {
            patients_file,
            model_path,
        })
    }

    /// Build a config from optional raw values, falling back to the defaults for missing or
    /// blank entries.
    pub fn from_env_values(
        patients_file: Option<String>,
        model_path: Option<String>,
    ) -> PremiumResult<Self> {
        fn or_default(value: Option<String>, default: &str) -> PathBuf {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        }

        Self::new(
            or_default(patients_file, DEFAULT_PATIENTS_FILE),
            or_default(model_path, DEFAULT_MODEL_PATH),
        )
    }

    pub fn patients_file(&self) -> &Path {
        &self.patients_file
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_env_values_uses_defaults_for_blank_values() {
        let cfg = CoreConfig::from_env_values(None, Some("   ".into())).unwrap();
        assert_eq!(cfg.patients_file(), Path::new(DEFAULT_PATIENTS_FILE));
        assert_eq!(cfg.model_path(), Path::new(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn test_from_env_values_uses_overrides() {
        let cfg = CoreConfig::from_env_values(
            Some("/data/patients.json".into()),
            Some("/models/premium.json".into()),
        )
        .unwrap();
        assert_eq!(cfg.patients_file(), Path::new("/data/patients.json"));
        assert_eq!(cfg.model_path(), Path::new("/models/premium.json"));
    }

    #[test]
    fn test_new_rejects_directory_as_patients_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = CoreConfig::new(temp_dir.path().to_path_buf(), PathBuf::from("m.json"))
            .expect_err("directory should be rejected");
        assert!(matches!(err, PremiumError::InvalidInput(_)));
    }
}
