//! Flat JSON file storage for patient records.
//!
//! The whole store is one JSON object keyed by patient id. Every mutation is a
//! read-modify-write of the entire file:
//!
//! - mutations within this process are serialised by a lock held for the full cycle;
//! - the new content is written to a sibling temp file and renamed over the store, so a
//!   crash never leaves a half-written file behind.
//!
//! Separate processes writing the same file are not coordinated.

use crate::patient::PatientDetails;
use crate::{PremiumError, PremiumResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

pub type PatientMap = BTreeMap<String, PatientDetails>;

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Reads the whole store. A missing or blank file reads as an empty store.
    ///
    /// # Errors
    ///
    /// Returns `FileRead` on I/O failure and `Deserialization` (with the JSON path of the
    /// offending value) if the file is not a valid store.
    pub fn load(&self) -> PremiumResult<PatientMap> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(PatientMap::new()),
            Err(e) => return Err(PremiumError::FileRead(e)),
        };
        if raw.trim().is_empty() {
            return Ok(PatientMap::new());
        }

        let de = &mut serde_json::Deserializer::from_str(&raw);
        serde_path_to_error::deserialize(de).map_err(PremiumError::Deserialization)
    }

    /// Runs `mutate` against the current store contents and persists the result.
    ///
    /// If `mutate` returns an error nothing is written.
    pub fn modify<T>(
        &self,
        mutate: impl FnOnce(&mut PatientMap) -> PremiumResult<T>,
    ) -> PremiumResult<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| PremiumError::StoreLockPoisoned)?;

        let mut data = self.load()?;
        let out = mutate(&mut data)?;
        self.save(&data)?;
        Ok(out)
    }

    fn save(&self, data: &PatientMap) -> PremiumResult<()> {
        let json = serde_json::to_vec_pretty(data).map_err(PremiumError::Serialization)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(PremiumError::FileWrite)?;
        }

        let mut tmp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "patients.json".into());
        tmp_name.push(".tmp");
        let tmp_path = self.path.with_file_name(tmp_name);

        fs::write(&tmp_path, json).map_err(PremiumError::FileWrite)?;
        fs::rename(&tmp_path, &self.path).map_err(PremiumError::FileWrite)?;
        Ok(())
    }
}
