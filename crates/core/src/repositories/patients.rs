//! Patient record management.
//!
//! CRUD operations over the flat JSON store. All validation happens before the store is
//! touched, so a rejected request never causes a write.
//!
//! ## Storage Layout
//!
//! ```text
//! {
//!   "P001": {"name": "...", "city": "...", "age": 28, "gender": "female",
//!            "height": 1.75, "weight": 70.0, "bmi": 22.86, "verdict": "Normal"},
//!   ...
//! }
//! ```
//!
//! The id is the key and is re-attached on read.

use crate::config::CoreConfig;
use crate::error::{PremiumError, PremiumResult};
use crate::patient::{
    parse_patient_id, PatientDetails, PatientInput, PatientRecord, PatientUpdate, SortField,
    SortOrder,
};
use crate::repositories::store::JsonFileStore;
use premium_types::PatientId;
use std::sync::Arc;

/// Pure patient data operations - no API concerns
#[derive(Clone, Debug)]
pub struct PatientService {
    store: Arc<JsonFileStore>,
}

impl PatientService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            store: Arc::new(JsonFileStore::new(cfg.patients_file())),
        }
    }

    /// Lists every patient, keyed by id order.
    pub fn list(&self) -> PremiumResult<Vec<PatientRecord>> {
        let data = self.store.load()?;
        Ok(data
            .into_iter()
            .map(|(id, details)| to_record(id, details))
            .collect())
    }

    /// Reads one patient.
    ///
    /// # Errors
    ///
    /// Returns `PremiumError::NotFound` if no patient has this id.
    pub fn view(&self, id: &str) -> PremiumResult<PatientRecord> {
        let mut data = self.store.load()?;
        let details = data
            .remove(id)
            .ok_or_else(|| PremiumError::NotFound(id.to_string()))?;
        Ok(to_record(id.to_string(), details))
    }

    /// Lists every patient ordered by `field`. Ties keep id order.
    pub fn sorted(&self, field: SortField, order: SortOrder) -> PremiumResult<Vec<PatientRecord>> {
        let mut records = self.list()?;
        records.sort_by(|a, b| {
            let ordering = a
                .details
                .sort_key(field)
                .total_cmp(&b.details.sort_key(field));
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        Ok(records)
    }

    /// Creates a patient.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for invalid fields and `Conflict` if the id is taken.
    pub fn create(&self, id: &str, input: PatientInput) -> PremiumResult<PatientRecord> {
        let id = parse_patient_id(id)?;
        let details = PatientDetails::from_input(input)?;

        self.store.modify(|data| {
            if data.contains_key(id.as_str()) {
                return Err(PremiumError::Conflict(id.to_string()));
            }
            data.insert(id.to_string(), details.clone());
            Ok(())
        })?;

        tracing::info!("created patient {}", id);
        Ok(PatientRecord { id, details })
    }

    /// Applies a partial update and recomputes `bmi` and `verdict`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if a supplied field is out of range (checked before the lookup),
    /// `NotFound` if the id is unknown, and `Validation` if the merged record is invalid.
    pub fn update(&self, id: &str, update: PatientUpdate) -> PremiumResult<PatientRecord> {
        update.validate()?;

        let updated = self.store.modify(|data| {
            let existing = data
                .get(id)
                .ok_or_else(|| PremiumError::NotFound(id.to_string()))?;
            let updated = existing.apply(update)?;
            data.insert(id.to_string(), updated.clone());
            Ok(updated)
        })?;

        tracing::info!("updated patient {}", id);
        Ok(to_record(id.to_string(), updated))
    }

    /// Deletes a patient.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is unknown.
    pub fn delete(&self, id: &str) -> PremiumResult<()> {
        self.store.modify(|data| {
            data.remove(id)
                .map(|_| ())
                .ok_or_else(|| PremiumError::NotFound(id.to_string()))
        })?;

        tracing::info!("deleted patient {}", id);
        Ok(())
    }
}

fn to_record(id: String, details: PatientDetails) -> PatientRecord {
    PatientRecord {
        id: PatientId::from_stored(id),
        details,
    }
}
