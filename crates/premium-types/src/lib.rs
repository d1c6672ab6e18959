//! Identifier types shared by the premium workspace.

/// Errors that can occur when creating a [`PatientId`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The id was empty or contained only whitespace
    #[error("Patient ID cannot be empty")]
    Blank,
}

/// A patient id, held exactly as the client supplied it.
///
/// The id is the key of the patient store, so it is never trimmed or re-cased: the same
/// string that created a record is the one that finds it again.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PatientId(String);

impl PatientId {
    /// Validates an id supplied for a new record.
    ///
    /// # Errors
    ///
    /// Returns `IdError::Blank` if the input is empty or whitespace only.
    pub fn new(input: impl Into<String>) -> Result<Self, IdError> {
        let id = input.into();
        if id.trim().is_empty() {
            return Err(IdError::Blank);
        }
        Ok(Self(id))
    }

    /// Wraps a key read back from the store. Stored keys are accepted as they are.
    pub fn from_stored(key: String) -> Self {
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for PatientId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
