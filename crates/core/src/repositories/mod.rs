//! Repository management modules.
//!
//! Persistence for patient records: the flat JSON file store and the service that performs
//! validated CRUD operations on top of it.

pub mod patients;
pub mod store;
