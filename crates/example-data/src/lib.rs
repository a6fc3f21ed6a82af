//! Sample staff, patients and appointments for the appointment registry.
//!
//! This crate describes a demonstration dataset in JSON and validates it
//! before anything is written to a registry. It is independent of the
//! registry's domain types: records refer to one another by national
//! identity number rather than by storage identifiers, and enumerated
//! values (specialty, status) are kept as the labels found in the file.
//!
//! # Overview
//!
//! - Load a dataset from JSON text or a file
//! - Validate the version, identity numbers and appointment references
//! - Fall back to the bundled dataset of the welfare office's demo data
//!
//! # Example
//!
//! ```
//! use example_data::SampleDataset;
//!
//! let dataset = SampleDataset::bundled().expect("bundled dataset is valid");
//!
//! assert_eq!(dataset.staff().len(), 5);
//! assert_eq!(dataset.patients().len(), 5);
//! assert_eq!(dataset.appointments().len(), 5);
//! ```

mod dataset;
mod error;
mod seed;

pub use dataset::{BUNDLED_DATASET, SampleDataset};
pub use error::DatasetError;
pub use seed::{AppointmentSeed, PatientSeed, StaffSeed};
