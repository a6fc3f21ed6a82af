//! Error types for the example-data crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating a sample dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// The dataset file could not be read.
    #[error("failed to read dataset file at '{path}': {message}")]
    IoError {
        /// Path to the dataset file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The dataset JSON is malformed or missing required fields.
    #[error("invalid dataset JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The dataset version is not supported.
    #[error("unsupported dataset version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the dataset.
        actual: u32,
    },

    /// A staff member or patient has a blank identity number.
    #[error("{collection} entry {index} has a blank identity number")]
    BlankIdentityNumber {
        /// `staff` or `patients`.
        collection: &'static str,
        /// Position of the entry in its array.
        index: usize,
    },

    /// Two entries of the same collection share an identity number.
    #[error("{collection} identity number {value} appears more than once")]
    DuplicateIdentityNumber {
        /// `staff` or `patients`.
        collection: &'static str,
        /// The repeated identity number.
        value: String,
    },

    /// An appointment names a patient that is not in the dataset.
    #[error("appointment {index} references unknown patient {identity_number}")]
    UnknownPatient {
        /// Position of the appointment in its array.
        index: usize,
        /// Identity number that did not resolve.
        identity_number: String,
    },

    /// An appointment names a staff member that is not in the dataset.
    #[error("appointment {index} references unknown staff member {identity_number}")]
    UnknownStaff {
        /// Position of the appointment in its array.
        index: usize,
        /// Identity number that did not resolve.
        identity_number: String,
    },
}
