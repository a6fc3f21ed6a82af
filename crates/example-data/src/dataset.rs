//! Sample dataset parsing and validation.

use std::collections::HashSet;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;

use crate::error::DatasetError;
use crate::seed::{AppointmentSeed, PatientSeed, StaffSeed};

/// Current supported dataset version.
const SUPPORTED_VERSION: u32 = 1;

/// JSON text of the dataset shipped with the crate: five staff members, five
/// patients and one appointment for each, dated 2024-03-15 to 2024-03-17.
pub const BUNDLED_DATASET: &str = include_str!("../fixtures/sample_data.json");

/// A validated set of staff, patients and appointments.
///
/// ## Invariants
/// - Identity numbers are non-blank and unique within staff and within
///   patients.
/// - Every appointment names a patient and a staff member present in the
///   dataset.
///
/// # Example
///
/// ```
/// use example_data::SampleDataset;
///
/// let json = r#"{
///     "version": 1,
///     "staff": [{"identityNumber": "1", "firstName": "Ana", "lastName": "González",
///                "specialty": "Ginecología"}],
///     "patients": [{"identityNumber": "2", "firstName": "José", "lastName": "Mendoza"}],
///     "appointments": [{"patientIdentityNumber": "2", "staffIdentityNumber": "1",
///                       "date": "2024-03-16", "time": "11:00"}]
/// }"#;
///
/// let dataset = SampleDataset::from_json(json).expect("valid dataset");
/// assert_eq!(dataset.appointments().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleDataset {
    version: u32,
    staff: Vec<StaffSeed>,
    patients: Vec<PatientSeed>,
    appointments: Vec<AppointmentSeed>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSampleDataset {
    version: u32,
    #[serde(default)]
    staff: Vec<StaffSeed>,
    #[serde(default)]
    patients: Vec<PatientSeed>,
    #[serde(default)]
    appointments: Vec<AppointmentSeed>,
}

impl SampleDataset {
    /// Parses the dataset bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] only if the bundled fixture has been edited
    /// into an invalid state.
    pub fn bundled() -> Result<Self, DatasetError> {
        Self::from_json(BUNDLED_DATASET)
    }

    /// Parses a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if:
    /// - The JSON is malformed or a required field is missing
    /// - The version is unsupported
    /// - An identity number is blank or repeated
    /// - An appointment references an unknown patient or staff member
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let raw: RawSampleDataset =
            serde_json::from_str(json).map_err(|e| DatasetError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::IoError`] naming `path` if the file cannot be
    /// read, or any error from [`SampleDataset::from_json`].
    pub fn from_file(path: &Path) -> Result<Self, DatasetError> {
        let io_error = |message: String| DatasetError::IoError {
            path: path.to_path_buf(),
            message,
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| io_error("dataset path must be a file".to_owned()))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|e| io_error(e.to_string()))?;
        let contents = dir
            .read_to_string(file_name)
            .map_err(|e| io_error(e.to_string()))?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSampleDataset) -> Result<Self, DatasetError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(DatasetError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let staff_numbers = unique_identity_numbers(
            "staff",
            raw.staff.iter().map(|s| s.identity_number.as_str()),
        )?;
        let patient_numbers = unique_identity_numbers(
            "patients",
            raw.patients.iter().map(|p| p.identity_number.as_str()),
        )?;

        for (index, appointment) in raw.appointments.iter().enumerate() {
            if !patient_numbers.contains(appointment.patient_identity_number.as_str()) {
                return Err(DatasetError::UnknownPatient {
                    index,
                    identity_number: appointment.patient_identity_number.clone(),
                });
            }
            if !staff_numbers.contains(appointment.staff_identity_number.as_str()) {
                return Err(DatasetError::UnknownStaff {
                    index,
                    identity_number: appointment.staff_identity_number.clone(),
                });
            }
        }

        Ok(Self {
            version: raw.version,
            staff: raw.staff,
            patients: raw.patients,
            appointments: raw.appointments,
        })
    }

    /// Returns the dataset version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the staff members, in file order.
    #[must_use]
    pub fn staff(&self) -> &[StaffSeed] {
        &self.staff
    }

    /// Returns the patients, in file order.
    #[must_use]
    pub fn patients(&self) -> &[PatientSeed] {
        &self.patients
    }

    /// Returns the appointments, in file order.
    #[must_use]
    pub fn appointments(&self) -> &[AppointmentSeed] {
        &self.appointments
    }
}

fn unique_identity_numbers<'a>(
    collection: &'static str,
    numbers: impl Iterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, DatasetError> {
    let mut seen = HashSet::new();
    for (index, number) in numbers.enumerate() {
        if number.trim().is_empty() {
            return Err(DatasetError::BlankIdentityNumber { collection, index });
        }
        if !seen.insert(number) {
            return Err(DatasetError::DuplicateIdentityNumber {
                collection,
                value: number.to_owned(),
            });
        }
    }
    Ok(seen)
}
