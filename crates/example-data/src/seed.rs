//! Record types making up a sample dataset.
//!
//! These types mirror the registry's records without depending on them.
//! Identity numbers stand in for storage identifiers, and labels are kept
//! as written so the registry decides how to interpret them.

use serde::{Deserialize, Serialize};

/// A staff member to register.
///
/// # Example
///
/// ```
/// use example_data::StaffSeed;
///
/// let json = r#"{
///     "identityNumber": "1101234567",
///     "firstName": "María",
///     "lastName": "Rodríguez",
///     "specialty": "Medicina General"
/// }"#;
/// let seed: StaffSeed = serde_json::from_str(json).expect("valid staff seed");
///
/// assert_eq!(seed.specialty, "Medicina General");
/// assert!(seed.phone.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSeed {
    /// National identity number, unique among staff.
    pub identity_number: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Specialty label, e.g. `Pediatría`.
    pub specialty: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Contact email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// A patient to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSeed {
    /// National identity number, unique among patients.
    pub identity_number: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Birth date as `YYYY-MM-DD`.
    #[serde(default)]
    pub birth_date: Option<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Contact email address.
    #[serde(default)]
    pub email: Option<String>,
}

/// An appointment to book between a dataset patient and staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSeed {
    /// Identity number of a patient in the same dataset.
    pub patient_identity_number: String,
    /// Identity number of a staff member in the same dataset.
    pub staff_identity_number: String,
    /// Appointment date, `YYYY-MM-DD` by convention.
    pub date: String,
    /// Appointment time, `HH:MM` by convention.
    pub time: String,
    /// Reason for the visit.
    #[serde(default)]
    pub reason: Option<String>,
    /// Initial status label; the registry's default applies when absent.
    #[serde(default)]
    pub status: Option<String>,
}
