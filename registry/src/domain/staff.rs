//! Staff members who attend appointments.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::error::RegistryError;
use super::patient::{non_blank, validate_person_fields};

/// Storage-assigned staff identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(i64);

impl StaffId {
    /// Wrap a raw identifier read from storage.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Services offered by the office. The stored label is the Spanish name used
/// on the office's forms.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Specialty {
    #[default]
    #[serde(rename = "Medicina General")]
    GeneralMedicine,
    #[serde(rename = "Pediatría")]
    Pediatrics,
    #[serde(rename = "Ginecología")]
    Gynecology,
    #[serde(rename = "Odontología")]
    Dentistry,
    #[serde(rename = "Cardiología")]
    Cardiology,
    #[serde(rename = "Trabajo Social")]
    SocialWork,
    #[serde(rename = "Psicología")]
    Psychology,
    #[serde(rename = "Nutrición")]
    Nutrition,
}

impl Specialty {
    /// Every specialty, in the order the office lists them.
    pub const ALL: [Self; 8] = [
        Self::GeneralMedicine,
        Self::Pediatrics,
        Self::Gynecology,
        Self::Dentistry,
        Self::Cardiology,
        Self::SocialWork,
        Self::Psychology,
        Self::Nutrition,
    ];

    /// Label stored in the `specialty` column.
    pub const fn label(self) -> &'static str {
        match self {
            Self::GeneralMedicine => "Medicina General",
            Self::Pediatrics => "Pediatría",
            Self::Gynecology => "Ginecología",
            Self::Dentistry => "Odontología",
            Self::Cardiology => "Cardiología",
            Self::SocialWork => "Trabajo Social",
            Self::Psychology => "Psicología",
            Self::Nutrition => "Nutrición",
        }
    }

    /// Exact match against the stored labels.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|specialty| specialty.label() == label)
    }

    /// Parse a label, falling back to [`Specialty::GeneralMedicine`] for
    /// anything unrecognised.
    ///
    /// # Examples
    /// ```
    /// use registry::domain::Specialty;
    ///
    /// assert_eq!(Specialty::parse_or_default("Pediatría"), Specialty::Pediatrics);
    /// assert_eq!(Specialty::parse_or_default("Astrology"), Specialty::GeneralMedicine);
    /// ```
    pub fn parse_or_default(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A staff member as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    /// Identifier assigned by storage.
    pub id: StaffId,
    /// National identity number, unique across staff.
    pub identity_number: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Service the staff member provides.
    pub specialty: Specialty,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// When the staff member was registered.
    pub registered_at: NaiveDateTime,
}

impl StaffMember {
    /// `"{first} {last}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive match against names and the specialty label.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.specialty.label(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl fmt::Display for StaffMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dr. {} - {}", self.full_name(), self.specialty)
    }
}

/// A staff member that has not been written to storage yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStaffMember {
    /// National identity number, unique across staff.
    pub identity_number: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Service the staff member provides.
    pub specialty: Specialty,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
}

impl NewStaffMember {
    /// Start a new staff record. `specialty` is coerced with
    /// [`Specialty::parse_or_default`].
    pub fn new(
        identity_number: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        specialty: &str,
    ) -> Self {
        Self {
            identity_number: identity_number.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            specialty: Specialty::parse_or_default(specialty),
            phone: None,
            email: None,
        }
    }

    /// Set the phone number. Blank values are stored as absent.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = non_blank(phone.into());
        self
    }

    /// Set the email address. Blank values are stored as absent.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_blank(email.into());
        self
    }

    /// Reject records missing a required field.
    ///
    /// # Errors
    /// Returns [`RegistryError::Validation`] naming the first blank field.
    pub fn validate(&self) -> Result<(), RegistryError> {
        validate_person_fields(&self.identity_number, &self.first_name, &self.last_name)
    }
}
