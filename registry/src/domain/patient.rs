//! Patient records registered with the welfare office.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::RegistryError;

/// Storage-assigned patient identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientId(i64);

impl PatientId {
    /// Wrap a raw identifier read from storage.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A patient as stored, including the storage-assigned fields.
///
/// ## Invariants
/// - `identity_number` is unique across patients (enforced by storage).
/// - `identity_number`, `first_name` and `last_name` are non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Identifier assigned by storage.
    pub id: PatientId,
    /// National identity number, unique across patients.
    pub identity_number: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth, when known.
    pub birth_date: Option<NaiveDate>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// When the patient was registered.
    pub registered_at: NaiveDateTime,
}

impl Patient {
    /// `"{first} {last}"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years on `today`.
    ///
    /// Returns `None` without a birth date or when the birth date lies after
    /// `today`.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use registry::domain::NewPatient;
    ///
    /// let born = NaiveDate::from_ymd_opt(1980, 5, 15);
    /// let today = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap_or_default();
    /// let patient = NewPatient::new("1101122334", "Pedro", "Ramírez").with_birth_date(born);
    /// assert_eq!(patient.age_on(today), Some(43));
    /// ```
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        age_between(self.birth_date?, today)
    }

    /// Matches the patient search rules: names case-insensitively, identity
    /// number case-sensitively.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.first_name.to_lowercase().contains(&needle)
            || self.last_name.to_lowercase().contains(&needle)
            || self.identity_number.contains(query)
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient: {} - Identity number: {}",
            self.full_name(),
            self.identity_number
        )
    }
}

/// A patient that has not been written to storage yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    /// National identity number, unique across patients.
    pub identity_number: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Date of birth, when known.
    pub birth_date: Option<NaiveDate>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
}

impl NewPatient {
    /// Start a new patient record from its required fields.
    pub fn new(
        identity_number: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            identity_number: identity_number.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    /// Set the birth date.
    #[must_use]
    pub fn with_birth_date(mut self, birth_date: Option<NaiveDate>) -> Self {
        self.birth_date = birth_date;
        self
    }

    /// Set the phone number. Blank values are stored as absent.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = non_blank(phone.into());
        self
    }

    /// Set the postal address. Blank values are stored as absent.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = non_blank(address.into());
        self
    }

    /// Set the email address. Blank values are stored as absent.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_blank(email.into());
        self
    }

    /// Age in whole years on `today`; see [`Patient::age_on`].
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        age_between(self.birth_date?, today)
    }

    /// Reject records missing a required field.
    ///
    /// # Errors
    /// Returns [`RegistryError::Validation`] naming the first blank field.
    pub fn validate(&self) -> Result<(), RegistryError> {
        validate_person_fields(&self.identity_number, &self.first_name, &self.last_name)
    }
}

pub(crate) fn validate_person_fields(
    identity_number: &str,
    first_name: &str,
    last_name: &str,
) -> Result<(), RegistryError> {
    for (field, value) in [
        ("identity number", identity_number),
        ("first name", first_name),
        ("last name", last_name),
    ] {
        if value.trim().is_empty() {
            return Err(RegistryError::validation(field, "must not be blank"));
        }
    }
    Ok(())
}

pub(crate) fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn age_between(birth_date: NaiveDate, today: NaiveDate) -> Option<u32> {
    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn stored(new: NewPatient) -> Patient {
        Patient {
            id: PatientId::new(1),
            identity_number: new.identity_number,
            first_name: new.first_name,
            last_name: new.last_name,
            birth_date: new.birth_date,
            phone: new.phone,
            address: new.address,
            email: new.email,
            registered_at: date(2024, 1, 1).and_hms_opt(8, 0, 0).expect("valid time"),
        }
    }

    #[rstest]
    #[case::day_before_birthday(date(2024, 5, 14), Some(43))]
    #[case::on_birthday(date(2024, 5, 15), Some(44))]
    #[case::later_month(date(2024, 11, 1), Some(44))]
    #[case::earlier_month(date(2024, 2, 29), Some(43))]
    #[case::before_birth(date(1979, 1, 1), None)]
    fn age_applies_day_of_year_correction(#[case] today: NaiveDate, #[case] expected: Option<u32>) {
        let patient = stored(
            NewPatient::new("1101122334", "Pedro", "Ramírez").with_birth_date(Some(date(1980, 5, 15))),
        );
        assert_eq!(patient.age_on(today), expected);
    }

    #[rstest]
    fn age_is_absent_without_birth_date() {
        let patient = stored(NewPatient::new("1101122334", "Pedro", "Ramírez"));
        assert_eq!(patient.age_on(date(2024, 1, 1)), None);
    }

    #[rstest]
    #[case::first_name_any_case("pedro", true)]
    #[case::last_name_fragment("RAMÍ", true)]
    #[case::identity_prefix("110112", true)]
    #[case::unrelated("Mariana", false)]
    fn matches_names_and_identity_number(#[case] query: &str, #[case] expected: bool) {
        let patient = stored(NewPatient::new("1101122334", "Pedro", "Ramírez"));
        assert_eq!(patient.matches(query), expected);
    }

    #[rstest]
    fn display_mentions_name_and_identity_number() {
        let patient = stored(NewPatient::new("1101122334", "Pedro", "Ramírez"));
        assert_eq!(
            patient.to_string(),
            "Patient: Pedro Ramírez - Identity number: 1101122334"
        );
    }

    #[rstest]
    #[case::identity_number(NewPatient::new(" ", "Pedro", "Ramírez"), "identity number")]
    #[case::first_name(NewPatient::new("1101122334", "", "Ramírez"), "first name")]
    #[case::last_name(NewPatient::new("1101122334", "Pedro", "\t"), "last name")]
    fn validate_rejects_blank_required_fields(#[case] patient: NewPatient, #[case] field: &str) {
        let err = patient.validate().expect_err("blank field is rejected");
        assert!(matches!(err, RegistryError::Validation { field: f, .. } if f == field));
    }

    #[rstest]
    fn blank_contact_details_are_absent() {
        let patient = NewPatient::new("1101122334", "Pedro", "Ramírez")
            .with_phone("")
            .with_address("Calle Bolívar")
            .with_email("  ");
        assert_eq!(patient.phone, None);
        assert_eq!(patient.address.as_deref(), Some("Calle Bolívar"));
        assert_eq!(patient.email, None);
    }
}
