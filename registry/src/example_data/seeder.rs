//! Write a sample dataset through the registry.

use std::collections::HashMap;

use chrono::NaiveDate;
use example_data::{PatientSeed, SampleDataset, StaffSeed};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::RegistryStore;
use crate::domain::{
    AppointmentRegistry, NewAppointment, NewPatient, NewStaffMember, PatientId, RegistryError,
    StaffId,
};

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The dataset was written.
    Applied {
        /// Staff members registered.
        staff: usize,
        /// Patients registered (existing patients are reused).
        patients: usize,
        /// Appointments booked.
        appointments: usize,
    },
    /// The registry already had staff, so nothing was written.
    AlreadySeeded,
}

/// Errors raised while writing a dataset.
#[derive(Debug, Error)]
pub enum SeedingError {
    /// A patient's birth date is not `YYYY-MM-DD`.
    #[error("patient {identity_number} has an invalid birth date {value:?}")]
    InvalidBirthDate {
        /// Identity number of the patient.
        identity_number: String,
        /// The rejected value.
        value: String,
    },
    /// An appointment names someone the seeder did not register.
    #[error("appointment references unregistered identity number {identity_number}")]
    UnresolvedReference {
        /// The identity number that did not resolve.
        identity_number: String,
    },
    /// The registry rejected a record.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Register every staff member, patient and appointment in `dataset`.
///
/// Skipped with [`SeedOutcome::AlreadySeeded`] when the registry already
/// holds at least one staff member. Patients whose identity number is
/// already registered are reused rather than inserted again. Writes stop at
/// the first failure; records written before it stay.
///
/// # Errors
///
/// Returns [`SeedingError`] when a birth date does not parse or the registry
/// rejects a record.
pub fn seed_sample_data<S>(
    registry: &mut AppointmentRegistry<S>,
    dataset: &SampleDataset,
) -> Result<SeedOutcome, SeedingError>
where
    S: RegistryStore,
{
    if registry.staff().next().is_some() {
        info!("registry already has staff; sample data skipped");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let mut staff_ids: HashMap<&str, StaffId> = HashMap::new();
    for seed in dataset.staff() {
        let id = registry.add_staff(new_staff_member(seed))?;
        staff_ids.insert(seed.identity_number.as_str(), id);
    }

    let mut patient_ids: HashMap<&str, PatientId> = HashMap::new();
    let mut patients_added = 0;
    for seed in dataset.patients() {
        let existing = registry
            .patients()
            .find(|p| p.identity_number == seed.identity_number)
            .map(|p| p.id);
        let id = match existing {
            Some(id) => id,
            None => {
                patients_added += 1;
                registry.add_patient(new_patient(seed)?)?
            }
        };
        patient_ids.insert(seed.identity_number.as_str(), id);
    }

    for seed in dataset.appointments() {
        let patient_id = resolve(&patient_ids, &seed.patient_identity_number)?;
        let staff_id = resolve(&staff_ids, &seed.staff_identity_number)?;
        let mut appointment = NewAppointment::new(patient_id, staff_id, &seed.date, &seed.time);
        if let Some(reason) = &seed.reason {
            appointment = appointment.with_reason(reason.as_str());
        }
        if let Some(status) = &seed.status {
            appointment = appointment.with_status_label(status);
        }
        registry.add_appointment(appointment)?;
    }

    let outcome = SeedOutcome::Applied {
        staff: staff_ids.len(),
        patients: patients_added,
        appointments: dataset.appointments().len(),
    };
    info!(?outcome, "sample data applied");
    Ok(outcome)
}

fn new_staff_member(seed: &StaffSeed) -> NewStaffMember {
    let mut member = NewStaffMember::new(
        seed.identity_number.as_str(),
        seed.first_name.as_str(),
        seed.last_name.as_str(),
        &seed.specialty,
    );
    if let Some(phone) = &seed.phone {
        member = member.with_phone(phone.as_str());
    }
    if let Some(email) = &seed.email {
        member = member.with_email(email.as_str());
    }
    member
}

fn new_patient(seed: &PatientSeed) -> Result<NewPatient, SeedingError> {
    let birth_date = seed
        .birth_date
        .as_deref()
        .map(|raw| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                SeedingError::InvalidBirthDate {
                    identity_number: seed.identity_number.clone(),
                    value: raw.to_owned(),
                }
            })
        })
        .transpose()?;

    let mut patient = NewPatient::new(
        seed.identity_number.as_str(),
        seed.first_name.as_str(),
        seed.last_name.as_str(),
    )
    .with_birth_date(birth_date);
    if let Some(phone) = &seed.phone {
        patient = patient.with_phone(phone.as_str());
    }
    if let Some(address) = &seed.address {
        patient = patient.with_address(address.as_str());
    }
    if let Some(email) = &seed.email {
        patient = patient.with_email(email.as_str());
    }
    Ok(patient)
}

fn resolve<T: Copy>(ids: &HashMap<&str, T>, identity_number: &str) -> Result<T, SeedingError> {
    ids.get(identity_number)
        .copied()
        .ok_or_else(|| SeedingError::UnresolvedReference {
            identity_number: identity_number.to_owned(),
        })
}
