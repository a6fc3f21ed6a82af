//! SQLite-backed `RegistryStore` implementation using Diesel ORM.
//!
//! Each operation checks out one pooled connection, runs a single
//! auto-committed statement and maps the rows it gets back field by field
//! into domain records.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::warn;

use crate::domain::ports::{RegistryStore, RegistryStoreError};
use crate::domain::{
    Appointment, AppointmentId, AppointmentStatus, NewAppointment, NewPatient, NewStaffMember,
    Patient, PatientId, Specialty, StaffId, StaffMember,
};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    AppointmentRow, NewAppointmentRow, NewPatientRow, NewStaffRow, PatientRow, PatientUpdate,
    StaffRow,
};
use super::pool::DbPool;
use super::schema::{appointments, patients, staff};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Diesel-backed implementation of the [`RegistryStore`] port.
#[derive(Clone)]
pub struct DieselRegistryStore {
    pool: DbPool,
}

impl DieselRegistryStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn with_connection<T>(
        &self,
        operation: impl FnOnce(&mut SqliteConnection) -> QueryResult<T>,
    ) -> Result<T, RegistryStoreError> {
        let mut pooled = self.pool.get().map_err(map_pool_error)?;
        let conn: &mut SqliteConnection = &mut pooled;
        operation(conn).map_err(map_diesel_error)
    }
}

/// Convert a patients row into a domain patient.
///
/// Birth dates that do not parse as `YYYY-MM-DD` are dropped with a warning.
fn row_to_patient(row: PatientRow) -> Patient {
    let birth_date = row.birth_date.as_deref().and_then(|raw| {
        if raw.trim().is_empty() {
            return None;
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .inspect_err(|_| {
                warn!(
                    value = raw,
                    patient_id = row.id,
                    "unparseable birth_date value, treating as absent"
                );
            })
            .ok()
    });

    Patient {
        id: PatientId::new(row.id),
        identity_number: row.identity_number,
        first_name: row.first_name,
        last_name: row.last_name,
        birth_date,
        phone: row.phone,
        address: row.address,
        email: row.email,
        registered_at: row.registered_at,
    }
}

/// Convert a staff row into a domain staff member.
fn row_to_staff(row: StaffRow) -> StaffMember {
    let specialty = Specialty::from_label(&row.specialty).unwrap_or_else(|| {
        warn!(
            value = row.specialty.as_str(),
            staff_id = row.id,
            "unrecognised specialty value, defaulting to {}",
            Specialty::default()
        );
        Specialty::default()
    });

    StaffMember {
        id: StaffId::new(row.id),
        identity_number: row.identity_number,
        first_name: row.first_name,
        last_name: row.last_name,
        specialty,
        phone: row.phone,
        email: row.email,
        registered_at: row.registered_at,
    }
}

/// Convert an appointments row into a domain appointment.
///
/// Legacy status labels are accepted; anything else falls back to the
/// default status with a warning.
fn row_to_appointment(row: AppointmentRow) -> Appointment {
    let status = row.status.parse::<AppointmentStatus>().unwrap_or_else(|_| {
        warn!(
            value = row.status.as_str(),
            appointment_id = row.id,
            "unrecognised status value, defaulting to {}",
            AppointmentStatus::default()
        );
        AppointmentStatus::default()
    });

    Appointment {
        id: AppointmentId::new(row.id),
        patient_id: PatientId::new(row.patient_id),
        staff_id: StaffId::new(row.staff_id),
        date: row.date,
        time: row.time,
        reason: row.reason,
        status,
        created_at: row.created_at,
    }
}

fn format_birth_date(birth_date: Option<NaiveDate>) -> Option<String> {
    birth_date.map(|date| date.format(DATE_FORMAT).to_string())
}

impl RegistryStore for DieselRegistryStore {
    fn load_patients(&self) -> Result<Vec<Patient>, RegistryStoreError> {
        let rows = self.with_connection(|conn| {
            patients::table
                .order(patients::id.asc())
                .select(PatientRow::as_select())
                .load(conn)
        })?;
        Ok(rows.into_iter().map(row_to_patient).collect())
    }

    fn load_staff(&self) -> Result<Vec<StaffMember>, RegistryStoreError> {
        let rows = self.with_connection(|conn| {
            staff::table
                .order(staff::id.asc())
                .select(StaffRow::as_select())
                .load(conn)
        })?;
        Ok(rows.into_iter().map(row_to_staff).collect())
    }

    fn load_appointments(&self) -> Result<Vec<Appointment>, RegistryStoreError> {
        let rows = self.with_connection(|conn| {
            appointments::table
                .order(appointments::id.asc())
                .select(AppointmentRow::as_select())
                .load(conn)
        })?;
        Ok(rows.into_iter().map(row_to_appointment).collect())
    }

    fn insert_patient(&self, patient: &NewPatient) -> Result<Patient, RegistryStoreError> {
        let new_row = NewPatientRow {
            identity_number: &patient.identity_number,
            first_name: &patient.first_name,
            last_name: &patient.last_name,
            birth_date: format_birth_date(patient.birth_date),
            phone: patient.phone.as_deref(),
            address: patient.address.as_deref(),
            email: patient.email.as_deref(),
        };

        let row = self.with_connection(|conn| {
            diesel::insert_into(patients::table)
                .values(&new_row)
                .returning(PatientRow::as_returning())
                .get_result(conn)
        })?;
        Ok(row_to_patient(row))
    }

    fn update_patient(&self, patient: &Patient) -> Result<Option<Patient>, RegistryStoreError> {
        let changes = PatientUpdate {
            identity_number: &patient.identity_number,
            first_name: &patient.first_name,
            last_name: &patient.last_name,
            birth_date: format_birth_date(patient.birth_date),
            phone: patient.phone.as_deref(),
            address: patient.address.as_deref(),
            email: patient.email.as_deref(),
        };

        let row = self.with_connection(|conn| {
            diesel::update(patients::table.find(patient.id.get()))
                .set(&changes)
                .returning(PatientRow::as_returning())
                .get_result(conn)
                .optional()
        })?;
        Ok(row.map(row_to_patient))
    }

    fn delete_patient(&self, id: PatientId) -> Result<bool, RegistryStoreError> {
        let deleted = self.with_connection(|conn| {
            diesel::delete(patients::table.find(id.get())).execute(conn)
        })?;
        Ok(deleted > 0)
    }

    fn insert_staff(&self, member: &NewStaffMember) -> Result<StaffMember, RegistryStoreError> {
        let new_row = NewStaffRow {
            identity_number: &member.identity_number,
            first_name: &member.first_name,
            last_name: &member.last_name,
            specialty: member.specialty.label(),
            phone: member.phone.as_deref(),
            email: member.email.as_deref(),
        };

        let row = self.with_connection(|conn| {
            diesel::insert_into(staff::table)
                .values(&new_row)
                .returning(StaffRow::as_returning())
                .get_result(conn)
        })?;
        Ok(row_to_staff(row))
    }

    fn insert_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, RegistryStoreError> {
        let new_row = NewAppointmentRow {
            patient_id: appointment.patient_id.get(),
            staff_id: appointment.staff_id.get(),
            date: &appointment.date,
            time: &appointment.time,
            reason: appointment.reason.as_deref(),
            status: appointment.status.label(),
        };

        let row = self.with_connection(|conn| {
            diesel::insert_into(appointments::table)
                .values(&new_row)
                .returning(AppointmentRow::as_returning())
                .get_result(conn)
        })?;
        Ok(row_to_appointment(row))
    }

    fn update_appointment_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, RegistryStoreError> {
        let row = self.with_connection(|conn| {
            diesel::update(appointments::table.find(id.get()))
                .set(appointments::status.eq(status.label()))
                .returning(AppointmentRow::as_returning())
                .get_result(conn)
                .optional()
        })?;
        Ok(row.map(row_to_appointment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rstest::rstest;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .expect("valid timestamp")
    }

    fn staff_row(specialty: &str) -> StaffRow {
        StaffRow {
            id: 1,
            identity_number: "1101234567".to_owned(),
            first_name: "María".to_owned(),
            last_name: "Rodríguez".to_owned(),
            specialty: specialty.to_owned(),
            phone: None,
            email: None,
            registered_at: timestamp(),
        }
    }

    fn appointment_row(status: &str) -> AppointmentRow {
        AppointmentRow {
            id: 1,
            patient_id: 1,
            staff_id: 1,
            date: "2024-03-15".to_owned(),
            time: "09:00".to_owned(),
            reason: Some("Control anual".to_owned()),
            status: status.to_owned(),
            created_at: timestamp(),
        }
    }

    #[rstest]
    #[case("Pediatría", Specialty::Pediatrics)]
    #[case("Oncología", Specialty::GeneralMedicine)]
    fn staff_rows_coerce_unknown_specialties(#[case] stored: &str, #[case] expected: Specialty) {
        assert_eq!(row_to_staff(staff_row(stored)).specialty, expected);
    }

    #[rstest]
    #[case("Confirmed", AppointmentStatus::Confirmed)]
    #[case("Confirmada", AppointmentStatus::Confirmed)]
    #[case("No asistió", AppointmentStatus::NoShow)]
    #[case("pending", AppointmentStatus::Scheduled)]
    fn appointment_rows_accept_legacy_status_labels(
        #[case] stored: &str,
        #[case] expected: AppointmentStatus,
    ) {
        assert_eq!(row_to_appointment(appointment_row(stored)).status, expected);
    }

    #[rstest]
    #[case(Some("1980-05-15"), NaiveDate::from_ymd_opt(1980, 5, 15))]
    #[case(Some("15/05/1980"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn patient_rows_parse_birth_dates(
        #[case] stored: Option<&str>,
        #[case] expected: Option<NaiveDate>,
    ) {
        let row = PatientRow {
            id: 1,
            identity_number: "1101122334".to_owned(),
            first_name: "Pedro".to_owned(),
            last_name: "Ramírez".to_owned(),
            birth_date: stored.map(str::to_owned),
            phone: None,
            address: None,
            email: None,
            registered_at: timestamp(),
        };

        assert_eq!(row_to_patient(row).birth_date, expected);
    }
}
