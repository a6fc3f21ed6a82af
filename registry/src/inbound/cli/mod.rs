//! Command-line adapter: parses commands and dispatches them to the registry.
//!
//! Handlers stay thin. They translate arguments into domain calls and hand
//! the results to [`render`]; the registry itself never formats output.

pub mod render;

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use example_data::{DatasetError, SampleDataset};
use thiserror::Error;
use tracing::debug;

use crate::config::RegistrySettings;
use crate::domain::ports::RegistryStore;
use crate::domain::{
    AppointmentId, AppointmentRegistry, AppointmentStatus, NewAppointment, NewPatient,
    NewStaffMember, Patient, PatientId, RegistryError, StaffId,
};
use crate::example_data::{SeedOutcome, SeedingError, load_dataset, seed_sample_data};

/// `registry` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "registry",
    about = "Keep the welfare office's patients, staff and appointments",
    version
)]
pub struct CliArgs {
    /// SQLite database file. Overrides `REGISTRY_DATABASE_PATH`.
    #[arg(long = "database", value_name = "path", global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Registry commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print every patient, staff member and appointment.
    Report,
    /// Print registry statistics as JSON.
    Stats,
    /// List patients, optionally filtered by name or identity number.
    Patients {
        /// Text to search for.
        query: Option<String>,
    },
    /// List staff, optionally filtered by name or specialty.
    Staff {
        /// Text to search for.
        query: Option<String>,
    },
    /// List appointments matching one filter.
    Appointments(AppointmentFilter),
    /// List the dates that have appointments.
    Dates,
    /// Register a patient.
    AddPatient(PatientArgs),
    /// Change a registered patient's details; omitted fields keep their
    /// current values.
    UpdatePatient {
        /// Patient identifier.
        id: i64,
        #[command(flatten)]
        changes: PatientChanges,
    },
    /// Remove a patient that has no appointments.
    DeletePatient {
        /// Patient identifier.
        id: i64,
    },
    /// Register a staff member.
    AddStaff(StaffArgs),
    /// Book an appointment.
    Book(BookArgs),
    /// Change an appointment's status.
    SetStatus {
        /// Appointment identifier.
        id: i64,
        /// New status label, e.g. `Confirmed` or `Confirmada`.
        status: String,
    },
    /// Cancel an appointment.
    Cancel {
        /// Appointment identifier.
        id: i64,
    },
    /// Load the sample dataset when the registry has no staff yet.
    Seed {
        /// Dataset file; defaults to the configured or bundled dataset.
        #[arg(long = "file", value_name = "path")]
        file: Option<PathBuf>,
    },
}

/// Exactly one appointment filter.
#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct AppointmentFilter {
    /// Appointments on this date (`YYYY-MM-DD`).
    #[arg(long, value_name = "date")]
    pub date: Option<String>,
    /// Appointments of this patient.
    #[arg(long, value_name = "id")]
    pub patient: Option<i64>,
    /// Appointments attended by this staff member.
    #[arg(long, value_name = "id")]
    pub staff: Option<i64>,
    /// Appointments with this status.
    #[arg(long, value_name = "label", value_parser = parse_status)]
    pub status: Option<AppointmentStatus>,
}

/// Patient details.
#[derive(Debug, Clone, Args)]
pub struct PatientArgs {
    /// National identity number.
    #[arg(long = "identity-number", value_name = "number")]
    pub identity_number: String,
    /// Given name.
    #[arg(long = "first-name", value_name = "name")]
    pub first_name: String,
    /// Family name.
    #[arg(long = "last-name", value_name = "name")]
    pub last_name: String,
    /// Birth date (`YYYY-MM-DD`).
    #[arg(long = "birth-date", value_name = "date", value_parser = parse_date)]
    pub birth_date: Option<NaiveDate>,
    /// Contact phone number.
    #[arg(long, value_name = "phone")]
    pub phone: Option<String>,
    /// Postal address.
    #[arg(long, value_name = "address")]
    pub address: Option<String>,
    /// Contact email address.
    #[arg(long, value_name = "email")]
    pub email: Option<String>,
}

/// Patient fields to change. Blank values count as omitted.
#[derive(Debug, Clone, Args)]
pub struct PatientChanges {
    /// National identity number.
    #[arg(long = "identity-number", value_name = "number")]
    pub identity_number: Option<String>,
    /// Given name.
    #[arg(long = "first-name", value_name = "name")]
    pub first_name: Option<String>,
    /// Family name.
    #[arg(long = "last-name", value_name = "name")]
    pub last_name: Option<String>,
    /// Birth date (`YYYY-MM-DD`).
    #[arg(long = "birth-date", value_name = "date", value_parser = parse_date)]
    pub birth_date: Option<NaiveDate>,
    /// Contact phone number.
    #[arg(long, value_name = "phone")]
    pub phone: Option<String>,
    /// Postal address.
    #[arg(long, value_name = "address")]
    pub address: Option<String>,
    /// Contact email address.
    #[arg(long, value_name = "email")]
    pub email: Option<String>,
}

/// Staff member details.
#[derive(Debug, Clone, Args)]
pub struct StaffArgs {
    /// National identity number.
    #[arg(long = "identity-number", value_name = "number")]
    pub identity_number: String,
    /// Given name.
    #[arg(long = "first-name", value_name = "name")]
    pub first_name: String,
    /// Family name.
    #[arg(long = "last-name", value_name = "name")]
    pub last_name: String,
    /// Specialty label; unknown labels fall back to `Medicina General`.
    #[arg(long, value_name = "label", default_value = "Medicina General")]
    pub specialty: String,
    /// Contact phone number.
    #[arg(long, value_name = "phone")]
    pub phone: Option<String>,
    /// Contact email address.
    #[arg(long, value_name = "email")]
    pub email: Option<String>,
}

/// Appointment details.
#[derive(Debug, Clone, Args)]
pub struct BookArgs {
    /// Patient identifier.
    #[arg(long, value_name = "id")]
    pub patient: i64,
    /// Staff member identifier.
    #[arg(long, value_name = "id")]
    pub staff: i64,
    /// Date (`YYYY-MM-DD`).
    #[arg(long, value_name = "date")]
    pub date: String,
    /// Time (`HH:MM`).
    #[arg(long, value_name = "time")]
    pub time: String,
    /// Reason for the visit.
    #[arg(long, value_name = "text")]
    pub reason: Option<String>,
    /// Initial status label; unknown labels fall back to `Scheduled`.
    #[arg(long, value_name = "label")]
    pub status: Option<String>,
}

/// Failures surfaced by command handlers.
#[derive(Debug, Error)]
pub enum CliError {
    /// The registry rejected the request.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// No record has the given identifier.
    #[error("{what} {id} not found")]
    NotFound {
        /// Kind of record.
        what: &'static str,
        /// Identifier that was looked up.
        id: i64,
    },
    /// Loading the sample dataset failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    /// Writing the sample dataset failed.
    #[error(transparent)]
    Seeding(#[from] SeedingError),
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    /// Serialising statistics failed.
    #[error("failed to write statistics: {0}")]
    Json(#[from] serde_json::Error),
}

fn parse_status(raw: &str) -> Result<AppointmentStatus, String> {
    raw.parse::<AppointmentStatus>()
        .map_err(|err| err.to_string())
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

impl PatientArgs {
    fn into_new_patient(self) -> NewPatient {
        let mut patient = NewPatient::new(self.identity_number, self.first_name, self.last_name)
            .with_birth_date(self.birth_date);
        if let Some(phone) = self.phone {
            patient = patient.with_phone(phone);
        }
        if let Some(address) = self.address {
            patient = patient.with_address(address);
        }
        if let Some(email) = self.email {
            patient = patient.with_email(email);
        }
        patient
    }
}

impl PatientChanges {
    /// Overlay the given fields on `current`.
    fn apply_to(self, current: Patient) -> Patient {
        fn merge(change: Option<String>, current: String) -> String {
            given(change).unwrap_or(current)
        }
        fn merge_optional(change: Option<String>, current: Option<String>) -> Option<String> {
            given(change).or(current)
        }

        Patient {
            identity_number: merge(self.identity_number, current.identity_number),
            first_name: merge(self.first_name, current.first_name),
            last_name: merge(self.last_name, current.last_name),
            birth_date: self.birth_date.or(current.birth_date),
            phone: merge_optional(self.phone, current.phone),
            address: merge_optional(self.address, current.address),
            email: merge_optional(self.email, current.email),
            ..current
        }
    }
}

fn given(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl StaffArgs {
    fn into_new_staff_member(self) -> NewStaffMember {
        let mut member = NewStaffMember::new(
            self.identity_number,
            self.first_name,
            self.last_name,
            &self.specialty,
        );
        if let Some(phone) = self.phone {
            member = member.with_phone(phone);
        }
        if let Some(email) = self.email {
            member = member.with_email(email);
        }
        member
    }
}

impl BookArgs {
    fn into_new_appointment(self) -> NewAppointment {
        let mut appointment = NewAppointment::new(
            PatientId::new(self.patient),
            StaffId::new(self.staff),
            self.date,
            self.time,
        );
        if let Some(reason) = self.reason {
            appointment = appointment.with_reason(reason);
        }
        if let Some(status) = self.status.as_deref() {
            appointment = appointment.with_status_label(status);
        }
        appointment
    }
}

/// Run `command` against `registry`, writing human-readable output to `out`.
///
/// # Errors
///
/// Returns [`CliError`] when the registry rejects the request, a referenced
/// record does not exist, or output cannot be written.
pub fn run<S, W>(
    command: Command,
    registry: &mut AppointmentRegistry<S>,
    settings: &RegistrySettings,
    out: &mut W,
) -> Result<(), CliError>
where
    S: RegistryStore,
    W: Write + ?Sized,
{
    debug!(?command, "running command");
    match command {
        Command::Report => render::write_report(out, registry)?,
        Command::Stats => render::write_statistics(out, &registry.statistics())?,
        Command::Patients { query } => {
            let today = registry.today();
            match query.as_deref() {
                Some(query) => render::write_patients(out, registry.find_patients(query), today)?,
                None => render::write_patients(out, registry.patients(), today)?,
            }
        }
        Command::Staff { query } => match query.as_deref() {
            Some(query) => render::write_staff(out, registry.find_staff(query))?,
            None => render::write_staff(out, registry.staff())?,
        },
        Command::Appointments(filter) => list_appointments(out, registry, filter)?,
        Command::Dates => render::write_dates(out, registry.dates_with_appointments())?,
        Command::AddPatient(details) => {
            let id = registry.add_patient(details.into_new_patient())?;
            writeln!(out, "Patient registered with id {id}")?;
        }
        Command::UpdatePatient { id, changes } => update_patient(out, registry, id, changes)?,
        Command::DeletePatient { id } => {
            if !registry.delete_patient(PatientId::new(id))? {
                return Err(CliError::NotFound { what: "patient", id });
            }
            writeln!(out, "Patient {id} removed")?;
        }
        Command::AddStaff(details) => {
            let id = registry.add_staff(details.into_new_staff_member())?;
            writeln!(out, "Staff member registered with id {id}")?;
        }
        Command::Book(details) => {
            let id = registry.add_appointment(details.into_new_appointment())?;
            writeln!(out, "Appointment booked with id {id}")?;
        }
        Command::SetStatus { id, status } => {
            let updated = registry
                .update_appointment_status(AppointmentId::new(id), &status)?
                .ok_or(CliError::NotFound {
                    what: "appointment",
                    id,
                })?;
            render::write_appointment(out, registry, &updated)?;
        }
        Command::Cancel { id } => {
            let cancelled = registry
                .cancel_appointment(AppointmentId::new(id))?
                .ok_or(CliError::NotFound {
                    what: "appointment",
                    id,
                })?;
            render::write_appointment(out, registry, &cancelled)?;
        }
        Command::Seed { file } => {
            let dataset = match file {
                Some(path) => SampleDataset::from_file(&path)?,
                None => load_dataset(settings)?,
            };
            match seed_sample_data(registry, &dataset)? {
                SeedOutcome::Applied {
                    staff,
                    patients,
                    appointments,
                } => writeln!(
                    out,
                    "Sample data loaded: {staff} staff, {patients} patients, {appointments} appointments"
                )?,
                SeedOutcome::AlreadySeeded => {
                    writeln!(out, "Registry already has staff; sample data not loaded")?;
                }
            }
        }
    }
    Ok(())
}

fn list_appointments<S, W>(
    out: &mut W,
    registry: &AppointmentRegistry<S>,
    filter: AppointmentFilter,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let appointments = if let Some(date) = filter.date.as_deref() {
        registry.appointments_by_date(date)
    } else if let Some(patient) = filter.patient {
        registry.appointments_by_patient(PatientId::new(patient))
    } else if let Some(staff) = filter.staff {
        registry.appointments_by_staff(StaffId::new(staff))
    } else if let Some(status) = filter.status {
        registry.appointments_by_status(status)
    } else {
        registry.appointments_chronological()
    };
    render::write_appointments(out, registry, appointments)
}

fn update_patient<S, W>(
    out: &mut W,
    registry: &mut AppointmentRegistry<S>,
    id: i64,
    changes: PatientChanges,
) -> Result<(), CliError>
where
    S: RegistryStore,
    W: Write + ?Sized,
{
    let Some(current) = registry.patient(PatientId::new(id)).cloned() else {
        return Err(CliError::NotFound { what: "patient", id });
    };
    let edited = changes.apply_to(current);
    let stored = registry
        .update_patient(&edited)?
        .ok_or(CliError::NotFound { what: "patient", id })?;
    render::write_patients(out, [&stored], registry.today())?;
    Ok(())
}
