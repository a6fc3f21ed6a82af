//! Plain-text rendering of registry records.
//!
//! Every function writes to the caller's writer so output can be captured
//! in tests. Appointment lines resolve patient and staff names through the
//! registry and print `Unknown` for references that no longer resolve.

use std::io::{self, Write};

use chrono::NaiveDate;

use crate::domain::{Appointment, AppointmentRegistry, Patient, RegistryStatistics, StaffMember};

const UNKNOWN: &str = "Unknown";

/// Write one line per patient, with the age on `today` when known.
pub fn write_patients<'a, W>(
    out: &mut W,
    patients: impl IntoIterator<Item = &'a Patient>,
    today: NaiveDate,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let mut written = 0_usize;
    for patient in patients {
        write!(out, "#{} {}", patient.id, patient)?;
        if let Some(age) = patient.age_on(today) {
            write!(out, " ({age} years)")?;
        }
        writeln!(out)?;
        written += 1;
    }
    if written == 0 {
        writeln!(out, "No patients found.")?;
    }
    Ok(())
}

/// Write one line per staff member.
pub fn write_staff<'a, W>(
    out: &mut W,
    staff: impl IntoIterator<Item = &'a StaffMember>,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let mut written = 0_usize;
    for member in staff {
        writeln!(out, "#{} {}", member.id, member)?;
        written += 1;
    }
    if written == 0 {
        writeln!(out, "No staff members found.")?;
    }
    Ok(())
}

/// Write one line per appointment with names resolved.
pub fn write_appointments<'a, S, W>(
    out: &mut W,
    registry: &AppointmentRegistry<S>,
    appointments: impl IntoIterator<Item = &'a Appointment>,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let mut written = 0_usize;
    for appointment in appointments {
        write_appointment(out, registry, appointment)?;
        written += 1;
    }
    if written == 0 {
        writeln!(out, "No appointments found.")?;
    }
    Ok(())
}

/// Write a single appointment line.
pub fn write_appointment<S, W>(
    out: &mut W,
    registry: &AppointmentRegistry<S>,
    appointment: &Appointment,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let patient = registry
        .patient(appointment.patient_id)
        .map_or_else(|| UNKNOWN.to_owned(), Patient::full_name);
    let staff = registry.staff_member(appointment.staff_id).map_or_else(
        || UNKNOWN.to_owned(),
        |member| format!("Dr. {} ({})", member.full_name(), member.specialty),
    );

    write!(
        out,
        "#{} {} {} | {} | {} | {}",
        appointment.id, appointment.date, appointment.time, patient, staff, appointment.status
    )?;
    if let Some(reason) = appointment.reason.as_deref() {
        write!(out, " | {reason}")?;
    }
    writeln!(out)
}

/// Write the distinct appointment dates, one per line.
pub fn write_dates<'a, W>(out: &mut W, dates: impl IntoIterator<Item = &'a str>) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let mut written = 0_usize;
    for date in dates {
        writeln!(out, "{date}")?;
        written += 1;
    }
    if written == 0 {
        writeln!(out, "No appointments booked.")?;
    }
    Ok(())
}

/// Write the general report: every patient, every staff member and every
/// appointment in chronological order.
pub fn write_report<S, W>(out: &mut W, registry: &AppointmentRegistry<S>) -> io::Result<()>
where
    W: Write + ?Sized,
{
    let stats = registry.statistics();

    writeln!(out, "GENERAL REPORT")?;
    writeln!(out)?;
    writeln!(out, "Patients ({}):", stats.total_patients)?;
    write_patients(out, registry.patients(), registry.today())?;
    writeln!(out)?;
    writeln!(out, "Staff ({}):", stats.total_staff)?;
    write_staff(out, registry.staff())?;
    writeln!(out)?;
    writeln!(out, "Appointments ({}):", stats.total_appointments)?;
    write_appointments(out, registry, registry.appointments_chronological())?;
    writeln!(out)?;
    writeln!(out, "Upcoming appointments: {}", stats.upcoming_appointments)
}

/// Write statistics as pretty-printed JSON followed by a newline.
pub fn write_statistics<W>(out: &mut W, stats: &RegistryStatistics) -> serde_json::Result<()>
where
    W: Write + ?Sized,
{
    serde_json::to_writer_pretty(&mut *out, stats)?;
    writeln!(out).map_err(serde_json::Error::io)
}
