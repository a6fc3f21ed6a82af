//! Appointments between a patient and a staff member.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::patient::PatientId;
use super::staff::StaffId;

/// Storage-assigned appointment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(i64);

impl AppointmentId {
    /// Wrap a raw identifier read from storage.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an appointment.
///
/// There is no transition table: any status may follow any other, including
/// moving a completed or cancelled appointment back to scheduled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    #[serde(rename = "In progress")]
    InProgress,
    Completed,
    Cancelled,
    #[serde(rename = "No-show")]
    NoShow,
}

/// Raised when a status label is not one of the six known values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown appointment status {label:?}")]
pub struct UnknownStatus {
    /// The rejected label.
    pub label: String,
}

impl AppointmentStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Scheduled,
        Self::Confirmed,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
        Self::NoShow,
    ];

    /// Label stored in the `status` column.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Confirmed => "Confirmed",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::NoShow => "No-show",
        }
    }

    /// Label written by older databases of the office.
    pub const fn legacy_label(self) -> &'static str {
        match self {
            Self::Scheduled => "Programada",
            Self::Confirmed => "Confirmada",
            Self::InProgress => "En curso",
            Self::Completed => "Completada",
            Self::Cancelled => "Cancelada",
            Self::NoShow => "No asistió",
        }
    }

    /// Whether the appointment no longer counts as upcoming.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    /// Lenient parse used for new appointments and stored rows: unknown
    /// labels become [`AppointmentStatus::Scheduled`].
    pub fn parse_or_default(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    /// Strict parse accepting the stored label or its legacy equivalent.
    ///
    /// # Examples
    /// ```
    /// use registry::domain::AppointmentStatus;
    ///
    /// assert_eq!("Cancelled".parse::<AppointmentStatus>(), Ok(AppointmentStatus::Cancelled));
    /// assert_eq!("Cancelada".parse::<AppointmentStatus>(), Ok(AppointmentStatus::Cancelled));
    /// assert!("Postponed".parse::<AppointmentStatus>().is_err());
    /// ```
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label() == label || status.legacy_label() == label)
            .ok_or_else(|| UnknownStatus {
                label: label.to_owned(),
            })
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An appointment as stored.
///
/// `date` and `time` are kept exactly as entered (`YYYY-MM-DD`, `HH:MM` by
/// convention); nothing checks their format, overlaps, or whether they lie
/// in the past.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Identifier assigned by storage.
    pub id: AppointmentId,
    /// Patient being attended.
    pub patient_id: PatientId,
    /// Staff member attending.
    pub staff_id: StaffId,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, 24-hour `HH:MM`.
    pub time: String,
    /// Free-text reason for the visit.
    pub reason: Option<String>,
    /// Current status.
    pub status: AppointmentStatus,
    /// When the appointment was booked.
    pub created_at: NaiveDateTime,
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Appointment #{} - {} {} - {}",
            self.id, self.date, self.time, self.status
        )
    }
}

/// An appointment that has not been written to storage yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    /// Patient being attended.
    pub patient_id: PatientId,
    /// Staff member attending.
    pub staff_id: StaffId,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, 24-hour `HH:MM`.
    pub time: String,
    /// Free-text reason for the visit.
    pub reason: Option<String>,
    /// Status the appointment starts in.
    pub status: AppointmentStatus,
}

impl NewAppointment {
    /// Book `patient_id` with `staff_id` on `date` at `time`, status
    /// [`AppointmentStatus::Scheduled`].
    pub fn new(
        patient_id: PatientId,
        staff_id: StaffId,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            patient_id,
            staff_id,
            date: date.into(),
            time: time.into(),
            reason: None,
            status: AppointmentStatus::Scheduled,
        }
    }

    /// Set the free-text reason for the visit.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Set the initial status from a label, coercing unknown labels to
    /// [`AppointmentStatus::Scheduled`].
    #[must_use]
    pub fn with_status_label(mut self, label: &str) -> Self {
        self.status = AppointmentStatus::parse_or_default(label);
        self
    }

    /// Set the initial status.
    #[must_use]
    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Scheduled", AppointmentStatus::Scheduled)]
    #[case("In progress", AppointmentStatus::InProgress)]
    #[case("No-show", AppointmentStatus::NoShow)]
    #[case("Programada", AppointmentStatus::Scheduled)]
    #[case("En curso", AppointmentStatus::InProgress)]
    #[case("No asistió", AppointmentStatus::NoShow)]
    fn strict_parse_accepts_current_and_legacy_labels(
        #[case] label: &str,
        #[case] expected: AppointmentStatus,
    ) {
        assert_eq!(label.parse::<AppointmentStatus>(), Ok(expected));
    }

    #[rstest]
    #[case("cancelled")]
    #[case("Pending")]
    #[case("")]
    fn strict_parse_rejects_unknown_labels(#[case] label: &str) {
        let err = label
            .parse::<AppointmentStatus>()
            .expect_err("label is rejected");
        assert_eq!(err.label, label);
    }

    #[rstest]
    fn new_appointment_coerces_unknown_status() {
        let appointment =
            NewAppointment::new(PatientId::new(1), StaffId::new(1), "2024-03-15", "09:00")
                .with_status_label("Rescheduled");
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    }

    #[rstest]
    fn closed_statuses_are_completed_and_cancelled() {
        let closed: Vec<_> = AppointmentStatus::ALL
            .into_iter()
            .filter(|status| status.is_closed())
            .collect();
        assert_eq!(
            closed,
            vec![AppointmentStatus::Completed, AppointmentStatus::Cancelled]
        );
    }

    #[rstest]
    fn status_serialises_as_its_label() {
        let json = serde_json::to_string(&AppointmentStatus::NoShow).expect("serialise status");
        assert_eq!(json, "\"No-show\"");
    }
}
