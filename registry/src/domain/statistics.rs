//! Summary counts derived from the registry mirror.

use std::collections::BTreeMap;

use serde::Serialize;

use super::appointment::AppointmentStatus;

/// Registry-wide counts.
///
/// ## Invariants
/// - `appointments_by_status` has an entry for every status, zero when
///   unused, and its values sum to `total_appointments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStatistics {
    /// Registered patients.
    pub total_patients: usize,
    /// Registered staff members.
    pub total_staff: usize,
    /// Booked appointments in any status.
    pub total_appointments: usize,
    /// Appointment count per status.
    pub appointments_by_status: BTreeMap<AppointmentStatus, usize>,
    /// Distinct dates with at least one appointment.
    pub dates_with_appointments: usize,
    /// Appointments dated today or later that are neither cancelled nor
    /// completed.
    pub upcoming_appointments: usize,
}

impl RegistryStatistics {
    /// Start with zero counts for every status.
    pub(crate) fn empty() -> Self {
        Self {
            total_patients: 0,
            total_staff: 0,
            total_appointments: 0,
            appointments_by_status: AppointmentStatus::ALL
                .into_iter()
                .map(|status| (status, 0))
                .collect(),
            dates_with_appointments: 0,
            upcoming_appointments: 0,
        }
    }

    /// Count for one status.
    pub fn count_for(&self, status: AppointmentStatus) -> usize {
        self.appointments_by_status
            .get(&status)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_statistics_list_every_status() {
        let stats = RegistryStatistics::empty();
        assert_eq!(stats.appointments_by_status.len(), AppointmentStatus::ALL.len());
        assert!(stats.appointments_by_status.values().all(|count| *count == 0));
    }

    #[rstest]
    fn statistics_serialise_status_labels_as_keys() {
        let mut stats = RegistryStatistics::empty();
        stats
            .appointments_by_status
            .insert(AppointmentStatus::InProgress, 2);

        let json = serde_json::to_value(&stats).expect("serialise statistics");

        assert_eq!(json["appointmentsByStatus"]["In progress"], 2);
        assert_eq!(json["appointmentsByStatus"]["No-show"], 0);
        assert_eq!(json["upcomingAppointments"], 0);
    }
}
