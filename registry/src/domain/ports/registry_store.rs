//! Port abstraction for the relational store behind the registry.

use crate::domain::{
    Appointment, AppointmentId, AppointmentStatus, NewAppointment, NewPatient, NewStaffMember,
    Patient, PatientId, StaffMember,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by registry store adapters.
    pub enum RegistryStoreError {
        /// The store could not be opened or a connection checked out.
        Connection { message: String } => "registry store connection failed: {message}",
        /// A uniqueness constraint rejected the write.
        Duplicate { message: String } => "registry store rejected a duplicate record: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "registry store query failed: {message}",
    }
}

/// Relational storage for patients, staff and appointments.
///
/// Every write is a single auto-committed statement. Inserts and updates
/// return the row as stored so callers can mirror exactly what storage holds.
#[cfg_attr(test, mockall::automock)]
pub trait RegistryStore: Send + Sync {
    /// Read every patient, ordered by identifier.
    fn load_patients(&self) -> Result<Vec<Patient>, RegistryStoreError>;

    /// Read every staff member, ordered by identifier.
    fn load_staff(&self) -> Result<Vec<StaffMember>, RegistryStoreError>;

    /// Read every appointment, ordered by identifier.
    fn load_appointments(&self) -> Result<Vec<Appointment>, RegistryStoreError>;

    /// Insert a patient; storage assigns the identifier and timestamp.
    fn insert_patient(&self, patient: &NewPatient) -> Result<Patient, RegistryStoreError>;

    /// Overwrite the editable columns of an existing patient.
    ///
    /// Returns `None` when no row carries `patient.id`.
    fn update_patient(&self, patient: &Patient) -> Result<Option<Patient>, RegistryStoreError>;

    /// Delete a patient row, reporting whether one was removed.
    fn delete_patient(&self, id: PatientId) -> Result<bool, RegistryStoreError>;

    /// Insert a staff member; storage assigns the identifier and timestamp.
    fn insert_staff(&self, staff: &NewStaffMember) -> Result<StaffMember, RegistryStoreError>;

    /// Insert an appointment; storage assigns the identifier and timestamp.
    fn insert_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<Appointment, RegistryStoreError>;

    /// Set the status of one appointment.
    ///
    /// Returns `None` when no row carries `id`.
    fn update_appointment_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, RegistryStoreError>;
}
