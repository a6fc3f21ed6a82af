//! Domain primitives and the appointment registry.
//!
//! Purpose: Define strongly typed records for patients, staff and
//! appointments, and the [`AppointmentRegistry`] that keeps an in-memory
//! mirror of them in step with storage. Storage itself is reached only
//! through the ports in [`ports`].
//!
//! Public surface:
//! - Patient, NewPatient, PatientId: people attended by the office.
//! - StaffMember, NewStaffMember, StaffId, Specialty: people attending them.
//! - Appointment, NewAppointment, AppointmentId, AppointmentStatus:
//!   bookings between the two.
//! - RegistryError, ErrorCode, EntityKind: failure reporting.
//! - RegistryStatistics: counts for reports.

mod appointment;
pub mod error;
mod patient;
pub mod ports;
mod registry;
mod staff;
mod statistics;

pub use self::appointment::{
    Appointment, AppointmentId, AppointmentStatus, NewAppointment, UnknownStatus,
};
pub use self::error::{EntityKind, ErrorCode, RegistryError};
pub use self::patient::{NewPatient, Patient, PatientId};
pub use self::registry::AppointmentRegistry;
pub use self::staff::{NewStaffMember, Specialty, StaffId, StaffMember};
pub use self::statistics::RegistryStatistics;
