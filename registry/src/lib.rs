//! Appointment registry for a municipal welfare office.
//!
//! Patients, staff and appointments live in a SQLite file and are mirrored
//! in memory by [`domain::AppointmentRegistry`] for lookups, filtered
//! listings and statistics.
//!
//! - [`domain`]: records, errors, the registry and its storage port.
//! - [`outbound`]: the Diesel/SQLite storage adapter.
//! - [`inbound`]: the command-line adapter.
//! - [`example_data`]: sample dataset seeding.
//! - [`config`]: settings loaded from the environment.

pub mod config;
pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod outbound;
