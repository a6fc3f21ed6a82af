//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! reach the domain. Conversion happens in the adapter's mapping functions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use super::schema::{appointments, patients, staff};

/// Row struct for reading from the patients table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct PatientRow {
    pub id: i64,
    pub identity_number: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub registered_at: NaiveDateTime,
}

/// Insertable struct for new patient records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = patients)]
pub(crate) struct NewPatientRow<'a> {
    pub identity_number: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub birth_date: Option<String>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub email: Option<&'a str>,
}

/// Changeset for the editable patient columns.
///
/// `None` clears a column rather than leaving it untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = patients)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PatientUpdate<'a> {
    pub identity_number: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub birth_date: Option<String>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub email: Option<&'a str>,
}

/// Row struct for reading from the staff table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = staff)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct StaffRow {
    pub id: i64,
    pub identity_number: String,
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub registered_at: NaiveDateTime,
}

/// Insertable struct for new staff records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = staff)]
pub(crate) struct NewStaffRow<'a> {
    pub identity_number: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub specialty: &'a str,
    pub phone: Option<&'a str>,
    pub email: Option<&'a str>,
}

/// Row struct for reading from the appointments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct AppointmentRow {
    pub id: i64,
    pub patient_id: i64,
    pub staff_id: i64,
    pub date: String,
    pub time: String,
    pub reason: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
}

/// Insertable struct for new appointment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = appointments)]
pub(crate) struct NewAppointmentRow<'a> {
    pub patient_id: i64,
    pub staff_id: i64,
    pub date: &'a str,
    pub time: &'a str,
    pub reason: Option<&'a str>,
    pub status: &'a str,
}
