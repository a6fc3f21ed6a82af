//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the embedded migrations exactly. When a
//! migration changes a table, update this file alongside it.

diesel::table! {
    /// People attended by the office.
    patients (id) {
        id -> BigInt,
        /// National identity number, unique across patients.
        identity_number -> Text,
        first_name -> Text,
        last_name -> Text,
        /// `YYYY-MM-DD` as entered; older rows may hold free text.
        birth_date -> Nullable<Text>,
        phone -> Nullable<Text>,
        address -> Nullable<Text>,
        email -> Nullable<Text>,
        registered_at -> Timestamp,
    }
}

diesel::table! {
    /// Professionals who attend appointments.
    staff (id) {
        id -> BigInt,
        identity_number -> Text,
        first_name -> Text,
        last_name -> Text,
        /// Specialty label, e.g. `Medicina General`.
        specialty -> Text,
        phone -> Nullable<Text>,
        email -> Nullable<Text>,
        registered_at -> Timestamp,
    }
}

diesel::table! {
    /// Appointments between a patient and a staff member.
    appointments (id) {
        id -> BigInt,
        patient_id -> BigInt,
        staff_id -> BigInt,
        date -> Text,
        time -> Text,
        reason -> Nullable<Text>,
        /// Status label, e.g. `Scheduled`.
        status -> Text,
        created_at -> Timestamp,
    }
}

diesel::joinable!(appointments -> patients (patient_id));
diesel::joinable!(appointments -> staff (staff_id));

diesel::allow_tables_to_appear_in_same_query!(patients, staff, appointments);
