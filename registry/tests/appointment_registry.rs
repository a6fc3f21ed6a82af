//! End-to-end tests for the appointment registry over SQLite.
//!
//! The registry is opened on a migrated temporary database with a clock
//! pinned to 2024-03-16, so "upcoming" counts are deterministic.

mod support;

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use example_data::SampleDataset;
use mockable::Clock;
use registry::domain::{
    AppointmentId, AppointmentRegistry, AppointmentStatus, EntityKind, NewAppointment,
    NewPatient, NewStaffMember, PatientId, RegistryError, StaffId,
};
use registry::example_data::{SeedOutcome, seed_sample_data};
use registry::outbound::persistence::DieselRegistryStore;
use rstest::{fixture, rstest};
use support::TestDatabase;

type Registry = AppointmentRegistry<DieselRegistryStore>;

/// Clock pinned to 2024-03-16 12:00 UTC.
struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

#[fixture]
fn db() -> TestDatabase {
    TestDatabase::migrated()
}

fn open(db: &TestDatabase) -> Registry {
    AppointmentRegistry::open(Arc::new(db.store()), Arc::new(FixtureClock)).expect("registry opens")
}

fn register_pedro_and_maria(registry: &mut Registry) -> (PatientId, StaffId) {
    let patient = registry
        .add_patient(NewPatient::new("1101122334", "Pedro", "Ramírez"))
        .expect("patient registered");
    let staff = registry
        .add_staff(NewStaffMember::new(
            "1101234567",
            "María",
            "Rodríguez",
            "Medicina General",
        ))
        .expect("staff registered");
    (patient, staff)
}

#[rstest]
fn booked_appointment_is_listed_by_date(db: TestDatabase) {
    let mut registry = open(&db);
    let (patient, staff) = register_pedro_and_maria(&mut registry);

    let id = registry
        .add_appointment(NewAppointment::new(patient, staff, "2024-03-15", "09:00"))
        .expect("appointment booked");

    let on_date = registry.appointments_by_date("2024-03-15");
    assert!(id.get() > 0);
    assert_eq!(on_date.len(), 1);
    assert_eq!(on_date[0].id, id);
    assert_eq!(on_date[0].status, AppointmentStatus::Scheduled);
    let by_patient = registry.appointments_by_patient(patient);
    assert_eq!(by_patient, on_date);
    assert_eq!(registry.appointment(id), Some(on_date[0]));
    assert_eq!(registry.appointments_by_staff(staff).len(), 1);
}

#[rstest]
fn registered_patient_is_found_by_identity_number(db: TestDatabase) {
    let mut registry = open(&db);
    let (patient, _) = register_pedro_and_maria(&mut registry);

    let found = registry.find_patients("1101122334");

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, patient);
    assert_eq!(found[0].full_name(), "Pedro Ramírez");
}

#[rstest]
fn cancelled_future_appointment_is_not_upcoming(db: TestDatabase) {
    let mut registry = open(&db);
    let (patient, staff) = register_pedro_and_maria(&mut registry);
    let id = registry
        .add_appointment(NewAppointment::new(patient, staff, "2024-04-01", "09:00"))
        .expect("appointment booked");
    assert_eq!(registry.statistics().upcoming_appointments, 1);

    let cancelled = registry
        .cancel_appointment(id)
        .expect("cancel runs")
        .expect("appointment exists");

    let stats = registry.statistics();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    assert_eq!(stats.count_for(AppointmentStatus::Cancelled), 1);
    assert_eq!(stats.count_for(AppointmentStatus::Scheduled), 0);
    assert_eq!(stats.upcoming_appointments, 0);
}

#[rstest]
fn unknown_staff_reference_writes_nothing(db: TestDatabase) {
    let mut registry = open(&db);
    let (patient, _) = register_pedro_and_maria(&mut registry);

    let err = registry
        .add_appointment(NewAppointment::new(
            patient,
            StaffId::new(99),
            "2024-03-15",
            "09:00",
        ))
        .expect_err("staff member is missing");

    assert_eq!(
        err,
        RegistryError::Reference {
            entity: EntityKind::StaffMember,
            id: 99
        }
    );
    assert_eq!(registry.statistics().total_appointments, 0);
    assert_eq!(open(&db).statistics().total_appointments, 0);
}

#[rstest]
fn status_labels_are_validated_before_storage(db: TestDatabase) {
    let mut registry = open(&db);
    let (patient, staff) = register_pedro_and_maria(&mut registry);
    let id = registry
        .add_appointment(NewAppointment::new(patient, staff, "2024-03-15", "09:00"))
        .expect("appointment booked");

    let err = registry
        .update_appointment_status(id, "Postponed")
        .expect_err("label is unknown");
    assert_eq!(
        registry.appointment(id).map(|appointment| appointment.status),
        Some(AppointmentStatus::Scheduled)
    );
    let legacy = registry
        .update_appointment_status(id, "Completada")
        .expect("legacy label accepted");

    assert!(matches!(err, RegistryError::Validation { field: "status", .. }));
    assert_eq!(
        legacy.map(|appointment| appointment.status),
        Some(AppointmentStatus::Completed)
    );
    assert_eq!(
        registry
            .update_appointment_status(AppointmentId::new(404), "Confirmed")
            .expect("update runs"),
        None
    );
}

#[rstest]
fn patient_with_appointments_cannot_be_deleted(db: TestDatabase) {
    let mut registry = open(&db);
    let (patient, staff) = register_pedro_and_maria(&mut registry);
    registry
        .add_appointment(NewAppointment::new(patient, staff, "2024-03-15", "09:00"))
        .expect("appointment booked");
    let unbooked = registry
        .add_patient(NewPatient::new("1105566778", "Luis", "Torres"))
        .expect("patient registered");

    let refused = registry.delete_patient(patient);
    let removed = registry.delete_patient(unbooked).expect("delete runs");

    assert!(matches!(
        refused,
        Err(RegistryError::PatientHasAppointments { count: 1, .. })
    ));
    assert!(removed);
    assert!(registry.patient(patient).is_some());
    assert!(registry.patient(unbooked).is_none());
}

#[rstest]
fn reopening_mirrors_the_same_records(db: TestDatabase) {
    let mut registry = open(&db);
    let (patient, staff) = register_pedro_and_maria(&mut registry);
    registry
        .add_appointment(
            NewAppointment::new(patient, staff, "2024-03-17", "08:30").with_reason("Control"),
        )
        .expect("appointment booked");

    let reopened = open(&db);

    assert_eq!(
        reopened.patients().collect::<Vec<_>>(),
        registry.patients().collect::<Vec<_>>()
    );
    assert_eq!(
        reopened.appointments().collect::<Vec<_>>(),
        registry.appointments().collect::<Vec<_>>()
    );
    assert_eq!(reopened.statistics(), registry.statistics());
}

#[rstest]
fn reload_picks_up_rows_written_elsewhere(db: TestDatabase) {
    let mut registry = open(&db);
    let (patient, staff) = register_pedro_and_maria(&mut registry);
    db.execute(&format!(
        "INSERT INTO appointments (patient_id, staff_id, date, time, status) \
         VALUES ({}, {}, '2024-03-18', '11:00', 'Confirmada')",
        patient.get(),
        staff.get()
    ));
    assert_eq!(registry.statistics().total_appointments, 0);

    registry.reload().expect("reload succeeds");

    let booked = registry.appointments_by_patient(patient);
    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0].status, AppointmentStatus::Confirmed);
    assert_eq!(
        registry.dates_with_appointments().collect::<Vec<_>>(),
        vec!["2024-03-18"]
    );
}

#[rstest]
fn bundled_dataset_seeds_once(db: TestDatabase) {
    let mut registry = open(&db);
    let dataset = SampleDataset::bundled().expect("bundled dataset");

    let first = seed_sample_data(&mut registry, &dataset).expect("first seed");
    let second = seed_sample_data(&mut registry, &dataset).expect("second seed");

    assert_eq!(
        first,
        SeedOutcome::Applied {
            staff: 5,
            patients: 5,
            appointments: 5
        }
    );
    assert_eq!(second, SeedOutcome::AlreadySeeded);

    let stats = registry.statistics();
    assert_eq!(stats.total_patients, 5);
    assert_eq!(stats.total_staff, 5);
    assert_eq!(stats.total_appointments, 5);
    assert_eq!(stats.count_for(AppointmentStatus::Confirmed), 2);
    assert_eq!(stats.count_for(AppointmentStatus::Scheduled), 3);
    assert_eq!(stats.dates_with_appointments, 3);
    assert_eq!(stats.upcoming_appointments, 3);
    assert_eq!(registry.find_staff("pediatría").len(), 1);
}
