//! In-memory registry mirroring the relational store.
//!
//! The registry owns three entity maps, the insertion-ordered appointment
//! list, a patient → appointments index and the set of dates holding at least
//! one appointment. Storage is the source of truth: every mutation writes
//! first and then mirrors the row storage returned, so a rejected write never
//! touches the mirror.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{RegistryStore, RegistryStoreError};
use crate::domain::{
    Appointment, AppointmentId, AppointmentStatus, EntityKind, NewAppointment, NewPatient,
    NewStaffMember, Patient, PatientId, RegistryError, RegistryStatistics, StaffId, StaffMember,
};

#[derive(Debug, Default)]
struct Mirror {
    patients: BTreeMap<PatientId, Patient>,
    staff: BTreeMap<StaffId, StaffMember>,
    appointments: BTreeMap<AppointmentId, Appointment>,
    order: Vec<AppointmentId>,
    by_patient: HashMap<PatientId, Vec<AppointmentId>>,
    dates: BTreeSet<String>,
}

impl Mirror {
    fn load<S>(store: &S) -> Result<Self, RegistryStoreError>
    where
        S: RegistryStore + ?Sized,
    {
        let mut mirror = Self::default();
        for patient in store.load_patients()? {
            mirror.patients.insert(patient.id, patient);
        }
        for member in store.load_staff()? {
            mirror.staff.insert(member.id, member);
        }
        for appointment in store.load_appointments()? {
            mirror.put_appointment(appointment);
        }
        Ok(mirror)
    }

    /// Insert or replace an appointment, keeping the index and date set in
    /// step with the stored row.
    fn put_appointment(&mut self, appointment: Appointment) {
        let id = appointment.id;
        match self.appointments.get(&id) {
            None => {
                self.order.push(id);
                self.by_patient
                    .entry(appointment.patient_id)
                    .or_default()
                    .push(id);
            }
            Some(previous) if previous.patient_id != appointment.patient_id => {
                let old_patient = previous.patient_id;
                if let Some(ids) = self.by_patient.get_mut(&old_patient) {
                    ids.retain(|existing| *existing != id);
                }
                self.by_patient
                    .entry(appointment.patient_id)
                    .or_default()
                    .push(id);
            }
            Some(_) => {}
        }

        let previous_date = self
            .appointments
            .insert(id, appointment.clone())
            .map(|previous| previous.date);
        self.dates.insert(appointment.date);
        if let Some(date) = previous_date {
            self.forget_date_if_unused(&date);
        }
    }

    fn forget_date_if_unused(&mut self, date: &str) {
        if !self.appointments.values().any(|a| a.date == date) {
            self.dates.remove(date);
        }
    }
}

/// Registry of patients, staff and appointments backed by a [`RegistryStore`].
///
/// Construct one instance per process with [`AppointmentRegistry::open`] and
/// pass it to whoever handles requests. Mutations take `&mut self`; the
/// registry makes no provision for other writers of the same store.
pub struct AppointmentRegistry<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    mirror: Mirror,
}

impl<S> AppointmentRegistry<S>
where
    S: RegistryStore,
{
    /// Create an empty registry without reading storage.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            mirror: Mirror::default(),
        }
    }

    /// Create a registry and load every row from storage.
    ///
    /// # Errors
    /// Returns [`RegistryError::Storage`] when any of the three tables cannot
    /// be read.
    pub fn open(store: Arc<S>, clock: Arc<dyn Clock>) -> Result<Self, RegistryError> {
        let mut registry = Self::new(store, clock);
        registry.reload()?;
        Ok(registry)
    }

    /// Rebuild the mirror from storage (patients, then staff, then
    /// appointments).
    ///
    /// The new mirror replaces the current one only when all three reads
    /// succeed; on failure the previous contents stay visible.
    ///
    /// # Errors
    /// Returns [`RegistryError::Storage`] when a read fails.
    pub fn reload(&mut self) -> Result<(), RegistryError> {
        match Mirror::load(self.store.as_ref()) {
            Ok(mirror) => {
                self.mirror = mirror;
                info!(
                    patients = self.mirror.patients.len(),
                    staff = self.mirror.staff.len(),
                    appointments = self.mirror.appointments.len(),
                    "registry loaded from storage"
                );
                Ok(())
            }
            Err(error) => {
                warn!(%error, "registry load failed; keeping previous contents");
                Err(error.into())
            }
        }
    }

    /// Register a patient and return the identifier storage assigned.
    ///
    /// # Errors
    /// - [`RegistryError::Validation`] when a required field is blank.
    /// - [`RegistryError::Storage`] when storage rejects the row, including
    ///   a duplicate identity number.
    pub fn add_patient(&mut self, patient: NewPatient) -> Result<PatientId, RegistryError> {
        patient.validate()?;
        let stored = self.store.insert_patient(&patient)?;
        let id = stored.id;
        info!(patient_id = %id, name = %stored.full_name(), "patient registered");
        self.mirror.patients.insert(id, stored);
        Ok(id)
    }

    /// Overwrite a registered patient's details.
    ///
    /// Returns the stored patient, or `None` when storage holds no row with
    /// `patient.id` (the mirror is then left alone).
    ///
    /// # Errors
    /// - [`RegistryError::Validation`] when a required field is blank.
    /// - [`RegistryError::Storage`] when storage rejects the update.
    pub fn update_patient(&mut self, patient: &Patient) -> Result<Option<Patient>, RegistryError> {
        crate::domain::patient::validate_person_fields(
            &patient.identity_number,
            &patient.first_name,
            &patient.last_name,
        )?;
        let Some(stored) = self.store.update_patient(patient)? else {
            debug!(patient_id = %patient.id, "patient update matched no row");
            return Ok(None);
        };
        info!(patient_id = %stored.id, "patient updated");
        self.mirror.patients.insert(stored.id, stored.clone());
        Ok(Some(stored))
    }

    /// Remove a patient that has no appointments.
    ///
    /// Returns whether a row was deleted.
    ///
    /// # Errors
    /// - [`RegistryError::PatientHasAppointments`] when appointments still
    ///   reference the patient; storage is not touched.
    /// - [`RegistryError::Storage`] when the delete fails.
    pub fn delete_patient(&mut self, id: PatientId) -> Result<bool, RegistryError> {
        let count = self.mirror.by_patient.get(&id).map_or(0, Vec::len);
        if count > 0 {
            return Err(RegistryError::PatientHasAppointments {
                patient_id: id,
                count,
            });
        }
        if !self.store.delete_patient(id)? {
            return Ok(false);
        }
        self.mirror.patients.remove(&id);
        self.mirror.by_patient.remove(&id);
        info!(patient_id = %id, "patient removed");
        Ok(true)
    }

    /// Register a staff member and return the identifier storage assigned.
    ///
    /// # Errors
    /// - [`RegistryError::Validation`] when a required field is blank.
    /// - [`RegistryError::Storage`] when storage rejects the row.
    pub fn add_staff(&mut self, staff: NewStaffMember) -> Result<StaffId, RegistryError> {
        staff.validate()?;
        let stored = self.store.insert_staff(&staff)?;
        let id = stored.id;
        info!(
            staff_id = %id,
            name = %stored.full_name(),
            specialty = %stored.specialty,
            "staff member registered"
        );
        self.mirror.staff.insert(id, stored);
        Ok(id)
    }

    /// Book an appointment.
    ///
    /// Only the existence of the patient and staff member is checked. Dates,
    /// times and overlapping bookings are accepted as given.
    ///
    /// # Errors
    /// - [`RegistryError::Reference`] when the patient or staff member is not
    ///   registered; storage is not touched.
    /// - [`RegistryError::Storage`] when storage rejects the row.
    pub fn add_appointment(
        &mut self,
        appointment: NewAppointment,
    ) -> Result<AppointmentId, RegistryError> {
        if !self.mirror.patients.contains_key(&appointment.patient_id) {
            return Err(RegistryError::reference(
                EntityKind::Patient,
                appointment.patient_id.get(),
            ));
        }
        if !self.mirror.staff.contains_key(&appointment.staff_id) {
            return Err(RegistryError::reference(
                EntityKind::StaffMember,
                appointment.staff_id.get(),
            ));
        }

        let stored = self.store.insert_appointment(&appointment)?;
        let id = stored.id;
        info!(
            appointment_id = %id,
            patient_id = %stored.patient_id,
            staff_id = %stored.staff_id,
            date = %stored.date,
            time = %stored.time,
            "appointment booked"
        );
        self.mirror.put_appointment(stored);
        Ok(id)
    }

    /// Change an appointment's status from a label.
    ///
    /// Accepts the stored labels and their legacy equivalents (see
    /// [`AppointmentStatus`]). Returns the stored appointment, or `None` when
    /// no appointment has `id`.
    ///
    /// # Errors
    /// - [`RegistryError::Validation`] when `new_status` is not a known
    ///   label; storage is not touched.
    /// - [`RegistryError::Storage`] when the update fails.
    pub fn update_appointment_status(
        &mut self,
        id: AppointmentId,
        new_status: &str,
    ) -> Result<Option<Appointment>, RegistryError> {
        let status = new_status
            .parse::<AppointmentStatus>()
            .map_err(|err| RegistryError::validation("status", err.to_string()))?;
        self.set_appointment_status(id, status)
    }

    /// Change an appointment's status. Any status may follow any other.
    ///
    /// # Errors
    /// Returns [`RegistryError::Storage`] when the update fails.
    pub fn set_appointment_status(
        &mut self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, RegistryError> {
        let Some(stored) = self.store.update_appointment_status(id, status)? else {
            debug!(appointment_id = %id, "status update matched no appointment");
            return Ok(None);
        };
        info!(appointment_id = %id, status = %stored.status, "appointment status updated");
        self.mirror.put_appointment(stored.clone());
        Ok(Some(stored))
    }

    /// Shorthand for setting [`AppointmentStatus::Cancelled`].
    ///
    /// # Errors
    /// Returns [`RegistryError::Storage`] when the update fails.
    pub fn cancel_appointment(
        &mut self,
        id: AppointmentId,
    ) -> Result<Option<Appointment>, RegistryError> {
        self.set_appointment_status(id, AppointmentStatus::Cancelled)
    }
}

impl<S> AppointmentRegistry<S> {
    /// Current local date according to the injected clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    /// Patient by identifier.
    pub fn patient(&self, id: PatientId) -> Option<&Patient> {
        self.mirror.patients.get(&id)
    }

    /// All patients, by identifier.
    pub fn patients(&self) -> impl Iterator<Item = &Patient> {
        self.mirror.patients.values()
    }

    /// Patients whose first or last name contains `query` (ignoring case) or
    /// whose identity number contains it.
    pub fn find_patients(&self, query: &str) -> Vec<&Patient> {
        self.patients().filter(|p| p.matches(query)).collect()
    }

    /// Staff member by identifier.
    pub fn staff_member(&self, id: StaffId) -> Option<&StaffMember> {
        self.mirror.staff.get(&id)
    }

    /// All staff members, by identifier.
    pub fn staff(&self) -> impl Iterator<Item = &StaffMember> {
        self.mirror.staff.values()
    }

    /// Staff members whose names or specialty contain `query`, ignoring case.
    pub fn find_staff(&self, query: &str) -> Vec<&StaffMember> {
        self.staff().filter(|s| s.matches(query)).collect()
    }

    /// Appointment by identifier.
    pub fn appointment(&self, id: AppointmentId) -> Option<&Appointment> {
        self.mirror.appointments.get(&id)
    }

    /// All appointments in booking order.
    pub fn appointments(&self) -> impl Iterator<Item = &Appointment> {
        self.mirror
            .order
            .iter()
            .filter_map(|id| self.mirror.appointments.get(id))
    }

    /// Appointments on `date`, in booking order.
    pub fn appointments_by_date(&self, date: &str) -> Vec<&Appointment> {
        self.appointments().filter(|a| a.date == date).collect()
    }

    /// A patient's appointments in booking order.
    pub fn appointments_by_patient(&self, patient_id: PatientId) -> Vec<&Appointment> {
        self.mirror
            .by_patient
            .get(&patient_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.mirror.appointments.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A staff member's appointments in booking order.
    pub fn appointments_by_staff(&self, staff_id: StaffId) -> Vec<&Appointment> {
        self.appointments()
            .filter(|a| a.staff_id == staff_id)
            .collect()
    }

    /// Appointments with `status`, in booking order.
    pub fn appointments_by_status(&self, status: AppointmentStatus) -> Vec<&Appointment> {
        self.appointments().filter(|a| a.status == status).collect()
    }

    /// All appointments sorted by date then time.
    pub fn appointments_chronological(&self) -> Vec<&Appointment> {
        let mut appointments: Vec<_> = self.appointments().collect();
        appointments.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
        appointments
    }

    /// Distinct appointment dates, ascending.
    pub fn dates_with_appointments(&self) -> impl Iterator<Item = &str> {
        self.mirror.dates.iter().map(String::as_str)
    }

    /// Counts over the mirror; "upcoming" is judged against [`Self::today`].
    pub fn statistics(&self) -> RegistryStatistics {
        let today = self.today().format("%Y-%m-%d").to_string();
        let mut stats = RegistryStatistics::empty();
        stats.total_patients = self.mirror.patients.len();
        stats.total_staff = self.mirror.staff.len();
        stats.total_appointments = self.mirror.appointments.len();
        stats.dates_with_appointments = self.mirror.dates.len();

        for appointment in self.mirror.appointments.values() {
            *stats
                .appointments_by_status
                .entry(appointment.status)
                .or_default() += 1;
            if appointment.date.as_str() >= today.as_str() && !appointment.status.is_closed() {
                stats.upcoming_appointments += 1;
            }
        }
        stats
    }
}
