//! # API Facade
//!
//! [`PortalApi`] is a thin facade over the repositories — the single entry
//! point every client (CLI, a future web shell) talks to. It dispatches to
//! the repository functions and hosts the few operations that span more
//! than one collection:
//!
//! - a profile update immediately followed by the denormalization sync,
//!   so readers never observe a stale copy after the call returns;
//! - appointment booking, which persists first and then fires the
//!   external notifier, swallowing its failures.
//!
//! The facade does no I/O of its own and returns plain data; presentation
//! stays with the caller.
//!
//! Generic over `StorageBackend`: production runs on `FileBackend`, tests
//! on `MemBackend`.

use chrono::NaiveDate;
use tracing::warn;

use crate::backup;
use crate::error::Result;
use crate::init;
use crate::model::{
    Appointment, AppointmentStatus, Notification, ProfileUpdate, Project, Role, TimeSlot,
    TrackingSheet, User,
};
use crate::notifier::{BookingNotice, BookingNotifier, NoopNotifier};
use crate::reminders::{self, ScheduleEntry};
use crate::repos::{appointments, documents, notifications, projects, sheets, users};
use crate::seed::SeedRegistry;
use crate::store::StorageBackend;

pub struct PortalApi<B: StorageBackend> {
    backend: B,
    notifier: Box<dyn BookingNotifier>,
}

impl<B: StorageBackend> PortalApi<B> {
    pub fn new(backend: B) -> Self {
        Self::with_notifier(backend, Box::new(NoopNotifier))
    }

    pub fn with_notifier(backend: B, notifier: Box<dyn BookingNotifier>) -> Self {
        Self { backend, notifier }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Seed-if-absent initialization; run once at startup, before any
    /// other call.
    pub fn init(&self, seed: &SeedRegistry) -> Result<()> {
        init::init(&self.backend, seed)
    }

    // --- Projects ---

    pub fn projects(&self) -> Result<Vec<Project>> {
        projects::all(&self.backend)
    }

    pub fn project(&self, id: &str) -> Result<Option<Project>> {
        projects::find(&self.backend, id)
    }

    pub fn project_for_student(&self, student_id: &str) -> Result<Option<Project>> {
        projects::find_by_student(&self.backend, student_id)
    }

    pub fn save_project(&self, project: Project) -> Result<()> {
        projects::upsert(&self.backend, project)
    }

    pub fn append_journal(&self, project_id: &str, text: String, author: Role) -> Result<bool> {
        projects::append_journal(&self.backend, project_id, text, author)
    }

    // --- Users & denormalization ---

    pub fn user(&self, id: &str) -> Result<Option<User>> {
        users::find(&self.backend, id)
    }

    pub fn save_user(&self, user: User) -> Result<()> {
        users::upsert(&self.backend, user)
    }

    /// Apply a profile mutation and synchronously re-point every
    /// denormalized copy. The project sync runs even when the user record
    /// itself was never persisted.
    pub fn update_student_profile(
        &self,
        student_id: &str,
        update: &ProfileUpdate,
    ) -> Result<()> {
        users::update_profile(&self.backend, student_id, update)?;
        projects::sync_student_profile(&self.backend, student_id, update)?;
        Ok(())
    }

    // --- Appointments ---

    pub fn appointments(&self) -> Result<Vec<Appointment>> {
        appointments::all(&self.backend)
    }

    pub fn appointments_for_student(&self, student_id: &str) -> Result<Vec<Appointment>> {
        appointments::for_student(&self.backend, student_id)
    }

    /// Persist a new appointment, then fire the booking notifier.
    ///
    /// The notifier is fire-and-forget: its failure is logged and the
    /// stored appointment is returned regardless.
    pub fn book_appointment(&self, appointment: Appointment) -> Result<Appointment> {
        let stored = appointments::add(&self.backend, appointment)?;
        let notice = BookingNotice::for_appointment(&stored);
        if let Err(error) = self.notifier.notify(&notice) {
            warn!(%error, appointment = %stored.id, "booking notifier failed");
        }
        Ok(stored)
    }

    pub fn postpone_appointment(
        &self,
        id: &str,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> Result<Option<Appointment>> {
        appointments::postpone(&self.backend, id, date, slot)
    }

    pub fn set_appointment_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>> {
        appointments::set_status(&self.backend, id, status)
    }

    // --- Notifications ---

    pub fn notifications(&self) -> Result<Vec<Notification>> {
        notifications::all(&self.backend)
    }

    pub fn notifications_for_student(&self, student_id: &str) -> Result<Vec<Notification>> {
        notifications::for_student(&self.backend, student_id)
    }

    pub fn push_notification(&self, notification: Notification) -> Result<()> {
        notifications::add(&self.backend, notification)
    }

    pub fn dismiss_notification(&self, id: &str) -> Result<bool> {
        notifications::deactivate(&self.backend, id)
    }

    pub fn purge_notification(&self, id: &str) -> Result<bool> {
        notifications::purge(&self.backend, id)
    }

    pub fn clear_notifications(&self) -> Result<()> {
        notifications::clear_all(&self.backend)
    }

    /// Generate checkpoint reminders for a student from their sheet's
    /// upcoming schedule. No project or no sheet means no reminders.
    pub fn generate_checkpoint_reminders(
        &self,
        student_id: &str,
        today: NaiveDate,
    ) -> Result<usize> {
        let Some(project) = projects::find_by_student(&self.backend, student_id)? else {
            return Ok(0);
        };
        let Some(sheet) = sheets::find_by_project(&self.backend, &project.id)? else {
            return Ok(0);
        };
        let schedule: Vec<ScheduleEntry> = reminders::schedule_of(&sheet);
        reminders::generate(&self.backend, student_id, &schedule, today)
    }

    // --- Tracking sheets ---

    pub fn sheet_for_project(&self, project_id: &str) -> Result<Option<TrackingSheet>> {
        sheets::find_by_project(&self.backend, project_id)
    }

    pub fn save_sheet(&self, sheet: TrackingSheet) -> Result<()> {
        sheets::save(&self.backend, sheet)
    }

    // --- Documents ---

    pub fn add_document(
        &self,
        project_id: &str,
        new: documents::NewDocument,
    ) -> Result<Option<crate::model::Document>> {
        documents::add(&self.backend, project_id, new)
    }

    pub fn remove_document(&self, project_id: &str, document_id: &str) -> Result<bool> {
        documents::remove(&self.backend, project_id, document_id)
    }

    // --- Backup ---

    pub fn export(&self) -> Result<String> {
        backup::export(&self.backend)
    }

    pub fn import(&self, payload: &str) -> Result<bool> {
        backup::import(&self.backend, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::test_support::RecordingNotifier;
    use crate::repos::projects::tests::project;
    use crate::store::memory::MemBackend;
    use std::rc::Rc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pending_appointment(id: &str, student_id: &str) -> Appointment {
        Appointment {
            id: id.into(),
            student_id: student_id.into(),
            student_name: "Amina Khelifi".into(),
            student_avatar: None,
            project_id: "p-1".into(),
            project_title: "Project p-1".into(),
            date: date(2026, 3, 2),
            time_slot: TimeSlot::T0900,
            reason: "Review of chapter 2".into(),
            status: AppointmentStatus::Pending,
        }
    }

    #[test]
    fn test_profile_update_syncs_denormalized_copies_immediately() {
        let api = PortalApi::new(MemBackend::new());
        api.save_project(project("p-1", "s-1", "Amina Khelifi")).unwrap();

        api.update_student_profile(
            "s-1",
            &ProfileUpdate {
                name: Some("B. Amina".into()),
                avatar: Some("avatars/b.png".into()),
            },
        )
        .unwrap();

        // Stale copies are gone before the call returned.
        let synced = api.project_for_student("s-1").unwrap().unwrap();
        assert_eq!(synced.student_name, "B. Amina");

        // A subsequently added appointment carries the new avatar.
        let booked = api.book_appointment(pending_appointment("a-1", "s-1")).unwrap();
        assert_eq!(booked.student_avatar.as_deref(), Some("avatars/b.png"));
    }

    #[test]
    fn test_booking_fires_notifier_with_fixed_payload() {
        let recorder = Rc::new(RecordingNotifier::default());
        let api = PortalApi::with_notifier(MemBackend::new(), Box::new(recorder.clone()));

        api.book_appointment(pending_appointment("a-1", "s-1")).unwrap();

        let notices = recorder.notices.borrow();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].student_name, "Amina Khelifi");
        assert_eq!(notices[0].time_slot, TimeSlot::T0900);
        assert_eq!(notices[0].reason, "Review of chapter 2");
    }

    #[test]
    fn test_notifier_failure_never_rolls_back_the_booking() {
        let recorder = Rc::new(RecordingNotifier {
            fail: true,
            ..Default::default()
        });
        let api = PortalApi::with_notifier(MemBackend::new(), Box::new(recorder.clone()));

        let booked = api.book_appointment(pending_appointment("a-1", "s-1")).unwrap();
        assert_eq!(booked.id, "a-1");

        // Persisted despite the failing relay.
        assert_eq!(api.appointments().unwrap().len(), 1);
        assert_eq!(recorder.notices.borrow().len(), 1);
    }

    #[test]
    fn test_reminders_need_project_and_sheet() {
        let api = PortalApi::new(MemBackend::new());
        assert_eq!(
            api.generate_checkpoint_reminders("s-1", date(2026, 3, 2)).unwrap(),
            0
        );

        api.save_project(project("p-1", "s-1", "Amina Khelifi")).unwrap();
        assert_eq!(
            api.generate_checkpoint_reminders("s-1", date(2026, 3, 2)).unwrap(),
            0
        );

        let sheet = TrackingSheet::new(
            &api.project("p-1").unwrap().unwrap(),
            date(2026, 3, 3),
            date(2026, 5, 29),
            date(2026, 6, 22),
        );
        api.save_sheet(sheet).unwrap();

        // Checkpoint 1 is tomorrow: exactly one reminder, once.
        assert_eq!(
            api.generate_checkpoint_reminders("s-1", date(2026, 3, 2)).unwrap(),
            1
        );
        assert_eq!(
            api.generate_checkpoint_reminders("s-1", date(2026, 3, 2)).unwrap(),
            0
        );
    }

    #[test]
    fn test_document_lifecycle_through_facade() {
        let api = PortalApi::new(MemBackend::new());
        api.save_project(project("p-1", "s-1", "Amina Khelifi")).unwrap();

        let stored = api
            .add_document(
                "p-1",
                documents::NewDocument {
                    name: "chapter2.pdf".into(),
                    url: "uploads/chapter2.pdf".into(),
                    category: "report".into(),
                },
            )
            .unwrap()
            .unwrap();
        assert!(api.remove_document("p-1", &stored.id).unwrap());
        assert!(api.project("p-1").unwrap().unwrap().documents.is_empty());
    }
}
