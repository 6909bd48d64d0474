use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::model::{Appointment, AppointmentStatus, Project, TimeSlot};
use crate::repos::projects;
use crate::store::{keys, StorageBackend};
use chrono::NaiveDate;

/// All appointments, with missing avatars backfilled from current project
/// data.
///
/// The backfill is a pure read-time projection for legacy records that
/// predate the denormalized avatar field — it is never written back.
pub fn all<B: StorageBackend>(backend: &B) -> Result<Vec<Appointment>> {
    let mut appointments: Vec<Appointment> = codec::load_vec(backend, keys::APPOINTMENTS)?;
    let projects = projects::all(backend)?;
    backfill_avatars(&mut appointments, &projects);
    Ok(appointments)
}

pub fn find<B: StorageBackend>(backend: &B, id: &str) -> Result<Option<Appointment>> {
    Ok(all(backend)?.into_iter().find(|a| a.id == id))
}

pub fn for_student<B: StorageBackend>(
    backend: &B,
    student_id: &str,
) -> Result<Vec<Appointment>> {
    Ok(all(backend)?
        .into_iter()
        .filter(|a| a.student_id == student_id)
        .collect())
}

/// Insert a new appointment.
///
/// The denormalized avatar is resolved from the requesting student's
/// current project at insertion time, not at read time; when no project
/// exists yet the field stays absent.
pub fn add<B: StorageBackend>(backend: &B, mut appointment: Appointment) -> Result<Appointment> {
    if appointment.student_avatar.is_none() {
        if let Some(project) = projects::find_by_student(backend, &appointment.student_id)? {
            appointment.student_avatar = project.student_avatar.clone();
        }
    }

    let mut stored: Vec<Appointment> = codec::load_vec(backend, keys::APPOINTMENTS)?;
    stored.push(appointment.clone());
    codec::store(backend, keys::APPOINTMENTS, &stored)?;
    debug!(id = %appointment.id, "appointment added");
    Ok(appointment)
}

/// Insert if the id is unseen, full replace otherwise.
pub fn upsert<B: StorageBackend>(backend: &B, appointment: Appointment) -> Result<()> {
    let mut stored: Vec<Appointment> = codec::load_vec(backend, keys::APPOINTMENTS)?;
    match stored.iter_mut().find(|a| a.id == appointment.id) {
        Some(slot) => *slot = appointment,
        None => stored.push(appointment),
    }
    codec::store(backend, keys::APPOINTMENTS, &stored)
}

/// Move an appointment to a new date/slot, forcing its status to
/// postponed. Returns the updated record, or `None` for an unknown id.
pub fn postpone<B: StorageBackend>(
    backend: &B,
    id: &str,
    date: NaiveDate,
    slot: TimeSlot,
) -> Result<Option<Appointment>> {
    // Raw load: a mutation must not persist read-time repairs.
    let mut stored: Vec<Appointment> = codec::load_vec(backend, keys::APPOINTMENTS)?;
    let Some(appointment) = stored.iter_mut().find(|a| a.id == id) else {
        return Ok(None);
    };
    appointment.postpone(date, slot);
    let updated = appointment.clone();
    codec::store(backend, keys::APPOINTMENTS, &stored)?;
    Ok(Some(updated))
}

/// Accept/cancel flows. Returns the updated record, or `None` for an
/// unknown id.
pub fn set_status<B: StorageBackend>(
    backend: &B,
    id: &str,
    status: AppointmentStatus,
) -> Result<Option<Appointment>> {
    let mut stored: Vec<Appointment> = codec::load_vec(backend, keys::APPOINTMENTS)?;
    let Some(appointment) = stored.iter_mut().find(|a| a.id == id) else {
        return Ok(None);
    };
    appointment.status = status;
    let updated = appointment.clone();
    codec::store(backend, keys::APPOINTMENTS, &stored)?;
    Ok(Some(updated))
}

fn backfill_avatars(appointments: &mut [Appointment], projects: &[Project]) {
    for appointment in appointments
        .iter_mut()
        .filter(|a| a.student_avatar.is_none())
    {
        if let Some(project) = projects
            .iter()
            .find(|p| p.student_id == appointment.student_id)
        {
            appointment.student_avatar = project.student_avatar.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::projects::tests::project;
    use crate::store::memory::MemBackend;

    fn appointment(id: &str, student_id: &str) -> Appointment {
        Appointment {
            id: id.into(),
            student_id: student_id.into(),
            student_name: "Amina Khelifi".into(),
            student_avatar: None,
            project_id: "p-1".into(),
            project_title: "Project p-1".into(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            time_slot: TimeSlot::T0900,
            reason: "Review of chapter 2".into(),
            status: AppointmentStatus::Pending,
        }
    }

    #[test]
    fn test_add_resolves_avatar_at_insertion_time() {
        let backend = MemBackend::new();
        projects::upsert(&backend, project("p-1", "s-1", "Amina Khelifi")).unwrap();

        let stored = add(&backend, appointment("a-1", "s-1")).unwrap();
        assert_eq!(stored.student_avatar.as_deref(), Some("avatars/s-1.png"));

        // Persisted with the avatar, not just projected.
        let raw = backend.raw(keys::APPOINTMENTS).unwrap();
        assert!(raw.contains("avatars/s-1.png"));
    }

    #[test]
    fn test_add_without_project_leaves_avatar_absent() {
        let backend = MemBackend::new();
        let stored = add(&backend, appointment("a-1", "s-9")).unwrap();
        assert!(stored.student_avatar.is_none());
    }

    #[test]
    fn test_read_time_backfill_does_not_persist() {
        let backend = MemBackend::new();
        // Legacy record written before the avatar field existed.
        add(&backend, appointment("a-1", "s-1")).unwrap();
        let raw_before = backend.raw(keys::APPOINTMENTS).unwrap();

        // Project appears later, with an avatar.
        projects::upsert(&backend, project("p-1", "s-1", "Amina Khelifi")).unwrap();

        let read = all(&backend).unwrap();
        assert_eq!(
            read[0].student_avatar.as_deref(),
            Some("avatars/s-1.png"),
            "read repairs the missing avatar"
        );

        // The stored string is byte-identical: reads are non-mutating.
        assert_eq!(backend.raw(keys::APPOINTMENTS).unwrap(), raw_before);
    }

    #[test]
    fn test_postpone_changes_slot_and_status_only() {
        let backend = MemBackend::new();
        add(&backend, appointment("a-1", "s-1")).unwrap();

        let updated = postpone(
            &backend,
            "a-1",
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            TimeSlot::T1100,
        )
        .unwrap()
        .unwrap();

        assert_eq!(updated.status, AppointmentStatus::Postponed);
        assert_eq!(updated.time_slot, TimeSlot::T1100);
        assert_eq!(updated.date, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(updated.reason, "Review of chapter 2");

        assert!(postpone(
            &backend,
            "missing",
            NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            TimeSlot::T1000
        )
        .unwrap()
        .is_none());
    }

    #[test]
    fn test_set_status_accept() {
        let backend = MemBackend::new();
        add(&backend, appointment("a-1", "s-1")).unwrap();

        let updated = set_status(&backend, "a-1", AppointmentStatus::Accepted)
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, AppointmentStatus::Accepted);

        let reread = find(&backend, "a-1").unwrap().unwrap();
        assert_eq!(reread.status, AppointmentStatus::Accepted);
    }

    #[test]
    fn test_for_student_filters() {
        let backend = MemBackend::new();
        add(&backend, appointment("a-1", "s-1")).unwrap();
        add(&backend, appointment("a-2", "s-2")).unwrap();
        add(&backend, appointment("a-3", "s-1")).unwrap();

        let mine = for_student(&backend, "s-1").unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|a| a.student_id == "s-1"));
    }
}
