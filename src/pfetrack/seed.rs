//! Seed registry: the reference dataset used to populate a fresh store.
//!
//! The registry is an explicit value passed into [`crate::init::init`],
//! never a singleton consulted behind the caller's back — tests substitute
//! fixtures, the CLI ships the builtin demo dataset.

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use crate::model::{
    Appointment, AppointmentStatus, Milestone, Progress, Project, ProjectStatus, TimeSlot,
};

/// Initial collections written by `init` when a key is completely absent.
#[derive(Debug, Clone, Default)]
pub struct SeedRegistry {
    pub projects: Vec<Project>,
    pub appointments: Vec<Appointment>,
}

impl SeedRegistry {
    /// A registry that seeds every collection empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The demo dataset the portal ships with.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn milestone(name: &str, completion: u8, deadline: NaiveDate) -> Milestone {
    Milestone {
        name: name.to_string(),
        completion,
        updated_on: None,
        deadline: Some(deadline),
    }
}

static BUILTIN: Lazy<SeedRegistry> = Lazy::new(|| SeedRegistry {
    projects: vec![
        Project {
            id: "prj-2026-014".into(),
            title: "Indoor localization of mobile robots with UWB beacons".into(),
            student_id: "etu-22104".into(),
            student_name: "Amina Khelifi".into(),
            student_email: "a.khelifi@univ.example".into(),
            student_avatar: Some("avatars/etu-22104.png".into()),
            student_phone: Some("+213 550 14 22 71".into()),
            supervisor_name: "Dr. L. Mansouri".into(),
            description: "Design and evaluation of an ultra-wideband anchor network for \
                          centimetre-level localization of a differential-drive robot."
                .into(),
            progress: Progress {
                experimental: vec![
                    milestone("Anchor calibration bench", 60, date(2026, 3, 13)),
                    milestone("Trilateration solver", 25, date(2026, 4, 10)),
                    milestone("On-robot evaluation", 0, date(2026, 5, 15)),
                ],
                writing: vec![
                    milestone("State of the art", 40, date(2026, 3, 27)),
                    milestone("Methodology chapter", 0, date(2026, 5, 1)),
                ],
            },
            status: ProjectStatus::InProgress,
            supervisor_signature: None,
            supervisor_stamp: None,
            supervisor_signed_on: None,
            head_signature: None,
            head_stamp: None,
            head_signed_on: None,
            proposal_url: Some("docs/proposals/prj-2026-014.pdf".into()),
            journal: Vec::new(),
            documents: Vec::new(),
        },
        Project {
            id: "prj-2026-021".into(),
            title: "Incremental static analysis for PLC ladder programs".into(),
            student_id: "etu-22387".into(),
            student_name: "Yacine Benali".into(),
            student_email: "y.benali@univ.example".into(),
            student_avatar: None,
            student_phone: None,
            supervisor_name: "Dr. L. Mansouri".into(),
            description: "A dependency-aware analyzer that re-checks only the rungs affected \
                          by an edit."
                .into(),
            progress: Progress {
                experimental: vec![
                    milestone("Ladder IR parser", 80, date(2026, 3, 6)),
                    milestone("Dependency graph", 35, date(2026, 4, 3)),
                    milestone("Benchmark suite", 0, date(2026, 5, 22)),
                ],
                writing: vec![
                    milestone("State of the art", 55, date(2026, 3, 27)),
                    milestone("Design chapter", 10, date(2026, 5, 1)),
                ],
            },
            status: ProjectStatus::InProgress,
            supervisor_signature: None,
            supervisor_stamp: None,
            supervisor_signed_on: None,
            head_signature: None,
            head_stamp: None,
            head_signed_on: None,
            proposal_url: None,
            journal: Vec::new(),
            documents: Vec::new(),
        },
    ],
    appointments: vec![Appointment {
        id: "apt-000341".into(),
        student_id: "etu-22104".into(),
        student_name: "Amina Khelifi".into(),
        student_avatar: Some("avatars/etu-22104.png".into()),
        project_id: "prj-2026-014".into(),
        project_title: "Indoor localization of mobile robots with UWB beacons".into(),
        date: date(2026, 3, 2),
        time_slot: TimeSlot::T1000,
        reason: "Review anchor calibration results".into(),
        status: AppointmentStatus::Pending,
    }],
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_internally_consistent() {
        let seed = SeedRegistry::builtin();
        // Every seeded appointment must reference a seeded project.
        for appointment in &seed.appointments {
            assert!(
                seed.projects.iter().any(|p| p.id == appointment.project_id),
                "appointment {} references unknown project {}",
                appointment.id,
                appointment.project_id
            );
        }
    }

    #[test]
    fn test_empty_registry_is_empty() {
        let seed = SeedRegistry::empty();
        assert!(seed.projects.is_empty());
        assert!(seed.appointments.is_empty());
    }
}
