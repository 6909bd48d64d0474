use tracing::debug;

use crate::codec;
use crate::error::Result;
use crate::model::{ProfileUpdate, Project, Role};
use crate::store::{keys, StorageBackend};

pub fn all<B: StorageBackend>(backend: &B) -> Result<Vec<Project>> {
    codec::load_vec(backend, keys::PROJECTS)
}

pub fn find<B: StorageBackend>(backend: &B, id: &str) -> Result<Option<Project>> {
    Ok(all(backend)?.into_iter().find(|p| p.id == id))
}

/// At most one project per student; first match wins.
pub fn find_by_student<B: StorageBackend>(
    backend: &B,
    student_id: &str,
) -> Result<Option<Project>> {
    Ok(all(backend)?
        .into_iter()
        .find(|p| p.student_id == student_id))
}

/// Insert if the id is unseen, full replace otherwise.
pub fn upsert<B: StorageBackend>(backend: &B, project: Project) -> Result<()> {
    let mut projects = all(backend)?;
    match projects.iter_mut().find(|p| p.id == project.id) {
        Some(slot) => *slot = project,
        None => projects.push(project),
    }
    codec::store(backend, keys::PROJECTS, &projects)
}

/// Overwrite the denormalized student name/avatar on every project owned
/// by the student, then persist.
///
/// Must run synchronously right after the corresponding user profile
/// mutation so readers never observe a stale copy once the update call
/// returns. Returns the number of projects touched.
pub fn sync_student_profile<B: StorageBackend>(
    backend: &B,
    student_id: &str,
    update: &ProfileUpdate,
) -> Result<usize> {
    if update.is_empty() {
        return Ok(0);
    }

    let mut projects = all(backend)?;
    let mut touched = 0;
    for project in projects.iter_mut().filter(|p| p.student_id == student_id) {
        if let Some(name) = &update.name {
            project.student_name = name.clone();
        }
        if let Some(avatar) = &update.avatar {
            project.student_avatar = Some(avatar.clone());
        }
        touched += 1;
    }

    if touched > 0 {
        codec::store(backend, keys::PROJECTS, &projects)?;
        debug!(student_id, touched, "synced denormalized student profile");
    }
    Ok(touched)
}

/// Append a journal entry to a project. Returns false when the project is
/// unknown.
pub fn append_journal<B: StorageBackend>(
    backend: &B,
    project_id: &str,
    text: String,
    author: Role,
) -> Result<bool> {
    let mut projects = all(backend)?;
    let Some(project) = projects.iter_mut().find(|p| p.id == project_id) else {
        return Ok(false);
    };
    project.append_journal(text, author);
    codec::store(backend, keys::PROJECTS, &projects)?;
    Ok(true)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{Progress, ProjectStatus};
    use crate::store::memory::MemBackend;

    pub(crate) fn project(id: &str, student_id: &str, name: &str) -> Project {
        Project {
            id: id.into(),
            title: format!("Project {id}"),
            student_id: student_id.into(),
            student_name: name.into(),
            student_email: format!("{student_id}@univ.example"),
            student_avatar: Some(format!("avatars/{student_id}.png")),
            student_phone: None,
            supervisor_name: "Dr. L. Mansouri".into(),
            description: String::new(),
            progress: Progress::default(),
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
        }
    }

    #[test]
    fn test_upsert_inserts_then_replaces() {
        let backend = MemBackend::new();
        upsert(&backend, project("p-1", "s-1", "Amina Khelifi")).unwrap();
        assert_eq!(all(&backend).unwrap().len(), 1);

        let mut changed = project("p-1", "s-1", "Amina Khelifi");
        changed.title = "Revised title".into();
        upsert(&backend, changed).unwrap();

        let projects = all(&backend).unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "Revised title");
    }

    #[test]
    fn test_find_by_student_first_match() {
        let backend = MemBackend::new();
        upsert(&backend, project("p-1", "s-1", "Amina Khelifi")).unwrap();
        upsert(&backend, project("p-2", "s-2", "Yacine Benali")).unwrap();

        let found = find_by_student(&backend, "s-2").unwrap().unwrap();
        assert_eq!(found.id, "p-2");
        assert!(find_by_student(&backend, "s-3").unwrap().is_none());
    }

    #[test]
    fn test_sync_student_profile_rewrites_denormalized_copies() {
        let backend = MemBackend::new();
        upsert(&backend, project("p-1", "s-1", "Amina Khelifi")).unwrap();
        upsert(&backend, project("p-2", "s-2", "Yacine Benali")).unwrap();

        let touched = sync_student_profile(
            &backend,
            "s-1",
            &ProfileUpdate {
                name: Some("Amina K.".into()),
                avatar: Some("avatars/new.png".into()),
            },
        )
        .unwrap();
        assert_eq!(touched, 1);

        // Visible immediately after the call returns.
        let synced = find_by_student(&backend, "s-1").unwrap().unwrap();
        assert_eq!(synced.student_name, "Amina K.");
        assert_eq!(synced.student_avatar.as_deref(), Some("avatars/new.png"));

        // Other students untouched.
        let other = find_by_student(&backend, "s-2").unwrap().unwrap();
        assert_eq!(other.student_name, "Yacine Benali");
    }

    #[test]
    fn test_sync_partial_update_leaves_other_field() {
        let backend = MemBackend::new();
        upsert(&backend, project("p-1", "s-1", "Amina Khelifi")).unwrap();

        sync_student_profile(
            &backend,
            "s-1",
            &ProfileUpdate {
                name: Some("Amina K.".into()),
                avatar: None,
            },
        )
        .unwrap();

        let synced = find_by_student(&backend, "s-1").unwrap().unwrap();
        assert_eq!(synced.student_name, "Amina K.");
        assert_eq!(synced.student_avatar.as_deref(), Some("avatars/s-1.png"));
    }

    #[test]
    fn test_sync_empty_update_writes_nothing() {
        let backend = MemBackend::new();
        upsert(&backend, project("p-1", "s-1", "Amina Khelifi")).unwrap();

        // A write would fail; an empty update must not attempt one.
        backend.set_simulate_write_error(true);
        let touched = sync_student_profile(&backend, "s-1", &ProfileUpdate::default()).unwrap();
        assert_eq!(touched, 0);
    }

    #[test]
    fn test_append_journal_persists() {
        let backend = MemBackend::new();
        upsert(&backend, project("p-1", "s-1", "Amina Khelifi")).unwrap();

        assert!(append_journal(
            &backend,
            "p-1",
            "Week 3: anchors calibrated.".into(),
            Role::Student
        )
        .unwrap());
        assert!(!append_journal(&backend, "p-9", "ghost".into(), Role::Student).unwrap());

        let stored = find(&backend, "p-1").unwrap().unwrap();
        assert_eq!(stored.journal.len(), 1);
        assert_eq!(stored.journal[0].author, Role::Student);
    }
}
