use chrono::Utc;
use uuid::Uuid;

use crate::codec;
use crate::error::Result;
use crate::model::Document;
use crate::repos::projects;
use crate::store::{keys, StorageBackend};

/// Input for a document submission; id and date are generated here.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub name: String,
    pub url: String,
    pub category: String,
}

/// Append a document to the owning project and persist. Returns the
/// stored record, or `None` when the project is unknown.
pub fn add<B: StorageBackend>(
    backend: &B,
    project_id: &str,
    new: NewDocument,
) -> Result<Option<Document>> {
    let mut stored = projects::all(backend)?;
    let Some(project) = stored.iter_mut().find(|p| p.id == project_id) else {
        return Ok(None);
    };

    let document = Document {
        id: Uuid::new_v4().to_string(),
        name: new.name,
        url: new.url,
        date: Utc::now().date_naive(),
        category: new.category,
    };
    project.documents.push(document.clone());
    codec::store(backend, keys::PROJECTS, &stored)?;
    Ok(Some(document))
}

/// Drop a document from the owning project's list. Returns false when
/// either the project or the document is unknown.
pub fn remove<B: StorageBackend>(
    backend: &B,
    project_id: &str,
    document_id: &str,
) -> Result<bool> {
    let mut stored = projects::all(backend)?;
    let Some(project) = stored.iter_mut().find(|p| p.id == project_id) else {
        return Ok(false);
    };

    let before = project.documents.len();
    project.documents.retain(|d| d.id != document_id);
    if project.documents.len() == before {
        return Ok(false);
    }
    codec::store(backend, keys::PROJECTS, &stored)?;
    Ok(true)
}
