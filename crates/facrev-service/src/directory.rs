//! Admin-facing faculty directory operations.

use std::sync::Arc;

use tracing::info;

use facrev_core::traits::storage::IFacultyStore;
use facrev_core::{Faculty, FacultyDraft, FacultyUpdate, ServiceError, ValidationError};
use facrev_storage::StorageEngine;

pub struct DirectoryService {
    faculty: Arc<dyn IFacultyStore>,
}

impl DirectoryService {
    pub fn new(faculty: Arc<dyn IFacultyStore>) -> Self {
        Self { faculty }
    }

    pub fn from_engine(engine: &Arc<StorageEngine>) -> Self {
        Self::new(engine.as_faculty_store())
    }

    /// Create one listing from a draft. Name and department are required;
    /// a blank title falls back to "Faculty".
    pub fn add_faculty(&self, draft: &FacultyDraft) -> Result<Faculty, ServiceError> {
        validate_draft(draft)?;
        let title = if draft.title.trim().is_empty() {
            "Faculty"
        } else {
            draft.title.trim()
        };
        let listing = Faculty::new_listing(draft.name.trim(), draft.department.trim(), title);
        self.faculty.create_faculty(&listing)?;
        info!(faculty_id = %listing.id, name = %listing.name, "faculty listing created");
        Ok(listing)
    }

    /// Create many listings in one call. All-or-nothing validation: the
    /// whole batch is rejected before any row is written if one draft is
    /// invalid.
    pub fn add_faculty_bulk(&self, drafts: &[FacultyDraft]) -> Result<Vec<Faculty>, ServiceError> {
        if drafts.is_empty() {
            return Err(ValidationError::new("drafts", "no rows to import").into());
        }
        for draft in drafts {
            validate_draft(draft)?;
        }
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            created.push(self.add_faculty(draft)?);
        }
        info!(count = created.len(), "bulk faculty import committed");
        Ok(created)
    }

    pub fn update_faculty(&self, id: &str, update: &FacultyUpdate) -> Result<(), ServiceError> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(ValidationError::new("name", "must not be empty").into());
            }
        }
        if let Some(department) = &update.department {
            if department.trim().is_empty() {
                return Err(ValidationError::new("department", "must not be empty").into());
            }
        }
        self.faculty.update_faculty(id, update)?;
        Ok(())
    }

    pub fn delete_faculty(&self, id: &str) -> Result<(), ServiceError> {
        self.faculty.delete_faculty(id)?;
        info!(faculty_id = %id, "faculty listing deleted");
        Ok(())
    }

    pub fn get_faculty(&self, id: &str) -> Result<Faculty, ServiceError> {
        self.faculty
            .get_faculty(id)?
            .ok_or(ServiceError::NotFound {
                collection: "faculty",
                id: id.to_string(),
            })
    }

    pub fn list_faculty(&self) -> Result<Vec<Faculty>, ServiceError> {
        Ok(self.faculty.list_faculty()?)
    }
}

fn validate_draft(draft: &FacultyDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::new("name", "must not be empty"));
    }
    if draft.department.trim().is_empty() {
        return Err(ValidationError::new("department", "must not be empty"));
    }
    Ok(())
}
