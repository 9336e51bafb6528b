use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::models::{Document, Material, NewMaterial, NewProject, NewTask, Project, Task};

/// Which materials `list_materials` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialScope {
    All,
    /// Materials not assigned to any project.
    Inventory,
    Project(u32),
}

/// A project together with the records that reference it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetail {
    pub project: Project,
    pub tasks: Vec<Task>,
    pub materials: Vec<Material>,
}

/// JSON-file backed store for projects, tasks and materials
pub struct RecordStore {
    path: PathBuf,
    document: Document,
}

impl RecordStore {
    /// Open the store at `path`, loading its document
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let document = load(&path)?;

        Ok(Self { path, document })
    }

    /// Get a reference to the loaded document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Re-read the document from disk, discarding in-memory state
    pub fn reload(&mut self) -> StoreResult<()> {
        self.document = load(&self.path)?;
        Ok(())
    }

    /// Write the full document to disk
    pub fn save(&self) -> StoreResult<()> {
        save(&self.path, &self.document)
    }

    // Project operations
    pub fn add_project(&mut self, new: NewProject) -> StoreResult<Project> {
        let name = required("project name", new.name)?;
        let customer = required("customer", new.customer)?;
        let status = required("status", new.status)?;
        let next_id = following_id("project", self.document.next_project_id)?;

        let project = Project {
            id: self.document.next_project_id,
            name,
            customer,
            address: optional(new.address),
            due_date: new.due_date,
            status,
            notes: optional(new.notes),
        };

        self.document.projects.push(project.clone());
        self.document.next_project_id = next_id;
        if let Err(err) = self.save() {
            self.document.projects.pop();
            self.document.next_project_id -= 1;
            return Err(err);
        }

        info!(project_id = project.id, "project added");
        Ok(project)
    }

    pub fn list_projects(&self, status: Option<&str>) -> Vec<&Project> {
        self.document
            .projects
            .iter()
            .filter(|p| status.is_none_or(|s| p.status == s))
            .collect()
    }

    pub fn project_detail(&self, id: u32) -> StoreResult<ProjectDetail> {
        let project = self
            .document
            .project(id)
            .ok_or(StoreError::NotFound { entity: "project", id })?;

        Ok(ProjectDetail {
            project: project.clone(),
            tasks: self.document.tasks_for(id).cloned().collect(),
            materials: self.document.materials_for(id).cloned().collect(),
        })
    }

    // Task operations
    pub fn add_task(&mut self, new: NewTask) -> StoreResult<Task> {
        self.require_project(new.project_id)?;
        let description = required("task description", new.description)?;
        let next_id = following_id("task", self.document.next_task_id)?;

        let task = Task {
            id: self.document.next_task_id,
            project_id: new.project_id,
            description,
            due_date: new.due_date,
            done: new.done,
        };

        self.document.tasks.push(task.clone());
        self.document.next_task_id = next_id;
        if let Err(err) = self.save() {
            self.document.tasks.pop();
            self.document.next_task_id -= 1;
            return Err(err);
        }

        info!(task_id = task.id, project_id = task.project_id, "task added");
        Ok(task)
    }

    // Material operations
    pub fn add_material(&mut self, new: NewMaterial) -> StoreResult<Material> {
        if let Some(project_id) = new.project_id {
            self.require_project(project_id)?;
        }
        let name = required("material name", new.name)?;
        let unit = required("unit", new.unit)?;
        if !new.quantity.is_finite() || new.quantity < 0.0 {
            return Err(StoreError::Validation(format!(
                "quantity must be a non-negative number, got {}",
                new.quantity
            )));
        }
        let next_id = following_id("material", self.document.next_material_id)?;

        let material = Material {
            id: self.document.next_material_id,
            name,
            quantity: new.quantity,
            unit,
            project_id: new.project_id,
        };

        self.document.materials.push(material.clone());
        self.document.next_material_id = next_id;
        if let Err(err) = self.save() {
            self.document.materials.pop();
            self.document.next_material_id -= 1;
            return Err(err);
        }

        info!(
            material_id = material.id,
            project_id = ?material.project_id,
            "material added"
        );
        Ok(material)
    }

    pub fn list_materials(&self, scope: MaterialScope) -> StoreResult<Vec<&Material>> {
        if let MaterialScope::Project(id) = scope {
            self.require_project(id)?;
        }

        Ok(self
            .document
            .materials
            .iter()
            .filter(|m| match scope {
                MaterialScope::All => true,
                MaterialScope::Inventory => m.project_id.is_none(),
                MaterialScope::Project(id) => m.project_id == Some(id),
            })
            .collect())
    }

    fn require_project(&self, id: u32) -> StoreResult<()> {
        if self.document.has_project(id) {
            Ok(())
        } else {
            Err(StoreError::NotFound { entity: "project", id })
        }
    }
}

/// Read and validate the document at `path`; a missing file yields an empty document.
pub fn load(path: &Path) -> StoreResult<Document> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "data file missing, starting empty");
            return Ok(Document::default());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let corrupt = |reason: String| StoreError::DataCorruption {
        path: path.to_path_buf(),
        reason,
    };
    let document: Document =
        serde_json::from_slice(&raw).map_err(|err| corrupt(err.to_string()))?;
    document.check_consistency().map_err(corrupt)?;

    debug!(
        path = %path.display(),
        projects = document.projects.len(),
        tasks = document.tasks.len(),
        materials = document.materials.len(),
        "data file loaded"
    );
    Ok(document)
}

/// Serialize `document` next to `path` and rename it into place.
pub fn save(path: &Path, document: &Document) -> StoreResult<()> {
    let io_err = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut json = serde_json::to_string_pretty(document)
        .map_err(|err| io_err(std::io::Error::other(err)))?;
    json.push('\n');

    let tmp_path = temp_path(path);
    let written = fs::File::create(&tmp_path).and_then(|mut file| {
        file.write_all(json.as_bytes())?;
        file.sync_all()
    });
    if let Err(source) = written.and_then(|_| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(source));
    }

    debug!(path = %path.display(), bytes = json.len(), "data file saved");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn following_id(entity: &'static str, current: u32) -> StoreResult<u32> {
    current
        .checked_add(1)
        .ok_or(StoreError::IdsExhausted { entity })
}

fn required(field: &str, value: String) -> StoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
