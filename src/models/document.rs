use serde::{Deserialize, Serialize};

use super::{Material, Project, Task};

/// The whole persisted state: three ordered collections plus their id counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    pub next_project_id: u32,
    pub next_task_id: u32,
    pub next_material_id: u32,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub materials: Vec<Material>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            next_project_id: 1,
            next_task_id: 1,
            next_material_id: 1,
            projects: Vec::new(),
            tasks: Vec::new(),
            materials: Vec::new(),
        }
    }
}

impl Document {
    pub fn project(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn has_project(&self, id: u32) -> bool {
        self.project(id).is_some()
    }

    pub fn tasks_for(&self, project_id: u32) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.project_id == project_id)
    }

    pub fn materials_for(&self, project_id: u32) -> impl Iterator<Item = &Material> {
        self.materials
            .iter()
            .filter(move |m| m.project_id == Some(project_id))
    }

    /// Checks the invariants a loaded document must satisfy.
    ///
    /// Returns a description of the first violation found.
    pub fn check_consistency(&self) -> Result<(), String> {
        check_ids("project", self.projects.iter().map(|p| p.id), self.next_project_id)?;
        check_ids("task", self.tasks.iter().map(|t| t.id), self.next_task_id)?;
        check_ids(
            "material",
            self.materials.iter().map(|m| m.id),
            self.next_material_id,
        )?;

        for task in &self.tasks {
            if !self.has_project(task.project_id) {
                return Err(format!(
                    "task {} references missing project {}",
                    task.id, task.project_id
                ));
            }
        }
        for material in &self.materials {
            if let Some(project_id) = material.project_id {
                if !self.has_project(project_id) {
                    return Err(format!(
                        "material {} references missing project {}",
                        material.id, project_id
                    ));
                }
            }
            if !material.quantity.is_finite() || material.quantity < 0.0 {
                return Err(format!(
                    "material {} has invalid quantity {}",
                    material.id, material.quantity
                ));
            }
        }

        Ok(())
    }
}

// Ids must be positive, strictly increasing in stored order and below the counter.
fn check_ids(
    entity: &str,
    ids: impl Iterator<Item = u32>,
    next_id: u32,
) -> Result<(), String> {
    if next_id == 0 {
        return Err(format!("next {entity} id must be at least 1"));
    }
    let mut previous = 0;
    for id in ids {
        if id <= previous {
            return Err(format!("{entity} id {id} is duplicated or out of order"));
        }
        if id >= next_id {
            return Err(format!(
                "{entity} id {id} is not below the next {entity} id {next_id}"
            ));
        }
        previous = id;
    }
    Ok(())
}
