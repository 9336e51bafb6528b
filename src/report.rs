use std::fmt::Write;

use crate::models::{Material, Project, DATE_FORMAT};
use crate::store::ProjectDetail;

const NAME_WIDTH: usize = 25;
const CUSTOMER_WIDTH: usize = 18;

/// Render the project overview table
pub fn project_table(projects: &[&Project]) -> String {
    if projects.is_empty() {
        return "No projects found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3} | {:<NAME_WIDTH$} | {:<CUSTOMER_WIDTH$} | {:<7} | Due",
        "ID", "Project", "Customer", "Status"
    );
    let _ = writeln!(out, "{}", "-".repeat(76));
    for project in projects {
        let _ = writeln!(
            out,
            "{:>3} | {:<NAME_WIDTH$} | {:<CUSTOMER_WIDTH$} | {:<7} | {}",
            project.id,
            truncate(&project.name, NAME_WIDTH),
            truncate(&project.customer, CUSTOMER_WIDTH),
            project.status,
            format_date(project.due_date),
        );
    }
    out
}

/// Render a single project with its tasks and materials
pub fn project_detail(detail: &ProjectDetail) -> String {
    let project = &detail.project;
    let mut out = String::new();

    let _ = writeln!(out, "Project {}: {}", project.id, project.name);
    let _ = writeln!(out, "Customer: {}", project.customer);
    if let Some(address) = &project.address {
        let _ = writeln!(out, "Address: {address}");
    }
    if project.due_date.is_some() {
        let _ = writeln!(out, "Due: {}", format_date(project.due_date));
    }
    let _ = writeln!(out, "Status: {}", project.status);
    if let Some(notes) = &project.notes {
        let _ = writeln!(out, "Notes: {notes}");
    }

    if detail.tasks.is_empty() {
        let _ = writeln!(out, "\nNo tasks recorded.");
    } else {
        let _ = writeln!(out, "\nTasks:");
        for task in &detail.tasks {
            let mark = if task.done { 'x' } else { ' ' };
            let _ = writeln!(
                out,
                " {:>3}. [{mark}] {} (due {})",
                task.id,
                task.description,
                format_date(task.due_date)
            );
        }
    }

    if detail.materials.is_empty() {
        let _ = writeln!(out, "\nNo materials recorded.");
    } else {
        let _ = writeln!(out, "\nMaterials:");
        for material in &detail.materials {
            let _ = writeln!(out, " - {}", material_line(material));
        }
    }

    out
}

/// Render a material listing
pub fn material_list(materials: &[&Material]) -> String {
    if materials.is_empty() {
        return "No materials found.\n".to_string();
    }

    let mut out = String::new();
    for material in materials {
        let location = match material.project_id {
            Some(id) => format!("project {id}"),
            None => "inventory".to_string(),
        };
        let _ = writeln!(
            out,
            "{:>3} | {} [{location}]",
            material.id,
            material_line(material)
        );
    }
    out
}

pub fn material_line(material: &Material) -> String {
    format!("{} ({} {})", material.name, material.quantity, material.unit)
}

fn format_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

// Cuts on char boundaries; names are often German with umlauts.
fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
