use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::models::{self, NewMaterial, NewProject, NewTask, DEFAULT_PROJECT_STATUS, DEFAULT_UNIT};
use crate::report;
use crate::store::{MaterialScope, RecordStore};

/// Track projects, tasks and materials for a craft business
#[derive(Debug, Parser)]
#[command(name = "handwerk", version, about)]
pub struct Cli {
    /// JSON data file (overrides HANDWERK_DATA_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),
    /// Record material requirements and stock
    #[command(subcommand)]
    Material(MaterialCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Create a new project
    Add(ProjectAddArgs),
    /// List projects
    List {
        /// Only show projects with this status
        #[arg(long)]
        status: Option<String>,
    },
    /// Show a project with its tasks and materials
    Detail {
        project_id: u32,
    },
}

#[derive(Debug, Args)]
pub struct ProjectAddArgs {
    /// Project name
    pub name: String,
    /// Customer the work is done for
    pub customer: String,
    /// Site address
    #[arg(long)]
    pub address: Option<String>,
    /// Planned completion date (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub due_date: Option<NaiveDate>,
    /// Status, e.g. offen or erledigt
    #[arg(long, default_value = DEFAULT_PROJECT_STATUS)]
    pub status: String,
    /// Short note about the project
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Add a task to a project
    Add(TaskAddArgs),
}

#[derive(Debug, Args)]
pub struct TaskAddArgs {
    pub project_id: u32,
    /// What needs to be done
    pub description: String,
    /// Due date (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub due_date: Option<NaiveDate>,
    /// Record the task as already completed
    #[arg(long)]
    pub done: bool,
}

#[derive(Debug, Subcommand)]
pub enum MaterialCommand {
    /// Add a material requirement or stock item
    Add(MaterialAddArgs),
    /// List materials
    List {
        /// Only materials for this project
        #[arg(long, conflicts_with = "inventory")]
        project_id: Option<u32>,
        /// Only materials not assigned to a project
        #[arg(long)]
        inventory: bool,
    },
}

#[derive(Debug, Args)]
pub struct MaterialAddArgs {
    /// Material name
    pub name: String,
    /// Amount needed or in stock
    pub quantity: f64,
    /// Unit, e.g. Stk, m, kg, qm
    #[arg(long, default_value = DEFAULT_UNIT)]
    pub unit: String,
    /// Assign the material to a project instead of inventory
    #[arg(long)]
    pub project_id: Option<u32>,
}

fn date_arg(value: &str) -> Result<NaiveDate, String> {
    models::parse_date(value).map_err(|err| err.to_string())
}

/// Execute `command` against `store`, writing user output to `out`
pub fn run(command: Command, store: &mut RecordStore, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Project(ProjectCommand::Add(args)) => {
            let project = store
                .add_project(NewProject {
                    name: args.name,
                    customer: args.customer,
                    address: args.address,
                    due_date: args.due_date,
                    status: args.status,
                    notes: args.notes,
                })
                .context("could not add project")?;
            writeln!(
                out,
                "Project {} created: {} for {}",
                project.id, project.name, project.customer
            )?;
        }
        Command::Project(ProjectCommand::List { status }) => {
            let projects = store.list_projects(status.as_deref());
            write!(out, "{}", report::project_table(&projects))?;
        }
        Command::Project(ProjectCommand::Detail { project_id }) => {
            let detail = store.project_detail(project_id)?;
            write!(out, "{}", report::project_detail(&detail))?;
        }
        Command::Task(TaskCommand::Add(args)) => {
            let task = store
                .add_task(NewTask {
                    project_id: args.project_id,
                    description: args.description,
                    due_date: args.due_date,
                    done: args.done,
                })
                .context("could not add task")?;
            writeln!(
                out,
                "Task {} saved for project {}: {}",
                task.id, task.project_id, task.description
            )?;
        }
        Command::Material(MaterialCommand::Add(args)) => {
            let material = store
                .add_material(NewMaterial {
                    name: args.name,
                    quantity: args.quantity,
                    unit: args.unit,
                    project_id: args.project_id,
                })
                .context("could not add material")?;
            let target = match material.project_id {
                Some(id) => format!("project {id}"),
                None => "inventory".to_string(),
            };
            writeln!(
                out,
                "Material {} added to {target}: {}",
                material.id,
                report::material_line(&material)
            )?;
        }
        Command::Material(MaterialCommand::List { project_id, inventory }) => {
            let scope = match (project_id, inventory) {
                (Some(id), _) => MaterialScope::Project(id),
                (None, true) => MaterialScope::Inventory,
                (None, false) => MaterialScope::All,
            };
            let materials = store.list_materials(scope)?;
            write!(out, "{}", report::material_list(&materials))?;
        }
    }

    Ok(())
}
