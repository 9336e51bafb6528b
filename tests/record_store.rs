use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use handwerk::models::{Document, NewMaterial, NewProject, NewTask};
use handwerk::{MaterialScope, RecordStore, StoreError};
use tempfile::TempDir;

fn data_path(dir: &TempDir) -> PathBuf {
    dir.path().join("handwerk_data.json")
}

fn open(dir: &TempDir) -> RecordStore {
    RecordStore::open(data_path(dir)).expect("store should open")
}

#[test]
fn missing_file_yields_empty_document() {
    let dir = TempDir::new().expect("temp dir");
    let store = open(&dir);

    assert_eq!(store.document(), &Document::default());
    assert_eq!(store.document().next_project_id, 1);
    assert!(!data_path(&dir).exists(), "reads must not create the file");
}

#[test]
fn added_project_is_listed_with_fresh_id() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open(&dir);

    let project = store
        .add_project(NewProject::new("Badsanierung", "Familie Schulz"))
        .expect("project should be added");

    let listed = store.list_projects(None);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], &project);
    assert_eq!(project.id, 1);
    assert_eq!(project.status, "offen");
}

#[test]
fn project_ids_keep_increasing_across_reloads() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open(&dir);
    let first = store
        .add_project(NewProject::new("Dachrinne", "Herr Wagner"))
        .expect("first project");
    let second = store
        .add_project(NewProject::new("Carport", "Frau Becker"))
        .expect("second project");
    assert_eq!(second.id, first.id + 1);

    store.reload().expect("reload");
    let third = store
        .add_project(NewProject::new("Zaun", "Familie Koch"))
        .expect("third project");
    assert_eq!(third.id, second.id + 1);

    let mut reopened = open(&dir);
    assert_eq!(reopened.document().next_project_id, third.id + 1);
    let fourth = reopened
        .add_project(NewProject::new("Gartenhaus", "Herr Wagner"))
        .expect("fourth project");
    assert_eq!(fourth.id, third.id + 1);
}

#[test]
fn task_for_missing_project_leaves_document_unchanged() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open(&dir);
    store
        .add_project(NewProject::new("Badsanierung", "Familie Schulz"))
        .expect("project");
    let before = store.document().clone();
    let on_disk_before = fs::read_to_string(data_path(&dir)).expect("data file");

    let err = store
        .add_task(NewTask::new(42, "Fliesen legen"))
        .expect_err("unknown project must fail");

    assert!(matches!(err, StoreError::NotFound { entity: "project", id: 42 }));
    assert_eq!(store.document(), &before);
    assert_eq!(
        fs::read_to_string(data_path(&dir)).expect("data file"),
        on_disk_before
    );
}

#[test]
fn project_detail_returns_attached_tasks() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open(&dir);
    store
        .add_project(NewProject::new("Badsanierung", "Familie Schulz"))
        .expect("project");
    store
        .add_project(NewProject::new("Küche", "Herr Wagner"))
        .expect("other project");
    store
        .add_task(NewTask::new(2, "Spüle montieren"))
        .expect("task for other project");
    let task = store
        .add_task(NewTask::new(1, "Elektrik prüfen"))
        .expect("task");

    let detail = store.project_detail(1).expect("detail");
    assert_eq!(detail.project.name, "Badsanierung");
    assert_eq!(detail.tasks, vec![task]);
    assert!(!detail.tasks[0].done);
}

#[test]
fn project_detail_for_unknown_id_fails() {
    let dir = TempDir::new().expect("temp dir");
    let store = open(&dir);

    let err = store.project_detail(1).expect_err("no projects yet");
    assert!(matches!(err, StoreError::NotFound { id: 1, .. }));
}

#[test]
fn save_then_load_reproduces_document() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open(&dir);
    let mut new_project = NewProject::new("Badsanierung", "Familie Schulz");
    new_project.address = Some("Lindenweg 4".to_string());
    new_project.due_date = NaiveDate::from_ymd_opt(2024, 6, 30);
    new_project.notes = Some("Schlüssel beim Nachbarn".to_string());
    store.add_project(new_project).expect("project");

    let mut new_task = NewTask::new(1, "Elektrik prüfen");
    new_task.due_date = NaiveDate::from_ymd_opt(2024, 5, 2);
    new_task.done = true;
    store.add_task(new_task).expect("task");

    let mut tiles = NewMaterial::new("Fliesen", 12.5);
    tiles.unit = "qm".to_string();
    tiles.project_id = Some(1);
    store.add_material(tiles).expect("material");
    store
        .add_material(NewMaterial::new("Dübel", 200.0))
        .expect("inventory material");
    store.save().expect("explicit save");

    let reopened = open(&dir);
    assert_eq!(reopened.document(), store.document());
}

#[test]
fn material_without_project_goes_to_inventory() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open(&dir);
    store
        .add_project(NewProject::new("Badsanierung", "Familie Schulz"))
        .expect("project");

    let stock = store
        .add_material(NewMaterial::new("Silikon", 6.0))
        .expect("inventory material");
    assert_eq!(stock.project_id, None);
    assert_eq!(stock.unit, "Stk");

    let mut assigned = NewMaterial::new("Fliesen", 12.5);
    assigned.project_id = Some(1);
    store.add_material(assigned).expect("project material");

    let inventory = store
        .list_materials(MaterialScope::Inventory)
        .expect("inventory listing");
    assert_eq!(inventory, vec![&stock]);
    assert_eq!(store.list_materials(MaterialScope::All).expect("all").len(), 2);
    assert_eq!(
        store
            .list_materials(MaterialScope::Project(1))
            .expect("project listing")
            .len(),
        1
    );

    let raw = fs::read_to_string(data_path(&dir)).expect("data file");
    let json: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert!(json["materials"][0]["project_id"].is_null());
}

#[test]
fn material_for_missing_project_fails() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open(&dir);

    let mut material = NewMaterial::new("Fliesen", 12.5);
    material.project_id = Some(3);
    let err = store.add_material(material).expect_err("unknown project");
    assert!(matches!(err, StoreError::NotFound { id: 3, .. }));
    assert!(store.document().materials.is_empty());
}

#[test]
fn invalid_input_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open(&dir);

    let err = store
        .add_project(NewProject::new("  ", "Familie Schulz"))
        .expect_err("blank name");
    assert!(matches!(err, StoreError::Validation(_)));

    let err = store
        .add_material(NewMaterial::new("Fliesen", -1.0))
        .expect_err("negative quantity");
    assert!(matches!(err, StoreError::Validation(_)));

    let err = store
        .add_material(NewMaterial::new("Fliesen", f64::NAN))
        .expect_err("NaN quantity");
    assert!(matches!(err, StoreError::Validation(_)));

    assert_eq!(store.document(), &Document::default());
}

#[test]
fn list_projects_filters_by_status() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open(&dir);
    store
        .add_project(NewProject::new("Badsanierung", "Familie Schulz"))
        .expect("open project");
    let mut finished = NewProject::new("Carport", "Frau Becker");
    finished.status = "erledigt".to_string();
    store.add_project(finished).expect("finished project");

    let done = store.list_projects(Some("erledigt"));
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].name, "Carport");
    assert_eq!(store.list_projects(None).len(), 2);
}

#[test]
fn invalid_json_is_data_corruption() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(data_path(&dir), "{ not json").expect("write");

    let err = RecordStore::open(data_path(&dir)).err().expect("must fail");
    assert!(matches!(err, StoreError::DataCorruption { .. }));
}

#[test]
fn wrong_shape_is_data_corruption() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(data_path(&dir), r#"{"projects": [], "inventory": []}"#).expect("write");

    let err = RecordStore::open(data_path(&dir)).err().expect("must fail");
    assert!(matches!(err, StoreError::DataCorruption { .. }));
}

#[test]
fn dangling_reference_is_data_corruption() {
    let dir = TempDir::new().expect("temp dir");
    let raw = r#"{
        "next_project_id": 1,
        "next_task_id": 2,
        "next_material_id": 1,
        "projects": [],
        "tasks": [{"id": 1, "project_id": 9, "description": "Putz", "due_date": null, "done": false}],
        "materials": []
    }"#;
    fs::write(data_path(&dir), raw).expect("write");

    let err = RecordStore::open(data_path(&dir)).err().expect("must fail");
    match err {
        StoreError::DataCorruption { reason, .. } => assert!(reason.contains("missing project 9")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn failed_save_rolls_back_mutation() {
    let dir = TempDir::new().expect("temp dir");
    let missing_dir = dir.path().join("does-not-exist").join("data.json");
    let mut store = RecordStore::open(&missing_dir).expect("missing file opens empty");

    let err = store
        .add_project(NewProject::new("Badsanierung", "Familie Schulz"))
        .expect_err("parent directory is missing");
    assert!(matches!(err, StoreError::Io { .. }));
    assert_eq!(store.document(), &Document::default());
}

#[test]
fn full_precision_quantity_survives_reload() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open(&dir);
    let material = store
        .add_material(NewMaterial::new("Kabel", 904.8900886889999))
        .expect("material");

    let reopened = open(&dir);
    assert_eq!(reopened.document().materials[0].quantity, material.quantity);
    assert_eq!(reopened.document(), store.document());
}

#[test]
fn exhausted_id_counter_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let raw = r#"{
        "next_project_id": 4294967295,
        "next_task_id": 1,
        "next_material_id": 1,
        "projects": [],
        "tasks": [],
        "materials": []
    }"#;
    fs::write(data_path(&dir), raw).expect("write");
    let mut store = open(&dir);
    let before = store.document().clone();

    let err = store
        .add_project(NewProject::new("Badsanierung", "Familie Schulz"))
        .expect_err("no ids left");
    assert!(matches!(err, StoreError::IdsExhausted { entity: "project" }));
    assert_eq!(store.document(), &before);
    assert_eq!(fs::read_to_string(data_path(&dir)).expect("data file"), raw);
}

#[test]
fn unknown_top_level_key_is_data_corruption() {
    let dir = TempDir::new().expect("temp dir");
    let raw = r#"{
        "next_project_id": 1,
        "next_task_id": 1,
        "next_material_id": 1,
        "projects": [],
        "tasks": [],
        "materials": [],
        "inventory": [{"name": "Dübel", "quantity": 50, "unit": "Stk"}]
    }"#;
    fs::write(data_path(&dir), raw).expect("write");

    let err = RecordStore::open(data_path(&dir)).err().expect("must fail");
    match err {
        StoreError::DataCorruption { reason, .. } => assert!(reason.contains("inventory")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn unknown_record_key_is_data_corruption() {
    let dir = TempDir::new().expect("temp dir");
    let raw = r#"{
        "next_project_id": 2,
        "next_task_id": 1,
        "next_material_id": 1,
        "projects": [{
            "id": 1,
            "name": "Badsanierung",
            "customer": "Familie Schulz",
            "address": null,
            "due_date": null,
            "tasks": [{"title": "Elektrik prüfen"}]
        }],
        "tasks": [],
        "materials": []
    }"#;
    fs::write(data_path(&dir), raw).expect("write");

    let err = RecordStore::open(data_path(&dir)).err().expect("must fail");
    assert!(matches!(err, StoreError::DataCorruption { .. }));
    assert_eq!(fs::read_to_string(data_path(&dir)).expect("data file"), raw);
}

#[test]
fn invalid_utf8_is_data_corruption() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(data_path(&dir), [0xff, 0xfe, 0x7b, 0x7d]).expect("write");

    let err = RecordStore::open(data_path(&dir)).err().expect("must fail");
    assert!(matches!(err, StoreError::DataCorruption { .. }));
}
