use report_map::{MappingRepository, StoredMapping};
use report_model::Mapping;

fn sample_mapping() -> Mapping {
    let mut mapping = Mapping::new();
    mapping.insert("revenue", "Revenue");
    mapping.insert("notes", "Comments");
    mapping
}

#[test]
fn repository_save_and_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = MappingRepository::new(dir.path()).expect("create repo");

    let path = repo.save("tpl-1", &sample_mapping()).expect("save mapping");
    assert!(path.exists());
    assert!(path.to_string_lossy().ends_with("tpl-1.json"));

    let loaded = repo
        .load("tpl-1")
        .expect("load mapping")
        .expect("mapping should exist");
    assert_eq!(loaded, sample_mapping());
}

#[test]
fn repository_load_nonexistent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = MappingRepository::new(dir.path()).expect("create repo");
    assert!(repo.load("missing").expect("load attempt").is_none());
    assert!(!repo.exists("missing"));
}

#[test]
fn repository_creates_nested_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("a").join("b");
    let repo = MappingRepository::new(&nested).expect("create repo");
    assert!(nested.is_dir());
    assert_eq!(repo.base_dir(), nested.as_path());
}

#[test]
fn repository_stored_metadata_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = MappingRepository::new(dir.path()).expect("create repo");

    let stored = StoredMapping::new("tpl-2", sample_mapping()).with_description("Q3 import");
    repo.save_stored(&stored).expect("save");

    let loaded = repo.load_stored("tpl-2").expect("load").expect("exists");
    assert_eq!(loaded.description.as_deref(), Some("Q3 import"));
    assert_eq!(loaded.version, "1.0");
    assert!(loaded.saved_at.is_some());
}

#[test]
fn repository_list_skips_foreign_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = MappingRepository::new(dir.path()).expect("create repo");

    repo.save("b-template", &sample_mapping()).expect("save b");
    repo.save("a-template", &Mapping::new()).expect("save a");
    std::fs::write(dir.path().join("notes.txt"), "ignore me").expect("write txt");
    std::fs::write(dir.path().join("broken.json"), "{").expect("write json");

    let listed = repo.list().expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].template_id, "a-template");
    assert_eq!(listed[0].mapping_count, 0);
    assert_eq!(listed[1].template_id, "b-template");
    assert_eq!(listed[1].mapping_count, 2);
}

#[test]
fn repository_delete() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = MappingRepository::new(dir.path()).expect("create repo");

    repo.save("tpl-1", &sample_mapping()).expect("save");
    assert!(repo.exists("tpl-1"));
    assert!(repo.delete("tpl-1").expect("delete"));
    assert!(!repo.exists("tpl-1"));
    assert!(!repo.delete("tpl-1").expect("second delete"));
}

#[test]
fn colliding_ids_do_not_share_a_mapping() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = MappingRepository::new(dir.path()).expect("create repo");

    repo.save("Q3 report", &sample_mapping()).expect("save");

    assert!(repo.load("Q3_report").expect("load").is_none());
    assert!(!repo.exists("Q3_report"));
    assert!(!repo.delete("Q3_report").expect("delete"));

    let err = repo
        .save("Q3_report", &Mapping::new())
        .expect_err("save over another template's file");
    assert!(err.to_string().contains("Q3 report"));

    let kept = repo.load("Q3 report").expect("load").expect("still saved");
    assert_eq!(kept, sample_mapping());
}
