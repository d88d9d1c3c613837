use naming_dict::{Dictionary, RawLayer};
use naming_review::{Grammar, check_file};

fn grammar() -> Grammar {
    let layer: RawLayer = serde_json::from_str(
        r#"{
            "item": {"n": true},
            "user": {"n": true},
            "count": {"n": true, "v": true},
            "get": {"v": true},
            "selected": {"a": true}
        }"#,
    )
    .unwrap();
    Grammar::with_dictionary(Dictionary::from_layers([layer]))
}

fn write_request(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("request.json");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn prints_one_line_per_finding_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_request(
        &dir,
        r#"{"identifiers": [
            {"name": "item", "role": "variable", "type": "dynamic-array",
             "position": {"file": "main.go", "line": 7, "column": 2}},
            {"name": "count", "role": "variable", "type": "other"},
            {"name": "Users", "role": "type",
             "position": {"file": "user.go", "line": 3, "column": 6}},
            {"name": "selected", "role": "variable", "type": "bool",
             "position": {"line": 9, "column": 1}}
        ]}"#,
    );

    let report = check_file(&grammar(), &path).unwrap();
    assert_eq!(report.reviewed, 4);
    assert_eq!(
        report.lines(),
        vec![
            "main.go:7:2: item: final noun in an array/slice name must be plural (or list/array/slice)",
            "user.go:3:6: Users: final noun in a non-collection name must be singular",
            "9:1: selected: boolean name should contain/start with a verb (ex. selected->isSelected, updatable->canUpdate)",
        ]
    );
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn clean_file_passes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_request(
        &dir,
        r#"{"identifiers": [
            {"name": "getName", "role": "function",
             "params": [{"name": "user", "role": "parameter", "type": "other"}]},
            {"name": "_", "role": "variable", "type": "bool"}
        ]}"#,
    );

    let report = check_file(&grammar(), &path).unwrap();
    assert_eq!(report.reviewed, 2);
    assert!(report.lines().is_empty());
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn malformed_json_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_request(&dir, r#"{"identifiers": ["#);
    let err = check_file(&grammar(), &path).unwrap_err();
    assert!(format!("{err:#}").contains("parse"), "{err:#}");
}

#[test]
fn invalid_identifiers_and_missing_files_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_request(&dir, r#"{"identifiers": [{"name": "x", "role": "macro"}]}"#);
    let err = check_file(&grammar(), &path).unwrap_err();
    assert!(format!("{err:#}").contains("unknown role 'macro'"), "{err:#}");

    let err = check_file(&grammar(), dir.path().join("absent.json")).unwrap_err();
    assert!(format!("{err:#}").contains("read"), "{err:#}");
}
