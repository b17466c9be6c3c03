use super::*;
use serde_json::json;

fn sample_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("content/cases")
}

fn copy_samples(into: &Path) {
    for path in json_files(&sample_dir()).expect("list samples") {
        let name = path.file_name().expect("file name");
        fs::copy(&path, into.join(name)).expect("copy sample");
    }
}

fn completed(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

#[test]
fn bundled_cases_load_in_play_order() {
    let library = CaseLibrary::load_dir(&sample_dir()).expect("load samples");
    assert!(library.rejected().is_empty(), "{:?}", library.rejected());
    let ids: Vec<&str> = library.cases().iter().map(|c| c.case_id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "case_001_ferret_mustache",
            "case_002_banana_in_the_mailbox",
            "case_003_the_missing_pie_chart"
        ]
    );
    assert!(library.dangling_unlocks().is_empty());
}

#[test]
fn unlock_chain_follows_completed_cases() {
    let library = CaseLibrary::load_dir(&sample_dir()).expect("load samples");

    assert!(library.is_unlocked("case_001_ferret_mustache", &completed(&[])));
    assert!(!library.is_unlocked("case_002_banana_in_the_mailbox", &completed(&[])));
    assert_eq!(
        library
            .prerequisite_of("case_003_the_missing_pie_chart")
            .map(|c| c.case_id.as_str()),
        Some("case_002_banana_in_the_mailbox")
    );

    let done = completed(&["case_001_ferret_mustache"]);
    assert!(library.is_unlocked("case_002_banana_in_the_mailbox", &done));
    assert!(!library.is_unlocked("case_003_the_missing_pie_chart", &done));
    assert_eq!(
        library.first_unlocked(&done).map(|c| c.case_id.as_str()),
        Some("case_001_ferret_mustache")
    );
}

#[test]
fn bad_files_are_rejected_without_stopping_the_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    copy_samples(dir.path());
    fs::write(dir.path().join("broken.json"), "{ not json").expect("write");
    fs::write(
        dir.path().join("empty_case.json"),
        json!({ "version": 1, "caseId": "case_empty" }).to_string(),
    )
    .expect("write");
    fs::write(dir.path().join("notes.txt"), "ignored").expect("write");

    let library = CaseLibrary::load_dir(dir.path()).expect("load");
    assert_eq!(library.cases().len(), 3);
    assert_eq!(library.rejected().len(), 2);

    let broken = &library.rejected()[0];
    assert!(broken.path.ends_with("broken.json"));
    assert!(broken.violations().is_none());

    let empty = &library.rejected()[1];
    let violations = empty.violations().expect("schema violations");
    assert!(violations.has_rule("required"));
}

#[test]
fn duplicate_case_ids_reject_the_later_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    copy_samples(dir.path());
    fs::copy(
        sample_dir().join("case_002_banana_in_the_mailbox.json"),
        dir.path().join("zz_copy.json"),
    )
    .expect("copy");

    let library = CaseLibrary::load_dir(dir.path()).expect("load");
    assert_eq!(library.cases().len(), 3);
    let rejected = &library.rejected()[0];
    assert!(rejected.path.ends_with("zz_copy.json"));
    assert!(rejected.error.to_string().contains("duplicate caseId"));
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = CaseLibrary::load_dir(&dir.path().join("nope")).unwrap_err();
    assert!(err.to_string().contains("read cases dir"));
}

#[test]
fn unknown_unlock_targets_are_reported_not_rejected() {
    let mut case = load_case_file(&sample_dir().join("case_003_the_missing_pie_chart.json"))
        .expect("load sample");
    case.unlock_next_case_ids = vec!["case_999_sequel".to_string()];
    let library = CaseLibrary::from_cases(vec![case]);
    assert_eq!(library.cases().len(), 1);
    assert_eq!(
        library.dangling_unlocks(),
        vec![("case_003_the_missing_pie_chart", "case_999_sequel")]
    );
    assert!(library.require("case_999_sequel").is_err());
}
