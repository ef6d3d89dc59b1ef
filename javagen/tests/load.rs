//! Batch-loading behavior: one bad file never takes its siblings down.

mod common;

use javagen::loader;

#[test]
fn load_class_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Foo.class");
    std::fs::write(&path, common::minimal_class()).unwrap();

    let class = loader::load_class(&path).unwrap();
    assert_eq!(class.detail.name, "Foo");
}

#[test]
fn directory_load_is_partial_failure() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("sub");
    std::fs::create_dir_all(&nested).unwrap();

    std::fs::write(dir.path().join("Good.class"), common::minimal_class()).unwrap();
    std::fs::write(nested.join("Bad.class"), b"not a class file").unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

    let mut results = loader::load_directory(dir.path());
    results.sort_by(|a, b| a.0.cmp(&b.0));

    assert_eq!(results.len(), 2);
    let good = results
        .iter()
        .find(|(path, _)| path.ends_with("Good.class"))
        .unwrap();
    let bad = results
        .iter()
        .find(|(path, _)| path.ends_with("Bad.class"))
        .unwrap();

    assert!(good.1.is_ok());
    assert!(bad.1.is_err());
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = loader::load_class(&dir.path().join("Nope.class")).unwrap_err();
    match err {
        javagen::Error::Io(_) => {}
        other => panic!("expected an I/O error, got {:?}", other),
    }
}
