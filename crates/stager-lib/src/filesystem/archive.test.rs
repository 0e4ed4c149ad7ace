use super::*;
use flate2::read::GzDecoder;
use std::path::PathBuf;
use tar::Archive;
use tempfile::TempDir;

fn entry_names(archive_path: &Path) -> Vec<String> {
    let file = File::open(archive_path).unwrap();
    let mut archive = Archive::new(GzDecoder::new(file));
    let mut names: Vec<String> = archive
        .entries()
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            entry.path().unwrap().to_string_lossy().trim_end_matches('/').to_string()
        })
        .collect();
    names.sort();
    names
}

#[test]
fn test_archive_nests_contents_under_root_entry() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("publish/App");
    fs::create_dir_all(input.join("runtimes")).unwrap();
    fs::write(input.join("App.dll"), b"binary").unwrap();
    fs::write(input.join("runtimes/native.so"), b"native").unwrap();
    let archive_path = temp.path().join("artifacts/App/App-1.2.3.tar.gz");

    let size = create_tar_gz(&input, &archive_path, "App-1.2.3").unwrap();

    assert!(size > 0);
    assert!(archive_path.is_file());
    let names = entry_names(&archive_path);
    assert!(names.contains(&"App-1.2.3/App.dll".to_string()));
    assert!(names.contains(&"App-1.2.3/runtimes/native.so".to_string()));
    assert!(names.iter().all(|n| n.starts_with("App-1.2.3")));
}

#[test]
fn test_archive_missing_input_fails() {
    let temp = TempDir::new().unwrap();
    let archive_path = temp.path().join("out.tar.gz");

    let err = create_tar_gz(&temp.path().join("missing"), &archive_path, "root").unwrap_err();
    match err {
        BuildError::Io { path, source } => {
            assert_eq!(path, temp.path().join("missing"));
            assert_eq!(source.kind(), ErrorKind::NotFound);
        }
        other => panic!("Expected Io error, got {:?}", other),
    }
    assert!(!archive_path.exists());
}

#[test]
fn test_archive_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let input: PathBuf = temp.path().join("publish");
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("a.txt"), b"a").unwrap();
    let archive_path = temp.path().join("a.tar.gz");
    fs::write(&archive_path, b"stale").unwrap();

    create_tar_gz(&input, &archive_path, "pkg").unwrap();

    assert!(entry_names(&archive_path).contains(&"pkg/a.txt".to_string()));
}
