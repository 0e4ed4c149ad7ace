use super::*;
use tempfile::TempDir;

fn touch(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, relative).unwrap();
    path
}

#[test]
fn test_wildcard_match_segments() {
    assert!(wildcard_match("Dockerfile*", "Dockerfile"));
    assert!(wildcard_match("Dockerfile*", "Dockerfile.arm64"));
    assert!(wildcard_match("App*.tar.gz", "App-1.2.3.tar.gz"));
    assert!(wildcard_match("a?c", "abc"));
    assert!(wildcard_match("*", ""));
    assert!(!wildcard_match("App*.tar.gz", "App-1.2.3.zip"));
    assert!(!wildcard_match("a?c", "ac"));
    assert!(!wildcard_match("bin", "binary"));
}

#[test]
fn test_glob_double_star_finds_nested_directories() {
    let temp = TempDir::new().unwrap();
    let src = temp.path();
    touch(src, "App/bin/Debug/App.dll");
    touch(src, "App/obj/project.assets.json");
    touch(src, "Lib/Nested/bin/Lib.dll");
    touch(src, "Lib/binary/keep.txt");

    let found = glob(src, "**/bin", EntryKind::Directories).unwrap();
    assert_eq!(found, vec![src.join("App/bin"), src.join("Lib/Nested/bin")]);
}

#[test]
fn test_glob_without_double_star_stays_shallow() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "Dockerfile");
    touch(temp.path(), "Dockerfile.alpine");
    touch(temp.path(), "nested/Dockerfile");

    let found = glob(temp.path(), "Dockerfile*", EntryKind::Files).unwrap();
    assert_eq!(
        found,
        vec![
            temp.path().join("Dockerfile"),
            temp.path().join("Dockerfile.alpine")
        ]
    );
}

#[test]
fn test_glob_missing_base_is_empty() {
    let temp = TempDir::new().unwrap();
    let found = glob(&temp.path().join("absent"), "**/*", EntryKind::Files).unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_split_pattern_separates_literal_prefix() {
    let (base, rest) = split_pattern("/work/output/artifacts/App/App*.tar.gz");
    assert_eq!(base, PathBuf::from("/work/output/artifacts/App"));
    assert_eq!(rest, "App*.tar.gz");

    let (base, rest) = split_pattern("/work/output/readme.txt");
    assert_eq!(base, PathBuf::from("/work/output/readme.txt"));
    assert!(rest.is_empty());

    let (base, rest) = split_pattern("**/bin");
    assert_eq!(base, PathBuf::from("."));
    assert_eq!(rest, "**/bin");
}

#[test]
fn test_any_file_matches() {
    let temp = TempDir::new().unwrap();
    touch(temp.path(), "artifacts/App/App-1.0.0.tar.gz");

    let hit = format!("{}/artifacts/App/App*.tar.gz", temp.path().display());
    let miss = format!("{}/artifacts/Other/Other*.tar.gz", temp.path().display());
    let literal = format!("{}/artifacts/App/App-1.0.0.tar.gz", temp.path().display());

    assert!(any_file_matches(&hit).unwrap());
    assert!(!any_file_matches(&miss).unwrap());
    assert!(any_file_matches(&literal).unwrap());
}

#[test]
fn test_any_file_matches_ignores_directories() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("artifacts/App/App.tar.gz")).unwrap();

    let pattern = format!("{}/artifacts/App/App*.tar.gz", temp.path().display());
    assert!(!any_file_matches(&pattern).unwrap());
}

#[test]
fn test_delete_matching_directories_skips_nested_matches() {
    let temp = TempDir::new().unwrap();
    let src = temp.path();
    touch(src, "App/bin/Debug/bin/deep.dll");
    touch(src, "App/obj/cache");
    touch(src, "App/Program.cs");

    let deleted = delete_matching_directories(src, &["**/bin", "**/obj", "output"]).unwrap();

    assert_eq!(deleted, vec![src.join("App/bin"), src.join("App/obj")]);
    assert!(!src.join("App/bin").exists());
    assert!(!src.join("App/obj").exists());
    assert!(src.join("App/Program.cs").exists());
}

#[test]
fn test_delete_directory_missing_is_ok() {
    let temp = TempDir::new().unwrap();
    delete_directory(&temp.path().join("never-created")).unwrap();
}

#[test]
fn test_ensure_clean_directory_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("output");
    touch(temp.path(), "output/publish/App/App.dll");
    touch(temp.path(), "output/stray.log");

    ensure_clean_directory(&output).unwrap();
    assert!(output.is_dir());
    assert!(is_empty_directory(&output).unwrap());

    ensure_clean_directory(&output).unwrap();
    assert!(output.is_dir());
    assert!(is_empty_directory(&output).unwrap());
}

#[test]
fn test_contains_files_looks_past_empty_subdirectories() {
    let temp = TempDir::new().unwrap();
    let publish = temp.path().join("publish");
    fs::create_dir_all(publish.join("runtimes/linux-x64")).unwrap();

    assert!(!contains_files(&publish).unwrap());

    touch(temp.path(), "publish/runtimes/linux-x64/native.so");
    assert!(contains_files(&publish).unwrap());
}

#[test]
fn test_contains_files_on_missing_directory_is_io_error() {
    let temp = TempDir::new().unwrap();

    let err = contains_files(&temp.path().join("missing")).unwrap_err();
    assert!(matches!(err, BuildError::Io { .. }));
}

#[test]
fn test_ensure_clean_directory_creates_missing() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("a/b/output");

    ensure_clean_directory(&output).unwrap();
    assert!(output.is_dir());
}

#[test]
fn test_copy_matching_copies_dockerfiles_only() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("src/App");
    touch(temp.path(), "src/App/Dockerfile");
    touch(temp.path(), "src/App/Dockerfile.debug");
    touch(temp.path(), "src/App/Program.cs");
    let publish = temp.path().join("output/publish/App");

    let copied = copy_matching(&project, "Dockerfile*", &publish).unwrap();

    assert_eq!(copied.len(), 2);
    assert!(publish.join("Dockerfile").is_file());
    assert!(publish.join("Dockerfile.debug").is_file());
    assert!(!publish.join("Program.cs").exists());
}

#[test]
fn test_copy_matching_without_matches_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("src/App");
    fs::create_dir_all(&project).unwrap();
    let publish = temp.path().join("output/publish/App");

    let copied = copy_matching(&project, "Dockerfile*", &publish).unwrap();
    assert!(copied.is_empty());
    assert!(!publish.exists());
}
