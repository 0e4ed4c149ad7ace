use super::*;

#[test]
fn test_fixture_lays_out_projects() -> FixtureResult<()> {
    let fixture = ProjectFixture::with_projects(&["App.ConsoleApp", "App.Worker"])?;

    assert!(fixture.file_exists("build.toml"));
    assert!(fixture.file_exists("src/App.sln"));
    assert!(fixture.file_exists("src/App.ConsoleApp/App.ConsoleApp.csproj"));
    assert!(fixture.file_exists("src/App.Worker/Dockerfile"));

    let manifest = Manifest::load(&fixture.manifest_path())?;
    let names: Vec<&str> = manifest.projects.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["App.ConsoleApp", "App.Worker"]);
    Ok(())
}

#[test]
fn test_fixture_context_points_into_temp_dir() -> FixtureResult<()> {
    let fixture = ProjectFixture::with_projects(&["App"])?;

    let context = fixture.context(Configuration::Debug, "1.0.0")?;

    assert_eq!(context.root(), fixture.path());
    assert_eq!(context.solution(), fixture.path().join("src/App.sln"));
    assert_eq!(context.projects()[0].directory(), fixture.path().join("src/App"));
    Ok(())
}

#[test]
fn test_fixtures_are_isolated() -> FixtureResult<()> {
    let first = ProjectFixture::new()?;
    let second = ProjectFixture::new()?;

    first.write_file("notes.txt", "first")?;

    assert_ne!(first.path(), second.path());
    assert!(!second.file_exists("notes.txt"));
    assert_eq!(first.read_file("notes.txt")?, "first");
    Ok(())
}

#[test]
fn test_fixture_directory_removed_on_drop() -> FixtureResult<()> {
    let fixture = ProjectFixture::new()?;
    let dir = fixture.create_dir("output")?;
    let root = fixture.path().to_path_buf();
    assert!(dir.is_dir());

    drop(fixture);
    assert!(!root.exists());
    Ok(())
}
