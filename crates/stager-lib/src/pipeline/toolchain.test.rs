use super::*;
use crate::primitives::BuildError;
use crate::process::MockProcessProvider;

fn version() -> VersionInfo {
    VersionInfo::parse("1.2.3").unwrap()
}

#[test]
fn test_restore_arguments() {
    let process = MockProcessProvider::new();
    let dotnet = DotNet::new("dotnet", Path::new("/repo"), &process);

    dotnet.restore(Path::new("/repo/src/App.sln")).unwrap();

    assert!(process.verify_call("dotnet", &["restore", "/repo/src/App.sln"], Path::new("/repo")));
}

#[test]
fn test_build_arguments() {
    let process = MockProcessProvider::new();
    let dotnet = DotNet::new("dotnet", Path::new("/repo"), &process);

    dotnet
        .build(Path::new("App.sln"), Configuration::Release, &version())
        .unwrap();

    assert!(process.verify_call(
        "dotnet",
        &[
            "build",
            "App.sln",
            "--configuration",
            "Release",
            "--no-restore",
            "-p:AssemblyVersion=1.2.3.0",
            "-p:FileVersion=1.2.3.0",
            "-p:InformationalVersion=1.2.3",
        ],
        Path::new("/repo"),
    ));
}

#[test]
fn test_publish_arguments() {
    let process = MockProcessProvider::new();
    let dotnet = DotNet::new("dotnet", Path::new("/repo"), &process);

    dotnet
        .publish(
            Path::new("src/App/App.csproj"),
            Path::new("output/publish/App"),
            Configuration::Debug,
            &version(),
        )
        .unwrap();

    let calls = process.get_calls_for_subcommand("publish");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].args[1], "src/App/App.csproj");
    assert_eq!(calls[0].flag_value("--output"), Some("output/publish/App"));
    assert_eq!(calls[0].flag_value("--configuration"), Some("Debug"));
    assert!(calls[0].args.contains(&"--no-restore".to_string()));
}

#[test]
fn test_custom_program_is_used() {
    let process = MockProcessProvider::new();
    let dotnet = DotNet::new("/opt/dotnet/dotnet", Path::new("."), &process);

    dotnet.restore(Path::new("App.sln")).unwrap();

    assert_eq!(process.get_calls()[0].command, "/opt/dotnet/dotnet");
}

#[test]
fn test_failure_names_the_subcommand() {
    let process = MockProcessProvider::new().fails_on("build", "error CS0103");
    let dotnet = DotNet::new("dotnet", Path::new("."), &process);

    let err = dotnet
        .build(Path::new("App.sln"), Configuration::Debug, &version())
        .unwrap_err();

    match err {
        BuildError::ExternalCommand { command, code, stderr } => {
            assert_eq!(command, "dotnet build");
            assert_eq!(code, Some(1));
            assert_eq!(stderr, "error CS0103");
        }
        other => panic!("Expected ExternalCommand, got {:?}", other),
    }
}

#[test]
fn test_version_properties() {
    let info = VersionInfo::parse("4.0.0-rc.1").unwrap();
    assert_eq!(
        version_properties(&info),
        vec![
            "-p:AssemblyVersion=4.0.0.0",
            "-p:FileVersion=4.0.0.0",
            "-p:InformationalVersion=4.0.0-rc.1",
        ]
    );
}
