use std::fs;
use std::path::Path;

use v8forge_build::{HostEnvironment, HostOs, RecordingRunner};
use v8forge_cli::cli::{AndroidArch, BuildTypeArg, DesktopArch};
use v8forge_cli::{dispatch, CliError, Command, Context};
use v8forge_core::DeployError;

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().expect("parent")).expect("create parent");
    fs::write(path, b"payload").expect("write file");
}

fn context(root: &Path, home: &Path, runner: RecordingRunner) -> Context<RecordingRunner> {
    let mut host = HostEnvironment::isolated(HostOs::Unix, home, home);
    host.deployment_token = Some("token".to_string());
    Context::new(root.to_path_buf(), host, Box::new(runner), true).expect("context")
}

#[test]
fn deploy_linux_plans_before_touching_the_repository() {
    let dir = tempfile::tempdir().expect("temp dir");
    let home = tempfile::tempdir().expect("home");
    let lib_dir = dir.path().join("build").join("x64").join("release");
    touch(&lib_dir.join("libv8_base.a"));
    touch(&dir.path().join("third_party").join("v8").join("include").join("v8.h"));
    let ctx = context(dir.path(), home.path(), RecordingRunner::new().with_output("abc123"));

    let error = dispatch(
        &ctx,
        Command::DeployLinux {
            arch: DesktopArch::X64,
            build_type: BuildTypeArg::Release,
            branch: None,
        },
    )
    .expect_err("shared library missing");

    assert!(matches!(
        error,
        CliError::Deploy(DeployError::MissingRequiredArtifact(_))
    ));
    assert_eq!(error.exit_code(), 1);
    assert_eq!(ctx.runner().command_lines(), vec!["git rev-parse --verify HEAD"]);
}

#[test]
fn deploy_linux_dry_run_issues_the_full_git_sequence() {
    let dir = tempfile::tempdir().expect("temp dir");
    let home = tempfile::tempdir().expect("home");
    let lib_dir = dir.path().join("build").join("x64").join("release");
    touch(&lib_dir.join("libv8_base.a"));
    touch(&lib_dir.join("lib.target").join("libv8.so"));
    touch(&dir.path().join("third_party").join("v8").join("include").join("v8.h"));
    let ctx = context(dir.path(), home.path(), RecordingRunner::new().with_output("abc123"));

    dispatch(
        &ctx,
        Command::DeployLinux {
            arch: DesktopArch::X64,
            build_type: BuildTypeArg::Release,
            branch: Some("master".to_string()),
        },
    )
    .expect("deploy");

    let lines = ctx.runner().command_lines();
    assert_eq!(lines.first().map(String::as_str), Some("git rev-parse --verify HEAD"));
    assert!(lines.contains(&"git clone -b master https://github.com/xxxz/v8-binaries.git".to_string()));
    assert!(lines.contains(&"git commit -m Build result for git:abc123".to_string()));
    assert_eq!(lines.last().map(String::as_str), Some("git push origin master"));
}

#[test]
fn build_android_flattens_its_args_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let home = tempfile::tempdir().expect("home");
    fs::write(
        dir.path().join("args-android-ia32-release"),
        "target_os = \"android\"\ntarget_cpu = \"x86\"\n",
    )
    .expect("args");
    let ctx = context(dir.path(), home.path(), RecordingRunner::new());

    dispatch(&ctx, Command::BuildAndroid { arch: AndroidArch::Ia32 }).expect("build");

    let invocations = ctx.runner().invocations();
    assert_eq!(invocations.len(), 2);
    assert_eq!(
        invocations[0].args.last().map(String::as_str),
        Some("--args=target_os=\"android\" target_cpu=\"x86\"")
    );
    assert!(invocations[1]
        .command_line()
        .ends_with("android_ia32.release v8_monolith"));
}

#[test]
fn install_git_lfs_dry_run_runs_the_install_script() {
    let dir = tempfile::tempdir().expect("temp dir");
    let home = tempfile::tempdir().expect("home");
    let ctx = context(dir.path(), home.path(), RecordingRunner::new());

    dispatch(&ctx, Command::InstallGitLfs).expect("install");

    let invocations = ctx.runner().invocations();
    assert_eq!(invocations.len(), 1);
    let bin = home.path().join("bin");
    assert_eq!(invocations[0].program, bin.join("install.sh").display().to_string());
    assert_eq!(
        invocations[0].env_value("PREFIX"),
        Some(bin.display().to_string().as_str())
    );
    assert!(!bin.exists());
}

#[test]
fn tests_android_has_nothing_to_run() {
    let dir = tempfile::tempdir().expect("temp dir");
    let home = tempfile::tempdir().expect("home");
    let ctx = context(dir.path(), home.path(), RecordingRunner::new());

    dispatch(&ctx, Command::TestsAndroid { arch: AndroidArch::Arm }).expect("tests");

    assert!(ctx.runner().invocations().is_empty());
}
