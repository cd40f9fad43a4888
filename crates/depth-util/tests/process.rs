use depth_util::process::CommandBuilder;

#[test]
fn test_builder_simple_command() {
    let output = CommandBuilder::new("echo").arg("hello").exec().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "hello");
}

#[test]
fn test_builder_conditional_args() {
    let output = CommandBuilder::new("echo")
        .arg("list")
        .arg_if(true, "-find")
        .arg_if(false, "-deps")
        .arg("strings")
        .exec()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "list -find strings");
}

#[test]
fn test_builder_display() {
    let cmd = CommandBuilder::new("go").args(["list", "-e", "-json", "strings"]);
    assert_eq!(cmd.to_string(), "go list -e -json strings");
}

#[cfg(unix)]
#[test]
fn test_builder_with_cwd() {
    let tmp = tempfile::TempDir::new().unwrap();
    let marker = tmp.path().join("depth_cwd_test.marker");
    std::fs::write(&marker, "ok").unwrap();

    let output = CommandBuilder::new("ls")
        .arg("depth_cwd_test.marker")
        .cwd(tmp.path())
        .exec()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.trim().contains("depth_cwd_test.marker"));
}

#[cfg(unix)]
#[test]
fn test_builder_empty_cwd_is_ignored() {
    let output = CommandBuilder::new("echo").arg("ok").cwd("").exec().unwrap();
    assert!(output.status.success());
}

#[cfg(unix)]
#[test]
fn test_exec_stdout_reports_failure() {
    let err = CommandBuilder::new("sh")
        .args(["-c", "echo nope >&2; exit 3"])
        .exec_stdout()
        .unwrap_err();
    assert!(err.to_string().contains("nope"), "got: {err}");
}

#[test]
fn test_builder_nonexistent_program() {
    let result = CommandBuilder::new("nonexistent_program_xyz_123").exec();
    assert!(result.is_err());
}
