use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;

fn test_dir() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let test_dir = dir.path().join("test_dir");
    fs::create_dir(&test_dir).unwrap();
    (dir, test_dir)
}

#[test]
fn passing_run_is_silent() {
    let (_dir, test_dir) = test_dir();
    let path = test_dir.join("sample.txt");

    let mut cmd = cargo_bin_cmd!("scanprobe");
    cmd.env_remove("RUST_LOG")
        .arg(&path)
        .assert()
        .success()
        .stdout("")
        .stderr("");

    assert!(!path.exists());
}

#[test]
fn existing_file_exits_with_checkpoint_status() {
    let (_dir, test_dir) = test_dir();
    let path = test_dir.join("sample.txt");
    fs::write(&path, "already here").unwrap();

    let mut cmd = cargo_bin_cmd!("scanprobe");
    let output = cmd
        .env_remove("RUST_LOG")
        .arg(&path)
        .assert()
        .code(3)
        .get_output()
        .stderr
        .clone();

    let rendered = String::from_utf8_lossy(&output);
    assert!(rendered.contains("assert-absent"), "stderr: {rendered}");
    assert!(
        rendered.contains("expected not-found, observed found"),
        "stderr: {rendered}"
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), "already here");
}

#[test]
fn missing_parent_exits_with_os_status() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("sample.txt");

    let mut cmd = cargo_bin_cmd!("scanprobe");
    let output = cmd
        .env_remove("RUST_LOG")
        .arg(&path)
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();

    let rendered = String::from_utf8_lossy(&output);
    assert!(rendered.starts_with("scanprobe: parent directory"), "stderr: {rendered}");
    assert!(rendered.contains("not found"), "stderr: {rendered}");
}

#[cfg(unix)]
#[test]
fn os_failure_prints_cause_chain() {
    use std::os::unix::fs::PermissionsExt;

    let (_dir, test_dir) = test_dir();
    let path = test_dir.join("sample.txt");
    fs::set_permissions(&test_dir, fs::Permissions::from_mode(0o555)).unwrap();

    // Privileged users bypass the mode bits; nothing to check then.
    if fs::File::create(test_dir.join("write-check")).is_ok() {
        fs::remove_file(test_dir.join("write-check")).unwrap();
        fs::set_permissions(&test_dir, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let mut cmd = cargo_bin_cmd!("scanprobe");
    let output = cmd
        .env_remove("RUST_LOG")
        .arg(&path)
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();
    fs::set_permissions(&test_dir, fs::Permissions::from_mode(0o755)).unwrap();

    // Outer message, then the OS error text.
    let rendered = String::from_utf8_lossy(&output);
    assert!(rendered.contains("failed during create: "), "stderr: {rendered}");
    assert!(rendered.to_lowercase().contains("permission denied"), "stderr: {rendered}");
}

#[test]
fn bare_file_name_is_a_usage_error() {
    let mut cmd = cargo_bin_cmd!("scanprobe");
    let output = cmd
        .env_remove("RUST_LOG")
        .arg("sample.txt")
        .assert()
        .code(2)
        .get_output()
        .stderr
        .clone();

    let rendered = String::from_utf8_lossy(&output);
    assert!(rendered.contains("no directory separator"), "stderr: {rendered}");
}

#[test]
fn missing_argument_is_a_usage_error() {
    let mut cmd = cargo_bin_cmd!("scanprobe");
    cmd.assert().code(2);
}

#[test]
fn rounds_repeat_the_cycle() {
    let (_dir, test_dir) = test_dir();
    let path = test_dir.join("sample.txt");

    let mut cmd = cargo_bin_cmd!("scanprobe");
    cmd.env_remove("RUST_LOG")
        .args(["--rounds", "3"])
        .arg(&path)
        .assert()
        .success();

    assert!(!path.exists());
}

#[test]
fn huge_round_count_fails_at_first_checkpoint() {
    let (_dir, test_dir) = test_dir();
    let path = test_dir.join("sample.txt");
    fs::write(&path, "").unwrap();

    let mut cmd = cargo_bin_cmd!("scanprobe");
    cmd.env_remove("RUST_LOG")
        .args(["--rounds", "4000000000"])
        .arg(&path)
        .assert()
        .code(3);
}

#[test]
fn zero_rounds_is_rejected() {
    let (_dir, test_dir) = test_dir();

    let mut cmd = cargo_bin_cmd!("scanprobe");
    cmd.env_remove("RUST_LOG")
        .args(["--rounds", "0"])
        .arg(test_dir.join("sample.txt"))
        .assert()
        .code(2);
}

#[test]
fn verbose_logs_steps_to_stderr() {
    let (_dir, test_dir) = test_dir();
    let path = test_dir.join("sample.txt");

    let mut cmd = cargo_bin_cmd!("scanprobe");
    let output = cmd
        .env_remove("RUST_LOG")
        .arg("-v")
        .arg(&path)
        .assert()
        .success()
        .stdout("")
        .get_output()
        .stderr
        .clone();

    let rendered = String::from_utf8_lossy(&output);
    assert!(rendered.contains("step passed"), "stderr: {rendered}");
    assert!(rendered.contains("assert-absent-after-delete"), "stderr: {rendered}");
}

#[test]
fn relative_path_resolves_against_working_directory() {
    let (dir, _test_dir) = test_dir();

    let mut cmd = cargo_bin_cmd!("scanprobe");
    cmd.env_remove("RUST_LOG")
        .current_dir(dir.path())
        .arg(Path::new("test_dir").join("sample.txt"))
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn symlinked_parent_passes() {
    let (dir, test_dir) = test_dir();
    let link = dir.path().join("link");
    std::os::unix::fs::symlink(&test_dir, &link).unwrap();

    let mut cmd = cargo_bin_cmd!("scanprobe");
    cmd.env_remove("RUST_LOG")
        .arg(link.join("sample.txt"))
        .assert()
        .success()
        .stderr("");

    assert!(!test_dir.join("sample.txt").exists());
}
