use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::process::Command;

fn road() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("road"))
}

#[test]
fn stat_reports_kind_and_size() {
    let tmp = TempDir::new().unwrap();
    let f = tmp.child("notes.txt");
    f.write_str("twelve bytes").unwrap();

    let out = road().args(["stat"]).arg(f.path()).output().unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("kind\tregular file"), "{stdout}");
    assert!(stdout.contains("size\t12"), "{stdout}");
    assert!(stdout.contains("extension\ttxt"), "{stdout}");
}

#[test]
fn ls_filters_by_kind() {
    let tmp = TempDir::new().unwrap();
    tmp.child("a.txt").touch().unwrap();
    tmp.child("sub").create_dir_all().unwrap();

    let out = road().arg("ls").arg(tmp.path()).args(["-k", "dir"]).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim(), "directory\tsub");
}

#[test]
fn find_missing_child_fails() {
    let tmp = TempDir::new().unwrap();
    let out = road().arg("find").arg(tmp.path()).arg("ghost").output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("ghost"));
}

#[test]
fn find_rejects_nested_name() {
    let tmp = TempDir::new().unwrap();
    let out = road().arg("find").arg(tmp.path()).arg("a/b").output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("single path component"));
}

#[test]
fn stat_on_missing_path_fails_with_message() {
    let tmp = TempDir::new().unwrap();
    let out = road().arg("stat").arg(tmp.path().join("nope")).output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not found"));
}

#[test]
fn wait_times_out_on_missing_exec_bit() {
    let tmp = TempDir::new().unwrap();
    let f = tmp.child("data");
    f.write_str("x").unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(f.path(), std::fs::Permissions::from_mode(0o600)).unwrap();
    }
    let out = road()
        .arg("wait")
        .arg(f.path())
        .args(["--mode", "execute", "--timeout-ms", "200"])
        .output()
        .unwrap();
    assert!(!out.status.success());
}

#[test]
fn tmp_cleans_up_after_itself() {
    let scratch = TempDir::new().unwrap();
    let out = road()
        .env("ROAD_TMPDIR", scratch.path())
        .args(["tmp", "--text", "abc"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("(3 bytes)"));
    assert!(std::fs::read_dir(scratch.path()).unwrap().next().is_none());
}

#[cfg(unix)]
#[test]
fn target_shows_raw_and_resolved() {
    let tmp = TempDir::new().unwrap();
    tmp.child("real").touch().unwrap();
    std::os::unix::fs::symlink("real", tmp.path().join("alias")).unwrap();
    let out = road().arg("target").arg(tmp.path().join("alias")).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("alias -> real"), "{stdout}");
    assert!(stdout.contains("regular file"), "{stdout}");
}
