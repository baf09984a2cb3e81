#![cfg(unix)]

use road_fs::{Folder, Kind, RoadError, SymbolicLink};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn retarget_points_somewhere_else() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("one"), "1").unwrap();
    fs::create_dir(dir.path().join("two")).unwrap();
    let link = SymbolicLink::create(dir.path().join("l"), Some(Path::new("one"))).unwrap();
    assert_eq!(link.target().unwrap().kind(), Kind::RegularFile);

    link.retarget(Path::new("two")).unwrap();
    assert_eq!(link.link_target().unwrap(), PathBuf::from("two"));
    assert_eq!(link.target().unwrap().kind(), Kind::Directory);
}

#[test]
fn frozen_link_cannot_be_retargeted() {
    let dir = tempdir().unwrap();
    let mut link = SymbolicLink::create(dir.path().join("l"), Some(Path::new("a"))).unwrap();
    link.set_mutable(false);
    assert!(matches!(link.retarget(Path::new("b")), Err(RoadError::NotMutable(_))));
    assert_eq!(link.link_target().unwrap(), PathBuf::from("a"));
}

#[test]
fn create_does_not_replace_existing_entry() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("taken");
    fs::write(&p, "file").unwrap();
    let err = SymbolicLink::create(&p, Some(Path::new("x"))).unwrap_err();
    assert!(matches!(err, RoadError::KindMismatch { found: Kind::RegularFile, .. }));
    assert_eq!(fs::read_to_string(&p).unwrap(), "file");
}

#[cfg(target_os = "linux")]
#[test]
fn empty_target_is_refused_by_linux() {
    let dir = tempdir().unwrap();
    let err = SymbolicLink::create(dir.path().join("empty"), None).unwrap_err();
    assert!(err.io_kind().is_some(), "expected an OS error, got {err:?}");
}

#[test]
fn copy_points_at_resolved_target() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("real"), "r").unwrap();
    let link = SymbolicLink::create(dir.path().join("rel"), Some(Path::new("real"))).unwrap();
    let elsewhere = Folder::create(dir.path().join("elsewhere")).unwrap();

    let copy = link.copy_into(&elsewhere).unwrap();
    assert!(copy.link_target().unwrap().is_absolute());
    assert_eq!(fs::read_to_string(copy.location()).unwrap(), "r");
}

#[test]
fn move_keeps_link_and_target_alone() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("real");
    fs::write(&real, "r").unwrap();
    let mut link = SymbolicLink::create(dir.path().join("l"), Some(&real)).unwrap();
    let into = Folder::create(dir.path().join("into")).unwrap();

    link.move_into(&into).unwrap();
    assert_eq!(link.location(), into.location().join("l"));
    assert!(link.exists());
    assert!(real.exists());
    link.rename("m").unwrap();
    assert_eq!(link.name(), "m");
}

#[tokio::test]
async fn directory_in_the_way_fails_alike_in_both_forms() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("real"), "r").unwrap();
    let link = SymbolicLink::create(dir.path().join("ln"), Some(Path::new("real"))).unwrap();
    let elsewhere = Folder::create(dir.path().join("elsewhere")).unwrap();
    fs::create_dir(elsewhere.location().join("ln")).unwrap();

    let blocking = link.copy_into(&elsewhere).unwrap_err();
    let awaited = link.copy_into_async(&elsewhere).await.unwrap_err();
    assert_eq!(blocking.io_kind(), Some(std::io::ErrorKind::AlreadyExists));
    assert_eq!(awaited.io_kind(), blocking.io_kind());
    assert!(elsewhere.location().join("ln").is_dir());
}

#[tokio::test]
async fn async_copy_replaces_an_existing_link() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("real"), "r").unwrap();
    let link = SymbolicLink::create(dir.path().join("ln"), Some(Path::new("real"))).unwrap();
    let elsewhere = Folder::create(dir.path().join("elsewhere")).unwrap();
    std::os::unix::fs::symlink("/nowhere", elsewhere.location().join("ln")).unwrap();

    let copy = link.copy_into_async(&elsewhere).await.unwrap();
    assert_eq!(fs::read_to_string(copy.location()).unwrap(), "r");
}

#[test]
fn copy_into_own_folder_leaves_link_alone() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("real"), "r").unwrap();
    let link = SymbolicLink::create(dir.path().join("ln"), Some(Path::new("real"))).unwrap();

    link.copy_into(&link.parent()).unwrap();
    assert_eq!(link.link_target().unwrap(), Path::new("real"));
}
