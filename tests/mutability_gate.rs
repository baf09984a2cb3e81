//! A handle with `mutable = false` refuses every mutation with `NotMutable`
//! and leaves the filesystem exactly as it was.

use road_fs::{File, Folder, Road, RoadError};
use std::fs;
use tempfile::tempdir;

fn not_mutable<T: std::fmt::Debug>(r: road_fs::Result<T>) {
    assert!(matches!(r, Err(RoadError::NotMutable(_))), "got {r:?}");
}

#[test]
fn frozen_file_refuses_everything() {
    let dir = tempdir().unwrap();
    let dest = Folder::create(dir.path().join("dest")).unwrap();
    let p = dir.path().join("f.txt");
    fs::write(&p, b"original").unwrap();
    let before = fs::metadata(&p).unwrap().modified().unwrap();

    let mut f = File::open(&p).unwrap();
    f.set_mutable(false);
    assert!(!f.is_mutable());

    not_mutable(f.delete());
    not_mutable(f.move_into(&dest));
    not_mutable(f.copy_into(&dest));
    not_mutable(f.rename("other.txt"));
    not_mutable(f.write_text("new"));
    not_mutable(f.append_bytes(b"more"));
    not_mutable(f.write_stream());

    assert_eq!(fs::read(&p).unwrap(), b"original");
    assert_eq!(fs::metadata(&p).unwrap().modified().unwrap(), before);
    assert_eq!(f.location(), fs::canonicalize(&p).unwrap());
    assert!(fs::read_dir(dest.location()).unwrap().next().is_none());
    assert!(!dir.path().join("other.txt").exists());
}

#[test]
fn frozen_folder_keeps_its_tree() {
    let dir = tempdir().unwrap();
    let dest = Folder::create(dir.path().join("dest")).unwrap();
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("inner")).unwrap();
    fs::write(src.join("inner/x"), b"x").unwrap();

    let mut road = Road::resolve(&src).unwrap();
    road.set_mutable(false);
    not_mutable(road.delete());
    not_mutable(road.move_into(&dest));
    not_mutable(road.copy_into(&dest));
    not_mutable(road.rename("renamed"));

    assert_eq!(fs::read(src.join("inner/x")).unwrap(), b"x");
    assert!(!dest.location().join("src").exists());
    assert!(!dir.path().join("renamed").exists());
}

#[test]
fn flag_can_be_restored() {
    let dir = tempdir().unwrap();
    let mut f = File::create(dir.path().join("f")).unwrap();
    f.set_mutable(false);
    f.set_mutable(true);
    f.write_text("ok").unwrap();
    assert_eq!(f.read_text().unwrap(), "ok");
}
