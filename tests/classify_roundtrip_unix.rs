#![cfg(unix)]

//! Every kind we can create without privileges classifies as itself, both through
//! `classify` and through the handle `Road::resolve` hands back.

use road_fs::{Kind, Road, classify};
use std::ffi::CString;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::net::UnixListener;
use std::path::Path;
use tempfile::tempdir;

fn mkfifo(path: &Path) {
    let c = CString::new(path.as_os_str().as_bytes()).unwrap();
    let rc = unsafe { libc::mkfifo(c.as_ptr(), 0o644) };
    assert_eq!(rc, 0, "mkfifo failed: {}", std::io::Error::last_os_error());
}

fn assert_round_trip(path: &Path, kind: Kind) {
    assert_eq!(classify(path).unwrap(), kind, "classify {}", path.display());
    let road = Road::resolve(path).unwrap();
    assert_eq!(road.kind(), kind, "resolve {}", path.display());
}

#[test]
fn regular_directory_and_symlink() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.txt");
    fs::write(&file, b"x").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    let link = dir.path().join("link");
    std::os::unix::fs::symlink(&sub, &link).unwrap();

    assert_round_trip(&file, Kind::RegularFile);
    assert_round_trip(&sub, Kind::Directory);
    assert_round_trip(&link, Kind::SymbolicLink);
    assert!(Road::resolve(&link).unwrap().as_symlink().is_some());
}

#[test]
fn fifo_and_socket_are_special() {
    let dir = tempdir().unwrap();
    let fifo = dir.path().join("pipe");
    mkfifo(&fifo);
    let sock = dir.path().join("sock");
    let _listener = UnixListener::bind(&sock).unwrap();

    assert_round_trip(&fifo, Kind::Fifo);
    assert_round_trip(&sock, Kind::Socket);
    assert!(Road::resolve(&fifo).unwrap().as_special().is_some());
}

#[test]
fn dev_null_is_a_character_device() {
    assert_round_trip(Path::new("/dev/null"), Kind::CharacterDevice);
}

#[test]
fn unknown_mode_bits_are_rejected() {
    let err = Kind::from_mode(0o170000).unwrap_err();
    assert_eq!(err.code(), "unknown_kind");
}
