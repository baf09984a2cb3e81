#![cfg(unix)]

use road_fs::{Folder, Kind, Road, RoadError, Special, access::AccessMode};
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::net::UnixListener;
use tempfile::tempdir;

fn not_supported<T: std::fmt::Debug>(r: road_fs::Result<T>, kind: Kind) {
    match r {
        Err(RoadError::NotSupported { kind: k, .. }) => assert_eq!(k, kind),
        other => panic!("expected NotSupported, got {other:?}"),
    }
}

#[test]
fn fifo_is_observable_but_never_mutated() {
    let dir = tempdir().unwrap();
    let fifo = dir.path().join("pipe");
    let c = CString::new(fifo.as_os_str().as_bytes()).unwrap();
    assert_eq!(unsafe { libc::mkfifo(c.as_ptr(), 0o600) }, 0);
    let dest = Folder::create(dir.path().join("dest")).unwrap();

    let mut road = Road::resolve(&fifo).unwrap();
    road.set_mutable(true);
    assert!(!road.is_mutable());
    assert!(road.exists());
    assert!(road.stat().is_ok());
    assert!(road.accessible(AccessMode::EXISTS).unwrap());

    not_supported(road.delete(), Kind::Fifo);
    not_supported(road.move_into(&dest), Kind::Fifo);
    not_supported(road.copy_into(&dest), Kind::Fifo);
    not_supported(road.rename("renamed"), Kind::Fifo);

    assert!(fifo.exists());
    assert!(!dest.location().join("pipe").exists());
    assert!(!dir.path().join("renamed").exists());
}

#[test]
fn socket_handle_refuses_delete() {
    let dir = tempdir().unwrap();
    let sock = dir.path().join("s");
    let _listener = UnixListener::bind(&sock).unwrap();
    let s = Special::open(&sock).unwrap();
    assert_eq!(s.kind(), Kind::Socket);
    not_supported(s.delete(), Kind::Socket);
    assert!(s.exists());
}

#[test]
fn special_open_rejects_directories() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        Special::open(dir.path()),
        Err(RoadError::KindMismatch { found: Kind::Directory, .. })
    ));
}
