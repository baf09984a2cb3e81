//! The `_async` forms behave like their blocking twins.

use road_fs::{File, Folder, Kind, Road, RoadError, TempFile, TempFolder};
use tempfile::tempdir;

#[tokio::test]
async fn file_round_trip_async() {
    let dir = tempdir().unwrap();
    let f = File::create_async(dir.path().join("a.txt")).await.unwrap();
    f.write_text_async("hello").await.unwrap();
    f.append_text_async(" world").await.unwrap();
    assert_eq!(f.read_text_async().await.unwrap(), "hello world");
    assert_eq!(f.size_async().await.unwrap(), 11);
}

#[tokio::test]
async fn chunks_async_match_blocking() {
    let dir = tempdir().unwrap();
    let f = File::create_async(dir.path().join("blob")).await.unwrap();
    f.write_bytes_async(&vec![3u8; 2500]).await.unwrap();

    let mut reader = f.chunks_of_async(1024).await.unwrap();
    let mut sizes = Vec::new();
    while let Some(chunk) = reader.next_chunk().await.unwrap() {
        sizes.push(chunk.len());
    }
    assert_eq!(sizes, vec![1024, 1024, 452]);
}

#[tokio::test]
async fn lines_async_reads_each_line() {
    let dir = tempdir().unwrap();
    let f = File::create_async(dir.path().join("l")).await.unwrap();
    f.write_text_async("a\nb\n").await.unwrap();
    let mut lines = f.lines_async().await.unwrap();
    let mut got = Vec::new();
    while let Some(line) = lines.next_line().await.unwrap() {
        got.push(line);
    }
    assert_eq!(got, vec!["a", "b"]);
}

#[tokio::test]
async fn folder_listing_and_moves_async() {
    let dir = tempdir().unwrap();
    let src = Folder::create_async(dir.path().join("src")).await.unwrap();
    let dest = Folder::create_async(dir.path().join("dest")).await.unwrap();
    File::create_async(src.location().join("x")).await.unwrap();
    Folder::create_async(src.location().join("sub")).await.unwrap();

    let files = src.list_kinds_async(&[Kind::RegularFile]).await.unwrap();
    assert_eq!(files.len(), 1);
    assert!(src.find_async("nope").await.unwrap().is_none());

    let copied = src.copy_into_async(&dest).await.unwrap();
    assert_eq!(copied.list_async().await.unwrap().len(), 2);

    let mut moved = Road::resolve_async(src.location().join("x")).await.unwrap();
    moved.move_into_async(&dest).await.unwrap();
    assert_eq!(moved.location(), dest.location().join("x"));
    moved.rename_async("y").await.unwrap();
    assert!(moved.exists_async().await);
    moved.delete_async().await.unwrap();
    assert!(!moved.exists_async().await);
}

#[tokio::test]
async fn same_as_async_and_gate() {
    let dir = tempdir().unwrap();
    let a = File::create_async(dir.path().join("a")).await.unwrap();
    let mut b = File::create_async(dir.path().join("b")).await.unwrap();
    a.write_bytes_async(b"same").await.unwrap();
    b.write_bytes_async(b"same").await.unwrap();
    assert!(a.same_as_async(&b).await.unwrap());
    assert!(!a.same_as_async(&a).await.unwrap());

    b.set_mutable(false);
    assert!(matches!(b.delete_async().await, Err(RoadError::NotMutable(_))));
    assert!(b.exists_async().await);
}

#[tokio::test]
async fn temp_resources_async() {
    let mut f = TempFile::new_async().await.unwrap();
    let mut d = TempFolder::new_async().await.unwrap();
    let (fh, dh) = ((*f).clone(), (*d).clone());
    f.close_async().await;
    d.close_async().await;
    assert!(!fh.exists_async().await);
    assert!(!dh.exists_async().await);
}
