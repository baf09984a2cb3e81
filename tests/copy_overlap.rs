use road_fs::{File, Folder, RoadError};
use std::fs;
use tempfile::tempdir;

#[test]
fn file_copied_into_its_own_folder_keeps_content() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let f = File::create(root.path().join("a.txt"))?;
    f.write_text("precious")?;

    let copy = f.copy_into(&f.parent())?;
    assert_eq!(copy.location(), f.location());
    assert_eq!(f.read_text()?, "precious");
    Ok(())
}

#[tokio::test]
async fn file_copied_into_its_own_folder_keeps_content_async() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let f = File::create_async(root.path().join("a.txt")).await?;
    f.write_text_async("precious").await?;

    f.copy_into_async(&f.parent()).await?;
    assert_eq!(f.read_text_async().await?, "precious");
    Ok(())
}

#[cfg(unix)]
#[test]
fn file_copied_onto_its_hard_link_keeps_content() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let other = Folder::create(root.path().join("other"))?;
    let p = root.path().join("a.txt");
    fs::write(&p, "precious")?;
    fs::hard_link(&p, other.location().join("a.txt"))?;

    File::open(&p)?.copy_into(&other)?;
    assert_eq!(fs::read_to_string(&p)?, "precious");
    Ok(())
}

#[test]
fn folder_copied_into_its_own_parent_keeps_content() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let d = Folder::create(root.path().join("d"))?;
    fs::write(d.location().join("x"), "precious")?;
    fs::create_dir(d.location().join("sub"))?;
    fs::write(d.location().join("sub/y"), "deep")?;

    let copy = d.copy_into(&d.parent())?;
    assert_eq!(copy.location(), d.location());
    assert_eq!(fs::read_to_string(d.location().join("x"))?, "precious");
    assert_eq!(fs::read_to_string(d.location().join("sub/y"))?, "deep");
    Ok(())
}

#[tokio::test]
async fn folder_copied_into_its_own_parent_keeps_content_async() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let d = Folder::create(root.path().join("d"))?;
    fs::write(d.location().join("x"), "precious")?;

    d.copy_into_async(&d.parent()).await?;
    assert_eq!(fs::read_to_string(d.location().join("x"))?, "precious");
    Ok(())
}

#[test]
fn folder_copied_into_its_own_subfolder_is_refused() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let d = Folder::create(root.path().join("d"))?;
    fs::write(d.location().join("x"), "x")?;
    let sub = Folder::create(d.location().join("sub"))?;

    let err = d.copy_into(&sub).unwrap_err();
    assert!(matches!(err, RoadError::IntoItself { .. }), "got {err:?}");
    assert_eq!(err.code(), "into_itself");
    assert!(sub.list()?.is_empty(), "nothing may be written on refusal");
    assert_eq!(d.list()?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn folder_copied_into_its_own_subfolder_is_refused_async() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let d = Folder::create(root.path().join("d"))?;
    let deep = Folder::create(d.location().join("one"))?;
    let deeper = Folder::create(deep.location().join("two"))?;

    let err = d.copy_into_async(&deeper).await.unwrap_err();
    assert!(matches!(err, RoadError::IntoItself { .. }), "got {err:?}");
    assert!(deeper.list_async().await?.is_empty());
    Ok(())
}

#[test]
fn sibling_with_shared_prefix_is_not_a_subtree() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let d = Folder::create(root.path().join("d"))?;
    fs::write(d.location().join("x"), "x")?;
    let dd = Folder::create(root.path().join("dd"))?;

    let copy = d.copy_into(&dd)?;
    assert_eq!(fs::read_to_string(copy.location().join("x"))?, "x");
    Ok(())
}
