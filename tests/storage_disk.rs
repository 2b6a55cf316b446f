use heapgres::errors::storage_error::StorageError;
use heapgres::storage::disk_manager::DiskPageManager;

fn page_of(byte: u8) -> [u8; 4096] {
    [byte; 4096]
}

#[test]
fn test_write_then_read_pages() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("T.dat");
    let mut disk = DiskPageManager::create(&path).unwrap();
    assert_eq!(disk.page_count().unwrap(), 0);

    disk.write_page(0, &page_of(1)).unwrap();
    disk.write_page(1, &page_of(2)).unwrap();
    assert_eq!(disk.page_count().unwrap(), 2);
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 2 * 4096);

    // overwrite in place
    disk.write_page(0, &page_of(9)).unwrap();
    assert_eq!(disk.page_count().unwrap(), 2);
    assert_eq!(disk.read_page(0).unwrap(), page_of(9));
    assert_eq!(disk.read_page(1).unwrap(), page_of(2));
}

#[test]
fn test_page_count_ignores_partial_tail() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("T.dat");
    std::fs::write(&path, vec![7u8; 4096 * 3 + 100]).unwrap();

    let mut disk = DiskPageManager::open(&path).unwrap();
    assert_eq!(disk.page_count().unwrap(), 3);
    assert_eq!(disk.read_page(2).unwrap(), page_of(7));
}

#[test]
fn test_short_read_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("T.dat");
    std::fs::write(&path, vec![0u8; 4096 + 10]).unwrap();

    let mut disk = DiskPageManager::open(&path).unwrap();
    match disk.read_page(1) {
        Err(StorageError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::UnexpectedEof),
        other => panic!("expected io error, got {:?}", other.map(|_| ())),
    }
    assert!(matches!(disk.read_page(5), Err(StorageError::Io(_))));
}

#[test]
fn test_open_keeps_and_create_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("T.dat");
    {
        let mut disk = DiskPageManager::create(&path).unwrap();
        disk.write_page(0, &page_of(4)).unwrap();
    }

    let disk = DiskPageManager::open(&path).unwrap();
    assert_eq!(disk.page_count().unwrap(), 1);
    drop(disk);

    let disk = DiskPageManager::create(&path).unwrap();
    assert_eq!(disk.page_count().unwrap(), 0);
}

#[test]
fn test_delete_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("T.dat");
    let mut disk = DiskPageManager::create(&path).unwrap();
    disk.write_page(0, &page_of(1)).unwrap();
    assert_eq!(disk.path(), path.as_path());

    disk.delete().unwrap();
    assert!(!path.exists());
}
