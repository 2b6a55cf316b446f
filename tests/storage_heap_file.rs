use heapgres::errors::storage_error::StorageError;
use heapgres::storage::disk_manager::DiskPageManager;
use heapgres::storage::heap_file::HeapFile;
use heapgres::storage::storage_engine::StorageEngine;
use heapgres::types::page_types::SlottedPage;
use heapgres::types::storage_types::{
    ColumnDefinition, ColumnType, TableSchema, Tuple, TupleId, Value,
};

fn schema() -> TableSchema {
    TableSchema::new(
        "people",
        vec![
            ColumnDefinition::new("id", ColumnType::Int),
            ColumnDefinition::with_max_length("name", ColumnType::Varchar, 32),
        ],
    )
}

fn row(id: i32, name: &str) -> Tuple {
    Tuple::new(vec![Value::Int(id), Value::Text(name.to_string())])
}

#[test]
fn test_many_rows_span_pages() {
    let mut heap = HeapFile::in_memory(schema());
    for i in 0..200 {
        heap.insert_tuple(&row(i, &format!("row-{:03}", i))).unwrap();
    }

    assert!(heap.page_count() > 1);
    let rows = heap.scan_all().unwrap();
    assert_eq!(rows.len(), 200);
    // page then slot order equals insertion order here
    for (i, t) in rows.iter().enumerate() {
        assert_eq!(t.values[0], Value::Int(i as i32));
    }
}

#[test]
fn test_insert_get_delete() {
    let mut heap = HeapFile::in_memory(schema());
    let a = heap.insert_tuple(&row(1, "Alice")).unwrap();
    let b = heap.insert_tuple(&row(2, "Bob")).unwrap();
    assert_eq!(a, TupleId::new(0, 0));
    assert_eq!(b, TupleId::new(0, 1));

    assert_eq!(heap.get_tuple(b).unwrap(), Some(row(2, "Bob")));
    assert!(heap.delete_tuple(a).unwrap());
    assert!(!heap.delete_tuple(a).unwrap());
    assert_eq!(heap.get_tuple(a).unwrap(), None);
    assert_eq!(heap.get_tuple(TupleId::new(9, 0)).unwrap(), None);

    let live = heap.scan_all_with_ids().unwrap();
    assert_eq!(live, vec![(b, row(2, "Bob"))]);
}

#[test]
fn test_free_space_map_tracks_pages() {
    let mut heap = HeapFile::in_memory(schema());
    heap.insert_tuple(&row(1, "Alice")).unwrap();
    let fsm = heap.free_space_map();
    assert_eq!(fsm.page_count(), 1);
    // header 8, tuple 4 + 1 + 4 + 4 + 5 = 18, slot 4
    assert_eq!(fsm.free_space(0), 4096 - 8 - 18 - 4);
}

#[test]
fn test_scan_with_filter() {
    let mut heap = HeapFile::in_memory(schema());
    for i in 0..10 {
        heap.insert_tuple(&row(i, "x")).unwrap();
    }

    let even: Vec<Tuple> = heap
        .scan_with_filter(|t| {
            Ok::<_, StorageError>(matches!(t.values[0], Value::Int(i) if i % 2 == 0))
        })
        .unwrap();
    assert_eq!(even.len(), 5);

    let with_ids = heap
        .scan_with_filter_and_ids(|t| Ok::<_, StorageError>(t.values[0] == Value::Int(3)))
        .unwrap();
    assert_eq!(with_ids, vec![(TupleId::new(0, 3), row(3, "x"))]);
}

#[test]
fn test_tuple_too_large() {
    let mut heap = HeapFile::in_memory(schema());
    let huge = "y".repeat(5000);
    assert!(matches!(
        heap.insert_tuple(&row(1, &huge)),
        Err(StorageError::TupleTooLarge { .. })
    ));
    assert_eq!(heap.page_count(), 0);
}

#[test]
fn test_reopen_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("PEOPLE.dat");

    {
        let mut heap = HeapFile::create(schema(), &path).unwrap();
        for i in 0..300 {
            heap.insert_tuple(&row(i, "persisted")).unwrap();
        }
        heap.delete_tuple(TupleId::new(0, 0)).unwrap();
    }

    let len = std::fs::metadata(&path).unwrap().len();
    assert_eq!(len % 4096, 0);

    let heap = HeapFile::open(schema(), &path).unwrap();
    assert_eq!(heap.page_count() as u64, len / 4096);
    let rows = heap.scan_all().unwrap();
    assert_eq!(rows.len(), 299);
    assert_eq!(rows[0], row(1, "persisted"));
    assert_eq!(heap.get_tuple(TupleId::new(0, 0)).unwrap(), None);

    // rebuilt map mirrors the page headers on disk
    let mut disk = DiskPageManager::open(&path).unwrap();
    assert_eq!(heap.free_space_map().page_count(), heap.page_count());
    for page_no in 0..disk.page_count().unwrap() {
        let page = SlottedPage::from_bytes(&disk.read_page(page_no).unwrap()).unwrap();
        assert_eq!(
            heap.free_space_map().free_space(page_no as usize),
            page.free_space(),
            "page {}",
            page_no
        );
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_failed_flush_leaves_no_page_behind() {
    let full = std::path::Path::new("/dev/full");
    if !full.exists() {
        return;
    }
    // every write to /dev/full fails with ENOSPC
    let mut heap = HeapFile::create(schema(), full).unwrap();
    assert!(matches!(heap.insert_tuple(&row(1, "lost")), Err(StorageError::Io(_))));

    assert_eq!(heap.page_count(), 0);
    assert_eq!(heap.free_space_map().page_count(), 0);
    assert!(heap.scan_all().unwrap().is_empty());
    assert_eq!(heap.get_tuple(TupleId::new(0, 0)).unwrap(), None);
}

#[test]
fn test_check_insertable_matches_insert() {
    let mut heap = HeapFile::in_memory(schema());
    assert!(heap.check_insertable(&row(1, "fine")).is_ok());
    assert!(matches!(
        heap.check_insertable(&row(2, &"z".repeat(5000))),
        Err(StorageError::TupleTooLarge { .. })
    ));
    assert!(matches!(
        heap.check_insertable(&Tuple::new(vec![Value::Int(3)])),
        Err(StorageError::ArityMismatch { .. })
    ));
    // checking never places anything
    assert_eq!(heap.page_count(), 0);
    heap.insert_tuple(&row(1, "fine")).unwrap();
    assert_eq!(heap.scan_all().unwrap().len(), 1);
}

#[test]
fn test_destroy_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("GONE.dat");
    let mut heap = HeapFile::create(schema(), &path).unwrap();
    heap.insert_tuple(&row(1, "a")).unwrap();
    assert!(path.exists());

    heap.destroy().unwrap();
    assert!(!path.exists());
    assert_eq!(heap.page_count(), 0);
}

#[test]
fn test_storage_engine_registry() {
    let dir = tempfile::tempdir().unwrap();
    let engine = StorageEngine::new(Some(dir.path().to_path_buf()), "dat");

    let heap = engine.create_heap_file(&schema()).unwrap();
    heap.lock().insert_tuple(&row(1, "a")).unwrap();
    assert!(dir.path().join("PEOPLE.dat").exists());

    assert!(engine.heap_file_exists("People"));
    assert!(matches!(
        engine.create_heap_file(&schema()),
        Err(StorageError::HeapFileExists(_))
    ));

    engine.drop_heap_file("PEOPLE").unwrap();
    assert!(!dir.path().join("PEOPLE.dat").exists());
    assert!(matches!(
        engine.drop_heap_file("people"),
        Err(StorageError::HeapFileNotFound(_))
    ));
    assert_eq!(engine.table_count(), 0);
}

#[test]
fn test_storage_engine_restore() {
    let dir = tempfile::tempdir().unwrap();
    {
        let engine = StorageEngine::new(Some(dir.path().to_path_buf()), "dat");
        let heap = engine.create_heap_file(&schema()).unwrap();
        heap.lock().insert_tuple(&row(5, "kept")).unwrap();
        engine.shutdown();
        assert_eq!(engine.table_count(), 0);
    }

    let engine = StorageEngine::new(Some(dir.path().to_path_buf()), "dat");
    let restored = engine.restore([schema()].iter()).unwrap();
    assert_eq!(restored, 1);
    let heap = engine.get_heap_file("people").unwrap();
    assert_eq!(heap.lock().scan_all().unwrap(), vec![row(5, "kept")]);
}
