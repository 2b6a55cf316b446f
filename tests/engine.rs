use heapgres::executer::executer::Executer;
use heapgres::types::parser_types::{ColumnSpec, Expr, FromItem, Select, Statement};
use heapgres::types::storage_types::Value;
use heapgres::{Engine, EngineConfig, ErrorKind};
use std::sync::Arc;
use std::thread;

fn create_users() -> Statement {
    Statement::CreateTable {
        table_name: "Users".into(),
        columns: vec![
            ColumnSpec::new("id", "INT"),
            ColumnSpec::sized("name", "VARCHAR", 50),
            ColumnSpec::new("score", "FLOAT"),
        ],
    }
}

fn select_all(table: &str) -> Statement {
    Statement::Select(Box::new(Select::star(FromItem::table(table))))
}

#[test]
fn test_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::with_data_dir(dir.path());

    {
        let engine = Engine::open(config.clone()).unwrap();
        engine.execute(&create_users()).unwrap();
        engine
            .execute(&Statement::Insert {
                table_name: "users".into(),
                rows: vec![
                    vec![Expr::int(1), Expr::string("Alice"), Expr::number("1.5")],
                    vec![Expr::int(2), Expr::string("Bob"), Expr::null()],
                ],
            })
            .unwrap();
        engine
            .execute(&Statement::Delete {
                target: FromItem::table("users"),
                filter: Some(Expr::column("id").equals(Expr::int(1))),
            })
            .unwrap();
        engine.shutdown();
    }

    assert!(dir.path().join("catalog.meta").exists());
    assert!(dir.path().join("USERS.dat").exists());

    let engine = Engine::open(config).unwrap();
    assert!(engine.catalog().table_exists("USERS"));
    let rel = Executer::new(engine.catalog(), engine.storage())
        .run_select(&Select::star(FromItem::table("users")))
        .unwrap();
    assert_eq!(rel.schema.table_name, "Users");
    assert_eq!(
        rel.tuples.into_iter().map(|t| t.values).collect::<Vec<_>>(),
        vec![vec![Value::Int(2), Value::Text("Bob".into()), Value::Null]]
    );
}

#[test]
fn test_drop_removes_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Engine::open(EngineConfig::with_data_dir(dir.path())).unwrap();
    engine.execute(&create_users()).unwrap();
    assert!(dir.path().join("USERS.dat").exists());

    engine
        .execute(&Statement::DropTable {
            table_name: "USERS".into(),
        })
        .unwrap();
    assert!(!dir.path().join("USERS.dat").exists());

    let err = engine
        .execute(&Statement::DropTable {
            table_name: "users".into(),
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    engine.shutdown();

    let reopened = Engine::open(EngineConfig::with_data_dir(dir.path())).unwrap();
    assert_eq!(reopened.catalog().table_count(), 0);
    assert_eq!(reopened.storage().table_count(), 0);
}

#[test]
fn test_corrupt_catalog_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("catalog.meta"), "TABLE broken\n").unwrap();
    let err = Engine::open(EngineConfig::with_data_dir(dir.path())).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_in_memory_engine() {
    let engine = Engine::in_memory();
    assert_eq!(engine.config().data_dir, None);
    engine.execute(&create_users()).unwrap();
    assert_eq!(engine.execute(&select_all("users")).unwrap(), "(0 rows)");
    assert!(engine.storage().data_dir().is_none());
    engine.shutdown();
}

#[test]
fn test_config_from_json() {
    let config = EngineConfig::from_json_str(r#"{ "data_dir": "/tmp/hg" }"#).unwrap();
    assert_eq!(config.data_dir.as_deref(), Some(std::path::Path::new("/tmp/hg")));
    assert_eq!(config.catalog_file, "catalog.meta");
    assert_eq!(config.data_file_extension, "dat");
    assert_eq!(config.catalog_path().unwrap(), std::path::Path::new("/tmp/hg/catalog.meta"));

    let memory =
        EngineConfig::from_json_str(r#"{ "data_dir": null, "data_file_extension": "tbl" }"#)
            .unwrap();
    assert_eq!(memory.data_dir, None);
    assert_eq!(memory.catalog_path(), None);
    assert_eq!(memory.data_file_extension, "tbl");

    assert!(EngineConfig::from_json_str("{ not json").is_err());
}

#[test]
fn test_config_load_and_custom_extension() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig {
        data_dir: Some(dir.path().join("db")),
        catalog_file: "tables.meta".into(),
        data_file_extension: "heap".into(),
    };
    let path = dir.path().join("engine.json");
    std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    let loaded = EngineConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    let engine = Engine::open(loaded).unwrap();
    engine.execute(&create_users()).unwrap();
    assert!(dir.path().join("db").join("tables.meta").exists());
    assert!(dir.path().join("db").join("USERS.heap").exists());
}

#[test]
fn test_concurrent_create_has_one_winner() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(Engine::open(EngineConfig::with_data_dir(dir.path())).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.execute(&create_users()))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(err.kind(), ErrorKind::Schema);
    }

    assert_eq!(engine.catalog().table_count(), 1);
    assert!(dir.path().join("USERS.dat").exists());
    assert_eq!(engine.execute(&select_all("users")).unwrap(), "(0 rows)");
}
