use strtable::{ArgumentError, StrTable, TableConfig, TableError};

#[test]
fn scenario_insert_five_then_lookup() {
    let mut t = StrTable::with_capacity(4).expect("create");
    for (k, v) in [("x", 1), ("y", 2), ("z", 3), ("w", 4), ("v", 5)] {
        t.insert_or_update(k, v).expect("insert ok");
    }
    assert_eq!(t.lookup("x"), Some(&1));
    assert_eq!(t.lookup("v"), Some(&5));
    assert_eq!(t.lookup("q"), None);
    assert!(t.capacity() > 4);
}

#[test]
fn resize_transparency_hundred_keys_from_four() {
    let mut t = StrTable::with_capacity(4).unwrap();
    let mut capacities = vec![t.capacity()];
    for i in 0..100 {
        t.insert_or_update(&format!("key{i}"), i).unwrap();
        assert!(t.len() * 2 <= t.capacity(), "load factor after insert {i}");
        if capacities.last() != Some(&t.capacity()) {
            capacities.push(t.capacity());
        }
    }
    assert_eq!(capacities, [4, 8, 16, 32, 64, 128, 256]);
    assert_eq!(t.len(), 100);
    for i in 0..100 {
        assert_eq!(t.lookup(&format!("key{i}")), Some(&i), "key{i}");
    }
    for i in 100..200 {
        assert_eq!(t.lookup(&format!("key{i}")), None);
    }
}

#[test]
fn absence_on_empty_and_after_resize() {
    let mut t: StrTable<u32> = StrTable::with_capacity(2).unwrap();
    assert_eq!(t.lookup("missing"), None);
    assert!(!t.contains_key("missing"));

    t.insert_or_update("a", 1).unwrap();
    let before = t.capacity();
    t.insert_or_update("b", 2).unwrap();
    assert!(t.capacity() > before, "second insert must grow a 2-slot table");
    assert_eq!(t.lookup("missing"), None);
    assert_eq!(t.lookup("a"), Some(&1));
}

#[test]
fn update_replaces_value_without_growing_len() {
    let mut t = StrTable::with_capacity(8).unwrap();
    t.insert_or_update("k", "first").unwrap();
    t.insert_or_update("k", "second").unwrap();
    assert_eq!(t.len(), 1);
    assert_eq!(t.lookup("k"), Some(&"second"));
}

#[test]
fn key_isolation_from_caller_buffer() {
    let mut t = StrTable::with_capacity(4).unwrap();
    let mut buf = String::from("abc");
    let stored = t.insert_or_update(&buf, 7).unwrap();
    assert_ne!(stored.as_ptr(), buf.as_ptr());

    buf.clear();
    buf.push_str("xyz");
    assert_eq!(t.lookup("abc"), Some(&7));
    assert_eq!(t.lookup(&buf), None);
    drop(buf);
    assert_eq!(t.lookup("abc"), Some(&7));
}

#[test]
fn insert_returns_table_owned_key() {
    let mut t = StrTable::with_capacity(4).unwrap();
    let first = t.insert_or_update("root", 1).unwrap().to_owned();
    assert_eq!(first, "root");
    let again = t.insert_or_update("root", 2).unwrap();
    assert_eq!(again, "root");
}

#[test]
fn invalid_arguments_are_distinct_from_allocation_failure() {
    let mut t = StrTable::with_config(TableConfig::new().with_max_key_len(8)).unwrap();
    let err = t.insert_or_update("", 1).unwrap_err();
    assert_eq!(err, TableError::InvalidArgument(ArgumentError::EmptyKey));
    assert!(!matches!(err, TableError::AllocationFailure { .. }));

    let err = t.insert_or_update("waytoolongkey", 1).unwrap_err();
    assert!(matches!(
        err,
        TableError::InvalidArgument(ArgumentError::KeyTooLong { len: 13, max: 8 })
    ));
    assert!(t.is_empty());
}

#[test]
fn create_rejects_zero_and_rounds_capacity() {
    assert!(matches!(
        StrTable::<()>::with_capacity(0),
        Err(TableError::InvalidArgument(ArgumentError::ZeroCapacity))
    ));
    let t = StrTable::<()>::with_capacity(100).unwrap();
    assert_eq!(t.capacity(), 128);
    assert_eq!(t.config().initial_capacity(), 100);
}

#[test]
fn default_config_values() {
    let cfg = TableConfig::default();
    assert_eq!(cfg.initial_capacity(), strtable::config::DEFAULT_INITIAL_CAPACITY);
    assert_eq!(cfg.max_key_len(), strtable::config::DEFAULT_MAX_KEY_LEN);
    let t: StrTable<u8> = StrTable::with_config(cfg).unwrap();
    assert_eq!(t.capacity(), 16);
}

#[test]
fn growth_is_logged_through_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("strtable=trace")
        .with_test_writer()
        .try_init();
    let mut t = StrTable::with_capacity(1).unwrap();
    for i in 0..8 {
        t.insert_or_update(&format!("n{i}"), i).unwrap();
    }
    assert_eq!(t.capacity(), 16);
}
