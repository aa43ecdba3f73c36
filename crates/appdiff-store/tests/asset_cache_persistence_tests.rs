//! The asset cache survives reopening its database file

use appdiff_core::{AssetCache, ExErrorKind, FileSignature};
use appdiff_store::SqliteAssetCache;

#[test]
fn test_entries_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join(".appdiff").join("cache.db");
    let digest = "ab".repeat(32);
    let sig = FileSignature::new(512, 1_234_567_890);

    {
        let cache = SqliteAssetCache::open(&db_path).unwrap();
        cache.put("app-1", "css/site.css", &digest, sig).unwrap();
    }

    assert!(db_path.exists());
    let cache = SqliteAssetCache::open(&db_path).unwrap();
    let entry = cache.get("app-1", "css/site.css").unwrap().unwrap();
    assert_eq!(entry.digest, digest);
    assert!(entry.is_valid_for(&sig));
    assert!(!entry.is_valid_for(&FileSignature::new(512, 1_234_567_891)));
}

#[test]
fn test_concurrent_writers_last_wins_without_error() {
    let cache = std::sync::Arc::new(SqliteAssetCache::open_in_memory().unwrap());
    let handles: Vec<_> = (0..8u64)
        .map(|i| {
            let cache = cache.clone();
            std::thread::spawn(move || {
                let digest = format!("{:064x}", i);
                cache
                    .put("app-1", "shared.bin", &digest, FileSignature::new(i, 0))
                    .unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let entry = cache.get("app-1", "shared.bin").unwrap().unwrap();
    assert_eq!(entry.digest, format!("{:064x}", entry.signature.size));
}

#[test]
fn test_open_fails_on_unusable_path() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, b"not a dir").unwrap();
    assert!(SqliteAssetCache::open(blocker.join("cache.db")).is_err());
}

#[test]
fn test_reopen_with_tampered_schema_history_fails() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cache.db");
    drop(SqliteAssetCache::open(&db_path).unwrap());

    let conn = rusqlite::Connection::open(&db_path).unwrap();
    conn.execute("UPDATE schema_version SET checksum = 'bogus'", [])
        .unwrap();
    drop(conn);

    let err = SqliteAssetCache::open(&db_path).err().unwrap();
    assert_eq!(err.kind(), ExErrorKind::Persistence);
    assert_eq!(err.op(), Some("open_asset_cache"));
    let source = err.source_error().unwrap();
    assert_eq!(source.op(), Some("migration"));
    assert!(source.message().contains("checksum mismatch"));
}
