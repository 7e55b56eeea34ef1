//! Loading `stratalog.toml` and installing the process-wide pool.

use stratalog::{default_pool, ConfigError, StratalogConfig, CONFIG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn config_file_builds_bounded_pool() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[pool]\nname = \"ingest\"\ncapacity_bytes = 1048576\n").unwrap();

    let config = StratalogConfig::from_file(&path).unwrap();
    let pool = config.memory_pool();
    assert_eq!(pool.name(), "ingest");
    assert_eq!(pool.capacity(), Some(1 << 20));
}

#[test]
fn install_after_first_use_conflicts() {
    // Forces lazy creation, so any later install must be refused
    let _ = default_pool();
    let err = StratalogConfig::default().install().unwrap_err();
    assert!(matches!(err, ConfigError::PoolAlreadyInstalled));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = StratalogConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
