use diskbroom_core::{CleanerConfig, CleanerError, FileStat, format_size, validate_root};
use std::path::PathBuf;

#[test]
fn test_format_size_reference_values() {
    assert_eq!(format_size(0), "0 B");
    assert_eq!(format_size(1023), "1023 B");
    assert_eq!(format_size(1_048_576), "1.00 MB");
    assert_eq!(format_size(1_073_741_824), "1.00 GB");
}

#[test]
fn test_format_size_is_monotonic_within_unit() {
    let sizes = [1024u64, 2048, 10 * 1024, 500 * 1024];
    for size in sizes {
        assert!(format_size(size).ends_with(" KB"), "{size} should render in KB");
    }
}

#[test]
fn test_file_stat_equality_and_clone() {
    let stat = FileStat::new("a.txt", 10, "/root/a.txt");
    let copy = stat.clone();

    assert_eq!(stat, copy);
    assert_eq!(copy.path, PathBuf::from("/root/a.txt"));
    assert_ne!(stat, FileStat::new("a.txt", 11, "/root/a.txt"));
}

#[test]
fn test_file_stat_serialization() {
    let stat = FileStat::new("report.pdf", 2048, "/docs/report.pdf");
    let json = serde_json::to_string(&stat).unwrap();

    assert!(json.contains("\"name\":\"report.pdf\""));
    assert!(json.contains("\"size\":2048"));

    let back: FileStat = serde_json::from_str(&json).unwrap();
    assert_eq!(back, stat);
}

#[test]
fn test_config_serialization_defaults() {
    let config: CleanerConfig = serde_json::from_str("{}").unwrap();

    assert_eq!(config.temp_patterns, vec!["*.tmp", "*.log"]);
    assert_eq!(config.organize_suffix, "_Files");
    assert_eq!(config.hash_chunk_size, 8192);
    assert_eq!(config.min_duplicate_size, 1);
}

#[test]
fn test_validate_root_accepts_directory() {
    let temp = tempfile::TempDir::new().unwrap();
    assert!(validate_root(temp.path()).is_ok());

    let err = validate_root(&temp.path().join("missing")).unwrap_err();
    assert!(matches!(err, CleanerError::PathInvalid { .. }));
    assert!(err.to_string().contains("missing"));
}
