use appdiff_core::errors::{ExError, ExErrorKind, SnapshotError};

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::InvalidPath, "ERR_INVALID_PATH"),
        (ExErrorKind::DuplicatePath, "ERR_DUPLICATE_PATH"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Service, "ERR_SERVICE"),
        (ExErrorKind::Build, "ERR_BUILD"),
        (ExErrorKind::Cache, "ERR_CACHE"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    let mut seen = std::collections::HashSet::new();
    for (kind, code) in kinds {
        assert_eq!(kind.code(), code);
        assert!(seen.insert(code), "duplicate code {}", code);
    }
}

#[test]
fn test_duplicate_path_carries_path() {
    let err: ExError = SnapshotError::DuplicatePath {
        path: "a/b.json".to_string(),
    }
    .into();
    assert_eq!(err.kind(), ExErrorKind::DuplicatePath);
    assert_eq!(err.path(), Some("a/b.json"));
    assert!(err.message().contains("a/b.json"));
}

#[test]
fn test_invalid_path_is_fatal() {
    let err: ExError = SnapshotError::InvalidPath {
        path: "../x".to_string(),
        reason: "parent segments are not allowed".to_string(),
    }
    .into();
    assert!(err.is_fatal());
    assert_eq!(err.code(), "ERR_INVALID_PATH");
}

#[test]
fn test_context_builders() {
    let err = ExError::new(ExErrorKind::Service)
        .with_op("fetch_hosting_manifest")
        .with_app_id("app-123")
        .with_message("401 unauthorized");
    assert_eq!(err.op(), Some("fetch_hosting_manifest"));
    assert_eq!(err.app_id(), Some("app-123"));
    assert!(err.to_string().contains("(app_id: app-123)"));
}
