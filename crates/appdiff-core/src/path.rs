//! Snapshot path normalisation.
//!
//! Local paths come from the host filesystem (`\` on Windows) while remote
//! paths come from the service (`/`, often with a leading slash for hosting
//! assets). Both sides are reduced to one canonical relative form before any
//! comparison. Case is preserved.

use crate::errors::SnapshotError;

/// Normalise a snapshot path into its canonical relative form.
///
/// - `\` becomes `/`
/// - leading `/` and `./` are stripped
/// - empty and `.` segments are dropped
/// - `..` segments are rejected
///
/// # Errors
///
/// `SnapshotError::InvalidPath` when the path is empty after normalisation or
/// contains a parent (`..`) segment.
pub fn normalize_path(raw: &str) -> Result<String, SnapshotError> {
    let unified = raw.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(SnapshotError::InvalidPath {
                    path: raw.to_string(),
                    reason: "parent segments are not allowed".to_string(),
                })
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return Err(SnapshotError::InvalidPath {
            path: raw.to_string(),
            reason: "path is empty".to_string(),
        });
    }

    Ok(segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_unify() {
        assert_eq!(
            normalize_path("functions\\hello\\source.js").unwrap(),
            "functions/hello/source.js"
        );
    }

    #[test]
    fn test_leading_markers_stripped() {
        assert_eq!(normalize_path("/img.png").unwrap(), "img.png");
        assert_eq!(normalize_path("./a.json").unwrap(), "a.json");
        assert_eq!(normalize_path("a//b/./c").unwrap(), "a/b/c");
    }

    #[test]
    fn test_case_preserved() {
        assert_eq!(normalize_path("Docs/README.md").unwrap(), "Docs/README.md");
        assert_ne!(
            normalize_path("Docs/README.md").unwrap(),
            normalize_path("docs/readme.md").unwrap()
        );
    }

    #[test]
    fn test_rejects_parent_and_empty() {
        assert!(matches!(
            normalize_path("../escape.json"),
            Err(SnapshotError::InvalidPath { .. })
        ));
        assert!(matches!(
            normalize_path("/"),
            Err(SnapshotError::InvalidPath { .. })
        ));
        assert!(normalize_path("").is_err());
    }
}
