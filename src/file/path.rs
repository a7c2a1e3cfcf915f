//! Relative path handling.
//!
//! Client paths are slash-separated strings relative to the storage root.
//! They are normalized lexically, without touching the filesystem:
//! - a leading `/` is ignored
//! - empty and `.` segments are dropped
//! - `..` removes the previous segment, and is rejected when there is none
//!
//! The normalized form has no leading, trailing or duplicate slashes; the
//! empty string denotes the root.

use std::path::{Component, Path, PathBuf};

use crate::{Result, ShelfError};

/// Normalize a client-supplied relative path.
pub fn normalize(relative: &str) -> Result<String> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in relative.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if segments.pop().is_none() {
                    tracing::warn!(path = %relative, "Rejected path escaping the storage root");
                    return Err(ShelfError::InvalidPath(relative.to_string()));
                }
            }
            s if s.contains('\0') || s.contains('\\') => {
                tracing::warn!(path = %relative, "Rejected path with forbidden characters");
                return Err(ShelfError::InvalidPath(relative.to_string()));
            }
            s => segments.push(s),
        }
    }

    Ok(segments.join("/"))
}

/// Resolve a relative path against `root`.
///
/// The result is always `root` itself or a descendant of it.
pub fn resolve(root: &Path, relative: &str) -> Result<PathBuf> {
    let normalized = normalize(relative)?;
    let mut path = root.to_path_buf();
    for segment in normalized.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    Ok(path)
}

/// Compute the slash-separated relative path of `absolute` under `root`.
///
/// Returns `None` if `absolute` is not inside `root` or is not valid UTF-8.
pub fn relative_to(root: &Path, absolute: &Path) -> Option<String> {
    let rest = absolute.strip_prefix(root).ok()?;
    let mut segments = Vec::new();
    for component in rest.components() {
        match component {
            Component::Normal(name) => segments.push(name.to_str()?),
            _ => return None,
        }
    }
    Some(segments.join("/"))
}

/// Join a normalized parent path and a child name.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Last segment of a normalized path (empty for the root).
pub fn base_name(normalized: &str) -> &str {
    normalized.rsplit('/').next().unwrap_or("")
}

/// Parent of a normalized path (empty for top-level entries and the root).
pub fn parent(normalized: &str) -> &str {
    match normalized.rfind('/') {
        Some(idx) => &normalized[..idx],
        None => "",
    }
}

/// Validate a single name used for a new entry (folder, rename target, upload).
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(ShelfError::InvalidInput(format!("invalid name '{name}'")));
    }
    if name.contains('/') || name.contains('\\') || name.chars().any(char::is_control) {
        return Err(ShelfError::InvalidInput(format!(
            "name '{}' contains forbidden characters",
            name.escape_debug()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_separators() {
        assert_eq!(normalize("a//b///c").unwrap(), "a/b/c");
        assert_eq!(normalize("/a/b/").unwrap(), "a/b");
        assert_eq!(normalize("./a/./b").unwrap(), "a/b");
    }

    #[test]
    fn test_normalize_root_forms() {
        assert_eq!(normalize("").unwrap(), "");
        assert_eq!(normalize("/").unwrap(), "");
        assert_eq!(normalize(".").unwrap(), "");
        assert_eq!(normalize("a/..").unwrap(), "");
    }

    #[test]
    fn test_normalize_parent_inside_root() {
        assert_eq!(normalize("a/b/../c").unwrap(), "a/c");
        assert_eq!(normalize("a/../b").unwrap(), "b");
    }

    #[test]
    fn test_normalize_rejects_escape() {
        assert!(matches!(normalize(".."), Err(ShelfError::InvalidPath(_))));
        assert!(matches!(normalize("../etc/passwd"), Err(ShelfError::InvalidPath(_))));
        assert!(matches!(normalize("a/../../b"), Err(ShelfError::InvalidPath(_))));
        assert!(matches!(normalize("/../a"), Err(ShelfError::InvalidPath(_))));
    }

    #[test]
    fn test_normalize_rejects_forbidden_characters() {
        assert!(normalize("a\0b").is_err());
        assert!(normalize("a\\..\\..\\b").is_err());
    }

    #[test]
    fn test_resolve_stays_under_root() {
        let root = Path::new("/srv/images");

        assert_eq!(resolve(root, "").unwrap(), root);
        assert_eq!(resolve(root, "a/b.png").unwrap(), root.join("a").join("b.png"));
        assert!(resolve(root, "x/../y").unwrap().starts_with(root));
        assert!(matches!(resolve(root, "../x"), Err(ShelfError::InvalidPath(_))));
    }

    #[test]
    fn test_relative_round_trip() {
        let root = Path::new("/srv/images");

        for input in ["", "a", "a/b", "a//b/./c/", "x/../y/z.png"] {
            let resolved = resolve(root, input).unwrap();
            assert_eq!(
                relative_to(root, &resolved).unwrap(),
                normalize(input).unwrap()
            );
        }
    }

    #[test]
    fn test_relative_to_outside_root() {
        assert!(relative_to(Path::new("/srv/images"), Path::new("/etc/passwd")).is_none());
    }

    #[test]
    fn test_join_base_parent() {
        assert_eq!(join("", "a"), "a");
        assert_eq!(join("a/b", "c.png"), "a/b/c.png");

        assert_eq!(base_name("a/b/c.png"), "c.png");
        assert_eq!(base_name("top"), "top");
        assert_eq!(base_name(""), "");

        assert_eq!(parent("a/b/c.png"), "a/b");
        assert_eq!(parent("top"), "");
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("holiday").is_ok());
        assert!(validate_name("cat photo.png").is_ok());
        assert!(validate_name("日本語").is_ok());

        assert!(validate_name("").is_err());
        assert!(validate_name(".").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
        assert!(validate_name("tab\there").is_err());
    }
}
