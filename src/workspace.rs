use std::path::{Component, Path, PathBuf};

use tracing::debug;

/// Walk upward from `start` and return the first directory containing `marker`.
///
/// `start` is canonicalized first (symlinks resolved), falling back to its
/// lexically normalized absolute form when it cannot be canonicalized. Every
/// level up to and including the filesystem root is checked. Returns `None`
/// when no ancestor holds the marker; never errors and never caches.
pub fn find_project_root(start: &Path, marker: &str) -> Option<PathBuf> {
    let mut current = match start.canonicalize() {
        Ok(p) => p,
        Err(_) => lexical_absolute(start)?,
    };

    loop {
        if current.join(marker).is_file() {
            debug!(root = %current.display(), marker, "located project root");
            return Some(current);
        }
        if !current.pop() {
            debug!(start = %start.display(), marker, "no project root found");
            return None;
        }
    }
}

/// Absolute form of `path` with `.` and `..` resolved without touching the filesystem.
fn lexical_absolute(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in std::path::absolute(path).ok()?.components() {
        match component {
            Component::ParentDir => {
                normalized.pop();
            }
            Component::CurDir => {}
            other => normalized.push(other),
        }
    }
    Some(normalized)
}

/// [`find_project_root`] starting from the process's current directory.
pub fn resolve_from_current_dir(marker: &str) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_project_root(&cwd, marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const MARKER: &str = "Cargo.toml";

    fn write_manifest(dir: &Path) {
        fs::write(
            dir.join(MARKER),
            "[package]\nname = \"fixture\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
    }

    #[test]
    fn test_marker_in_start_dir() {
        let temp_dir = TempDir::new().unwrap();
        write_manifest(temp_dir.path());

        let root = find_project_root(temp_dir.path(), MARKER);
        assert_eq!(root, Some(temp_dir.path().canonicalize().unwrap()));
    }

    #[test]
    fn test_marker_three_levels_up() {
        let temp_dir = TempDir::new().unwrap();
        write_manifest(temp_dir.path());
        let nested = temp_dir.path().join("crates").join("core").join("src");
        fs::create_dir_all(&nested).unwrap();

        let root = find_project_root(&nested, MARKER);
        assert_eq!(root, Some(temp_dir.path().canonicalize().unwrap()));
    }

    #[test]
    fn test_nearest_marker_wins() {
        let temp_dir = TempDir::new().unwrap();
        write_manifest(temp_dir.path());
        let member = temp_dir.path().join("member");
        let src = member.join("src");
        fs::create_dir_all(&src).unwrap();
        write_manifest(&member);

        let root = find_project_root(&src, MARKER);
        assert_eq!(root, Some(member.canonicalize().unwrap()));
    }

    #[test]
    fn test_no_marker_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested, "no-such-marker-file.toml"), None);
    }

    #[test]
    fn test_marker_directory_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let marker_dir = "marker-is-a-dir.toml";
        fs::create_dir(temp_dir.path().join(marker_dir)).unwrap();

        assert_eq!(find_project_root(temp_dir.path(), marker_dir), None);
    }

    #[test]
    fn test_missing_start_dir_still_walks_ancestors() {
        let temp_dir = TempDir::new().unwrap();
        write_manifest(temp_dir.path());
        let missing = temp_dir.path().join("does").join("not").join("exist");

        let root = find_project_root(&missing, MARKER).unwrap();
        assert!(root.join(MARKER).is_file());
    }

    #[test]
    fn test_missing_start_dir_with_parent_components() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().canonicalize().unwrap();
        write_manifest(&base);
        let nested_member = base.join("a").join("b");
        fs::create_dir_all(&nested_member).unwrap();
        write_manifest(&nested_member);

        // Resolves to <base>/a/missing, whose ancestors are <base>/a and <base>.
        let start = nested_member.join("..").join("missing");
        assert_eq!(find_project_root(&start, MARKER), Some(base));
    }

    #[test]
    fn test_lexical_absolute_drops_dot_components() {
        let normalized = lexical_absolute(Path::new("/srv/app/./crates/../src")).unwrap();
        assert_eq!(normalized, PathBuf::from("/srv/app/src"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_resolved_before_walking() {
        let project = TempDir::new().unwrap();
        write_manifest(project.path());
        let inner = project.path().join("src");
        fs::create_dir(&inner).unwrap();

        let elsewhere = TempDir::new().unwrap();
        let link = elsewhere.path().join("link");
        std::os::unix::fs::symlink(&inner, &link).unwrap();

        let root = find_project_root(&link, MARKER);
        assert_eq!(root, Some(project.path().canonicalize().unwrap()));
    }

    #[test]
    fn test_resolve_from_current_dir_finds_this_crate() {
        let root = resolve_from_current_dir(MARKER).unwrap();
        assert!(root.join(MARKER).is_file());
    }
}
