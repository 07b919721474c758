use arkify_core::paths::ARKIFY_DIR;
use std::path::{Path, PathBuf};

/// Resolve the project root that holds `.arkify/`.
///
/// Priority:
/// 1. `--root` flag / `ARKIFY_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.arkify/`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_upward(&cwd, ARKIFY_DIR)
        .or_else(|| find_upward(&cwd, ".git"))
        .unwrap_or(cwd)
}

fn find_upward(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn finds_marker_in_ancestor() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".arkify")).unwrap();
        let subdir = dir.path().join("posts/2025");
        std::fs::create_dir_all(&subdir).unwrap();

        assert_eq!(find_upward(&subdir, ARKIFY_DIR), Some(dir.path().to_path_buf()));
        assert_eq!(find_upward(&subdir, ".no-such-marker-dir"), None);
    }
}
