//! Source tree enumeration
//!
//! Best-effort walk of a project tree: dot-directories and a configured
//! set of dependency/build directories are pruned, unreadable entries are
//! skipped without failing the walk.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never descended into, independent of configuration
pub const DEFAULT_SKIP_DIRS: &[&str] = &["node_modules", "target", "dist", "build", "coverage"];

/// Walks a file tree and yields files matching an extension set
#[derive(Debug, Clone)]
pub struct SourceWalker {
    root: PathBuf,
    extensions: Vec<String>,
    skip_dirs: Vec<String>,
}

impl SourceWalker {
    /// Create a walker over `root` that yields files with one of the
    /// given extensions (no leading dot)
    pub fn new(root: &Path, extensions: &[&str]) -> Self {
        Self {
            root: root.to_path_buf(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Replace the skipped directory set
    pub fn with_skip_dirs(mut self, dirs: &[String]) -> Self {
        self.skip_dirs = dirs.to_vec();
        self
    }

    /// Enumerate matching files. Unreadable subtrees are skipped; the
    /// walk never fails.
    pub fn walk(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |e| {
                if !e.file_type().is_dir() {
                    return true;
                }
                if e.depth() == 0 {
                    return true;
                }
                let name = e.file_name().to_str().unwrap_or("");
                !name.starts_with('.') && !self.skip_dirs.iter().any(|d| d == name)
            })
            .filter_map(|entry| entry.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(move |path| self.matches_extension(path))
    }

    fn matches_extension(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.extensions.iter().any(|allowed| allowed == ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_walk_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("index.ts"));
        touch(&dir.path().join("readme.md"));
        touch(&dir.path().join("src/worker.js"));

        let walker = SourceWalker::new(dir.path(), &["ts", "js"]);
        let mut files: Vec<_> = walker.walk().collect();
        files.sort();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| {
            let ext = p.extension().unwrap().to_str().unwrap();
            ext == "ts" || ext == "js"
        }));
    }

    #[test]
    fn test_walk_skips_dependency_and_dot_dirs() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("src/index.ts"));
        touch(&dir.path().join("node_modules/pkg/index.ts"));
        touch(&dir.path().join(".git/hooks/pre-commit.ts"));
        touch(&dir.path().join(".wrangler/tmp/cache.ts"));

        let walker = SourceWalker::new(dir.path(), &["ts"]);
        let files: Vec<_> = walker.walk().collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/index.ts"));
    }

    #[test]
    fn test_walk_empty_tree() {
        let dir = tempfile::tempdir().unwrap();
        let walker = SourceWalker::new(dir.path(), &["ts"]);
        assert_eq!(walker.walk().count(), 0);
    }

    #[test]
    fn test_custom_skip_dirs() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("vendor/lib.ts"));
        touch(&dir.path().join("src/main.ts"));

        let walker = SourceWalker::new(dir.path(), &["ts"])
            .with_skip_dirs(&["vendor".to_string()]);
        let files: Vec<_> = walker.walk().collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/main.ts"));
    }
}
