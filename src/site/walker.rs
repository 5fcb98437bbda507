//! Depth-first file tree walk.
//!
//! Uses an explicit stack of pending directories instead of recursion, so
//! tree depth never turns into call stack depth.

use std::collections::VecDeque;

use crate::error::HostError;
use crate::site::provider::DirectoryProvider;

/// Lazy iterator over the relative paths of every file under a provider.
///
/// Files of one directory are yielded in provider order before any of its
/// subdirectories is expanded. Subdirectories are expanded last-pushed first.
pub struct FileWalker<'a> {
    provider: &'a dyn DirectoryProvider,
    pending_dirs: Vec<String>,
    ready_files: VecDeque<String>,
}

impl<'a> FileWalker<'a> {
    pub fn new(provider: &'a dyn DirectoryProvider) -> Self {
        Self {
            provider,
            pending_dirs: vec![String::new()],
            ready_files: VecDeque::new(),
        }
    }
}

impl Iterator for FileWalker<'_> {
    type Item = Result<String, HostError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(file) = self.ready_files.pop_front() {
                return Some(Ok(file));
            }

            let dir = self.pending_dirs.pop()?;
            let entries = match self.provider.list(&dir) {
                Ok(entries) => entries,
                Err(source) => {
                    let path = if dir.is_empty() { "/".to_string() } else { dir };
                    return Some(Err(HostError::Walk { path, source }));
                }
            };

            for entry in entries {
                if entry.is_directory {
                    self.pending_dirs.push(entry.relative_path);
                } else {
                    self.ready_files.push_back(entry.relative_path);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::provider::{FileEntry, MemoryDirectory};
    use std::io;

    fn walk(provider: &dyn DirectoryProvider) -> Vec<String> {
        FileWalker::new(provider).collect::<Result<_, _>>().unwrap()
    }

    #[test]
    fn test_walk_order() {
        let tree = MemoryDirectory::new()
            .with_file("/abc.html")
            .with_dir("/a")
            .with_file("/d&f.html")
            .with_file("/a/1.html")
            .with_file("/b/2.html")
            .with_file("/a/deep/3.html");

        assert_eq!(
            walk(&tree),
            vec!["/abc.html", "/d&f.html", "/b/2.html", "/a/1.html", "/a/deep/3.html"]
        );
    }

    #[test]
    fn test_empty_directories_yield_nothing() {
        let tree = MemoryDirectory::new().with_dir("/empty").with_dir("/also/empty");
        assert!(walk(&tree).is_empty());
        assert!(walk(&MemoryDirectory::new()).is_empty());
    }

    #[test]
    fn test_deep_tree_does_not_recurse() {
        let path: String = (0..2_000).map(|i| format!("/d{}", i)).collect::<String>() + "/leaf.html";
        let tree = MemoryDirectory::new().with_file(&path);
        assert_eq!(walk(&tree), vec![path]);
    }

    struct Failing;

    impl DirectoryProvider for Failing {
        fn list(&self, dir: &str) -> io::Result<Vec<FileEntry>> {
            if dir.is_empty() {
                Ok(vec![
                    FileEntry { relative_path: "/ok.html".into(), is_directory: false },
                    FileEntry { relative_path: "/locked".into(), is_directory: true },
                ])
            } else {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            }
        }
    }

    #[test]
    fn test_listing_error_names_directory() {
        let mut walker = FileWalker::new(&Failing);
        assert_eq!(walker.next().unwrap().unwrap(), "/ok.html");
        match walker.next() {
            Some(Err(HostError::Walk { path, .. })) => assert_eq!(path, "/locked"),
            other => panic!("expected walk error, got {:?}", other.map(|r| r.is_ok())),
        }
        assert!(walker.next().is_none());
    }
}
