//! Directory providers.
//!
//! The walker only needs "list the children of this directory". Paths are
//! relative to the provider's root, use `/` as separator, and begin with `/`
//! (the root itself is the empty string).

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{HostError, HostResult};

/// One child returned by [`DirectoryProvider::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the provider root, e.g. `/post/[pid].html`.
    pub relative_path: String,
    pub is_directory: bool,
}

/// Source of a directory tree.
pub trait DirectoryProvider: Send + Sync {
    /// List the immediate children of `dir` in the provider's natural order.
    fn list(&self, dir: &str) -> io::Result<Vec<FileEntry>>;
}

fn child_path(dir: &str, name: &str) -> String {
    format!("{}/{}", dir, name)
}

/// A directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    root: PathBuf,
}

impl LocalDirectory {
    /// Open `root`, failing if it is not an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> HostResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(HostError::MissingRoot(root));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when `physical` resolves to one of its own ancestors under the
    /// root, i.e. a symlink loops back up the tree.
    fn loops_back(&self, physical: &Path) -> io::Result<bool> {
        let target = fs::canonicalize(physical)?;
        for ancestor in physical.ancestors().skip(1) {
            if !ancestor.starts_with(&self.root) {
                break;
            }
            if fs::canonicalize(ancestor)? == target {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl DirectoryProvider for LocalDirectory {
    fn list(&self, dir: &str) -> io::Result<Vec<FileEntry>> {
        let physical = self.root.join(dir.trim_start_matches('/'));
        if !dir.is_empty() && self.loops_back(&physical)? {
            tracing::warn!(path = %physical.display(), "Skipping directory already visited (symlink cycle)");
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        for entry in fs::read_dir(&physical)? {
            let entry = entry?;
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                tracing::warn!(
                    path = %entry.path().display(),
                    "Skipping entry with a non UTF-8 name"
                );
                continue;
            };

            // Follow symlinks so a linked directory is walked like a real one.
            let mut file_type = entry.file_type()?;
            if file_type.is_symlink() {
                match fs::metadata(entry.path()) {
                    Ok(meta) => file_type = meta.file_type(),
                    Err(e) => {
                        tracing::warn!(path = %entry.path().display(), error = %e, "Skipping broken symlink");
                        continue;
                    }
                }
            }

            entries.push(FileEntry {
                relative_path: child_path(dir, &name),
                is_directory: file_type.is_dir(),
            });
        }

        Ok(entries)
    }
}

/// An in-memory tree, for embedded bundles and tests.
///
/// Children are reported in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    children: HashMap<String, Vec<FileEntry>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating any missing parent directories.
    pub fn with_file(mut self, path: &str) -> Self {
        self.insert(path, false);
        self
    }

    /// Add an (initially empty) directory.
    pub fn with_dir(mut self, path: &str) -> Self {
        self.insert(path, true);
        self
    }

    fn insert(&mut self, path: &str, is_directory: bool) {
        let mut parent = String::new();
        let mut names = path.trim_start_matches('/').split('/').peekable();

        while let Some(name) = names.next() {
            let relative_path = child_path(&parent, name);
            let is_last = names.peek().is_none();
            let siblings = self.children.entry(parent).or_default();

            if !siblings.iter().any(|e| e.relative_path == relative_path) {
                siblings.push(FileEntry {
                    relative_path: relative_path.clone(),
                    is_directory: !is_last || is_directory,
                });
            }
            parent = relative_path;
        }

        if is_directory {
            self.children.entry(parent).or_default();
        }
    }
}

impl DirectoryProvider for MemoryDirectory {
    fn list(&self, dir: &str) -> io::Result<Vec<FileEntry>> {
        if dir.is_empty() {
            return Ok(self.children.get(dir).cloned().unwrap_or_default());
        }
        self.children.get(dir).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no directory '{}'", dir))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_directory_listing() {
        let tree = MemoryDirectory::new()
            .with_file("/abc.html")
            .with_file("/nested/123.html")
            .with_file("/nested/234.jpg")
            .with_dir("/empty");

        let root = tree.list("").unwrap();
        assert_eq!(
            root,
            vec![
                FileEntry { relative_path: "/abc.html".into(), is_directory: false },
                FileEntry { relative_path: "/nested".into(), is_directory: true },
                FileEntry { relative_path: "/empty".into(), is_directory: true },
            ]
        );

        let nested: Vec<_> = tree
            .list("/nested")
            .unwrap()
            .into_iter()
            .map(|e| e.relative_path)
            .collect();
        assert_eq!(nested, vec!["/nested/123.html", "/nested/234.jpg"]);

        assert!(tree.list("/empty").unwrap().is_empty());
        assert!(tree.list("/missing").is_err());
    }

    #[test]
    fn test_local_directory_requires_existing_dir() {
        let err = LocalDirectory::open("/definitely/not/a/real/dir").unwrap_err();
        assert!(matches!(err, HostError::MissingRoot(_)));
    }

    #[test]
    fn test_local_directory_lists_children() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "home").unwrap();
        fs::create_dir(dir.path().join("post")).unwrap();
        fs::write(dir.path().join("post").join("[pid].html"), "pid").unwrap();

        let provider = LocalDirectory::open(dir.path()).unwrap();

        let mut root = provider.list("").unwrap();
        root.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        assert_eq!(
            root,
            vec![
                FileEntry { relative_path: "/index.html".into(), is_directory: false },
                FileEntry { relative_path: "/post".into(), is_directory: true },
            ]
        );

        let post = provider.list("/post").unwrap();
        assert_eq!(post[0].relative_path, "/post/[pid].html");
    }

    #[cfg(unix)]
    #[test]
    fn test_local_directory_stops_at_symlink_cycle() {
        use std::os::unix::fs::symlink;

        use crate::site::walker::FileWalker;

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "home").unwrap();
        fs::create_dir(dir.path().join("post")).unwrap();
        fs::write(dir.path().join("post").join("a.html"), "a").unwrap();
        symlink(dir.path(), dir.path().join("post").join("up")).unwrap();
        symlink(dir.path().join("post"), dir.path().join("again")).unwrap();

        let provider = LocalDirectory::open(dir.path()).unwrap();
        assert!(provider.list("/post/up").unwrap().is_empty());

        let mut files: Vec<String> = FileWalker::new(&provider)
            .collect::<Result<_, _>>()
            .unwrap();
        files.sort();
        assert_eq!(files, vec!["/again/a.html", "/index.html", "/post/a.html"]);
    }
}
