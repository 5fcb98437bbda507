//! Resolution of the site root against the content root.

use std::path::{Component, Path, PathBuf};

use crate::config::validation::ValidationError;

/// Validated relative location of the exported site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootOptions {
    root_path: PathBuf,
}

impl RootOptions {
    /// Validate `root_path`. Empty means "the content root itself".
    ///
    /// Rooted paths (`/srv`, `C:\srv`, `\srv`) and paths that climb above the
    /// content root with `..` are rejected.
    pub fn new(root_path: &str) -> Result<Self, ValidationError> {
        let path = Path::new(root_path);
        if path.has_root() || path.is_absolute() || root_path.starts_with(|c| c == '/' || c == '\\') {
            return Err(ValidationError::RootedRootPath(root_path.to_string()));
        }

        let mut depth: usize = 0;
        for component in path.components() {
            match component {
                Component::Normal(_) => depth += 1,
                Component::CurDir => {}
                Component::ParentDir => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| ValidationError::EscapingRootPath(root_path.to_string()))?;
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(ValidationError::RootedRootPath(root_path.to_string()));
                }
            }
        }

        Ok(Self {
            root_path: path.to_path_buf(),
        })
    }

    /// Physical directory the site is served from.
    pub fn resolve(&self, content_root: &Path) -> PathBuf {
        content_root.join(&self.root_path)
    }
}
