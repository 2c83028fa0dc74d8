//! Configuration types for the tree lister

use std::path::PathBuf;

/// What, if anything, is appended after a file's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Annotation {
    None,
    /// Human-readable size.
    Size,
    /// Modification time, size and symbolic permissions.
    Details,
}

/// Configuration for one listing run. Immutable once the walk starts.
#[derive(Debug, Clone)]
pub struct ListerConfig {
    /// Base directory for relative paths used in pattern matching.
    pub root: PathBuf,
    /// Substrings a file's root-relative path must contain (any of them).
    /// Directories are never filtered by these.
    pub include_patterns: Vec<String>,
    /// Substrings that drop any entry whose root-relative path contains one.
    pub exclude_patterns: Vec<String>,
    pub dirs_only: bool,
    pub show_size: bool,
    pub list_details: bool,
    pub use_gitignore: bool,
    /// Levels below the root to descend (`None` for unlimited).
    pub max_depth: Option<usize>,
    /// Per-directory cap on shown entries, directories first (`None` for unlimited).
    pub max_items: Option<usize>,
}

impl ListerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Details supersede the plain size.
    pub fn annotation(&self) -> Annotation {
        if self.list_details {
            Annotation::Details
        } else if self.show_size {
            Annotation::Size
        } else {
            Annotation::None
        }
    }

    pub fn at_max_depth(&self, level: usize) -> bool {
        self.max_depth.is_some_and(|max| level >= max)
    }
}

impl Default for ListerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            dirs_only: false,
            show_size: false,
            list_details: false,
            use_gitignore: false,
            max_depth: None,
            max_items: None,
        }
    }
}
