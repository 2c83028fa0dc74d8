//! `.gitignore` fragments and the scoped stack of active frames
//!
//! Patterns are not real gitignore globs: `*` and `/` are stripped and the
//! remainder is matched as a substring of the path relative to the directory
//! holding the `.gitignore`. Comments, negations and blank lines are dropped.

use std::fs;
use std::path::{Path, PathBuf};

pub const GITIGNORE_FILE: &str = ".gitignore";

/// Patterns loaded from one `.gitignore`, active for that directory's subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitignoreFrame {
    pub base: PathBuf,
    pub patterns: Vec<String>,
}

impl GitignoreFrame {
    /// Load the frame for `dir` if a `.gitignore` exists directly in it.
    ///
    /// An unreadable or non-UTF-8 file still yields a frame, with no patterns.
    pub fn load(dir: &Path) -> Option<Self> {
        let file = dir.join(GITIGNORE_FILE);
        if !file.exists() {
            return None;
        }

        let patterns = match fs::read_to_string(&file) {
            Ok(content) => parse_patterns(&content),
            Err(e) => {
                log::debug!("ignoring unreadable {}: {}", file.display(), e);
                Vec::new()
            }
        };
        log::debug!(
            "loaded {} gitignore pattern(s) from {}",
            patterns.len(),
            file.display()
        );

        Some(Self {
            base: dir.to_path_buf(),
            patterns,
        })
    }

    /// Check a path (relative to `base`) against this frame's patterns.
    pub fn matches(&self, relative: &str) -> bool {
        self.patterns.iter().any(|p| relative.contains(p.as_str()))
    }
}

/// Clean `.gitignore` content into substring patterns.
pub fn parse_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .map(|line| line.replace(['*', '/'], ""))
        .filter(|cleaned| !cleaned.is_empty())
        .collect()
}

/// Persistent stack of gitignore frames.
///
/// Each recursion level that finds a `.gitignore` pushes a node that lives in
/// its own stack frame, so the push is undone on every exit path when the
/// call returns. Copying the stack is free.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreStack<'a> {
    top: Option<&'a IgnoreNode<'a>>,
}

/// A frame linked onto the stack it extends.
#[derive(Debug)]
pub struct IgnoreNode<'a> {
    frame: GitignoreFrame,
    parent: IgnoreStack<'a>,
}

impl<'a> IgnoreNode<'a> {
    pub fn new(frame: GitignoreFrame, parent: IgnoreStack<'a>) -> Self {
        Self { frame, parent }
    }

    /// The stack with this node on top.
    pub fn stack(&self) -> IgnoreStack<'_> {
        IgnoreStack { top: Some(self) }
    }
}

impl<'a> IgnoreStack<'a> {
    pub fn empty() -> Self {
        Self { top: None }
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut cursor = self.top;
        while let Some(node) = cursor {
            depth += 1;
            cursor = node.parent.top;
        }
        depth
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Active frames, outermost first.
    pub fn frames(&self) -> Vec<&'a GitignoreFrame> {
        let mut frames = Vec::new();
        let mut cursor = self.top;
        while let Some(node) = cursor {
            frames.push(&node.frame);
            cursor = node.parent.top;
        }
        frames.reverse();
        frames
    }
}
