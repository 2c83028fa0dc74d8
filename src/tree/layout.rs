//! Sibling ordering, truncation and connector arithmetic for one directory

use super::entry::Entry;

pub const BRANCH: &str = "├── ";
pub const LAST_BRANCH: &str = "└── ";
const CONTINUATION: &str = "│   ";
const BLANK: &str = "    ";

/// Box-drawing glyph pair placed before an entry's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// `├── `, more siblings (or a truncation summary) follow.
    Branch,
    /// `└── `, the final line of the directory's section.
    Last,
}

impl Connector {
    /// Connector for the entry at `idx` of `count` shown entries.
    ///
    /// A pending truncation summary is the true last line, so no entry is
    /// `Last` while `truncated > 0`.
    pub fn for_position(idx: usize, count: usize, truncated: usize) -> Self {
        if idx + 1 == count && truncated == 0 {
            Connector::Last
        } else {
            Connector::Branch
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Connector::Branch => BRANCH,
            Connector::Last => LAST_BRANCH,
        }
    }

    /// Prefix for the children of an entry drawn with this connector.
    pub fn child_prefix(self, prefix: &str) -> String {
        match self {
            Connector::Branch => format!("{}{}", prefix, CONTINUATION),
            Connector::Last => format!("{}{}", prefix, BLANK),
        }
    }
}

/// Display plan for one directory: what is shown and how much is hidden.
#[derive(Debug)]
pub struct DirPlan {
    /// Directories first, then files, each in sorted order.
    pub shown: Vec<Entry>,
    /// Filtered entries left out by the per-directory cap.
    pub truncated: usize,
}

impl DirPlan {
    /// Split filtered, sorted entries into directories and the rest, then
    /// apply `max_items` with directories taking priority.
    pub fn build(filtered: Vec<Entry>, dirs_only: bool, max_items: Option<usize>) -> Self {
        let total = filtered.len();
        let (mut dirs, mut files): (Vec<Entry>, Vec<Entry>) =
            filtered.into_iter().partition(Entry::is_dir);
        if dirs_only {
            files.clear();
        }

        if let Some(max) = max_items {
            dirs.truncate(max);
            files.truncate(max.saturating_sub(dirs.len()));
        }

        let mut shown = dirs;
        shown.append(&mut files);
        let truncated = total - shown.len();

        Self { shown, truncated }
    }

    pub fn connector(&self, idx: usize) -> Connector {
        Connector::for_position(idx, self.shown.len(), self.truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::entry::EntryKind;
    use std::path::PathBuf;

    fn entries(specs: &[(&str, EntryKind)]) -> Vec<Entry> {
        specs
            .iter()
            .map(|(name, kind)| Entry {
                name: name.to_string(),
                path: PathBuf::from("/t").join(name),
                kind: *kind,
                is_symlink: false,
                metadata: None,
            })
            .collect()
    }

    fn names(plan: &DirPlan) -> Vec<&str> {
        plan.shown.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_connector_last_only_without_truncation() {
        assert_eq!(Connector::for_position(0, 3, 0), Connector::Branch);
        assert_eq!(Connector::for_position(2, 3, 0), Connector::Last);
        assert_eq!(Connector::for_position(2, 3, 1), Connector::Branch);
        assert_eq!(Connector::for_position(0, 1, 0), Connector::Last);
    }

    #[test]
    fn test_child_prefix() {
        assert_eq!(Connector::Branch.child_prefix(""), "│   ");
        assert_eq!(Connector::Last.child_prefix(""), "    ");
        assert_eq!(Connector::Last.child_prefix("│   "), "│       ");
        assert_eq!(Connector::Branch.child_prefix("    "), "    │   ");
    }

    #[test]
    fn test_dirs_listed_before_files() {
        let plan = DirPlan::build(
            entries(&[
                ("a.txt", EntryKind::File),
                ("b", EntryKind::Dir),
                ("c.txt", EntryKind::File),
                ("d", EntryKind::Dir),
            ]),
            false,
            None,
        );
        assert_eq!(names(&plan), vec!["b", "d", "a.txt", "c.txt"]);
        assert_eq!(plan.truncated, 0);
        assert_eq!(plan.connector(3), Connector::Last);
    }

    #[test]
    fn test_max_items_with_files_only() {
        let plan = DirPlan::build(
            entries(&[
                ("a", EntryKind::File),
                ("b", EntryKind::File),
                ("c", EntryKind::File),
            ]),
            false,
            Some(1),
        );
        assert_eq!(names(&plan), vec!["a"]);
        assert_eq!(plan.truncated, 2);
        assert_eq!(plan.connector(0), Connector::Branch);
    }

    #[test]
    fn test_max_items_prioritizes_directories() {
        let plan = DirPlan::build(
            entries(&[
                ("f1", EntryKind::File),
                ("d1", EntryKind::Dir),
                ("d2", EntryKind::Dir),
                ("f2", EntryKind::File),
            ]),
            false,
            Some(3),
        );
        assert_eq!(names(&plan), vec!["d1", "d2", "f1"]);
        assert_eq!(plan.truncated, 1);

        let plan = DirPlan::build(
            entries(&[
                ("d1", EntryKind::Dir),
                ("d2", EntryKind::Dir),
                ("d3", EntryKind::Dir),
                ("f1", EntryKind::File),
            ]),
            false,
            Some(2),
        );
        assert_eq!(names(&plan), vec!["d1", "d2"]);
        assert_eq!(plan.truncated, 2);
    }

    #[test]
    fn test_max_items_zero_hides_everything() {
        let plan = DirPlan::build(
            entries(&[("d", EntryKind::Dir), ("f", EntryKind::File)]),
            false,
            Some(0),
        );
        assert!(plan.shown.is_empty());
        assert_eq!(plan.truncated, 2);
    }

    #[test]
    fn test_max_items_larger_than_listing() {
        let plan = DirPlan::build(
            entries(&[("d", EntryKind::Dir), ("f", EntryKind::File)]),
            false,
            Some(10),
        );
        assert_eq!(names(&plan), vec!["d", "f"]);
        assert_eq!(plan.truncated, 0);
    }

    #[test]
    fn test_other_entries_sort_with_files() {
        let plan = DirPlan::build(
            entries(&[("pipe", EntryKind::Other), ("d", EntryKind::Dir)]),
            false,
            None,
        );
        assert_eq!(names(&plan), vec!["d", "pipe"]);
    }

    #[test]
    fn test_empty_directory() {
        let plan = DirPlan::build(Vec::new(), false, Some(3));
        assert!(plan.shown.is_empty());
        assert_eq!(plan.truncated, 0);
    }
}
