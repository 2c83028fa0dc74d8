//! Per-entry inclusion rules

use super::config::ListerConfig;
use super::entry::Entry;
use super::gitignore::IgnoreStack;
use super::utils::relative_str;

/// Decides whether an entry is listed.
///
/// Rules short-circuit in order: directories-only mode, exclude patterns
/// (root-relative), active gitignore frames (frame-relative, outermost
/// first), then include patterns for non-directories.
pub struct EntryFilter<'a> {
    config: &'a ListerConfig,
}

impl<'a> EntryFilter<'a> {
    pub fn new(config: &'a ListerConfig) -> Self {
        Self { config }
    }

    pub fn should_include(&self, entry: &Entry, ignores: IgnoreStack<'_>) -> bool {
        if self.config.dirs_only && !entry.is_dir() {
            return false;
        }

        let relative = relative_str(&entry.path, &self.config.root);
        if contains_any(&relative, &self.config.exclude_patterns) {
            return false;
        }

        for frame in ignores.frames() {
            if frame.matches(&relative_str(&entry.path, &frame.base)) {
                return false;
            }
        }

        // Directories stay so files beneath them can still match.
        if !self.config.include_patterns.is_empty() && !entry.is_dir() {
            return contains_any(&relative, &self.config.include_patterns);
        }

        true
    }
}

fn contains_any(haystack: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|p| haystack.contains(p.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::entry::EntryKind;
    use crate::tree::gitignore::{GitignoreFrame, IgnoreNode};
    use std::path::PathBuf;

    fn entry(path: &str, kind: EntryKind) -> Entry {
        let path = PathBuf::from(path);
        Entry {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            path,
            kind,
            is_symlink: false,
            metadata: None,
        }
    }

    fn config() -> ListerConfig {
        ListerConfig::new("/proj")
    }

    #[test]
    fn test_everything_included_by_default() {
        let config = config();
        let filter = EntryFilter::new(&config);
        let none = IgnoreStack::empty();
        assert!(filter.should_include(&entry("/proj/a.txt", EntryKind::File), none));
        assert!(filter.should_include(&entry("/proj/sub", EntryKind::Dir), none));
        assert!(filter.should_include(&entry("/proj/sock", EntryKind::Other), none));
    }

    #[test]
    fn test_dirs_only_drops_non_directories() {
        let config = ListerConfig {
            dirs_only: true,
            ..config()
        };
        let filter = EntryFilter::new(&config);
        let none = IgnoreStack::empty();
        assert!(filter.should_include(&entry("/proj/sub", EntryKind::Dir), none));
        assert!(!filter.should_include(&entry("/proj/a.txt", EntryKind::File), none));
        assert!(!filter.should_include(&entry("/proj/broken", EntryKind::Other), none));
    }

    #[test]
    fn test_exclude_matches_root_relative_path() {
        let config = ListerConfig {
            exclude_patterns: vec!["build".to_string()],
            ..config()
        };
        let filter = EntryFilter::new(&config);
        let none = IgnoreStack::empty();
        assert!(!filter.should_include(&entry("/proj/build", EntryKind::Dir), none));
        assert!(!filter.should_include(&entry("/proj/src/build.rs", EntryKind::File), none));
        // The root's own path is not part of the match.
        let config = ListerConfig {
            exclude_patterns: vec!["proj".to_string()],
            ..ListerConfig::new("/proj")
        };
        let filter = EntryFilter::new(&config);
        assert!(filter.should_include(&entry("/proj/main.rs", EntryKind::File), none));
    }

    #[test]
    fn test_include_applies_to_files_only() {
        let config = ListerConfig {
            include_patterns: vec![".txt".to_string()],
            ..config()
        };
        let filter = EntryFilter::new(&config);
        let none = IgnoreStack::empty();
        assert!(filter.should_include(&entry("/proj/a.txt", EntryKind::File), none));
        assert!(!filter.should_include(&entry("/proj/b.log", EntryKind::File), none));
        assert!(filter.should_include(&entry("/proj/sub", EntryKind::Dir), none));
        assert!(filter.should_include(&entry("/proj/sub/c.txt", EntryKind::File), none));
    }

    #[test]
    fn test_exclude_beats_include() {
        let config = ListerConfig {
            include_patterns: vec![".txt".to_string()],
            exclude_patterns: vec!["secret".to_string()],
            ..config()
        };
        let filter = EntryFilter::new(&config);
        let none = IgnoreStack::empty();
        assert!(!filter.should_include(&entry("/proj/secret.txt", EntryKind::File), none));
        assert!(!filter.should_include(&entry("/proj/secret", EntryKind::Dir), none));
    }

    #[test]
    fn test_gitignore_frames_match_relative_to_their_base() {
        let config = config();
        let filter = EntryFilter::new(&config);

        let outer = IgnoreNode::new(
            GitignoreFrame {
                base: PathBuf::from("/proj"),
                patterns: vec![".log".to_string()],
            },
            IgnoreStack::empty(),
        );
        let inner = IgnoreNode::new(
            GitignoreFrame {
                base: PathBuf::from("/proj/sub"),
                patterns: vec!["tmp".to_string()],
            },
            outer.stack(),
        );

        let stack = inner.stack();
        assert!(!filter.should_include(&entry("/proj/sub/debug.log", EntryKind::File), stack));
        assert!(!filter.should_include(&entry("/proj/sub/x.tmp", EntryKind::File), stack));
        assert!(filter.should_include(&entry("/proj/sub/keep.rs", EntryKind::File), stack));

        // Matching is relative to the frame's base, so the base's own name never matches.
        let frame_only = IgnoreNode::new(
            GitignoreFrame {
                base: PathBuf::from("/proj/sub"),
                patterns: vec!["sub".to_string()],
            },
            IgnoreStack::empty(),
        );
        assert!(filter.should_include(
            &entry("/proj/sub/file.rs", EntryKind::File),
            frame_only.stack()
        ));
    }
}
