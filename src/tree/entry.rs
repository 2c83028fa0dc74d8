//! A single directory entry, read once

use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

/// What an entry resolves to after following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    /// Sockets, devices, broken symlinks and anything else that is neither.
    Other,
}

/// An entry found directly inside a listed directory.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// The entry itself is a symbolic link (its kind is that of the target).
    pub is_symlink: bool,
    /// Metadata of the target, when it could be read.
    pub metadata: Option<Metadata>,
}

impl Entry {
    /// Stat `dir/name`, following symlinks. Failures degrade to `EntryKind::Other`.
    pub fn read(dir: &Path, name: &OsString) -> Self {
        let path = dir.join(name);
        let metadata = path.metadata().ok();
        let kind = match &metadata {
            Some(m) if m.is_dir() => EntryKind::Dir,
            Some(m) if m.is_file() => EntryKind::File,
            _ => EntryKind::Other,
        };
        let is_symlink = path
            .symlink_metadata()
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);

        Self {
            name: name.to_string_lossy().to_string(),
            path,
            kind,
            is_symlink,
            metadata,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Where this entry really lives, given the resolved path of the
    /// directory holding it. Only symlinks need a filesystem lookup.
    pub fn resolved_path(&self, parent_resolved: &Path) -> io::Result<PathBuf> {
        if self.is_symlink {
            return fs::canonicalize(&self.path);
        }
        match self.path.file_name() {
            Some(name) => Ok(parent_resolved.join(name)),
            None => fs::canonicalize(&self.path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_kinds() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("file.txt"), "hello").unwrap();

        let sub = Entry::read(dir.path(), &OsString::from("sub"));
        assert_eq!(sub.kind, EntryKind::Dir);
        assert!(!sub.is_symlink);

        let file = Entry::read(dir.path(), &OsString::from("file.txt"));
        assert_eq!(file.kind, EntryKind::File);
        assert_eq!(file.metadata.as_ref().map(|m| m.len()), Some(5));
        assert_eq!(file.name, "file.txt");
        assert_eq!(file.path, dir.path().join("file.txt"));
    }

    #[test]
    fn test_read_missing_entry_is_other() {
        let dir = TempDir::new().unwrap();
        let ghost = Entry::read(dir.path(), &OsString::from("ghost"));
        assert_eq!(ghost.kind, EntryKind::Other);
        assert!(ghost.metadata.is_none());
        assert!(!ghost.is_symlink);
    }

    #[test]
    fn test_resolved_path_of_plain_entry_joins_parent() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let sub = Entry::read(dir.path(), &OsString::from("sub"));
        let parent = Path::new("/resolved/parent");
        assert_eq!(sub.resolved_path(parent).unwrap(), parent.join("sub"));
    }

    #[test]
    #[cfg(unix)]
    fn test_resolved_path_of_symlink_is_its_target() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let link = Entry::read(dir.path(), &OsString::from("link"));
        assert!(link.is_dir());
        assert!(link.is_symlink);
        let expected = fs::canonicalize(dir.path().join("real")).unwrap();
        assert_eq!(link.resolved_path(Path::new("/unused")).unwrap(), expected);
    }

    #[test]
    #[cfg(unix)]
    fn test_broken_symlink_is_other() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink("nowhere", dir.path().join("broken")).unwrap();

        let broken = Entry::read(dir.path(), &OsString::from("broken"));
        assert_eq!(broken.kind, EntryKind::Other);
        assert!(broken.is_symlink);
    }
}
