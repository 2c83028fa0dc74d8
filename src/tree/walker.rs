//! TreeWalker - depth-first listing that streams one line per entry
//!
//! Each directory is read, sorted, filtered and planned before anything is
//! drawn, so connectors are known up front: a later truncation summary can
//! never turn an earlier sibling into the "last" one.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::output::{LineSink, Renderer};

use super::config::ListerConfig;
use super::entry::Entry;
use super::filter::EntryFilter;
use super::gitignore::{GitignoreFrame, IgnoreNode, IgnoreStack};
use super::layout::DirPlan;

/// Counts gathered during a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Directory lines shown.
    pub directories: usize,
    /// File (and other non-directory) lines shown.
    pub files: usize,
    /// Directories rendered as `[Permission Denied]`.
    pub denied: usize,
    /// Filtered entries hidden by the per-directory cap.
    pub hidden: usize,
}

/// Sequential, depth-first tree lister.
pub struct TreeWalker {
    config: ListerConfig,
    renderer: Renderer,
    interrupt: Option<Arc<AtomicBool>>,
}

impl TreeWalker {
    pub fn new(config: ListerConfig) -> Self {
        let renderer = Renderer::new(config.annotation());
        Self {
            config,
            renderer,
            interrupt: None,
        }
    }

    /// Abort with `ErrorKind::Interrupted` once `flag` is set.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn config(&self) -> &ListerConfig {
        &self.config
    }

    /// List `config.root` (the root itself is not printed).
    pub fn walk<S: LineSink>(&self, sink: &mut S) -> io::Result<WalkSummary> {
        let root = &self.config.root;
        let mut ancestors = vec![fs::canonicalize(root).unwrap_or_else(|_| root.clone())];
        let mut summary = WalkSummary::default();
        self.list_files(
            root,
            "",
            0,
            IgnoreStack::empty(),
            &mut ancestors,
            sink,
            &mut summary,
        )?;
        Ok(summary)
    }

    /// Emit the lines for `dir`'s entries at nesting `level`, recursing into
    /// shown subdirectories.
    ///
    /// `ancestors` holds the resolved paths of `dir` and every directory above
    /// it; the last one is `dir` itself.
    #[allow(clippy::too_many_arguments)]
    fn list_files<S: LineSink>(
        &self,
        dir: &Path,
        prefix: &str,
        level: usize,
        ignores: IgnoreStack<'_>,
        ancestors: &mut Vec<PathBuf>,
        sink: &mut S,
        summary: &mut WalkSummary,
    ) -> io::Result<()> {
        // Deeper levels are invisible, not marked as truncated.
        if self.config.at_max_depth(level) {
            return Ok(());
        }
        self.check_interrupt()?;
        log::debug!("listing {} (level {})", dir.display(), level);

        let names = match read_sorted_names(dir) {
            Ok(names) => names,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                log::debug!("permission denied: {}", dir.display());
                summary.denied += 1;
                return sink.emit(&self.renderer.permission_denied(prefix));
            }
            Err(e) => {
                return Err(io::Error::new(
                    e.kind(),
                    format!("cannot list {}: {}", dir.display(), e),
                ));
            }
        };

        // Lives until this call returns, which pops the frame on every path.
        let node;
        let ignores = match self.load_gitignore(dir) {
            Some(frame) => {
                node = IgnoreNode::new(frame, ignores);
                node.stack()
            }
            None => ignores,
        };

        let filter = EntryFilter::new(&self.config);
        let filtered: Vec<Entry> = names
            .iter()
            .map(|name| Entry::read(dir, name))
            .filter(|entry| filter.should_include(entry, ignores))
            .collect();

        let plan = DirPlan::build(filtered, self.config.dirs_only, self.config.max_items);

        for (idx, entry) in plan.shown.iter().enumerate() {
            self.check_interrupt()?;
            let connector = plan.connector(idx);
            sink.emit(&self.renderer.render_entry(entry, prefix, connector))?;

            if entry.is_dir() {
                summary.directories += 1;
                let Some(resolved) = resolve_child(entry, ancestors) else {
                    continue;
                };
                ancestors.push(resolved);
                let listed = self.list_files(
                    &entry.path,
                    &connector.child_prefix(prefix),
                    level + 1,
                    ignores,
                    ancestors,
                    sink,
                    summary,
                );
                ancestors.pop();
                listed?;
            } else {
                summary.files += 1;
            }
        }

        if plan.truncated > 0 {
            summary.hidden += plan.truncated;
            sink.emit(&self.renderer.truncation(prefix, plan.truncated))?;
        }

        Ok(())
    }

    fn load_gitignore(&self, dir: &Path) -> Option<GitignoreFrame> {
        if self.config.use_gitignore {
            GitignoreFrame::load(dir)
        } else {
            None
        }
    }

    fn check_interrupt(&self) -> io::Result<()> {
        match &self.interrupt {
            Some(flag) if flag.load(Ordering::SeqCst) => Err(io::Error::new(
                io::ErrorKind::Interrupted,
                "listing interrupted",
            )),
            _ => Ok(()),
        }
    }
}

/// Resolved path of a directory entry, or `None` when entering it would
/// revisit one of its own ancestors through a symlink.
fn resolve_child(entry: &Entry, ancestors: &[PathBuf]) -> Option<PathBuf> {
    let parent = ancestors.last()?;
    match entry.resolved_path(parent) {
        Ok(resolved) if ancestors.contains(&resolved) => {
            log::debug!("not following {}: symlink cycle", entry.path.display());
            None
        }
        Ok(resolved) => Some(resolved),
        Err(e) => {
            log::debug!("cannot resolve {}: {}", entry.path.display(), e);
            None
        }
    }
}

/// Entry names of `dir`, sorted by their raw bytes.
fn read_sorted_names(dir: &Path) -> io::Result<Vec<OsString>> {
    let mut names = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<io::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}
