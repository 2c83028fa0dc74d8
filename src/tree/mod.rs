//! Directory tree walking logic
//!
//! `TreeWalker` lists a directory depth-first and streams one rendered line
//! per entry into a `LineSink`. Memory use is O(depth): each level holds only
//! its own sorted sibling list and the gitignore frames of its ancestors.
//!
//! - `config` - what to show (`ListerConfig`)
//! - `entry` - one directory entry and its metadata
//! - `gitignore` - `.gitignore` fragments and the scoped frame stack
//! - `filter` - include/exclude/gitignore decisions
//! - `layout` - ordering, truncation and connectors for one directory
//! - `walker` - the recursive traversal

mod config;
mod entry;
mod filter;
mod gitignore;
mod layout;
mod utils;
mod walker;

pub use config::{Annotation, ListerConfig};
pub use entry::{Entry, EntryKind};
pub use filter::EntryFilter;
pub use gitignore::{GITIGNORE_FILE, GitignoreFrame, IgnoreNode, IgnoreStack, parse_patterns};
pub use layout::{BRANCH, Connector, DirPlan, LAST_BRANCH};
pub use utils::{format_mtime, format_size, mode_string, relative_str, symbolic_mode};
pub use walker::{TreeWalker, WalkSummary};
