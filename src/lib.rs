//! lsd - a tree printer with include/exclude filters, `.gitignore` support
//! and per-directory item caps

pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use output::{
    BufferSink, ConsoleSink, FileSink, LineSink, OutputConfig, OutputTarget, RenderLine, Renderer,
};
pub use tree::{Annotation, ListerConfig, TreeWalker, WalkSummary, format_size};
