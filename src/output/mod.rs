//! Tree line formatting and display
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `render` - Entry to line formatting (connectors, sizes, details)
//! - `palette` - Named colors and the span segmentation of a line
//! - `sink` - Console, file and in-memory line destinations

mod config;
mod palette;
mod render;
mod sink;

pub use config::{OutputConfig, OutputTarget};
pub use palette::{Palette, Span, Tone, colorize};
pub use render::{RenderLine, Renderer};
pub use sink::{BufferSink, ConsoleSink, FileSink, GlyphSupport, LineSink, ascii_fallback};
