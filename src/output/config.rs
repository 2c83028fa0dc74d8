//! Output configuration types

use std::io;
use std::path::PathBuf;

use super::palette::Palette;
use super::sink::{ConsoleSink, FileSink, LineSink};

/// Where rendered lines go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    #[default]
    Console,
    /// Plain text, appended line by line after a single clear.
    File(PathBuf),
}

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    pub target: OutputTarget,
}

impl OutputConfig {
    /// Color applies to the console only.
    pub fn colors_console(&self) -> bool {
        self.use_color && self.target == OutputTarget::Console
    }

    /// Palette for auxiliary messages (timing, errors).
    pub fn palette(&self) -> Palette {
        Palette::new(self.use_color)
    }

    /// Prepare the target and return a sink for it.
    ///
    /// A file target is cleared here, once; failing to do so is an error.
    pub fn open_sink(&self) -> io::Result<Box<dyn LineSink>> {
        match &self.target {
            OutputTarget::Console => Ok(Box::new(ConsoleSink::stdout(self.use_color))),
            OutputTarget::File(path) => {
                FileSink::clear(path)?;
                Ok(Box::new(FileSink::new(path.clone())))
            }
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            target: OutputTarget::Console,
        }
    }
}
