//! Destinations for rendered lines
//!
//! - `ConsoleSink` writes colored spans through `termcolor`, falling back to
//!   ASCII connectors when the terminal cannot take box-drawing glyphs
//! - `FileSink` appends plain lines, opening and closing the file per line
//! - `BufferSink` collects lines in memory

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::palette::{Palette, colorize};
use super::render::RenderLine;

/// Receives rendered lines in display order.
pub trait LineSink {
    fn emit(&mut self, line: &RenderLine) -> io::Result<()>;
}

impl<S: LineSink + ?Sized> LineSink for Box<S> {
    fn emit(&mut self, line: &RenderLine) -> io::Result<()> {
        (**self).emit(line)
    }
}

const FALLBACK_WARNING: &str = "Using ASCII fallback. Consider -o <file> for full UTF-8 output.";

/// Replace box-drawing glyphs with ASCII look-alikes.
pub fn ascii_fallback(text: &str) -> String {
    text.replace('│', "|")
        .replace('├', "|")
        .replace('└', "\\")
        .replace("──", "--")
}

/// Whether the console can show box-drawing glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphSupport {
    Unicode,
    Ascii,
}

impl GlyphSupport {
    /// Inspect the locale environment (`LC_ALL`, `LC_CTYPE`, `LANG`).
    pub fn detect() -> Self {
        let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty());
        Self::from_locale(locale.as_deref())
    }

    /// Only a locale that names a non-UTF-8 codeset (`en_US.ISO-8859-1`)
    /// forces ASCII; unset or codeset-less locales keep Unicode.
    pub fn from_locale(locale: Option<&str>) -> Self {
        let Some(locale) = locale else {
            return GlyphSupport::Unicode;
        };
        let codeset = locale
            .split('@')
            .next()
            .and_then(|l| l.split_once('.'))
            .map(|(_, codeset)| codeset.to_ascii_lowercase());
        match codeset {
            Some(codeset) if codeset != "utf-8" && codeset != "utf8" => GlyphSupport::Ascii,
            _ => GlyphSupport::Unicode,
        }
    }
}

/// Terminal sink. Colors follow the palette; the ASCII fallback warning is
/// printed to `err` at most once.
pub struct ConsoleSink<W: WriteColor, E: Write> {
    out: W,
    err: E,
    palette: Palette,
    glyphs: GlyphSupport,
    warned_encoding: bool,
}

impl ConsoleSink<StandardStream, io::Stderr> {
    /// Sink on the process's stdout/stderr. Whether to color is decided by
    /// the caller.
    pub fn stdout(use_color: bool) -> Self {
        let choice = if use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self::new(
            StandardStream::stdout(choice),
            io::stderr(),
            Palette::new(use_color),
            GlyphSupport::detect(),
        )
    }
}

impl<W: WriteColor, E: Write> ConsoleSink<W, E> {
    pub fn new(out: W, err: E, palette: Palette, glyphs: GlyphSupport) -> Self {
        Self {
            out,
            err,
            palette,
            glyphs,
            warned_encoding: false,
        }
    }

    pub fn glyphs(&self) -> GlyphSupport {
        self.glyphs
    }

    pub fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        for span in colorize(text) {
            let spec = span.tone.and_then(|tone| self.palette.spec(tone));
            match spec {
                Some(spec) => {
                    self.out.set_color(&spec)?;
                    self.write_text(span.text)?;
                    self.out.reset()?;
                }
                None => self.write_text(span.text)?,
            }
        }
        writeln!(self.out)
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        match self.glyphs {
            GlyphSupport::Unicode => self.out.write_all(text.as_bytes()),
            GlyphSupport::Ascii => self.out.write_all(ascii_fallback(text).as_bytes()),
        }
    }

    fn warn_fallback(&mut self) -> io::Result<()> {
        if !self.warned_encoding {
            self.warned_encoding = true;
            writeln!(self.err, "{}", FALLBACK_WARNING)?;
        }
        Ok(())
    }
}

impl<W: WriteColor, E: Write> LineSink for ConsoleSink<W, E> {
    fn emit(&mut self, line: &RenderLine) -> io::Result<()> {
        if self.glyphs == GlyphSupport::Ascii {
            self.warn_fallback()?;
        }
        match self.write_line(line.as_str()) {
            Err(e)
                if e.kind() == io::ErrorKind::InvalidData
                    && self.glyphs == GlyphSupport::Unicode =>
            {
                log::debug!("console rejected glyphs ({}), switching to ASCII", e);
                self.glyphs = GlyphSupport::Ascii;
                self.warn_fallback()?;
                self.write_line(line.as_str())
            }
            result => result,
        }
    }
}

/// Append-only file sink. Each line is an independent open/write/close.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create or truncate `path` once before a run.
    pub fn clear(path: &Path) -> io::Result<()> {
        File::create(path).map(drop)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSink for FileSink {
    fn emit(&mut self, line: &RenderLine) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

/// Collects lines in memory.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// All lines joined with trailing newlines, as a file sink would write them.
    pub fn contents(&self) -> String {
        self.lines.iter().map(|l| format!("{}\n", l)).collect()
    }
}

impl LineSink for BufferSink {
    fn emit(&mut self, line: &RenderLine) -> io::Result<()> {
        self.lines.push(line.as_str().to_string());
        Ok(())
    }
}
