//! Named colors and line segmentation for terminal output

use termcolor::{Color, ColorSpec};

/// Colors used by the lister, by purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Dotfiles and the truncation summary.
    Hidden,
    Directory,
    Error,
    Warning,
    Accent,
    Success,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Hidden => Color::Black,
            Tone::Directory | Tone::Success => Color::Green,
            Tone::Error => Color::Red,
            Tone::Warning => Color::Yellow,
            Tone::Accent => Color::Blue,
        }
    }
}

/// Color table carried by configuration. A disabled palette has no specs.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn spec(&self, tone: Tone) -> Option<ColorSpec> {
        if !self.enabled {
            return None;
        }
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(tone.color())).set_bold(true);
        Some(spec)
    }
}

/// A run of text with an optional color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub tone: Option<Tone>,
}

impl<'a> Span<'a> {
    fn plain(text: &'a str) -> Self {
        Self { text, tone: None }
    }

    fn toned(text: &'a str, tone: Tone) -> Self {
        Self {
            text,
            tone: Some(tone),
        }
    }
}

const HIDDEN_MARKER: &str = "─ .";
const CONNECTOR_TAIL: &str = "─ ";

/// Split a tree line into colored spans.
///
/// A name right after the connector that starts with `.` is dimmed through
/// the end of the line. Otherwise a line ending in `/` has its name (between
/// connector and slash) colored as a directory.
pub fn colorize(line: &str) -> Vec<Span<'_>> {
    if let Some(pos) = line.find(HIDDEN_MARKER) {
        let split = pos + CONNECTOR_TAIL.len();
        return vec![
            Span::plain(&line[..split]),
            Span::toned(&line[split..], Tone::Hidden),
        ];
    }

    if let Some(name_end) = line.strip_suffix('/').map(str::len) {
        if let Some(pos) = line.find(CONNECTOR_TAIL) {
            let name_start = pos + CONNECTOR_TAIL.len();
            return vec![
                Span::plain(&line[..name_start]),
                Span::toned(&line[name_start..name_end], Tone::Directory),
                Span::plain(&line[name_end..]),
            ];
        }
    }

    vec![Span::plain(line)]
}
