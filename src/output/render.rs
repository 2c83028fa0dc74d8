//! Turning entries into display lines

use std::fmt;
use std::fs::Metadata;

use crate::tree::{
    Annotation, Connector, Entry, EntryKind, LAST_BRANCH, format_mtime, format_size, mode_string,
};

/// A fully formatted tree line, ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLine {
    text: String,
}

impl RenderLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for RenderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Builds display lines. Pure over its inputs: metadata comes from the entry.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    annotation: Annotation,
}

impl Renderer {
    pub fn new(annotation: Annotation) -> Self {
        Self { annotation }
    }

    /// `prefix + connector + name`, a trailing `/` for directories, and the
    /// configured annotation for regular files.
    pub fn render_entry(&self, entry: &Entry, prefix: &str, connector: Connector) -> RenderLine {
        let mut text = format!("{}{}{}", prefix, connector.as_str(), entry.name);
        if entry.is_dir() {
            text.push('/');
            return RenderLine::new(text);
        }

        if let (EntryKind::File, Some(metadata)) = (entry.kind, &entry.metadata) {
            self.annotate(&mut text, metadata);
        }
        RenderLine::new(text)
    }

    fn annotate(&self, text: &mut String, metadata: &Metadata) {
        match self.annotation {
            Annotation::None => {}
            Annotation::Size => {
                text.push(' ');
                text.push_str(&format_size(metadata.len()));
            }
            Annotation::Details => {
                let modified = metadata
                    .modified()
                    .map(format_mtime)
                    .unwrap_or_else(|_| "--/--/---- --:--".to_string());
                text.push_str(&format!(
                    " ({}) {} {}",
                    modified,
                    format_size(metadata.len()),
                    mode_string(metadata)
                ));
            }
        }
    }

    /// The single line shown for a directory that cannot be listed.
    pub fn permission_denied(&self, prefix: &str) -> RenderLine {
        RenderLine::new(format!("{}{}[Permission Denied]", prefix, LAST_BRANCH))
    }

    /// Trailing summary for entries hidden by the per-directory cap.
    pub fn truncation(&self, prefix: &str, hidden: usize) -> RenderLine {
        RenderLine::new(format!("{}{}... ({} more)", prefix, LAST_BRANCH, hidden))
    }
}
