//! Shared utility functions for tree walking and rendering

use std::fs::Metadata;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};

const SIZE_UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

/// Format a size in bytes with one decimal, e.g. `1023.0 B` or `1.0 MiB`.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in SIZE_UNITS {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} PB", size)
}

/// Format a modification time as local `MM/DD/YYYY HH:MM`.
pub fn format_mtime(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%m/%d/%Y %H:%M").to_string()
}

/// Render a raw `st_mode` the way `ls -l` does, e.g. `drwxr-xr-x`.
pub fn symbolic_mode(mode: u32) -> String {
    let kind = match mode & 0o170000 {
        0o040000 => 'd',
        0o100000 => '-',
        0o120000 => 'l',
        0o020000 => 'c',
        0o060000 => 'b',
        0o010000 => 'p',
        0o140000 => 's',
        _ => '?',
    };

    let mut out = String::with_capacity(10);
    out.push(kind);
    for (shift, special, on, off) in [
        (6u32, 0o4000u32, 's', 'S'),
        (3, 0o2000, 's', 'S'),
        (0, 0o1000, 't', 'T'),
    ] {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 4 != 0 { 'r' } else { '-' });
        out.push(if bits & 2 != 0 { 'w' } else { '-' });
        out.push(match (bits & 1 != 0, mode & special != 0) {
            (true, true) => on,
            (false, true) => off,
            (true, false) => 'x',
            (false, false) => '-',
        });
    }
    out
}

/// Symbolic permissions of an entry's metadata.
#[cfg(unix)]
pub fn mode_string(metadata: &Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    symbolic_mode(metadata.permissions().mode())
}

/// Symbolic permissions of an entry's metadata.
///
/// Without Unix mode bits only the read-only flag is known.
#[cfg(not(unix))]
pub fn mode_string(metadata: &Metadata) -> String {
    let kind = if metadata.is_dir() { 0o040000 } else { 0o100000 };
    let perms = if metadata.permissions().readonly() {
        0o444
    } else {
        0o666
    };
    symbolic_mode(kind | perms)
}

/// `path` relative to `base` as a string, or the whole path if it is not beneath `base`.
pub fn relative_str(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
