//! Terminal output for the tmx CLI.
//!
//! Human-readable lines go to stderr as a right-aligned verb followed by a
//! message, for example:
//!
//! ```text
//!      Checked maps/level1.tmx
//!       Failed maps/broken.tmx: Format error: Unknown data encoding 'yaml'
//!     Finished 1 of 2 documents failed
//! ```
//!
//! stdout is left for `tmx info --json`.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

/// Verbs are right-aligned to this width.
const VERB_WIDTH: usize = 12;

/// How a line's verb is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    /// Loaded, Checked, Finished
    Done,
    /// Map, Tileset, Layer
    Detail,
    /// Failed
    Problem,
}

impl Tone {
    fn colour(self) -> &'static str {
        match self {
            Self::Done => GREEN,
            Self::Detail => CYAN,
            Self::Problem => RED,
        }
    }
}

/// Writes verb-prefixed status lines, coloured when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A document was handled: `Loaded`, `Checked`, `Finished`.
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(Tone::Done, verb, message);
    }

    /// Part of a document summary: `Map`, `Tileset`, `Layer`.
    pub fn info(&self, verb: &str, message: &str) {
        self.emit(Tone::Detail, verb, message);
    }

    /// A document failed to load.
    pub fn error(&self, verb: &str, message: &str) {
        self.emit(Tone::Problem, verb, message);
    }

    /// Secondary text such as versions and the `hidden` marker.
    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    /// Layer and tileset keys.
    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn line(&self, tone: Tone, verb: &str, message: &str) -> String {
        if self.color {
            let colour = tone.colour();
            format!("{BOLD}{colour}{verb:>VERB_WIDTH$}{RESET} {message}")
        } else {
            format!("{verb:>VERB_WIDTH$} {message}")
        }
    }

    fn emit(&self, tone: Tone, verb: &str, message: &str) {
        let line = self.line(tone, verb, message);
        let _ = writeln!(io::stderr().lock(), "{line}");
    }
}

/// `plural(1, "layer", "layers")` gives "1 layer".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    let noun = if n == 1 { singular } else { pluralized };
    format!("{n} {noun}")
}

/// `path` relative to the working directory when it lies inside it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));

    match relative {
        Some(p) if p.as_os_str().is_empty() => ".".to_string(),
        Some(p) => p.display().to_string(),
        None => path.display().to_string(),
    }
}
