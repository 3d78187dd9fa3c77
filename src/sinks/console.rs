//! Console sink abstraction and the ANSI terminal implementation

use crate::core::color::ConsoleColor;
use crate::core::error::Result;
use colored::Colorize;
use std::io::Write;

/// Output target standing in for the OS console.
///
/// The service treats this as an opaque collaborator: it allocates the sink
/// once per lifecycle, writes colored text chunks synchronously, and releases
/// it when the reference count reaches zero.
pub trait ConsoleSink: Send {
    /// Bring the console up and apply the window title.
    fn alloc(&mut self, title: &str) -> Result<()>;

    /// Write one chunk of text with the given colors. Must not fail; a sink
    /// that loses its backing device simply swallows the output.
    fn write(&mut self, text: &str, fg: ConsoleColor, bg: ConsoleColor);

    /// Tear the console down.
    fn release(&mut self);
}

/// ANSI terminal sink writing to stdout.
pub struct TermSink;

impl TermSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TermSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSink for TermSink {
    fn alloc(&mut self, title: &str) -> Result<()> {
        // OSC 0 sets the terminal window title
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "\x1b]0;{}\x07", title);
        let _ = out.flush();
        Ok(())
    }

    fn write(&mut self, text: &str, fg: ConsoleColor, bg: ConsoleColor) {
        let mut chunk = match fg.ansi() {
            Some(color) => text.color(color),
            None => text.normal(),
        };
        if let Some(color) = bg.ansi() {
            chunk = chunk.on_color(color);
        }

        let mut out = std::io::stdout().lock();
        let _ = write!(out, "{}", chunk);
        let _ = out.flush();
    }

    fn release(&mut self) {
        let mut out = std::io::stdout().lock();
        let _ = write!(out, "\x1b[0m");
        let _ = out.flush();
    }
}
