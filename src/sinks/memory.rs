//! Capturing console sink
//!
//! Records every written chunk with its colors instead of touching a real
//! terminal. Used throughout the test suites to assert on emitted output.

use super::console::ConsoleSink;
use crate::core::color::ConsoleColor;
use crate::core::error::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// One recorded write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub fg: ConsoleColor,
    pub bg: ConsoleColor,
}

#[derive(Debug, Default)]
struct Recording {
    chunks: Vec<Chunk>,
    title: Option<String>,
    released: bool,
}

/// Shared view over what a [`MemorySink`] has recorded.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    recording: Arc<Mutex<Recording>>,
}

impl CapturedOutput {
    /// All recorded chunks, in write order.
    pub fn chunks(&self) -> Vec<Chunk> {
        self.recording.lock().chunks.clone()
    }

    /// Everything written so far, concatenated.
    pub fn text(&self) -> String {
        self.recording
            .lock()
            .chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect()
    }

    /// Completed lines (split on CR+LF).
    pub fn lines(&self) -> Vec<String> {
        let text = self.text();
        let mut lines: Vec<String> = text.split("\r\n").map(str::to_string).collect();
        // drop the trailing fragment after the last newline
        lines.pop();
        lines
    }

    pub fn title(&self) -> Option<String> {
        self.recording.lock().title.clone()
    }

    pub fn released(&self) -> bool {
        self.recording.lock().released
    }

    pub fn clear(&self) {
        self.recording.lock().chunks.clear();
    }
}

/// Console sink that records writes into a [`CapturedOutput`].
pub struct MemorySink {
    captured: CapturedOutput,
}

impl MemorySink {
    /// Creates the sink together with the shared view the test keeps.
    pub fn new() -> (Self, CapturedOutput) {
        let captured = CapturedOutput::default();
        (
            Self {
                captured: captured.clone(),
            },
            captured,
        )
    }
}

impl ConsoleSink for MemorySink {
    fn alloc(&mut self, title: &str) -> Result<()> {
        let mut rec = self.captured.recording.lock();
        rec.title = Some(title.to_string());
        rec.released = false;
        Ok(())
    }

    fn write(&mut self, text: &str, fg: ConsoleColor, bg: ConsoleColor) {
        self.captured.recording.lock().chunks.push(Chunk {
            text: text.to_string(),
            fg,
            bg,
        });
    }

    fn release(&mut self) {
        self.captured.recording.lock().released = true;
    }
}
