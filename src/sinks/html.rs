//! HTML mirror log
//!
//! One file per initialization, named `log_<hostname>_<UTC timestamp>.html`.
//! Colored tokens become `<font color="#RRGGBB">…</font>` spans, line breaks
//! become `<br>`, and all-space chunks become repeated `&nbsp;` entities so
//! indentation survives HTML whitespace collapsing. Space runs embedded in
//! longer chunks are not converted and will visually collapse (known
//! limitation, kept).

use crate::core::config::ConsoleConfig;
use crate::core::error::{ConsoleError, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Builds the log file name from the host name (if any) and a UTC timestamp.
/// The timestamp format sorts lexicographically in chronological order, which
/// is what the retention pass relies on.
pub fn log_file_name(host: Option<&str>, now: DateTime<Utc>) -> String {
    let stamp = now.format("%Y-%m-%d_%H-%M-%S");
    match host {
        Some(host) => format!("log_{}_{}.html", host, stamp),
        None => format!("log_{}.html", stamp),
    }
}

/// Returns the oldest `log_*.html` files in `dir` that have to go so that at
/// most `keep` files (the about-to-be-created one included) remain. Oldest
/// first; unreadable directories yield an empty list.
pub fn collect_old_logs(dir: &Path, keep: usize) -> Vec<PathBuf> {
    let mut logs = BTreeSet::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.starts_with("log_") && name.ends_with(".html") {
                logs.insert(path);
            }
        }
    }
    let excess = logs.len().saturating_sub(keep.saturating_sub(1));
    logs.into_iter().take(excess).collect()
}

/// Open HTML log file. Closing tags are written on [`close`](Self::close) or
/// on drop.
pub struct HtmlSink {
    writer: BufWriter<File>,
    path: PathBuf,
    closed: bool,
}

impl HtmlSink {
    /// Creates the file and writes the document prologue.
    pub fn create(path: impl Into<PathBuf>, title: &str, config: &ConsoleConfig) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path)
            .map_err(|e| ConsoleError::file_sink(path.display().to_string(), e.to_string()))?;
        let mut sink = Self {
            writer: BufWriter::new(file),
            path,
            closed: false,
        };
        sink.write_prologue(title, config).map_err(|e| {
            ConsoleError::file_sink(sink.path.display().to_string(), e.to_string())
        })?;
        Ok(sink)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_prologue(&mut self, title: &str, config: &ConsoleConfig) -> io::Result<()> {
        writeln!(self.writer, "<html>")?;
        writeln!(self.writer, "<head>")?;
        writeln!(self.writer, "<title>{}</title>", title)?;
        writeln!(self.writer, "</head>")?;
        writeln!(
            self.writer,
            "<body bgcolor=\"{}\" text=\"{}\">",
            config.html_bg_color, config.html_text_color
        )?;
        writeln!(self.writer, "<font face=\"Courier\" size=\"2\">")?;
        self.writer.flush()
    }

    /// One colored token.
    pub fn write_token(&mut self, text: &str, color: &str) -> io::Result<()> {
        write!(self.writer, "<font color=\"#{}\">{}</font>", color, text)
    }

    /// Verbatim text, no span.
    pub fn write_raw(&mut self, text: &str) -> io::Result<()> {
        write!(self.writer, "{}", text)
    }

    /// Plain chunk from the unformatted-text path: CR+LF becomes `<br>`, a
    /// chunk consisting entirely of spaces becomes `&nbsp;` entities,
    /// anything else goes through verbatim.
    pub fn write_plain(&mut self, text: &str) -> io::Result<()> {
        if text == "\r\n" {
            return self.write_newline();
        }
        if !text.is_empty() && text.bytes().all(|b| b == b' ') {
            for _ in 0..text.len() {
                write!(self.writer, "&nbsp;")?;
            }
            return Ok(());
        }
        self.write_raw(text)
    }

    pub fn write_newline(&mut self) -> io::Result<()> {
        writeln!(self.writer, "<br>")
    }

    /// Opens the mode-color span wrapped around a formatted write while the
    /// emitting thread is not in normal mode.
    pub fn open_span(&mut self, color: &str) -> io::Result<()> {
        write!(self.writer, "<font color=\"#{}\">", color)
    }

    pub fn close_span(&mut self) -> io::Result<()> {
        write!(self.writer, "</font>")
    }

    /// Writes the closing tags and flushes. Idempotent.
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        writeln!(self.writer, "</font>")?;
        writeln!(self.writer, "</body>")?;
        writeln!(self.writer, "</html>")?;
        self.writer.flush()
    }
}

impl Drop for HtmlSink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
