//! Formatted-output pipeline
//!
//! Interprets printf-style format strings over tagged arguments and feeds
//! the console sink and the HTML mirror. All functions here run with the
//! service lock held; they operate on the calling thread's state slot.
//!
//! Directives: `%s` string, `%d`/`%i` signed, `%u` unsigned, `%b` bool,
//! `%f` float. Anything else after `%` is written through verbatim with the
//! current foreground color. No width/precision flags exist; floats always
//! render with four fractional digits and then trailing-zero trimming.

use super::error::{ConsoleError, Result};
use super::format_args::{Arg, FormatSignal};
use super::mode::OutputMode;
use super::service::ServiceInner;
use super::thread_state::ThreadLogState;
use crate::sinks::html::HtmlSink;
use std::io;
use std::thread;

/// Renders a float the way the writer emits it: four fractional digits,
/// trailing zeros trimmed, never below one fractional digit.
pub fn render_float(value: f32) -> String {
    let mut text = format!("{:.4}", value);
    let kept = text.trim_end_matches('0').len();
    if kept < text.len() {
        text.truncate(kept);
        if text.ends_with('.') {
            text.push('0');
        }
    }
    text
}

impl ServiceInner {
    /// State slot of the calling thread, created on first touch.
    pub(crate) fn state(&mut self) -> &mut ThreadLogState {
        self.threads.entry(thread::current().id()).or_default()
    }

    /// Module-filter decision for the calling thread.
    pub(crate) fn can_emit_now(&mut self) -> bool {
        let (module, mode) = {
            let state = self.state();
            (state.module_name.clone(), state.mode)
        };
        self.filter.can_emit(&module, mode)
    }

    /// Runs `op` against the HTML sink if file logging is active. Any write
    /// failure disables file logging for the rest of the session.
    pub(crate) fn with_html(&mut self, op: impl FnOnce(&mut HtmlSink) -> io::Result<()>) {
        if let Some(sink) = self.html.as_mut() {
            if op(sink).is_err() {
                self.html = None;
            }
        }
    }

    /// Unformatted-text path: writes with the strings color, applies the
    /// `<br>`/`&nbsp;` rules on the HTML side, and refreshes the
    /// start-of-line flag from the chunk content.
    pub(crate) fn write_plain_chunk(&mut self, text: &str) {
        if !self.can_emit_now() {
            return;
        }
        let (fg, bg) = {
            let state = self.state();
            (state.colors.strings, state.colors.bg)
        };
        self.console.write(text, fg, bg);
        self.with_html(|sink| sink.write_plain(text));
        self.state().at_line_start = text.contains('\n');
    }

    /// Literal characters inside a format string keep the current foreground
    /// color and bypass the plain-chunk HTML rules.
    fn emit_literal(&mut self, text: &str) {
        if text.is_empty() || !self.can_emit_now() {
            return;
        }
        let (fg, bg) = {
            let state = self.state();
            (state.colors.fg, state.colors.bg)
        };
        self.console.write(text, fg, bg);
        self.with_html(|sink| sink.write_raw(text));
    }

    fn emit_token(&mut self, text: &str, fg: super::color::ConsoleColor, html_color: String) {
        let bg = self.state().colors.bg;
        self.console.write(text, fg, bg);
        self.with_html(|sink| sink.write_token(text, &html_color));
    }

    pub(crate) fn emit_string(&mut self, value: Option<&str>) {
        if !self.can_emit_now() {
            return;
        }
        let (fg, html_color) = {
            let state = self.state();
            (state.colors.strings, state.colors.strings_html.clone())
        };
        self.emit_token(value.unwrap_or("NULL"), fg, html_color);
    }

    pub(crate) fn emit_int(&mut self, value: i64) {
        if !self.can_emit_now() {
            return;
        }
        let (fg, html_color) = {
            let state = self.state();
            (state.colors.ints, state.colors.ints_html.clone())
        };
        self.emit_token(&value.to_string(), fg, html_color);
    }

    pub(crate) fn emit_uint(&mut self, value: u64) {
        if !self.can_emit_now() {
            return;
        }
        let (fg, html_color) = {
            let state = self.state();
            (state.colors.ints, state.colors.ints_html.clone())
        };
        self.emit_token(&value.to_string(), fg, html_color);
    }

    pub(crate) fn emit_bool(&mut self, value: bool) {
        if !self.can_emit_now() {
            return;
        }
        let (fg, html_color) = {
            let state = self.state();
            (state.colors.bools, state.colors.bools_html.clone())
        };
        self.emit_token(if value { "true" } else { "false" }, fg, html_color);
    }

    pub(crate) fn emit_float(&mut self, value: f32) {
        if !self.can_emit_now() {
            return;
        }
        let (fg, html_color) = {
            let state = self.state();
            (state.colors.floats, state.colors.floats_html.clone())
        };
        self.emit_token(&render_float(value), fg, html_color);
    }

    fn write_newline(&mut self) {
        self.write_plain_chunk("\r\n");
    }

    /// Walks the format string, dispatching directives to the typed
    /// emitters. A directive whose argument is missing or of the wrong kind
    /// aborts interpretation with an error; everything emitted up to that
    /// point stays emitted.
    fn interpret(&mut self, fmt: &str, args: &[Arg<'_>]) -> Result<()> {
        let mut literal = String::new();
        let mut next_arg = 0usize;
        let mut chars = fmt.chars();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                literal.push(ch);
                continue;
            }
            let Some(directive) = chars.next() else {
                // trailing bare '%', nothing to dispatch
                break;
            };
            match directive {
                's' | 'd' | 'i' | 'u' | 'b' | 'f' => {
                    self.emit_literal(&literal);
                    literal.clear();
                    let arg = args
                        .get(next_arg)
                        .copied()
                        .ok_or_else(|| ConsoleError::missing_argument(directive, next_arg))?;
                    next_arg += 1;
                    self.dispatch(directive, arg)?;
                }
                other => {
                    // unrecognized directive char goes through verbatim,
                    // the '%' itself is swallowed
                    literal.push(other);
                }
            }
        }
        self.emit_literal(&literal);
        Ok(())
    }

    fn dispatch(&mut self, directive: char, arg: Arg<'_>) -> Result<()> {
        match (directive, arg) {
            ('s', Arg::Str(v)) => self.emit_string(v),
            ('d' | 'i', Arg::Int(v)) => self.emit_int(v),
            ('u', Arg::UInt(v)) => self.emit_uint(v),
            ('b', Arg::Bool(v)) => self.emit_bool(v),
            ('f', Arg::Float(v)) => self.emit_float(v),
            (_, found) => {
                let expected = match directive {
                    's' => "string",
                    'd' | 'i' => "int",
                    'u' => "unsigned",
                    'b' => "bool",
                    _ => "float",
                };
                return Err(ConsoleError::format_mismatch(
                    directive,
                    expected,
                    found.kind(),
                ));
            }
        }
        Ok(())
    }

    /// Full emission pipeline for one `write`/`write_line` call.
    ///
    /// Filter rejection means no observable effect at all: no sink writes,
    /// no counter changes. `append_newline` terminates the line with CR+LF
    /// (`<br>` in HTML) and bumps the counter of the current mode.
    pub(crate) fn write_formatted(
        &mut self,
        fmt: &str,
        args: &[Arg<'_>],
        append_newline: bool,
    ) -> Result<()> {
        if !self.can_emit_now() {
            return Ok(());
        }

        let (at_line_start, indent) = {
            let state = self.state();
            (state.at_line_start, state.indent())
        };
        if at_line_start && indent > 0 {
            let spaces = " ".repeat(indent as usize);
            self.write_plain_chunk(&spaces);
        }

        let (mode, mode_html) = {
            let state = self.state();
            (state.mode, state.colors.fg_html.clone())
        };
        if mode != OutputMode::Normal {
            self.with_html(|sink| sink.open_span(&mode_html));
        }

        let result = if fmt.contains('%') {
            self.interpret(fmt, args)
        } else {
            self.write_plain_chunk(fmt);
            Ok(())
        };

        self.state().at_line_start = fmt.contains('\n');
        if mode != OutputMode::Normal {
            self.with_html(|sink| sink.close_span());
        }
        result?;

        if append_newline {
            self.write_newline();
            match self.state().mode {
                OutputMode::Error => {
                    self.error_outs
                        .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                }
                OutputMode::Success => {
                    self.success_outs
                        .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                }
                OutputMode::Normal => {}
            }
        }
        Ok(())
    }

    /// One streamed value token: injects indentation at line start, then
    /// emits with the per-type color, exactly like a lone directive.
    pub(crate) fn stream_value(&mut self, arg: Arg<'_>) {
        if !self.can_emit_now() {
            return;
        }
        let (at_line_start, indent) = {
            let state = self.state();
            (state.at_line_start, state.indent())
        };
        if at_line_start && indent > 0 {
            let spaces = " ".repeat(indent as usize);
            self.write_plain_chunk(&spaces);
        }
        match arg {
            Arg::Str(v) => self.emit_string(v),
            Arg::Int(v) => self.emit_int(v),
            Arg::UInt(v) => self.emit_uint(v),
            Arg::Bool(v) => self.emit_bool(v),
            Arg::Float(v) => self.emit_float(v),
        }
    }

    /// One streamed control token. A streamed newline goes through the
    /// plain-text path and therefore does not touch the error/success
    /// counters.
    pub(crate) fn stream_signal(&mut self, signal: FormatSignal) {
        match signal {
            FormatSignal::NewLine => self.write_newline(),
            FormatSignal::Success => self.state().enter_success(),
            FormatSignal::Error => self.state().enter_error(),
            FormatSignal::Normal => self.state().enter_normal(),
        }
    }
}
