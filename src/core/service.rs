//! Process-wide console service
//!
//! One `LogConsole` handle per process, cloned freely across threads and
//! subsystems. All shared state sits behind a single mutex; one public call
//! is one critical section, so independent threads interleave at call
//! granularity and never corrupt each other's per-thread color/indent/mode
//! state. A logical line built from several non-newline-terminated calls is
//! not protected from interleaving (known limitation).
//!
//! The whole public surface is best-effort by contract: logging never
//! returns an error and never panics in the host's face. Calls made before
//! `initialize()` are silent no-ops or return documented defaults.

use super::color::{ConsoleColor, PLACEHOLDER_HTML};
use super::config::ConsoleConfig;
use super::format_args::{Arg, FormatSignal};
use super::module_filter::ModuleFilter;
use super::thread_state::ThreadLogState;
use crate::sinks::console::{ConsoleSink, TermSink};
use crate::sinks::html::{self, HtmlSink};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::mem;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::ThreadId;

const VERSION_BANNER: &str = concat!("console_logger_system v", env!("CARGO_PKG_VERSION"));

pub(crate) struct ServiceInner {
    pub(crate) initialized: bool,
    pub(crate) ref_count: u32,
    pub(crate) filter: ModuleFilter,
    pub(crate) threads: HashMap<ThreadId, ThreadLogState>,
    pub(crate) console: Box<dyn ConsoleSink>,
    pub(crate) html: Option<HtmlSink>,
    pub(crate) config: ConsoleConfig,
    pub(crate) error_outs: AtomicU64,
    pub(crate) success_outs: AtomicU64,
}

impl ServiceInner {
    fn new(console: Box<dyn ConsoleSink>, config: ConsoleConfig) -> Self {
        Self {
            initialized: false,
            ref_count: 0,
            filter: ModuleFilter::new(),
            threads: HashMap::new(),
            console,
            html: None,
            config,
            error_outs: AtomicU64::new(0),
            success_outs: AtomicU64::new(0),
        }
    }

    /// Error-mode line through the normal pipeline (error palette, counter).
    pub(crate) fn error_line(&mut self, fmt: &str, args: &[Arg<'_>]) {
        self.state().enter_error();
        let _ = self.write_formatted(fmt, args, true);
        self.state().exit_error();
    }

    /// Success-mode line through the normal pipeline.
    pub(crate) fn success_line(&mut self, fmt: &str, args: &[Arg<'_>]) {
        self.state().enter_success();
        let _ = self.write_formatted(fmt, args, true);
        self.state().exit_success();
    }
}

/// Handle to the process-wide console service.
///
/// Construct one at startup (directly or through [`LogConsole::builder`])
/// and pass clones to every subsystem; each clone refers to the same
/// service.
#[derive(Clone)]
pub struct LogConsole {
    inner: Arc<Mutex<ServiceInner>>,
}

impl LogConsole {
    /// Service writing to the real terminal with default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> LogConsoleBuilder {
        LogConsoleBuilder::new()
    }

    /// Tags the calling thread with a logger-module name and returns a
    /// handle, mirroring instance acquisition in per-module code. The name
    /// sticks to the thread, not the handle: threads logging concurrently
    /// under different module names do not affect each other. Ignored while
    /// the service is not initialized.
    pub fn for_module(&self, module_name: &str) -> LogConsole {
        {
            let mut inner = self.inner.lock();
            if inner.initialized {
                inner.state().module_name = module_name.to_string();
            }
        }
        self.clone()
    }

    // --- lifecycle -------------------------------------------------------

    /// Brings the console up. Reentrant: the first successful call allocates
    /// the console sink and (optionally) the HTML log file; every call
    /// increments the reference count and lazily creates the calling
    /// thread's state. `title` and `create_log_file` are honored only by the
    /// allocating call.
    ///
    /// Allocation failure leaves the service uninitialized and is swallowed;
    /// HTML file failure disables file logging for the session but console
    /// logging proceeds.
    pub fn initialize(&self, title: &str, create_log_file: bool) {
        let mut inner = self.inner.lock();
        inner.ref_count += 1;

        let thread_id = std::thread::current().id();
        let new_thread = !inner.threads.contains_key(&thread_id);
        if new_thread {
            inner.threads.insert(thread_id, ThreadLogState::new());
        }

        if !inner.initialized {
            if inner.console.alloc(title).is_err() {
                return;
            }

            // let the banner lines of this function pass the filter
            let previous_module = mem::take(&mut inner.state().module_name);

            inner.initialized = true;
            inner.error_outs.store(0, Ordering::Relaxed);
            inner.success_outs.store(0, Ordering::Relaxed);

            let _ = inner.write_formatted("initialize() %s", &[Arg::from(VERSION_BANNER)], true);

            if create_log_file {
                Self::open_html_log(&mut inner, title);
            }

            let ref_count = inner.ref_count;
            inner.success_line(
                "initialize() > console ready, title: %s, refcount: %u",
                &[Arg::from(title), Arg::from(ref_count as u64)],
            );

            inner.state().module_name = previous_module;
        } else {
            let ref_count = inner.ref_count;
            if new_thread {
                inner.success_line(
                    "initialize() > already initialized for a new thread, refcount: %u",
                    &[Arg::from(ref_count as u64)],
                );
            } else {
                inner.success_line(
                    "initialize() > already initialized, refcount: %u",
                    &[Arg::from(ref_count as u64)],
                );
            }
        }
    }

    fn open_html_log(inner: &mut ServiceInner, title: &str) {
        let host = match hostname::get() {
            Ok(host) => Some(host.to_string_lossy().into_owned()),
            Err(e) => {
                let msg = e.to_string();
                inner.error_line("ERROR: could not resolve host name: %s", &[Arg::from(&msg)]);
                None
            }
        };
        let file_name = html::log_file_name(host.as_deref(), Utc::now());

        // make room before opening the new file
        let log_dir = inner.config.log_dir.clone();
        let keep = inner.config.keep_log_files;
        let doomed = html::collect_old_logs(&log_dir, keep);
        if !doomed.is_empty() {
            let _ = inner.write_formatted(
                "Deleting the %u oldest log file(s):",
                &[Arg::from(doomed.len())],
                true,
            );
            for path in doomed {
                let shown = path.display().to_string();
                let _ = inner.write_formatted("  %s", &[Arg::from(&shown)], true);
                if let Err(e) = std::fs::remove_file(&path) {
                    let msg = e.to_string();
                    inner.error_line(
                        "  ERROR: could not remove above file: %s",
                        &[Arg::from(&msg)],
                    );
                }
            }
        }

        let path = log_dir.join(file_name);
        match HtmlSink::create(&path, title, &inner.config) {
            Ok(sink) => inner.html = Some(sink),
            Err(e) => {
                let msg = e.to_string();
                inner.error_line(
                    "ERROR: could not open the html log for writing: %s",
                    &[Arg::from(&msg)],
                );
            }
        }
    }

    /// Decrements the reference count; at zero, closes the HTML file and
    /// releases the console. A call with the count already at zero is a
    /// no-op.
    pub fn deinitialize(&self) {
        let mut inner = self.inner.lock();
        if inner.ref_count == 0 {
            return;
        }
        inner.ref_count -= 1;

        if inner.initialized {
            let ref_count = inner.ref_count;
            let _ = inner.write_formatted(
                "deinitialize() new refcount: %u",
                &[Arg::from(ref_count as u64)],
                true,
            );
        }

        if inner.ref_count == 0 && inner.initialized {
            if let Some(mut sink) = inner.html.take() {
                let _ = sink.close();
            }
            inner.console.release();
            inner.initialized = false;
            inner.threads.clear();
            inner.filter = ModuleFilter::new();
            inner.error_outs.store(0, Ordering::Relaxed);
            inner.success_outs.store(0, Ordering::Relaxed);
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.lock().initialized
    }

    // --- module filter ---------------------------------------------------

    /// Enables or disables output of a logger module, process-wide. Names
    /// that are empty after trimming are ignored. Enabling the sentinel
    /// [`ALL_MODULES`](crate::core::module_filter::ALL_MODULES) makes every
    /// module visible.
    pub fn set_module_logging_enabled(&self, module_name: &str, enabled: bool) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        inner.filter.set_logging_state(module_name, enabled);
    }

    /// Logging state of a module; false while uninitialized, always true for
    /// the empty name.
    pub fn module_logging_enabled(&self, module_name: &str) -> bool {
        let inner = self.inner.lock();
        if !inner.initialized {
            return false;
        }
        inner.filter.logging_state(module_name)
    }

    /// While set (the default), error-mode output bypasses the module
    /// filter.
    pub fn set_errors_always_visible(&self, state: bool) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        inner.filter.set_errors_always_visible(state);
    }

    // --- indentation -----------------------------------------------------

    pub fn indent_level(&self) -> i32 {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return 0;
        }
        inner.state().indent()
    }

    pub fn set_indent(&self, value: i32) {
        self.with_state(|state| state.set_indent(value));
    }

    /// Increases indentation by the fixed step.
    pub fn indent(&self) {
        self.with_state(|state| state.indent_step());
    }

    /// Decreases indentation by the fixed step, clamped at zero.
    pub fn outdent(&self) {
        self.with_state(|state| state.outdent_step());
    }

    pub fn indent_by(&self, value: i32) {
        self.with_state(|state| state.indent_by(value));
    }

    pub fn outdent_by(&self, value: i32) {
        self.with_state(|state| state.outdent_by(value));
    }

    // --- colors ----------------------------------------------------------

    /// Saves the current colors into the per-thread snapshot slot.
    pub fn save_colors(&self) {
        self.with_state(|state| state.save_colors());
    }

    /// Loads the previously saved colors.
    pub fn load_colors(&self) {
        self.with_state(|state| state.load_colors());
    }

    /// Restores the hard-coded defaults (not the snapshot).
    pub fn restore_default_colors(&self) {
        self.with_state(|state| state.restore_default_colors());
    }

    pub fn fg_color(&self) -> ConsoleColor {
        self.color_of(|state| state.colors.fg)
    }

    pub fn set_fg_color(&self, color: ConsoleColor, html: Option<&str>) {
        self.with_state(|state| {
            state.colors.fg = color;
            if let Some(html) = html {
                state.colors.fg_html = html.to_string();
            }
        });
    }

    pub fn fg_color_html(&self) -> String {
        self.html_of(|state| state.colors.fg_html.clone())
    }

    pub fn bg_color(&self) -> ConsoleColor {
        self.color_of(|state| state.colors.bg)
    }

    pub fn set_bg_color(&self, color: ConsoleColor) {
        self.with_state(|state| state.colors.bg = color);
    }

    pub fn ints_color(&self) -> ConsoleColor {
        self.color_of(|state| state.colors.ints)
    }

    pub fn set_ints_color(&self, color: ConsoleColor, html: Option<&str>) {
        self.with_state(|state| {
            state.colors.ints = color;
            if let Some(html) = html {
                state.colors.ints_html = html.to_string();
            }
        });
    }

    pub fn ints_color_html(&self) -> String {
        self.html_of(|state| state.colors.ints_html.clone())
    }

    pub fn floats_color(&self) -> ConsoleColor {
        self.color_of(|state| state.colors.floats)
    }

    pub fn set_floats_color(&self, color: ConsoleColor, html: Option<&str>) {
        self.with_state(|state| {
            state.colors.floats = color;
            if let Some(html) = html {
                state.colors.floats_html = html.to_string();
            }
        });
    }

    pub fn floats_color_html(&self) -> String {
        self.html_of(|state| state.colors.floats_html.clone())
    }

    pub fn strings_color(&self) -> ConsoleColor {
        self.color_of(|state| state.colors.strings)
    }

    pub fn set_strings_color(&self, color: ConsoleColor, html: Option<&str>) {
        self.with_state(|state| {
            state.colors.strings = color;
            if let Some(html) = html {
                state.colors.strings_html = html.to_string();
            }
        });
    }

    pub fn strings_color_html(&self) -> String {
        self.html_of(|state| state.colors.strings_html.clone())
    }

    pub fn bools_color(&self) -> ConsoleColor {
        self.color_of(|state| state.colors.bools)
    }

    pub fn set_bools_color(&self, color: ConsoleColor, html: Option<&str>) {
        self.with_state(|state| {
            state.colors.bools = color;
            if let Some(html) = html {
                state.colors.bools_html = html.to_string();
            }
        });
    }

    pub fn bools_color_html(&self) -> String {
        self.html_of(|state| state.colors.bools_html.clone())
    }

    // --- modes -----------------------------------------------------------

    /// Error mode on: saves colors, applies the error palette. Output
    /// emitted until [`exit_error`](Self::exit_error) recolors and counts as
    /// error lines.
    pub fn enter_error(&self) {
        self.with_state(|state| state.enter_error());
    }

    pub fn exit_error(&self) {
        self.with_state(|state| state.exit_error());
    }

    pub fn enter_success(&self) {
        self.with_state(|state| state.enter_success());
    }

    pub fn exit_success(&self) {
        self.with_state(|state| state.exit_success());
    }

    /// Back to normal mode, restoring the last-saved colors.
    pub fn enter_normal(&self) {
        self.with_state(|state| state.enter_normal());
    }

    // --- counters --------------------------------------------------------

    /// Total newline-terminated emissions made in error mode, process-wide.
    pub fn error_out_count(&self) -> u64 {
        let inner = self.inner.lock();
        if !inner.initialized {
            return 0;
        }
        inner.error_outs.load(Ordering::Relaxed)
    }

    /// Total newline-terminated emissions made in success mode.
    pub fn success_out_count(&self) -> u64 {
        let inner = self.inner.lock();
        if !inner.initialized {
            return 0;
        }
        inner.success_outs.load(Ordering::Relaxed)
    }

    pub fn reset_error_out_count(&self) {
        let inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        inner.error_outs.store(0, Ordering::Relaxed);
    }

    pub fn reset_success_out_count(&self) {
        let inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        inner.success_outs.store(0, Ordering::Relaxed);
    }

    // --- writing ---------------------------------------------------------

    /// Formatted write without a line terminator. See the crate docs for the
    /// directive set; prefer the [`out!`](crate::out) macro for ad-hoc
    /// argument lists.
    pub fn write(&self, fmt: &str, args: &[Arg<'_>]) {
        self.emit(fmt, args, false);
    }

    /// Formatted write terminated with CR+LF; the unit of error/success
    /// counting and of atomicity with respect to other threads.
    pub fn write_line(&self, fmt: &str, args: &[Arg<'_>]) {
        self.emit(fmt, args, true);
    }

    /// Indent, then write a line.
    pub fn indent_write_line(&self, fmt: &str, args: &[Arg<'_>]) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        inner.state().indent_step();
        let _ = inner.write_formatted(fmt, args, true);
    }

    /// Write a line, then indent (section-opening pattern).
    pub fn write_line_indent(&self, fmt: &str, args: &[Arg<'_>]) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        let _ = inner.write_formatted(fmt, args, true);
        inner.state().indent_step();
    }

    /// Outdent, then write a line.
    pub fn outdent_write_line(&self, fmt: &str, args: &[Arg<'_>]) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        inner.state().outdent_step();
        let _ = inner.write_formatted(fmt, args, true);
    }

    /// Write a line, then outdent (section-closing pattern).
    pub fn write_line_outdent(&self, fmt: &str, args: &[Arg<'_>]) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        let _ = inner.write_formatted(fmt, args, true);
        inner.state().outdent_step();
    }

    /// Indent, write a line, outdent: a one-off nested line.
    pub fn nested_write_line(&self, fmt: &str, args: &[Arg<'_>]) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        inner.state().indent_step();
        let _ = inner.write_formatted(fmt, args, true);
        inner.state().outdent_step();
    }

    /// Write in error mode (enter, write, leave).
    pub fn error_write(&self, fmt: &str, args: &[Arg<'_>]) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        inner.state().enter_error();
        let _ = inner.write_formatted(fmt, args, false);
        inner.state().exit_error();
    }

    /// Write a counted error line (enter, write with newline, leave).
    pub fn error_write_line(&self, fmt: &str, args: &[Arg<'_>]) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        inner.error_line(fmt, args);
    }

    /// Write in success mode.
    pub fn success_write(&self, fmt: &str, args: &[Arg<'_>]) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        inner.state().enter_success();
        let _ = inner.write_formatted(fmt, args, false);
        inner.state().exit_success();
    }

    /// Write a counted success line.
    pub fn success_write_line(&self, fmt: &str, args: &[Arg<'_>]) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        inner.success_line(fmt, args);
    }

    /// Horizontal rule: `n` repetitions of `-=`, then a blank line.
    pub fn rule(&self, n: usize) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        for _ in 0..n {
            let _ = inner.write_formatted("-=", &[], false);
        }
        let _ = inner.write_formatted("", &[], true);
        let _ = inner.write_formatted("", &[], true);
    }

    /// Streaming interface: appends typed tokens to the current line through
    /// the same per-thread state and filter path as the formatted writer.
    pub fn out(&self) -> OutStream<'_> {
        OutStream { console: self }
    }

    // --- internals -------------------------------------------------------

    fn emit(&self, fmt: &str, args: &[Arg<'_>], newline: bool) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        // a mismatched format call emits what it can and is absorbed here;
        // logging never fails the host
        let _ = inner.write_formatted(fmt, args, newline);
    }

    fn with_state(&self, op: impl FnOnce(&mut ThreadLogState)) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        op(inner.state());
    }

    fn color_of(&self, get: impl FnOnce(&ThreadLogState) -> ConsoleColor) -> ConsoleColor {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return ConsoleColor::Default;
        }
        get(inner.state())
    }

    fn html_of(&self, get: impl FnOnce(&ThreadLogState) -> String) -> String {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return PLACEHOLDER_HTML.to_string();
        }
        get(inner.state())
    }

    fn stream_arg(&self, arg: Arg<'_>) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        inner.stream_value(arg);
    }

    fn stream_signal(&self, signal: FormatSignal) {
        let mut inner = self.inner.lock();
        if !inner.initialized {
            return;
        }
        inner.stream_signal(signal);
    }
}

impl Default for LogConsole {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent token stream over a [`LogConsole`].
///
/// Each appended token is one critical section, exactly like one formatted
/// directive; a streamed [`FormatSignal::NewLine`] ends the visual line but
/// does not count toward the error/success counters.
pub struct OutStream<'a> {
    console: &'a LogConsole,
}

impl OutStream<'_> {
    pub fn text(self, value: &str) -> Self {
        self.console.stream_arg(Arg::Str(Some(value)));
        self
    }

    /// Optional string; `None` renders as the literal `NULL`.
    pub fn opt_text(self, value: Option<&str>) -> Self {
        self.console.stream_arg(Arg::Str(value));
        self
    }

    pub fn int(self, value: i64) -> Self {
        self.console.stream_arg(Arg::Int(value));
        self
    }

    pub fn uint(self, value: u64) -> Self {
        self.console.stream_arg(Arg::UInt(value));
        self
    }

    pub fn boolean(self, value: bool) -> Self {
        self.console.stream_arg(Arg::Bool(value));
        self
    }

    pub fn float(self, value: f32) -> Self {
        self.console.stream_arg(Arg::Float(value));
        self
    }

    pub fn signal(self, signal: FormatSignal) -> Self {
        self.console.stream_signal(signal);
        self
    }

    /// Shorthand for `signal(FormatSignal::NewLine)`.
    pub fn nl(self) -> Self {
        self.signal(FormatSignal::NewLine)
    }
}

/// Builder for a [`LogConsole`], mirroring the construction of the service
/// with a custom configuration or console sink (tests use a capturing sink).
pub struct LogConsoleBuilder {
    config: ConsoleConfig,
    sink: Option<Box<dyn ConsoleSink>>,
}

impl LogConsoleBuilder {
    pub fn new() -> Self {
        Self {
            config: ConsoleConfig::default(),
            sink: None,
        }
    }

    pub fn config(mut self, config: ConsoleConfig) -> Self {
        self.config = config;
        self
    }

    /// Directory the HTML log is created in and pruned from.
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = dir.into();
        self
    }

    /// Retention count for `log_*.html` files, the new file included.
    pub fn keep_log_files(mut self, keep: usize) -> Self {
        self.config.keep_log_files = keep;
        self
    }

    /// Replaces the terminal sink, e.g. with a capturing sink in tests.
    pub fn console_sink(mut self, sink: Box<dyn ConsoleSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn build(self) -> LogConsole {
        let sink = self.sink.unwrap_or_else(|| Box::new(TermSink::new()));
        LogConsole {
            inner: Arc::new(Mutex::new(ServiceInner::new(sink, self.config))),
        }
    }
}

impl Default for LogConsoleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
