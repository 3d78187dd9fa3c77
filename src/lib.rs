//! # Console Logger System
//!
//! A process-wide, thread-safe console logging facility with colorized,
//! indentation-aware, printf-style formatted output, an optional HTML mirror
//! log file, per-module output filtering, and error/success modes that both
//! recolor output and count emitted lines.
//!
//! ## Features
//!
//! - **Thread Safe**: one shared service, per-thread color/indent/mode state
//! - **Per-Module Filtering**: enable or disable output by subsystem name
//! - **HTML Mirror**: color-faithful log file with keep-N retention
//! - **Best Effort**: logging never errors or panics in the host program
//!
//! ## Quick start
//!
//! ```
//! use console_logger_system::prelude::*;
//! use console_logger_system::outln;
//!
//! let con = LogConsole::new();
//! con.initialize("my app", false);
//!
//! con.write_line_indent("loading assets", &[]);
//! outln!(con, "%d textures, compressed: %b", 32, true);
//! con.outdent();
//!
//! con.enter_error();
//! outln!(con, "missing shader: %s", "phong.vert");
//! con.exit_error();
//! assert_eq!(con.error_out_count(), 1);
//!
//! con.deinitialize();
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Arg, ConsoleColor, ConsoleConfig, ConsoleError, FormatSignal, LogConsole,
        LogConsoleBuilder, OutStream, OutputMode, Palette, Result, ALL_MODULES,
        DEFAULT_KEEP_LOG_FILES, INDENTATION_STEP,
    };
    pub use crate::sinks::{CapturedOutput, ConsoleSink, HtmlSink, MemorySink, TermSink};
}

pub use crate::core::{
    render_float, Arg, ConsoleColor, ConsoleConfig, ConsoleError, FormatSignal, LogConsole,
    LogConsoleBuilder, ModuleFilter, OutStream, OutputMode, Palette, Result, ThreadLogState,
    ALL_MODULES, DEFAULT_HTML_FG, DEFAULT_KEEP_LOG_FILES, INDENTATION_STEP, PLACEHOLDER_HTML,
};
pub use crate::sinks::{CapturedOutput, Chunk, ConsoleSink, HtmlSink, MemorySink, TermSink};
