//! Core console-logger types and state

pub mod color;
pub mod config;
pub mod error;
pub mod format_args;
pub mod mode;
pub mod module_filter;
pub mod service;
pub mod thread_state;
pub mod writer;

pub use color::{ConsoleColor, Palette, DEFAULT_HTML_FG, PLACEHOLDER_HTML};
pub use config::{ConsoleConfig, DEFAULT_KEEP_LOG_FILES};
pub use error::{ConsoleError, Result};
pub use format_args::{Arg, FormatSignal};
pub use mode::OutputMode;
pub use module_filter::{ModuleFilter, ALL_MODULES};
pub use service::{LogConsole, LogConsoleBuilder, OutStream};
pub use thread_state::{ThreadLogState, INDENTATION_STEP};
pub use writer::render_float;
