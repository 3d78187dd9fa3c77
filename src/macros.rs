//! Writer macros for ad-hoc argument lists.
//!
//! These wrap the slice-based [`write`](crate::LogConsole::write) /
//! [`write_line`](crate::LogConsole::write_line) methods so call sites can
//! pass arguments directly, printf style.
//!
//! # Examples
//!
//! ```
//! use console_logger_system::prelude::*;
//! use console_logger_system::{out, outln};
//!
//! let con = LogConsole::new();
//! con.initialize("demo", false);
//!
//! outln!(con, "loaded %d textures in %f seconds", 32, 1.25f32);
//! out!(con, "renderer ready: %b", true);
//! outln!(con, "");
//! # con.deinitialize();
//! ```

/// Formatted write without a line terminator.
#[macro_export]
macro_rules! out {
    ($con:expr, $fmt:expr $(,)?) => {
        $con.write($fmt, &[])
    };
    ($con:expr, $fmt:expr, $($arg:expr),+ $(,)?) => {
        $con.write($fmt, &[$($crate::Arg::from($arg)),+])
    };
}

/// Formatted write terminated with a newline; the unit of error/success
/// counting.
#[macro_export]
macro_rules! outln {
    ($con:expr, $fmt:expr $(,)?) => {
        $con.write_line($fmt, &[])
    };
    ($con:expr, $fmt:expr, $($arg:expr),+ $(,)?) => {
        $con.write_line($fmt, &[$($crate::Arg::from($arg)),+])
    };
}

/// Error-mode line: enter error mode, write the line, return to normal.
#[macro_export]
macro_rules! eoutln {
    ($con:expr, $fmt:expr $(,)?) => {
        $con.error_write_line($fmt, &[])
    };
    ($con:expr, $fmt:expr, $($arg:expr),+ $(,)?) => {
        $con.error_write_line($fmt, &[$($crate::Arg::from($arg)),+])
    };
}

/// Success-mode line: enter success mode, write the line, return to normal.
#[macro_export]
macro_rules! soutln {
    ($con:expr, $fmt:expr $(,)?) => {
        $con.success_write_line($fmt, &[])
    };
    ($con:expr, $fmt:expr, $($arg:expr),+ $(,)?) => {
        $con.success_write_line($fmt, &[$($crate::Arg::from($arg)),+])
    };
}
