//! Typed format arguments and stream signals
//!
//! The printf-style writer takes a format template plus a slice of tagged
//! argument values instead of a C variadic list, so a directive/argument
//! kind mismatch is a detectable error rather than undefined behavior.

use serde::{Deserialize, Serialize};

/// One argument of a formatted write.
///
/// Directive mapping: `%s` → `Str`, `%d`/`%i` → `Int`, `%u` → `UInt`,
/// `%b` → `Bool`, `%f` → `Float`. `Str(None)` renders as the literal `NULL`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    Str(Option<&'a str>),
    Int(i64),
    UInt(u64),
    Bool(bool),
    Float(f32),
}

impl Arg<'_> {
    /// Human-readable kind, used in mismatch diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Str(_) => "string",
            Arg::Int(_) => "int",
            Arg::UInt(_) => "unsigned",
            Arg::Bool(_) => "bool",
            Arg::Float(_) => "float",
        }
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(v: &'a str) -> Self {
        Arg::Str(Some(v))
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(v: &'a String) -> Self {
        Arg::Str(Some(v.as_str()))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    fn from(v: Option<&'a str>) -> Self {
        Arg::Str(v)
    }
}

impl From<i32> for Arg<'_> {
    fn from(v: i32) -> Self {
        Arg::Int(v as i64)
    }
}

impl From<i64> for Arg<'_> {
    fn from(v: i64) -> Self {
        Arg::Int(v)
    }
}

impl From<u32> for Arg<'_> {
    fn from(v: u32) -> Self {
        Arg::UInt(v as u64)
    }
}

impl From<u64> for Arg<'_> {
    fn from(v: u64) -> Self {
        Arg::UInt(v)
    }
}

impl From<usize> for Arg<'_> {
    fn from(v: usize) -> Self {
        Arg::UInt(v as u64)
    }
}

impl From<bool> for Arg<'_> {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

impl From<f32> for Arg<'_> {
    fn from(v: f32) -> Self {
        Arg::Float(v)
    }
}

impl From<f64> for Arg<'_> {
    fn from(v: f64) -> Self {
        Arg::Float(v as f32)
    }
}

/// Control token accepted by the streaming interface alongside values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatSignal {
    /// New line (does not touch the error/success counters).
    NewLine,
    /// Success mode on.
    Success,
    /// Error mode on.
    Error,
    /// Normal mode (restores saved colors).
    Normal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        assert_eq!(Arg::from("x"), Arg::Str(Some("x")));
        assert_eq!(Arg::from(None), Arg::Str(None));
        assert_eq!(Arg::from(-3i32), Arg::Int(-3));
        assert_eq!(Arg::from(7u32), Arg::UInt(7));
        assert_eq!(Arg::from(true), Arg::Bool(true));
        assert_eq!(Arg::from(1.5f32), Arg::Float(1.5));
        assert_eq!(Arg::from(2.5f64), Arg::Float(2.5));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Arg::Str(None).kind(), "string");
        assert_eq!(Arg::Int(0).kind(), "int");
        assert_eq!(Arg::UInt(0).kind(), "unsigned");
        assert_eq!(Arg::Bool(false).kind(), "bool");
        assert_eq!(Arg::Float(0.0).kind(), "float");
    }
}
