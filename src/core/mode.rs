//! Output mode definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-thread output mode.
///
/// The mode recolors output and selects which process-wide counter a
/// newline-terminated emission increments. Transitions happen only through
/// the dedicated entry points on the console handle; switching between
/// `Error` and `Success` always routes through `Normal` so that each leg
/// performs its own color save/restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum OutputMode {
    #[default]
    Normal,
    Error,
    Success,
}

impl OutputMode {
    pub fn to_str(&self) -> &'static str {
        match self {
            OutputMode::Normal => "normal",
            OutputMode::Error => "error",
            OutputMode::Success => "success",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_normal() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }

    #[test]
    fn test_display() {
        assert_eq!(OutputMode::Error.to_string(), "error");
        assert_eq!(OutputMode::Success.to_string(), "success");
    }
}
