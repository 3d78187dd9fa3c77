//! Console colors and per-thread palettes
//!
//! A palette carries the active foreground/background colors plus the
//! dedicated colors for ints, floats, strings and bools, each paired with an
//! HTML hex equivalent used by the HTML mirror log.

use serde::{Deserialize, Serialize};

/// Placeholder HTML color returned by getters when the service is not
/// initialized.
pub const PLACEHOLDER_HTML: &str = "#DDBEEF";

/// Default HTML foreground used by the normal palette.
pub const DEFAULT_HTML_FG: &str = "999999";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum ConsoleColor {
    /// Terminal default (no attribute set)
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl ConsoleColor {
    /// Map to the ANSI color used by the terminal sink.
    ///
    /// `Default` has no mapping; the sink skips the attribute entirely.
    pub fn ansi(&self) -> Option<colored::Color> {
        use colored::Color::*;
        match self {
            ConsoleColor::Default => None,
            ConsoleColor::Black => Some(Black),
            ConsoleColor::Red => Some(Red),
            ConsoleColor::Green => Some(Green),
            ConsoleColor::Yellow => Some(Yellow),
            ConsoleColor::Blue => Some(Blue),
            ConsoleColor::Magenta => Some(Magenta),
            ConsoleColor::Cyan => Some(Cyan),
            ConsoleColor::White => Some(White),
            ConsoleColor::BrightBlack => Some(BrightBlack),
            ConsoleColor::BrightRed => Some(BrightRed),
            ConsoleColor::BrightGreen => Some(BrightGreen),
            ConsoleColor::BrightYellow => Some(BrightYellow),
            ConsoleColor::BrightBlue => Some(BrightBlue),
            ConsoleColor::BrightMagenta => Some(BrightMagenta),
            ConsoleColor::BrightCyan => Some(BrightCyan),
            ConsoleColor::BrightWhite => Some(BrightWhite),
        }
    }
}

/// Full color set of one thread: active colors plus HTML hex equivalents
/// (up to 6 hex chars, no leading `#`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub fg: ConsoleColor,
    pub bg: ConsoleColor,
    pub ints: ConsoleColor,
    pub floats: ConsoleColor,
    pub strings: ConsoleColor,
    pub bools: ConsoleColor,
    pub fg_html: String,
    pub ints_html: String,
    pub floats_html: String,
    pub strings_html: String,
    pub bools_html: String,
}

impl Palette {
    /// Default colors: plain white text, mid-grey in the HTML log.
    pub fn normal() -> Self {
        Self {
            fg: ConsoleColor::White,
            bg: ConsoleColor::Default,
            ints: ConsoleColor::White,
            floats: ConsoleColor::White,
            strings: ConsoleColor::White,
            bools: ConsoleColor::White,
            fg_html: DEFAULT_HTML_FG.to_string(),
            ints_html: DEFAULT_HTML_FG.to_string(),
            floats_html: DEFAULT_HTML_FG.to_string(),
            strings_html: DEFAULT_HTML_FG.to_string(),
            bools_html: DEFAULT_HTML_FG.to_string(),
        }
    }

    /// Fixed palette applied while in error mode.
    pub fn error() -> Self {
        Self {
            fg: ConsoleColor::BrightRed,
            bg: ConsoleColor::Default,
            ints: ConsoleColor::BrightYellow,
            floats: ConsoleColor::BrightYellow,
            strings: ConsoleColor::Yellow,
            bools: ConsoleColor::BrightYellow,
            fg_html: "FF0000".to_string(),
            ints_html: "FFFF00".to_string(),
            floats_html: "FFFF00".to_string(),
            strings_html: "DDDD00".to_string(),
            bools_html: "FFFF00".to_string(),
        }
    }

    /// Fixed palette applied while in success mode.
    pub fn success() -> Self {
        Self {
            fg: ConsoleColor::Green,
            bg: ConsoleColor::Default,
            ints: ConsoleColor::BrightYellow,
            floats: ConsoleColor::BrightYellow,
            strings: ConsoleColor::BrightGreen,
            bools: ConsoleColor::BrightYellow,
            fg_html: "00DD00".to_string(),
            ints_html: "FFFF00".to_string(),
            floats_html: "FFFF00".to_string(),
            strings_html: "00FF00".to_string(),
            bools_html: "FFFF00".to_string(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_color_has_no_ansi() {
        assert!(ConsoleColor::Default.ansi().is_none());
        assert!(ConsoleColor::BrightRed.ansi().is_some());
    }

    #[test]
    fn test_normal_palette_defaults() {
        let p = Palette::normal();
        assert_eq!(p.fg, ConsoleColor::White);
        assert_eq!(p.fg_html, DEFAULT_HTML_FG);
        assert_eq!(p.strings, p.fg);
        assert_eq!(p.bg, ConsoleColor::Default);
    }

    #[test]
    fn test_mode_palettes_differ() {
        assert_ne!(Palette::error(), Palette::normal());
        assert_ne!(Palette::success(), Palette::error());
        assert_eq!(Palette::error().fg_html, "FF0000");
        assert_eq!(Palette::success().strings_html, "00FF00");
    }
}
