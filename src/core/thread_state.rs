//! Per-thread log state
//!
//! One `ThreadLogState` exists for every thread that has ever touched the
//! logging API. Entries are created lazily on the first `initialize()` call
//! observed for a thread and are never proactively removed while the service
//! is up; a recycled thread identifier may inherit a dead thread's leftover
//! state (known limitation of the design).

use super::color::Palette;
use super::mode::OutputMode;

/// Indent/outdent step used by the fixed-step operations.
pub const INDENTATION_STEP: i32 = 2;

#[derive(Debug, Clone)]
pub struct ThreadLogState {
    /// Current indentation, never negative.
    indent: i32,
    /// Module name the thread last tagged itself with; empty means
    /// unfiltered (always visible).
    pub module_name: String,
    /// Current output mode.
    pub mode: OutputMode,
    /// Active colors.
    pub colors: Palette,
    /// Single-slot snapshot used to restore normal mode.
    pub saved_colors: Palette,
    /// True right after a newline was emitted; drives indentation injection.
    pub at_line_start: bool,
}

impl ThreadLogState {
    pub fn new() -> Self {
        let colors = Palette::normal();
        Self {
            indent: 0,
            module_name: String::new(),
            mode: OutputMode::Normal,
            // constructor performs the initial save, so the snapshot is
            // always valid
            saved_colors: colors.clone(),
            colors,
            at_line_start: true,
        }
    }

    pub fn indent(&self) -> i32 {
        self.indent
    }

    /// Sets the indentation, clamping negatives to 0.
    pub fn set_indent(&mut self, value: i32) {
        self.indent = value.max(0);
    }

    /// Increases indentation by the fixed step.
    pub fn indent_step(&mut self) {
        self.indent += INDENTATION_STEP;
    }

    /// Decreases indentation by the fixed step, clamped at 0.
    pub fn outdent_step(&mut self) {
        self.set_indent(self.indent - INDENTATION_STEP);
    }

    /// Changes indentation by an arbitrary signed amount, clamped at 0.
    pub fn indent_by(&mut self, value: i32) {
        self.set_indent(self.indent + value);
    }

    pub fn outdent_by(&mut self, value: i32) {
        self.set_indent(self.indent - value);
    }

    /// Saves the current colors into the single-slot snapshot.
    pub fn save_colors(&mut self) {
        self.saved_colors = self.colors.clone();
    }

    /// Loads the previously saved colors.
    pub fn load_colors(&mut self) {
        self.colors = self.saved_colors.clone();
    }

    /// Restores the hard-coded default colors (not the snapshot).
    pub fn restore_default_colors(&mut self) {
        self.colors = Palette::normal();
    }

    /// Normal mode: restores the last-saved color snapshot.
    pub fn enter_normal(&mut self) {
        self.mode = OutputMode::Normal;
        self.load_colors();
    }

    /// Error mode: no-op if already in it; routes Success through Normal
    /// first, then saves colors and applies the error palette.
    pub fn enter_error(&mut self) {
        match self.mode {
            OutputMode::Error => return,
            OutputMode::Success => self.exit_success(),
            OutputMode::Normal => {}
        }
        self.mode = OutputMode::Error;
        self.save_colors();
        self.colors = Palette::error();
    }

    pub fn exit_error(&mut self) {
        self.enter_normal();
    }

    /// Success mode, symmetric to [`enter_error`](Self::enter_error).
    pub fn enter_success(&mut self) {
        match self.mode {
            OutputMode::Success => return,
            OutputMode::Error => self.exit_error(),
            OutputMode::Normal => {}
        }
        self.mode = OutputMode::Success;
        self.save_colors();
        self.colors = Palette::success();
    }

    pub fn exit_success(&mut self) {
        self.enter_normal();
    }
}

impl Default for ThreadLogState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::ConsoleColor;

    #[test]
    fn test_indent_never_negative() {
        let mut s = ThreadLogState::new();
        s.outdent_step();
        assert_eq!(s.indent(), 0);
        s.set_indent(-5);
        assert_eq!(s.indent(), 0);
        s.indent_by(-3);
        assert_eq!(s.indent(), 0);
        s.indent_by(7);
        s.outdent_by(100);
        assert_eq!(s.indent(), 0);
    }

    #[test]
    fn test_indent_steps() {
        let mut s = ThreadLogState::new();
        s.indent_step();
        s.indent_step();
        assert_eq!(s.indent(), 2 * INDENTATION_STEP);
        s.outdent_step();
        assert_eq!(s.indent(), INDENTATION_STEP);
        s.indent_by(5);
        assert_eq!(s.indent(), INDENTATION_STEP + 5);
    }

    #[test]
    fn test_error_mode_round_trip_restores_colors() {
        let mut s = ThreadLogState::new();
        s.colors.fg = ConsoleColor::Cyan;
        s.colors.fg_html = "00FFFF".to_string();

        s.enter_error();
        assert_eq!(s.mode, OutputMode::Error);
        assert_eq!(s.colors, Palette::error());

        s.exit_error();
        assert_eq!(s.mode, OutputMode::Normal);
        assert_eq!(s.colors.fg, ConsoleColor::Cyan);
        assert_eq!(s.colors.fg_html, "00FFFF");
    }

    #[test]
    fn test_enter_error_twice_is_noop() {
        let mut s = ThreadLogState::new();
        s.enter_error();
        let saved = s.saved_colors.clone();
        s.enter_error();
        // second call must not re-save the error palette over the snapshot
        assert_eq!(s.saved_colors, saved);
        s.exit_error();
        assert_eq!(s.colors, Palette::normal());
    }

    #[test]
    fn test_success_to_error_routes_through_normal() {
        let mut s = ThreadLogState::new();
        s.colors.fg = ConsoleColor::Magenta;
        s.enter_success();
        s.enter_error();
        assert_eq!(s.mode, OutputMode::Error);
        assert_eq!(s.colors, Palette::error());
        s.exit_error();
        // the snapshot taken when entering error was the restored normal set
        assert_eq!(s.colors.fg, ConsoleColor::Magenta);
    }

    #[test]
    fn test_enter_normal_loads_snapshot_not_defaults() {
        let mut s = ThreadLogState::new();
        s.colors.fg = ConsoleColor::Blue;
        s.save_colors();
        s.colors.fg = ConsoleColor::Red;
        s.enter_normal();
        assert_eq!(s.colors.fg, ConsoleColor::Blue);
    }
}
