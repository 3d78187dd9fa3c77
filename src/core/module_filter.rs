//! Per-module output filtering
//!
//! Process-wide set of enabled logger-module names. A thread tags itself
//! with a module name when it acquires the console handle; the filter then
//! decides whether that thread's output is actually emitted.

use super::mode::OutputMode;
use std::collections::BTreeSet;

/// Reserved module name: when enabled, every module's output is visible.
pub const ALL_MODULES: &str = "4LLM0DUL3S";

#[derive(Debug, Clone)]
pub struct ModuleFilter {
    enabled: BTreeSet<String>,
    /// Error-mode output bypasses the filter while this is set.
    errors_always_visible: bool,
}

impl ModuleFilter {
    pub fn new() -> Self {
        Self {
            enabled: BTreeSet::new(),
            errors_always_visible: true,
        }
    }

    /// Decides whether a thread tagged `module_name` and currently in `mode`
    /// may emit. First match wins:
    ///
    /// 1. empty module name: unfiltered, emit
    /// 2. the [`ALL_MODULES`] sentinel is enabled: emit
    /// 3. the module name itself is enabled: emit
    /// 4. errors are always visible and the thread is in error mode: emit
    /// 5. otherwise: suppress
    pub fn can_emit(&self, module_name: &str, mode: OutputMode) -> bool {
        if module_name.is_empty() {
            return true;
        }
        if self.enabled.contains(ALL_MODULES) {
            return true;
        }
        if self.enabled.contains(module_name) {
            return true;
        }
        self.errors_always_visible && mode == OutputMode::Error
    }

    /// Enables or disables logging for a module name. Names that are empty
    /// after trimming are rejected as no-ops.
    pub fn set_logging_state(&mut self, module_name: &str, state: bool) {
        if module_name.trim().is_empty() {
            return;
        }
        if state {
            self.enabled.insert(module_name.to_string());
        } else {
            self.enabled.remove(module_name);
        }
    }

    /// Logging state of a module. Always true for the empty name.
    pub fn logging_state(&self, module_name: &str) -> bool {
        if module_name.is_empty() {
            return true;
        }
        self.enabled.contains(module_name)
    }

    pub fn set_errors_always_visible(&mut self, state: bool) {
        self.errors_always_visible = state;
    }

    pub fn errors_always_visible(&self) -> bool {
        self.errors_always_visible
    }
}

impl Default for ModuleFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_module_always_emits() {
        let f = ModuleFilter::new();
        assert!(f.can_emit("", OutputMode::Normal));
        assert!(f.can_emit("", OutputMode::Success));
    }

    #[test]
    fn test_disabled_module_suppressed() {
        let f = ModuleFilter::new();
        assert!(!f.can_emit("Physics", OutputMode::Normal));
        assert!(!f.can_emit("Physics", OutputMode::Success));
    }

    #[test]
    fn test_enabled_module_emits() {
        let mut f = ModuleFilter::new();
        f.set_logging_state("Physics", true);
        assert!(f.can_emit("Physics", OutputMode::Normal));
        assert!(!f.can_emit("Renderer", OutputMode::Normal));

        f.set_logging_state("Physics", false);
        assert!(!f.can_emit("Physics", OutputMode::Normal));
    }

    #[test]
    fn test_sentinel_enables_everything() {
        let mut f = ModuleFilter::new();
        f.set_logging_state(ALL_MODULES, true);
        assert!(f.can_emit("Physics", OutputMode::Normal));
        assert!(f.can_emit("Renderer", OutputMode::Normal));

        f.set_logging_state(ALL_MODULES, false);
        assert!(!f.can_emit("Physics", OutputMode::Normal));
    }

    #[test]
    fn test_errors_bypass_filter_by_default() {
        let mut f = ModuleFilter::new();
        assert!(f.can_emit("Physics", OutputMode::Error));

        f.set_errors_always_visible(false);
        assert!(!f.can_emit("Physics", OutputMode::Error));
    }

    #[test]
    fn test_blank_names_rejected() {
        let mut f = ModuleFilter::new();
        f.set_logging_state("", true);
        f.set_logging_state("   ", true);
        f.set_logging_state("\t\n", true);
        assert!(!f.can_emit("anything", OutputMode::Normal));
        // the empty name still reports enabled, it is unfiltered
        assert!(f.logging_state(""));
        assert!(!f.logging_state("   "));
    }
}
