//! Service configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How many `log_*.html` files survive the pruning pass that runs before a
/// new file is created.
pub const DEFAULT_KEEP_LOG_FILES: usize = 3;

/// Configuration of one console service.
///
/// Everything has a sensible default; hosts that want control over the HTML
/// mirror can deserialize this from their own config format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Directory the HTML log file is created in (and pruned from).
    pub log_dir: PathBuf,
    /// Retention count for `log_*.html` files, new file included.
    pub keep_log_files: usize,
    /// HTML body background color.
    pub html_bg_color: String,
    /// HTML body text color.
    pub html_text_color: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("."),
            keep_log_files: DEFAULT_KEEP_LOG_FILES,
            html_bg_color: "#1D1D1D".to_string(),
            html_text_color: "#DDDDDD".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ConsoleConfig::default();
        assert_eq!(cfg.log_dir, PathBuf::from("."));
        assert_eq!(cfg.keep_log_files, DEFAULT_KEEP_LOG_FILES);
        assert_eq!(cfg.html_bg_color, "#1D1D1D");
    }
}
