//! Rendering configuration for the printer

use serde::{Deserialize, Serialize};

/// Printer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrintConfig {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Number of blank lines between top-level types
    pub blank_lines_top_level: usize,
    /// Whether annotation usages are printed above their declarations
    pub show_annotations: bool,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            blank_lines_top_level: 1,
            show_annotations: true,
        }
    }
}

impl PrintConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the blank lines between top-level types
    pub fn with_blank_lines_top_level(mut self, count: usize) -> Self {
        self.blank_lines_top_level = count;
        self
    }

    /// Show or hide annotation usages
    pub fn with_annotations(mut self, show: bool) -> Self {
        self.show_annotations = show;
        self
    }
}
