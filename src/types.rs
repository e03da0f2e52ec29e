//! Common types shared across the crate

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Cursor Mode
// ============================================================================

/// How a codec advances the cursor between pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMode {
    /// Cursor is an absolute element offset: `previous_offset + page_size`
    #[default]
    Offset,
    /// Cursor is the index of the next page: `page + 1`
    PageIndex,
}

impl CursorMode {
    /// Snake-case name, as used in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offset => "offset",
            Self::PageIndex => "page_index",
        }
    }
}

impl fmt::Display for CursorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_mode_default_is_offset() {
        assert_eq!(CursorMode::default(), CursorMode::Offset);
    }

    #[test]
    fn test_cursor_mode_serde_names() {
        let json = serde_json::to_string(&CursorMode::PageIndex).unwrap();
        assert_eq!(json, "\"page_index\"");

        let mode: CursorMode = serde_json::from_str("\"offset\"").unwrap();
        assert_eq!(mode, CursorMode::Offset);
        assert_eq!(CursorMode::PageIndex.to_string(), "page_index");
    }
}
