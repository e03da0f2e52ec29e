//! Codec configuration
//!
//! A `CodecConfig` selects the cursor progression mode and an optional token
//! length limit shared by the encoder and decoder. It can be built in code or
//! loaded from a YAML or JSON file.

use crate::error::{Error, Result};
use crate::token::wire;
use crate::types::CursorMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Codec configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Cursor progression mode
    pub mode: CursorMode,

    /// Longest token, in characters, this codec issues or accepts
    ///
    /// Unbounded when unset. With a limit, decoding rejects longer tokens
    /// before base64 decoding, and encoding fails rather than issue one.
    pub max_token_len: Option<usize>,
}

impl CodecConfig {
    /// Create an unbounded config for the given mode
    pub fn new(mode: CursorMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set the cursor mode
    #[must_use]
    pub fn with_mode(mut self, mode: CursorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the maximum token length
    #[must_use]
    pub fn with_max_token_len(mut self, max: usize) -> Self {
        self.max_token_len = Some(max);
        self
    }

    /// Longest nonce whose token fits within `max_token_len`
    pub fn max_nonce_len(&self) -> Option<usize> {
        let max = self.max_token_len?;
        // base64 without padding: 4 chars per 3 bytes, rounded up
        let payload = max / 4 * 3 + (max % 4).saturating_sub(1);
        payload.checked_sub(wire::HEADER_LEN)
    }

    /// Load a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a file
    ///
    /// `.json` files are parsed as JSON, everything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config(format!("Codec config '{}' not found", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Validate the limits
    pub fn validate(&self) -> Result<()> {
        let min_token_len = wire::encoded_len(0);
        match self.max_token_len {
            Some(max) if max < min_token_len => Err(Error::config(format!(
                "max_token_len must be at least {min_token_len}, got {max}"
            ))),
            _ => Ok(()),
        }
    }
}
