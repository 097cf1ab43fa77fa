//! Run configuration.

use crate::error::ParseModeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest program or input the playground accepts, in characters.
/// Output and error text are truncated to the same size.
pub const MAX_IO_SIZE: usize = 1024;

/// Default budget of evaluated operands per scan run.
pub const DEFAULT_STEP_LIMIT: u64 = 10_000;

/// Which runner handles a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Byte-compatible substring simulator of the playground page.
    #[default]
    Mock,
    /// Token scanner over declared-before-use bindings.
    Scan,
}

impl FromStr for RunMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "scan" => Ok(Self::Scan),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => f.write_str("mock"),
            Self::Scan => f.write_str("scan"),
        }
    }
}

/// Knobs for a run. Every field has a default, so a partial JSON
/// document such as `{"mode": "scan"}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub mode: RunMode,
    pub step_limit: u64,
    pub max_io_size: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::default(),
            step_limit: DEFAULT_STEP_LIMIT,
            max_io_size: MAX_IO_SIZE,
        }
    }
}

impl RunConfig {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("mock".parse::<RunMode>(), Ok(RunMode::Mock));
        assert_eq!(" Scan ".parse::<RunMode>(), Ok(RunMode::Scan));
        assert_eq!(
            "eval".parse::<RunMode>(),
            Err(ParseModeError("eval".to_string()))
        );
    }

    #[test]
    fn test_partial_json_config() {
        let config = RunConfig::from_json(r#"{"mode": "scan"}"#).unwrap();
        assert_eq!(config.mode, RunMode::Scan);
        assert_eq!(config.step_limit, DEFAULT_STEP_LIMIT);
        assert_eq!(config.max_io_size, MAX_IO_SIZE);
    }

    #[test]
    fn test_empty_json_config_is_default() {
        assert_eq!(RunConfig::from_json("{}").unwrap(), RunConfig::default());
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(RunConfig::from_json(r#"{"mode": "eval"}"#).is_err());
    }
}
