//! Run configuration.
//!
//! Everything has a default, so `{}` is a valid configuration file.
//!
//! ```json
//! { "depth": 16, "residue": "strict", "junit_path": "results.xml" }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::predictor::DEFAULT_DEPTH;

/// What to make of unmatched entries left in a scoreboard at run end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResiduePolicy {
    /// Only mismatches fail a run.
    #[default]
    Lenient,
    /// Leftover expected or observed entries fail a run too.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OracleConfig {
    pub depth: usize,
    pub residue: ResiduePolicy,
    pub suite_name: String,
    pub junit_path: Option<PathBuf>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            residue: ResiduePolicy::default(),
            suite_name: "fifo_oracle".to_string(),
            junit_path: None,
        }
    }
}

impl OracleConfig {
    pub fn from_json_str(s: &str) -> Result<Self, OracleError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OracleError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), OracleError> {
        match self.depth {
            0 => Err(OracleError::InvalidDepth(0)),
            _ => Ok(()),
        }
    }

    pub fn with_depth(self, depth: usize) -> Self {
        Self { depth, ..self }
    }

    pub fn with_residue(self, residue: ResiduePolicy) -> Self {
        Self { residue, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let cfg = OracleConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, OracleConfig::default());
        assert_eq!(cfg.depth, 127);
        assert_eq!(cfg.residue, ResiduePolicy::Lenient);
    }

    #[test]
    fn parses_fields() {
        let cfg = OracleConfig::from_json_str(
            r#"{ "depth": 16, "residue": "strict", "junit_path": "out/results.xml" }"#,
        )
        .unwrap();
        assert_eq!(cfg.depth, 16);
        assert_eq!(cfg.residue, ResiduePolicy::Strict);
        assert_eq!(cfg.junit_path, Some(PathBuf::from("out/results.xml")));
        assert_eq!(cfg.suite_name, "fifo_oracle");
    }

    #[test]
    fn rejects_zero_depth_and_junk() {
        assert!(matches!(
            OracleConfig::from_json_str(r#"{ "depth": 0 }"#),
            Err(OracleError::InvalidDepth(0))
        ));
        assert!(matches!(
            OracleConfig::from_json_str(r#"{ "depth": -1 }"#),
            Err(OracleError::Config(_))
        ));
        assert!(matches!(
            OracleConfig::from_json_str(r#"{ "dpeth": 4 }"#),
            Err(OracleError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            OracleConfig::from_json_file("/nonexistent/oracle.json"),
            Err(OracleError::Io(_))
        ));
    }
}
