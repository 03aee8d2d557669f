//! Configuration for batch processing.
//!
//! Processing parameters for the batch runner plus the region lookup table.
//! Region knowledge is explicit configuration handed to the strategies at
//! construction time, not ambient global state.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};

/// Batch processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the extraction dumps (`<AttachmentId>.json`)
    pub input_path: PathBuf,

    /// Directory receiving the output file pairs and the run log
    pub output_path: PathBuf,

    /// Number of documents processed concurrently
    pub parallel_workers: usize,

    /// Per-document timeout; a document that exceeds it is recorded as
    /// failed without affecting the rest of the batch
    pub document_timeout_secs: u64,
}

impl Config {
    pub fn new(input_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            input_path,
            output_path,
            parallel_workers: num_cpus::get(),
            document_timeout_secs: 60,
        }
    }

    pub fn document_timeout(&self) -> Duration {
        Duration::from_secs(self.document_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(Error::configuration(format!(
                "input directory does not exist: {}",
                self.input_path.display()
            )));
        }
        if self.parallel_workers == 0 {
            return Err(Error::configuration(
                "parallel_workers must be at least 1",
            ));
        }
        if self.document_timeout_secs == 0 {
            return Err(Error::configuration(
                "document_timeout_secs must be at least 1",
            ));
        }
        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}

/// Region code lookup table (Landesstelle code to state name).
///
/// Source tables use both the short form ("W") and the prefixed form
/// ("ÖGK-W"); lookups accept either.
#[derive(Debug, Clone)]
pub struct RegionNames {
    entries: Vec<(&'static str, &'static str)>,
}

impl Default for RegionNames {
    fn default() -> Self {
        Self {
            entries: vec![
                ("W", "Wien"),
                ("N", "Niederösterreich"),
                ("O", "Oberösterreich"),
                ("B", "Burgenland"),
                ("S", "Salzburg"),
                ("ST", "Steiermark"),
                ("K", "Kärnten"),
                ("T", "Tirol"),
                ("V", "Vorarlberg"),
            ],
        }
    }
}

impl RegionNames {
    /// Strip the carrier prefix from a region token ("ÖGK-W" -> "W")
    pub fn short_code(token: &str) -> &str {
        token.rsplit('-').next().unwrap_or(token).trim()
    }

    /// Pretty state name for a region token, if the code is known
    pub fn state_name(&self, token: &str) -> Option<&'static str> {
        let code = Self::short_code(token);
        self.entries
            .iter()
            .find(|(short, _)| *short == code)
            .map(|(_, name)| *name)
    }

    /// Whether a token names a known region
    pub fn is_known(&self, token: &str) -> bool {
        self.state_name(token).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_lookup_accepts_both_forms() {
        let regions = RegionNames::default();
        assert_eq!(regions.state_name("W"), Some("Wien"));
        assert_eq!(regions.state_name("ÖGK-ST"), Some("Steiermark"));
        assert!(!regions.is_known("ÖGK-X"));
    }

    #[test]
    fn zero_workers_rejected() {
        let mut config = Config::new(PathBuf::from("."), PathBuf::from("out"));
        config.parallel_workers = 0;
        assert!(config.validate().is_err());
    }
}
