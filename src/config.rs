//! Run configuration.
//!
//! Everything has a default matching the usual project layout
//! (`build/TSP_Gurobi`, `data/`, `results.tex`), so a config file is only
//! needed to change the strategy set or paths permanently.
//!
//! ```
//! use tsp_bench_report::config::BenchConfig;
//!
//! let config = BenchConfig::from_toml_str(r#"
//!     solver = "bin/solver"
//!
//!     [[strategies]]
//!     id = "MTZ"
//!     label = "MTZ"
//!     count_metric = "nodes"
//! "#).unwrap();
//!
//! assert_eq!(config.strategies.len(), 1);
//! assert_eq!(config.output.to_str(), Some("results.tex"));
//! ```

use crate::error::{BenchError, Result};
use crate::report::DEFAULT_CAPTION;
use crate::solver::DEFAULT_SUMMARY_FLAG;
use crate::strategy::Strategy;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Solver executable
    pub solver: PathBuf,
    /// Directory scanned for instances
    pub data_dir: PathBuf,
    /// LaTeX table written at the end of the run
    pub output: PathBuf,
    /// Optional CSV dump of every raw record
    pub csv: Option<PathBuf>,
    /// Last argument passed to the solver
    pub summary_flag: String,
    /// Table caption
    pub caption: String,
    /// Strategies, in column order
    pub strategies: Vec<Strategy>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            solver: PathBuf::from("build").join("TSP_Gurobi"),
            data_dir: PathBuf::from("data"),
            output: PathBuf::from("results.tex"),
            csv: None,
            summary_flag: DEFAULT_SUMMARY_FLAG.to_string(),
            caption: DEFAULT_CAPTION.to_string(),
            strategies: Strategy::default_set(),
        }
    }
}

impl BenchConfig {
    /// Load and validate a TOML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: BenchConfig = toml::from_str(s).map_err(|e| BenchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a sensible table.
    pub fn validate(&self) -> Result<()> {
        if self.strategies.is_empty() {
            return Err(BenchError::Config("at least one strategy is required".to_string()));
        }

        let mut seen = HashSet::new();
        for strategy in &self.strategies {
            if strategy.id.trim().is_empty() {
                return Err(BenchError::Config("strategy id cannot be empty".to_string()));
            }
            if !seen.insert(strategy.id.as_str()) {
                return Err(BenchError::Config(format!("duplicate strategy id: {}", strategy.id)));
            }
        }

        Ok(())
    }
}
