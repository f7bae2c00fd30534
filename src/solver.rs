//! Invocation of the external solver.
//!
//! The solver is a black box: it is called as
//! `<executable> <instance> <strategy> <summary-flag>`, its output is
//! buffered in full, and the first usable RESULT line is extracted.

use crate::error::{BenchError, Result};
use crate::instance::Instance;
use crate::record::{scan_output, ResultRecord};
use crate::strategy::Strategy;

use std::path::{Path, PathBuf};
use std::process::Command;

/// Flag asking the solver to print its RESULT line
pub const DEFAULT_SUMMARY_FLAG: &str = "--summary";

/// Something able to solve one instance under one strategy
pub trait SolverInvoker {
    fn invoke(&self, instance: &Instance, strategy: &Strategy) -> Result<ResultRecord>;
}

impl<F> SolverInvoker for F
where
    F: Fn(&Instance, &Strategy) -> Result<ResultRecord>,
{
    fn invoke(&self, instance: &Instance, strategy: &Strategy) -> Result<ResultRecord> {
        self(instance, strategy)
    }
}

/// Runs the solver executable as a blocking subprocess
#[derive(Debug, Clone)]
pub struct ProcessSolver {
    executable: PathBuf,
    summary_flag: String,
}

impl ProcessSolver {
    pub fn new<P: AsRef<Path>>(executable: P) -> Self {
        ProcessSolver {
            executable: executable.as_ref().to_path_buf(),
            summary_flag: DEFAULT_SUMMARY_FLAG.to_string(),
        }
    }

    pub fn with_summary_flag(mut self, flag: &str) -> Self {
        self.summary_flag = flag.to_string();
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Fail with an environment error if the executable does not exist.
    pub fn check_available(&self) -> Result<()> {
        if self.executable.is_file() {
            Ok(())
        } else {
            Err(BenchError::environment(
                format!("Missing executable: {}", self.executable.display()),
                "Build first: mkdir -p build && cd build && cmake .. && make TSP_Gurobi",
            ))
        }
    }

    fn command_line(&self, instance: &Instance, strategy: &Strategy) -> String {
        format!(
            "{} {} {} {}",
            self.executable.display(),
            instance.path.display(),
            strategy.id,
            self.summary_flag
        )
    }
}

impl SolverInvoker for ProcessSolver {
    fn invoke(&self, instance: &Instance, strategy: &Strategy) -> Result<ResultRecord> {
        let command = self.command_line(instance, strategy);
        log::debug!("Running {}", command);

        let output = Command::new(&self.executable)
            .arg(&instance.path)
            .arg(&strategy.id)
            .arg(&self.summary_flag)
            .output()
            .map_err(|source| BenchError::Spawn {
                command: command.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(BenchError::Execution {
                command,
                status: output.status.to_string(),
                stdout,
                stderr,
            });
        }

        let combined = format!("{}\n{}", stdout, stderr);
        match scan_output(&combined) {
            Some(record) => {
                log::debug!("{} / {}: {:?}", instance.name, strategy.id, record);
                Ok(record)
            }
            None => Err(BenchError::MissingResult {
                instance: instance.name.clone(),
                strategy: strategy.id.clone(),
            }),
        }
    }
}
