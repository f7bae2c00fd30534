//! End-to-end benchmark run: enumerate, solve, render, write.
//!
//! Nothing is written until every instance succeeded under every
//! strategy, so a failed run leaves the previous report untouched.

use crate::benchmark::{Benchmark, InstanceRow};
use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::instance::{list_instances, Instance};
use crate::report::{ReportRenderer, StagedWrite};
use crate::solver::{ProcessSolver, SolverInvoker};
use crate::strategy::Strategy;

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub rows: Vec<InstanceRow>,
    /// Rendered LaTeX table, as written to disk
    pub report: String,
    /// Terminal summary table
    pub summary: String,
}

/// Benchmark pipeline driven by a [`BenchConfig`]
pub struct Pipeline {
    config: BenchConfig,
    solver: ProcessSolver,
}

impl Pipeline {
    pub fn new(config: BenchConfig) -> Self {
        let solver = ProcessSolver::new(&config.solver).with_summary_flag(&config.summary_flag);
        Pipeline { config, solver }
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    pub fn solver(&self) -> &ProcessSolver {
        &self.solver
    }

    /// Instances of the data directory; a missing or empty directory is an error.
    pub fn instances(&self) -> Result<Vec<Instance>> {
        let dir = &self.config.data_dir;
        if !dir.is_dir() {
            return Err(BenchError::environment(
                format!("Missing data directory: {}", dir.display()),
                "Create it and add .tsp or .atsp instance files",
            ));
        }

        let instances = list_instances(dir)?;
        if instances.is_empty() {
            return Err(BenchError::environment(
                format!("No instances found in {}", dir.display()),
                "Add .tsp or .atsp instance files",
            ));
        }

        log::info!("Found {} instances in {}", instances.len(), dir.display());
        Ok(instances)
    }

    /// Check the environment and list the instances to run.
    pub fn prepare(&self) -> Result<Vec<Instance>> {
        self.solver.check_available()?;
        self.instances()
    }

    /// Run every instance, then write the report (and CSV, if configured).
    pub fn execute<F>(&self, instances: &[Instance], on_invoke: F) -> Result<RunOutcome>
    where
        F: FnMut(&Instance, &Strategy),
    {
        execute_with(self.solver.clone(), &self.config, instances, on_invoke)
    }

    /// Prepare and execute in one go.
    pub fn run(&self) -> Result<RunOutcome> {
        let instances = self.prepare()?;
        self.execute(&instances, |_, _| {})
    }
}

/// Run the benchmark with any solver and persist the results.
pub fn execute_with<S, F>(
    solver: S,
    config: &BenchConfig,
    instances: &[Instance],
    on_invoke: F,
) -> Result<RunOutcome>
where
    S: SolverInvoker,
    F: FnMut(&Instance, &Strategy),
{
    let mut benchmark = Benchmark::new(solver, config.strategies.clone());
    benchmark.run_on_instances(instances, on_invoke)?;

    let renderer = ReportRenderer::with_caption(&config.caption);
    let report = renderer.render(benchmark.strategies(), benchmark.rows());
    let summary = renderer.summary(benchmark.strategies(), benchmark.rows());

    // Stage every artifact before replacing anything, report rename last.
    let staged_report = StagedWrite::new(&config.output, report.as_bytes())?;
    let staged_csv = match &config.csv {
        Some(csv_path) => {
            let mut buffer = Vec::new();
            benchmark.write_csv(&mut buffer)?;
            Some((csv_path, StagedWrite::new(csv_path, &buffer)?))
        }
        None => None,
    };

    if let Some((csv_path, staged)) = staged_csv {
        staged.commit()?;
        log::info!("Wrote {}", csv_path.display());
    }
    staged_report.commit()?;
    log::info!("Wrote {}", config.output.display());

    Ok(RunOutcome {
        rows: benchmark.into_rows(),
        report,
        summary,
    })
}
