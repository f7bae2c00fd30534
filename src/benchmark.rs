//! Benchmark runs: every instance under every strategy.
//!
//! Invocations are strictly sequential. Strategies run in their configured
//! order for each instance, instances in the order given, and the first
//! failure aborts the whole run so no partial row is ever recorded.

use crate::error::Result;
use crate::instance::Instance;
use crate::record::ResultRecord;
use crate::solver::SolverInvoker;
use crate::strategy::Strategy;

use serde::Serialize;
use std::io::Write;

/// Results of one instance, one record per strategy
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceRow {
    pub instance: Instance,
    records: Vec<ResultRecord>,
}

impl InstanceRow {
    /// Records in strategy order
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&ResultRecord> {
        self.records.get(index)
    }
}

/// One line of the raw CSV export
#[derive(Debug, Serialize)]
struct RecordEntry<'a> {
    instance: &'a str,
    strategy: &'a str,
    key: &'a str,
    value: &'a str,
}

/// Benchmarking engine
pub struct Benchmark<S: SolverInvoker> {
    solver: S,
    strategies: Vec<Strategy>,
    rows: Vec<InstanceRow>,
}

impl<S: SolverInvoker> Benchmark<S> {
    pub fn new(solver: S, strategies: Vec<Strategy>) -> Self {
        Benchmark {
            solver,
            strategies,
            rows: Vec::new(),
        }
    }

    /// Run every strategy on one instance and record the row.
    ///
    /// Stops at the first failing strategy; nothing is recorded in that case.
    pub fn run_instance<F>(&mut self, instance: &Instance, mut on_invoke: F) -> Result<&InstanceRow>
    where
        F: FnMut(&Instance, &Strategy),
    {
        log::info!("Running benchmark on instance: {}", instance.name);

        let mut records = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            on_invoke(instance, strategy);
            let record = self.solver.invoke(instance, strategy)?;
            records.push(record);
        }

        self.rows.push(InstanceRow {
            instance: instance.clone(),
            records,
        });
        Ok(&self.rows[self.rows.len() - 1])
    }

    /// Run the benchmark on several instances, aborting on the first failure.
    pub fn run_on_instances<F>(&mut self, instances: &[Instance], mut on_invoke: F) -> Result<()>
    where
        F: FnMut(&Instance, &Strategy),
    {
        for instance in instances {
            self.run_instance(instance, &mut on_invoke)?;
        }
        Ok(())
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Get all rows
    pub fn rows(&self) -> &[InstanceRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<InstanceRow> {
        self.rows
    }

    /// Number of solver invocations a run over `instances` performs
    pub fn invocation_count(&self, instances: &[Instance]) -> usize {
        instances.len() * self.strategies.len()
    }

    /// Write every raw record as `instance,strategy,key,value` lines.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);

        for row in &self.rows {
            for (strategy, record) in self.strategies.iter().zip(row.records()) {
                for (key, value) in record.iter() {
                    writer.serialize(RecordEntry {
                        instance: &row.instance.name,
                        strategy: &strategy.id,
                        key,
                        value,
                    })?;
                }
            }
        }

        writer.flush()?;
        Ok(())
    }
}
