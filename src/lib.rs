//! TSP Benchmark Report Library
//!
//! Drives the external MTZ/CUT (A)TSP solver over a directory of instances
//! and turns its RESULT lines into a LaTeX comparison table.
//!
//! # Pipeline
//!
//! - List `.tsp`/`.atsp` instances of the data directory, sorted by name
//! - Run the solver once per instance and strategy, sequentially
//! - Parse the first `RESULT key=value ...` line of each run
//! - Render one table row per instance, one column group per strategy
//! - Write the table only once every run succeeded
//!
//! # Example
//!
//! ```no_run
//! use tsp_bench_report::config::BenchConfig;
//! use tsp_bench_report::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::new(BenchConfig::default());
//! let outcome = pipeline.run().unwrap();
//!
//! println!("{}", outcome.summary);
//! ```

pub mod error;
pub mod instance;
pub mod strategy;
pub mod record;
pub mod solver;
pub mod benchmark;
pub mod format;
pub mod report;
pub mod config;
pub mod pipeline;

pub use error::{BenchError, Result};
pub use instance::Instance;
pub use record::ResultRecord;
pub use strategy::Strategy;
