//! TSP Benchmark Report - Command Line Interface
//!
//! Runs the solver on every instance under every strategy and writes the
//! LaTeX comparison table.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tsp_bench_report::config::BenchConfig;
use tsp_bench_report::instance::Instance;
use tsp_bench_report::pipeline::Pipeline;
use tsp_bench_report::solver::SolverInvoker;
use tsp_bench_report::{BenchError, Result};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tsp-bench-report")]
#[command(author = "M2 AI2D Student")]
#[command(version = "1.0")]
#[command(about = "Benchmark the MTZ/CUT TSP solver and build the LaTeX results table")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Solver executable (overrides the configuration)
    #[arg(long, global = true)]
    solver: Option<PathBuf>,

    /// Directory containing instance files (overrides the configuration)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every instance under every strategy and write the table
    Run {
        /// Output LaTeX file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also export every raw RESULT record to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Hide the progress bar and summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the instances that would be benchmarked
    List,

    /// Run the solver on a single instance and print the parsed records
    Probe {
        /// Path to the instance file
        #[arg(short, long)]
        instance: PathBuf,

        /// Strategy id (default: every configured strategy)
        #[arg(short, long)]
        strategy: Option<String>,

        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => BenchConfig::load(path)?,
        None => BenchConfig::default(),
    };
    if let Some(solver) = cli.solver {
        config.solver = solver;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Commands::Run { output, csv, quiet } => {
            if let Some(output) = output {
                config.output = output;
            }
            if csv.is_some() {
                config.csv = csv;
            }
            run_benchmark(config, quiet)
        }

        Commands::List => list_instances(config),

        Commands::Probe { instance, strategy, json } => {
            probe_instance(config, &instance, strategy.as_deref(), json)
        }
    }
}

fn run_benchmark(config: BenchConfig, quiet: bool) -> Result<()> {
    let pipeline = Pipeline::new(config);
    let instances = pipeline.prepare()?;

    let total = instances.len() * pipeline.config().strategies.len();
    if !quiet {
        println!(
            "Found {} instances, {} strategies ({} runs)",
            instances.len(),
            pipeline.config().strategies.len(),
            total
        );
    }

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(total as u64)
    };
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let result = pipeline.execute(&instances, |instance, strategy| {
        progress.set_message(format!("{} ({})", instance.name, strategy.id));
        progress.inc(1);
    });

    let outcome = match result {
        Ok(outcome) => {
            progress.finish_and_clear();
            outcome
        }
        Err(e) => {
            progress.abandon();
            return Err(e);
        }
    };

    if !quiet {
        println!("\n{}", outcome.summary);
    }
    println!("Wrote {}", pipeline.config().output.display());
    if let Some(csv_path) = &pipeline.config().csv {
        println!("Raw records exported to {}", csv_path.display());
    }

    Ok(())
}

fn list_instances(config: BenchConfig) -> Result<()> {
    let pipeline = Pipeline::new(config);
    let instances = pipeline.instances()?;

    println!("Solver: {}", pipeline.solver().executable().display());
    println!("Found {} instances in {}", instances.len(), pipeline.config().data_dir.display());
    for instance in &instances {
        println!("  {:<30} {:?}", instance.name, instance.kind);
    }

    Ok(())
}

fn probe_instance(config: BenchConfig, path: &Path, strategy: Option<&str>, json: bool) -> Result<()> {
    let instance = Instance::from_path(path).ok_or_else(|| {
        BenchError::environment(
            format!("Not an instance file: {}", path.display()),
            "Expected a .tsp or .atsp file",
        )
    })?;

    let pipeline = Pipeline::new(config);
    pipeline.solver().check_available()?;

    let strategies: Vec<_> = pipeline
        .config()
        .strategies
        .iter()
        .filter(|s| strategy.map_or(true, |id| s.id == id))
        .collect();
    if strategies.is_empty() {
        return Err(BenchError::Config(format!(
            "unknown strategy: {}",
            strategy.unwrap_or_default()
        )));
    }

    let mut records = BTreeMap::new();
    for strategy in strategies {
        let record = pipeline.solver().invoke(&instance, strategy)?;
        if !json {
            println!("{} ({}):", instance.name, strategy.id);
            for (key, value) in record.iter() {
                println!("  {:<10} {}", key, value);
            }
        }
        records.insert(strategy.id.clone(), record);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    }

    Ok(())
}
