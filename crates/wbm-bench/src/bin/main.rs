//! Standalone benchmark runner for the whole-body model components.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use wbm_bench::{BenchmarkScenario, BenchmarkSuite, default_benchmarks, run_scenario};
use wbm_components::ManagerConfig;
use wbm_core::timing::format_duration;

#[derive(Parser)]
#[command(name = "wbm-bench")]
#[command(about = "Compare compute and compute_fast call overhead", long_about = None)]
struct Cli {
    /// Timed calls per path and scenario
    #[arg(short, long, default_value_t = 10_000)]
    iterations: usize,

    /// Run a single model size instead of the default set
    #[arg(long)]
    dof: Option<usize>,

    /// Manager configuration file (YAML, or JSON with a .json extension)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Record a per-stage call breakdown (adds overhead to every call)
    #[arg(long)]
    timing: bool,

    /// Where to write the JSON report
    #[arg(short, long, default_value = "benchmarks/baseline.json")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ManagerConfig::load(path)?,
        None => ManagerConfig::default(),
    };
    config.timing |= cli.timing;
    let benchmarks = match cli.dof {
        Some(dof) => vec![BenchmarkScenario {
            id: format!("inverse_dynamics_dof{dof}"),
            dof,
            iterations: cli.iterations,
        }],
        None => default_benchmarks(cli.iterations),
    };

    println!("Whole-Body Model Benchmark Suite");
    println!("================================\n");
    println!(
        "Running {} benchmarks, {} calls per path...\n",
        benchmarks.len(),
        cli.iterations
    );

    let mut results = Vec::new();
    for (idx, scenario) in benchmarks.iter().enumerate() {
        print!("[{}/{}] {} ... ", idx + 1, benchmarks.len(), scenario.id);
        std::io::Write::flush(&mut std::io::stdout())?;

        match run_scenario(scenario, &config) {
            Ok(result) => {
                println!("OK");
                results.push(result);
            }
            Err(e) => {
                println!("FAILED");
                eprintln!("  Error: {}", e);
            }
        }
    }

    println!("\n================================");
    println!("Benchmark Results Summary");
    println!("================================\n");

    for result in &results {
        println!("{} (DoF {})", result.scenario.id, result.scenario.dof);
        for (label, m) in [("compute", &result.compute), ("compute_fast", &result.compute_fast)] {
            println!(
                "  {:<13} {:>9} (median), min: {}, max: {}",
                label,
                format_duration(m.median_ns * 1e-9),
                format_duration(m.min_ns * 1e-9),
                format_duration(m.max_ns * 1e-9)
            );
        }
        if let Some(speedup) = result.speedup() {
            println!("  Speedup:      {:.2}x", speedup);
        }
        if let Some(breakdown) = &result.call_breakdown {
            print!("{breakdown}");
        }
        println!();
    }

    let json = serde_json::to_string_pretty(&BenchmarkSuite::new(results))?;
    if let Some(parent) = cli.output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&cli.output, json)?;
    println!("Report saved to: {}", cli.output.display());

    Ok(())
}
