use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "segdeque workspace automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the deque workloads once per global allocator and compare them
    Bench {
        /// Run quickly (lower sample size/time)
        #[arg(long, default_value_t = false)]
        quick: bool,

        /// Generate report only (skip running benchmarks)
        #[arg(long, default_value_t = false)]
        report_only: bool,

        /// Where to write the Markdown report
        #[arg(long, default_value = "benchmark_results/report.md")]
        out: PathBuf,
    },
}

const ALLOCATORS: &[&str] = &[
    "alloc-system",
    "alloc-mimalloc",
    "alloc-snmalloc",
    "alloc-jemalloc",
];

const BASELINE: &str = "system";

/// workload -> allocator baseline -> elements (or iterations) per second
type Results = BTreeMap<String, BTreeMap<String, f64>>;

#[derive(Deserialize)]
struct Estimates {
    mean: Estimate,
}

#[derive(Deserialize)]
struct Estimate {
    point_estimate: f64,
}

#[derive(Deserialize)]
struct BenchmarkInfo {
    throughput: Option<Throughput>,
}

#[derive(Deserialize)]
enum Throughput {
    Elements(f64),
    Bytes(f64),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Bench {
            quick,
            report_only,
            out,
        } => {
            if !report_only {
                run_benchmarks(quick)?;
            }
            generate_report(Path::new("target/criterion"), &out)?;
        }
    }

    Ok(())
}

fn run_benchmarks(quick: bool) -> Result<()> {
    println!("Compiling benchmarks...");
    let status = Command::new("cargo")
        .args(["build", "--bench", "suite", "--release"])
        .status()
        .context("failed to spawn cargo")?;
    if !status.success() {
        bail!("failed to compile benchmarks");
    }

    for alloc in ALLOCATORS {
        println!("\n>>> Benchmarking with feature: {alloc}");
        let start = Instant::now();

        let mut cmd = Command::new("cargo");
        cmd.env("CARGO_INCREMENTAL", "0")
            .args(["bench", "--bench", "suite", "--no-default-features", "--features"])
            .arg(alloc)
            .arg("--")
            .arg("--save-baseline")
            .arg(baseline_name(alloc));

        if quick {
            cmd.args(["--measurement-time", "0.1", "--sample-size", "10", "--noplot"]);
        }

        let status = cmd
            .status()
            .with_context(|| format!("failed to run bench for {alloc}"))?;
        if status.success() {
            println!("Finished {alloc} in {:.2?}", start.elapsed());
        } else {
            eprintln!("Warning: benchmark failed for {alloc}");
        }
    }

    Ok(())
}

fn baseline_name(alloc: &str) -> &str {
    alloc.trim_start_matches("alloc-")
}

fn generate_report(criterion_dir: &Path, report_path: &Path) -> Result<()> {
    println!("\n>>> Generating report...");
    if !criterion_dir.exists() {
        eprintln!("No criterion output found at {}", criterion_dir.display());
        return Ok(());
    }

    let mut results = Results::new();
    collect_results(criterion_dir, &mut results)?;

    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(report_path)
        .with_context(|| format!("cannot create {}", report_path.display()))?;

    writeln!(file, "# segdeque Allocator Comparison")?;
    writeln!(file)?;

    write!(file, "| Workload |")?;
    for alloc in ALLOCATORS {
        write!(file, " {} (ops/s) | vs {BASELINE} |", baseline_name(alloc))?;
    }
    writeln!(file)?;

    write!(file, "|---|")?;
    for _ in ALLOCATORS {
        write!(file, "---|---|")?;
    }
    writeln!(file)?;

    for (workload, by_alloc) in &results {
        write!(file, "| {workload} |")?;
        let baseline = by_alloc.get(BASELINE).copied().unwrap_or(0.0);

        for alloc in ALLOCATORS {
            match by_alloc.get(baseline_name(alloc)) {
                Some(&ops) => {
                    let rel = if baseline > 0.0 { ops / baseline } else { 0.0 };
                    write!(file, " {} | **{rel:.2}x** |", human_rate(ops))?;
                }
                None => write!(file, " N/A | - |")?,
            }
        }
        writeln!(file)?;
    }

    println!("Report written to {}", report_path.display());
    Ok(())
}

fn human_rate(ops: f64) -> String {
    if ops > 1_000_000.0 {
        format!("{:.2}M", ops / 1_000_000.0)
    } else if ops > 1_000.0 {
        format!("{:.2}K", ops / 1_000.0)
    } else {
        format!("{ops:.0}")
    }
}

/// Walks criterion's output tree. Estimates live at
/// `<group>/<bench>[/<param>]/<baseline>/estimates.json`, next to a
/// `benchmark.json` carrying the throughput.
fn collect_results(dir: &Path, results: &mut Results) -> Result<()> {
    for entry in fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_results(&path, results)?;
        } else if path.file_name().and_then(|s| s.to_str()) == Some("estimates.json") {
            if let Some((workload, baseline, rate)) = read_rate(&path)? {
                results.entry(workload).or_default().insert(baseline, rate);
            }
        }
    }
    Ok(())
}

fn read_rate(estimates_path: &Path) -> Result<Option<(String, String, f64)>> {
    let Some(baseline_dir) = estimates_path.parent() else {
        return Ok(None);
    };
    let Some(workload_dir) = baseline_dir.parent() else {
        return Ok(None);
    };
    let name = |p: &Path| p.file_name().and_then(|s| s.to_str()).map(str::to_owned);
    let (Some(baseline), Some(workload)) = (name(baseline_dir), name(workload_dir)) else {
        return Ok(None);
    };
    if baseline == "report" || workload == "report" {
        return Ok(None);
    }

    let estimates: Estimates = serde_json::from_str(&fs::read_to_string(estimates_path)?)
        .with_context(|| format!("malformed {}", estimates_path.display()))?;
    let time_ns = estimates.mean.point_estimate;
    if time_ns <= 0.0 {
        return Ok(None);
    }

    let elements = fs::read_to_string(baseline_dir.join("benchmark.json"))
        .ok()
        .and_then(|content| serde_json::from_str::<BenchmarkInfo>(&content).ok())
        .and_then(|info| info.throughput)
        .map_or(1.0, |t| match t {
            Throughput::Elements(n) | Throughput::Bytes(n) => n,
        });

    Ok(Some((workload, baseline, elements * 1e9 / time_ns)))
}
