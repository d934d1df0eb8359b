//! Benchmark command: time queries over random transmitter sets.
//!
//! For each transmitter count, random scenes are generated with integer
//! coordinates and power drawn uniformly from `0..=extent`, and the same
//! query is timed `iterations` times.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use quadroute::{PathFinder, Point, SearchStrategy, Transmitter};

use super::common::{flag_value, parse_flag, OutputFormat};

const DEFAULT_MAX: usize = 1000;
const DEFAULT_STEP: usize = 100;
const DEFAULT_ITERATIONS: usize = 10;
const DEFAULT_EXTENT: u32 = 100;

/// Benchmark settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkConfig {
    pub max: usize,
    pub step: usize,
    pub iterations: usize,
    pub extent: u32,
    pub seed: u64,
    pub strategy: SearchStrategy,
}

/// Timing for one transmitter count.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BenchmarkRow {
    pub transmitters: usize,
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub avg_expanded: f64,
    pub reachable_pct: f64,
}

#[derive(Serialize)]
struct BenchmarkReport<'a> {
    timestamp: String,
    strategy: &'static str,
    seed: u64,
    iterations: usize,
    extent: u32,
    rows: &'a [BenchmarkRow],
}

/// One random query.
pub struct RandomScene {
    pub start: Point,
    pub end: Point,
    pub transmitters: Vec<Transmitter>,
}

/// Draw a random scene with `count` transmitters.
pub fn random_scene<R: Rng>(rng: &mut R, count: usize, extent: u32) -> RandomScene {
    let coord = |rng: &mut R| rng.random_range(0..=extent) as f64;

    let transmitters = (0..count)
        .map(|_| {
            let x = coord(rng);
            let y = coord(rng);
            Transmitter::at(x, y, coord(rng))
        })
        .collect();
    let start = Point::new(coord(rng), coord(rng));
    let end = Point::new(coord(rng), coord(rng));

    RandomScene { start, end, transmitters }
}

/// Transmitter counts visited by a run.
pub fn counts(max: usize, step: usize) -> impl Iterator<Item = usize> {
    (1..=max).step_by(step.max(1))
}

/// Run the whole benchmark.
pub fn run_benchmark(config: &BenchmarkConfig) -> Vec<BenchmarkRow> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let iterations = config.iterations.max(1);

    counts(config.max, config.step)
        .map(|count| {
            let mut total_ms = 0.0;
            let mut min_ms = f64::INFINITY;
            let mut max_ms: f64 = 0.0;
            let mut expanded = 0usize;
            let mut reachable = 0usize;

            for _ in 0..iterations {
                let scene = random_scene(&mut rng, count, config.extent);
                let finder = PathFinder::new(scene.start, scene.end, &scene.transmitters);

                let started = Instant::now();
                let result = finder.search(config.strategy);
                let ms = started.elapsed().as_secs_f64() * 1000.0;

                total_ms += ms;
                min_ms = min_ms.min(ms);
                max_ms = max_ms.max(ms);
                expanded += result.expanded;
                if result.reachable {
                    reachable += 1;
                }
            }

            let row = BenchmarkRow {
                transmitters: count,
                avg_ms: total_ms / iterations as f64,
                min_ms,
                max_ms,
                avg_expanded: expanded as f64 / iterations as f64,
                reachable_pct: reachable as f64 * 100.0 / iterations as f64,
            };
            log::debug!("{} transmitters: avg {:.3}ms", count, row.avg_ms);
            row
        })
        .collect()
}

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &[String]) -> Result<(), String> {
    let mut max = DEFAULT_MAX;
    let mut step = DEFAULT_STEP;
    let mut iterations = DEFAULT_ITERATIONS;
    let mut extent = DEFAULT_EXTENT;
    let mut seed: Option<u64> = None;
    let mut strategy = SearchStrategy::default();
    let mut format = OutputFormat::Text;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--max" => max = parse_flag(args, &mut i, "--max")?,
            "--step" => step = parse_flag(args, &mut i, "--step")?,
            "-i" | "--iterations" => iterations = parse_flag(args, &mut i, "--iterations")?,
            "--extent" => extent = parse_flag(args, &mut i, "--extent")?,
            "--seed" => seed = Some(parse_flag(args, &mut i, "--seed")?),
            "-s" | "--strategy" => {
                let name = flag_value(args, &mut i, "--strategy")?;
                strategy = SearchStrategy::from_name(name)
                    .ok_or_else(|| format!("Unknown strategy: {}", name))?;
            }
            "--json" => format = OutputFormat::Json,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    if step == 0 {
        return Err("--step must be at least 1".to_string());
    }
    if iterations == 0 {
        return Err("--iterations must be at least 1".to_string());
    }

    let config = BenchmarkConfig {
        max,
        step,
        iterations,
        extent,
        seed: seed.unwrap_or_else(|| rand::rng().random()),
        strategy,
    };
    log::info!("benchmark config: {:?}", config);

    let rows = run_benchmark(&config);

    match format {
        OutputFormat::Json => {
            let report = BenchmarkReport {
                timestamp: chrono::Local::now().to_rfc3339(),
                strategy: config.strategy.name(),
                seed: config.seed,
                iterations: config.iterations,
                extent: config.extent,
                rows: &rows,
            };
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize report: {}", e))?;
            println!("{}", json);
        }
        OutputFormat::Text => print_table(&config, &rows),
    }
    Ok(())
}

fn print_table(config: &BenchmarkConfig, rows: &[BenchmarkRow]) {
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!(
        "  BENCHMARK: {}  (seed {}, {} iterations, extent {})",
        config.strategy.name().to_uppercase(),
        config.seed,
        config.iterations,
        config.extent
    );
    println!("═══════════════════════════════════════════════════════════════");
    println!(
        "  {:>8}  {:>10}  {:>10}  {:>10}  {:>9}  {:>6}",
        "count", "avg ms", "min ms", "max ms", "expanded", "reach%"
    );
    for row in rows {
        println!(
            "  {:>8}  {:>10.3}  {:>10.3}  {:>10.3}  {:>9.1}  {:>5.0}%",
            row.transmitters, row.avg_ms, row.min_ms, row.max_ms, row.avg_expanded, row.reachable_pct
        );
    }
    println!("═══════════════════════════════════════════════════════════════");
}

fn print_usage() {
    eprintln!("Usage: quadroute benchmark [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -n, --max <n>           Largest transmitter count (default: {})", DEFAULT_MAX);
    eprintln!("  --step <n>              Count increment (default: {})", DEFAULT_STEP);
    eprintln!("  -i, --iterations <n>    Queries per count (default: {})", DEFAULT_ITERATIONS);
    eprintln!("  --extent <n>            Coordinates and power in 0..=n (default: {})", DEFAULT_EXTENT);
    eprintln!("  --seed <n>              Random seed for reproducibility");
    eprintln!("  -s, --strategy <name>   Search strategy: bfs, dfs (default: bfs)");
    eprintln!("  --json                  Output a JSON report");
}
