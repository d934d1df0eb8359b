//! quadroute - safe flight planning over transmitter coverage
//!
//! Usage:
//!   quadroute                         Read a query from stdin
//!   quadroute solve <scene>           Solve a scene file
//!   quadroute render <scene> -o <svg> Draw a scene and its path
//!   quadroute benchmark               Time random queries
//!   quadroute strategies              List search strategies

use std::env;

use env_logger::{Builder, Env};

use quadroute::SearchStrategy;

mod cli;
use cli::{cmd_benchmark, cmd_prompt, cmd_render, cmd_solve};

fn main() {
    Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        None => cmd_prompt(&[]),
        Some("prompt") => cmd_prompt(&args[2..]),
        Some("solve") => cmd_solve(&args[2..]),
        Some("render") => cmd_render(&args[2..]),
        Some("benchmark") => cmd_benchmark(&args[2..]),
        Some("strategies") => {
            cmd_strategies();
            Ok(())
        }
        Some("help" | "--help" | "-h") => {
            print_usage(&args[0]);
            Ok(())
        }
        Some(other) => {
            print_usage(&args[0]);
            Err(format!("Unknown command: {}", other))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("quadroute - safe flight planning over transmitter coverage");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} [prompt] [--svg <file>] < input.txt", prog);
    eprintln!("  {} solve <scene> [--json] [--strategy <name>]", prog);
    eprintln!("  {} render <scene> -o <out.svg> [--png <out.png>]", prog);
    eprintln!("  {} benchmark [--max n] [--step n] [--iterations n] [--seed n]", prog);
    eprintln!("  {} strategies", prog);
    eprintln!();
    eprintln!("Scene files: .yaml/.yml, .json, or .svg with start/end markers.");
    eprintln!("Run '{} <command> --help' for command options.", prog);
    eprintln!();
    eprintln!("Logging: set RUST_LOG=debug for search details.");
}

fn cmd_strategies() {
    println!("Available strategies:");
    for strategy in SearchStrategy::all() {
        println!("  {:<6} {}", strategy.name(), strategy.description());
    }
}
