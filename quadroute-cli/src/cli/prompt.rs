//! Prompt command: line-oriented text front-end.
//!
//! Reads, one item per line:
//!
//! ```text
//! <transmitter count>
//! <x> <y> <power>      (count times)
//! <x> <y>              (start)
//! <x> <y>              (end)
//! ```
//!
//! and prints a binary verdict. Blank lines are skipped. Prompts go to
//! stderr, and only when stdin is a terminal, so piped output stays clean.

use std::io::{self, BufRead, IsTerminal};

use quadroute::{PathFinder, Point, SearchStrategy, Transmitter};

use super::common::{flag_value, parse_flag, print_result, DEFAULT_PNG_SCALE};
use super::render::write_outputs;
use super::scene::Scene;

/// Upper bound on the transmitter capacity reserved before any line is read.
const MAX_PREALLOCATED: usize = 1024;

/// A fully parsed query from text input.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub transmitters: Vec<Transmitter>,
    pub start: Point,
    pub end: Point,
}

/// Line reader that remembers where it is for error messages.
struct Lines<R> {
    inner: io::Lines<R>,
    line_no: usize,
    prompt: bool,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R, prompt: bool) -> Self {
        Self { inner: reader.lines(), line_no: 0, prompt }
    }

    /// Next non-blank line split into exactly `expected` fields.
    fn fields(&mut self, expected: usize, label: &str) -> Result<Vec<String>, String> {
        if self.prompt {
            eprint!("{}: ", label);
        }
        loop {
            let line = match self.inner.next() {
                Some(line) => line.map_err(|e| format!("Failed to read input: {}", e))?,
                None => return Err(format!("Unexpected end of input, expected {}", label)),
            };
            self.line_no += 1;

            let fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() != expected {
                return Err(format!(
                    "Line {}: expected {} value(s) for {}, got {}",
                    self.line_no,
                    expected,
                    label,
                    fields.len()
                ));
            }
            return Ok(fields);
        }
    }

    fn numbers(&mut self, expected: usize, label: &str) -> Result<Vec<f64>, String> {
        let fields = self.fields(expected, label)?;
        fields
            .iter()
            .map(|f| match f.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(v),
                _ => Err(format!("Line {}: not a finite number: {}", self.line_no, f)),
            })
            .collect()
    }

    fn point(&mut self, label: &str) -> Result<Point, String> {
        let v = self.numbers(2, label)?;
        Ok(Point::new(v[0], v[1]))
    }
}

/// Parse a query from line-oriented text.
pub fn read_query<R: BufRead>(reader: R, prompt: bool) -> Result<Query, String> {
    let mut lines = Lines::new(reader, prompt);

    let count_field = lines.fields(1, "number of transmitters")?;
    let count: usize = count_field[0].parse().map_err(|_| {
        format!(
            "Line {}: transmitter count must be a non-negative integer, got {}",
            lines.line_no, count_field[0]
        )
    })?;

    // The count is untrusted, so grow past a small preallocation
    let mut transmitters = Vec::with_capacity(count.min(MAX_PREALLOCATED));
    for n in 1..=count {
        let v = lines.numbers(3, &format!("transmitter {} (x y power)", n))?;
        if v[2] < 0.0 {
            return Err(format!("Line {}: power must be non-negative, got {}", lines.line_no, v[2]));
        }
        transmitters.push(Transmitter::at(v[0], v[1], v[2]));
    }

    let start = lines.point("start point (x y)")?;
    let end = lines.point("end point (x y)")?;

    Ok(Query { transmitters, start, end })
}

/// Execute the prompt command.
pub fn cmd_prompt(args: &[String]) -> Result<(), String> {
    let mut svg_output: Option<&str> = None;
    let mut png_output: Option<&str> = None;
    let mut png_scale = DEFAULT_PNG_SCALE;
    let mut strategy = SearchStrategy::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--svg" => svg_output = Some(flag_value(args, &mut i, "--svg")?),
            "--png" => png_output = Some(flag_value(args, &mut i, "--png")?),
            "--png-scale" => png_scale = parse_flag(args, &mut i, "--png-scale")?,
            "--strategy" => {
                let name = flag_value(args, &mut i, "--strategy")?;
                strategy = SearchStrategy::from_name(name)
                    .ok_or_else(|| format!("Unknown strategy: {}", name))?;
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let query = read_query(stdin.lock(), interactive)?;

    let result = PathFinder::new(query.start, query.end, &query.transmitters).search(strategy);
    print_result(&result);

    // Only draw the environment for a successful flight
    if result.reachable {
        let scene = Scene::new(query.start, query.end, &query.transmitters);
        write_outputs(&scene, &result, svg_output, png_output, png_scale)?;
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: quadroute prompt [options] < input.txt");
    eprintln!();
    eprintln!("Reads a transmitter count, then 'x y power' per transmitter,");
    eprintln!("then the start 'x y' and end 'x y', one per line.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --svg <file>            Draw the flight when it is possible");
    eprintln!("  --png <file>            Same, as PNG");
    eprintln!("  --png-scale <n>         Pixels per scene unit (default: {})", DEFAULT_PNG_SCALE);
    eprintln!("  --strategy <name>       Search strategy: bfs, dfs (default: bfs)");
}
