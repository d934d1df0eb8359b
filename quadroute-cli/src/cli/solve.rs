//! Solve command: run one reachability query from a scene file.

use std::time::Instant;

use serde::Serialize;

use quadroute::{PathFinder, PathResult, SearchStrategy};

use super::common::{
    flag_value, parse_flag, print_result, JsonPoint, JsonTransmitter, OutputFormat, DEFAULT_PNG_SCALE,
};
use super::render::write_outputs;
use super::scene::Scene;

/// JSON output for a solved scene.
#[derive(Serialize)]
struct JsonSolution {
    scene: String,
    strategy: &'static str,
    start: JsonPoint,
    end: JsonPoint,
    transmitters: usize,
    reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    hops: Option<usize>,
    expanded: usize,
    path: Vec<JsonTransmitter>,
    time_ms: f64,
}

impl JsonSolution {
    fn new(scene: &Scene, strategy: SearchStrategy, result: &PathResult, time_ms: f64) -> Self {
        Self {
            scene: scene.display_name().to_string(),
            strategy: strategy.name(),
            start: scene.start_point().into(),
            end: scene.end_point().into(),
            transmitters: scene.transmitters.len(),
            reachable: result.reachable,
            hops: result.reachable.then(|| result.hops()),
            expanded: result.expanded,
            path: result.path.iter().map(JsonTransmitter::from).collect(),
            time_ms,
        }
    }
}

/// Execute the solve command.
pub fn cmd_solve(args: &[String]) -> Result<(), String> {
    let mut scene_path: Option<&str> = None;
    let mut format = OutputFormat::Text;
    let mut strategy = SearchStrategy::default();
    let mut svg_output: Option<&str> = None;
    let mut png_output: Option<&str> = None;
    let mut png_scale = DEFAULT_PNG_SCALE;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => format = OutputFormat::Json,
            "-s" | "--strategy" => {
                let name = flag_value(args, &mut i, "--strategy")?;
                strategy = SearchStrategy::from_name(name)
                    .ok_or_else(|| format!("Unknown strategy: {}", name))?;
            }
            "--svg" => svg_output = Some(flag_value(args, &mut i, "--svg")?),
            "--png" => png_output = Some(flag_value(args, &mut i, "--png")?),
            "--png-scale" => png_scale = parse_flag(args, &mut i, "--png-scale")?,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            path if !path.starts_with('-') => {
                if scene_path.is_none() {
                    scene_path = Some(path);
                }
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    let Some(scene_path) = scene_path else {
        print_usage();
        return Err("Scene file required".to_string());
    };

    let scene = Scene::load(scene_path)?;
    let transmitters = scene.transmitters();
    let finder = PathFinder::new(scene.start_point(), scene.end_point(), &transmitters);

    let started = Instant::now();
    let result = finder.search(strategy);
    let time_ms = started.elapsed().as_secs_f64() * 1000.0;

    log::info!(
        "{} on {}: reachable={} expanded={} in {:.3}ms",
        strategy.name(),
        scene.display_name(),
        result.reachable,
        result.expanded,
        time_ms
    );

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonSolution::new(&scene, strategy, &result, time_ms))
                .map_err(|e| format!("Failed to serialize result: {}", e))?;
            println!("{}", json);
        }
        OutputFormat::Text => print_result(&result),
    }

    write_outputs(&scene, &result, svg_output, png_output, png_scale)
}

fn print_usage() {
    eprintln!("Usage: quadroute solve <scene.yaml|scene.json|scene.svg> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --strategy <name>   Search strategy: bfs, dfs (default: bfs)");
    eprintln!("  --json                  Print the result as JSON");
    eprintln!("  --svg <file>            Also draw the scene and path as SVG");
    eprintln!("  --png <file>            Also draw the scene and path as PNG");
    eprintln!("  --png-scale <n>         Pixels per scene unit (default: {})", DEFAULT_PNG_SCALE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadroute::{find_path, Point, Transmitter};

    #[test]
    fn json_solution_shape() {
        let ts = [Transmitter::at(0.0, 0.0, 2.0), Transmitter::at(3.0, 0.0, 2.0)];
        let scene = Scene::new(Point::new(-1.0, 0.0), Point::new(4.0, 0.0), &ts);
        let result = find_path(scene.start_point(), scene.end_point(), &ts);

        let value = serde_json::to_value(JsonSolution::new(&scene, SearchStrategy::BreadthFirst, &result, 0.5)).unwrap();
        assert_eq!(value["reachable"], true);
        assert_eq!(value["hops"], 1);
        assert_eq!(value["strategy"], "bfs");
        assert_eq!(value["path"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["path"][1]["power"], 2.0);
    }

    #[test]
    fn json_solution_omits_hops_when_unreachable() {
        let scene = Scene::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0), &[]);
        let value = serde_json::to_value(JsonSolution::new(&scene, SearchStrategy::DepthFirst, &PathResult::default(), 0.0)).unwrap();
        assert_eq!(value["reachable"], false);
        assert!(value.get("hops").is_none());
        assert_eq!(value["path"], serde_json::json!([]));
    }
}
