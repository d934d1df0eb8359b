//! Render command: draw a scene and its transmitter chain as SVG.
//!
//! Disks are black outlines, the start is a green `+`, the end a red `+`, and a
//! reachable query adds a dashed blue polyline start -> centers -> end.
//! The plot is y-up, so the drawing is flipped inside a group; circle
//! attributes keep scene coordinates and the output imports back as a
//! scene.

use std::fs;

use quadroute::{scene_bounds, PathFinder, PathResult, Point, SearchStrategy};

use super::common::{flag_value, generate_png, parse_flag, DEFAULT_PNG_SCALE};
use super::scene::Scene;

/// Margin around the scene bounds, in scene units.
const MARGIN: f64 = 5.0;

/// Build the SVG document for a scene and a query result.
pub fn scene_to_svg(scene: &Scene, result: &PathResult) -> String {
    let transmitters = scene.transmitters();
    let start = scene.start_point();
    let end = scene.end_point();

    let (min_x, min_y, max_x, max_y) =
        scene_bounds(&transmitters, &[start, end]).unwrap_or((0.0, 0.0, 0.0, 0.0));
    let (min_x, min_y) = (min_x - MARGIN, min_y - MARGIN);
    let (max_x, max_y) = (max_x + MARGIN, max_y + MARGIN);
    let width = max_x - min_x;
    let height = max_y - min_y;

    // Line widths and marker size scale with the scene
    let stroke = width.max(height) / 400.0;
    let marker = width.max(height) / 100.0;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}" height="{h:.2}" viewBox="{x:.2} {y:.2} {w:.2} {h:.2}">
<title>{title}</title>
<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" fill="white"/>
<g transform="translate(0 {flip:.2}) scale(1 -1)">
"#,
        x = min_x,
        y = min_y,
        w = width,
        h = height,
        flip = min_y + max_y,
        title = xml_escape(scene.display_name()),
    ));

    svg.push_str(&format!(
        "<g stroke=\"black\" stroke-width=\"{:.3}\" fill=\"none\">\n",
        stroke
    ));
    for t in &transmitters {
        svg.push_str(&format!(
            "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\"/>\n",
            t.center.x, t.center.y, t.power
        ));
    }
    svg.push_str("</g>\n");

    if result.reachable {
        let points: String = std::iter::once(start)
            .chain(result.path.iter().map(|t| t.center))
            .chain(std::iter::once(end))
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        svg.push_str(&format!(
            "<polyline points=\"{}\" stroke=\"blue\" stroke-width=\"{:.3}\" stroke-dasharray=\"{:.3} {:.3}\" fill=\"none\"/>\n",
            points,
            stroke * 1.5,
            stroke * 6.0,
            stroke * 4.0
        ));
    }

    push_marker(&mut svg, "start", "green", start, marker, stroke * 2.0);
    push_marker(&mut svg, "end", "red", end, marker, stroke * 2.0);

    svg.push_str("</g>\n</svg>\n");
    svg
}

/// A `+` glyph plus an unfilled role circle that scene import reads back.
fn push_marker(svg: &mut String, role: &str, color: &str, at: Point, size: f64, width: f64) {
    svg.push_str(&format!(
        "<path d=\"M{:.3},{:.3} H{:.3} M{:.3},{:.3} V{:.3}\" stroke=\"{}\" stroke-width=\"{:.3}\" fill=\"none\"/>\n",
        at.x - size, at.y, at.x + size, at.x, at.y - size, at.y + size, color, width
    ));
    svg.push_str(&format!(
        "<circle data-role=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{:.3}\" stroke=\"{}\" stroke-width=\"{:.3}\" fill=\"none\"/>\n",
        role, at.x, at.y, size / 2.0, color, width / 2.0
    ));
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Write the SVG (and optionally a PNG) for a scene and result.
pub fn write_outputs(
    scene: &Scene,
    result: &PathResult,
    svg_path: Option<&str>,
    png_path: Option<&str>,
    png_scale: f64,
) -> Result<(), String> {
    if svg_path.is_none() && png_path.is_none() {
        return Ok(());
    }

    let svg = scene_to_svg(scene, result);

    if let Some(path) = svg_path {
        fs::write(path, &svg).map_err(|e| format!("Failed to write {}: {}", path, e))?;
        eprintln!("Wrote: {}", path);
    }
    if let Some(path) = png_path {
        generate_png(&svg, path, png_scale)?;
        eprintln!("Wrote: {}", path);
    }
    Ok(())
}

/// Execute the render command.
pub fn cmd_render(args: &[String]) -> Result<(), String> {
    let mut scene_path: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut png_output: Option<&str> = None;
    let mut png_scale = DEFAULT_PNG_SCALE;
    let mut strategy = SearchStrategy::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => output_path = Some(flag_value(args, &mut i, "--output")?),
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
    if output_path.is_none() && png_output.is_none() {
        print_usage();
        return Err("Nothing to write: pass -o <file.svg> and/or --png <file.png>".to_string());
    }

    let scene = Scene::load(scene_path)?;
    let transmitters = scene.transmitters();
    let result = PathFinder::new(scene.start_point(), scene.end_point(), &transmitters).search(strategy);

    write_outputs(&scene, &result, output_path, png_output, png_scale)
}

fn print_usage() {
    eprintln!("Usage: quadroute render <scene> -o <out.svg> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>     SVG output file");
    eprintln!("  --png <file>            Also write a PNG");
    eprintln!("  --png-scale <n>         Pixels per scene unit (default: {})", DEFAULT_PNG_SCALE);
    eprintln!("  --strategy <name>       Search strategy: bfs, dfs (default: bfs)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadroute::{extract_scene_from_svg, find_path, Transmitter};

    fn demo() -> Scene {
        let ts = [Transmitter::at(0.0, 0.0, 2.0), Transmitter::at(3.0, 0.0, 2.0)];
        Scene::new(Point::new(-1.0, 0.0), Point::new(4.0, 0.0), &ts)
    }

    #[test]
    fn svg_has_disks_markers_and_path() {
        let scene = demo();
        let result = find_path(scene.start_point(), scene.end_point(), &scene.transmitters());
        let svg = scene_to_svg(&scene, &result);

        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<circle").count(), 4);
        assert!(svg.contains("data-role=\"start\""));
        assert_eq!(svg.matches("stroke=\"green\"").count(), 2, "start cross and ring");
        assert_eq!(svg.matches("<path d=\"M").count(), 2, "one cross per marker");
        assert!(svg.contains("<polyline points=\"-1.00,0.00 0.00,0.00 3.00,0.00 4.00,0.00\""));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn unreachable_scene_has_no_polyline() {
        let scene = Scene::new(Point::new(50.0, 50.0), Point::new(0.0, 0.0), &demo().transmitters());
        let result = find_path(scene.start_point(), scene.end_point(), &scene.transmitters());
        let svg = scene_to_svg(&scene, &result);
        assert!(!svg.contains("<polyline"));
    }

    #[test]
    fn rendered_svg_imports_back() {
        let scene = demo();
        let result = find_path(scene.start_point(), scene.end_point(), &scene.transmitters());
        let imported = extract_scene_from_svg(&scene_to_svg(&scene, &result)).unwrap();
        assert_eq!(imported.transmitters, scene.transmitters());
        assert_eq!(imported.start, Some(scene.start_point()));
        assert_eq!(imported.end, Some(scene.end_point()));
    }

    #[test]
    fn title_is_escaped() {
        let mut scene = demo();
        scene.name = Some("a<b".to_string());
        let svg = scene_to_svg(&scene, &PathResult::default());
        assert!(svg.contains("<title>a&lt;b</title>"));
    }
}
