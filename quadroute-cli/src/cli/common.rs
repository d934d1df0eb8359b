//! Common utilities shared across CLI commands.

use std::str::FromStr;

use serde::Serialize;

use quadroute::{PathResult, Point, Transmitter};

/// Output format for query results.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Default PNG scale factor (scene units to pixels).
pub const DEFAULT_PNG_SCALE: f64 = 10.0;

/// A point in JSON output format.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct JsonPoint {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for JsonPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// A transmitter in JSON output format.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct JsonTransmitter {
    pub x: f64,
    pub y: f64,
    pub power: f64,
}

impl From<&Transmitter> for JsonTransmitter {
    fn from(t: &Transmitter) -> Self {
        Self { x: t.center.x, y: t.center.y, power: t.power }
    }
}

/// Take the value following a flag, advancing the cursor.
pub fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

/// Take and parse the value following a flag.
pub fn parse_flag<T: FromStr>(args: &[String], i: &mut usize, flag: &str) -> Result<T, String> {
    let raw = flag_value(args, i, flag)?;
    raw.parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, raw))
}

/// Human-readable verdict line.
pub fn verdict(reachable: bool) -> &'static str {
    if reachable {
        "Safe flight is possible"
    } else {
        "Safe flight is not possible"
    }
}

/// Print the verdict and, when reachable, the transmitter chain.
pub fn print_result(result: &PathResult) {
    println!("{}", verdict(result.reachable));
    for (i, t) in result.path.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, t);
    }
}

/// Render SVG content to a PNG file using resvg.
pub fn generate_png(svg_content: &str, png_path: &str, scale: f64) -> Result<(), String> {
    use tiny_skia::Pixmap;

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| format!("Failed to parse generated SVG: {}", e))?;

    let size = tree.size();
    let pixmap_width = (size.width() as f64 * scale).ceil().max(1.0) as u32;
    let pixmap_height = (size.height() as f64 * scale).ceil().max(1.0) as u32;

    let mut pixmap = Pixmap::new(pixmap_width, pixmap_height)
        .ok_or_else(|| format!("Could not create {}x{} pixmap", pixmap_width, pixmap_height))?;

    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(png_path)
        .map_err(|e| format!("Failed to write {}: {}", png_path, e))?;

    log::info!("wrote {} ({}x{})", png_path, pixmap_width, pixmap_height);
    Ok(())
}
