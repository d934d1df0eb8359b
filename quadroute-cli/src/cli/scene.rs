//! Scene files: declarative query inputs.
//!
//! A scene is a start point, an end point and a list of transmitters.
//! YAML and JSON scenes are read with serde; SVG scenes go through
//! `quadroute::extract_scene_from_svg` and need start/end markers.
//!
//! ```yaml
//! name: demo
//! start: [10, 19]
//! end: [19, 14]
//! transmitters:
//!   - { x: 6, y: 11, power: 4 }
//!   - { x: 8, y: 17, power: 3 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use quadroute::{extract_scene_from_svg, Point, Transmitter};

/// A complete query input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Optional scene name
    #[serde(default)]
    pub name: Option<String>,

    /// Start point as [x, y]
    pub start: [f64; 2],

    /// End point as [x, y]
    pub end: [f64; 2],

    /// Coverage disks, in search order
    #[serde(default)]
    pub transmitters: Vec<TransmitterSpec>,
}

/// One transmitter entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransmitterSpec {
    pub x: f64,
    pub y: f64,
    pub power: f64,
}

impl From<&Transmitter> for TransmitterSpec {
    fn from(t: &Transmitter) -> Self {
        Self { x: t.center.x, y: t.center.y, power: t.power }
    }
}

impl Scene {
    /// Build a scene from in-memory values.
    pub fn new(start: Point, end: Point, transmitters: &[Transmitter]) -> Self {
        Self {
            name: None,
            start: [start.x, start.y],
            end: [end.x, end.y],
            transmitters: transmitters.iter().map(TransmitterSpec::from).collect(),
        }
    }

    /// Load a scene, picking the format from the file extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scene file {}: {}", path.display(), e))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        let mut scene = match extension.as_str() {
            "json" => Self::from_json(&content)?,
            "svg" => Self::from_svg(&content)?,
            _ => Self::from_yaml(&content)?,
        };

        if scene.name.is_none() {
            scene.name = path.file_stem().and_then(|s| s.to_str()).map(str::to_string);
        }

        log::info!(
            "loaded scene {:?}: {} transmitters",
            scene.name.as_deref().unwrap_or(""),
            scene.transmitters.len()
        );
        Ok(scene)
    }

    pub fn from_yaml(content: &str) -> Result<Self, String> {
        let scene: Scene = serde_yaml::from_str(content)
            .map_err(|e| format!("Failed to parse scene YAML: {}", e))?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        let scene: Scene = serde_json::from_str(content)
            .map_err(|e| format!("Failed to parse scene JSON: {}", e))?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn from_svg(content: &str) -> Result<Self, String> {
        let imported = extract_scene_from_svg(content).map_err(|e| e.to_string())?;
        let start = imported
            .start
            .ok_or("SVG scene has no start marker (circle with data-role=\"start\")")?;
        let end = imported
            .end
            .ok_or("SVG scene has no end marker (circle with data-role=\"end\")")?;
        let scene = Scene::new(start, end, &imported.transmitters);
        scene.validate()?;
        Ok(scene)
    }

    /// Reject non-finite numbers and negative powers.
    pub fn validate(&self) -> Result<(), String> {
        if !self.start.iter().all(|v| v.is_finite()) {
            return Err(format!("Start point is not finite: {:?}", self.start));
        }
        if !self.end.iter().all(|v| v.is_finite()) {
            return Err(format!("End point is not finite: {:?}", self.end));
        }
        for (i, t) in self.transmitters.iter().enumerate() {
            if !(t.x.is_finite() && t.y.is_finite() && t.power.is_finite()) {
                return Err(format!("Transmitter {} has a non-finite value", i + 1));
            }
            if t.power < 0.0 {
                return Err(format!("Transmitter {} has negative power {}", i + 1, t.power));
            }
        }
        Ok(())
    }

    pub fn start_point(&self) -> Point {
        Point::new(self.start[0], self.start[1])
    }

    pub fn end_point(&self) -> Point {
        Point::new(self.end[0], self.end[1])
    }

    pub fn transmitters(&self) -> Vec<Transmitter> {
        self.transmitters
            .iter()
            .map(|t| Transmitter::at(t.x, t.y, t.power))
            .collect()
    }

    /// Display name, falling back to "scene".
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("scene")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
name: demo
start: [10, 19]
end: [19, 14]
transmitters:
  - { x: 6, y: 11, power: 4 }
  - { x: 8, y: 17, power: 3 }
"#;

    #[test]
    fn parse_yaml_scene() {
        let scene = Scene::from_yaml(YAML).unwrap();
        assert_eq!(scene.name.as_deref(), Some("demo"));
        assert_eq!(scene.start_point(), Point::new(10.0, 19.0));
        assert_eq!(scene.end_point(), Point::new(19.0, 14.0));
        assert_eq!(
            scene.transmitters(),
            vec![Transmitter::at(6.0, 11.0, 4.0), Transmitter::at(8.0, 17.0, 3.0)]
        );
    }

    #[test]
    fn parse_json_scene_without_transmitters() {
        let scene = Scene::from_json(r#"{"start": [0, 0], "end": [1, 1]}"#).unwrap();
        assert!(scene.transmitters.is_empty());
        assert_eq!(scene.display_name(), "scene");
    }

    #[test]
    fn negative_power_is_rejected() {
        let yaml = "start: [0, 0]\nend: [1, 1]\ntransmitters:\n  - { x: 0, y: 0, power: -2 }\n";
        let err = Scene::from_yaml(yaml).unwrap_err();
        assert!(err.contains("negative power"), "{}", err);
    }

    #[test]
    fn missing_end_is_a_parse_error() {
        let err = Scene::from_yaml("start: [0, 0]\n").unwrap_err();
        assert!(err.starts_with("Failed to parse scene YAML"), "{}", err);
    }

    #[test]
    fn svg_scene_needs_markers() {
        let svg = r#"<svg><circle cx="0" cy="0" r="2"/><circle data-role="start" cx="0" cy="0" r="0.5"/></svg>"#;
        let err = Scene::from_svg(svg).unwrap_err();
        assert!(err.contains("no end marker"), "{}", err);

        let svg = r#"<svg><circle cx="0" cy="0" r="2"/><circle data-role="start" cx="0" cy="0" r="0.5"/><circle data-role="end" cx="1" cy="0" r="0.5"/></svg>"#;
        let scene = Scene::from_svg(svg).unwrap();
        assert_eq!(scene.transmitters(), vec![Transmitter::at(0.0, 0.0, 2.0)]);
        assert_eq!(scene.end_point(), Point::new(1.0, 0.0));
    }

    #[test]
    fn yaml_round_trip_keeps_order() {
        let ts = [Transmitter::at(3.0, 0.0, 1.0), Transmitter::at(0.0, 0.0, 2.0)];
        let scene = Scene::new(Point::new(0.0, 0.0), Point::new(3.0, 0.0), &ts);
        let text = serde_yaml::to_string(&scene).unwrap();
        assert_eq!(Scene::from_yaml(&text).unwrap().transmitters(), ts.to_vec());
    }
}
