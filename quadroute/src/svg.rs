//! SVG scene import - read transmitters from `<circle>` elements.
//!
//! Streams the document with quick-xml instead of building a tree; only
//! circle geometry and a couple of attributes matter here.
//!
//! ## Roles
//!
//! - `data-role="start"` or `id="start"`: the start point (circle center)
//! - `data-role="end"` or `id="end"`: the end point (circle center)
//! - anything else: a transmitter, `r` is its power
//!
//! Transforms are not applied. Scenes exported by the quadroute CLI never
//! use them.

use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use svgtypes::{Length, LengthUnit};

use crate::geometry::{Point, Transmitter};

/// Error type for SVG scene import.
#[derive(Debug, Clone, PartialEq)]
pub enum SvgError {
    ParseError(String),
    InvalidNumber { attribute: String, value: String },
    NoTransmitters,
}

impl std::fmt::Display for SvgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SvgError::ParseError(msg) => write!(f, "SVG parse error: {}", msg),
            SvgError::InvalidNumber { attribute, value } => {
                write!(f, "Invalid value for '{}': {:?}", attribute, value)
            }
            SvgError::NoTransmitters => write!(f, "No transmitter circles found in SVG"),
        }
    }
}

impl std::error::Error for SvgError {}

/// Transmitters plus optional start/end markers read from an SVG document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgScene {
    pub transmitters: Vec<Transmitter>,
    pub start: Option<Point>,
    pub end: Option<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Role {
    Start,
    End,
    Transmitter,
}

/// Extract a scene from SVG content.
///
/// Fails on malformed XML, unparseable or negative circle attributes, and
/// documents with no transmitter circles. Missing markers are `None`.
pub fn extract_scene_from_svg(svg_content: &str) -> Result<SvgScene, SvgError> {
    let mut reader = Reader::from_str(svg_content);
    reader.config_mut().trim_text(true);

    let mut scene = SvgScene::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"circle" {
                    let (role, center, radius) = read_circle(e)?;
                    match role {
                        Role::Start => scene.start = Some(center),
                        Role::End => scene.end = Some(center),
                        Role::Transmitter => scene.transmitters.push(Transmitter::new(center, radius)),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SvgError::ParseError(format!(
                    "XML error at position {}: {}",
                    reader.error_position(),
                    e
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    if scene.transmitters.is_empty() {
        return Err(SvgError::NoTransmitters);
    }

    log::debug!(
        "imported {} transmitters from SVG (start: {}, end: {})",
        scene.transmitters.len(),
        scene.start.is_some(),
        scene.end.is_some()
    );

    Ok(scene)
}

/// Read role, center and radius from a `<circle>` element.
///
/// Missing `cx`/`cy`/`r` default to 0, as in SVG.
fn read_circle(e: &BytesStart) -> Result<(Role, Point, f64), SvgError> {
    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut r = 0.0;
    let mut role = Role::Transmitter;
    let mut explicit_role = false;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref()).unwrap_or("");
        let value = attr
            .unescape_value()
            .map_err(|e| SvgError::ParseError(format!("Bad attribute '{}': {}", key, e)))?;

        match key {
            "cx" => cx = parse_number(key, &value)?,
            "cy" => cy = parse_number(key, &value)?,
            "r" => r = parse_number(key, &value)?,
            "data-role" => {
                explicit_role = true;
                role = role_from_name(&value);
            }
            "id" if !explicit_role => role = role_from_name(&value),
            _ => {}
        }
    }

    if r < 0.0 {
        return Err(SvgError::InvalidNumber {
            attribute: "r".to_string(),
            value: r.to_string(),
        });
    }

    Ok((role, Point::new(cx, cy), r))
}

fn role_from_name(name: &str) -> Role {
    match name.trim() {
        "start" => Role::Start,
        "end" => Role::End,
        _ => Role::Transmitter,
    }
}

/// Parse a unitless or `px` length.
fn parse_number(attribute: &str, value: &str) -> Result<f64, SvgError> {
    let invalid = || SvgError::InvalidNumber {
        attribute: attribute.to_string(),
        value: value.to_string(),
    };

    let length = Length::from_str(value.trim()).map_err(|_| invalid())?;
    match length.unit {
        LengthUnit::None | LengthUnit::Px if length.number.is_finite() => Ok(length.number),
        _ => Err(invalid()),
    }
}
