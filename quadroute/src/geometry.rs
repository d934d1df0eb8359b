//! Core geometry types for quadroute.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! `#[derive(...)]` generates the boring impls for us, but not every trait
//! can be derived for every field type. `f64` is `PartialEq` but neither
//! `Eq` nor `Hash` (NaN is not equal to itself), so the types below derive
//! what they can and implement `Eq`/`Hash` by hand. That is what lets a
//! `Transmitter` live in a `HashSet` during the search.

use std::hash::{Hash, Hasher};

/// A 2D point with x,y coordinates.
///
/// Coordinates are expected to be finite. Two points with equal
/// coordinates are the same point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A circular coverage zone: a center and a radius ("power").
///
/// Equality and hashing use the `(center, power)` value, so two
/// transmitters with the same center and power are one node to the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transmitter {
    pub center: Point,
    pub power: f64,
}

/// Bit pattern used for hashing. `-0.0 == 0.0`, so both must hash alike.
#[inline]
fn hash_bits(value: f64) -> u64 {
    if value == 0.0 { 0.0_f64.to_bits() } else { value.to_bits() }
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    ///
    /// Symmetric: `a.distance_to(b) == b.distance_to(a)`.
    #[inline]
    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bits(self.x).hash(state);
        hash_bits(self.y).hash(state);
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Transmitter {
    #[inline]
    pub fn new(center: Point, power: f64) -> Self {
        Self { center, power }
    }

    /// Shorthand for `Transmitter::new(Point::new(x, y), power)`.
    #[inline]
    pub fn at(x: f64, y: f64, power: f64) -> Self {
        Self::new(Point::new(x, y), power)
    }

    /// True if `point` lies inside the closed disk (boundary counts).
    #[inline]
    pub fn covers(&self, point: Point) -> bool {
        self.center.distance_to(point) <= self.power
    }

    /// True if the two closed disks share at least one point.
    ///
    /// Tangent disks and fully nested disks both overlap. The test is
    /// symmetric because distance and addition are.
    #[inline]
    pub fn overlaps(&self, other: &Transmitter) -> bool {
        self.center.distance_to(other.center) <= self.power + other.power
    }

    /// Bounding box of the disk as (min_x, min_y, max_x, max_y).
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        (
            self.center.x - self.power,
            self.center.y - self.power,
            self.center.x + self.power,
            self.center.y + self.power,
        )
    }
}

impl Eq for Transmitter {}

impl Hash for Transmitter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.center.hash(state);
        hash_bits(self.power).hash(state);
    }
}

impl std::fmt::Display for Transmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} r={}", self.center, self.power)
    }
}

/// Bounding box covering every disk and every extra point.
///
/// Returns `None` when there is nothing to frame.
pub fn scene_bounds(transmitters: &[Transmitter], extra_points: &[Point]) -> Option<(f64, f64, f64, f64)> {
    let boxes = transmitters
        .iter()
        .map(Transmitter::bounding_box)
        .chain(extra_points.iter().map(|p| (p.x, p.y, p.x, p.y)));

    boxes.fold(None, |acc, (x1, y1, x2, y2)| match acc {
        None => Some((x1, y1, x2, y2)),
        Some((min_x, min_y, max_x, max_y)) => Some((
            min_x.min(x1),
            min_y.min(y1),
            max_x.max(x2),
            max_y.max(y2),
        )),
    })
}
