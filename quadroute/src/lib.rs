//! # quadroute
//!
//! Decide whether an agent can fly from a start point to an end point
//! while always staying inside at least one transmitter's coverage disk,
//! and if so, which chain of transmitters carries it there.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! ```
//! use quadroute::{find_path, Point, Transmitter};
//!
//! let transmitters = [
//!     Transmitter::at(0.0, 0.0, 2.0),
//!     Transmitter::at(3.0, 0.0, 2.0),
//! ];
//! let result = find_path(Point::new(-1.0, 0.0), Point::new(4.0, 0.0), &transmitters);
//! assert!(result.reachable);
//! assert_eq!(result.path.len(), 2);
//! ```

pub mod geometry;
pub mod graph;
pub mod path_finder;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use geometry::{scene_bounds, Point, Transmitter};
pub use graph::OverlapGraph;
pub use path_finder::{find_path, PathFinder, PathResult, SearchStrategy};
pub use svg::{extract_scene_from_svg, SvgError, SvgScene};
