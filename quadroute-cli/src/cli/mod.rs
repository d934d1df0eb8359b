//! CLI command implementations.
//!
//! This module contains the implementations for the CLI subcommands:
//! - `prompt` - Line-oriented text front-end (default)
//! - `solve` - Run one query from a scene file
//! - `render` - Draw a scene and its transmitter chain
//! - `benchmark` - Time queries over random transmitter sets

pub mod common;
pub mod scene;
pub mod prompt;
pub mod solve;
pub mod render;
pub mod benchmark;

pub use prompt::cmd_prompt;
pub use solve::cmd_solve;
pub use render::cmd_render;
pub use benchmark::cmd_benchmark;
