//! Voxel Tetris (workspace facade crate).
//!
//! Re-exports the engine crates as `voxel_tetris::{core, types}` and hosts the
//! pieces of the headless runner that are worth testing on their own: run
//! configuration, the JSON session report and the logging observer.

pub use voxel_tetris_core as core;
pub use voxel_tetris_types as types;

pub mod config;
pub mod logging;
pub mod report;
