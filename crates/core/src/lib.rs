//! Core engine module - pure, deterministic, and testable
//!
//! This crate contains the voxel board, the pieces, and the clear/cascade rules.
//! It has **no dependencies** on rendering, audio, or I/O, making it:
//!
//! - **Deterministic**: Same seed and inputs produce identical sessions
//! - **Testable**: Every rule is exercised by unit and property tests
//! - **Portable**: Runs headless, behind a renderer, or inside a test harness
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20x10 occupancy grid with collision checks and a mutation journal
//! - [`cube`]: a single occupied cell and its six-way attachment set
//! - [`shapes`]: the catalog of piece templates
//! - [`seeds`]: ground-floor fixture layouts
//! - [`piece`]: the falling piece, its translation and rotation
//! - [`attach`]: attachment links built when a piece is materialised
//! - [`layers`]: complete-layer detection and clearing
//! - [`cascade`]: compaction and rigid-body falling after a clear
//! - [`events`]: board events and the observer trait
//! - [`rng`]: seeded template selection
//! - [`game_state`]: the session controller
//!
//! # Game Rules
//!
//! - Every tick the active piece tries to fall one row
//! - A piece that cannot fall is frozen into the grid
//! - A layer with all 100 cells occupied is cleared, except for fixtures
//! - Cubes above fall, but attached cubes only fall together
//! - Clearing repeats until no complete layer remains
//! - A piece that cannot be committed overflows the board and ends the game
//!
//! # Example
//!
//! ```
//! use voxel_tetris_core::{GameConfig, GameState, TickOutcome};
//! use voxel_tetris_core::shapes::BLOCK_3;
//! use voxel_tetris_types::{Axis, GameAction};
//!
//! let mut game = GameState::new(GameConfig {
//!     debug_template: Some(BLOCK_3),
//!     ..GameConfig::default()
//! });
//! game.start();
//!
//! game.apply_action(GameAction::Shift(Axis::X, 1));
//! game.apply_action(GameAction::Rotate(Axis::Y));
//! assert_eq!(game.advance_tick(), TickOutcome::Fell);
//!
//! game.apply_action(GameAction::HardDrop);
//! assert_eq!(game.pieces_frozen(), 1);
//! ```

pub mod attach;
pub mod cascade;
pub mod cube;
pub mod error;
pub mod events;
pub mod game_state;
pub mod grid;
pub mod layers;
pub mod piece;
pub mod rng;
pub mod seeds;
pub mod shapes;
pub mod snapshot;

pub use voxel_tetris_types as types;

// Re-export commonly used types for convenience
pub use cascade::{can_fall, run_cascade, CascadeReport};
pub use cube::{Attachments, Cube};
pub use error::{BoardError, GameError};
pub use events::{BoardEvent, BoardObserver, EventLog};
pub use game_state::{GameConfig, GameState, TickOutcome};
pub use grid::Grid;
pub use layers::{is_layer_clearable, scan_layers};
pub use piece::{LocalGrid, Piece, PiecePhase};
pub use rng::{SimpleRng, TemplatePicker};
pub use shapes::{get_template, ShapeTemplate};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
