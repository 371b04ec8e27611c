//! Error types for grid placement and game lifecycle.
//!
//! Rejected shifts and rotations are ordinary gameplay and are reported as
//! `bool`s, not errors. Only placement conflicts and board overflow live here.

use thiserror::Error;

use crate::types::Pos;

/// Failure to store a cube in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Target cell holds a cube belonging to a different owner
    #[error("cell ({}, {}, {}) is held by owner {occupant}, cannot place owner {owner}", .pos.x, .pos.y, .pos.z)]
    CellConflict { pos: Pos, owner: u32, occupant: u32 },
    /// Target cell lies outside the pit
    #[error("cell ({}, {}, {}) is outside the board", .pos.x, .pos.y, .pos.z)]
    OutOfBounds { pos: Pos },
}

impl BoardError {
    pub fn pos(&self) -> Pos {
        match self {
            BoardError::CellConflict { pos, .. } | BoardError::OutOfBounds { pos } => *pos,
        }
    }
}

/// Terminal game conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// A landing piece could not be committed: the stack reached the spawn area
    #[error("board overflow while freezing piece {piece_id}")]
    BoardOverflow { piece_id: u32 },
}
