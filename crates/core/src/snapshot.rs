use crate::piece::{Piece, PiecePhase};
use crate::types::{Pos, BOARD_HEIGHT, BOARD_SIZE};

pub const CELL_EMPTY: u8 = 0;
pub const CELL_FIXTURE: u8 = 1;
pub const CELL_FROZEN: u8 = 2;
pub const CELL_ACTIVE: u8 = 3;

const N: usize = BOARD_SIZE as usize;
const H: usize = BOARD_HEIGHT as usize;

/// Occupancy codes indexed `[y][z][x]`
pub type OccupancySnapshot = [[[u8; N]; N]; H];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub id: u32,
    pub template: usize,
    pub anchor: Pos,
    pub phase: PiecePhase,
    pub cells: usize,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            id: value.id,
            template: value.template,
            anchor: value.anchor(),
            phase: value.phase(),
            cells: value.local().filled_count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub cells: OccupancySnapshot,
    pub board: usize,
    pub seed: u32,
    pub active: Option<ActiveSnapshot>,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub layers_cleared: u32,
    pub pieces_frozen: u32,
    pub ticks: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.cells = [[[CELL_EMPTY; N]; N]; H];
        self.board = 0;
        self.seed = 0;
        self.active = None;
        self.started = false;
        self.paused = false;
        self.game_over = false;
        self.layers_cleared = 0;
        self.pieces_frozen = 0;
        self.ticks = 0;
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }

    /// Occupancy code at a position; out of bounds reads as empty
    pub fn code_at(&self, pos: Pos) -> u8 {
        if !pos.in_bounds() {
            return CELL_EMPTY;
        }
        self.cells[pos.y as usize][pos.z as usize][pos.x as usize]
    }

    /// Number of cells holding the given code
    pub fn count(&self, code: u8) -> usize {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .filter(|&&c| c == code)
            .count()
    }

    /// Number of occupied cells in one layer
    pub fn layer_fill(&self, y: usize) -> usize {
        self.cells.get(y).map_or(0, |layer| {
            layer.iter().flatten().filter(|&&c| c != CELL_EMPTY).count()
        })
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            cells: [[[CELL_EMPTY; N]; N]; H],
            board: 0,
            seed: 0,
            active: None,
            started: false,
            paused: false,
            game_over: false,
            layers_cleared: 0,
            pieces_frozen: 0,
            ticks: 0,
        };
        s.clear();
        s
    }
}
