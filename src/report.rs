//! Serializable session report built from a [`GameSnapshot`].

use serde::{Deserialize, Serialize};

use crate::core::seeds::get_seed;
use crate::core::shapes::get_template;
use crate::core::snapshot::{
    GameSnapshot, OccupancySnapshot, CELL_ACTIVE, CELL_FIXTURE, CELL_FROZEN,
};
use crate::core::GameState;
use crate::types::{BOARD_HEIGHT, BOARD_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardReport {
    pub width: u8,
    pub depth: u8,
    pub height: u8,
    /// `[y][z][x]`: 0 = empty, 1 = fixture, 2 = frozen, 3 = active piece
    pub cells: OccupancySnapshot,
    pub layer_fill: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveReport {
    pub id: u32,
    pub template: String,
    pub x: i8,
    pub y: i8,
    pub z: i8,
    pub phase: String,
    pub cells: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub board_name: String,
    pub board_id: usize,
    pub seed: u32,
    pub ticks: u64,
    pub playable: bool,
    pub paused: bool,
    pub game_over: bool,
    pub layers_cleared: u32,
    pub pieces_frozen: u32,
    pub fixtures: usize,
    pub frozen: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<ActiveReport>,
    pub board: BoardReport,
}

impl From<&GameSnapshot> for SessionReport {
    fn from(snap: &GameSnapshot) -> Self {
        let active = snap.active.map(|a| ActiveReport {
            id: a.id,
            template: get_template(a.template).name.to_string(),
            x: a.anchor.x,
            y: a.anchor.y,
            z: a.anchor.z,
            phase: a.phase.as_str().to_string(),
            cells: a.cells,
        });

        Self {
            board_name: get_seed(snap.board).name.to_string(),
            board_id: snap.board,
            seed: snap.seed,
            ticks: snap.ticks,
            playable: snap.playable(),
            paused: snap.paused,
            game_over: snap.game_over,
            layers_cleared: snap.layers_cleared,
            pieces_frozen: snap.pieces_frozen,
            fixtures: snap.count(CELL_FIXTURE),
            frozen: snap.count(CELL_FROZEN),
            active,
            board: BoardReport {
                width: BOARD_SIZE,
                depth: BOARD_SIZE,
                height: BOARD_HEIGHT,
                cells: snap.cells,
                layer_fill: (0..BOARD_HEIGHT as usize)
                    .map(|y| snap.layer_fill(y))
                    .collect(),
            },
        }
    }
}

pub fn build_report(game: &GameState) -> SessionReport {
    SessionReport::from(&game.snapshot())
}

impl SessionReport {
    /// Number of active-piece cells in the occupancy grid
    pub fn active_cells(&self) -> usize {
        self.board
            .cells
            .iter()
            .flatten()
            .flatten()
            .filter(|&&c| c == CELL_ACTIVE)
            .count()
    }

    /// Highest non-empty layer plus one (0 for an empty pit)
    pub fn stack_height(&self) -> usize {
        self.board
            .layer_fill
            .iter()
            .rposition(|&n| n > 0)
            .map_or(0, |y| y + 1)
    }
}

/// Human-readable summary printed when `--json` is not given
pub fn summary_lines(report: &SessionReport) -> [String; 5] {
    let state = if report.game_over {
        "GAME_OVER"
    } else if report.paused {
        "PAUSED"
    } else if report.playable {
        "PLAY"
    } else {
        "IDLE"
    };
    let active = match &report.active {
        Some(a) => format!("ACTIVE #{} {} at ({}, {}, {})", a.id, a.template, a.x, a.y, a.z),
        None => "ACTIVE -".to_string(),
    };

    [
        format!("STATE {}", state),
        format!(
            "BOARD {} (#{}) SEED {}",
            report.board_name, report.board_id, report.seed
        ),
        format!(
            "TICKS {} PIECES {} LAYERS {}",
            report.ticks, report.pieces_frozen, report.layers_cleared
        ),
        format!(
            "CUBES fixtures={} frozen={} stack={}",
            report.fixtures,
            report.frozen,
            report.stack_height()
        ),
        active,
    ]
}
