//! Bracket-tagged stderr logging of board events.

use crate::core::{BoardEvent, BoardObserver, Cube};
use crate::types::Pos;

/// One log line per board event, without the tag
pub fn format_event(event: &BoardEvent) -> String {
    match event {
        BoardEvent::CubeAdded(cube) => format!(
            "cube_added x={} y={} z={} owner={}",
            cube.pos.x, cube.pos.y, cube.pos.z, cube.owner
        ),
        BoardEvent::CubeRemoved(pos) => {
            format!("cube_removed x={} y={} z={}", pos.x, pos.y, pos.z)
        }
        BoardEvent::CubeMoved { from, to } => format!(
            "cube_moved x={} y={} z={} -> x={} y={} z={}",
            from.x, from.y, from.z, to.x, to.y, to.z
        ),
        BoardEvent::LayerCleared(layer) => format!("layer_cleared y={}", layer),
        BoardEvent::BoardOverflow => "board_overflow".to_string(),
    }
}

/// Observer that writes every event to stderr as `[Board] ...`
#[derive(Debug, Default)]
pub struct LogObserver {
    pub lines: u64,
}

impl LogObserver {
    fn log(&mut self, event: BoardEvent) {
        eprintln!("[Board] {}", format_event(&event));
        self.lines += 1;
    }
}

impl BoardObserver for LogObserver {
    fn on_cube_added(&mut self, cube: &Cube) {
        self.log(BoardEvent::CubeAdded(*cube));
    }

    fn on_cube_removed(&mut self, pos: Pos) {
        self.log(BoardEvent::CubeRemoved(pos));
    }

    fn on_cube_moved(&mut self, from: Pos, to: Pos) {
        self.log(BoardEvent::CubeMoved { from, to });
    }

    fn on_layer_cleared(&mut self, layer: u8) {
        self.log(BoardEvent::LayerCleared(layer));
    }

    fn on_board_overflow(&mut self) {
        self.log(BoardEvent::BoardOverflow);
    }
}
