//! Gravity cascade - compaction and connectivity-aware falling after a clear
//!
//! Once layers clear, everything above them has to come down. This happens in
//! two stages:
//!
//! 1. **Compaction** shifts the whole stack above each cleared layer down by one.
//!    A cleared bottom layer is only compacted on a board without fixtures; on a
//!    seeded board the fixtures stay and row 0 becomes a floor to settle onto.
//! 2. **Settling** walks every cube from row 1 upward. A cube falls only if its
//!    whole attachment component can fall, so a frozen remnant moves as one rigid
//!    body. Passes repeat until nothing moves.
//!
//! [`run_cascade`] loops clear → compact → settle → rescan until a scan finds no
//! complete layer.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::layers::{scan_layers, ClearedLayers};
use crate::types::{Direction, Pos, BOARD_HEIGHT, BOARD_SIZE, MAX_PIECE_CELLS};

/// Cubes already examined by one [`can_fall`] query: `(local_id, position)`
pub type Visited = ArrayVec<(u32, Pos), MAX_PIECE_CELLS>;

/// Outcome of a full cascade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Layers cleared across all rounds
    pub layers_cleared: u32,
    /// Clear → compact → settle rounds run
    pub rounds: u32,
    /// Cube moves performed by compaction and settling
    pub moves: u32,
}

/// Check whether the cube at `pos` and everything attached to it can drop one row
///
/// `visited` collects the component as it is explored and guards against cycles;
/// when the result is true it holds exactly the cubes that must move together.
///
/// The cell below must be empty or hold a cube attached to this one from below
/// (a member of the same rigid body that moves with it). An unattached cube of
/// the same owner still blocks, since no two cubes may share a cell.
pub fn can_fall(grid: &Grid, pos: Pos, visited: &mut Visited) -> bool {
    if pos.y <= 0 {
        return false;
    }
    let Some(cube) = grid.get(pos) else {
        return false;
    };
    if visited.iter().any(|&(id, _)| id == cube.local_id) {
        return true;
    }
    if visited.try_push((cube.local_id, pos)).is_err() {
        return false;
    }

    let below = pos.step(Direction::YNeg);
    if grid.get(below).is_some() && !cube.attachments.has(Direction::YNeg) {
        return false;
    }

    cube.attachments
        .iter()
        .all(|dir| can_fall(grid, pos.step(dir), visited))
}

/// Drop every cube above `target` by one row into the emptied layer
fn shift_stack_down(grid: &mut Grid, target: u8) -> u32 {
    let n = BOARD_SIZE as i8;
    let mut moves = 0;
    for y in (target as i8 + 1)..BOARD_HEIGHT as i8 {
        for z in 0..n {
            for x in 0..n {
                let from = Pos::new(x, y, z);
                if grid.get(from).is_some() && grid.move_cube(from, from.offset(0, -1, 0)) {
                    moves += 1;
                }
            }
        }
    }
    moves
}

/// Compact the stack over each cleared layer
///
/// `cleared` must be ascending. Each applied compaction lowers the layers above
/// it, so later indices are adjusted by the number of compactions already done.
/// Returns the number of cube moves.
pub fn compact_layers(grid: &mut Grid, cleared: &[u8], is_blank: bool) -> u32 {
    let mut applied = 0u8;
    let mut moves = 0;
    for &layer in cleared {
        if layer == 0 && !is_blank {
            continue;
        }
        moves += shift_stack_down(grid, layer - applied);
        applied += 1;
    }
    moves
}

/// Move a whole component down one row, lowest cubes first
fn drop_component(grid: &mut Grid, component: &mut Visited) -> u32 {
    component.sort_by_key(|&(_, pos)| (pos.y, pos.z, pos.x));
    let mut moves = 0;
    for &(_, pos) in component.iter() {
        if grid.move_cube(pos, pos.offset(0, -1, 0)) {
            moves += 1;
        }
    }
    moves
}

/// One settle pass from row 1 upward. Returns the number of cube moves.
pub fn settle_pass(grid: &mut Grid) -> u32 {
    let n = BOARD_SIZE as i8;
    let mut moves = 0;
    for y in 1..BOARD_HEIGHT as i8 {
        for z in 0..n {
            for x in 0..n {
                let pos = Pos::new(x, y, z);
                let mut visited = Visited::new();
                if can_fall(grid, pos, &mut visited) {
                    moves += drop_component(grid, &mut visited);
                }
            }
        }
    }
    moves
}

/// Repeat settle passes until the board is stable or `max_passes` is reached
pub fn settle(grid: &mut Grid, max_passes: u32) -> u32 {
    let mut moves = 0;
    for _ in 0..max_passes {
        let pass = settle_pass(grid);
        if pass == 0 {
            break;
        }
        moves += pass;
    }
    moves
}

/// Run clear → compact → settle → rescan until no complete layer remains
///
/// `max_passes` bounds both the number of rounds and the settle passes per round.
pub fn run_cascade(grid: &mut Grid, is_blank: bool, max_passes: u32) -> CascadeReport {
    let mut report = CascadeReport::default();
    while report.rounds < max_passes {
        let cleared: ClearedLayers = scan_layers(grid);
        if cleared.is_empty() {
            break;
        }
        report.layers_cleared += cleared.len() as u32;
        report.moves += compact_layers(grid, &cleared, is_blank);
        report.moves += settle(grid, max_passes);
        report.rounds += 1;
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{Attachments, Cube};

    fn linked(pos: Pos, owner: u32, dirs: &[Direction]) -> Cube {
        let mut links = Attachments::NONE;
        for &d in dirs {
            links.set(d, true);
        }
        Cube::new(pos, owner, 0).with_attachments(links)
    }

    #[test]
    fn test_floor_cube_cannot_fall() {
        let mut grid = Grid::new();
        grid.place(Cube::new(Pos::new(0, 0, 0), 1, 0)).unwrap();
        let mut visited = Visited::new();
        assert!(!can_fall(&grid, Pos::new(0, 0, 0), &mut visited));
    }

    #[test]
    fn test_empty_cell_cannot_fall() {
        let grid = Grid::new();
        let mut visited = Visited::new();
        assert!(!can_fall(&grid, Pos::new(4, 4, 4), &mut visited));
        assert!(!can_fall(&grid, Pos::new(-1, 4, 4), &mut visited));
    }

    #[test]
    fn test_rigid_pair_blocked_by_one_member() {
        let mut grid = Grid::new();
        // A at (1,2,0) over open space, B at (2,2,0) resting on a support
        grid.place(linked(Pos::new(1, 2, 0), 1, &[Direction::XPos])).unwrap();
        grid.place(linked(Pos::new(2, 2, 0), 1, &[Direction::XNeg])).unwrap();
        grid.place(Cube::new(Pos::new(2, 1, 0), 9, 0)).unwrap();

        let mut visited = Visited::new();
        assert!(!can_fall(&grid, Pos::new(1, 2, 0), &mut visited));
        let mut visited = Visited::new();
        assert!(!can_fall(&grid, Pos::new(2, 2, 0), &mut visited));
    }

    #[test]
    fn test_vertical_pair_falls_together() {
        let mut grid = Grid::new();
        grid.place(linked(Pos::new(0, 3, 0), 1, &[Direction::YNeg])).unwrap();
        grid.place(linked(Pos::new(0, 2, 0), 1, &[Direction::YPos])).unwrap();

        let mut visited = Visited::new();
        assert!(can_fall(&grid, Pos::new(0, 3, 0), &mut visited));
        assert_eq!(visited.len(), 2);

        assert_eq!(settle(&mut grid, 32), 4);
        assert!(grid.cell_at(0, 0, 0).is_some());
        assert!(grid.cell_at(0, 1, 0).is_some());
        assert!(grid.attachments_consistent());
    }

    #[test]
    fn test_unattached_cube_on_same_owner_is_blocked() {
        let mut grid = Grid::new();
        grid.place(Cube::new(Pos::new(0, 1, 0), 1, 0)).unwrap();
        grid.place(Cube::new(Pos::new(0, 0, 0), 1, 0)).unwrap();
        let mut visited = Visited::new();
        assert!(!can_fall(&grid, Pos::new(0, 1, 0), &mut visited));
    }

    #[test]
    fn test_compaction_skips_seeded_bottom_layer() {
        let mut grid = Grid::new();
        grid.place(Cube::new(Pos::new(5, 1, 5), 1, 0)).unwrap();
        assert_eq!(compact_layers(&mut grid, &[0], false), 0);
        assert!(grid.cell_at(5, 1, 5).is_some());

        assert_eq!(compact_layers(&mut grid, &[0], true), 1);
        assert!(grid.cell_at(5, 0, 5).is_some());
    }

    #[test]
    fn test_compaction_offsets_multiple_layers() {
        let mut grid = Grid::new();
        grid.place(Cube::new(Pos::new(0, 6, 0), 1, 0)).unwrap();
        // Layers 3 and 4 were cleared beneath it
        compact_layers(&mut grid, &[3, 4], true);
        assert!(grid.cell_at(0, 4, 0).is_some());
        assert_eq!(grid.cube_count(), 1);
    }

    #[test]
    fn test_run_cascade_clears_and_drops() {
        let mut grid = Grid::new();
        for z in 0..BOARD_SIZE as i8 {
            for x in 0..BOARD_SIZE as i8 {
                grid.place(Cube::new(Pos::new(x, 0, z), 2, 0)).unwrap();
            }
        }
        grid.place(Cube::new(Pos::new(3, 1, 3), 3, 0)).unwrap();

        let report = run_cascade(&mut grid, true, 32);
        assert_eq!(report.layers_cleared, 1);
        assert_eq!(report.rounds, 1);
        assert_eq!(grid.cube_count(), 1);
        assert!(grid.cell_at(3, 0, 3).is_some());
    }
}
