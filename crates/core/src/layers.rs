//! Layer clear detection
//!
//! A layer is complete when all 100 of its cells are occupied, by any mix of
//! piece cubes and fixtures. Clearing removes the piece cubes and leaves the
//! fixtures in place.

use arrayvec::ArrayVec;

use crate::events::BoardEvent;
use crate::grid::Grid;
use crate::types::{Pos, BOARD_HEIGHT, BOARD_SIZE};

/// Indices of layers cleared by one scan, ascending
pub type ClearedLayers = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// Check if a layer is complete and has at least one cube that a clear would remove
///
/// A complete layer made only of fixtures is never clearable, otherwise the
/// cascade would report it forever.
pub fn is_layer_clearable(grid: &Grid, y: u8) -> bool {
    let y_idx = y as usize;
    if !grid.is_layer_full(y_idx) {
        return false;
    }
    layer_positions(y).any(|pos| grid.get(pos).is_some_and(|c| !c.is_fixture()))
}

fn layer_positions(y: u8) -> impl Iterator<Item = Pos> {
    let n = BOARD_SIZE as i8;
    (0..n).flat_map(move |z| (0..n).map(move |x| Pos::new(x, y as i8, z)))
}

/// Remove the piece cubes of one layer, keeping fixtures. Returns the count removed.
fn clear_layer(grid: &mut Grid, y: u8) -> usize {
    let mut removed = 0;
    for pos in layer_positions(y) {
        if grid.get(pos).is_some_and(|c| !c.is_fixture()) {
            grid.remove(pos);
            removed += 1;
        }
    }
    removed
}

/// Scan every layer bottom-up, clear the complete ones and report their indices
///
/// Each cleared layer is journaled as [`BoardEvent::LayerCleared`]. A board with
/// no complete layers is left untouched.
pub fn scan_layers(grid: &mut Grid) -> ClearedLayers {
    let mut cleared = ClearedLayers::new();
    for y in 0..BOARD_HEIGHT {
        if is_layer_clearable(grid, y) {
            clear_layer(grid, y);
            grid.push_event(BoardEvent::LayerCleared(y));
            cleared.push(y);
        }
    }
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::Cube;

    fn fill_layer(grid: &mut Grid, y: i8, owner: u32) {
        for z in 0..BOARD_SIZE as i8 {
            for x in 0..BOARD_SIZE as i8 {
                grid.place(Cube::new(Pos::new(x, y, z), owner, 0)).unwrap();
            }
        }
    }

    #[test]
    fn test_empty_board_has_no_clears() {
        let mut grid = Grid::new();
        assert!(scan_layers(&mut grid).is_empty());
        assert!(grid.events().is_empty());
    }

    #[test]
    fn test_full_layer_is_cleared() {
        let mut grid = Grid::new();
        fill_layer(&mut grid, 3, 5);
        grid.drain_events();

        let cleared = scan_layers(&mut grid);
        assert_eq!(cleared.as_slice(), &[3]);
        assert!(grid.is_layer_empty(3));
        assert_eq!(grid.events().last(), Some(&BoardEvent::LayerCleared(3)));
    }

    #[test]
    fn test_fixtures_survive_clear() {
        let mut grid = Grid::new();
        for z in 0..BOARD_SIZE as i8 {
            for x in 0..BOARD_SIZE as i8 {
                let owner = if x == 0 { 0 } else { 2 };
                grid.place(Cube::new(Pos::new(x, 0, z), owner, 0)).unwrap();
            }
        }

        assert!(is_layer_clearable(&grid, 0));
        let cleared = scan_layers(&mut grid);
        assert_eq!(cleared.as_slice(), &[0]);
        assert_eq!(grid.layer_count(0), BOARD_SIZE as usize);
        assert!(grid.cubes().all(|c| c.is_fixture()));
    }

    #[test]
    fn test_fixture_only_layer_is_not_clearable() {
        let mut grid = Grid::new();
        fill_layer(&mut grid, 0, 0);
        assert!(grid.is_layer_full(0));
        assert!(!is_layer_clearable(&grid, 0));
        assert!(scan_layers(&mut grid).is_empty());
    }

    #[test]
    fn test_mixed_owners_complete_a_layer() {
        let mut grid = Grid::new();
        for z in 0..BOARD_SIZE as i8 {
            for x in 0..BOARD_SIZE as i8 {
                grid.place(Cube::new(Pos::new(x, 1, z), (x as u32 % 3) + 1, 0))
                    .unwrap();
            }
        }
        assert_eq!(scan_layers(&mut grid).as_slice(), &[1]);
    }

    #[test]
    fn test_out_of_range_layer() {
        let grid = Grid::new();
        assert!(!is_layer_clearable(&grid, BOARD_HEIGHT));
    }
}
