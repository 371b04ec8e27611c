//! Piece module - the falling block, its local pattern and transforms
//!
//! A piece is a cubic local grid plus a world anchor. Local cell `(lx, ly, lz)`
//! lives at world `(anchor.x + lx, anchor.y - ly, anchor.z + lz)`.
//!
//! While falling, the piece's cells are materialised in the grid as cubes owned
//! by the piece id. Shifts and rotations validate the whole candidate first and
//! only then rebuild those cubes, so a rejected move leaves no trace.

use arrayvec::ArrayVec;

use crate::attach::build_attachments;
use crate::cube::Cube;
use crate::error::{BoardError, GameError};
use crate::grid::Grid;
use crate::shapes::{get_template, LocalCell, ShapeTemplate};
use crate::types::{Axis, Pos, MAX_EXTENT, MAX_PIECE_CELLS};

const STRIDE: usize = MAX_EXTENT as usize;

/// Fixed-size occupancy arena for a piece's local pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalGrid {
    extent: u8,
    cells: [bool; MAX_PIECE_CELLS],
}

impl LocalGrid {
    /// Empty pattern of the given cubic extent
    pub fn empty(extent: u8) -> Self {
        Self {
            extent: extent.clamp(1, MAX_EXTENT),
            cells: [false; MAX_PIECE_CELLS],
        }
    }

    pub fn from_template(template: &ShapeTemplate) -> Self {
        let mut local = Self::empty(template.extent);
        for &cell in template.cells {
            local.set(cell, true);
        }
        local
    }

    #[inline(always)]
    fn index(cell: LocalCell) -> usize {
        (cell.2 as usize * STRIDE + cell.1 as usize) * STRIDE + cell.0 as usize
    }

    fn contains(&self, cell: LocalCell) -> bool {
        cell.0 < self.extent && cell.1 < self.extent && cell.2 < self.extent
    }

    pub fn extent(&self) -> u8 {
        self.extent
    }

    pub fn is_filled(&self, cell: LocalCell) -> bool {
        self.contains(cell) && self.cells[Self::index(cell)]
    }

    /// Returns false if the cell lies outside the pattern
    pub fn set(&mut self, cell: LocalCell, filled: bool) -> bool {
        if !self.contains(cell) {
            return false;
        }
        self.cells[Self::index(cell)] = filled;
        true
    }

    /// Filled cells, z-major then y then x
    pub fn filled(&self) -> impl Iterator<Item = LocalCell> + '_ {
        let s = self.extent;
        (0..s).flat_map(move |z| {
            (0..s).flat_map(move |y| (0..s).map(move |x| (x, y, z)))
        })
        .filter(move |&c| self.cells[Self::index(c)])
    }

    pub fn filled_count(&self) -> usize {
        self.filled().count()
    }

    /// Snapshot of this pattern rotated 90° about `axis`
    ///
    /// The mapping is fixed per axis and exact because the pattern is cubic:
    /// - X: `(x, S-1-z, y)`
    /// - Y: `(S-1-z, y, x)`
    /// - Z: `(S-1-y, x, z)`
    pub fn rotated(&self, axis: Axis) -> Self {
        let last = self.extent - 1;
        let mut out = Self::empty(self.extent);
        for (ox, oy, oz) in self.filled() {
            let dst = match axis {
                Axis::X => (ox, last - oz, oy),
                Axis::Y => (last - oz, oy, ox),
                Axis::Z => (last - oy, ox, oz),
            };
            out.set(dst, true);
        }
        out
    }
}

/// Lifecycle of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiecePhase {
    Spawned,
    Falling,
    Landed,
    Frozen,
}

impl PiecePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PiecePhase::Spawned => "spawned",
            PiecePhase::Falling => "falling",
            PiecePhase::Landed => "landed",
            PiecePhase::Frozen => "frozen",
        }
    }
}

/// The active falling block
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub id: u32,
    pub template: usize,
    pub color: u32,
    local: LocalGrid,
    anchor: Pos,
    phase: PiecePhase,
}

impl Piece {
    /// Create a piece from a catalog template; unknown ids use template 0
    pub fn new(template: usize, id: u32, anchor: Pos) -> Self {
        let shape = get_template(template);
        let template = if template < crate::shapes::template_count() {
            template
        } else {
            0
        };
        Self {
            id,
            template,
            color: shape.color,
            local: LocalGrid::from_template(shape),
            anchor,
            phase: PiecePhase::Spawned,
        }
    }

    pub fn local(&self) -> &LocalGrid {
        &self.local
    }

    pub fn anchor(&self) -> Pos {
        self.anchor
    }

    pub fn phase(&self) -> PiecePhase {
        self.phase
    }

    pub fn extent(&self) -> u8 {
        self.local.extent()
    }

    #[inline]
    fn world_of(anchor: Pos, cell: LocalCell) -> Pos {
        anchor.offset(cell.0 as i8, -(cell.1 as i8), cell.2 as i8)
    }

    /// World position of a local cell at the current anchor
    pub fn world_pos(&self, cell: LocalCell) -> Pos {
        Self::world_of(self.anchor, cell)
    }

    /// World positions of every filled cell
    pub fn world_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.local.filled().map(move |c| self.world_pos(c))
    }

    /// Lowest world layer the piece occupies
    pub fn bottom(&self) -> i8 {
        self.world_cells().map(|p| p.y).min().unwrap_or(self.anchor.y)
    }

    fn collides(&self, grid: &Grid, local: &LocalGrid, anchor: Pos) -> bool {
        local
            .filled()
            .any(|c| grid.check_collision(Self::world_of(anchor, c), self.id))
    }

    /// Check if the piece overlaps anything at its current anchor
    pub fn is_blocked(&self, grid: &Grid) -> bool {
        self.collides(grid, &self.local, self.anchor)
    }

    /// Check whether every filled cell is currently held by this piece
    pub fn is_materialized(&self, grid: &Grid) -> bool {
        self.world_cells()
            .all(|p| grid.get(p).is_some_and(|c| c.owner == self.id))
    }

    /// Write the piece's cells into the grid with freshly built attachments
    ///
    /// Cells the grid refuses are skipped and left unlinked; the first refusal is
    /// returned after every other cell has been placed.
    pub fn materialize(&self, grid: &mut Grid) -> Result<(), BoardError> {
        let placeable: ArrayVec<LocalCell, MAX_PIECE_CELLS> = self
            .local
            .filled()
            .filter(|&c| !grid.check_collision(self.world_pos(c), self.id))
            .collect();

        let mut first_err = None;
        for cell in self.local.filled() {
            let pos = self.world_pos(cell);
            if !placeable.contains(&cell) {
                if first_err.is_none() {
                    first_err = Some(match grid.get(pos) {
                        Some(occupant) => BoardError::CellConflict {
                            pos,
                            owner: self.id,
                            occupant: occupant.owner,
                        },
                        None => BoardError::OutOfBounds { pos },
                    });
                }
                continue;
            }
            let links = build_attachments(&self.local, cell, |n| placeable.contains(&n));
            grid.place(Cube::new(pos, self.id, self.color).with_attachments(links))?;
        }

        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Remove this piece's cubes from the grid
    pub fn dematerialize(&self, grid: &mut Grid) {
        for pos in self.world_cells() {
            if grid.get(pos).is_some_and(|c| c.owner == self.id) {
                grid.remove(pos);
            }
        }
    }

    /// Translate along one axis
    ///
    /// Rejected outright if any filled cell would collide. On success the grid
    /// cubes are rebuilt at the new anchor. Returns whether the shift applied.
    pub fn shift(&mut self, grid: &mut Grid, axis: Axis, offset: i8) -> bool {
        if self.phase == PiecePhase::Frozen {
            return false;
        }
        let target = self.anchor.shifted(axis, offset);
        if self.collides(grid, &self.local, target) {
            return false;
        }

        self.dematerialize(grid);
        self.anchor = target;
        let placed = self.materialize(grid);
        debug_assert!(placed.is_ok());
        self.phase = PiecePhase::Falling;
        true
    }

    /// Rotate 90° about `axis` around the fixed anchor
    ///
    /// The rotated pattern is a separate snapshot; the live pattern and grid are
    /// only touched once the snapshot is known to fit.
    pub fn rotate(&mut self, grid: &mut Grid, axis: Axis) -> bool {
        if self.phase == PiecePhase::Frozen {
            return false;
        }
        let rotated = self.local.rotated(axis);
        if self.collides(grid, &rotated, self.anchor) {
            return false;
        }

        self.dematerialize(grid);
        self.local = rotated;
        let placed = self.materialize(grid);
        debug_assert!(placed.is_ok());
        self.phase = PiecePhase::Falling;
        true
    }

    /// Mark the piece as landed (its downward shift failed)
    pub fn land(&mut self) {
        if self.phase != PiecePhase::Frozen {
            self.phase = PiecePhase::Landed;
        }
    }

    /// Commit the landed piece permanently
    ///
    /// If any cell cannot be held by this piece, the stack has overflowed. Cells
    /// that do fit are still placed so mirrors show the final board.
    pub fn freeze(&mut self, grid: &mut Grid) -> Result<(), GameError> {
        self.land();
        let overflow = GameError::BoardOverflow { piece_id: self.id };
        let result = if self.is_blocked(grid) {
            if grid.cubes_owned_by(self.id).next().is_none() {
                let _ = self.materialize(grid);
            }
            Err(overflow)
        } else if self.is_materialized(grid) {
            Ok(())
        } else {
            self.materialize(grid).map_err(|_| overflow)
        };
        self.phase = PiecePhase::Frozen;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{BLOCK_1, BLOCK_2, BLOCK_3};
    use crate::types::Direction;

    #[test]
    fn test_local_grid_from_template() {
        let local = LocalGrid::from_template(get_template(BLOCK_3));
        assert_eq!(local.extent(), 2);
        assert_eq!(local.filled_count(), 8);
        assert!(!local.is_filled((2, 0, 0)));
    }

    #[test]
    fn test_rotation_four_times_is_identity() {
        let local = LocalGrid::from_template(get_template(BLOCK_2));
        for axis in Axis::ALL {
            let mut r = local;
            for _ in 0..4 {
                r = r.rotated(axis);
            }
            assert_eq!(r, local, "axis {:?}", axis);
        }
    }

    #[test]
    fn test_rotate_bar_about_y() {
        // Bar runs along x at (ly=1, lz=1); about Y it runs along z at x = S-1-1
        let local = LocalGrid::from_template(get_template(BLOCK_1));
        let r = local.rotated(Axis::Y);
        let cells: Vec<_> = r.filled().collect();
        assert_eq!(cells, vec![(2, 1, 0), (2, 1, 1), (2, 1, 2), (2, 1, 3)]);
    }

    #[test]
    fn test_rotate_bar_about_z() {
        let local = LocalGrid::from_template(get_template(BLOCK_1));
        let r = local.rotated(Axis::Z);
        let cells: Vec<_> = r.filled().collect();
        // nx = 3 - 1 = 2, ny = ox
        assert_eq!(cells, vec![(2, 0, 1), (2, 1, 1), (2, 2, 1), (2, 3, 1)]);
    }

    #[test]
    fn test_world_mapping_inverts_y() {
        let piece = Piece::new(BLOCK_3, 1, Pos::new(2, 10, 3));
        let mut cells: Vec<_> = piece.world_cells().collect();
        cells.sort();
        assert!(cells.contains(&Pos::new(2, 10, 3)));
        assert!(cells.contains(&Pos::new(3, 9, 4)));
        assert_eq!(piece.bottom(), 9);
    }

    #[test]
    fn test_materialize_builds_symmetric_links() {
        let mut grid = Grid::new();
        let piece = Piece::new(BLOCK_3, 1, Pos::new(0, 5, 0));
        piece.materialize(&mut grid).unwrap();
        assert_eq!(grid.cube_count(), 8);
        assert!(grid.attachments_consistent());
        assert!(grid.is_attached(Pos::new(0, 5, 0), Direction::YNeg));
        assert!(grid.is_attached(Pos::new(0, 4, 0), Direction::YPos));
    }

    #[test]
    fn test_shift_and_dematerialize() {
        let mut grid = Grid::new();
        let mut piece = Piece::new(BLOCK_3, 1, Pos::new(0, 5, 0));
        piece.materialize(&mut grid).unwrap();

        assert!(piece.shift(&mut grid, Axis::X, 1));
        assert_eq!(piece.anchor(), Pos::new(1, 5, 0));
        assert!(grid.cell_at(0, 5, 0).is_none());
        assert_eq!(grid.cubes_owned_by(1).count(), 8);
        assert_eq!(piece.phase(), PiecePhase::Falling);

        // Wall at x = -1
        assert!(piece.shift(&mut grid, Axis::X, -1));
        assert!(!piece.shift(&mut grid, Axis::X, -1));
        assert_eq!(piece.anchor(), Pos::new(0, 5, 0));
    }

    #[test]
    fn test_freeze_reports_overflow() {
        let mut grid = Grid::new();
        grid.place(Cube::new(Pos::new(0, 0, 0), 0, 0)).unwrap();
        let mut piece = Piece::new(BLOCK_3, 1, Pos::new(0, 1, 0));
        assert!(piece.is_blocked(&grid));
        assert_eq!(
            piece.freeze(&mut grid),
            Err(GameError::BoardOverflow { piece_id: 1 })
        );
        assert_eq!(piece.phase(), PiecePhase::Frozen);
        // Seven cells fit, the fixture stays
        assert_eq!(grid.cubes_owned_by(1).count(), 7);
        assert!(grid.cell_at(0, 0, 0).unwrap().is_fixture());
        assert!(grid.attachments_consistent());
    }
}
