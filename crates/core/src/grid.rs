//! Grid module - the 3D occupancy array
//!
//! The grid is a 10x20x10 pit where each cell is empty or holds one [`Cube`].
//! Uses a flat boxed slice indexed `[y][z][x]` for cache locality, so the natural
//! traversal order is height ascending, then depth, then width.
//! Coordinates: x and z range 0..9, y ranges 0..19 (bottom to top).
//!
//! Every mutation is journaled as a [`BoardEvent`]. The journal holds at most
//! [`JOURNAL_CAPACITY`] events; when it fills up the oldest half is discarded and
//! counted in [`Grid::events_dropped`], so a caller that never drains stays bounded.

use crate::cube::Cube;
use crate::error::BoardError;
use crate::events::BoardEvent;
use crate::types::{Direction, Pos, BOARD_HEIGHT, BOARD_SIZE, GRID_CELLS, LAYER_CELLS};

/// Maximum number of undrained events kept by the journal
pub const JOURNAL_CAPACITY: usize = 8192;

/// A grid cell (None = empty)
pub type Cell = Option<Cube>;

/// The playing field
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, layer-major order ((y * SIZE + z) * SIZE + x)
    cells: Box<[Cell]>,
    next_local_id: u32,
    journal: Vec<BoardEvent>,
    dropped: u64,
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: vec![None; GRID_CELLS].into_boxed_slice(),
            next_local_id: 1,
            journal: Vec::new(),
            dropped: 0,
        }
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(pos: Pos) -> Option<usize> {
        if !pos.in_bounds() {
            return None;
        }
        let size = BOARD_SIZE as usize;
        Some((pos.y as usize) * LAYER_CELLS + (pos.z as usize) * size + (pos.x as usize))
    }

    /// Width (X extent) of the grid
    pub fn width(&self) -> u8 {
        BOARD_SIZE
    }

    /// Depth (Z extent) of the grid
    pub fn depth(&self) -> u8 {
        BOARD_SIZE
    }

    /// Height (Y extent) of the grid
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get the cube at a position
    /// Returns None if the cell is empty or out of bounds
    pub fn get(&self, pos: Pos) -> Option<&Cube> {
        Self::index(pos).and_then(|idx| self.cells[idx].as_ref())
    }

    fn get_mut(&mut self, pos: Pos) -> Option<&mut Cube> {
        Self::index(pos).and_then(|idx| self.cells[idx].as_mut())
    }

    /// Coordinate form of [`Grid::get`]
    pub fn cell_at(&self, x: i8, y: i8, z: i8) -> Option<&Cube> {
        self.get(Pos::new(x, y, z))
    }

    /// Check if position is occupied; out-of-bounds counts as occupied
    pub fn is_occupied(&self, pos: Pos) -> bool {
        match Self::index(pos) {
            Some(idx) => self.cells[idx].is_some(),
            None => true,
        }
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, pos: Pos) -> bool {
        !pos.in_bounds()
    }

    /// Collision predicate shared by shifts, rotations, placement and the cascade
    ///
    /// True when `pos` is outside the grid or holds a cube of a different owner.
    /// A cell held by `owner` itself does not collide.
    pub fn check_collision(&self, pos: Pos, owner: u32) -> bool {
        match Self::index(pos) {
            None => true,
            Some(idx) => match &self.cells[idx] {
                Some(cube) => cube.owner != owner,
                None => false,
            },
        }
    }

    /// Store a cube at its own position
    ///
    /// A cell already held by the same owner is overwritten and the old cube's
    /// neighbours lose their links to it; any other occupant is a
    /// [`BoardError::CellConflict`]. The cube receives a fresh local id.
    pub fn place(&mut self, mut cube: Cube) -> Result<(), BoardError> {
        let idx = Self::index(cube.pos).ok_or(BoardError::OutOfBounds { pos: cube.pos })?;
        if let Some(occupant) = self.cells[idx] {
            if occupant.owner != cube.owner {
                return Err(BoardError::CellConflict {
                    pos: cube.pos,
                    owner: cube.owner,
                    occupant: occupant.owner,
                });
            }
            self.unlink(&occupant);
        }

        cube.local_id = self.next_local_id;
        self.next_local_id = self.next_local_id.wrapping_add(1).max(1);
        self.cells[idx] = Some(cube);
        self.record(BoardEvent::CubeAdded(cube));
        Ok(())
    }

    /// Clear a cell, returning the removed cube
    ///
    /// Each attached neighbour loses its link back to the removed cube, keeping the
    /// attachment graph symmetric. No-op on an empty or out-of-bounds cell.
    pub fn remove(&mut self, pos: Pos) -> Option<Cube> {
        let idx = Self::index(pos)?;
        let cube = self.cells[idx].take()?;
        self.unlink(&cube);

        self.record(BoardEvent::CubeRemoved(pos));
        Some(cube)
    }

    /// Drop the neighbours' links back to `cube`
    fn unlink(&mut self, cube: &Cube) {
        for dir in cube.attachments.iter() {
            if let Some(neighbour) = self.get_mut(cube.pos.step(dir)) {
                neighbour.attachments.set(dir.opposite(), false);
            }
        }
    }

    /// Relocate a cube into an empty cell, keeping its attachments
    ///
    /// Returns false if the source is empty or the target is occupied or out of
    /// bounds. Callers moving a rigid body must move every member by the same
    /// offset so the links still point at the right neighbours.
    pub fn move_cube(&mut self, from: Pos, to: Pos) -> bool {
        let (Some(src), Some(dst)) = (Self::index(from), Self::index(to)) else {
            return false;
        };
        if self.cells[dst].is_some() {
            return false;
        }
        let Some(mut cube) = self.cells[src].take() else {
            return false;
        };
        cube.pos = to;
        self.cells[dst] = Some(cube);
        self.record(BoardEvent::CubeMoved { from, to });
        true
    }

    /// Visit every cell: height ascending, then depth, then width
    pub fn for_each_cell(&self, mut visitor: impl FnMut(Pos, Option<&Cube>)) {
        for y in 0..BOARD_HEIGHT as i8 {
            for z in 0..BOARD_SIZE as i8 {
                for x in 0..BOARD_SIZE as i8 {
                    let pos = Pos::new(x, y, z);
                    visitor(pos, self.get(pos));
                }
            }
        }
    }

    /// All cubes in traversal order
    pub fn cubes(&self) -> impl Iterator<Item = &Cube> + '_ {
        self.cells.iter().filter_map(|c| c.as_ref())
    }

    pub fn cube_count(&self) -> usize {
        self.cubes().count()
    }

    /// Cubes placed by one owner
    pub fn cubes_owned_by(&self, owner: u32) -> impl Iterator<Item = &Cube> + '_ {
        self.cubes().filter(move |c| c.owner == owner)
    }

    fn layer(&self, y: usize) -> &[Cell] {
        let start = y * LAYER_CELLS;
        &self.cells[start..start + LAYER_CELLS]
    }

    /// Check if every cell of a layer is occupied (by any owner)
    pub fn is_layer_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.layer(y).iter().all(|cell| cell.is_some())
    }

    /// Check if a layer has no cubes at all
    pub fn is_layer_empty(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return true;
        }
        self.layer(y).iter().all(|cell| cell.is_none())
    }

    /// Number of cubes in a layer
    pub fn layer_count(&self, y: usize) -> usize {
        if y >= BOARD_HEIGHT as usize {
            return 0;
        }
        self.layer(y).iter().filter(|cell| cell.is_some()).count()
    }

    /// Check that every attachment link has its reciprocal on the neighbour
    pub fn attachments_consistent(&self) -> bool {
        self.cubes().all(|cube| {
            cube.attachments.iter().all(|dir| {
                self.get(cube.pos.step(dir))
                    .is_some_and(|n| n.attachments.has(dir.opposite()))
            })
        })
    }

    /// Record an event that is not a cell mutation (layer clear, overflow)
    pub(crate) fn push_event(&mut self, event: BoardEvent) {
        self.record(event);
    }

    fn record(&mut self, event: BoardEvent) {
        if self.journal.len() >= JOURNAL_CAPACITY {
            let stale = JOURNAL_CAPACITY / 2;
            self.journal.drain(..stale);
            self.dropped += stale as u64;
        }
        self.journal.push(event);
    }

    /// Events discarded because the journal was full
    pub fn events_dropped(&self) -> u64 {
        self.dropped
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[BoardEvent] {
        &self.journal
    }

    /// Take all recorded events
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.journal)
    }

    /// Empty the grid. Removals are journaled so mirrors can drop their copies.
    pub fn clear(&mut self) {
        for idx in 0..self.cells.len() {
            if let Some(cube) = self.cells[idx].take() {
                self.record(BoardEvent::CubeRemoved(cube.pos));
            }
        }
    }

    /// Direction-by-direction check used by the attachment tests
    pub fn is_attached(&self, pos: Pos, dir: Direction) -> bool {
        self.get(pos).is_some_and(|c| c.attachments.has(dir))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
