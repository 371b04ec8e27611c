//! Attachment builder
//!
//! When a piece is materialised into the grid, each placed cube records which of
//! its six faces touch another filled cell of the same piece. Local `ly` grows
//! downward, so world `YPos` looks at local `ly - 1`.

use crate::cube::Attachments;
use crate::piece::LocalGrid;
use crate::shapes::LocalCell;
use crate::types::Direction;

/// Local-grid neighbour of `cell` in world direction `dir`, if inside the pattern
pub fn local_neighbour(local: &LocalGrid, cell: LocalCell, dir: Direction) -> Option<LocalCell> {
    let (dx, dy, dz) = dir.offset();
    let nx = cell.0 as i8 + dx;
    let ny = cell.1 as i8 - dy;
    let nz = cell.2 as i8 + dz;
    let s = local.extent() as i8;
    if nx < 0 || ny < 0 || nz < 0 || nx >= s || ny >= s || nz >= s {
        return None;
    }
    Some((nx as u8, ny as u8, nz as u8))
}

/// Attachment set for one filled cell
///
/// `include` decides which filled neighbours are really being placed; a cell the
/// grid refused must not be linked to.
pub fn build_attachments(
    local: &LocalGrid,
    cell: LocalCell,
    include: impl Fn(LocalCell) -> bool,
) -> Attachments {
    let mut links = Attachments::NONE;
    for dir in Direction::ALL {
        if let Some(n) = local_neighbour(local, cell, dir) {
            if local.is_filled(n) && include(n) {
                links.set(dir, true);
            }
        }
    }
    links
}
