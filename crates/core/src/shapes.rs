//! Shapes module - the catalog of piece templates
//!
//! Each template is a cubic local grid of extent `S` listing its filled cells as
//! `(lx, ly, lz)`. Local `ly` grows downward. Flat shapes sit in the middle
//! `lz` slice of a padded cube so that rotation about any axis stays inside
//! the local grid.

use crate::types::MAX_EXTENT;

/// Local cell coordinate `(lx, ly, lz)`
pub type LocalCell = (u8, u8, u8);

/// Immutable piece prototype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeTemplate {
    pub name: &'static str,
    pub color: u32,
    /// Cubic extent S of the local grid
    pub extent: u8,
    pub cells: &'static [LocalCell],
}

impl ShapeTemplate {
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

pub const BLOCK_1: usize = 0;
pub const BLOCK_2: usize = 1;
pub const BLOCK_3: usize = 2;
pub const BLOCK_4: usize = 3;
pub const BLOCK_5: usize = 4;
pub const BLOCK_6: usize = 5;
pub const BLOCK_7: usize = 6;

/// Ordered catalog; an index into it selects a piece type
pub const SHAPES: [ShapeTemplate; 7] = [
    // Bar: four in a row (light blue)
    ShapeTemplate {
        name: "bar",
        color: 0x00_ff_ff,
        extent: 4,
        cells: &[(0, 1, 1), (1, 1, 1), (2, 1, 1), (3, 1, 1)],
    },
    // L: hook over a row of three (blue)
    ShapeTemplate {
        name: "hook",
        color: 0x00_00_ff,
        extent: 3,
        cells: &[(0, 0, 1), (0, 1, 1), (1, 1, 1), (2, 1, 1)],
    },
    // Cube: 2x2x2 solid (yellow)
    ShapeTemplate {
        name: "cube",
        color: 0xff_ff_00,
        extent: 2,
        cells: &[
            (0, 0, 0),
            (1, 0, 0),
            (0, 1, 0),
            (1, 1, 0),
            (0, 0, 1),
            (1, 0, 1),
            (0, 1, 1),
            (1, 1, 1),
        ],
    },
    // S: offset pairs (green)
    ShapeTemplate {
        name: "skew",
        color: 0x00_ff_00,
        extent: 3,
        cells: &[(1, 0, 1), (2, 0, 1), (0, 1, 1), (1, 1, 1)],
    },
    // T: bump over a row of three (purple)
    ShapeTemplate {
        name: "tee",
        color: 0xaa_00_ff,
        extent: 3,
        cells: &[(1, 0, 1), (0, 1, 1), (1, 1, 1), (2, 1, 1)],
    },
    // Jack: a centre with all six neighbours (red)
    ShapeTemplate {
        name: "jack",
        color: 0xff_00_00,
        extent: 3,
        cells: &[
            (1, 1, 0),
            (1, 0, 1),
            (0, 1, 1),
            (1, 1, 1),
            (2, 1, 1),
            (1, 2, 1),
            (1, 1, 2),
        ],
    },
    // U: row of three with two legs (orange)
    ShapeTemplate {
        name: "arch",
        color: 0xff_a5_00,
        extent: 3,
        cells: &[(0, 0, 1), (1, 0, 1), (2, 0, 1), (0, 1, 1), (2, 1, 1)],
    },
];

/// Look up a template; unknown ids fall back to the first entry
pub fn get_template(id: usize) -> &'static ShapeTemplate {
    SHAPES.get(id).unwrap_or(&SHAPES[BLOCK_1])
}

/// Number of templates in the catalog
pub fn template_count() -> usize {
    SHAPES.len()
}

/// Find a template by name (case-insensitive)
pub fn find_template(name: &str) -> Option<usize> {
    let lower = name.to_lowercase();
    SHAPES.iter().position(|t| t.name == lower)
}

const _: () = {
    let mut i = 0;
    while i < SHAPES.len() {
        assert!(SHAPES[i].extent <= MAX_EXTENT);
        i += 1;
    }
};
