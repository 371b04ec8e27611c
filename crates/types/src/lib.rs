//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, headless runner, renderers).
//!
//! # Board Dimensions
//!
//! The playing field is a square-footprint voxel pit:
//!
//! - **Width / Depth**: 10 cells (`BOARD_SIZE`, indexed 0-9 along X and Z)
//! - **Height**: 20 layers (`BOARD_HEIGHT`, indexed 0-19, Y grows upward)
//! - **Spawn position**: anchor `(0, 19, 0)`; piece cells hang downward from it
//!
//! # Coordinates
//!
//! World coordinates are `(x, y, z)` with `y` the layer (height) index. Storage is
//! indexed `[y][z][x]`, so traversal is height-major, then depth, then width.
//!
//! # Examples
//!
//! ```
//! use voxel_tetris_types::{Axis, Direction, GameAction, Pos, BOARD_HEIGHT, BOARD_SIZE};
//!
//! let axis = Axis::from_str("y").unwrap();
//! assert_eq!(axis, Axis::Y);
//!
//! let p = Pos::new(1, 2, 3);
//! assert_eq!(p.step(Direction::YNeg), Pos::new(1, 1, 3));
//! assert_eq!(Direction::XPos.opposite(), Direction::XNeg);
//!
//! let action = GameAction::from_str("shiftX-").unwrap();
//! assert_eq!(action, GameAction::Shift(Axis::X, -1));
//!
//! assert_eq!(BOARD_SIZE, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width and depth in cells (square footprint)
pub const BOARD_SIZE: u8 = 10;

/// Board height in layers
pub const BOARD_HEIGHT: u8 = 20;

/// Cells in one horizontal layer
pub const LAYER_CELLS: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

/// Total number of cells in the grid
pub const GRID_CELLS: usize = LAYER_CELLS * BOARD_HEIGHT as usize;

/// Seed board selected when none is given
pub const DEFAULT_BOARD: usize = 0;

/// Owner id of permanent fixture cubes (never cleared)
pub const FIXTURE_OWNER: u32 = 0;

/// Colour of fixture cubes (grey)
pub const FIXTURE_COLOR: u32 = 0x88_88_88;

/// Largest cubic extent of any piece's local grid
pub const MAX_EXTENT: u8 = 4;

/// Maximum filled cells a single piece can hold
pub const MAX_PIECE_CELLS: usize = MAX_EXTENT as usize * MAX_EXTENT as usize * MAX_EXTENT as usize;

/// Default spawn anchor column (X)
pub const DEFAULT_SPAWN_X: i8 = 0;

/// Default spawn anchor row (Z)
pub const DEFAULT_SPAWN_Z: i8 = 0;

/// Spawn anchor layer: the top of the pit
pub const SPAWN_Y: i8 = BOARD_HEIGHT as i8 - 1;

/// World axis used for shifts and rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Parse axis from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use voxel_tetris_types::Axis;
    ///
    /// assert_eq!(Axis::from_str("x"), Some(Axis::X));
    /// assert_eq!(Axis::from_str("Z"), Some(Axis::Z));
    /// assert_eq!(Axis::from_str("w"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "x" => Some(Axis::X),
            "y" => Some(Axis::Y),
            "z" => Some(Axis::Z),
            _ => None,
        }
    }

    /// Convert to uppercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// One of the six face directions of a cube
///
/// The discriminant order matches the attachment bit order:
/// `XPos, XNeg, YPos, YNeg, ZPos, ZNeg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    XPos,
    XNeg,
    YPos,
    YNeg,
    ZPos,
    ZNeg,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::XPos,
        Direction::XNeg,
        Direction::YPos,
        Direction::YNeg,
        Direction::ZPos,
        Direction::ZNeg,
    ];

    /// World-space unit offset `(dx, dy, dz)`
    pub fn offset(&self) -> (i8, i8, i8) {
        match self {
            Direction::XPos => (1, 0, 0),
            Direction::XNeg => (-1, 0, 0),
            Direction::YPos => (0, 1, 0),
            Direction::YNeg => (0, -1, 0),
            Direction::ZPos => (0, 0, 1),
            Direction::ZNeg => (0, 0, -1),
        }
    }

    /// The facing direction on the neighbouring cube
    ///
    /// ```
    /// use voxel_tetris_types::Direction;
    ///
    /// for d in Direction::ALL {
    ///     assert_eq!(d.opposite().opposite(), d);
    /// }
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::XPos => Direction::XNeg,
            Direction::XNeg => Direction::XPos,
            Direction::YPos => Direction::YNeg,
            Direction::YNeg => Direction::YPos,
            Direction::ZPos => Direction::ZNeg,
            Direction::ZNeg => Direction::ZPos,
        }
    }

    /// Bit mask of this direction within an attachment set
    #[inline(always)]
    pub fn bit(&self) -> u8 {
        1 << (*self as u8)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::XPos => "xPos",
            Direction::XNeg => "xNeg",
            Direction::YPos => "yPos",
            Direction::YNeg => "yNeg",
            Direction::ZPos => "zPos",
            Direction::ZNeg => "zNeg",
        }
    }
}

/// A world-space cell coordinate
///
/// Signed so that candidate positions outside the pit can be represented and
/// rejected by collision checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl Pos {
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    /// Neighbouring cell one step in `dir`
    pub fn step(&self, dir: Direction) -> Self {
        let (dx, dy, dz) = dir.offset();
        self.offset(dx, dy, dz)
    }

    pub fn offset(&self, dx: i8, dy: i8, dz: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }

    /// Offset along a single axis
    pub fn shifted(&self, axis: Axis, amount: i8) -> Self {
        match axis {
            Axis::X => self.offset(amount, 0, 0),
            Axis::Y => self.offset(0, amount, 0),
            Axis::Z => self.offset(0, 0, amount),
        }
    }

    /// Check whether this position lies inside the pit
    pub fn in_bounds(&self) -> bool {
        self.x >= 0
            && self.x < BOARD_SIZE as i8
            && self.y >= 0
            && self.y < BOARD_HEIGHT as i8
            && self.z >= 0
            && self.z < BOARD_SIZE as i8
    }
}

/// Game actions that can be applied to modify game state
///
/// These actions are used by the headless runner's scripted input and by any
/// external controller. Each action maps to a specific engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Translate the active piece along an axis
    Shift(Axis, i8),
    /// Rotate the active piece 90° about an axis
    Rotate(Axis),
    /// Advance one gravity tick immediately
    Drop,
    /// Advance until the active piece lands
    HardDrop,
    /// Toggle pause state
    Pause,
    /// Reset the board to its seed and keep playing
    Restart,
}

impl GameAction {
    /// Parse action from string (for scripted input)
    ///
    /// Shifts are written `shift<Axis><sign>`, rotations `rotate<Axis>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use voxel_tetris_types::{Axis, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("shiftZ+"), Some(GameAction::Shift(Axis::Z, 1)));
    /// assert_eq!(GameAction::from_str("rotatey"), Some(GameAction::Rotate(Axis::Y)));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("shiftY"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "drop" => return Some(GameAction::Drop),
            "harddrop" => return Some(GameAction::HardDrop),
            "pause" => return Some(GameAction::Pause),
            "restart" => return Some(GameAction::Restart),
            _ => {}
        }

        if let Some(rest) = lower.strip_prefix("rotate") {
            return Axis::from_str(rest).map(GameAction::Rotate);
        }

        let rest = lower.strip_prefix("shift")?;
        let mut chars = rest.chars();
        let axis = Axis::from_str(&chars.next()?.to_string())?;
        let amount = match chars.as_str() {
            "+" => 1,
            "-" => -1,
            _ => return None,
        };
        Some(GameAction::Shift(axis, amount))
    }

    /// Convert to the camelCase form accepted by [`GameAction::from_str`]
    ///
    /// Shift amounts are reported by sign only.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Shift(Axis::X, a) if *a >= 0 => "shiftX+",
            GameAction::Shift(Axis::X, _) => "shiftX-",
            GameAction::Shift(Axis::Y, a) if *a >= 0 => "shiftY+",
            GameAction::Shift(Axis::Y, _) => "shiftY-",
            GameAction::Shift(Axis::Z, a) if *a >= 0 => "shiftZ+",
            GameAction::Shift(Axis::Z, _) => "shiftZ-",
            GameAction::Rotate(Axis::X) => "rotateX",
            GameAction::Rotate(Axis::Y) => "rotateY",
            GameAction::Rotate(Axis::Z) => "rotateZ",
            GameAction::Drop => "drop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}
