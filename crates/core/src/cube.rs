//! Cube module - a single occupied grid cell and its metadata
//!
//! Each cube remembers which of its six faces touch another cube that arrived
//! in the same placement. Those links form the rigid bodies the cascade moves.

use crate::types::{Direction, Pos, FIXTURE_OWNER};

/// Six-direction attachment set, one bit per [`Direction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Attachments(u8);

impl Attachments {
    pub const NONE: Attachments = Attachments(0);

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0b0011_1111)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub fn has(&self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn set(&mut self, dir: Direction, attached: bool) {
        if attached {
            self.0 |= dir.bit();
        } else {
            self.0 &= !dir.bit();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Iterate the attached directions in [`Direction::ALL`] order
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }
}

/// An occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cube {
    pub pos: Pos,
    /// Piece that placed this cube; [`FIXTURE_OWNER`] marks permanent geometry
    pub owner: u32,
    pub attachments: Attachments,
    /// Unique per materialisation; used as the cascade's visited key
    pub local_id: u32,
    pub color: u32,
}

impl Cube {
    pub fn new(pos: Pos, owner: u32, color: u32) -> Self {
        Self {
            pos,
            owner,
            attachments: Attachments::NONE,
            local_id: 0,
            color,
        }
    }

    pub fn with_attachments(mut self, attachments: Attachments) -> Self {
        self.attachments = attachments;
        self
    }

    /// Fixtures are never removed by layer clears
    pub fn is_fixture(&self) -> bool {
        self.owner == FIXTURE_OWNER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachments_set_and_clear() {
        let mut a = Attachments::NONE;
        assert!(a.is_empty());

        a.set(Direction::XPos, true);
        a.set(Direction::YNeg, true);
        assert!(a.has(Direction::XPos));
        assert!(a.has(Direction::YNeg));
        assert!(!a.has(Direction::XNeg));
        assert_eq!(a.count(), 2);

        a.set(Direction::XPos, false);
        assert!(!a.has(Direction::XPos));
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![Direction::YNeg]);
    }

    #[test]
    fn test_from_bits_masks_unused_bits() {
        assert_eq!(Attachments::from_bits(0xff).bits(), 0b0011_1111);
    }

    #[test]
    fn test_fixture_owner() {
        assert!(Cube::new(Pos::new(0, 0, 0), 0, 0).is_fixture());
        assert!(!Cube::new(Pos::new(0, 0, 0), 3, 0).is_fixture());
    }
}
