//! Seeds module - ground-floor fixture layouts
//!
//! A seed is a `depth x width` pattern of 0/1 cells (`pattern[z][x]`). Every 1
//! becomes a permanent fixture cube on layer 0 when the board is reset.

use crate::types::BOARD_SIZE;

const N: usize = BOARD_SIZE as usize;

/// Seed pattern, indexed `[z][x]`
pub type SeedPattern = [[u8; N]; N];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSeed {
    pub name: &'static str,
    pub pattern: SeedPattern,
}

impl BoardSeed {
    /// True when the seed places no fixtures
    pub fn is_blank(&self) -> bool {
        self.pattern.iter().all(|row| row.iter().all(|&c| c == 0))
    }

    pub fn fixture_count(&self) -> usize {
        self.pattern
            .iter()
            .map(|row| row.iter().filter(|&&c| c != 0).count())
            .sum()
    }
}

pub const BOARD_SEEDS: [BoardSeed; 4] = [
    BoardSeed {
        name: "open",
        pattern: [[0; N]; N],
    },
    BoardSeed {
        name: "ring",
        pattern: [
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        ],
    },
    BoardSeed {
        name: "pillars",
        pattern: [
            [1, 1, 0, 0, 0, 0, 0, 0, 1, 1],
            [1, 1, 0, 0, 0, 0, 0, 0, 1, 1],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 1, 1, 0, 0, 0, 0],
            [0, 0, 0, 0, 1, 1, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            [1, 1, 0, 0, 0, 0, 0, 0, 1, 1],
            [1, 1, 0, 0, 0, 0, 0, 0, 1, 1],
        ],
    },
    BoardSeed {
        name: "checker",
        pattern: [
            [1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
            [0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
            [1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
            [0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
            [1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
            [0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
            [1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
            [0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
            [1, 0, 1, 0, 1, 0, 1, 0, 1, 0],
            [0, 1, 0, 1, 0, 1, 0, 1, 0, 1],
        ],
    },
];

/// Clamp a seed index: unknown ids select seed 0
pub fn resolve_seed(id: usize) -> usize {
    if id < seed_count() {
        id
    } else {
        0
    }
}

pub fn get_seed(id: usize) -> &'static BoardSeed {
    &BOARD_SEEDS[resolve_seed(id)]
}

pub fn seed_count() -> usize {
    BOARD_SEEDS.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_first_seed_is_blank() {
        assert!(BOARD_SEEDS[0].is_blank());
        for seed in &BOARD_SEEDS[1..] {
            assert!(!seed.is_blank(), "{}", seed.name);
        }
    }

    #[test]
    fn test_no_seed_fills_a_layer() {
        for seed in &BOARD_SEEDS {
            assert!(seed.fixture_count() < N * N, "{}", seed.name);
        }
    }

    #[test]
    fn test_fixture_counts() {
        assert_eq!(get_seed(1).fixture_count(), 36);
        assert_eq!(get_seed(2).fixture_count(), 20);
        assert_eq!(get_seed(3).fixture_count(), 50);
    }

    #[test]
    fn test_resolve_seed_fallback() {
        assert_eq!(resolve_seed(2), 2);
        assert_eq!(resolve_seed(seed_count() - 1), seed_count() - 1);
        assert_eq!(resolve_seed(seed_count()), 0);
        assert_eq!(resolve_seed(42), 0);
    }
}
