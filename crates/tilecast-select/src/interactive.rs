//! Operator key presets for the interactive algorithm.

use crate::orientation::{TILE_COUNT, Tile};

/// A discrete operator command mapped from a digit key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresetKey {
    /// `0`: every tile at the lowest quality.
    AllLowest,
    /// `9`: every tile at the highest quality.
    AllHighest,
    /// `1`..`4`: one tile at the highest quality, the rest at the lowest.
    Solo(Tile),
}

impl PresetKey {
    /// Map a digit key to its preset. Other characters have no preset.
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::AllLowest),
            '9' => Some(Self::AllHighest),
            '1' => Some(Self::Solo(Tile::Front)),
            '2' => Some(Self::Solo(Tile::Right)),
            '3' => Some(Self::Solo(Tile::Back)),
            '4' => Some(Self::Solo(Tile::Left)),
            _ => None,
        }
    }

    /// Rank used when several presets arrive in one tick (lower wins).
    fn rank(self) -> usize {
        match self {
            Self::AllLowest => 0,
            Self::AllHighest => 1,
            Self::Solo(tile) => 2 + tile.index(),
        }
    }

    /// Quality assignment this preset requests.
    pub fn qualities(self, max_quality: usize) -> [usize; TILE_COUNT] {
        match self {
            Self::AllLowest => [0; TILE_COUNT],
            Self::AllHighest => [max_quality; TILE_COUNT],
            Self::Solo(tile) => {
                let mut q = [0; TILE_COUNT];
                q[tile.index()] = max_quality;
                q
            }
        }
    }
}

/// Pick the winning preset among the keys pressed this tick.
pub fn winning_preset(keys: &[PresetKey]) -> Option<PresetKey> {
    keys.iter().copied().min_by_key(|k| k.rank())
}
