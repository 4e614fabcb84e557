//! Tile orientations and gaze-driven ordering.
//!
//! Each orientation is the direction the tile's capture camera looks in, not
//! the outward normal of the tile surface. A viewer looking the same way as a
//! tile camera sees that tile, so a dot product of 1 is the most useful tile.

use glam::Vec3;

/// Fixed number of azimuthal tiles around the subject.
pub const TILE_COUNT: usize = 4;

/// Capture direction of every tile, indexed by tile number.
pub const TILE_ORIENTATIONS: [Vec3; TILE_COUNT] = [Vec3::NEG_Z, Vec3::X, Vec3::Z, Vec3::NEG_X];

/// Named tile positions relative to the subject centroid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Front,
    Right,
    Back,
    Left,
}

impl Tile {
    /// All tiles in index order.
    pub const ALL: [Tile; TILE_COUNT] = [Tile::Front, Tile::Right, Tile::Back, Tile::Left];

    /// Index of this tile in per-tile arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Capture direction of this tile.
    pub fn orientation(self) -> Vec3 {
        TILE_ORIENTATIONS[self.index()]
    }
}

/// Utility of each tile for a viewer looking along `gaze`.
pub fn tile_utilities(gaze: Vec3) -> [f32; TILE_COUNT] {
    TILE_ORIENTATIONS.map(|o| gaze.dot(o))
}

/// Tile indices sorted by descending utility.
///
/// The sort is stable, so equal utilities keep the lower index first.
pub fn tile_order(gaze: Vec3) -> [usize; TILE_COUNT] {
    let utilities = tile_utilities(gaze);
    let mut order: [usize; TILE_COUNT] = std::array::from_fn(|i| i);
    order.sort_by(|&a, &b| {
        utilities[b]
            .partial_cmp(&utilities[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

/// Whether each tile faces the viewer (utility strictly positive).
pub fn tile_visibility(gaze: Vec3) -> [bool; TILE_COUNT] {
    tile_utilities(gaze).map(|u| u > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientations_are_unit_vectors() {
        for o in TILE_ORIENTATIONS {
            assert!((o.length() - 1.0).abs() < 1e-6);
        }
        assert_eq!(Tile::Back.orientation(), Vec3::Z);
        assert_eq!(Tile::Left.index(), 3);
    }

    #[test]
    fn test_looking_at_front_orders_front_first_back_last() {
        let order = tile_order(Vec3::NEG_Z);
        // Right and left tie at zero: lower index first.
        assert_eq!(order, [0, 1, 3, 2]);
    }

    #[test]
    fn test_looking_right() {
        assert_eq!(tile_order(Vec3::X), [1, 0, 2, 3]);
        assert_eq!(tile_visibility(Vec3::X), [false, true, false, false]);
    }

    #[test]
    fn test_diagonal_gaze_sees_two_tiles() {
        let gaze = Vec3::new(-1.0, 0.0, 1.0).normalize();
        let vis = tile_visibility(gaze);
        assert_eq!(vis, [false, false, true, true]);
        // Back and left tie: back (index 2) comes first.
        assert_eq!(tile_order(gaze), [2, 3, 0, 1]);
    }

    #[test]
    fn test_vertical_gaze_sees_nothing() {
        assert_eq!(tile_visibility(Vec3::Y), [false; TILE_COUNT]);
        assert_eq!(tile_order(Vec3::NEG_Y), [0, 1, 2, 3]);
    }
}
