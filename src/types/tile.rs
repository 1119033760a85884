//! Cell references decoded from tile-layer payloads.

/// Bit 31 of a cell code: the tile is mirrored horizontally.
pub const FLIPPED_HORIZONTALLY: u32 = 0x8000_0000;

/// Bit 30 of a cell code: the tile is mirrored vertically.
pub const FLIPPED_VERTICALLY: u32 = 0x4000_0000;

/// Bit 29 of a cell code: the tile is mirrored across its diagonal.
pub const FLIPPED_DIAGONALLY: u32 = 0x2000_0000;

/// Mask selecting the global tile id part of a cell code.
pub const GID_MASK: u32 = !(FLIPPED_HORIZONTALLY | FLIPPED_VERTICALLY | FLIPPED_DIAGONALLY);

/// A single cell of a tile layer (or the tile of a tile object).
///
/// `gid` is the global tile id with the flip bits cleared; zero means the
/// cell is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileRef {
    pub gid: u32,
    pub x: i32,
    pub y: i32,
    pub horizontal_flip: bool,
    pub vertical_flip: bool,
    pub diagonal_flip: bool,
}

impl TileRef {
    /// Split a raw 32-bit cell code into flip flags and a global id.
    pub const fn from_code(code: u32, x: i32, y: i32) -> Self {
        Self {
            gid: code & GID_MASK,
            x,
            y,
            horizontal_flip: code & FLIPPED_HORIZONTALLY != 0,
            vertical_flip: code & FLIPPED_VERTICALLY != 0,
            diagonal_flip: code & FLIPPED_DIAGONALLY != 0,
        }
    }

    /// Recombine flags and id into the raw cell code.
    pub const fn code(&self) -> u32 {
        let mut code = self.gid;
        if self.horizontal_flip {
            code |= FLIPPED_HORIZONTALLY;
        }
        if self.vertical_flip {
            code |= FLIPPED_VERTICALLY;
        }
        if self.diagonal_flip {
            code |= FLIPPED_DIAGONALLY;
        }
        code
    }

    /// True when the cell holds no tile.
    pub const fn is_empty(&self) -> bool {
        self.gid == 0
    }

    /// True when any flip flag is set.
    pub const fn is_flipped(&self) -> bool {
        self.horizontal_flip || self.vertical_flip || self.diagonal_flip
    }
}

/// A rectangle of cells: the whole layer for finite maps, one chunk for
/// infinite maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Number of cells in the region.
    pub fn len(&self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of the `index`-th cell in row-major scan order, or `None`
    /// when it lies outside the `i32` coordinate range.
    pub fn position(&self, index: usize) -> Option<(i32, i32)> {
        let width = self.width.max(1) as usize;
        let dx = i32::try_from(index % width).ok()?;
        let dy = i32::try_from(index / width).ok()?;
        Some((self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }

    /// Row-major index of a cell, if it lies inside the region.
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let dx = i64::from(x) - i64::from(self.x);
        let dy = i64::from(y) - i64::from(self.y);
        if dx < 0 || dy < 0 || dx >= i64::from(self.width) || dy >= i64::from(self.height) {
            return None;
        }
        Some(dy as usize * self.width as usize + dx as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_flip_code() {
        let tile = TileRef::from_code(0x8000_0005, 0, 0);
        assert!(tile.horizontal_flip);
        assert!(!tile.vertical_flip);
        assert!(!tile.diagonal_flip);
        assert_eq!(tile.gid, 5);
    }

    #[test]
    fn test_all_flags() {
        let tile = TileRef::from_code(0xE000_0001, 3, 4);
        assert!(tile.horizontal_flip && tile.vertical_flip && tile.diagonal_flip);
        assert_eq!(tile.gid, 1);
        assert_eq!((tile.x, tile.y), (3, 4));
    }

    #[test]
    fn test_zero_is_empty() {
        assert!(TileRef::from_code(0, 0, 0).is_empty());
        // Flip bits alone still leave an empty cell.
        let flipped_empty = TileRef::from_code(FLIPPED_VERTICALLY, 0, 0);
        assert!(flipped_empty.is_empty());
        assert!(flipped_empty.is_flipped());
    }

    #[test]
    fn test_region_positions() {
        let region = Region::new(-4, 8, 2, 2);
        assert_eq!(region.len(), 4);
        assert_eq!(region.position(0), Some((-4, 8)));
        assert_eq!(region.position(1), Some((-3, 8)));
        assert_eq!(region.position(2), Some((-4, 9)));
        assert_eq!(region.index_of(-3, 9), Some(3));
        assert_eq!(region.index_of(-2, 9), None);
        assert_eq!(region.index_of(-5, 8), None);
    }

    #[test]
    fn test_region_position_past_coordinate_range() {
        let region = Region::new(i32::MAX - 1, i32::MAX, 3, 1);
        assert_eq!(region.position(1), Some((i32::MAX, i32::MAX)));
        assert_eq!(region.position(2), None);
        assert_eq!(Region::new(0, i32::MAX, 1, 2).position(1), None);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_code_roundtrip(code in any::<u32>(), x in -64i32..64, y in -64i32..64) {
                let tile = TileRef::from_code(code, x, y);
                prop_assert_eq!(tile.code(), code);
                prop_assert_eq!(tile.gid & !GID_MASK, 0);
            }
        }
    }
}
