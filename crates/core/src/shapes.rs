//! Shapes module - the seven tetrimino bit-masks and mask rotation
//!
//! Masks are rectangular grids of 0/1 cells no larger than 4x4. The top-left
//! cell of a mask is the piece anchor; mask rows grow downward, matching board
//! coordinates.

use arrayvec::ArrayVec;

use crate::error::EngineError;
use crate::types::ShapeKind;

/// Largest mask side length (the I piece is 4 long).
pub const MAX_MASK_SIDE: usize = 4;

/// Offset of a single filled cell relative to the mask's top-left corner.
pub type CellOffset = (i16, i16);

/// Rectangular 0/1 bit-mask with fixed inline storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask {
    width: u8,
    height: u8,
    bits: [[u8; MAX_MASK_SIDE]; MAX_MASK_SIDE],
}

impl Mask {
    const fn from_bits(width: u8, height: u8, bits: [[u8; MAX_MASK_SIDE]; MAX_MASK_SIDE]) -> Self {
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> u16 {
        self.width as u16
    }

    pub fn height(&self) -> u16 {
        self.height as u16
    }

    /// Whether the cell at mask column `col`, mask row `row` is filled.
    /// Out-of-mask coordinates are empty.
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.width as usize && row < self.height as usize && self.bits[row][col] != 0
    }

    /// Iterate mask rows as 0/1 slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.bits[..self.height as usize]
            .iter()
            .map(move |row| &row[..self.width as usize])
    }

    /// Offsets of all filled cells in row-major order.
    pub fn filled_cells(&self) -> ArrayVec<CellOffset, 16> {
        let mut out = ArrayVec::new();
        for (dy, row) in self.rows().enumerate() {
            for (dx, &v) in row.iter().enumerate() {
                if v != 0 {
                    out.push((dx as i16, dy as i16));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise.
    ///
    /// Convention: reverse the row order, then transpose. For an `h x w` mask the
    /// result is `w x h` with `rotated[r][c] = mask[h - 1 - c][r]`. Applying this
    /// four times yields the original mask.
    pub fn rotate_cw(&self) -> Self {
        let h = self.height as usize;
        let w = self.width as usize;
        let mut bits = [[0u8; MAX_MASK_SIDE]; MAX_MASK_SIDE];
        for (r, out_row) in bits.iter_mut().enumerate().take(w) {
            for (c, out) in out_row.iter_mut().enumerate().take(h) {
                *out = self.bits[h - 1 - c][r];
            }
        }
        Self::from_bits(self.height, self.width, bits)
    }
}

const I_MASK: Mask = Mask::from_bits(4, 1, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]);
const J_MASK: Mask = Mask::from_bits(3, 2, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const L_MASK: Mask = Mask::from_bits(3, 2, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const O_MASK: Mask = Mask::from_bits(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const S_MASK: Mask = Mask::from_bits(3, 2, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const T_MASK: Mask = Mask::from_bits(3, 2, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const Z_MASK: Mask = Mask::from_bits(3, 2, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);

/// Get the spawn mask for a shape kind
pub fn mask_for(kind: ShapeKind) -> Mask {
    match kind {
        ShapeKind::I => I_MASK,
        ShapeKind::J => J_MASK,
        ShapeKind::L => L_MASK,
        ShapeKind::O => O_MASK,
        ShapeKind::S => S_MASK,
        ShapeKind::T => T_MASK,
        ShapeKind::Z => Z_MASK,
    }
}

/// Look up a mask by shape name (case-insensitive).
pub fn shape_mask(name: &str) -> Result<Mask, EngineError> {
    ShapeKind::from_str(name)
        .map(mask_for)
        .ok_or_else(|| EngineError::UnknownShapeKind(name.to_string()))
}
