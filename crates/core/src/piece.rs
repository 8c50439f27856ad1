//! Piece module - a positioned, rotatable instance of a shape
//!
//! A piece never checks legality itself. Translation is unconditional so the
//! board can probe hypothetical positions, and rotation returns a candidate
//! mask that the caller validates before committing.

use crate::error::EngineError;
use crate::shapes::{mask_for, shape_mask, Mask};
use crate::types::{Color, ShapeKind};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub color: Color,
    /// Board column of the mask's top-left cell.
    pub x: i16,
    /// Board row of the mask's top-left cell.
    pub y: i16,
    mask: Mask,
}

/// Spawn column for a board of the given width (4 on a 10-wide board).
pub fn spawn_x(columns: u16) -> i16 {
    (columns / 2) as i16 - 1
}

impl Piece {
    /// Create a new piece at the spawn position for a board `columns` wide.
    pub fn spawn(kind: ShapeKind, color: Color, columns: u16) -> Self {
        Self {
            kind,
            color,
            x: spawn_x(columns),
            y: 0,
            mask: mask_for(kind),
        }
    }

    /// Spawn by shape name, as accepted by [`shape_mask`].
    pub fn spawn_named(name: &str, color: Color, columns: u16) -> Result<Self, EngineError> {
        let mask = shape_mask(name)?;
        let kind = ShapeKind::from_str(name)
            .ok_or_else(|| EngineError::UnknownShapeKind(name.to_string()))?;
        Ok(Self {
            mask,
            ..Self::spawn(kind, color, columns)
        })
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Translate the anchor. No bounds checking.
    pub fn translate(&mut self, dx: i16, dy: i16) {
        self.x += dx;
        self.y += dy;
    }

    /// Copy of this piece translated by `(dx, dy)`.
    pub fn translated(&self, dx: i16, dy: i16) -> Self {
        let mut moved = *self;
        moved.translate(dx, dy);
        moved
    }

    /// Candidate mask rotated 90° clockwise. The piece itself is unchanged.
    pub fn rotate(&self) -> Mask {
        self.mask.rotate_cw()
    }

    /// Copy of this piece at the same anchor with a different mask.
    pub fn with_mask(&self, mask: Mask) -> Self {
        Self { mask, ..*self }
    }

    /// Absolute board positions of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.mask
            .filled_cells()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}
