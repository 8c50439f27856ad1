use crate::piece::Piece;
use crate::shapes::Mask;
use crate::types::{Cell, Color, Phase, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub mask: Mask,
    pub color: Color,
    pub x: i16,
    pub y: i16,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            mask: *value.mask(),
            color: value.color,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Absolute board positions of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.mask
            .filled_cells()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimersSnapshot {
    pub move_ticks: u32,
    pub bonus_ticks: u32,
}

/// Read-only render state handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub columns: u16,
    pub rows: u16,
    /// Row-major locked cells, `columns * rows` long.
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub phase: Phase,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    /// Locked cell at `(x, y)`, `None` when empty or out of range.
    pub fn cell(&self, x: u16, y: u16) -> Cell {
        if x >= self.columns || y >= self.rows {
            return None;
        }
        self.board
            .get(y as usize * self.columns as usize + x as usize)
            .copied()
            .flatten()
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// FNV-1a hash of everything a frame shows (timers excluded).
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a::new();
        h.write_u32(u32::from(self.columns) << 16 | u32::from(self.rows));
        for cell in &self.board {
            match cell {
                Some(c) => h.write(&[1, c.r, c.g, c.b]),
                None => h.write(&[0]),
            }
        }
        if let Some(active) = &self.active {
            h.write(active.kind.as_str().as_bytes());
            h.write_u32(active.x as u16 as u32);
            h.write_u32(active.y as u16 as u32);
            for row in active.mask.rows() {
                h.write(row);
                h.write(&[0xff]);
            }
        }
        h.write_u32(self.score);
        h.write_u32(self.lines);
        h.write(&[self.phase as u8]);
        h.finish()
    }
}

struct Fnv1a(u64);

impl Fnv1a {
    fn new() -> Self {
        Self(0xcbf29ce484222325)
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 ^= b as u64;
            self.0 = self.0.wrapping_mul(0x00000100000001B3);
        }
    }

    fn write_u32(&mut self, v: u32) {
        self.write(&v.to_le_bytes());
    }

    fn finish(&self) -> u64 {
        self.0
    }
}
