//! RNG module - where the next shape comes from
//!
//! The session draws every spawned shape from a [`ShapeSource`]. Play uses
//! [`UniformShapes`], an independent uniform pick over the seven kinds per
//! spawn. Tests and replays inject [`ScriptedShapes`] for a fixed sequence.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::types::ShapeKind;

/// Supplies the shape of each newly spawned piece.
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

/// Uniform, independent shape selection over any `rand` generator.
#[derive(Debug, Clone)]
pub struct UniformShapes<R = SmallRng> {
    rng: R,
}

impl UniformShapes<SmallRng> {
    /// Deterministic source for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_entropy())
    }
}

impl<R: Rng> UniformShapes<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ShapeSource for UniformShapes<R> {
    fn next_shape(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.rng.gen_range(0..ShapeKind::ALL.len())]
    }
}

/// Replays a fixed sequence of shapes, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedShapes {
    shapes: Vec<ShapeKind>,
    index: usize,
}

impl ScriptedShapes {
    /// Panics if `shapes` is empty.
    pub fn new(shapes: impl Into<Vec<ShapeKind>>) -> Self {
        let shapes = shapes.into();
        assert!(!shapes.is_empty(), "scripted shape sequence must not be empty");
        Self { shapes, index: 0 }
    }
}

impl ShapeSource for ScriptedShapes {
    fn next_shape(&mut self) -> ShapeKind {
        let kind = self.shapes[self.index];
        self.index = (self.index + 1) % self.shapes.len();
        kind
    }
}

impl<S: ShapeSource + ?Sized> ShapeSource for Box<S> {
    fn next_shape(&mut self) -> ShapeKind {
        (**self).next_shape()
    }
}
