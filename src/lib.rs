//! Terminal tetris clone (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benchmarks can reach everything as
//! `tetris_clone::{core,input,term,types}`.

pub use tetris_clone_core as core;
pub use tetris_clone_input as input;
pub use tetris_clone_term as term;
pub use tetris_clone_types as types;
