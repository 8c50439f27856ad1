//! Per-tick command buffer.
//!
//! Key events arrive between ticks; the runner pushes them here and drains the
//! whole buffer into one `Session::tick` call. Capacity is fixed so the hot
//! path never allocates. Once full, further commands are dropped until the
//! next drain, except quit, which always gets in.

use arrayvec::ArrayVec;

use crate::types::Command;

/// Maximum commands delivered in a single tick.
pub const COMMANDS_PER_TICK: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    pending: ArrayVec<Command, COMMANDS_PER_TICK>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a command. Returns false if it was dropped.
    pub fn push(&mut self, command: Command) -> bool {
        if self.pending.try_push(command).is_ok() {
            return true;
        }
        if command == Command::Quit {
            // Overwrite the newest entry so quit is never lost.
            self.pending.pop();
            self.pending.push(command);
            return true;
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn contains_quit(&self) -> bool {
        self.pending.contains(&Command::Quit)
    }

    /// Hand the queued commands to `f`, then empty the buffer.
    pub fn drain_with<T>(&mut self, f: impl FnOnce(&[Command]) -> T) -> T {
        let out = f(&self.pending);
        self.pending.clear();
        out
    }
}
