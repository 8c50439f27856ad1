//! Game session module - owns the board, the active piece and the scoring state
//!
//! The session is a two-phase state machine driven by [`Session::tick`]:
//!
//! - **Playing**: commands move/rotate/drop the active piece, gravity pulls it
//!   down every `move_delay` ticks, and a landed piece is merged, cleared and
//!   scored before the next piece spawns.
//! - **GameOver**: entered when a freshly spawned piece cannot be placed. Ticks
//!   do nothing except honor a restart command, which returns to Playing.

use tracing::{debug, info};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::EngineError;
use crate::piece::Piece;
use crate::rng::{ShapeSource, UniformShapes};
use crate::scoring::calculate_score;
use crate::snapshot::{GameSnapshot, TimersSnapshot};
use crate::types::{Command, Phase};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// The active piece locked into the board.
    pub locked: bool,
    pub lines_cleared: u32,
    /// Points awarded by the lock, bonus included.
    pub points: u32,
    pub bonus_applied: bool,
    /// The session is in the game-over phase after this tick.
    pub game_over: bool,
    /// A restart command started a new game.
    pub restarted: bool,
    /// A quit command was seen; nothing else was applied.
    pub quit: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Session<S: ShapeSource = UniformShapes> {
    config: GameConfig,
    board: Board,
    active: Piece,
    source: S,
    phase: Phase,
    score: u32,
    lines: u32,
    /// Ticks since the last gravity step.
    move_timer: u32,
    /// Ticks since the last lock event.
    bonus_timer: u32,
    last_report: TickReport,
}

impl Session<UniformShapes> {
    /// Create a session drawing shapes uniformly from a seeded generator.
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, EngineError> {
        Self::with_source(config, UniformShapes::seeded(seed))
    }
}

impl<S: ShapeSource> Session<S> {
    /// Create a session in the Playing phase with an empty board and a fresh piece.
    pub fn with_source(config: GameConfig, mut source: S) -> Result<Self, EngineError> {
        config.validate()?;
        let board = Board::new(config.columns, config.rows);
        let active = Self::spawn_from(&mut source, config.columns);

        Ok(Self {
            config,
            board,
            active,
            source,
            phase: Phase::Playing,
            score: 0,
            lines: 0,
            move_timer: 0,
            bonus_timer: 0,
            last_report: TickReport::default(),
        })
    }

    fn spawn_from(source: &mut S, columns: u16) -> Piece {
        let kind = source.next_shape();
        Piece::spawn(kind, kind.default_color(), columns)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn move_timer(&self) -> u32 {
        self.move_timer
    }

    pub fn bonus_timer(&self) -> u32 {
        self.bonus_timer
    }

    /// Report of the most recent tick.
    pub fn last_report(&self) -> TickReport {
        self.last_report
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_bonus_timer(&mut self, ticks: u32) {
        self.bonus_timer = ticks;
    }

    /// Advance the simulation by one tick.
    ///
    /// Commands are applied in order before timers advance. A quit command
    /// short-circuits the whole tick so no step is ever half applied.
    pub fn tick(&mut self, commands: &[Command]) -> Result<TickReport, EngineError> {
        let mut report = TickReport::default();

        if commands.contains(&Command::Quit) {
            report.quit = true;
            report.game_over = self.is_game_over();
            self.last_report = report;
            return Ok(report);
        }

        if self.phase == Phase::GameOver {
            if commands.contains(&Command::Restart) {
                self.restart();
                report.restarted = true;
            }
            report.game_over = self.is_game_over();
            self.last_report = report;
            return Ok(report);
        }

        for &command in commands {
            self.apply_command(command)?;
        }

        self.move_timer = self.move_timer.saturating_add(1);
        self.bonus_timer = self.bonus_timer.saturating_add(1);

        if self.move_timer >= self.config.move_delay {
            self.active.translate(0, 1);
            self.move_timer = 0;
        }

        if self.board.collides(&self.active)? {
            self.lock_active(&mut report)?;
        }

        report.game_over = self.is_game_over();
        self.last_report = report;
        Ok(report)
    }

    /// Apply one player command to the active piece (Playing phase only).
    pub fn apply_command(&mut self, command: Command) -> Result<bool, EngineError> {
        if self.phase != Phase::Playing {
            return Ok(false);
        }
        match command {
            Command::MoveLeft => self.try_shift(-1),
            Command::MoveRight => self.try_shift(1),
            Command::RotateCw => Ok(self.try_rotate()),
            Command::HardDrop => self.hard_drop().map(|_| true),
            Command::Restart => {
                debug!("restart ignored while playing");
                Ok(false)
            }
            Command::Quit => Ok(false),
        }
    }

    /// Shift the active piece horizontally if it stays inside the walls and
    /// clear of locked cells.
    fn try_shift(&mut self, dx: i16) -> Result<bool, EngineError> {
        let moved = self.active.translated(dx, 0);
        let right_edge = moved.x + moved.mask().width() as i16;
        if moved.x < 0 || right_edge > self.config.columns as i16 {
            return Ok(false);
        }
        if self.board.collides(&moved)? {
            return Ok(false);
        }
        self.active = moved;
        Ok(true)
    }

    /// Commit a clockwise rotation if the rotated mask fits at the same anchor.
    fn try_rotate(&mut self) -> bool {
        let candidate = self.active.with_mask(self.active.rotate());
        if !self.board.can_rotate(&candidate) {
            return false;
        }
        self.active = candidate;
        true
    }

    /// Move the active piece down until the next row would collide.
    ///
    /// The piece is left at the last non-colliding row; it locks on the next
    /// gravity step. Returns the number of rows dropped.
    fn hard_drop(&mut self) -> Result<u32, EngineError> {
        let mut distance = 0;
        loop {
            self.active.translate(0, 1);
            if self.board.collides(&self.active)? {
                self.active.translate(0, -1);
                return Ok(distance);
            }
            distance += 1;
        }
    }

    /// Merge the landed piece, clear rows, score, and spawn the next piece.
    fn lock_active(&mut self, report: &mut TickReport) -> Result<(), EngineError> {
        self.board.merge(&self.active)?;
        let cleared = self.board.clear_completed_rows();

        let in_window = self.bonus_timer < self.config.bonus_threshold;
        let result = calculate_score(cleared, in_window, &self.config);
        self.score = self.score.saturating_add(result.total);
        self.lines = self.lines.saturating_add(cleared as u32);
        self.bonus_timer = 0;

        debug!(
            kind = self.active.kind.as_str(),
            x = self.active.x,
            y = self.active.y - 1,
            cleared,
            points = result.total,
            bonus = result.bonus_applied,
            "piece locked"
        );

        report.locked = true;
        report.lines_cleared = cleared as u32;
        report.points = result.total;
        report.bonus_applied = result.bonus_applied;

        self.active = Self::spawn_from(&mut self.source, self.config.columns);
        if self.board.is_game_over(&self.active) {
            self.phase = Phase::GameOver;
            info!(
                score = self.score,
                lines = self.lines,
                blocked = self.active.kind.as_str(),
                "game over"
            );
        }
        Ok(())
    }

    /// Start a new game: empty board, zero score, fresh piece, both timers reset.
    pub fn restart(&mut self) {
        self.board.reset();
        self.score = 0;
        self.lines = 0;
        self.move_timer = 0;
        self.bonus_timer = 0;
        self.phase = Phase::Playing;
        self.active = Self::spawn_from(&mut self.source, self.config.columns);
        debug!(kind = self.active.kind.as_str(), "restarted");
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.columns = self.board.columns();
        out.rows = self.board.rows();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.active = Some(self.active.into());
        out.score = self.score;
        out.lines = self.lines;
        out.phase = self.phase;
        out.timers = TimersSnapshot {
            move_ticks: self.move_timer,
            bonus_ticks: self.bonus_timer,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
