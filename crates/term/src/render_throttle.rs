//! Frame pacing for the terminal runner.

/// Decides when a new frame is worth drawing.
///
/// A frame is drawn when the visible state changed (by fingerprint) and at
/// least `min_interval_ms` passed since the last draw. An unchanged screen is
/// still refreshed every `idle_refresh_ms` so a clobbered terminal recovers.
#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_interval_ms: u64,
    idle_refresh_ms: u64,
    last_render_ms: u64,
    last_fingerprint: u64,
    has_rendered: bool,
}

impl RenderThrottle {
    pub fn new(min_interval_ms: u64, idle_refresh_ms: u64) -> Self {
        Self {
            min_interval_ms,
            idle_refresh_ms,
            last_render_ms: 0,
            last_fingerprint: 0,
            has_rendered: false,
        }
    }

    /// Returns true when the caller should render now.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        if !self.has_rendered {
            self.has_rendered = true;
            return self.mark(now_ms, fingerprint);
        }

        let elapsed = now_ms.saturating_sub(self.last_render_ms);
        if elapsed < self.min_interval_ms {
            return false;
        }
        if fingerprint != self.last_fingerprint || elapsed >= self.idle_refresh_ms {
            return self.mark(now_ms, fingerprint);
        }
        false
    }

    /// Forget the last frame; the next call renders unconditionally.
    pub fn invalidate(&mut self) {
        self.has_rendered = false;
    }

    fn mark(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        self.last_render_ms = now_ms;
        self.last_fingerprint = fingerprint;
        true
    }
}
