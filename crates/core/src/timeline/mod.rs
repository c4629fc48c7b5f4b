use std::time::Duration;

/// Virtual millisecond clock driving autoplay.
///
/// Nothing in the engine reads wall time. Callers advance the clock through
/// [`AnimationEngine::tick`](crate::AnimationEngine::tick), which keeps
/// playback deterministic under test and lets a terminal driver map it onto
/// real sleeps.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackClock {
    now_ms: u64,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.now_ms = 0;
    }

    pub fn advance(&mut self, delta: Duration) {
        let delta_ms = u64::try_from(delta.as_millis()).unwrap_or(u64::MAX);
        self.now_ms = self.now_ms.saturating_add(delta_ms);
    }

    /// Moves the clock forward to `instant_ms` if it lies in the future.
    pub fn advance_to(&mut self, instant_ms: u64) {
        self.now_ms = self.now_ms.max(instant_ms);
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

/// The single-shot deferred wake-up that moves the cursor one step forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    /// Clock instant at which the advance fires.
    pub due_ms: u64,
    /// Cursor value that was active when the advance was armed.
    pub armed_at_cursor: usize,
}

impl PendingAdvance {
    pub fn new(now_ms: u64, delay_ms: u64, cursor: usize) -> Self {
        Self {
            due_ms: now_ms.saturating_add(delay_ms),
            armed_at_cursor: cursor,
        }
    }

    pub fn is_due(&self, clock: &PlaybackClock) -> bool {
        clock.now_ms() >= self.due_ms
    }

    /// Time left before the advance fires, zero if it is already due.
    pub fn remaining(&self, clock: &PlaybackClock) -> Duration {
        Duration::from_millis(self.due_ms.saturating_sub(clock.now_ms()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_advances_and_resets() {
        let mut clock = PlaybackClock::new();
        clock.advance(Duration::from_millis(250));
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now_ms(), 500);

        clock.advance_to(300);
        assert_eq!(clock.now_ms(), 500);

        clock.reset();
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn pending_advance_becomes_due() {
        let mut clock = PlaybackClock::new();
        let pending = PendingAdvance::new(clock.now_ms(), 1000, 3);

        assert!(!pending.is_due(&clock));
        assert_eq!(pending.remaining(&clock), Duration::from_millis(1000));

        clock.advance(Duration::from_millis(1000));
        assert!(pending.is_due(&clock));
        assert_eq!(pending.remaining(&clock), Duration::ZERO);
        assert_eq!(pending.armed_at_cursor, 3);
    }
}
