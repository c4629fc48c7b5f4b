//! Step-based playback of algorithm executions.
//!
//! An [`AnimationEngine`] owns one submitted step sequence, a cursor into it
//! and the transport state. Every time a step becomes active (on submit, on
//! play, on an autoplay advance or on [`AnimationEngine::next_step`]) the
//! registered callback receives the step and its index so the caller can
//! update whatever it displays.
//!
//! Autoplay is single-threaded and cooperative: the engine holds at most one
//! [`PendingAdvance`] and only fires it from [`AnimationEngine::tick`]. Any
//! operation that moves the cursor or changes the mode drops the pending
//! advance first, so a stale wake-up can never land on the wrong step.
//!
//! Scrubbing with [`AnimationEngine::prev_step`] or
//! [`AnimationEngine::go_to_step`] moves the cursor and the description but
//! does not invoke the callback, so the displayed structure keeps the data
//! of the last activated step.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{PendingAdvance, PlaybackClock, Step};

/// Inter-step delay used when neither the step nor the caller sets one.
pub const DEFAULT_SPEED_MS: u64 = 1000;

/// Transport state of the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackMode {
    /// Nothing loaded, loaded but never started, or playback ran to the end.
    #[default]
    Idle,
    /// Advancing automatically on the virtual clock.
    Playing,
    /// Explicitly paused; `play` resumes by re-activating the current step.
    Paused,
}

/// Speed options offered by the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeedPreset {
    Slow,
    Normal,
    Fast,
    VeryFast,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 4] = [
        SpeedPreset::Slow,
        SpeedPreset::Normal,
        SpeedPreset::Fast,
        SpeedPreset::VeryFast,
    ];

    /// Delay between steps in milliseconds.
    pub fn millis(self) -> u64 {
        match self {
            SpeedPreset::Slow => 2000,
            SpeedPreset::Normal => 1000,
            SpeedPreset::Fast => 500,
            SpeedPreset::VeryFast => 200,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedPreset::Slow => "Slow (2s)",
            SpeedPreset::Normal => "Normal (1s)",
            SpeedPreset::Fast => "Fast (0.5s)",
            SpeedPreset::VeryFast => "Very Fast (0.2s)",
        }
    }
}

/// Read-only projection of the engine polled by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub is_playing: bool,
    pub is_paused: bool,
    pub current_step: usize,
    pub total_steps: usize,
    pub current_description: String,
    /// Percentage in `[0, 100]`.
    pub progress: f64,
}

/// Callback invoked with the activated step and its zero-based index.
///
/// It runs to completion synchronously and cannot re-enter the engine.
pub type StepCallback<T> = Box<dyn FnMut(&Step<T>, usize)>;

pub struct AnimationEngine<T> {
    steps: Vec<Step<T>>,
    cursor: usize,
    mode: PlaybackMode,
    speed_ms: u64,
    description: String,
    on_step: Option<StepCallback<T>>,
    clock: PlaybackClock,
    pending: Option<PendingAdvance>,
}

impl<T> Default for AnimationEngine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AnimationEngine<T> {
    /// Creates an idle engine with no steps and the default speed.
    pub fn new() -> Self {
        Self::with_speed(DEFAULT_SPEED_MS)
    }

    pub fn with_speed(speed_ms: u64) -> Self {
        Self {
            steps: Vec::new(),
            cursor: 0,
            mode: PlaybackMode::Idle,
            speed_ms: speed_ms.max(1),
            description: String::new(),
            on_step: None,
            clock: PlaybackClock::new(),
            pending: None,
        }
    }

    /// Loads a new step sequence, replacing the previous one and its callback.
    ///
    /// Step 0 is activated synchronously when the sequence is non-empty.
    /// Autoplay is not started.
    pub fn submit<F>(&mut self, steps: Vec<Step<T>>, callback: F)
    where
        F: FnMut(&Step<T>, usize) + 'static,
    {
        self.cancel_pending();
        self.clock.reset();
        self.steps = steps;
        self.cursor = 0;
        self.mode = PlaybackMode::Idle;
        self.description.clear();
        self.on_step = Some(Box::new(callback));
        debug!(total_steps = self.steps.len(), "step sequence submitted");

        self.activate_current_step();
    }

    /// Starts or resumes autoplay from the current step.
    pub fn play(&mut self) {
        if self.steps.is_empty() || self.mode == PlaybackMode::Playing {
            return;
        }

        self.cancel_pending();
        self.mode = PlaybackMode::Playing;
        debug!(
            cursor = self.cursor,
            speed_ms = self.speed_ms,
            "playback started"
        );
        self.activate_current_step();
    }

    pub fn pause(&mut self) {
        if self.mode != PlaybackMode::Playing {
            return;
        }

        self.cancel_pending();
        self.mode = PlaybackMode::Paused;
        debug!(cursor = self.cursor, "playback paused");
    }

    /// Play/Pause toggle as surfaced by the controls.
    pub fn toggle(&mut self) {
        if self.mode == PlaybackMode::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Rewinds to step 0 without re-activating it.
    ///
    /// The loaded sequence stays in place; restoring the displayed structure
    /// to its pre-animation state is up to the caller.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.clock.reset();
        self.mode = PlaybackMode::Idle;
        self.cursor = 0;
        self.description.clear();
        debug!("playback reset");
    }

    /// Moves one step forward and activates it. No-op on the last step.
    pub fn next_step(&mut self) {
        if self.cursor + 1 >= self.steps.len() {
            return;
        }

        self.cancel_pending();
        self.cursor += 1;
        self.activate_current_step();
    }

    /// Moves one step back without activating it. No-op on the first step.
    pub fn prev_step(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.scrub_to(self.cursor - 1);
    }

    /// Moves the cursor to `index` without activating it. Out-of-range
    /// indices are ignored.
    pub fn go_to_step(&mut self, index: usize) {
        if index >= self.steps.len() {
            return;
        }
        self.scrub_to(index);
    }

    /// Sets the default inter-step delay. Advances that are already armed
    /// keep their original due time.
    pub fn set_speed(&mut self, speed_ms: u64) {
        self.speed_ms = speed_ms.max(1);
        debug!(speed_ms = self.speed_ms, "playback speed changed");
    }

    pub fn set_speed_preset(&mut self, preset: SpeedPreset) {
        self.set_speed(preset.millis());
    }

    /// Advances the virtual clock by `elapsed` and fires every advance that
    /// falls due inside that window, oldest first.
    pub fn tick(&mut self, elapsed: Duration) {
        let mut target = self.clock;
        target.advance(elapsed);

        while let Some(pending) = self.pending {
            if !pending.is_due(&target) {
                break;
            }
            self.pending = None;
            self.clock.advance_to(pending.due_ms);
            self.fire(pending);
        }

        self.clock.advance_to(target.now_ms());
    }

    /// Fires pending advances until playback stops scheduling new ones.
    pub fn run_to_completion(&mut self) {
        while let Some(remaining) = self.time_until_next_advance() {
            self.tick(remaining);
        }
    }

    /// Time until the pending advance fires, if one is armed.
    pub fn time_until_next_advance(&self) -> Option<Duration> {
        self.pending.map(|pending| pending.remaining(&self.clock))
    }

    pub fn has_pending_advance(&self) -> bool {
        self.pending.is_some()
    }

    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    pub fn current(&self) -> Option<&Step<T>> {
        self.steps.get(self.cursor)
    }

    pub fn current_step(&self) -> usize {
        self.cursor
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn is_playing(&self) -> bool {
        self.mode == PlaybackMode::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.mode == PlaybackMode::Paused
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn current_description(&self) -> &str {
        &self.description
    }

    /// `cursor / (total - 1) * 100`, or `0` for fewer than two steps.
    pub fn progress(&self) -> f64 {
        let total = self.steps.len();
        if total > 1 {
            self.cursor as f64 / (total - 1) as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            is_playing: self.is_playing(),
            is_paused: self.is_paused(),
            current_step: self.cursor,
            total_steps: self.steps.len(),
            current_description: self.description.clone(),
            progress: self.progress(),
        }
    }

    fn activate_current_step(&mut self) {
        let Some(step) = self.steps.get(self.cursor) else {
            return;
        };

        self.description.clone_from(&step.description);
        if let Some(callback) = self.on_step.as_mut() {
            callback(step, self.cursor);
        }

        if self.mode == PlaybackMode::Playing {
            if self.cursor + 1 < self.steps.len() {
                self.arm_advance();
            } else {
                self.mode = PlaybackMode::Idle;
                debug!(total_steps = self.steps.len(), "playback complete");
            }
        }
    }

    fn scrub_to(&mut self, index: usize) {
        self.cancel_pending();
        self.cursor = index;
        if let Some(step) = self.steps.get(index) {
            self.description.clone_from(&step.description);
        }
        trace!(cursor = index, "scrubbed");

        if self.mode == PlaybackMode::Playing {
            if self.cursor + 1 < self.steps.len() {
                self.arm_advance();
            } else {
                self.mode = PlaybackMode::Idle;
            }
        }
    }

    fn arm_advance(&mut self) {
        let delay_ms = self.steps[self.cursor].effective_delay(self.speed_ms);
        let pending = PendingAdvance::new(self.clock.now_ms(), delay_ms, self.cursor);
        trace!(
            cursor = self.cursor,
            delay_ms,
            due_ms = pending.due_ms,
            "advance armed"
        );
        self.pending = Some(pending);
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            trace!(due_ms = pending.due_ms, "pending advance cancelled");
        }
    }

    fn fire(&mut self, pending: PendingAdvance) {
        debug_assert_eq!(pending.armed_at_cursor, self.cursor);
        if self.mode != PlaybackMode::Playing || self.cursor + 1 >= self.steps.len() {
            return;
        }

        self.cursor += 1;
        self.activate_current_step();
    }
}

impl<T> fmt::Debug for AnimationEngine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationEngine")
            .field("total_steps", &self.steps.len())
            .field("cursor", &self.cursor)
            .field("mode", &self.mode)
            .field("speed_ms", &self.speed_ms)
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    type Log = Rc<RefCell<Vec<(usize, String)>>>;

    fn steps(count: usize) -> Vec<Step<usize>> {
        (0..count)
            .map(|i| Step::new(format!("step {i}"), i))
            .collect()
    }

    fn submit_logged(engine: &mut AnimationEngine<usize>, steps: Vec<Step<usize>>) -> Log {
        let log: Log = Rc::default();
        let sink = log.clone();
        engine.submit(steps, move |step, index| {
            sink.borrow_mut().push((index, step.description.clone()));
        });
        log
    }

    fn due_in(ms: u64) -> Option<Duration> {
        Some(Duration::from_millis(ms))
    }

    fn indices(log: &Log) -> Vec<usize> {
        log.borrow().iter().map(|(index, _)| *index).collect()
    }

    #[test]
    fn resubmitting_replaces_sequence_and_restarts_clock() {
        let mut engine = AnimationEngine::with_speed(100);
        submit_logged(&mut engine, steps(3));
        engine.play();
        engine.tick(Duration::from_millis(150));
        assert_eq!(engine.current_step(), 1);

        let log = submit_logged(&mut engine, steps(2));
        assert_eq!(engine.steps().len(), 2);
        assert_eq!(engine.steps()[1].data, 1);
        assert_eq!(indices(&log), vec![0]);
        assert!(!engine.has_pending_advance());

        engine.play();
        assert_eq!(engine.time_until_next_advance(), due_in(100));
        engine.tick(Duration::from_millis(100));
        assert_eq!(indices(&log), vec![0, 0, 1]);
        assert_eq!(engine.mode(), PlaybackMode::Idle);
    }

    #[test]
    fn submit_activates_first_step_without_playing() {
        let mut engine = AnimationEngine::new();
        let log = submit_logged(&mut engine, steps(3));

        assert_eq!(indices(&log), vec![0]);
        assert_eq!(engine.mode(), PlaybackMode::Idle);
        assert_eq!(engine.current_description(), "step 0");
        assert!(!engine.has_pending_advance());
    }

    #[test]
    fn autoplay_visits_every_index_in_order() {
        let mut engine = AnimationEngine::with_speed(10);
        let log = submit_logged(&mut engine, steps(6));
        log.borrow_mut().clear();

        engine.play();
        engine.run_to_completion();

        assert_eq!(indices(&log), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(engine.mode(), PlaybackMode::Idle);
        assert_eq!(engine.current_step(), 5);
        assert!(!engine.has_pending_advance());
    }

    #[test]
    fn tick_fires_only_due_advances() {
        let mut engine = AnimationEngine::with_speed(100);
        let log = submit_logged(&mut engine, steps(5));
        engine.play();

        engine.tick(Duration::from_millis(99));
        assert_eq!(engine.current_step(), 0);

        engine.tick(Duration::from_millis(1));
        assert_eq!(engine.current_step(), 1);

        engine.tick(Duration::from_millis(250));
        assert_eq!(engine.current_step(), 3);
        assert_eq!(engine.time_until_next_advance(), due_in(50));
        assert_eq!(indices(&log), vec![0, 0, 1, 2, 3]);
    }

    #[test]
    fn pause_and_resume_reactivates_current_step() {
        let mut engine = AnimationEngine::with_speed(100);
        let log = submit_logged(&mut engine, steps(5));
        log.borrow_mut().clear();

        engine.play();
        engine.tick(Duration::from_millis(200));
        engine.pause();
        assert!(engine.is_paused());
        assert!(!engine.has_pending_advance());

        engine.tick(Duration::from_secs(10));
        assert_eq!(engine.current_step(), 2);

        engine.play();
        engine.run_to_completion();
        assert_eq!(indices(&log), vec![0, 1, 2, 2, 3, 4]);
    }

    #[test]
    fn at_most_one_advance_is_ever_pending() {
        let mut engine = AnimationEngine::with_speed(100);
        submit_logged(&mut engine, steps(4));

        engine.play();
        engine.play();
        assert!(engine.has_pending_advance());
        assert_eq!(engine.time_until_next_advance(), due_in(100));

        engine.pause();
        assert!(!engine.has_pending_advance());

        engine.play();
        engine.reset();
        assert!(!engine.has_pending_advance());
        assert_eq!(engine.mode(), PlaybackMode::Idle);

        engine.play();
        submit_logged(&mut engine, steps(2));
        assert!(!engine.has_pending_advance());
        assert_eq!(engine.mode(), PlaybackMode::Idle);
    }

    #[test]
    fn empty_sequence_makes_transport_a_no_op() {
        let mut engine = AnimationEngine::new();
        let log = submit_logged(&mut engine, Vec::new());

        engine.play();
        engine.next_step();
        engine.prev_step();
        engine.go_to_step(0);
        engine.pause();
        engine.run_to_completion();

        assert!(log.borrow().is_empty());
        assert_eq!(engine.total_steps(), 0);
        assert_eq!(engine.current_step(), 0);
        assert_eq!(engine.mode(), PlaybackMode::Idle);
    }

    #[test]
    fn progress_follows_cursor() {
        let mut engine = AnimationEngine::new();
        submit_logged(&mut engine, steps(5));
        engine.go_to_step(2);
        assert_eq!(engine.progress(), 50.0);

        engine.go_to_step(4);
        assert_eq!(engine.progress(), 100.0);

        submit_logged(&mut engine, steps(1));
        assert_eq!(engine.progress(), 0.0);
    }

    #[test]
    fn scrubbing_does_not_replay_steps() {
        let mut engine = AnimationEngine::new();
        let log = submit_logged(&mut engine, steps(5));

        engine.go_to_step(3);
        engine.go_to_step(1);
        engine.go_to_step(9);

        assert_eq!(engine.current_step(), 1);
        assert_eq!(engine.current_description(), "step 1");
        assert_eq!(indices(&log), vec![0]);
    }

    #[test]
    fn single_step_playback_completes_immediately() {
        let mut engine = AnimationEngine::new();
        let log = submit_logged(&mut engine, vec![Step::new("Value 42 not found", 0)]);

        engine.play();

        assert_eq!(engine.mode(), PlaybackMode::Idle);
        assert!(!engine.has_pending_advance());
        assert_eq!(indices(&log), vec![0, 0]);
    }

    #[test]
    fn manual_stepping_counts_only_forward_activations() {
        let mut engine = AnimationEngine::new();
        let log = submit_logged(&mut engine, steps(5));

        engine.next_step();
        engine.next_step();
        engine.next_step();
        engine.prev_step();

        assert_eq!(engine.current_step(), 2);
        assert_eq!(log.borrow().len(), 4);
    }

    #[test]
    fn next_step_stops_at_last_step() {
        let mut engine = AnimationEngine::new();
        let log = submit_logged(&mut engine, steps(2));

        engine.next_step();
        engine.next_step();
        engine.prev_step();
        engine.prev_step();

        assert_eq!(engine.current_step(), 0);
        assert_eq!(indices(&log), vec![0, 1]);
    }

    #[test]
    fn step_delay_overrides_speed() {
        let mut engine = AnimationEngine::with_speed(1000);
        let mut sequence = steps(3);
        sequence[0] = Step::new("quick", 0).with_delay(10);
        submit_logged(&mut engine, sequence);

        engine.play();
        assert_eq!(engine.time_until_next_advance(), due_in(10));

        engine.tick(Duration::from_millis(10));
        assert_eq!(engine.current_step(), 1);
        assert_eq!(engine.time_until_next_advance(), due_in(1000));
    }

    #[test]
    fn speed_change_applies_to_later_steps_only() {
        let mut engine = AnimationEngine::with_speed(1000);
        submit_logged(&mut engine, steps(3));
        engine.play();

        engine.set_speed_preset(SpeedPreset::VeryFast);
        assert_eq!(engine.time_until_next_advance(), due_in(1000));

        engine.tick(Duration::from_millis(1000));
        assert_eq!(engine.time_until_next_advance(), due_in(200));
    }

    #[test]
    fn zero_speed_is_clamped() {
        let mut engine = AnimationEngine::<usize>::new();
        engine.set_speed(0);
        assert_eq!(engine.speed_ms(), 1);
    }

    #[test]
    fn scrub_while_playing_continues_from_new_position() {
        let mut engine = AnimationEngine::with_speed(100);
        let log = submit_logged(&mut engine, steps(6));
        log.borrow_mut().clear();

        engine.play();
        engine.tick(Duration::from_millis(50));
        engine.go_to_step(3);
        assert!(engine.is_playing());
        assert_eq!(engine.time_until_next_advance(), due_in(100));

        engine.run_to_completion();
        assert_eq!(indices(&log), vec![0, 4, 5]);
        assert_eq!(engine.mode(), PlaybackMode::Idle);
    }

    #[test]
    fn scrub_to_last_step_while_playing_finishes() {
        let mut engine = AnimationEngine::with_speed(100);
        submit_logged(&mut engine, steps(4));
        engine.play();

        engine.go_to_step(3);

        assert_eq!(engine.mode(), PlaybackMode::Idle);
        assert!(!engine.has_pending_advance());
    }

    #[test]
    fn next_step_while_playing_rearms_from_new_cursor() {
        let mut engine = AnimationEngine::with_speed(100);
        let log = submit_logged(&mut engine, steps(4));
        log.borrow_mut().clear();

        engine.play();
        engine.tick(Duration::from_millis(60));
        engine.next_step();
        engine.tick(Duration::from_millis(60));
        assert_eq!(engine.current_step(), 1);

        engine.run_to_completion();
        assert_eq!(indices(&log), vec![0, 1, 2, 3]);
    }

    #[test]
    fn reset_rewinds_without_callback() {
        let mut engine = AnimationEngine::new();
        let log = submit_logged(&mut engine, steps(3));
        engine.next_step();
        engine.reset();

        assert_eq!(engine.current_step(), 0);
        assert_eq!(engine.current_description(), "");
        assert_eq!(engine.total_steps(), 3);
        assert_eq!(indices(&log), vec![0, 1]);
    }

    #[test]
    fn toggle_switches_between_play_and_pause() {
        let mut engine = AnimationEngine::new();
        submit_logged(&mut engine, steps(3));

        engine.toggle();
        assert!(engine.is_playing());
        engine.toggle();
        assert!(engine.is_paused());
    }

    #[test]
    fn resubmitting_replaces_callback() {
        let mut engine = AnimationEngine::with_speed(10);
        let first = submit_logged(&mut engine, steps(3));
        engine.play();

        let second = submit_logged(&mut engine, steps(2));
        engine.play();
        engine.run_to_completion();

        assert_eq!(indices(&first), vec![0, 0]);
        assert_eq!(indices(&second), vec![0, 0, 1]);
    }

    #[test]
    fn status_reports_projection() {
        let mut engine = AnimationEngine::new();
        submit_logged(&mut engine, steps(3));
        engine.play();

        let status = engine.status();
        assert!(status.is_playing);
        assert!(!status.is_paused);
        assert_eq!(status.total_steps, 3);
        assert_eq!(status.current_description, "step 0");
        assert_eq!(status.progress, 0.0);
    }

    #[test]
    fn speed_presets_map_to_millis() {
        let millis: Vec<u64> = SpeedPreset::ALL.iter().map(|p| p.millis()).collect();
        assert_eq!(millis, vec![2000, 1000, 500, 200]);
    }
}
