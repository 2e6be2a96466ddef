//! Per-level run loop
//!
//! `FrameClock` turns animation-frame timestamps into clamped time steps.
//! `LevelRun` owns the current `State` of one attempt at a level and steps
//! it once per frame until the level is won or lost, then keeps animating
//! for a short grace interval before reporting the outcome.

use std::rc::Rc;

use crate::display::{Display, DisplayError};
use crate::sim::{Input, Level, State, Status};

/// Converts frame timestamps (ms) into time steps (s)
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    max_step_ms: f64,
}

impl FrameClock {
    pub fn new(max_step_ms: f64) -> Self {
        Self {
            last: None,
            max_step_ms,
        }
    }

    /// Step since the previous call, clamped to the max step
    ///
    /// The first call after construction or `reset` only primes the clock.
    pub fn tick(&mut self, now_ms: f64) -> Option<f32> {
        let step = self
            .last
            .map(|last| ((now_ms - last).clamp(0.0, self.max_step_ms) / 1000.0) as f32);
        self.last = Some(now_ms);
        step
    }

    /// Forget the previous timestamp (after a pause)
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Phase of a level run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Running,
    Paused,
    /// The level finished with this status and the grace interval is over
    Ended(Status),
}

/// One attempt at a level
#[derive(Debug, Clone)]
pub struct LevelRun {
    state: State,
    phase: RunPhase,
    /// Grace time left once the level is decided
    ending: f32,
}

impl LevelRun {
    pub fn new(level: Rc<Level>, end_grace_secs: f32) -> Self {
        Self {
            state: State::start(level),
            phase: RunPhase::Running,
            ending: end_grace_secs,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Flip between running and paused; an ended run stays ended
    pub fn toggle_pause(&mut self) -> RunPhase {
        self.phase = match self.phase {
            RunPhase::Running => RunPhase::Paused,
            RunPhase::Paused => RunPhase::Running,
            ended @ RunPhase::Ended(_) => ended,
        };
        self.phase
    }

    /// Advance one frame of `dt` seconds
    ///
    /// Display errors while the level is being played are returned. Once the
    /// level is decided drawing is best effort: failures are logged and the
    /// run still ends.
    pub fn frame(
        &mut self,
        dt: f32,
        input: &Input,
        display: &mut dyn Display,
    ) -> Result<RunPhase, DisplayError> {
        if self.phase != RunPhase::Running {
            return Ok(self.phase);
        }

        self.state = self.state.update(dt, input);
        let status = self.state.status();

        if status == Status::Playing {
            display.sync_state(&self.state)?;
            return Ok(RunPhase::Running);
        }

        if let Err(e) = display.sync_state(&self.state) {
            log::warn!("Ignoring display failure after level {}: {}", status.as_str(), e);
        }

        if self.ending > 0.0 {
            self.ending -= dt;
            return Ok(RunPhase::Running);
        }

        display.clear();
        self.phase = RunPhase::Ended(status);
        Ok(self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{NullDisplay, TextDisplay};

    fn level(plan: &str) -> Rc<Level> {
        Rc::new(Level::parse(plan, 3).unwrap())
    }

    /// Fails every draw
    struct BrokenDisplay {
        cleared: bool,
    }

    impl Display for BrokenDisplay {
        fn sync_state(&mut self, _state: &State) -> Result<(), DisplayError> {
            Err(DisplayError("canvas lost".to_string()))
        }

        fn clear(&mut self) {
            self.cleared = true;
        }
    }

    #[test]
    fn test_clock_primes_then_clamps() {
        let mut clock = FrameClock::new(100.0);
        assert_eq!(clock.tick(1000.0), None);
        assert_eq!(clock.tick(1016.0), Some(0.016));
        // A long stall is clamped
        assert_eq!(clock.tick(5000.0), Some(0.1));
        // Time going backwards yields a zero step
        assert_eq!(clock.tick(4000.0), Some(0.0));

        clock.reset();
        assert_eq!(clock.tick(6000.0), None);
    }

    #[test]
    fn test_running_frames_sync_display() {
        let mut run = LevelRun::new(level(".\n@\n.\n."), 1.0);
        let mut display = TextDisplay::default();
        for _ in 0..5 {
            let phase = run.frame(0.016, &Input::default(), &mut display).unwrap();
            assert_eq!(phase, RunPhase::Running);
        }
        assert_eq!(display.frames_drawn, 5);
        assert!(run.state().player().unwrap().pos.y > 0.5);
    }

    #[test]
    fn test_pause_freezes_state() {
        let mut run = LevelRun::new(level(".\n@\n.\n."), 1.0);
        let mut display = TextDisplay::default();
        run.frame(0.016, &Input::default(), &mut display).unwrap();

        assert_eq!(run.toggle_pause(), RunPhase::Paused);
        let frozen = run.state().clone();
        for _ in 0..10 {
            let phase = run.frame(0.016, &Input::default(), &mut display).unwrap();
            assert_eq!(phase, RunPhase::Paused);
        }
        assert_eq!(run.state(), &frozen);
        assert_eq!(display.frames_drawn, 1);

        assert_eq!(run.toggle_pause(), RunPhase::Running);
        run.frame(0.016, &Input::default(), &mut display).unwrap();
        assert_ne!(run.state(), &frozen);
    }

    #[test]
    fn test_grace_interval_before_end() {
        let mut run = LevelRun::new(level("...\n.o.\n.@.\n..."), 0.5);
        let mut display = TextDisplay::default();

        let mut running_frames = 0;
        let ended = loop {
            match run.frame(0.05, &Input::default(), &mut display).unwrap() {
                RunPhase::Running => running_frames += 1,
                RunPhase::Ended(status) => break status,
                RunPhase::Paused => unreachable!(),
            }
            assert!(running_frames < 40);
        };

        assert_eq!(ended, Status::Won);
        assert!(running_frames >= 10);
        assert!(display.frame.is_empty());
    }

    #[test]
    fn test_no_grace_ends_on_first_terminal_frame() {
        let mut run = LevelRun::new(level(".+.\n.@.\n..."), 0.0);
        let phase = run.frame(0.016, &Input::default(), &mut NullDisplay).unwrap();
        assert_eq!(phase, RunPhase::Ended(Status::Lost));

        // Ended runs ignore further frames and pause toggles
        assert_eq!(run.toggle_pause(), RunPhase::Ended(Status::Lost));
        let phase = run.frame(0.016, &Input::default(), &mut NullDisplay).unwrap();
        assert_eq!(phase, RunPhase::Ended(Status::Lost));
    }

    #[test]
    fn test_display_failure_while_playing_is_returned() {
        let mut run = LevelRun::new(level(".\n@\n.\n."), 1.0);
        let mut display = BrokenDisplay { cleared: false };
        let err = run.frame(0.016, &Input::default(), &mut display).unwrap_err();
        assert_eq!(err, DisplayError("canvas lost".to_string()));
    }

    #[test]
    fn test_display_failure_after_end_is_ignored() {
        let mut run = LevelRun::new(level(".+.\n.@.\n..."), 0.2);
        let mut display = BrokenDisplay { cleared: false };
        let mut phase = RunPhase::Running;
        for _ in 0..10 {
            phase = run.frame(0.1, &Input::default(), &mut display).unwrap();
            if phase != RunPhase::Running {
                break;
            }
        }
        assert_eq!(phase, RunPhase::Ended(Status::Lost));
        assert!(display.cleared);
    }
}
