//! Multi-level game session
//!
//! Plays a list of levels in order. Losing a level costs a life and
//! restarts it; winning moves on and refills lives. The session ends when
//! every level is won or the lives run out.

use std::rc::Rc;

use thiserror::Error;

use crate::display::{Display, DisplayError};
use crate::runner::{LevelRun, RunPhase};
use crate::settings::Settings;
use crate::sim::{Input, Level, LevelError, State, Status};

/// Errors raised while setting up a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no levels to play")]
    NoLevels,
    #[error("level {index} is malformed: {source}")]
    Level {
        index: usize,
        #[source]
        source: LevelError,
    },
}

/// What happened during a session frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Playing,
    Paused,
    /// A level was decided and the session moved on (or retried it)
    LevelEnded { level: usize, status: Status },
    /// `won` is true when every level was completed
    Finished { won: bool },
}

/// A full game over a sequence of levels
#[derive(Debug)]
pub struct Session {
    levels: Vec<Rc<Level>>,
    settings: Settings,
    level_index: usize,
    lives: u8,
    run: LevelRun,
    outcome: Option<bool>,
}

impl Session {
    /// Parse every plan up front; a malformed plan stops the session before
    /// it starts
    pub fn new(plans: &[&str], settings: Settings, seed: u64) -> Result<Self, SessionError> {
        let settings = settings.sanitized();
        let levels = plans
            .iter()
            .enumerate()
            .map(|(index, plan)| {
                Level::parse(plan, seed.wrapping_add(index as u64))
                    .map(Rc::new)
                    .map_err(|source| SessionError::Level { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let first = levels.first().ok_or(SessionError::NoLevels)?.clone();
        let run = LevelRun::new(first, settings.end_grace_secs);
        log::info!("Session started: {} levels, seed {}", levels.len(), seed);

        Ok(Self {
            lives: settings.starting_lives,
            levels,
            settings,
            level_index: 0,
            run,
            outcome: None,
        })
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// State of the level being played (or the last one played)
    pub fn state(&self) -> &State {
        self.run.state()
    }

    /// `Some(all_won)` once the session is over
    pub fn outcome(&self) -> Option<bool> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.run.phase() == RunPhase::Paused
    }

    /// Pause or resume the current level
    pub fn toggle_pause(&mut self) {
        if self.is_finished() {
            return;
        }
        let phase = self.run.toggle_pause();
        log::debug!("Pause toggled: {:?}", phase);
    }

    /// Stop the session between frames; it counts as not won
    pub fn cancel(&mut self) {
        if self.outcome.is_none() {
            log::info!("Session cancelled on level {}", self.level_index + 1);
            self.outcome = Some(false);
        }
    }

    /// Advance one frame of `dt` seconds
    pub fn frame(
        &mut self,
        dt: f32,
        input: &Input,
        display: &mut dyn Display,
    ) -> Result<Progress, DisplayError> {
        if let Some(won) = self.outcome {
            return Ok(Progress::Finished { won });
        }

        match self.run.frame(dt, input, display)? {
            RunPhase::Running => Ok(Progress::Playing),
            RunPhase::Paused => Ok(Progress::Paused),
            RunPhase::Ended(status) => Ok(self.level_ended(status)),
        }
    }

    fn level_ended(&mut self, status: Status) -> Progress {
        let level = self.level_index;
        match status {
            Status::Playing => return Progress::Playing,
            Status::Won => {
                log::info!("Level {} won", level + 1);
                self.level_index += 1;
                self.lives = self.settings.starting_lives;
                if self.level_index == self.levels.len() {
                    return self.finish(true);
                }
            }
            Status::Lost => {
                self.lives = self.lives.saturating_sub(1);
                log::info!("Level {} lost, {} lives left", level + 1, self.lives);
                if self.lives == 0 {
                    return self.finish(false);
                }
            }
        }

        let next = self.levels[self.level_index].clone();
        self.run = LevelRun::new(next, self.settings.end_grace_secs);
        Progress::LevelEnded { level, status }
    }

    fn finish(&mut self, won: bool) -> Progress {
        log::info!("Session over: {}", if won { "all levels won" } else { "out of lives" });
        self.outcome = Some(won);
        Progress::Finished { won }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::NullDisplay;

    /// Won by standing still, lost by stepping right into the lava
    const CHOICE: &str = "...\n.o+\n.@.\n...";
    /// Never decided without input
    const IDLE: &str = ".\n@\n.\n.";
    const INSTANT_WIN: &str = "...\n.o.\n.@.\n...";
    const INSTANT_LOSS: &str = ".+.\n.@.\n...";

    const RIGHT: Input = Input {
        left: false,
        right: true,
        jump: false,
    };
    const NONE: Input = Input {
        left: false,
        right: false,
        jump: false,
    };

    fn settings() -> Settings {
        Settings {
            end_grace_secs: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_level_win() {
        let mut session = Session::new(&[INSTANT_WIN], settings(), 1).unwrap();
        let progress = session.frame(0.05, &NONE, &mut NullDisplay).unwrap();
        assert_eq!(progress, Progress::Finished { won: true });
        assert_eq!(session.outcome(), Some(true));
    }

    #[test]
    fn test_advances_to_next_level() {
        let mut session = Session::new(&[INSTANT_WIN, IDLE], settings(), 1).unwrap();
        let progress = session.frame(0.05, &NONE, &mut NullDisplay).unwrap();
        assert_eq!(
            progress,
            Progress::LevelEnded {
                level: 0,
                status: Status::Won
            }
        );
        assert_eq!(session.level_index(), 1);
        assert_eq!(session.state().status(), Status::Playing);
        assert_eq!(
            session.frame(0.05, &NONE, &mut NullDisplay).unwrap(),
            Progress::Playing
        );
    }

    #[test]
    fn test_out_of_lives() {
        let mut session = Session::new(&[INSTANT_LOSS], settings(), 1).unwrap();
        for lives_left in [2, 1] {
            let progress = session.frame(0.05, &NONE, &mut NullDisplay).unwrap();
            assert_eq!(
                progress,
                Progress::LevelEnded {
                    level: 0,
                    status: Status::Lost
                }
            );
            assert_eq!(session.lives(), lives_left);
            // Restarted from scratch
            assert_eq!(session.state().status(), Status::Playing);
        }
        let progress = session.frame(0.05, &NONE, &mut NullDisplay).unwrap();
        assert_eq!(progress, Progress::Finished { won: false });
        assert_eq!(session.lives(), 0);

        // Finished sessions stay finished
        let progress = session.frame(0.05, &NONE, &mut NullDisplay).unwrap();
        assert_eq!(progress, Progress::Finished { won: false });
    }

    #[test]
    fn test_lives_refill_after_win() {
        let mut session = Session::new(&[CHOICE, IDLE], settings(), 1).unwrap();
        let progress = session.frame(0.05, &RIGHT, &mut NullDisplay).unwrap();
        assert_eq!(
            progress,
            Progress::LevelEnded {
                level: 0,
                status: Status::Lost
            }
        );
        assert_eq!(session.lives(), 2);
        assert_eq!(session.level_index(), 0);

        let progress = session.frame(0.05, &NONE, &mut NullDisplay).unwrap();
        assert_eq!(
            progress,
            Progress::LevelEnded {
                level: 0,
                status: Status::Won
            }
        );
        assert_eq!(session.lives(), 3);
        assert_eq!(session.level_index(), 1);
    }

    #[test]
    fn test_pause_and_cancel() {
        let mut session = Session::new(&[IDLE], settings(), 1).unwrap();
        session.frame(0.05, &NONE, &mut NullDisplay).unwrap();
        let before = session.state().clone();

        session.toggle_pause();
        assert!(session.is_paused());
        assert_eq!(
            session.frame(0.05, &NONE, &mut NullDisplay).unwrap(),
            Progress::Paused
        );
        assert_eq!(session.state(), &before);

        session.toggle_pause();
        assert!(!session.is_paused());

        session.cancel();
        assert_eq!(
            session.frame(0.05, &NONE, &mut NullDisplay).unwrap(),
            Progress::Finished { won: false }
        );
    }

    #[test]
    fn test_malformed_level_fails_fast() {
        let err = Session::new(&[IDLE, "@.\n."], settings(), 1).unwrap_err();
        assert_eq!(
            err,
            SessionError::Level {
                index: 1,
                source: LevelError::UnevenRow {
                    row: 1,
                    expected: 2,
                    found: 1
                }
            }
        );
        assert_eq!(
            Session::new(&[], settings(), 1).unwrap_err(),
            SessionError::NoLevels
        );
    }
}
