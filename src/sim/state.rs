//! Game state and session-level types
//!
//! Everything a session owns lives in `GameState`; the tick functions in
//! `tick.rs` are the only code that mutates it.

use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::character::Character;
use super::obstacle::ObstacleManager;
use super::scenery::{Cloud, GameOverBanner, Track};
use super::score::ScoreBoard;
use super::speed::GameSpeed;
use crate::assets::SpriteSheet;
use crate::consts::*;
use crate::font::Font;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first confirm input
    Beginning,
    /// Active gameplay
    Running,
    /// Declared for completeness; no input leads here
    Paused,
    /// Character crashed; confirm restarts
    GameOver,
}

/// Side effects produced by a tick, drained by the session owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Beginning -> Running
    Started,
    /// Jump input, whether or not a jump happened
    JumpAttempted,
    /// Character hit an obstacle
    Hit,
    /// Score reached a multiple of the milestone; `speed` is the new speed
    Milestone { score: u32, speed: i32 },
    /// Current score went past the best; carries the new best
    HighScore(u32),
    /// Running -> GameOver with the final score
    GameOver { score: u32 },
    /// GameOver -> Beginning after a full reset
    Restarted,
}

/// Complete session state
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn and scenery randomness
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Shared scroll speed; obstacles and scenery read it live
    pub speed: GameSpeed,
    pub character: Character,
    pub obstacles: ObstacleManager,
    pub cloud: Cloud,
    pub track: Track,
    pub scores: ScoreBoard,
    pub banner: GameOverBanner,
    /// Simulation tick counter (all phases)
    pub time_ticks: u64,
    /// Pending side effects, oldest first
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session in `Beginning` with the given seed and stored best
    pub fn new(sheet: &SpriteSheet, font: Rc<dyn Font>, high_score: u32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let speed = GameSpeed::new(BASE_SPEED);
        let cloud = Cloud::new(sheet.cloud.clone(), speed.view(), &mut rng);

        Self {
            seed,
            phase: GamePhase::Beginning,
            character: Character::new(sheet.character.clone()),
            obstacles: ObstacleManager::new(sheet.obstacles.clone(), speed.view()),
            cloud,
            track: Track::new(sheet.track.clone(), speed.view()),
            scores: ScoreBoard::new(high_score, Rc::clone(&font)),
            banner: GameOverBanner::new(sheet.restart.clone(), font),
            speed,
            rng,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn score(&self) -> u32 {
        self.scores.current.value()
    }

    pub fn high_score(&self) -> u32 {
        self.scores.best.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BlockFont;
    use crate::sim::character::CharacterState;

    #[test]
    fn test_new_session_waits_to_begin() {
        let sheet = SpriteSheet::load().unwrap();
        let mut state = GameState::new(&sheet, Rc::new(BlockFont::default()), 42, 1);
        assert_eq!(state.phase, GamePhase::Beginning);
        assert_eq!(state.speed.get(), BASE_SPEED);
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score(), 42);
        assert_eq!(state.character.state(), CharacterState::Idle);
        assert!(state.obstacles.active().is_empty());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_drain_empties_queue() {
        let sheet = SpriteSheet::load().unwrap();
        let mut state = GameState::new(&sheet, Rc::new(BlockFont::default()), 0, 1);
        state.events.push(GameEvent::Hit);
        state.events.push(GameEvent::JumpAttempted);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Hit, GameEvent::JumpAttempted]
        );
        assert!(state.events.is_empty());
    }
}
