//! Fixed-tick simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform concerns:
//! - One update per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - Side effects leave as `GameEvent`s

pub mod character;
pub mod collision;
pub mod obstacle;
pub mod scenery;
pub mod score;
pub mod speed;
pub mod state;
pub mod tick;

pub use character::{Character, CharacterState};
pub use collision::{CollisionResult, entities_collide, first_collision, mask_overlap};
pub use obstacle::{Obstacle, ObstacleKind, ObstacleManager};
pub use scenery::{Cloud, GameOverBanner, Track};
pub use score::{Score, ScoreBoard, is_milestone};
pub use speed::{GameSpeed, SpeedView};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Command, TickInput, draw, handle_input, handle_keys, reset, tick, update};
