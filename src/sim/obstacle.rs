//! Obstacles and their spawn/retire lifecycle
//!
//! At most one obstacle is in flight. When none is, one of the three
//! variants is spawned just past the right edge of the screen; it then
//! scrolls left at the live game speed until it is fully off screen.

use rand::Rng;

use crate::assets::ObstacleSprites;
use crate::consts::*;
use crate::entity::{Drawable, Entity, Group, Image, Update};

use super::speed::SpeedView;

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Short ground obstacle
    SmallHuman,
    /// Tall ground obstacle
    BigHuman,
    /// Flying obstacle at one of three heights, animated
    Vaccine,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::SmallHuman,
        ObstacleKind::BigHuman,
        ObstacleKind::Vaccine,
    ];

    /// Uniform pick over the three variants (one draw)
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A single obstacle in flight
#[derive(Debug, Clone)]
pub struct Obstacle {
    kind: ObstacleKind,
    entity: Entity,
    /// Animation frames; a single frame means no animation
    frames: Vec<Image>,
    step: u32,
    speed: SpeedView,
}

impl Obstacle {
    /// `frames` must not be empty; the first one is shown at spawn
    pub fn new(kind: ObstacleKind, x: i32, y: i32, frames: Vec<Image>, speed: SpeedView) -> Self {
        let first = frames[0].clone();
        Self {
            kind,
            entity: Entity::top_left(x, y, first),
            frames,
            step: 0,
            speed,
        }
    }

    /// Create a random instance of `kind` just off the right edge
    pub fn spawn<R: Rng + ?Sized>(
        kind: ObstacleKind,
        sprites: &ObstacleSprites,
        speed: SpeedView,
        rng: &mut R,
    ) -> Self {
        let (y, frames) = match kind {
            ObstacleKind::SmallHuman => {
                let image = &sprites.small_humans[rng.random_range(0..sprites.small_humans.len())];
                (SMALL_HUMAN_Y, vec![image.clone()])
            }
            ObstacleKind::BigHuman => {
                let image = &sprites.big_humans[rng.random_range(0..sprites.big_humans.len())];
                (BIG_HUMAN_Y, vec![image.clone()])
            }
            ObstacleKind::Vaccine => {
                let y = VACCINE_HEIGHTS[rng.random_range(0..VACCINE_HEIGHTS.len())];
                (y, sprites.vaccine.to_vec())
            }
        };
        Self::new(kind, SCREEN_WIDTH, y, frames, speed)
    }

    pub fn kind(&self) -> ObstacleKind {
        self.kind
    }

    /// Fully past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.entity.x() < -self.entity.width()
    }
}

impl Update for Obstacle {
    fn update(&mut self) {
        self.entity.set_x(self.entity.x() - self.speed.get());
        if self.frames.len() > 1 {
            let frame = (self.step / FRAME_TICKS) as usize % self.frames.len();
            self.entity.set_image(self.frames[frame].clone());
            self.step = (self.step + 1) % ANIMATION_CYCLE;
        }
    }
}

impl Drawable for Obstacle {
    fn entity(&self) -> &Entity {
        &self.entity
    }
}

/// Owns the active obstacle set
#[derive(Debug, Clone)]
pub struct ObstacleManager {
    active: Group<Obstacle>,
    sprites: ObstacleSprites,
    speed: SpeedView,
}

impl ObstacleManager {
    pub fn new(sprites: ObstacleSprites, speed: SpeedView) -> Self {
        Self {
            active: Group::new(),
            sprites,
            speed,
        }
    }

    pub fn active(&self) -> &Group<Obstacle> {
        &self.active
    }

    /// Spawn one obstacle if none is in flight
    pub fn spawn_if_empty<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<ObstacleKind> {
        if !self.active.is_empty() {
            return None;
        }
        let kind = ObstacleKind::random(rng);
        let obstacle = Obstacle::spawn(kind, &self.sprites, self.speed.clone(), rng);
        log::debug!("Spawned {:?} at y={}", kind, obstacle.entity().y());
        self.active.add(obstacle);
        Some(kind)
    }

    /// Move every obstacle, then drop the ones that left the screen.
    /// Returns how many were retired.
    pub fn advance(&mut self) -> usize {
        self.active.update();
        let retired = self.active.retain(|o| !o.is_off_screen());
        if retired > 0 {
            log::debug!("Retired {} obstacle(s)", retired);
        }
        retired
    }

    /// Spawn check followed by advance, once per running tick
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.spawn_if_empty(rng);
        self.advance();
    }

    /// Put an obstacle in flight directly
    pub fn insert(&mut self, obstacle: Obstacle) {
        self.active.add(obstacle);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
