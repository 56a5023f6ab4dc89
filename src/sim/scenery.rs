//! Scrolling background pieces and the game over banner

use std::rc::Rc;

use rand::Rng;

use crate::consts::*;
use crate::entity::{Drawable, Entity, Group, Image, Text};
use crate::font::Font;

use super::speed::SpeedView;

/// Parallax cloud, drifting at half the game speed
#[derive(Debug, Clone)]
pub struct Cloud {
    entity: Entity,
    speed: SpeedView,
}

impl Cloud {
    pub fn new<R: Rng + ?Sized>(image: Image, speed: SpeedView, rng: &mut R) -> Self {
        let mut cloud = Self {
            entity: Entity::top_left(0, 0, image),
            speed: speed.halved(),
        };
        cloud.randomize(rng);
        cloud
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.entity.set_x(self.entity.x() - self.speed.get());
        if self.entity.x() <= -self.entity.width() {
            self.randomize(rng);
        }
    }

    /// Re-enter somewhere past the right edge
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (y_min, y_max) = CLOUD_Y_RANGE;
        self.entity
            .set_x(SCREEN_WIDTH + rng.random_range(0..=CLOUD_X_JITTER));
        self.entity.set_y(rng.random_range(y_min..=y_max));
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.randomize(rng);
    }
}

impl Drawable for Cloud {
    fn entity(&self) -> &Entity {
        &self.entity
    }
}

/// Ground track: two tiles leapfrogging each other
#[derive(Debug, Clone)]
pub struct Track {
    tiles: Group<Entity>,
    tile_width: i32,
    speed: SpeedView,
}

impl Track {
    pub fn new(image: Image, speed: SpeedView) -> Self {
        let tile_width = image.width();
        let mut tiles = Group::new();
        tiles.add(Entity::top_left(0, TRACK_Y, image.clone()));
        tiles.add(Entity::top_left(tile_width, TRACK_Y, image));
        Self {
            tiles,
            tile_width,
            speed,
        }
    }

    pub fn tiles(&self) -> &Group<Entity> {
        &self.tiles
    }

    pub fn update(&mut self) {
        let speed = self.speed.get();
        for tile in &mut self.tiles {
            tile.set_x(tile.x() - speed);
            // Wrap one tick early so the swap happens before a gap can show
            if tile.x() - speed <= -self.tile_width {
                tile.set_x(self.tile_width);
            }
        }
    }

    pub fn reset(&mut self) {
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            tile.set_x(if i == 0 { 0 } else { self.tile_width });
        }
    }
}

/// Restart icon plus "GAME OVER" headline, shown only after a crash
#[derive(Debug, Clone)]
pub struct GameOverBanner {
    items: Group<Entity>,
}

impl GameOverBanner {
    pub fn new(restart: Image, font: Rc<dyn Font>) -> Self {
        let mut items = Group::new();
        items.add(Entity::centered(
            SCREEN_WIDTH / 2,
            SCREEN_HEIGHT / 2,
            restart,
        ));
        let title = Text::new(
            SCREEN_WIDTH / 2,
            GAME_OVER_TEXT_Y,
            "GAME OVER",
            GAME_OVER_COLOR,
            font,
            crate::entity::Anchor::Centered,
        );
        items.add(title.entity().clone());
        Self { items }
    }

    pub fn items(&self) -> &Group<Entity> {
        &self.items
    }
}
