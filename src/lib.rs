//! Corona Dash - A side-scrolling reflex runner
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (character FSM, obstacles, scoring, collisions)
//! - `entity`: Positioned, image-bearing objects and ordered groups
//! - `renderer`: Software canvas + terminal presentation
//! - `platform`: Frame loop driver and input abstraction
//! - `persistence`: High score storage
//! - `audio`: Fire-and-forget sound effects

pub mod assets;
pub mod audio;
pub mod entity;
pub mod font;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod sprite;

pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use crate::sprite::Color;

    /// Logical screen size in pixels
    pub const SCREEN_WIDTH: i32 = 1100;
    pub const SCREEN_HEIGHT: i32 = 400;
    pub const SCREEN_TITLE: &str = "Corona";

    /// Default frame rate cap (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Starting scroll speed (pixels per tick)
    pub const BASE_SPEED: i32 = 20;
    /// Speed goes up by one every time the score hits a multiple of this
    pub const SPEED_MILESTONE: u32 = 200;

    /// Character placement
    pub const CHARACTER_X: i32 = 80;
    pub const GROUND_Y: i32 = 240;
    pub const DUCK_Y: i32 = 268;

    /// Jump physics
    pub const JUMP_VELOCITY: f32 = 8.5;
    pub const GRAVITY: f32 = 0.8;
    /// Pixels moved per unit of velocity each tick
    pub const JUMP_SCALE: f32 = 4.0;

    /// Two-frame animations: 10-tick cycle, 5 ticks per frame
    pub const ANIMATION_CYCLE: u32 = 10;
    pub const FRAME_TICKS: u32 = 5;

    /// Obstacle spawn heights
    pub const SMALL_HUMAN_Y: i32 = 255;
    pub const BIG_HUMAN_Y: i32 = 227;
    pub const VACCINE_HEIGHTS: [i32; 3] = [120, 200, 263];

    /// Scenery
    pub const TRACK_Y: i32 = 300;
    pub const CLOUD_X_JITTER: i32 = 200;
    pub const CLOUD_Y_RANGE: (i32, i32) = (10, 200);

    /// HUD layout
    pub const SCORE_POS: (i32, i32) = (400, 10);
    pub const MAX_SCORE_POS: (i32, i32) = (10, 10);
    pub const SCORE_COLOR: Color = Color::rgb(71, 96, 50);
    pub const GAME_OVER_COLOR: Color = Color::rgb(104, 173, 62);
    pub const GAME_OVER_TEXT_Y: i32 = 100;

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
}
