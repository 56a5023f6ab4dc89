//! Game session: the simulation wired to its collaborators
//!
//! `Game` is the `FrameHandler` the frame loop drives. It translates keys
//! into simulation commands and routes the resulting `GameEvent`s to audio
//! and high score persistence.

use std::rc::Rc;

use crate::assets::SpriteSheet;
use crate::audio::{AudioSink, SoundEffect};
use crate::font::Font;
use crate::persistence::HighScoreStore;
use crate::platform::{FrameHandler, InputEvent, Key, KeyState};
use crate::renderer::RenderSurface;
use crate::sim::{self, Command, GameEvent, GameState, TickInput};

pub struct Game<A: AudioSink, P: HighScoreStore> {
    state: GameState,
    audio: A,
    store: P,
}

impl<A: AudioSink, P: HighScoreStore> Game<A, P> {
    pub fn new(sheet: &SpriteSheet, font: Rc<dyn Font>, audio: A, store: P, seed: u64) -> Self {
        let high_score = store.load_or_default();
        Self {
            state: GameState::new(sheet, font, high_score, seed),
            audio,
            store,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Hand pending simulation events to the collaborators
    fn dispatch(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::JumpAttempted => self.audio.play(SoundEffect::Jump),
                GameEvent::Hit => self.audio.play(SoundEffect::Hit),
                GameEvent::Milestone { .. } => self.audio.play(SoundEffect::Reach),
                GameEvent::HighScore(value) => {
                    if let Err(e) = self.store.save_high_score(value) {
                        log::warn!("Failed to save high score {}: {}", value, e);
                    }
                }
                GameEvent::Started | GameEvent::GameOver { .. } | GameEvent::Restarted => {}
            }
        }
    }
}

fn command_for(key: Key) -> Option<Command> {
    match key {
        Key::Space | Key::Up => Some(Command::Confirm),
        Key::Down => Some(Command::Duck),
        _ => None,
    }
}

fn tick_input(keys: &KeyState) -> TickInput {
    TickInput {
        confirm: keys.is_down(Key::Space) || keys.is_down(Key::Up),
        duck: keys.is_down(Key::Down),
    }
}

impl<A: AudioSink, P: HighScoreStore> FrameHandler for Game<A, P> {
    fn draw<S: RenderSurface>(&mut self, surface: &mut S) {
        surface.blit_group(sim::draw(&self.state));
    }

    fn update(&mut self) {
        sim::update(&mut self.state);
        self.dispatch();
    }

    fn event(&mut self, event: InputEvent) {
        let InputEvent::KeyDown(key) = event else {
            return;
        };
        if let Some(command) = command_for(key) {
            sim::handle_input(&mut self.state, command);
            self.dispatch();
        }
    }

    fn key_state(&mut self, keys: &KeyState) {
        sim::handle_keys(&mut self.state, &tick_input(keys));
        self.dispatch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::consts::*;
    use crate::entity::Drawable;
    use crate::font::BlockFont;
    use crate::persistence::{MemoryHighScoreStore, PersistenceError};
    use crate::platform::{FrameLoop, ManualClock, ScriptedInput};
    use crate::renderer::Canvas;
    use crate::sim::{CharacterState, GamePhase, Obstacle, ObstacleKind};
    use crate::sprite::{Color, Sprite};

    #[derive(Debug, Default)]
    struct RecordingAudio {
        played: Vec<SoundEffect>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }
    }

    /// Store whose writes always fail
    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load_high_score(&self) -> Result<u32, PersistenceError> {
            Ok(0)
        }

        fn save_high_score(&mut self, _value: u32) -> Result<(), PersistenceError> {
            Err(std::io::Error::other("disk full").into())
        }
    }

    fn game(store: MemoryHighScoreStore) -> Game<RecordingAudio, MemoryHighScoreStore> {
        let sheet = SpriteSheet::load().unwrap();
        Game::new(
            &sheet,
            Rc::new(BlockFont::default()),
            RecordingAudio::default(),
            store,
            7,
        )
    }

    fn frames(input: ScriptedInput) -> FrameLoop<Canvas, ScriptedInput, ManualClock> {
        FrameLoop::new(
            Canvas::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            input,
            ManualClock::default(),
            TICK_RATE,
            WHITE,
        )
    }

    fn crash(game: &mut Game<RecordingAudio, MemoryHighScoreStore>) {
        let state = game.state_mut();
        let c = state.character.entity();
        let image = Rc::new(Sprite::solid("wall", c.width(), c.height(), BLACK));
        let (x, y) = (c.x() + state.speed.get(), c.y());
        let speed = state.speed.view();
        state
            .obstacles
            .insert(Obstacle::new(ObstacleKind::SmallHuman, x, y, vec![image], speed));
    }

    #[test]
    fn test_loads_stored_best() {
        let game = game(MemoryHighScoreStore::with_value(500));
        assert_eq!(game.state().high_score(), 500);
    }

    #[test]
    fn test_space_starts_and_high_score_is_saved() {
        let store = MemoryHighScoreStore::new();
        let mut game = game(store.clone());
        let mut input = ScriptedInput::new();
        input.push_frame(vec![InputEvent::KeyDown(Key::Space)], KeyState::new());
        for _ in 0..5 {
            input.push_frame(Vec::new(), KeyState::new());
        }
        let mut frames = frames(input);

        for _ in 0..6 {
            frames.step(&mut game).unwrap();
        }
        assert_eq!(game.state().phase, GamePhase::Running);
        // Started in frame 1's event step, so five running updates
        assert_eq!(game.state().score(), 5);
        assert_eq!(store.value(), Some(5));
        assert_eq!(store.saves(), 5);
        // Space was pressed in Beginning: no jump sound for the start itself
        assert!(game.audio().played.is_empty());
    }

    #[test]
    fn test_held_keys_drive_character() {
        let mut game = game(MemoryHighScoreStore::new());
        game.event(InputEvent::KeyDown(Key::Up));
        game.key_state(&[Key::Down].into_iter().collect());
        assert_eq!(game.state().character.state(), CharacterState::Duck);

        game.update();
        game.key_state(&[Key::Space].into_iter().collect());
        assert_eq!(game.state().character.state(), CharacterState::Jump);
        assert_eq!(game.audio().played, vec![SoundEffect::Jump]);
    }

    #[test]
    fn test_crash_plays_hit_and_restart_keeps_best() {
        let store = MemoryHighScoreStore::new();
        let mut game = game(store.clone());
        game.event(InputEvent::KeyDown(Key::Space));
        for _ in 0..10 {
            game.update();
            game.state_mut().obstacles.clear();
        }
        crash(&mut game);
        game.update();

        assert_eq!(game.state().phase, GamePhase::GameOver);
        assert_eq!(game.audio().played, vec![SoundEffect::Hit]);
        assert_eq!(store.value(), Some(11));

        game.event(InputEvent::KeyDown(Key::Space));
        assert_eq!(game.state().phase, GamePhase::Beginning);
        assert_eq!(game.state().score(), 0);
        assert_eq!(game.state().high_score(), 11);
    }

    #[test]
    fn test_milestone_plays_reach() {
        let mut game = game(MemoryHighScoreStore::new());
        game.event(InputEvent::KeyDown(Key::Space));
        for _ in 0..SPEED_MILESTONE {
            game.update();
            game.state_mut().obstacles.clear();
        }
        assert_eq!(game.audio().played, vec![SoundEffect::Reach]);
        assert_eq!(game.state().speed.get(), BASE_SPEED + 1);
    }

    #[test]
    fn test_failed_save_does_not_stop_the_run() {
        let sheet = SpriteSheet::load().unwrap();
        let mut game = Game::new(
            &sheet,
            Rc::new(BlockFont::default()),
            SilentAudio,
            BrokenStore,
            1,
        );
        game.event(InputEvent::KeyDown(Key::Space));
        game.update();
        game.update();
        assert_eq!(game.state().score(), 2);
        assert_eq!(game.state().high_score(), 2);
    }

    #[test]
    fn test_draws_scene_onto_canvas() {
        let mut game = game(MemoryHighScoreStore::new());
        let mut frames = frames(ScriptedInput::new());
        frames.step(&mut game).unwrap();

        // Something dark landed on the white background around the character
        let canvas = frames.surface();
        let dark = (CHARACTER_X..CHARACTER_X + 48)
            .flat_map(|x| (GROUND_Y..GROUND_Y + 60).map(move |y| (x, y)))
            .any(|(x, y)| canvas.pixel(x, y) != WHITE);
        assert!(dark);
        assert_ne!(canvas.pixel(0, 0), Color::TRANSPARENT);
    }
}
