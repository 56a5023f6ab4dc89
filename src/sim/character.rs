//! Player character state machine
//!
//! Idle -> Run when the session starts; Run -> Jump / Duck on input;
//! any state -> Dead on collision; `reset` returns to Idle.

use crate::assets::CharacterSprites;
use crate::consts::*;
use crate::entity::{Drawable, Entity};

use super::state::GameEvent;

/// Character pose/behavior state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterState {
    Idle,
    Run,
    Jump,
    /// Lasts a single tick; continuous input re-enters it
    Duck,
    Dead,
}

/// The player-controlled runner
#[derive(Debug, Clone)]
pub struct Character {
    entity: Entity,
    state: CharacterState,
    /// Animation counter, always in `0..ANIMATION_CYCLE`
    step: u32,
    /// Vertical velocity, only meaningful while jumping
    velocity: f32,
    sprites: CharacterSprites,
}

impl Character {
    pub fn new(sprites: CharacterSprites) -> Self {
        Self {
            entity: Entity::top_left(CHARACTER_X, GROUND_Y, sprites.idle.clone()),
            state: CharacterState::Idle,
            step: 0,
            velocity: JUMP_VELOCITY,
            sprites,
        }
    }

    pub fn state(&self) -> CharacterState {
        self.state
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Advance one tick in the current state
    pub fn update(&mut self) {
        match self.state {
            CharacterState::Run => self.running(),
            CharacterState::Jump => self.jumping(),
            CharacterState::Duck => self.ducking(),
            CharacterState::Idle => self.idling(),
            CharacterState::Dead => self.entity.set_image(self.sprites.dead.clone()),
        }
    }

    /// Start running (session start)
    pub fn run(&mut self) {
        self.state = CharacterState::Run;
    }

    /// Jump if running. The jump sound fires on every attempt.
    pub fn jump(&mut self, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::JumpAttempted);
        if self.state == CharacterState::Run {
            self.state = CharacterState::Jump;
        }
    }

    /// Duck if running; no-op otherwise
    pub fn duck(&mut self) {
        if self.state == CharacterState::Run {
            self.state = CharacterState::Duck;
        }
    }

    /// Enter the terminal Dead state
    pub fn die(&mut self, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::Hit);
        self.state = CharacterState::Dead;
    }

    /// Back to Idle on the ground with a fresh animation cycle
    pub fn reset(&mut self) {
        self.state = CharacterState::Idle;
        self.step = 0;
        self.velocity = JUMP_VELOCITY;
        self.entity.set_image(self.sprites.idle.clone());
        self.entity.set_y(GROUND_Y);
    }

    /// Current two-frame animation index, then advance the counter
    fn next_frame(&mut self) -> usize {
        let frame = (self.step / FRAME_TICKS) as usize % 2;
        self.step = (self.step + 1) % ANIMATION_CYCLE;
        frame
    }

    fn running(&mut self) {
        let frame = self.next_frame();
        self.entity.set_image(self.sprites.run[frame].clone());
        self.entity.set_y(GROUND_Y);
    }

    fn jumping(&mut self) {
        self.entity.set_image(self.sprites.jump.clone());
        let y = (self.entity.y() as f32 - self.velocity * JUMP_SCALE) as i32;
        self.entity.set_y(y);
        self.velocity -= GRAVITY;
        if y >= GROUND_Y {
            self.state = CharacterState::Run;
            self.velocity = JUMP_VELOCITY;
        }
    }

    fn ducking(&mut self) {
        // Revert first: the crouch only holds while input keeps re-entering it
        self.state = CharacterState::Run;
        let frame = self.next_frame();
        self.entity.set_image(self.sprites.duck[frame].clone());
        self.entity.set_y(DUCK_Y);
    }

    fn idling(&mut self) {
        self.entity.set_image(self.sprites.idle.clone());
        self.entity.set_y(GROUND_Y);
    }
}

impl Drawable for Character {
    fn entity(&self) -> &Entity {
        &self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteSheet;
    use crate::entity::Image;
    use proptest::prelude::*;
    use std::rc::Rc;

    fn character() -> Character {
        Character::new(SpriteSheet::load().unwrap().character)
    }

    fn showing(c: &Character, image: &Image) -> bool {
        Rc::ptr_eq(c.entity().image(), image)
    }

    #[test]
    fn test_starts_idle_on_ground() {
        let c = character();
        assert_eq!(c.state(), CharacterState::Idle);
        assert_eq!(c.entity().pos().to_array(), [CHARACTER_X, GROUND_Y]);
    }

    #[test]
    fn test_run_alternates_every_five_ticks() {
        let mut c = character();
        let sprites = c.sprites.clone();
        c.run();
        for tick in 0..30 {
            c.update();
            let expected = &sprites.run[(tick / 5) % 2];
            assert!(showing(&c, expected), "tick {tick}");
            assert_eq!(c.entity().y(), GROUND_Y);
        }
    }

    #[test]
    fn test_jump_only_from_run_but_always_signals() {
        let mut c = character();
        let mut events = Vec::new();

        c.jump(&mut events);
        assert_eq!(c.state(), CharacterState::Idle);
        assert_eq!(events, vec![GameEvent::JumpAttempted]);

        c.run();
        c.jump(&mut events);
        assert_eq!(c.state(), CharacterState::Jump);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_jump_arc_lands_back_on_run() {
        let mut c = character();
        let mut events = Vec::new();
        c.run();
        c.jump(&mut events);

        c.update();
        // First tick: up by 8.5 * 4
        assert_eq!(c.entity().y(), GROUND_Y - 34);
        assert!((c.velocity() - (JUMP_VELOCITY - GRAVITY)).abs() < 1e-4);

        let mut peak = c.entity().y();
        let mut ticks = 1;
        while c.state() == CharacterState::Jump {
            c.update();
            peak = peak.min(c.entity().y());
            ticks += 1;
            assert!(ticks < 40, "never landed");
        }
        assert!(peak < GROUND_Y - 150);
        assert!(c.entity().y() >= GROUND_Y);
        assert_eq!(c.velocity(), JUMP_VELOCITY);

        // Next run tick pins back to the ground
        c.update();
        assert_eq!(c.entity().y(), GROUND_Y);
    }

    #[test]
    fn test_jump_ignored_mid_air() {
        let mut c = character();
        let mut events = Vec::new();
        c.run();
        c.jump(&mut events);
        c.update();
        let y = c.entity().y();
        c.jump(&mut events);
        assert_eq!(c.state(), CharacterState::Jump);
        assert_eq!(c.entity().y(), y);
    }

    #[test]
    fn test_duck_is_a_single_tick_pose() {
        let mut c = character();
        let sprites = c.sprites.clone();
        c.run();
        c.duck();
        assert_eq!(c.state(), CharacterState::Duck);

        c.update();
        assert_eq!(c.state(), CharacterState::Run);
        assert!(showing(&c, &sprites.duck[0]));
        assert_eq!(c.entity().y(), DUCK_Y);

        // No input: back to running pose on the ground
        c.update();
        assert!(showing(&c, &sprites.run[0]));
        assert_eq!(c.entity().y(), GROUND_Y);
    }

    #[test]
    fn test_duck_ignored_unless_running() {
        let mut c = character();
        c.duck();
        assert_eq!(c.state(), CharacterState::Idle);

        let mut events = Vec::new();
        c.die(&mut events);
        c.duck();
        assert_eq!(c.state(), CharacterState::Dead);
    }

    #[test]
    fn test_dead_holds_pose() {
        let mut c = character();
        let sprites = c.sprites.clone();
        let mut events = Vec::new();
        c.run();
        c.die(&mut events);
        assert_eq!(events, vec![GameEvent::Hit]);
        for _ in 0..5 {
            c.update();
            assert_eq!(c.state(), CharacterState::Dead);
            assert!(showing(&c, &sprites.dead));
        }
        c.run();
        assert_eq!(c.state(), CharacterState::Run);
    }

    #[test]
    fn test_reset_restores_idle() {
        let mut c = character();
        let sprites = c.sprites.clone();
        let mut events = Vec::new();
        c.run();
        for _ in 0..3 {
            c.update();
        }
        c.jump(&mut events);
        c.update();
        c.die(&mut events);

        c.reset();
        assert_eq!(c.state(), CharacterState::Idle);
        assert_eq!(c.step(), 0);
        assert_eq!(c.entity().y(), GROUND_Y);
        assert!(showing(&c, &sprites.idle));
    }

    proptest! {
        #[test]
        fn prop_counter_wraps_at_cycle(ticks in 0usize..200, ducks in proptest::collection::vec(any::<bool>(), 200)) {
            let mut c = character();
            c.run();
            for duck in ducks.iter().take(ticks) {
                if *duck {
                    c.duck();
                }
                let before = c.step();
                c.update();
                prop_assert!(c.step() < ANIMATION_CYCLE);
                prop_assert_eq!(c.step(), (before + 1) % ANIMATION_CYCLE);
            }
        }
    }
}
