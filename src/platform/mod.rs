//! Platform abstraction layer
//!
//! Handles the pieces that differ between frontends:
//! - Frame pacing
//! - Input events (edge-triggered) and held keys (level-triggered)
//! - The frame loop that drives a `FrameHandler`

pub mod terminal;

use std::collections::HashSet;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::renderer::RenderSurface;
use crate::sprite::Color;

pub use terminal::{TerminalGuard, TerminalInput};

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("terminal i/o: {0}")]
    Io(#[from] std::io::Error),
}

/// Logical keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Up,
    Down,
    Escape,
    Char(char),
}

/// A discrete input event, consumed once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    /// Window close or equivalent
    Quit,
}

/// Keys held down this frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

impl FromIterator<Key> for KeyState {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        Self {
            held: iter.into_iter().collect(),
        }
    }
}

/// Source of player input
pub trait InputSource {
    /// Drain everything that arrived since the last call, without blocking
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, PlatformError>;

    /// Keys considered held right now
    fn key_state(&self) -> KeyState;
}

/// Caps the frame rate
pub trait FrameClock {
    /// Block until the next frame is due at `fps`
    fn tick(&mut self, fps: u32);
}

/// Sleeps off whatever is left of each frame's time slice
#[derive(Debug, Default)]
pub struct SleepClock {
    last: Option<Instant>,
}

impl SleepClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameClock for SleepClock {
    fn tick(&mut self, fps: u32) {
        let frame = Duration::from_secs(1) / fps.max(1);
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < frame {
                thread::sleep(frame - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Never sleeps; counts ticks
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualClock {
    pub ticks: u64,
}

impl FrameClock for ManualClock {
    fn tick(&mut self, _fps: u32) {
        self.ticks += 1;
    }
}

/// Per-frame callbacks, called in this order: draw, update, event (once
/// per pending event), key_state
pub trait FrameHandler {
    fn draw<S: RenderSurface>(&mut self, surface: &mut S);
    fn update(&mut self);
    fn event(&mut self, event: InputEvent);
    fn key_state(&mut self, keys: &KeyState);
}

/// Drives a `FrameHandler` at a fixed rate until a quit event arrives
pub struct FrameLoop<S, I, C> {
    surface: S,
    input: I,
    clock: C,
    fps: u32,
    background: Color,
    running: bool,
    /// Cleared by `stop`; draw and input keep running regardless
    updating: bool,
}

impl<S: RenderSurface, I: InputSource, C: FrameClock> FrameLoop<S, I, C> {
    pub fn new(surface: S, input: I, clock: C, fps: u32, background: Color) -> Self {
        Self {
            surface,
            input,
            clock,
            fps: fps.max(1),
            background,
            running: true,
            updating: true,
        }
    }

    /// Pause the update step
    pub fn stop(&mut self) {
        self.updating = false;
    }

    /// Resume the update step
    pub fn resume(&mut self) {
        self.updating = true;
    }

    pub fn is_updating(&self) -> bool {
        self.updating
    }

    /// Ask the loop to exit after the current frame
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run one complete frame
    pub fn step<H: FrameHandler>(&mut self, handler: &mut H) -> Result<(), PlatformError> {
        self.surface.fill(self.background);
        handler.draw(&mut self.surface);

        if self.updating {
            handler.update();
        }

        for event in self.input.poll_events()? {
            if event == InputEvent::Quit {
                self.running = false;
            }
            handler.event(event);
        }

        let keys = self.input.key_state();
        handler.key_state(&keys);

        self.surface.present()?;
        self.clock.tick(self.fps);
        Ok(())
    }

    /// Run frames until quit
    pub fn run<H: FrameHandler>(&mut self, handler: &mut H) -> Result<(), PlatformError> {
        log::info!("Frame loop started at {} fps", self.fps);
        while self.running {
            self.step(handler)?;
        }
        log::info!("Frame loop stopped");
        Ok(())
    }
}

/// Replays prepared frames of input
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: std::collections::VecDeque<(Vec<InputEvent>, KeyState)>,
    current: KeyState,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one frame: its discrete events and the keys held during it
    pub fn push_frame(&mut self, events: Vec<InputEvent>, held: KeyState) {
        self.frames.push_back((events, held));
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, PlatformError> {
        let (events, held) = self.frames.pop_front().unwrap_or_default();
        self.current = held;
        Ok(events)
    }

    fn key_state(&self) -> KeyState {
        self.current.clone()
    }
}
