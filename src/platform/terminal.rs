//! Terminal frontend: raw-mode session and keyboard input via crossterm
//!
//! Most terminals only report key presses (OS key-repeat shows up as more
//! presses), so a key counts as held while its last press is at most
//! `HOLD_WINDOW` frames old. Terminals with the keyboard enhancement protocol
//! also report releases, which drop the key immediately.

use std::collections::HashMap;
use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
};

use super::{InputEvent, InputSource, Key, KeyState, PlatformError};

/// Frames a press keeps a key held without a repeat or release
pub const HOLD_WINDOW: u64 = 8;

/// Raw mode + alternate screen for as long as this value lives
pub struct TerminalGuard {
    out: Stdout,
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    pub fn enter(title: &str) -> Result<Self, PlatformError> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        out.execute(terminal::SetTitle(title))?;

        // Release events where the terminal supports them; others fall back
        // to the hold window
        let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
            && out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
                ))
                .is_ok();
        log::info!(
            "Terminal ready (key release events: {})",
            if keyboard_enhanced { "yes" } else { "no" }
        );

        Ok(Self {
            out,
            keyboard_enhanced,
        })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Always restore the terminal
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = self.out.flush();
    }
}

/// Map a crossterm key code onto a game key
fn key_from_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

fn is_quit(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc => true,
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Turns raw key events into discrete events and a held-key view
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Frame each held key was last pressed or repeated
    last_seen: HashMap<Key, u64>,
    frame: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame
    pub fn next_frame(&mut self) {
        self.frame += 1;
        let frame = self.frame;
        self.last_seen
            .retain(|_, seen| frame.saturating_sub(*seen) <= HOLD_WINDOW);
    }

    /// Feed one event; returns the discrete events it produces
    pub fn handle(&mut self, event: &Event) -> Vec<InputEvent> {
        let Event::Key(key_event) = event else {
            return Vec::new();
        };
        let Some(key) = key_from_code(key_event.code) else {
            return Vec::new();
        };

        match key_event.kind {
            KeyEventKind::Press => {
                self.last_seen.insert(key, self.frame);
                if is_quit(key_event) {
                    vec![InputEvent::Quit]
                } else {
                    vec![InputEvent::KeyDown(key)]
                }
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(key, self.frame);
                Vec::new()
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&key);
                Vec::new()
            }
        }
    }

    pub fn key_state(&self) -> KeyState {
        self.last_seen.keys().copied().collect()
    }
}

/// Non-blocking keyboard input from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalInput {
    tracker: KeyTracker,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, PlatformError> {
        self.tracker.next_frame();
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            let raw = event::read()?;
            events.extend(self.tracker.handle(&raw));
        }
        Ok(events)
    }

    fn key_state(&self) -> KeyState {
        self.tracker.key_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ))
    }

    #[test]
    fn test_press_is_discrete_and_held() {
        let mut tracker = KeyTracker::new();
        tracker.next_frame();
        assert_eq!(
            tracker.handle(&press(KeyCode::Char(' '))),
            vec![InputEvent::KeyDown(Key::Space)]
        );
        assert!(tracker.key_state().is_down(Key::Space));
    }

    #[test]
    fn test_hold_expires_without_repeats() {
        let mut tracker = KeyTracker::new();
        tracker.next_frame();
        tracker.handle(&press(KeyCode::Down));
        for _ in 0..HOLD_WINDOW {
            tracker.next_frame();
            assert!(tracker.key_state().is_down(Key::Down));
        }
        tracker.next_frame();
        assert!(!tracker.key_state().is_down(Key::Down));
    }

    #[test]
    fn test_release_drops_key_at_once() {
        let mut tracker = KeyTracker::new();
        tracker.next_frame();
        tracker.handle(&press(KeyCode::Up));
        assert!(tracker.handle(&release(KeyCode::Up)).is_empty());
        assert!(!tracker.key_state().is_down(Key::Up));
    }

    #[test]
    fn test_quit_keys() {
        let mut tracker = KeyTracker::new();
        assert_eq!(tracker.handle(&press(KeyCode::Esc)), vec![InputEvent::Quit]);
        assert_eq!(tracker.handle(&press(KeyCode::Char('q'))), vec![InputEvent::Quit]);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(tracker.handle(&ctrl_c), vec![InputEvent::Quit]);
        // Plain 'c' is just a key
        assert_eq!(
            tracker.handle(&press(KeyCode::Char('c'))),
            vec![InputEvent::KeyDown(Key::Char('c'))]
        );
    }

    #[test]
    fn test_non_key_events_ignored() {
        let mut tracker = KeyTracker::new();
        assert!(tracker.handle(&Event::Resize(80, 24)).is_empty());
        assert!(tracker.handle(&press(KeyCode::F(1))).is_empty());
    }
}
