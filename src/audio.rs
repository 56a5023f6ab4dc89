//! Audio system using the terminal bell
//!
//! Fire-and-forget sound effects. The terminal frontend has one voice, the
//! bell, so only the rare effects use it; everything is still routed through
//! `AudioSink` so another backend can voice all of them.

use std::io::{self, Stdout, Write};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Jump key pressed (plays even when no jump happens)
    Jump,
    /// Character hit an obstacle
    Hit,
    /// Score milestone reached
    Reach,
}

/// Anything that can play a sound effect
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

const BELL: &[u8] = b"\x07";

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager<W: Write = Stdout> {
    out: W,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager<Stdout> {
    pub fn stdout(settings: &Settings) -> Self {
        Self::with_writer(io::stdout(), settings)
    }
}

impl<W: Write> AudioManager<W> {
    pub fn with_writer(out: W, settings: &Settings) -> Self {
        let mut manager = Self {
            out,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        };
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager.set_muted(settings.muted);
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn ring(&mut self) {
        // A lost bell is not worth failing a frame over
        if let Err(e) = self.out.write_all(BELL).and_then(|_| self.out.flush()) {
            log::debug!("Bell failed: {}", e);
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for AudioManager<W> {
    fn play(&mut self, effect: SoundEffect) {
        if self.effective_volume() <= 0.0 {
            return;
        }
        log::debug!("Playing {:?}", effect);
        match effect {
            // Held keys retrigger it every tick; too chatty for the bell
            SoundEffect::Jump => {}
            SoundEffect::Hit | SoundEffect::Reach => self.ring(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_for_hit_and_reach_only() {
        let mut audio = AudioManager::with_writer(Vec::new(), &Settings::default());
        audio.play(SoundEffect::Jump);
        audio.play(SoundEffect::Hit);
        audio.play(SoundEffect::Reach);
        assert_eq!(audio.into_inner(), b"\x07\x07".to_vec());
    }

    #[test]
    fn test_muted_is_silent() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut audio = AudioManager::with_writer(Vec::new(), &settings);
        audio.play(SoundEffect::Hit);
        assert!(audio.into_inner().is_empty());

        let settings = Settings {
            master_volume: 0.0,
            ..Default::default()
        };
        let mut audio = AudioManager::with_writer(Vec::new(), &settings);
        audio.play(SoundEffect::Reach);
        assert!(audio.into_inner().is_empty());
    }
}
