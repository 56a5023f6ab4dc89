//! Corona Dash entry point
//!
//! Sets up logging, settings, assets and the terminal, then runs the frame
//! loop until the player quits.

use std::io::{self, BufWriter};
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;

use corona_dash::assets::SpriteSheet;
use corona_dash::audio::AudioManager;
use corona_dash::consts::*;
use corona_dash::font::BlockFont;
use corona_dash::persistence::FileHighScoreStore;
use corona_dash::platform::{FrameLoop, SleepClock, TerminalGuard, TerminalInput};
use corona_dash::renderer::TerminalSurface;
use corona_dash::{Game, Settings};

fn main() -> anyhow::Result<()> {
    // The game owns the screen; logs go to stderr (redirect with 2> corona.log)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Corona Dash starting...");
    if let Err(e) = run() {
        log::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let settings = Settings::load();
    let sheet = SpriteSheet::load().context("loading sprites")?;

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });
    log::info!("Game initialized with seed: {}", seed);

    let store = FileHighScoreStore::new(settings.high_score_path.clone());
    let mut game = Game::new(
        &sheet,
        Rc::new(BlockFont::default()),
        AudioManager::stdout(&settings),
        store,
        seed,
    );

    // Restores the terminal on every exit path, errors included
    let _terminal = TerminalGuard::enter(SCREEN_TITLE).context("setting up terminal")?;

    let surface = TerminalSurface::new(BufWriter::new(io::stdout()), SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut frames = FrameLoop::new(
        surface,
        TerminalInput::new(),
        SleepClock::new(),
        settings.fps,
        settings.background,
    );
    frames.run(&mut game).context("running frame loop")?;

    log::info!("Bye! Best score: {}", game.state().high_score());
    Ok(())
}
