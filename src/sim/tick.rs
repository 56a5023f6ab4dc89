//! Fixed timestep simulation tick
//!
//! One frame is: draw, `update`, `handle_input` for each discrete command,
//! then `handle_keys` with the held-key snapshot. `tick` runs the last three
//! in that order for callers that do not need to interleave drawing.

use super::collision::first_collision;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::entity::{Drawable, Entity};

/// Discrete (edge-triggered) commands, consumed once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Space or up: start, jump, or restart depending on phase
    Confirm,
    /// Down
    Duck,
}

/// Level-triggered key state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Space or up is held
    pub confirm: bool,
    /// Down is held (wins over confirm)
    pub duck: bool,
}

/// Advance the game state by one tick
pub fn update(state: &mut GameState) {
    state.time_ticks += 1;

    // Always runs, so the dead pose keeps rendering after a crash
    state.character.update();

    if state.phase != GamePhase::Running {
        return;
    }

    state.cloud.update(&mut state.rng);
    state.track.update();
    state.obstacles.update(&mut state.rng);

    let crashed = first_collision(state.character.entity(), state.obstacles.active()).is_some();
    if crashed {
        state.character.die(&mut state.events);
        // Extra update so the dead pose is what this frame shows
        state.character.update();
        state.phase = GamePhase::GameOver;
    }

    state.scores.tick(&state.speed, &mut state.events);

    if crashed {
        let score = state.score();
        log::info!("Game over at {} points", score);
        state.events.push(GameEvent::GameOver { score });
    }
}

/// Apply one discrete command
pub fn handle_input(state: &mut GameState, command: Command) {
    match command {
        Command::Confirm => match state.phase {
            GamePhase::Beginning => {
                state.phase = GamePhase::Running;
                state.character.run();
                state.events.push(GameEvent::Started);
                log::info!("Run started (seed {})", state.seed);
            }
            GamePhase::Running => state.character.jump(&mut state.events),
            GamePhase::GameOver => {
                state.phase = GamePhase::Beginning;
                reset(state);
                state.events.push(GameEvent::Restarted);
                log::info!("Restarted");
            }
            GamePhase::Paused => {}
        },
        Command::Duck => state.character.duck(),
    }
}

/// Apply held keys; duck takes priority over jump
pub fn handle_keys(state: &mut GameState, input: &TickInput) {
    if input.duck {
        state.character.duck();
    } else if input.confirm {
        state.character.jump(&mut state.events);
    }
}

/// Update, then discrete commands, then held keys
pub fn tick(state: &mut GameState, commands: &[Command], input: &TickInput) {
    update(state);
    for command in commands {
        handle_input(state, *command);
    }
    handle_keys(state, input);
}

/// Full restart: base speed, zero score, idle character, no obstacles,
/// scenery back to its starting layout. The best score is kept.
pub fn reset(state: &mut GameState) {
    state.speed.set(BASE_SPEED);
    state.scores.reset();
    state.character.reset();
    state.obstacles.clear();
    state.cloud.reset(&mut state.rng);
    state.track.reset();
}

/// Everything to draw this frame, back to front
pub fn draw(state: &GameState) -> Vec<&Entity> {
    let mut list = vec![state.cloud.entity()];
    list.extend(state.track.tiles().iter());
    list.push(state.character.entity());
    list.push(state.scores.current.entity());
    list.push(state.scores.best.entity());
    list.extend(state.obstacles.active().iter().map(Drawable::entity));
    if state.phase == GamePhase::GameOver {
        list.extend(state.banner.items().iter());
    }
    list
}
