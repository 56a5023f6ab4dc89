//! Score counters and difficulty scaling

use std::rc::Rc;

use crate::consts::*;
use crate::entity::{Anchor, Drawable, Entity, Text};
use crate::font::Font;

use super::speed::GameSpeed;
use super::state::GameEvent;

/// A labelled counter with a text display that is re-rendered on every change
#[derive(Debug)]
pub struct Score {
    label: String,
    value: u32,
    text: Text,
}

impl Score {
    pub fn new(x: i32, y: i32, value: u32, label: &str, font: Rc<dyn Font>) -> Self {
        let text = Text::new(
            x,
            y,
            &display(label, value),
            SCORE_COLOR,
            font,
            Anchor::TopLeft,
        );
        Self {
            label: label.into(),
            value,
            text,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current display string
    pub fn text(&self) -> &str {
        self.text.text()
    }

    pub fn increase(&mut self, by: u32) {
        self.value = self.value.saturating_add(by);
        self.refresh();
    }

    pub fn set_value(&mut self, value: u32) {
        self.value = value;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.text.set_text(&display(&self.label, self.value));
    }
}

impl Drawable for Score {
    fn entity(&self) -> &Entity {
        self.text.entity()
    }
}

fn display(label: &str, value: u32) -> String {
    format!("{label}: {value}")
}

/// Whether reaching `value` bumps the game speed
pub fn is_milestone(value: u32) -> bool {
    value != 0 && value % SPEED_MILESTONE == 0
}

/// Current and best score, plus the speed-up rule tied to them
#[derive(Debug)]
pub struct ScoreBoard {
    pub current: Score,
    pub best: Score,
}

impl ScoreBoard {
    pub fn new(high_score: u32, font: Rc<dyn Font>) -> Self {
        let (sx, sy) = SCORE_POS;
        let (mx, my) = MAX_SCORE_POS;
        Self {
            current: Score::new(sx, sy, 0, "Score", Rc::clone(&font)),
            best: Score::new(mx, my, high_score, "Highest Scores", font),
        }
    }

    /// One running tick: count up, track the best, speed up on milestones
    pub fn tick(&mut self, speed: &GameSpeed, events: &mut Vec<GameEvent>) {
        self.current.increase(1);
        let value = self.current.value();

        if value > self.best.value() {
            self.best.set_value(value);
            events.push(GameEvent::HighScore(value));
        }

        if is_milestone(value) {
            let speed = speed.increment();
            log::info!("Reached {} points, speed now {}", value, speed);
            events.push(GameEvent::Milestone { score: value, speed });
        }
    }

    pub fn reset(&mut self) {
        self.current.set_value(0);
    }
}
