//! Shared game speed
//!
//! The session owns the speed; obstacles and scenery hold read-only views
//! so a change is visible to all of them on their next tick.

use std::cell::Cell;
use std::rc::Rc;

/// Owner handle, the only way to change the speed
#[derive(Debug, Clone)]
pub struct GameSpeed {
    value: Rc<Cell<i32>>,
}

impl GameSpeed {
    pub fn new(initial: i32) -> Self {
        Self {
            value: Rc::new(Cell::new(initial)),
        }
    }

    pub fn get(&self) -> i32 {
        self.value.get()
    }

    pub fn set(&self, value: i32) {
        self.value.set(value);
    }

    pub fn increment(&self) -> i32 {
        let next = self.value.get() + 1;
        self.value.set(next);
        next
    }

    /// Live read-only view of the full speed
    pub fn view(&self) -> SpeedView {
        SpeedView {
            value: Rc::clone(&self.value),
            divisor: 1,
        }
    }
}

/// Read-only view of the current speed, optionally scaled down (parallax)
#[derive(Debug, Clone)]
pub struct SpeedView {
    value: Rc<Cell<i32>>,
    divisor: i32,
}

impl SpeedView {
    pub fn get(&self) -> i32 {
        self.value.get() / self.divisor
    }

    /// View running at half the rate of this one
    pub fn halved(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            divisor: self.divisor * 2,
        }
    }
}
