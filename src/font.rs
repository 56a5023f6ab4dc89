//! Text rasterization
//!
//! Score and banner text are rendered to sprites through the `Font` trait,
//! so the rest of the game treats text like any other image.

use crate::sprite::{Color, Sprite};

/// Renders a string into a sprite
pub trait Font {
    fn render(&self, text: &str, color: Color) -> Sprite;
}

/// Glyph cell size in font units
const GLYPH_W: i32 = 3;
const GLYPH_H: i32 = 5;

/// Chunky 3x5 block font covering digits, A-Z and a few symbols.
///
/// Lowercase letters render as uppercase; anything else renders blank.
#[derive(Debug, Clone, Copy)]
pub struct BlockFont {
    /// Pixels per font unit
    pub scale: i32,
}

impl BlockFont {
    pub fn new(scale: i32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    /// Horizontal advance per character, in pixels
    pub fn advance(&self) -> i32 {
        (GLYPH_W + 1) * self.scale
    }

    /// Rendered size of `text` in pixels
    pub fn measure(&self, text: &str) -> (i32, i32) {
        let chars = text.chars().count() as i32;
        let width = (chars * self.advance() - self.scale).max(1);
        (width, GLYPH_H * self.scale)
    }
}

impl Default for BlockFont {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Font for BlockFont {
    fn render(&self, text: &str, color: Color) -> Sprite {
        let glyphs: Vec<Option<[&str; 5]>> = text.chars().map(glyph).collect();
        let (width, height) = self.measure(text);
        let advance = self.advance();
        let scale = self.scale;

        Sprite::from_fn(text, width, height, |x, y| {
            let index = (x / advance) as usize;
            let gx = (x % advance) / scale;
            let gy = y / scale;
            let lit = gx < GLYPH_W
                && glyphs
                    .get(index)
                    .copied()
                    .flatten()
                    .is_some_and(|rows| rows[gy as usize].as_bytes()[gx as usize] == b'#');
            if lit { color } else { Color::TRANSPARENT }
        })
    }
}

fn glyph(c: char) -> Option<[&'static str; 5]> {
    let rows = match c.to_ascii_uppercase() {
        '0' => ["###", "#.#", "#.#", "#.#", "###"],
        '1' => [".#.", "##.", ".#.", ".#.", "###"],
        '2' => ["###", "..#", "###", "#..", "###"],
        '3' => ["###", "..#", ".##", "..#", "###"],
        '4' => ["#.#", "#.#", "###", "..#", "..#"],
        '5' => ["###", "#..", "###", "..#", "###"],
        '6' => ["###", "#..", "###", "#.#", "###"],
        '7' => ["###", "..#", ".#.", ".#.", ".#."],
        '8' => ["###", "#.#", "###", "#.#", "###"],
        '9' => ["###", "#.#", "###", "..#", "###"],
        'A' => [".#.", "#.#", "###", "#.#", "#.#"],
        'B' => ["##.", "#.#", "##.", "#.#", "##."],
        'C' => [".##", "#..", "#..", "#..", ".##"],
        'D' => ["##.", "#.#", "#.#", "#.#", "##."],
        'E' => ["###", "#..", "##.", "#..", "###"],
        'F' => ["###", "#..", "##.", "#..", "#.."],
        'G' => [".##", "#..", "#.#", "#.#", ".##"],
        'H' => ["#.#", "#.#", "###", "#.#", "#.#"],
        'I' => ["###", ".#.", ".#.", ".#.", "###"],
        'J' => ["..#", "..#", "..#", "#.#", ".#."],
        'K' => ["#.#", "#.#", "##.", "#.#", "#.#"],
        'L' => ["#..", "#..", "#..", "#..", "###"],
        'M' => ["#.#", "###", "###", "#.#", "#.#"],
        'N' => ["##.", "#.#", "#.#", "#.#", "#.#"],
        'O' => [".#.", "#.#", "#.#", "#.#", ".#."],
        'P' => ["##.", "#.#", "##.", "#..", "#.."],
        'Q' => [".#.", "#.#", "#.#", "##.", ".##"],
        'R' => ["##.", "#.#", "##.", "#.#", "#.#"],
        'S' => [".##", "#..", ".#.", "..#", "##."],
        'T' => ["###", ".#.", ".#.", ".#.", ".#."],
        'U' => ["#.#", "#.#", "#.#", "#.#", "###"],
        'V' => ["#.#", "#.#", "#.#", "#.#", ".#."],
        'W' => ["#.#", "#.#", "###", "###", "#.#"],
        'X' => ["#.#", "#.#", ".#.", "#.#", "#.#"],
        'Y' => ["#.#", "#.#", ".#.", ".#.", ".#."],
        'Z' => ["###", "..#", ".#.", "#..", "###"],
        ':' => ["...", ".#.", "...", ".#.", "..."],
        '-' => ["...", "...", "###", "...", "..."],
        '!' => [".#.", ".#.", ".#.", "...", ".#."],
        _ => return None,
    };
    Some(rows)
}
