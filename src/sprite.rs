//! Bitmaps and opaque-pixel masks
//!
//! Every image in the game is a `Sprite`: an RGBA bitmap plus a precomputed
//! `Mask` of its opaque pixels, used for pixel-accurate collisions.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Alpha at or above this value counts as opaque for collisions
pub const MASK_THRESHOLD: u8 = 128;

/// Transparent cell in ASCII-art patterns
pub const PATTERN_EMPTY: char = '.';

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a >= MASK_THRESHOLD
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Sprite construction failures (fatal at startup)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpriteError {
    #[error("sprite `{name}` has no pixels")]
    Empty { name: String },
    #[error("sprite `{name}` row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        name: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("sprite `{name}` uses `{glyph}` on row {row}, which is not in its palette")]
    UnknownGlyph { name: String, glyph: char, row: usize },
}

/// Opaque-pixel mask, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: i32,
    height: i32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn from_fn(width: i32, height: i32, f: impl Fn(i32, i32) -> bool) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let mut bits = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the pixel is opaque (out of bounds is never opaque)
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y * self.width + x) as usize]
    }

    /// Number of opaque pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// First coincident opaque pixel when `other` is placed at `offset`
    /// relative to this mask's origin.
    ///
    /// The returned point is in this mask's coordinates. Only the
    /// intersection of the two bounding boxes is scanned.
    pub fn overlap(&self, other: &Mask, offset: IVec2) -> Option<IVec2> {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width).min(self.width);
        let y1 = (offset.y + other.height).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return Some(IVec2::new(x, y));
                }
            }
        }
        None
    }
}

/// An RGBA bitmap with its collision mask
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    name: String,
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    mask: Mask,
}

impl Sprite {
    /// Build a sprite by evaluating `f` for every pixel.
    ///
    /// Sprites are never smaller than 1x1.
    pub fn from_fn(name: &str, width: i32, height: i32, f: impl Fn(i32, i32) -> Color) -> Self {
        let width = width.max(1);
        let height = height.max(1);

        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        let mask = Mask::from_fn(width, height, |x, y| {
            pixels[(y * width + x) as usize].is_opaque()
        });

        Self {
            name: name.into(),
            width,
            height,
            pixels,
            mask,
        }
    }

    /// Solid rectangle
    pub fn solid(name: &str, width: i32, height: i32, color: Color) -> Self {
        Self::from_fn(name, width, height, |_, _| color)
    }

    /// Build a sprite from ASCII art.
    ///
    /// Blank lines and surrounding whitespace are ignored, `.` is transparent,
    /// every other char must appear in `palette`. Each cell becomes a
    /// `scale` x `scale` block of pixels.
    pub fn from_pattern(
        name: &str,
        pattern: &str,
        palette: &[(char, Color)],
        scale: i32,
    ) -> Result<Self, SpriteError> {
        let rows: Vec<Vec<char>> = pattern
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();

        let Some(first) = rows.first() else {
            return Err(SpriteError::Empty { name: name.into() });
        };
        let cols = first.len();

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, line) in rows.iter().enumerate() {
            if line.len() != cols {
                return Err(SpriteError::Ragged {
                    name: name.into(),
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            for &glyph in line {
                if glyph == PATTERN_EMPTY {
                    cells.push(Color::TRANSPARENT);
                    continue;
                }
                let color = palette
                    .iter()
                    .find(|(c, _)| *c == glyph)
                    .map(|(_, color)| *color)
                    .ok_or_else(|| SpriteError::UnknownGlyph {
                        name: name.into(),
                        glyph,
                        row,
                    })?;
                cells.push(color);
            }
        }

        let scale = scale.max(1);
        let cols = cols as i32;
        Ok(Self::from_fn(name, cols * scale, rows.len() as i32 * scale, |x, y| {
            cells[((y / scale) * cols + x / scale) as usize]
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width, self.height)
    }

    /// Pixel color (transparent out of bounds)
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Color::TRANSPARENT;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }
}
