//! Software framebuffer

use crate::entity::Entity;
use crate::platform::PlatformError;
use crate::sprite::{Color, Sprite};

use super::RenderSurface;

/// Opaque RGB framebuffer with alpha-blended, clipped blits
#[derive(Debug, Clone)]
pub struct Canvas {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    /// Frames presented so far
    frames: u64,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![Color::rgb(0, 0, 0); (width * height) as usize],
            frames: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Pixel at `(x, y)`; out of bounds reads as transparent
    pub fn pixel(&self, x: i32, y: i32) -> Color {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Color::TRANSPARENT;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    /// Draw `sprite` with its top-left corner at `(x, y)`
    pub fn draw_sprite(&mut self, sprite: &Sprite, x: i32, y: i32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + sprite.width()).min(self.width);
        let y1 = (y + sprite.height()).min(self.height);

        for py in y0..y1 {
            for px in x0..x1 {
                let src = sprite.pixel(px - x, py - y);
                if src.a == 0 {
                    continue;
                }
                let i = (py * self.width + px) as usize;
                self.pixels[i] = blend(self.pixels[i], src);
            }
        }
    }
}

/// Source-over blend onto an opaque destination
fn blend(dst: Color, src: Color) -> Color {
    if src.a == 255 {
        return Color::rgb(src.r, src.g, src.b);
    }
    let a = src.a as u32;
    let mix = |d: u8, s: u8| ((s as u32 * a + d as u32 * (255 - a)) / 255) as u8;
    Color::rgb(mix(dst.r, src.r), mix(dst.g, src.g), mix(dst.b, src.b))
}

impl RenderSurface for Canvas {
    fn fill(&mut self, color: Color) {
        let color = Color::rgb(color.r, color.g, color.b);
        self.pixels.fill(color);
    }

    fn blit(&mut self, entity: &Entity) {
        self.draw_sprite(entity.image(), entity.x(), entity.y());
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    const RED: Color = Color::rgb(255, 0, 0);
    const WHITE: Color = Color::rgb(255, 255, 255);

    #[test]
    fn test_blit_clips_at_edges() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill(WHITE);
        let entity = Entity::top_left(-2, 8, Rc::new(Sprite::solid("red", 4, 4, RED)));
        canvas.blit(&entity);

        assert_eq!(canvas.pixel(0, 9), RED);
        assert_eq!(canvas.pixel(1, 8), RED);
        assert_eq!(canvas.pixel(2, 8), WHITE);
        assert_eq!(canvas.pixel(0, 7), WHITE);
    }

    #[test]
    fn test_transparent_pixels_keep_background() {
        let mut canvas = Canvas::new(4, 1);
        canvas.fill(WHITE);
        let sprite = Sprite::from_fn("half", 4, 1, |x, _| {
            match x {
                0 => RED,
                1 => Color::rgba(0, 0, 0, 128),
                _ => Color::TRANSPARENT,
            }
        });
        canvas.draw_sprite(&sprite, 0, 0);

        assert_eq!(canvas.pixel(0, 0), RED);
        assert_eq!(canvas.pixel(1, 0), Color::rgb(127, 127, 127));
        assert_eq!(canvas.pixel(2, 0), WHITE);
    }

    #[test]
    fn test_group_blit_in_order() {
        let mut canvas = Canvas::new(2, 2);
        let under = Entity::top_left(0, 0, Rc::new(Sprite::solid("a", 2, 2, WHITE)));
        let over = Entity::top_left(0, 0, Rc::new(Sprite::solid("b", 1, 1, RED)));
        canvas.blit_group([&under, &over]);
        assert_eq!(canvas.pixel(0, 0), RED);
        assert_eq!(canvas.pixel(1, 1), WHITE);

        canvas.present().unwrap();
        assert_eq!(canvas.frames(), 1);
    }
}
