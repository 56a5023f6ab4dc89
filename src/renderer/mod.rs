//! Rendering module
//!
//! Frames are composed on a software `Canvas` at game resolution, then
//! presented. The terminal surface downsamples the canvas into half-block
//! character cells.

pub mod canvas;
pub mod terminal;

pub use canvas::Canvas;
pub use terminal::TerminalSurface;

use crate::entity::Entity;
use crate::platform::PlatformError;
use crate::sprite::Color;

/// Where frames are drawn
pub trait RenderSurface {
    /// Clear the whole frame
    fn fill(&mut self, color: Color);

    /// Draw an entity's current image at its current rect
    fn blit(&mut self, entity: &Entity);

    /// Draw several entities in iteration order
    fn blit_group<'a, I>(&mut self, entities: I)
    where
        I: IntoIterator<Item = &'a Entity>,
        Self: Sized,
    {
        for entity in entities {
            self.blit(entity);
        }
    }

    /// Commit the frame
    fn present(&mut self) -> Result<(), PlatformError>;
}
