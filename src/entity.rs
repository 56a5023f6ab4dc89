//! Positioned, image-bearing objects
//!
//! An `Entity` owns a handle to its current image and a bounding box that
//! always matches that image. `Group` keeps entities (or anything that
//! exposes one) in insertion order, which is also update and draw order.

use std::fmt;
use std::rc::Rc;

use glam::IVec2;

use crate::font::Font;
use crate::sprite::{Color, Sprite};

/// Shared handle to an immutable bitmap
pub type Image = Rc<Sprite>;

/// Which point of the bounding box the construction position refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    Centered,
}

/// Anything with an entity to draw and collide
pub trait Drawable {
    fn entity(&self) -> &Entity;
}

/// Per-tick behavior for group members
pub trait Update {
    fn update(&mut self);
}

/// A positioned image with a bounding box
#[derive(Debug, Clone)]
pub struct Entity {
    /// Top-left corner
    pos: IVec2,
    size: IVec2,
    image: Image,
    anchor: Anchor,
}

impl Entity {
    pub fn new(x: i32, y: i32, image: Image, anchor: Anchor) -> Self {
        let size = image.size();
        let pos = match anchor {
            Anchor::TopLeft => IVec2::new(x, y),
            Anchor::Centered => IVec2::new(x, y) - size / 2,
        };
        Self {
            pos,
            size,
            image,
            anchor,
        }
    }

    pub fn top_left(x: i32, y: i32, image: Image) -> Self {
        Self::new(x, y, image, Anchor::TopLeft)
    }

    pub fn centered(x: i32, y: i32, image: Image) -> Self {
        Self::new(x, y, image, Anchor::Centered)
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Swap the image; the box is resized around the anchor point
    pub fn set_image(&mut self, image: Image) {
        let size = image.size();
        if self.anchor == Anchor::Centered {
            let center = self.center();
            self.pos = center - size / 2;
        }
        self.size = size;
        self.image = image;
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn pos(&self) -> IVec2 {
        self.pos
    }

    pub fn x(&self) -> i32 {
        self.pos.x
    }

    pub fn y(&self) -> i32 {
        self.pos.y
    }

    pub fn set_x(&mut self, x: i32) {
        self.pos.x = x;
    }

    pub fn set_y(&mut self, y: i32) {
        self.pos.y = y;
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    pub fn center(&self) -> IVec2 {
        self.pos + self.size / 2
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.pos.x + self.size.x
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.pos.y + self.size.y
    }
}

impl Drawable for Entity {
    fn entity(&self) -> &Entity {
        self
    }
}

/// Ordered, mutable collection
#[derive(Debug, Clone)]
pub struct Group<T = Entity> {
    items: Vec<T>,
}

impl<T> Default for Group<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Group<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove by position, keeping the order of the rest
    pub fn remove(&mut self, index: usize) -> Option<T> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Keep only the items matching `keep`; returns how many were dropped
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(keep);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T: Update> Group<T> {
    /// Update every member in order
    pub fn update(&mut self) {
        for item in &mut self.items {
            item.update();
        }
    }
}

impl<'a, T> IntoIterator for &'a Group<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Group<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}

/// An entity whose image is rendered from a string
pub struct Text {
    entity: Entity,
    text: String,
    color: Color,
    font: Rc<dyn Font>,
}

impl Text {
    pub fn new(
        x: i32,
        y: i32,
        text: &str,
        color: Color,
        font: Rc<dyn Font>,
        anchor: Anchor,
    ) -> Self {
        let image = Rc::new(font.render(text, color));
        Self {
            entity: Entity::new(x, y, image, anchor),
            text: text.into(),
            color,
            font,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the string and re-render immediately
    pub fn set_text(&mut self, text: &str) {
        self.text = text.into();
        let image = Rc::new(self.font.render(&self.text, self.color));
        self.entity.set_image(image);
    }
}

impl Drawable for Text {
    fn entity(&self) -> &Entity {
        &self.entity
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Text")
            .field("text", &self.text)
            .field("pos", &self.entity.pos())
            .finish()
    }
}
