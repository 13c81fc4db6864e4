//! The entity capability shared by every game object
//!
//! Each game defines a closed set of entity types (an enum, or a single
//! struct) and implements [`Entity`] for it. The engine owns the entities in
//! insertion order and calls the hooks:
//!
//! - `update`: read the frame's input and clock, mutate self, queue
//!   engine-level [`Commands`]
//! - `draw`: render through the [`Surface`] capability
//! - `reset`: return to the initial placement when the world restarts
//!
//! While one entity runs a hook it holds `&mut self`; every other entity is
//! visible read-only through [`Neighbors`]. Cross-entity effects that need to
//! mutate others (start the run, reset the world, spawn a new entity) go
//! through `Commands`.

use crate::collision::BoundingBox;
use crate::engine::{Commands, FrameContext};
use crate::error::RenderResult;
use crate::surface::{Color, Surface};

/// State every entity carries.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCore {
    pub x: f64,
    pub y: f64,
    /// Set by the entity, consumed by the engine's post-update sweep.
    pub remove_from_world: bool,
    pub bounding_box: Option<BoundingBox>,
    /// Only used for the debug outline.
    pub radius: Option<f64>,
}

impl EntityCore {
    pub fn new(x: f64, y: f64) -> Self {
        EntityCore {
            x,
            y,
            remove_from_world: false,
            bounding_box: None,
            radius: None,
        }
    }

    /// Green circle of `radius` around the position, when outlines are on.
    pub fn draw_outline(&self, surface: &mut dyn Surface, ctx: &FrameContext<'_>) -> RenderResult {
        match self.radius {
            Some(radius) if ctx.show_outlines => {
                surface.stroke_circle(self.x, self.y, radius, Color::GREEN)
            }
            _ => Ok(()),
        }
    }
}

/// Read-only view of every entity except the one being updated or drawn.
pub struct Neighbors<'a, E> {
    before: &'a [E],
    after: &'a [E],
}

impl<'a, E> Neighbors<'a, E> {
    pub fn empty() -> Self {
        Neighbors {
            before: &[],
            after: &[],
        }
    }

    /// Other entities, in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &'a E> + 'a {
        self.before.iter().chain(self.after.iter())
    }

    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Borrow entity `index` mutably alongside a view of the rest.
/// `None` when `index` is past the end.
pub fn split_at_entity<E>(entities: &mut [E], index: usize) -> Option<(&mut E, Neighbors<'_, E>)> {
    if index >= entities.len() {
        return None;
    }
    let (before, rest) = entities.split_at_mut(index);
    let (current, after) = rest.split_first_mut()?;
    Some((
        current,
        Neighbors {
            before: &*before,
            after: &*after,
        },
    ))
}

pub trait Entity: Sized {
    fn core(&self) -> &EntityCore;
    fn core_mut(&mut self) -> &mut EntityCore;

    fn update(
        &mut self,
        _ctx: &FrameContext<'_>,
        _others: Neighbors<'_, Self>,
        _commands: &mut Commands<Self>,
    ) {
    }

    fn draw(
        &mut self,
        surface: &mut dyn Surface,
        ctx: &FrameContext<'_>,
        _others: Neighbors<'_, Self>,
    ) -> RenderResult {
        self.core().draw_outline(surface, ctx)
    }

    fn reset(&mut self) {}

    fn is_removed(&self) -> bool {
        self.core().remove_from_world
    }
}
