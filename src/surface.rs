//! 2D drawing surface capability
//!
//! Entities never talk to a window directly. They draw through the
//! [`Surface`] trait, which the host implements (SDL2 canvas in
//! `host::sdl_surface`) and which [`DrawList`] implements for headless runs
//! and tests.
//!
//! The operations mirror a canvas-style 2D context: clear, save/restore,
//! images (whole and sub-rectangle), filled/stroked rectangles, circles,
//! linear gradients and text. Global alpha is part of the saved state.

use crate::asset_manager::Image;
use crate::error::RenderResult;

/// RGBA colour, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREEN: Color = Color::rgb(0, 128, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Linear interpolation between two colours, `t` in [0, 1].
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect { x, y, width, height }
    }
}

/// Linear gradient between two points, filled into a rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    /// `(offset, colour)` pairs, offsets ascending in [0, 1].
    pub stops: Vec<(f64, Color)>,
}

impl LinearGradient {
    pub fn vertical(top: f64, bottom: f64, from: Color, to: Color) -> Self {
        LinearGradient {
            x0: 0.0,
            y0: top,
            x1: 0.0,
            y1: bottom,
            stops: vec![(0.0, from), (1.0, to)],
        }
    }

    /// Colour at normalised position `t` along the gradient axis.
    pub fn color_at(&self, t: f64) -> Color {
        match self.stops.as_slice() {
            [] => Color::BLACK,
            [(_, only)] => *only,
            stops => {
                let t = t.clamp(0.0, 1.0);
                for pair in stops.windows(2) {
                    let (o0, c0) = pair[0];
                    let (o1, c1) = pair[1];
                    if t <= o1 {
                        let span = (o1 - o0).max(f64::EPSILON);
                        return c0.lerp(c1, (t - o0) / span);
                    }
                }
                stops[stops.len() - 1].1
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    /// Pixel scale of the glyphs (host dependent, 1 = smallest).
    pub size: u32,
    pub centered: bool,
}

impl TextStyle {
    pub fn new(color: Color, size: u32) -> Self {
        TextStyle { color, size, centered: false }
    }

    pub fn centered(mut self) -> Self {
        self.centered = true;
        self
    }
}

/// The drawing capability the core needs from its host.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn clear_rect(&mut self, rect: Rect) -> RenderResult;

    /// Push the current render state (global alpha).
    fn save(&mut self);
    /// Pop the render state pushed by the matching `save`.
    fn restore(&mut self);
    fn set_global_alpha(&mut self, alpha: f64);

    fn draw_image(&mut self, image: &Image, dest: Rect) -> RenderResult;
    fn draw_image_region(&mut self, image: &Image, src: Rect, dest: Rect) -> RenderResult;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> RenderResult;
    fn fill_gradient(&mut self, rect: Rect, gradient: &LinearGradient) -> RenderResult;
    fn stroke_rect(&mut self, rect: Rect, color: Color) -> RenderResult;
    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) -> RenderResult;

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> RenderResult;
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    Image { id: String, src: Option<Rect>, dest: Rect, alpha: f64 },
    FillRect { rect: Rect, color: Color },
    Gradient { rect: Rect, gradient: LinearGradient },
    StrokeRect { rect: Rect, color: Color },
    StrokeCircle { cx: f64, cy: f64, radius: f64, color: Color },
    Text { text: String, x: f64, y: f64, style: TextStyle },
}

/// Headless surface that records every command.
///
/// Save/restore only track global alpha, which is folded into each
/// recorded image command.
#[derive(Debug, Clone)]
pub struct DrawList {
    width: f64,
    height: f64,
    alpha: f64,
    saved: Vec<f64>,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f64, height: f64) -> Self {
        DrawList {
            width,
            height,
            alpha: 1.0,
            saved: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Drop everything recorded so far.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = (&str, &Rect, f64)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Image { id, dest, alpha, .. } => Some((id.as_str(), dest, *alpha)),
            _ => None,
        })
    }

    /// Depth of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }
}

impl Surface for DrawList {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear_rect(&mut self, rect: Rect) -> RenderResult {
        self.commands.push(DrawCommand::Clear(rect));
        Ok(())
    }

    fn save(&mut self) {
        self.saved.push(self.alpha);
    }

    fn restore(&mut self) {
        if let Some(alpha) = self.saved.pop() {
            self.alpha = alpha;
        }
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn draw_image(&mut self, image: &Image, dest: Rect) -> RenderResult {
        self.commands.push(DrawCommand::Image {
            id: image.id.clone(),
            src: None,
            dest,
            alpha: self.alpha,
        });
        Ok(())
    }

    fn draw_image_region(&mut self, image: &Image, src: Rect, dest: Rect) -> RenderResult {
        self.commands.push(DrawCommand::Image {
            id: image.id.clone(),
            src: Some(src),
            dest,
            alpha: self.alpha,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> RenderResult {
        self.commands.push(DrawCommand::FillRect { rect, color });
        Ok(())
    }

    fn fill_gradient(&mut self, rect: Rect, gradient: &LinearGradient) -> RenderResult {
        self.commands.push(DrawCommand::Gradient {
            rect,
            gradient: gradient.clone(),
        });
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) -> RenderResult {
        self.commands.push(DrawCommand::StrokeRect { rect, color });
        Ok(())
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) -> RenderResult {
        self.commands.push(DrawCommand::StrokeCircle { cx, cy, radius, color });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> RenderResult {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style: style.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let g = LinearGradient::vertical(0.0, 10.0, Color::BLACK, Color::WHITE);
        assert_eq!(g.color_at(0.0), Color::BLACK);
        assert_eq!(g.color_at(1.0), Color::WHITE);
        assert_eq!(g.color_at(0.5), Color::rgb(128, 128, 128));
    }

    #[test]
    fn test_save_restore_alpha() {
        let image = Image::placeholder("a", 4, 4);
        let mut list = DrawList::new(100.0, 100.0);

        list.save();
        list.set_global_alpha(0.5);
        list.draw_image(&image, Rect::new(0.0, 0.0, 4.0, 4.0)).unwrap();
        list.restore();
        list.draw_image(&image, Rect::new(0.0, 0.0, 4.0, 4.0)).unwrap();

        let alphas: Vec<f64> = list.images().map(|(_, _, a)| a).collect();
        assert_eq!(alphas, vec![0.5, 1.0]);
        assert_eq!(list.save_depth(), 0);
    }
}
