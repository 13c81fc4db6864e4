//! [`Surface`] on an SDL2 window canvas
//!
//! Images become textures the first time they are drawn, decoded from the
//! bytes the asset manager loaded. Global alpha is applied as the
//! texture's alpha mod, or folded into the draw colour for shapes.

use crate::asset_manager::Image;
use crate::error::{RenderError, RenderResult};
use crate::font::{lit_cells, text_width, GLYPH_HEIGHT};
use crate::surface::{Color, LinearGradient, Rect, Surface, TextStyle};
use sdl2::image::LoadTexture;
use sdl2::pixels;
use sdl2::rect::{self, Point};
use sdl2::render::{BlendMode, Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use std::collections::HashMap;
use std::f64::consts::TAU;

const CIRCLE_SEGMENTS: usize = 48;

fn to_sdl_rect(rect: Rect) -> rect::Rect {
    rect::Rect::new(
        rect.x.round() as i32,
        rect.y.round() as i32,
        rect.width.max(0.0).round() as u32,
        rect.height.max(0.0).round() as u32,
    )
}

pub struct SdlSurface<'t> {
    canvas: Canvas<Window>,
    creator: &'t TextureCreator<WindowContext>,
    textures: HashMap<String, Texture<'t>>,
    width: f64,
    height: f64,
    alpha: f64,
    saved: Vec<f64>,
}

impl<'t> SdlSurface<'t> {
    pub fn new(
        mut canvas: Canvas<Window>,
        creator: &'t TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        canvas
            .set_logical_size(width, height)
            .map_err(|e| RenderError::Backend(e.to_string()))?;
        canvas.set_blend_mode(BlendMode::Blend);
        Ok(SdlSurface {
            canvas,
            creator,
            textures: HashMap::new(),
            width: width as f64,
            height: height as f64,
            alpha: 1.0,
            saved: Vec::new(),
        })
    }

    pub fn present(&mut self) {
        self.canvas.present();
    }

    fn sdl_color(&self, color: Color) -> pixels::Color {
        let a = (color.a as f64 * self.alpha).round() as u8;
        pixels::Color::RGBA(color.r, color.g, color.b, a)
    }

    fn blit(&mut self, image: &Image, src: Option<Rect>, dest: Rect) -> RenderResult {
        if !self.textures.contains_key(&image.id) {
            if image.bytes.is_empty() {
                return Err(RenderError::MissingTexture(image.id.clone()));
            }
            let texture = self.creator.load_texture_bytes(&image.bytes)?;
            self.textures.insert(image.id.clone(), texture);
        }
        let texture = self
            .textures
            .get_mut(&image.id)
            .ok_or_else(|| RenderError::MissingTexture(image.id.clone()))?;

        texture.set_blend_mode(BlendMode::Blend);
        texture.set_alpha_mod((self.alpha * 255.0).round() as u8);
        self.canvas
            .copy(texture, src.map(to_sdl_rect), to_sdl_rect(dest))?;
        Ok(())
    }
}

impl Surface for SdlSurface<'_> {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear_rect(&mut self, rect: Rect) -> RenderResult {
        self.canvas.set_draw_color(pixels::Color::RGB(0, 0, 0));
        self.canvas.fill_rect(to_sdl_rect(rect))?;
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
        self.blit(image, None, dest)
    }

    fn draw_image_region(&mut self, image: &Image, src: Rect, dest: Rect) -> RenderResult {
        self.blit(image, Some(src), dest)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> RenderResult {
        let color = self.sdl_color(color);
        self.canvas.set_draw_color(color);
        self.canvas.fill_rect(to_sdl_rect(rect))?;
        Ok(())
    }

    /// One-pixel bands along y. Only the vertical component of the
    /// gradient axis is honoured.
    fn fill_gradient(&mut self, rect: Rect, gradient: &LinearGradient) -> RenderResult {
        let span = gradient.y1 - gradient.y0;
        let rows = rect.height.max(0.0).round() as i32;
        for row in 0..rows {
            let y = rect.y + row as f64;
            let t = if span.abs() < f64::EPSILON {
                0.0
            } else {
                (y + 0.5 - gradient.y0) / span
            };
            let color = self.sdl_color(gradient.color_at(t));
            self.canvas.set_draw_color(color);
            self.canvas
                .fill_rect(to_sdl_rect(Rect::new(rect.x, y, rect.width, 1.0)))?;
        }
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) -> RenderResult {
        let color = self.sdl_color(color);
        self.canvas.set_draw_color(color);
        self.canvas.draw_rect(to_sdl_rect(rect))?;
        Ok(())
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) -> RenderResult {
        let points: Vec<Point> = (0..=CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = TAU * i as f64 / CIRCLE_SEGMENTS as f64;
                Point::new(
                    (cx + radius * angle.cos()).round() as i32,
                    (cy + radius * angle.sin()).round() as i32,
                )
            })
            .collect();
        let color = self.sdl_color(color);
        self.canvas.set_draw_color(color);
        self.canvas.draw_lines(points.as_slice())?;
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> RenderResult {
        let scale = style.size.max(1);
        let (mut left, mut top) = (x.round() as i32, y.round() as i32);
        if style.centered {
            left -= (text_width(text, scale) / 2) as i32;
            top -= (GLYPH_HEIGHT * scale / 2) as i32;
        }

        let cells: Vec<rect::Rect> = lit_cells(text, scale)
            .map(|(dx, dy)| rect::Rect::new(left + dx, top + dy, scale, scale))
            .collect();
        let color = self.sdl_color(style.color);
        self.canvas.set_draw_color(color);
        self.canvas.fill_rects(&cells)?;
        Ok(())
    }
}
