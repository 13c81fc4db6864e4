//! Frame-sheet animation
//!
//! An [`Animation`] maps elapsed time onto one cell of a sprite sheet.
//! Time only moves forward inside [`Animation::draw_frame`], which advances
//! by the frame's tick *before* resolving which cell to show:
//!
//! - looping: once elapsed reaches `frames * frame_duration` it snaps back to 0
//! - non-looping: once done, `draw_frame` draws nothing at all. Callers check
//!   [`Animation::is_done`] and switch to another animation.
//!
//! `reverse` plays the cells back to front (frame N shows cell frames - N - 1).

use crate::asset_manager::AssetManager;
use crate::error::RenderResult;
use crate::sprite::{locate_frame, Frame, SpriteSheet};
use crate::surface::{Rect, Surface};
use log::trace;

#[derive(Debug, Clone)]
pub struct Animation {
    sheet: SpriteSheet,
    start_x: u32,
    start_y: u32,
    frame_width: u32,
    frame_height: u32,
    frame_duration: f64,
    frames: u32,
    total_time: f64,
    elapsed_time: f64,
    looping: bool,
    reverse: bool,
}

impl Animation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sheet: SpriteSheet,
        start_x: u32,
        start_y: u32,
        frame_width: u32,
        frame_height: u32,
        frame_duration: f64,
        frames: u32,
        looping: bool,
        reverse: bool,
    ) -> Self {
        Animation {
            sheet,
            start_x,
            start_y,
            frame_width,
            frame_height,
            frame_duration,
            frames,
            total_time: frame_duration * frames as f64,
            elapsed_time: 0.0,
            looping,
            reverse,
        }
    }

    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed_time
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Index of the frame for the current elapsed time.
    pub fn current_frame(&self) -> u32 {
        if self.frame_duration <= 0.0 {
            return 0;
        }
        (self.elapsed_time / self.frame_duration).floor() as u32
    }

    pub fn is_done(&self) -> bool {
        self.elapsed_time >= self.total_time
    }

    pub fn reset(&mut self) {
        self.elapsed_time = 0.0;
    }

    /// Move time forward by `dt`.
    ///
    /// Returns `false` when a non-looping animation has finished and there is
    /// nothing left to show.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.elapsed_time += dt;
        if self.is_done() {
            if self.looping {
                self.elapsed_time = 0.0;
            } else {
                return false;
            }
        }
        true
    }

    /// Source cell for the current frame, honoring `reverse` and row wrapping.
    pub fn frame_source(&self) -> Option<Frame> {
        if self.frames == 0 {
            return None;
        }
        let current = self.current_frame().min(self.frames - 1);
        let index = if self.reverse {
            self.frames - current - 1
        } else {
            current
        };
        locate_frame(
            self.sheet.width,
            self.start_x,
            self.start_y,
            self.frame_width,
            self.frame_height,
            index,
        )
    }

    /// Advance by `dt`, then draw the resolved cell at (x, y) scaled by `scale`.
    ///
    /// A missing sheet image is skipped, not an error.
    pub fn draw_frame(
        &mut self,
        dt: f64,
        surface: &mut dyn Surface,
        assets: &AssetManager,
        x: f64,
        y: f64,
        scale: f64,
    ) -> RenderResult {
        if !self.advance(dt) {
            return Ok(());
        }
        let Some(frame) = self.frame_source() else {
            return Ok(());
        };
        let Some(image) = assets.get_asset(&self.sheet.id) else {
            trace!("sprite sheet {} not loaded, skipping frame", self.sheet.id);
            return Ok(());
        };

        let dest = Rect::new(
            x,
            y,
            self.frame_width as f64 * scale,
            self.frame_height as f64 * scale,
        );
        surface.draw_image_region(image, frame.to_rect(), dest)
    }
}
