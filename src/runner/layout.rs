//! Sheet geometry, colours and text placement for the runner.

use crate::surface::Color;

pub const UNICORN_SHEET: &str = "./img/unicorn.png";

/// Size of one unicorn cell on the sheet.
pub const UNICORN_FRAME_WIDTH: u32 = 100;
pub const UNICORN_FRAME_HEIGHT: u32 = 80;
pub const UNICORN_SCALE: f64 = 1.0;

/// Gallop cycle, top row.
pub const RUN_ROW_Y: u32 = 0;
pub const RUN_FRAMES: u32 = 8;
pub const RUN_FRAME_DURATION: f64 = 0.08;

/// Wing-flap row; the jump plays it forward, the fall plays it backward.
pub const FLAP_ROW_Y: u32 = 80;
pub const FLAP_FRAMES: u32 = 8;
pub const JUMP_FRAME_DURATION: f64 = 0.1;
pub const FALL_FRAME_DURATION: f64 = 0.1;

pub const PLATFORM_TOP: Color = Color::rgb(255, 105, 180);
pub const PLATFORM_BOTTOM: Color = Color::rgb(102, 51, 153);

pub const BANNER_SIZE: u32 = 6;
pub const HUD_SIZE: u32 = 3;
pub const HUD_MARGIN: f64 = 20.0;

pub const CLICK_TO_PLAY: &str = "Click to play";
pub const GAME_OVER: &str = "Game Over";

pub fn lives_label(lives: u32) -> String {
    format!("Lives: {}", lives)
}
