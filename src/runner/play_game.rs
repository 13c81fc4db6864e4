use crate::engine::{Commands, FrameContext};
use crate::entity::{EntityCore, Neighbors};
use crate::error::RenderResult;
use crate::runner::layout::{
    lives_label, BANNER_SIZE, CLICK_TO_PLAY, GAME_OVER, HUD_MARGIN, HUD_SIZE,
};
use crate::runner::RunnerEntity;
use crate::surface::{Color, Surface, TextStyle};
use log::info;

/// Title and HUD overlay. Starts the run on a click while idle.
pub struct PlayGame {
    core: EntityCore,
}

impl PlayGame {
    pub fn new() -> Self {
        PlayGame {
            core: EntityCore::new(0.0, 0.0),
        }
    }

    pub fn core(&self) -> &EntityCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn lives(others: &Neighbors<'_, RunnerEntity>) -> u32 {
        others
            .iter()
            .find_map(RunnerEntity::as_unicorn)
            .map(|unicorn| unicorn.lives())
            .unwrap_or(0)
    }

    pub fn update(
        &mut self,
        ctx: &FrameContext<'_>,
        others: &Neighbors<'_, RunnerEntity>,
        commands: &mut Commands<RunnerEntity>,
    ) {
        if ctx.running || ctx.input.click.is_none() {
            return;
        }
        let lives = Self::lives(others);
        if lives > 0 {
            info!("starting run with {} lives", lives);
            commands.start_running();
        }
    }

    pub fn draw(
        &self,
        surface: &mut dyn Surface,
        ctx: &FrameContext<'_>,
        others: &Neighbors<'_, RunnerEntity>,
    ) -> RenderResult {
        let lives = Self::lives(others);
        let (cx, cy) = (ctx.surface_width / 2.0, ctx.surface_height / 2.0);
        let banner = TextStyle::new(Color::WHITE, BANNER_SIZE).centered();

        if ctx.running {
            let hud = TextStyle::new(Color::WHITE, HUD_SIZE);
            surface.fill_text(&lives_label(lives), HUD_MARGIN, HUD_MARGIN, &hud)
        } else if lives > 0 {
            surface.fill_text(CLICK_TO_PLAY, cx, cy, &banner)
        } else {
            surface.fill_text(GAME_OVER, cx, cy, &banner)
        }
    }
}

impl Default for PlayGame {
    fn default() -> Self {
        Self::new()
    }
}
