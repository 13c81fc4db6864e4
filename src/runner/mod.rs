//! Endless runner: a unicorn jumping between scrolling platforms.
//!
//! Entity order matters and is fixed by [`new_game`]: platforms first, so
//! the unicorn tests against this frame's platform positions, then the
//! unicorn, then the overlay that reads the unicorn's lives.

pub mod layout;
pub mod platform;
pub mod play_game;
pub mod unicorn;

pub use platform::Platform;
pub use play_game::PlayGame;
pub use unicorn::{Unicorn, UnicornState};

use crate::asset_manager::AssetManager;
use crate::config::GameConfig;
use crate::engine::{Commands, FrameContext, GameEngine};
use crate::entity::{Entity, EntityCore, Neighbors};
use crate::error::RenderResult;
use crate::input_system::PointerMapping;
use crate::surface::Surface;
use crate::timer::Timer;

pub enum RunnerEntity {
    Platform(Platform),
    Unicorn(Unicorn),
    PlayGame(PlayGame),
}

impl RunnerEntity {
    pub fn as_platform(&self) -> Option<&Platform> {
        match self {
            RunnerEntity::Platform(platform) => Some(platform),
            _ => None,
        }
    }

    pub fn as_unicorn(&self) -> Option<&Unicorn> {
        match self {
            RunnerEntity::Unicorn(unicorn) => Some(unicorn),
            _ => None,
        }
    }
}

impl Entity for RunnerEntity {
    fn core(&self) -> &EntityCore {
        match self {
            RunnerEntity::Platform(platform) => platform.core(),
            RunnerEntity::Unicorn(unicorn) => unicorn.core(),
            RunnerEntity::PlayGame(play) => play.core(),
        }
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        match self {
            RunnerEntity::Platform(platform) => platform.core_mut(),
            RunnerEntity::Unicorn(unicorn) => unicorn.core_mut(),
            RunnerEntity::PlayGame(play) => play.core_mut(),
        }
    }

    fn update(&mut self, ctx: &FrameContext<'_>, others: Neighbors<'_, Self>, commands: &mut Commands<Self>) {
        match self {
            RunnerEntity::Platform(platform) => platform.update(ctx),
            RunnerEntity::Unicorn(unicorn) => unicorn.update(ctx, &others, commands),
            RunnerEntity::PlayGame(play) => play.update(ctx, &others, commands),
        }
    }

    fn draw(
        &mut self,
        surface: &mut dyn Surface,
        ctx: &FrameContext<'_>,
        others: Neighbors<'_, Self>,
    ) -> RenderResult {
        match self {
            RunnerEntity::Platform(platform) => platform.draw(surface, ctx),
            RunnerEntity::Unicorn(unicorn) => unicorn.draw(surface, ctx),
            RunnerEntity::PlayGame(play) => play.draw(surface, ctx, &others),
        }
    }

    fn reset(&mut self) {
        match self {
            RunnerEntity::Platform(platform) => platform.reset(),
            RunnerEntity::Unicorn(unicorn) => unicorn.reset(),
            RunnerEntity::PlayGame(_) => {}
        }
    }
}

pub fn queue_assets(assets: &mut AssetManager) {
    assets.queue_download(layout::UNICORN_SHEET);
}

/// Engine holding the configured platform layout, the unicorn and the
/// overlay. Call after the assets have loaded so the sheet width is known.
pub fn new_game(assets: AssetManager, config: &GameConfig) -> GameEngine<RunnerEntity> {
    let runner = &config.runner;
    let unicorn = Unicorn::new(runner, &assets);

    let mut engine = GameEngine::new(
        assets,
        Timer::with_max_step(config.engine.max_step),
        PointerMapping::Pixel,
    );
    engine.init(runner.surface_width as f64, runner.surface_height as f64);
    engine.set_show_outlines(config.engine.show_outlines);

    for (id, spec) in runner.platforms.iter().enumerate() {
        engine.add_entity(RunnerEntity::Platform(Platform::new(
            id,
            spec,
            runner.scroll_speed,
            runner.world_length,
        )));
    }
    engine.add_entity(RunnerEntity::Unicorn(unicorn));
    engine.add_entity(RunnerEntity::PlayGame(PlayGame::new()));
    engine
}
