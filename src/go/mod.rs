//! Go: a two-player 19x19 board with captures and suicide rejection.

pub mod board;
pub mod game_board;

pub use board::{Board, Cell, Group, MoveOutcome, Stone, BOARD_SIZE};
pub use game_board::{GameBoard, BLACK_STONE, BOARD_IMAGE, WHITE_STONE};

use crate::asset_manager::AssetManager;
use crate::config::GameConfig;
use crate::engine::GameEngine;
use crate::input_system::PointerMapping;
use crate::timer::Timer;

pub fn queue_assets(assets: &mut AssetManager) {
    for id in [BOARD_IMAGE, BLACK_STONE, WHITE_STONE] {
        assets.queue_download(id);
    }
}

/// Engine with one board entity, reading clicks as grid cells.
pub fn new_game(assets: AssetManager, config: &GameConfig) -> GameEngine<GameBoard> {
    let mut engine = GameEngine::new(
        assets,
        Timer::with_max_step(config.engine.max_step),
        PointerMapping::GoGrid,
    );
    engine.init(config.go.surface_width as f64, config.go.surface_height as f64);
    engine.set_show_outlines(config.engine.show_outlines);
    engine.add_entity(GameBoard::new(config.go.show_grid));
    engine
}
