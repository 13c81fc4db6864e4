//! The Go board as an engine entity
//!
//! Reads the frame's grid-mapped click and hover position, feeds clicks to
//! [`Board::place_stone`], and draws the board image, the stones, an
//! optional cell overlay and a translucent preview of the next stone.

use crate::asset_manager::AssetManager;
use crate::engine::{Commands, FrameContext};
use crate::entity::{Entity, EntityCore, Neighbors};
use crate::error::RenderResult;
use crate::go::board::{Board, Cell, MoveOutcome, Stone, BOARD_SIZE};
use crate::input_system::{GO_CELL_SIZE, GO_GRID_OFFSET};
use crate::surface::{Color, Rect, Surface};
use log::debug;

pub const BOARD_IMAGE: &str = "./img/960px-Blank_Go_board.png";
pub const BLACK_STONE: &str = "./img/black.png";
pub const WHITE_STONE: &str = "./img/white.png";

const BOARD_ORIGIN: f64 = 20.0;
const BOARD_EXTENT: f64 = 760.0;
const HOVER_ALPHA: f64 = 0.5;

/// Pixel rectangle of one grid cell.
pub fn cell_rect(x: usize, y: usize) -> Rect {
    Rect::new(
        x as f64 * GO_CELL_SIZE + GO_GRID_OFFSET,
        y as f64 * GO_CELL_SIZE + GO_GRID_OFFSET,
        GO_CELL_SIZE,
        GO_CELL_SIZE,
    )
}

fn stone_image(stone: Stone) -> &'static str {
    match stone {
        Stone::Black => BLACK_STONE,
        Stone::White => WHITE_STONE,
    }
}

pub struct GameBoard {
    core: EntityCore,
    board: Board,
    show_grid: bool,
}

impl GameBoard {
    pub fn new(show_grid: bool) -> Self {
        GameBoard {
            core: EntityCore::new(BOARD_ORIGIN, BOARD_ORIGIN),
            board: Board::new(),
            show_grid,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    fn draw_stone(
        surface: &mut dyn Surface,
        assets: &AssetManager,
        stone: Stone,
        cell: Cell,
    ) -> RenderResult {
        match assets.get_asset(stone_image(stone)) {
            Some(image) => surface.draw_image(image, cell_rect(cell.x, cell.y)),
            None => Ok(()),
        }
    }

    fn draw_hover(&self, surface: &mut dyn Surface, ctx: &FrameContext<'_>) -> RenderResult {
        let Some(mouse) = ctx.input.mouse else {
            return Ok(());
        };
        let (x, y) = mouse.cell();
        let Some(cell) = Cell::checked(x, y) else {
            return Ok(());
        };
        if self.board.stone_at(cell).is_some() {
            return Ok(());
        }

        surface.save();
        surface.set_global_alpha(HOVER_ALPHA);
        let result = Self::draw_stone(surface, ctx.assets, self.board.to_move(), cell);
        surface.restore();
        result
    }
}

impl Entity for GameBoard {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &FrameContext<'_>, _others: Neighbors<'_, Self>, _commands: &mut Commands<Self>) {
        let Some(click) = ctx.input.click else {
            return;
        };
        let (x, y) = click.cell();
        let color = self.board.to_move();
        match self.board.place_stone(x, y) {
            MoveOutcome::Placed { captured } if captured.is_empty() => {
                debug!("{:?} played ({}, {})", color, x, y);
            }
            MoveOutcome::Placed { captured } => {
                debug!("{:?} played ({}, {}), captured {}", color, x, y, captured.len());
            }
            rejected => debug!("{:?} at ({}, {}) rejected: {:?}", color, x, y, rejected),
        }
    }

    fn draw(
        &mut self,
        surface: &mut dyn Surface,
        ctx: &FrameContext<'_>,
        _others: Neighbors<'_, Self>,
    ) -> RenderResult {
        if let Some(image) = ctx.assets.get_asset(BOARD_IMAGE) {
            surface.draw_image(
                image,
                Rect::new(self.core.x, self.core.y, BOARD_EXTENT, BOARD_EXTENT),
            )?;
        }

        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                if self.show_grid {
                    surface.stroke_rect(cell_rect(x, y), Color::GREEN)?;
                }
                let cell = Cell::new(x, y);
                if let Some(stone) = self.board.stone_at(cell) {
                    Self::draw_stone(surface, ctx.assets, stone, cell)?;
                }
            }
        }

        self.draw_hover(surface, ctx)?;
        self.core.draw_outline(surface, ctx)
    }

    fn reset(&mut self) {
        self.board = Board::new();
    }
}
