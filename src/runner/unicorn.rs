//! The runner's player character
//!
//! The unicorn never moves horizontally; platforms scroll under it. Its
//! vertical motion is closed form, with no velocity integration:
//!
//! - jumping: `y = base - (4u - 4u^2) * jump_height`, `u = elapsed / duration`,
//!   where `duration` is the jump animation's total time
//! - falling: `y = fall_start + 4 * jump_height * (t / duration)^2`, the
//!   descending half of the same arc
//!
//! A fall that follows an unfinished jump picks the arc up at its apex
//! offset, so the motion stays continuous.
//!
//! Landing means the bottom edge crossed a platform's top edge this frame
//! while overlapping it horizontally. Any other overlap with a platform, or
//! dropping below the surface, kills the unicorn. The life is taken and the
//! world reset on the following update.

use crate::animation::Animation;
use crate::asset_manager::AssetManager;
use crate::collision::{colliding_indices, BoundingBox, Collidable};
use crate::config::RunnerConfig;
use crate::engine::{Commands, FrameContext};
use crate::entity::{EntityCore, Neighbors};
use crate::error::RenderResult;
use crate::runner::layout::{
    FALL_FRAME_DURATION, FLAP_FRAMES, FLAP_ROW_Y, JUMP_FRAME_DURATION, RUN_FRAMES,
    RUN_FRAME_DURATION, RUN_ROW_Y, UNICORN_FRAME_HEIGHT, UNICORN_FRAME_WIDTH, UNICORN_SCALE,
    UNICORN_SHEET,
};
use crate::runner::platform::Platform;
use crate::runner::RunnerEntity;
use crate::sprite::SpriteSheet;
use crate::surface::Surface;
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnicornState {
    Grounded,
    Jumping,
    Falling,
    Dead,
}

/// Height of the jump arc at normalised time `u`, as a fraction of the
/// full jump height. Symmetric about `u = 0.5`.
pub fn arc_height(u: f64) -> f64 {
    let u = u.clamp(0.0, 1.0);
    let u = if u > 0.5 { 1.0 - u } else { u };
    4.0 * u - 4.0 * u * u
}

pub struct Unicorn {
    core: EntityCore,
    state: UnicornState,
    lives: u32,
    width: f64,
    height: f64,
    start_y: f64,
    start_platform: Option<usize>,
    platform: Option<usize>,
    jump_height: f64,
    jump_elapsed: f64,
    jump_base_y: f64,
    fall_elapsed: f64,
    fall_start_y: f64,
    prev_bottom: f64,
    run: Animation,
    jump: Animation,
    fall: Animation,
}

impl Unicorn {
    /// A unicorn standing on the first platform of the layout.
    pub fn new(config: &RunnerConfig, assets: &AssetManager) -> Self {
        let sheet = SpriteSheet::from_assets(assets, UNICORN_SHEET);
        let width = UNICORN_FRAME_WIDTH as f64 * UNICORN_SCALE;
        let height = UNICORN_FRAME_HEIGHT as f64 * UNICORN_SCALE;

        let (start_platform, start_y) = match config.platforms.first() {
            Some(spec) => (Some(0), spec.y - height),
            None => (None, 0.0),
        };

        let run = Animation::new(
            sheet.clone(),
            0,
            RUN_ROW_Y,
            UNICORN_FRAME_WIDTH,
            UNICORN_FRAME_HEIGHT,
            RUN_FRAME_DURATION,
            RUN_FRAMES,
            true,
            false,
        );
        let jump = Animation::new(
            sheet.clone(),
            0,
            FLAP_ROW_Y,
            UNICORN_FRAME_WIDTH,
            UNICORN_FRAME_HEIGHT,
            JUMP_FRAME_DURATION,
            FLAP_FRAMES,
            false,
            false,
        );
        let fall = Animation::new(
            sheet,
            0,
            FLAP_ROW_Y,
            UNICORN_FRAME_WIDTH,
            UNICORN_FRAME_HEIGHT,
            FALL_FRAME_DURATION,
            FLAP_FRAMES,
            true,
            true,
        );

        let mut unicorn = Unicorn {
            core: EntityCore::new(config.unicorn_x, start_y),
            state: UnicornState::Grounded,
            lives: config.lives,
            width,
            height,
            start_y,
            start_platform,
            platform: start_platform,
            jump_height: config.jump_height,
            jump_elapsed: 0.0,
            jump_base_y: start_y,
            fall_elapsed: 0.0,
            fall_start_y: start_y,
            prev_bottom: start_y + height,
            run,
            jump,
            fall,
        };
        unicorn.core.radius = Some(width / 2.0);
        unicorn.update_bounding_box();
        if start_platform.is_none() {
            unicorn.start_fall();
        }
        unicorn
    }

    pub fn core(&self) -> &EntityCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    pub fn state(&self) -> UnicornState {
        self.state
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    /// Id of the platform currently carrying the unicorn.
    pub fn platform(&self) -> Option<usize> {
        self.platform
    }

    fn jump_duration(&self) -> f64 {
        self.jump.total_time()
    }

    fn update_bounding_box(&mut self) {
        self.core.bounding_box = Some(BoundingBox::new(
            self.core.x,
            self.core.y,
            self.width,
            self.height,
        ));
    }

    fn start_jump(&mut self) {
        self.state = UnicornState::Jumping;
        self.platform = None;
        self.jump_elapsed = 0.0;
        self.jump_base_y = self.core.y;
        self.jump.reset();
    }

    /// Fall from rest at the current height.
    fn start_fall(&mut self) {
        self.state = UnicornState::Falling;
        self.platform = None;
        self.fall_elapsed = 0.0;
        self.fall_start_y = self.core.y;
        self.fall.reset();
    }

    /// Carry on down the arc of a jump that found nothing to land on.
    fn continue_fall_from_jump(&mut self) {
        self.state = UnicornState::Falling;
        self.fall_elapsed = self.jump_duration() / 2.0;
        self.fall_start_y = self.jump_base_y - self.jump_height;
        self.fall.reset();
    }

    fn land_on(&mut self, platform: &Platform) {
        let top = platform.bounding_box().top;
        self.state = UnicornState::Grounded;
        self.platform = Some(platform.id());
        self.core.y = top - self.height;
        self.update_bounding_box();
        self.run.reset();
    }

    fn die(&mut self, reason: &str) {
        info!("unicorn died: {}", reason);
        self.state = UnicornState::Dead;
        self.platform = None;
    }

    fn is_landing(&self, platform: &Platform) -> bool {
        let bounds = self.bounding_box();
        let top = platform.bounding_box().top;
        bounds.overlaps_horizontally(&platform.bounding_box())
            && self.prev_bottom <= top
            && bounds.bottom >= top
    }

    pub fn update(
        &mut self,
        ctx: &FrameContext<'_>,
        others: &Neighbors<'_, RunnerEntity>,
        commands: &mut Commands<RunnerEntity>,
    ) {
        if self.state == UnicornState::Dead {
            self.lives = self.lives.saturating_sub(1);
            debug!("{} lives left", self.lives);
            commands.reset_world();
            return;
        }
        if !ctx.running {
            return;
        }

        let platforms: Vec<&Platform> = others.iter().filter_map(RunnerEntity::as_platform).collect();
        self.prev_bottom = self.core.y + self.height;
        let dt = ctx.clock_tick;

        if self.state == UnicornState::Grounded {
            let support = self
                .platform
                .and_then(|id| platforms.iter().find(|p| p.id() == id));
            match support {
                Some(platform) if self.bounding_box().left > platform.bounding_box().right => {
                    self.start_fall()
                }
                None => self.start_fall(),
                Some(_) if ctx.input.space => self.start_jump(),
                Some(_) => {}
            }
        }

        match self.state {
            UnicornState::Jumping => {
                self.jump_elapsed = (self.jump_elapsed + dt).min(self.jump_duration());
            }
            UnicornState::Falling => self.fall_elapsed += dt,
            UnicornState::Grounded | UnicornState::Dead => {}
        }

        let duration = self.jump_duration().max(f64::EPSILON);
        match self.state {
            UnicornState::Jumping => {
                let u = self.jump_elapsed / duration;
                self.core.y = self.jump_base_y - arc_height(u) * self.jump_height;
            }
            UnicornState::Falling => {
                let s = self.fall_elapsed / duration;
                self.core.y = self.fall_start_y + 4.0 * self.jump_height * s * s;
            }
            _ => {}
        }
        self.update_bounding_box();

        if matches!(self.state, UnicornState::Jumping | UnicornState::Falling) {
            if let Some(platform) = platforms.iter().find(|p| self.is_landing(p)) {
                self.land_on(platform);
            } else if self.state == UnicornState::Jumping && self.jump_elapsed >= self.jump_duration()
            {
                self.continue_fall_from_jump();
            }
        }

        if !colliding_indices(&*self, &platforms).is_empty() {
            self.die("hit a platform");
        } else if self.core.y > ctx.surface_height {
            self.die("fell off screen");
        }
    }

    pub fn draw(&mut self, surface: &mut dyn Surface, ctx: &FrameContext<'_>) -> RenderResult {
        let dt = if ctx.running { ctx.clock_tick } else { 0.0 };
        let animation = match self.state {
            UnicornState::Grounded => &mut self.run,
            UnicornState::Jumping => &mut self.jump,
            UnicornState::Falling | UnicornState::Dead => &mut self.fall,
        };
        animation.draw_frame(dt, surface, ctx.assets, self.core.x, self.core.y, UNICORN_SCALE)?;
        self.core.draw_outline(surface, ctx)
    }

    /// Back onto the first platform. Lives are kept.
    pub fn reset(&mut self) {
        self.core.y = self.start_y;
        self.prev_bottom = self.start_y + self.height;
        self.jump_elapsed = 0.0;
        self.fall_elapsed = 0.0;
        self.run.reset();
        self.jump.reset();
        self.fall.reset();
        self.update_bounding_box();
        match self.start_platform {
            Some(id) => {
                self.state = UnicornState::Grounded;
                self.platform = Some(id);
            }
            None => self.start_fall(),
        }
    }
}

impl Collidable for Unicorn {
    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.core.x, self.core.y, self.width, self.height)
    }
}
