use crate::collision::{BoundingBox, Collidable};
use crate::config::PlatformSpec;
use crate::engine::FrameContext;
use crate::entity::EntityCore;
use crate::error::RenderResult;
use crate::runner::layout::{PLATFORM_BOTTOM, PLATFORM_TOP};
use crate::surface::{Color, LinearGradient, Surface};

/// A ledge that scrolls left while the run is on and wraps around the world.
#[derive(Debug, Clone)]
pub struct Platform {
    core: EntityCore,
    id: usize,
    width: f64,
    height: f64,
    start_x: f64,
    start_y: f64,
    scroll_speed: f64,
    world_length: f64,
}

impl Platform {
    pub fn new(id: usize, spec: &PlatformSpec, scroll_speed: f64, world_length: f64) -> Self {
        let mut core = EntityCore::new(spec.x, spec.y);
        core.bounding_box = Some(BoundingBox::new(spec.x, spec.y, spec.width, spec.height));
        Platform {
            core,
            id,
            width: spec.width,
            height: spec.height,
            start_x: spec.x,
            start_y: spec.y,
            scroll_speed,
            world_length,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn core(&self) -> &EntityCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    pub fn x(&self) -> f64 {
        self.core.x
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    fn update_bounding_box(&mut self) {
        self.core.bounding_box = Some(BoundingBox::new(
            self.core.x,
            self.core.y,
            self.width,
            self.height,
        ));
    }

    pub fn update(&mut self, ctx: &FrameContext<'_>) {
        if !ctx.running {
            return;
        }
        self.core.x -= self.scroll_speed * ctx.clock_tick;
        if self.core.x + self.width < 0.0 {
            self.core.x += self.world_length;
        }
        self.update_bounding_box();
    }

    pub fn draw(&self, surface: &mut dyn Surface, ctx: &FrameContext<'_>) -> RenderResult {
        let bounds = self.bounding_box();
        let gradient =
            LinearGradient::vertical(bounds.top, bounds.bottom, PLATFORM_TOP, PLATFORM_BOTTOM);
        surface.fill_gradient(bounds.to_rect(), &gradient)?;

        if ctx.show_outlines {
            surface.stroke_rect(bounds.to_rect(), Color::GREEN)?;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.core.x = self.start_x;
        self.core.y = self.start_y;
        self.update_bounding_box();
    }
}

impl Collidable for Platform {
    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.core.x, self.core.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_manager::{AssetManager, MemoryLoader};
    use crate::input_system::InputSnapshot;
    use crate::surface::{DrawCommand, DrawList, Rect};

    fn spec(x: f64) -> PlatformSpec {
        PlatformSpec {
            x,
            y: 560.0,
            width: 1800.0,
            height: 60.0,
        }
    }

    fn tick(platform: &mut Platform, running: bool, dt: f64) {
        let assets = AssetManager::new(MemoryLoader::new());
        let input = InputSnapshot::default();
        let ctx = FrameContext {
            clock_tick: dt,
            game_time: 0.0,
            input: &input,
            running,
            show_outlines: false,
            surface_width: 1200.0,
            surface_height: 700.0,
            assets: &assets,
        };
        platform.update(&ctx);
    }

    #[test]
    fn test_scrolls_only_while_running() {
        let mut platform = Platform::new(0, &spec(100.0), 400.0, 3200.0);
        tick(&mut platform, false, 0.05);
        assert_eq!(platform.x(), 100.0);

        tick(&mut platform, true, 0.05);
        assert!((platform.x() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_wraps_by_world_length_once_off_screen() {
        let mut platform = Platform::new(0, &spec(0.0), 400.0, 3200.0);

        for _ in 0..90 {
            tick(&mut platform, true, 0.05);
        }
        // Right edge exactly at 0 is still on screen.
        assert!((platform.x() + 1800.0).abs() < 1e-6);

        tick(&mut platform, true, 0.05);
        assert!((platform.x() - 1380.0).abs() < 1e-6);
    }

    #[test]
    fn test_bounding_box_follows_scroll() {
        let mut platform = Platform::new(0, &spec(500.0), 400.0, 3200.0);
        tick(&mut platform, true, 0.05);

        let stored = platform.core().bounding_box.unwrap();
        assert_eq!(stored, platform.bounding_box());
        assert!((stored.left - 480.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_restores_placement() {
        let mut platform = Platform::new(2, &spec(2000.0), 400.0, 3200.0);
        for _ in 0..10 {
            tick(&mut platform, true, 0.05);
        }
        platform.reset();

        assert_eq!(platform.x(), 2000.0);
        assert_eq!(platform.core().bounding_box.unwrap().left, 2000.0);
    }

    #[test]
    fn test_draws_vertical_gradient() {
        let platform = Platform::new(0, &spec(10.0), 400.0, 3200.0);
        let assets = AssetManager::new(MemoryLoader::new());
        let input = InputSnapshot::default();
        let ctx = FrameContext {
            clock_tick: 0.0,
            game_time: 0.0,
            input: &input,
            running: false,
            show_outlines: false,
            surface_width: 1200.0,
            surface_height: 700.0,
            assets: &assets,
        };
        let mut surface = DrawList::new(1200.0, 700.0);
        platform.draw(&mut surface, &ctx).unwrap();

        match &surface.commands[..] {
            [DrawCommand::Gradient { rect, gradient }] => {
                assert_eq!(*rect, Rect::new(10.0, 560.0, 1800.0, 60.0));
                assert_eq!(gradient.color_at(0.0), PLATFORM_TOP);
                assert_eq!(gradient.color_at(1.0), PLATFORM_BOTTOM);
            }
            other => panic!("unexpected commands {:?}", other),
        }
    }
}
