//! Game engine: entity collection, frame loop and per-frame context
//!
//! One frame, driven by the host once per display refresh:
//! 1. take a clamped step from the [`Timer`]
//! 2. snapshot input
//! 3. `update` every live entity, sweep out the ones flagged for removal,
//!    then add spawned entities and apply queued [`Commands`]
//! 4. `draw`: clear, save, draw every entity in order, optional callback,
//!    restore
//! 5. drop this frame's input edges
//!
//! The sweep and the commands run before any drawing, so a draw error can
//! fail the frame without ever leaving the collection half-modified.

use crate::asset_manager::AssetManager;
use crate::entity::{split_at_entity, Entity};
use crate::error::{EngineError, RenderResult};
use crate::input_system::{InputEvent, InputSnapshot, InputSystem, PointerMapping};
use crate::surface::{Rect, Surface};
use crate::timer::Timer;
use log::{debug, info};

/// Read-only state every hook sees for one frame.
pub struct FrameContext<'a> {
    /// Seconds simulated this frame, already clamped.
    pub clock_tick: f64,
    pub game_time: f64,
    pub input: &'a InputSnapshot,
    pub running: bool,
    pub show_outlines: bool,
    pub surface_width: f64,
    pub surface_height: f64,
    pub assets: &'a AssetManager,
}

/// Engine-level requests an entity can make during `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    StartRunning,
    StopRunning,
    /// Reset every entity and stop running.
    ResetWorld,
}

/// Outbox of [`Command`]s and spawned entities, applied after the update
/// sweep. Spawned entities join the end of the collection first, so a
/// `ResetWorld` queued in the same frame resets them too.
pub struct Commands<E> {
    queued: Vec<Command>,
    spawned: Vec<E>,
}

impl<E> Default for Commands<E> {
    fn default() -> Self {
        Commands {
            queued: Vec::new(),
            spawned: Vec::new(),
        }
    }
}

impl<E> Commands<E> {
    pub fn push(&mut self, command: Command) {
        self.queued.push(command);
    }

    pub fn start_running(&mut self) {
        self.push(Command::StartRunning);
    }

    pub fn stop_running(&mut self) {
        self.push(Command::StopRunning);
    }

    pub fn reset_world(&mut self) {
        self.push(Command::ResetWorld);
    }

    /// Add `entity` to the world once this frame's updates are done. It is
    /// drawn this frame and first updated on the next one.
    pub fn spawn(&mut self, entity: E) {
        self.spawned.push(entity);
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty() && self.spawned.is_empty()
    }
}

pub struct GameEngine<E: Entity> {
    entities: Vec<E>,
    assets: AssetManager,
    timer: Timer,
    input: InputSystem,
    snapshot: InputSnapshot,
    commands: Commands<E>,
    clock_tick: f64,
    running: bool,
    show_outlines: bool,
    surface_width: f64,
    surface_height: f64,
}

impl<E: Entity> GameEngine<E> {
    pub fn new(assets: AssetManager, timer: Timer, mapping: PointerMapping) -> Self {
        GameEngine {
            entities: Vec::new(),
            assets,
            timer,
            input: InputSystem::new(mapping),
            snapshot: InputSnapshot::default(),
            commands: Commands::default(),
            clock_tick: 0.0,
            running: false,
            show_outlines: false,
            surface_width: 0.0,
            surface_height: 0.0,
        }
    }

    /// Record the surface size the entities will see.
    pub fn init(&mut self, surface_width: f64, surface_height: f64) {
        self.surface_width = surface_width;
        self.surface_height = surface_height;
        info!("game initialized ({}x{})", surface_width, surface_height);
    }

    pub fn start(&mut self) {
        info!("starting game with {} entities", self.entities.len());
    }

    pub fn add_entity(&mut self, entity: E) {
        debug!("added entity #{}", self.entities.len());
        self.entities.push(entity);
    }

    pub fn entities(&self) -> &[E] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [E] {
        &mut self.entities
    }

    pub fn assets(&self) -> &AssetManager {
        &self.assets
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.snapshot
    }

    pub fn clock_tick(&self) -> f64 {
        self.clock_tick
    }

    pub fn game_time(&self) -> f64 {
        self.timer.game_time()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub fn set_show_outlines(&mut self, show: bool) {
        self.show_outlines = show;
    }

    /// One frame on the real clock.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> Result<(), EngineError> {
        self.clock_tick = self.timer.tick();
        self.run_frame(surface)
    }

    /// One frame with an explicit wall delta, for deterministic stepping.
    pub fn frame_with_delta(
        &mut self,
        surface: &mut dyn Surface,
        wall_delta: f64,
    ) -> Result<(), EngineError> {
        self.clock_tick = self.timer.advance(wall_delta);
        self.run_frame(surface)
    }

    fn run_frame(&mut self, surface: &mut dyn Surface) -> Result<(), EngineError> {
        self.snapshot = self.input.snapshot();
        self.update();
        let drawn = self.draw(surface);
        self.snapshot.clear_transient();
        drawn.map_err(EngineError::from)
    }

    /// Update every live entity, sweep removed ones, apply queued commands.
    pub fn update(&mut self) {
        let ctx = FrameContext {
            clock_tick: self.clock_tick,
            game_time: self.timer.game_time(),
            input: &self.snapshot,
            running: self.running,
            show_outlines: self.show_outlines,
            surface_width: self.surface_width,
            surface_height: self.surface_height,
            assets: &self.assets,
        };

        let count = self.entities.len();
        for index in 0..count {
            if self.entities[index].is_removed() {
                continue;
            }
            if let Some((entity, others)) = split_at_entity(&mut self.entities, index) {
                entity.update(&ctx, others, &mut self.commands);
            }
        }

        let before = self.entities.len();
        self.entities.retain(|entity| !entity.is_removed());
        if self.entities.len() != before {
            debug!("removed {} entities", before - self.entities.len());
        }

        self.apply_commands();
    }

    fn apply_commands(&mut self) {
        for entity in std::mem::take(&mut self.commands.spawned) {
            self.add_entity(entity);
        }

        for command in std::mem::take(&mut self.commands.queued) {
            match command {
                Command::StartRunning => {
                    info!("run started");
                    self.running = true;
                }
                Command::StopRunning => self.running = false,
                Command::ResetWorld => {
                    info!("resetting world");
                    self.running = false;
                    for entity in self.entities.iter_mut() {
                        entity.reset();
                    }
                }
            }
        }
    }

    pub fn draw(&mut self, surface: &mut dyn Surface) -> RenderResult {
        self.draw_with(surface, None)
    }

    /// Clear, draw every entity in order, then run `callback` on top.
    pub fn draw_with(
        &mut self,
        surface: &mut dyn Surface,
        callback: Option<&mut dyn FnMut(&mut dyn Surface, &FrameContext<'_>) -> RenderResult>,
    ) -> RenderResult {
        let ctx = FrameContext {
            clock_tick: self.clock_tick,
            game_time: self.timer.game_time(),
            input: &self.snapshot,
            running: self.running,
            show_outlines: self.show_outlines,
            surface_width: self.surface_width,
            surface_height: self.surface_height,
            assets: &self.assets,
        };

        surface.clear_rect(Rect::new(0.0, 0.0, surface.width(), surface.height()))?;
        surface.save();

        let mut result = Ok(());
        for index in 0..self.entities.len() {
            let Some((entity, others)) = split_at_entity(&mut self.entities, index) else {
                break;
            };
            result = entity.draw(surface, &ctx, others);
            if result.is_err() {
                break;
            }
        }
        if result.is_ok() {
            if let Some(callback) = callback {
                result = callback(surface, &ctx);
            }
        }

        surface.restore();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_manager::MemoryLoader;
    use crate::entity::{EntityCore, Neighbors};
    use crate::error::RenderError;
    use crate::surface::{Color, DrawCommand, DrawList};

    /// Counts its updates and flags itself for removal after `lifetime` of them.
    struct Tracker {
        core: EntityCore,
        id: u32,
        updates: u32,
        lifetime: Option<u32>,
        resets: u32,
        fail_draw: bool,
        request: Option<Command>,
        spawn: Option<u32>,
    }

    impl Tracker {
        fn new(id: u32) -> Self {
            Tracker {
                core: EntityCore::new(id as f64, 0.0),
                id,
                updates: 0,
                lifetime: None,
                resets: 0,
                fail_draw: false,
                request: None,
                spawn: None,
            }
        }
    }

    impl Entity for Tracker {
        fn core(&self) -> &EntityCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut EntityCore {
            &mut self.core
        }

        fn update(&mut self, _ctx: &FrameContext<'_>, _others: Neighbors<'_, Self>, commands: &mut Commands<Self>) {
            self.updates += 1;
            if Some(self.updates) == self.lifetime {
                self.core.remove_from_world = true;
            }
            if let Some(command) = self.request.take() {
                commands.push(command);
            }
            if let Some(id) = self.spawn.take() {
                commands.spawn(Tracker::new(id));
            }
        }

        fn draw(
            &mut self,
            surface: &mut dyn Surface,
            _ctx: &FrameContext<'_>,
            others: Neighbors<'_, Self>,
        ) -> RenderResult {
            if self.fail_draw {
                return Err(RenderError::Backend("boom".into()));
            }
            surface.fill_rect(
                Rect::new(self.id as f64, others.len() as f64, 1.0, 1.0),
                Color::WHITE,
            )
        }

        fn reset(&mut self) {
            self.resets += 1;
        }
    }

    fn engine() -> GameEngine<Tracker> {
        let mut engine = GameEngine::new(
            AssetManager::new(MemoryLoader::new()),
            Timer::new(),
            PointerMapping::Pixel,
        );
        engine.init(100.0, 100.0);
        engine
    }

    fn ids(engine: &GameEngine<Tracker>) -> Vec<u32> {
        engine.entities().iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_removed_entities_are_swept_in_order() {
        let mut engine = engine();
        for id in 0..5 {
            let mut tracker = Tracker::new(id);
            if id % 2 == 1 {
                tracker.lifetime = Some(1);
            }
            engine.add_entity(tracker);
        }

        let mut surface = DrawList::new(100.0, 100.0);
        engine.frame_with_delta(&mut surface, 0.016).unwrap();

        assert_eq!(ids(&engine), vec![0, 2, 4]);
    }

    #[test]
    fn test_flagged_entities_are_not_updated() {
        let mut engine = engine();
        let mut tracker = Tracker::new(0);
        tracker.core.remove_from_world = true;
        engine.add_entity(tracker);
        engine.add_entity(Tracker::new(1));

        engine.update();
        assert_eq!(ids(&engine), vec![1]);
        assert_eq!(engine.entities()[0].updates, 1);
    }

    #[test]
    fn test_draw_wraps_entities_in_clear_and_save() {
        let mut engine = engine();
        engine.add_entity(Tracker::new(0));
        engine.add_entity(Tracker::new(1));

        let mut surface = DrawList::new(100.0, 100.0);
        let mut called = false;
        let mut callback = |_: &mut dyn Surface, _: &FrameContext<'_>| -> RenderResult {
            called = true;
            Ok(())
        };
        engine.draw_with(&mut surface, Some(&mut callback)).unwrap();

        assert!(called);
        assert_eq!(surface.save_depth(), 0);
        assert!(matches!(surface.commands[0], DrawCommand::Clear(_)));
        assert_eq!(surface.commands.len(), 3);
    }

    #[test]
    fn test_draw_error_fails_frame_but_keeps_entities() {
        let mut engine = engine();
        let mut tracker = Tracker::new(0);
        tracker.fail_draw = true;
        engine.add_entity(tracker);
        engine.add_entity(Tracker::new(1));

        let mut surface = DrawList::new(100.0, 100.0);
        let result = engine.frame_with_delta(&mut surface, 0.016);

        assert!(matches!(result, Err(EngineError::Render(_))));
        assert_eq!(ids(&engine), vec![0, 1]);
        assert_eq!(surface.save_depth(), 0);
    }

    #[test]
    fn test_commands_apply_after_update() {
        let mut engine = engine();
        let mut tracker = Tracker::new(0);
        tracker.request = Some(Command::StartRunning);
        engine.add_entity(tracker);
        engine.add_entity(Tracker::new(1));

        engine.update();
        assert!(engine.is_running());

        engine.entities_mut()[1].request = Some(Command::ResetWorld);
        engine.update();
        assert!(!engine.is_running());
        assert!(engine.entities().iter().all(|p| p.resets == 1));
    }

    #[test]
    fn test_spawned_entities_join_after_sweep() {
        let mut engine = engine();
        let mut parent = Tracker::new(0);
        parent.lifetime = Some(1);
        parent.spawn = Some(7);
        engine.add_entity(parent);
        engine.add_entity(Tracker::new(1));

        let mut surface = DrawList::new(100.0, 100.0);
        engine.frame_with_delta(&mut surface, 0.016).unwrap();

        assert_eq!(ids(&engine), vec![1, 7]);
        // Not updated in the frame that spawned it, but drawn
        assert_eq!(engine.entities()[1].updates, 0);
        assert_eq!(surface.commands.len(), 3);

        engine.update();
        assert_eq!(engine.entities()[1].updates, 1);
    }

    #[test]
    fn test_reset_in_spawn_frame_covers_spawned() {
        let mut engine = engine();
        let mut tracker = Tracker::new(0);
        tracker.spawn = Some(3);
        tracker.request = Some(Command::ResetWorld);
        engine.add_entity(tracker);

        engine.update();
        assert_eq!(ids(&engine), vec![0, 3]);
        assert!(engine.entities().iter().all(|p| p.resets == 1));
    }

    #[test]
    fn test_clock_tick_is_clamped() {
        let mut engine = engine();
        let mut surface = DrawList::new(100.0, 100.0);
        engine.frame_with_delta(&mut surface, 2.0).unwrap();
        assert_eq!(engine.clock_tick(), 0.05);
    }

    #[test]
    fn test_input_edges_cleared_after_frame() {
        let mut engine = engine();
        engine.push_input(InputEvent::Click { x: 3.0, y: 4.0 });
        engine.push_input(InputEvent::MouseMove { x: 5.0, y: 6.0 });

        let mut surface = DrawList::new(100.0, 100.0);
        engine.frame_with_delta(&mut surface, 0.016).unwrap();

        assert!(engine.input().click.is_none());
        assert!(engine.input().mouse.is_some());
    }
}
