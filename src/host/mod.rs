//! SDL2 window host: event pump, canvas surface, frame pacing.

pub mod events;
pub mod sdl_surface;

pub use events::{translate, HostEvent};
pub use sdl_surface::SdlSurface;

use crate::engine::GameEngine;
use crate::entity::Entity;
use crate::error::EngineError;
use log::{error, info};
use sdl2::EventPump;
use std::time::{Duration, Instant};

/// Pump events, run one engine frame and present, until the window closes.
pub fn run<E: Entity>(
    engine: &mut GameEngine<E>,
    surface: &mut SdlSurface<'_>,
    event_pump: &mut EventPump,
    target_fps: u32,
) -> Result<(), EngineError> {
    let frame_budget = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
    engine.start();

    'running: loop {
        let frame_start = Instant::now();

        for event in event_pump.poll_iter() {
            match translate(&event) {
                Some(HostEvent::Quit) => break 'running,
                Some(HostEvent::Input(input)) => engine.push_input(input),
                None => {}
            }
        }

        if let Err(err) = engine.frame(surface) {
            error!("frame failed: {}", err);
            return Err(err);
        }
        surface.present();

        if let Some(remaining) = frame_budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    info!("window closed after {:.1}s of game time", engine.game_time());
    Ok(())
}
