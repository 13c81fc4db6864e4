//! SDL event translation
//!
//! Turns the window's event stream into engine [`InputEvent`]s. Escape and
//! closing the window end the session; everything the games do not read
//! is dropped here.

use crate::input_system::{InputEvent, Key, WheelEvent};
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Quit,
    Input(InputEvent),
}

fn key(keycode: Option<Keycode>) -> Key {
    match keycode {
        Some(Keycode::Space) => Key::Space,
        Some(Keycode::Escape) => Key::Escape,
        _ => Key::Other,
    }
}

pub fn translate(event: &Event) -> Option<HostEvent> {
    let input = match *event {
        Event::Quit { .. } => return Some(HostEvent::Quit),
        Event::KeyDown {
            keycode: Some(Keycode::Escape),
            ..
        } => return Some(HostEvent::Quit),
        // Held keys repeat; only the press counts.
        Event::KeyDown { repeat: true, .. } => return None,
        Event::KeyDown { keycode, .. } => InputEvent::KeyDown(key(keycode)),
        Event::KeyUp { keycode, .. } => InputEvent::KeyUp(key(keycode)),
        Event::MouseButtonDown {
            mouse_btn: MouseButton::Left,
            x,
            y,
            ..
        } => InputEvent::Click {
            x: x as f64,
            y: y as f64,
        },
        Event::MouseMotion { x, y, .. } => InputEvent::MouseMove {
            x: x as f64,
            y: y as f64,
        },
        Event::MouseWheel { x, y, .. } => InputEvent::Wheel(WheelEvent {
            delta_x: x as f64,
            delta_y: y as f64,
        }),
        Event::Window {
            win_event: WindowEvent::Leave,
            ..
        } => InputEvent::MouseLeave,
        _ => return None,
    };
    Some(HostEvent::Input(input))
}
