//! A small 2D game runtime and the two games built on it: Go and an
//! endless runner.
//!
//! The runtime is host independent. A host pushes [`input_system::InputEvent`]s
//! into a [`engine::GameEngine`], calls `frame` once per display refresh and
//! hands it a [`surface::Surface`] to draw on. The `sdl` feature provides
//! such a host on an SDL2 window.

pub mod animation;
pub mod asset_manager;
pub mod collision;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod font;
pub mod go;
pub mod input_system;
pub mod runner;
pub mod sprite;
pub mod surface;
pub mod timer;

#[cfg(feature = "sdl")]
pub mod host;
