use anyhow::{Context, Result};
use arcade_shell::asset_manager::{AssetManager, FileLoader};
use arcade_shell::config::GameConfig;
use arcade_shell::host::{self, SdlSurface};
use arcade_shell::{go, runner};
use clap::{Parser, ValueEnum};
use log::info;
use sdl2::image::InitFlag;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Game {
    /// 19x19 Go for two players at one mouse
    Go,
    /// Jump between scrolling platforms
    Runner,
}

#[derive(Parser)]
#[command(name = "arcade_shell")]
#[command(about = "Go and an endless runner on a small 2D game runtime")]
#[command(version)]
struct Cli {
    /// Game to play
    #[arg(value_enum)]
    game: Game,

    /// Config file (default: per-user config.json, then built-in values)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the ./img/... asset ids are resolved against
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Draw entity outlines and bounding boxes
    #[arg(long)]
    outlines: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path).context("loading config")?,
        None => GameConfig::discover(),
    };
    if let Some(root) = cli.assets {
        config.assets.root = root;
    }
    if cli.outlines {
        config.engine.show_outlines = true;
    }

    let mut assets = AssetManager::new(FileLoader::new(&config.assets.root));
    match cli.game {
        Game::Go => go::queue_assets(&mut assets),
        Game::Runner => runner::queue_assets(&mut assets),
    }
    assets
        .download_all(|assets| {
            info!(
                "assets ready: {} loaded, {} failed",
                assets.success_count(),
                assets.error_count()
            )
        })
        .await;

    let (title, width, height) = match cli.game {
        Game::Go => ("Go", config.go.surface_width, config.go.surface_height),
        Game::Runner => (
            "Unicorn Run",
            config.runner.surface_width,
            config.runner.surface_height,
        ),
    };

    let sdl_context = sdl2::init().map_err(anyhow::Error::msg)?;
    let video_subsystem = sdl_context.video().map_err(anyhow::Error::msg)?;
    let _image_context =
        sdl2::image::init(InitFlag::PNG | InitFlag::JPG).map_err(anyhow::Error::msg)?;

    let window = video_subsystem
        .window(title, width, height)
        .position_centered()
        .build()?;
    let canvas = window.into_canvas().build()?;
    let texture_creator = canvas.texture_creator();
    let mut surface = SdlSurface::new(canvas, &texture_creator, width, height)?;
    let mut event_pump = sdl_context.event_pump().map_err(anyhow::Error::msg)?;

    let target_fps = config.engine.target_fps;
    match cli.game {
        Game::Go => {
            let mut engine = go::new_game(assets, &config);
            host::run(&mut engine, &mut surface, &mut event_pump, target_fps)?;
        }
        Game::Runner => {
            let mut engine = runner::new_game(assets, &config);
            host::run(&mut engine, &mut surface, &mut event_pump, target_fps)?;
        }
    }

    Ok(())
}
