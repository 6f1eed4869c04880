use std::fs::File;
use std::panic;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{debug, info};
use simplelog::{Config, LevelFilter, WriteLogger};
use terminal_caterpillar::app;
use terminal_caterpillar::audio::{AudioCue, Mute, RodioCue, TerminalBell};
use terminal_caterpillar::config::{BACKGROUND, Difficulty, Playfield};
use terminal_caterpillar::game::Game;
use terminal_caterpillar::input::{KeyBindings, TerminalInput};
use terminal_caterpillar::scheduler::SystemClock;
use terminal_caterpillar::settings::{Settings, load_settings};
use terminal_caterpillar::surface::RenderSurface;
use terminal_caterpillar::terminal_runtime::{
    TerminalSession, TerminalSurface, cleanup_terminal_best_effort,
};
use terminal_caterpillar::{Error, Result};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Difficulty selected at startup.
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Playfield width in world units.
    #[arg(long)]
    width: Option<f64>,

    /// Playfield height in world units.
    #[arg(long)]
    height: Option<f64>,

    /// Delay between simulation ticks in milliseconds.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Disable all sound cues.
    #[arg(long)]
    mute: bool,

    /// Sound file played whenever a leaf appears.
    #[arg(long)]
    sound: Option<PathBuf>,

    /// Settings file; defaults to the per-user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a debug log to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path)?;
    }

    let settings = apply_overrides(load_settings(cli.config.as_deref())?, &cli);
    settings.validate()?;
    info!("starting with {settings:?}");

    install_panic_hook();
    run(&settings)
}

fn run(settings: &Settings) -> Result<()> {
    let mut surface = TerminalSurface::new(TerminalSession::enter()?);
    surface.create_window(settings.window_width, settings.window_height, BACKGROUND)?;

    let playfield = Playfield::from(surface.get_window_dimensions());
    let mut game = Game::new(playfield, settings.difficulty)
        .with_audio(audio_for(settings), settings.sound.file.clone());
    let mut input = TerminalInput::new(KeyBindings::default());

    app::run(
        &mut game,
        &mut surface,
        &mut input,
        &SystemClock,
        settings.tick_interval(),
    )?;

    info!("exiting with high score {}", game.state.high_score);
    Ok(())
}

fn apply_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(difficulty) = cli.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(width) = cli.width {
        settings.window_width = width;
    }
    if let Some(height) = cli.height {
        settings.window_height = height;
    }
    if let Some(tick_ms) = cli.tick_ms {
        settings.tick_interval_ms = tick_ms;
    }
    if let Some(sound) = &cli.sound {
        settings.sound.file = sound.clone();
    }
    if cli.mute {
        settings.sound.enabled = false;
    }
    settings
}

fn audio_for(settings: &Settings) -> Box<dyn AudioCue> {
    if !settings.sound.enabled {
        return Box::new(Mute);
    }

    match RodioCue::try_default() {
        Ok(cue) => Box::new(cue),
        Err(error) => {
            debug!("no audio output, using terminal bell: {error}");
            Box::new(TerminalBell)
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    if let Err(error) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
        eprintln!("Failed to install logger: {error}");
    }
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}
