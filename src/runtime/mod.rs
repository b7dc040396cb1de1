use std::env;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config::ThemeSetting;
use crate::engine::AudioPlayerEngine;
use crate::mpris::ControlCmd;
use crate::visualizer::{ThemeMode, Visualizer, detect_terminal_theme};

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let (tracks, local_files) =
        startup::collect_initial_tracks(env::args().skip(1), &settings.library);

    // With nothing to play, look for a bundled default asset before giving
    // up; the engine reports "No audio files found" if that fails too.
    let tracks = if tracks.is_empty() && local_files.is_empty() {
        startup::probe_fallback(&settings).into_iter().collect()
    } else {
        tracks
    };

    let engine = AudioPlayerEngine::new(tracks, &settings.audio, &settings.library);
    if !local_files.is_empty() {
        engine.add_local_files(local_files);
    }

    let theme = match settings.visualizer.theme {
        ThemeSetting::Light => ThemeMode::Light,
        ThemeSetting::Dark => ThemeMode::Dark,
        ThemeSetting::Auto => detect_terminal_theme(),
    };
    let visualizer = Visualizer::new(
        theme,
        Duration::from_millis(settings.visualizer.poll_ms),
        settings.visualizer.smoothing,
        settings.visualizer.enabled,
    );
    let mut app = App::new(theme);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &engine,
        visualizer,
        &mpris,
        &control_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    engine.shutdown();
    run_result
}
