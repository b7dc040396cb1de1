use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::engine::{AudioPlayerEngine, EngineCmd, EngineSnapshot, PlaybackState};
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// Main terminal event loop: draws frames, feeds the visualizer, relays
/// MPRIS commands, and translates key presses into engine commands.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    engine: &AudioPlayerEngine,
    mut visualizer: crate::visualizer::Visualizer,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot_handle = engine.snapshot_handle();
    let analyser = engine.analyser_handle();

    let mut last_mpris: (PlaybackState, Option<usize>) = (PlaybackState::Idle, None);

    loop {
        let snapshot = snapshot_handle
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default();
        app.clamp_selection(snapshot.rows.len());

        // The visualizer reads bins straight from the analyser; a poisoned
        // lock or empty ring degrades to a silent frame.
        let visual = visualizer.tick(Instant::now(), snapshot.is_playing(), |bins| {
            analyser
                .lock()
                .map(|mut a| a.frequency_data(bins))
                .unwrap_or(false)
        });

        terminal.draw(|f| {
            ui::draw(f, app, &snapshot, &visual, &settings.ui, &settings.controls)
        })?;

        // Keep MPRIS in sync even when changes come from auto-advance.
        let mpris_now = (snapshot.state, snapshot.current);
        if mpris_now != last_mpris {
            update_mpris(mpris, &snapshot);
            last_mpris = mpris_now;
        }

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, engine) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, engine, &snapshot, &mut visualizer) {
                    return Ok(());
                }
            }
        }
    }
}

/// Relay a remote-control command to the engine. Returns `true` on quit.
fn handle_control_cmd(cmd: ControlCmd, engine: &AudioPlayerEngine) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => engine.send(EngineCmd::Play),
        ControlCmd::Pause => engine.send(EngineCmd::Pause),
        ControlCmd::PlayPause => engine.send(EngineCmd::TogglePause),
        ControlCmd::Stop => engine.send(EngineCmd::Stop),
        ControlCmd::Next => engine.send(EngineCmd::Next),
        ControlCmd::Prev => engine.send(EngineCmd::Prev),
    }
    false
}

/// Translate a key press into engine commands or UI state changes.
/// Returns `true` on quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    engine: &AudioPlayerEngine,
    snapshot: &EngineSnapshot,
    visualizer: &mut crate::visualizer::Visualizer,
) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char(' ') | KeyCode::Char('p') => engine.send(EngineCmd::TogglePause),
        KeyCode::Enter => {
            if !snapshot.rows.is_empty() {
                engine.send(EngineCmd::PlayIndex(app.selected));
            }
        }
        KeyCode::Char('j') | KeyCode::Down => app.select_next(snapshot.rows.len()),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(snapshot.rows.len()),
        KeyCode::Char('h') => engine.send(EngineCmd::Prev),
        KeyCode::Char('l') => engine.send(EngineCmd::Next),
        KeyCode::Char('s') => engine.send(EngineCmd::Shuffle),
        KeyCode::Char('d') => {
            if !snapshot.rows.is_empty() {
                engine.send(EngineCmd::RemoveTrack(app.selected));
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            engine.send(EngineCmd::SetVolume(
                snapshot.volume + settings.controls.volume_step,
            ));
        }
        KeyCode::Char('-') => {
            engine.send(EngineCmd::SetVolume(
                snapshot.volume - settings.controls.volume_step,
            ));
        }
        KeyCode::Left => {
            if let Some(fraction) = seek_fraction(snapshot, -(settings.controls.seek_step_secs as f64)) {
                engine.send(EngineCmd::SeekTo(fraction));
            }
        }
        KeyCode::Right => {
            if let Some(fraction) = seek_fraction(snapshot, settings.controls.seek_step_secs as f64) {
                engine.send(EngineCmd::SeekTo(fraction));
            }
        }
        KeyCode::Char('t') => {
            let mode = app.toggle_theme();
            visualizer.set_theme(mode);
        }
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
    false
}

/// Target position as a fraction of the current track after stepping
/// `step_secs` from the elapsed time. `None` while the duration is unknown.
fn seek_fraction(snapshot: &EngineSnapshot, step_secs: f64) -> Option<f32> {
    let total = snapshot.duration.filter(|d| !d.is_zero())?.as_secs_f64();
    let target = (snapshot.elapsed.as_secs_f64() + step_secs).clamp(0.0, total);
    Some((target / total) as f32)
}
