//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the TUI using `ratatui`, with the audio-reactive
//! backdrop applied as a background color behind every widget.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};
use crate::engine::{EngineSnapshot, PlaybackState};
use crate::library::TrackOrigin;
use crate::visualizer::VisualFrame;

/// Render the controls help text, incorporating the configured seek step.
fn controls_text(seek_step_secs: u64) -> String {
    [
        "[j/k] up/down".to_string(),
        "[enter] play selected".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[\u{2190}/\u{2192}] seek -/+{}s", seek_step_secs),
        "[s] shuffle".to_string(),
        "[d] remove".to_string(),
        "[-/+] volume".to_string(),
        "[t] theme".to_string(),
        "[?] help".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn state_text(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "Stopped",
        PlaybackState::Loading => "Loading...",
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Error => "Error",
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    snapshot: &EngineSnapshot,
    visual: &VisualFrame,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    // Reactive backdrop behind everything else.
    let (r, g, b) = visual.rgb();
    let backdrop = Style::default().bg(Color::Rgb(r, g, b));
    frame.render_widget(Block::default().style(backdrop), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .style(backdrop)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" resono ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box: current track, transport state, volume, status text.
    let status = {
        let mut parts: Vec<String> = Vec::new();

        match snapshot.current_row() {
            Some(row) => parts.push(format!("Song: {}", row.display)),
            None => parts.push("No track".to_string()),
        }
        parts.push(state_text(snapshot.state).to_string());
        parts.push(format!("Vol: {:3.0}%", snapshot.volume * 100.0));
        if let Some(msg) = &snapshot.status {
            parts.push(msg.clone());
        }

        parts.join(" \u{2022} ")
    };

    let status_par = Paragraph::new(status)
        .style(backdrop)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Progress gauge
    {
        let (ratio, label) = match snapshot.duration {
            Some(total) if !total.is_zero() => {
                let elapsed = snapshot.elapsed.min(total);
                (
                    elapsed.as_secs_f64() / total.as_secs_f64(),
                    format!("{} / {}", format_mmss(elapsed), format_mmss(total)),
                )
            }
            _ => (0.0, format!("{} / --:--", format_mmss(snapshot.elapsed))),
        };

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" progress "))
            .style(backdrop)
            .gauge_style(Style::default().fg(Color::Rgb(r, g, b)).bg(Color::Black))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(label);
        frame.render_widget(gauge, chunks[2]);
    }

    // Playlist
    {
        let items: Vec<ListItem> = snapshot
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let cursor = if snapshot.current == Some(i) {
                    "\u{25b6} "
                } else {
                    "  "
                };
                let origin = match row.origin {
                    TrackOrigin::Default => "",
                    TrackOrigin::Local => " [local]",
                };
                let time = row
                    .duration
                    .map(|d| format!(" ({})", format_mmss(d)))
                    .unwrap_or_default();
                ListItem::new(format!("{cursor}{}{origin}{time}", row.display))
            })
            .collect();

        let list = List::new(items)
            .style(backdrop)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if !snapshot.rows.is_empty() {
            state.select(Some(app.selected.min(snapshot.rows.len() - 1)));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    // Help popup (keeps list visible under it)
    if app.show_help {
        let popup_area = centered_rect_sized(60, 9, chunks[3]);
        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(
            "enter: play selected\nspace/p: play or pause\nh/l: previous/next track\n\
             left/right: seek\ns: shuffle, d: remove track\n-/+: volume, t: theme\nq: quit",
        )
        .block(
            Block::default()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .borders(Borders::ALL)
                .title(" help (? closes) "),
        )
        .wrap(Wrap { trim: true });
        frame.render_widget(help, popup_area);
    }

    let footer = Paragraph::new(controls_text(controls_settings.seek_step_secs))
        .style(backdrop)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}
