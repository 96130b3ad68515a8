//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`,
//! plus the pane layout shared with mouse hit-testing.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::UiSettings;
use crate::wave::Surface;

/// Intensity ramp for waveform cells, dark to bright.
const RAMP: [char; 6] = [' ', '·', ':', '+', '#', '@'];

const CONTROLS: &str = "[space] play/pause | [j/k] move | [enter] play | [h/l] prev/next \
| [s] shuffle | [m] mute | [9/0] vol -/+ | [,/.] seek | [q] quit";

/// The screen regions, computed once per frame and reused by the mouse
/// handler to map clicks back onto widgets.
pub struct Panes {
    pub header: Rect,
    pub status: Rect,
    pub wave: Rect,
    pub progress: Rect,
    pub volume: Rect,
    pub list: Rect,
    pub footer: Rect,
}

pub fn panes(area: Rect) -> Panes {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(10),
            Constraint::Length(3),
        ])
        .split(area);

    let bars = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(18)])
        .split(rows[3]);

    Panes {
        header: rows[0],
        status: rows[1],
        wave: rows[2],
        progress: bars[0],
        volume: bars[1],
        list: rows[4],
        footer: rows[5],
    }
}

/// Format seconds as `m:ss`. Degenerate values render as the zero clock.
pub fn format_clock(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    let s = secs.floor() as u64;
    format!("{}:{:02}", s / 60, s % 60)
}

/// Format seconds as `h:mm:ss`, dropping the hours field when zero.
pub fn format_clock_long(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "0:00".to_string();
    }
    let s = secs.floor() as u64;
    let (h, m, sec) = (s / 3600, (s % 3600) / 60, s % 60);
    if h > 0 {
        format!("{h}:{m:02}:{sec:02}")
    } else {
        format!("{m}:{sec:02}")
    }
}

fn status_text(app: &App) -> String {
    let mut parts: Vec<String> = Vec::new();

    let info = &app.info;
    if let Some(name) = app.current_track_name() {
        let state = if info.playing {
            "Playing"
        } else if info.bound {
            "Paused"
        } else {
            "Stopped"
        };
        let elapsed = format_clock(info.elapsed.as_secs_f64());
        let duration = info
            .duration
            .map(|d| format_clock(d.as_secs_f64()))
            .unwrap_or_else(|| "-:--".to_string());
        parts.push(format!("{state}: {name} [{elapsed}/{duration}]"));
    } else {
        parts.push("No tracks".to_string());
    }

    if let Some(total) = app.total_secs {
        parts.push(format!("TOTAL {}", format_clock_long(total as f64)));
    }
    if info.shuffle {
        parts.push("Shuffle: ON".to_string());
    }
    if info.muted {
        parts.push("MUTED".to_string());
    }
    parts.push(format!("Src: {}", app.source_label));

    parts.join(" • ")
}

fn wave_lines(surface: &Surface) -> Vec<Line<'static>> {
    let (w, h) = (surface.width(), surface.height());
    let mut lines = Vec::with_capacity(h);
    for y in 0..h {
        let mut row = String::with_capacity(w);
        for x in 0..w {
            let v = surface.cell(x, y).clamp(0.0, 1.0);
            let idx = ((v * (RAMP.len() - 1) as f32).round() as usize).min(RAMP.len() - 1);
            row.push(RAMP[idx]);
        }
        lines.push(Line::from(row));
    }
    lines
}

/// Render the entire UI into the provided `frame` using `app` state.
pub fn draw(frame: &mut Frame, app: &mut App, ui_settings: &UiSettings) {
    let panes = panes(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ghostwave ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, panes.header);

    let status = Paragraph::new(status_text(app))
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
    frame.render_widget(status, panes.status);

    // Waveform. The surface tracks the inner pane size so a terminal
    // resize reshapes (and clears) the trace.
    {
        let block = Block::default().borders(Borders::ALL).title(" wave ");
        let inner = block.inner(panes.wave);
        app.surface
            .resize(inner.width as usize, inner.height as usize);
        let wave = Paragraph::new(wave_lines(&app.surface))
            .style(Style::default().fg(Color::LightGreen))
            .block(block);
        frame.render_widget(wave, panes.wave);
    }

    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" position "))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio(app.info.progress())
        .label(format_clock(app.info.elapsed.as_secs_f64()));
    frame.render_widget(progress, panes.progress);

    let vol_icon = if app.info.muted { "x" } else { "%" };
    let volume = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" vol "))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(app.info.volume.clamp(0.0, 1.0) as f64)
        .label(format!("{:.0}{vol_icon}", app.info.volume * 100.0));
    frame.render_widget(volume, panes.volume);

    let items: Vec<ListItem> = app
        .tracks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let marker = if i == app.info.current && app.info.bound {
                ">"
            } else {
                " "
            };
            ListItem::new(format!("{marker} {:>3}  {}", i + 1, t.name))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, panes.list, &mut app.list_state);

    let footer = Paragraph::new(CONTROLS)
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
    frame.render_widget(footer, panes.footer);
}

/// Map a click column inside a bordered gauge to a 0..=1 fraction.
fn gauge_fraction(pane: Rect, column: u16, row: u16) -> Option<f64> {
    let inner_x = pane.x + 1;
    let inner_w = pane.width.saturating_sub(2);
    if inner_w == 0 || row < pane.y || row >= pane.y + pane.height {
        return None;
    }
    if column < inner_x || column >= inner_x + inner_w {
        return None;
    }
    Some(f64::from(column - inner_x + 1) / f64::from(inner_w))
}

pub fn progress_fraction_at(panes: &Panes, column: u16, row: u16) -> Option<f64> {
    gauge_fraction(panes.progress, column, row)
}

pub fn volume_fraction_at(panes: &Panes, column: u16, row: u16) -> Option<f64> {
    gauge_fraction(panes.volume, column, row)
}

/// Map a click row inside the track list back to a playlist index, given
/// the list's current scroll offset.
pub fn list_index_at(panes: &Panes, offset: usize, column: u16, row: u16) -> Option<usize> {
    let pane = panes.list;
    let inner_y = pane.y + 1;
    let inner_h = pane.height.saturating_sub(2);
    if inner_h == 0 || row < inner_y || row >= inner_y + inner_h {
        return None;
    }
    if column < pane.x || column >= pane.x + pane.width {
        return None;
    }
    Some(offset + usize::from(row - inner_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_renders_minutes_and_padded_seconds() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(65.0), "1:05");
        assert_eq!(format_clock(59.9), "0:59");
        assert_eq!(format_clock(600.0), "10:00");
    }

    #[test]
    fn degenerate_clock_values_render_as_zero() {
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
        assert_eq!(format_clock(-3.0), "0:00");
    }

    #[test]
    fn long_clock_shows_hours_only_when_needed() {
        assert_eq!(format_clock_long(3661.0), "1:01:01");
        assert_eq!(format_clock_long(61.0), "1:01");
        assert_eq!(format_clock_long(0.4), "0:00");
    }

    #[test]
    fn gauge_clicks_map_to_fractions() {
        let pane = Rect::new(0, 10, 12, 3);
        // Inner strip is columns 1..11, ten cells wide.
        assert_eq!(gauge_fraction(pane, 1, 11), Some(0.1));
        assert_eq!(gauge_fraction(pane, 10, 11), Some(1.0));
        assert_eq!(gauge_fraction(pane, 0, 11), None);
        assert_eq!(gauge_fraction(pane, 11, 11), None);
        assert_eq!(gauge_fraction(pane, 5, 20), None);
    }

    #[test]
    fn list_clicks_map_through_the_scroll_offset() {
        let panes = panes(Rect::new(0, 0, 80, 30));
        let pane = panes.list;
        assert_eq!(
            list_index_at(&panes, 0, pane.x + 2, pane.y + 1),
            Some(0)
        );
        assert_eq!(
            list_index_at(&panes, 3, pane.x + 2, pane.y + 2),
            Some(4)
        );
        // Border rows are dead zones.
        assert_eq!(list_index_at(&panes, 0, pane.x + 2, pane.y), None);
    }
}
