// UI rendering for the demo
//
// Grid rows come from the container's grid directives; panels are painted
// in z-order with their current motion applied, and the controls row shows
// the navigation affordances.

use super::app::{App, PanelView};
use crate::layout::{controls_style, TrackSize};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

/// Lines reserved for the log strip
const LOG_LINES: u16 = 5;

/// Convert a grid track to a ratatui constraint
pub fn track_constraint(track: TrackSize) -> Constraint {
    match track {
        TrackSize::Auto => Constraint::Min(0),
        TrackSize::Fraction(n) => Constraint::Fill(n),
        TrackSize::Percent(p) => Constraint::Percentage(p),
        TrackSize::Fixed(n) => Constraint::Length(n),
    }
}

/// Regions of the container grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRegions {
    pub panels: Rect,
    pub controls: Option<Rect>,
}

/// Resolve the panel and controls areas inside `area`
pub fn grid_regions(app: &App, area: Rect) -> GridRegions {
    let tracks = app.grid.row_tracks();
    if tracks.is_empty() {
        return GridRegions {
            panels: area,
            controls: None,
        };
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(tracks.into_iter().map(track_constraint))
        .split(area);

    let row_area = |name: &str| app.grid.row_of(name).and_then(|row| rows.get(row).copied());

    let panel_area = app
        .panels
        .first()
        .map(|panel| panel.presenter.config().grid_area.clone())
        .unwrap_or_default();

    let controls_style = controls_style(&app.controls_area);
    let controls_name = controls_style.get("grid-area").unwrap_or_default();

    GridRegions {
        panels: row_area(&panel_area).unwrap_or(rows[0]),
        controls: row_area(controls_name),
    }
}

/// Draw the whole demo
pub fn draw(f: &mut Frame, app: &App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(LOG_LINES + 2),
            Constraint::Length(1),
        ])
        .split(f.area());

    let regions = grid_regions(app, chunks[0]);

    for panel in app.paint_order() {
        draw_panel(f, app, panel, regions.panels, now);
    }
    if let Some(controls) = regions.controls {
        draw_controls(f, app, controls);
    }
    draw_logs(f, app, chunks[1]);
    draw_status(f, app, chunks[2]);
}

fn draw_panel(f: &mut Frame, app: &App, panel: &PanelView, area: Rect, now: Instant) {
    let mut placed = area;
    let mut dim = false;
    for (motion, progress) in app.surface.motions(panel.presenter.element(), now) {
        let placement = motion.place(placed, progress);
        placed = placement.area;
        dim |= placement.dim;
    }
    if placed.width < 2 || placed.height < 2 {
        return;
    }

    let heading_moving = !app.surface.motions(panel.heading, now).is_empty();
    let heading_style = if heading_moving {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    };

    let mut body_style = Style::default();
    if dim {
        body_style = body_style.add_modifier(Modifier::DIM);
    }

    let classes = panel
        .rendered
        .class_attribute
        .clone()
        .unwrap_or_else(|| "-".to_string());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(panel.content.title.clone(), heading_style))
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", classes),
            Style::default().fg(Color::DarkGray),
        )))
        .border_style(body_style);

    let body = Paragraph::new(panel.content.body.as_str())
        .wrap(Wrap { trim: true })
        .style(body_style)
        .block(block);

    f.render_widget(Clear, placed);
    f.render_widget(body, placed);
}

fn draw_controls(f: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.snapshot();
    let enabled = |yes: bool| {
        if yes {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let line = Line::from(vec![
        Span::styled("← prev", enabled(snapshot.can_go_previous())),
        Span::raw(format!(
            "   {}/{}   ",
            snapshot.active_index + 1,
            snapshot.slot_count
        )),
        Span::styled("next →", enabled(snapshot.can_go_next())),
    ]);

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(controls, area);
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .log_buffer
        .recent(LOG_LINES as usize)
        .iter()
        .map(|entry| Line::from(entry.display_line()))
        .collect();

    let logs = Paragraph::new(lines)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL).title(" log "));
    f.render_widget(logs, area);
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.snapshot();
    let mut text = format!(
        " active={} prev={} animating={}",
        snapshot.active_index, snapshot.prev_active_index, snapshot.is_animating
    );
    if let Some(record) = app.last_completed {
        text.push_str(&format!(
            " | last {}->{} {}",
            record.from,
            record.to,
            record.direction.as_str()
        ));
    }
    text.push_str(" | ←/h prev  →/l next  q quit");

    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::Gray)),
        area,
    );
}
