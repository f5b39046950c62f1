//! Dashboard screen: KPIs, status line, spot grid and tooltip panel

use super::header;
use crate::app::AppState;
use crate::presenter::{DashboardView, GRID_COLUMNS, SpotCell};
use crate::theme::{Styles, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Width of one grid cell including its right gap
const CELL_WIDTH: u16 = 6;

pub fn render_dashboard_in_area(f: &mut Frame, state: &AppState, view: &DashboardView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // KPIs
            Constraint::Length(3), // Status line
            Constraint::Min(4),    // Map + details
        ])
        .split(area);

    header::render_title(f, chunks[0], "SmartPark - Parking Lot Dashboard");
    render_kpis(f, view, chunks[1]);
    render_status(f, view, chunks[2]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(GRID_COLUMNS as u16 * CELL_WIDTH + 2),
            Constraint::Min(20),
        ])
        .split(chunks[3]);

    render_parking_map(f, state, view, body[0]);
    render_spot_details(f, state, view, body[1]);
}

fn render_kpis(f: &mut Frame, view: &DashboardView, area: Rect) {
    let boxes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let figures = [
        ("Total capacity", view.total_capacity.as_str()),
        ("Occupied", view.occupied_spots.as_str()),
        ("Available", view.available_spots.as_str()),
        ("Occupancy rate", view.occupancy_rate.as_str()),
    ];

    for ((label, value), rect) in figures.into_iter().zip(boxes.iter()) {
        let widget = Paragraph::new(Span::styled(value.to_string(), Styles::kpi_value()))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::border_inactive())
                    .title(format!(" {label} ")),
            );
        f.render_widget(widget, *rect);
    }
}

fn render_status(f: &mut Frame, view: &DashboardView, area: Rect) {
    let status = Paragraph::new(Span::styled(
        view.status.message.clone(),
        Theme::status_style(view.status.kind),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_inactive())
            .title(" Status "),
    );
    f.render_widget(status, area);
}

fn render_parking_map(f: &mut Frame, state: &AppState, view: &DashboardView, area: Rect) {
    let lines: Vec<Line> = view
        .rows()
        .map(|row| {
            let mut spans = Vec::with_capacity(row.len() * 2);
            for cell in row {
                let selected = cell.id == state.selected_spot_id();
                spans.push(Span::styled(
                    format!(" {:>3} ", cell.id),
                    Theme::spot_style(cell.occupied, selected),
                ));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        })
        .collect();

    let map = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(" Parking map "),
    );
    f.render_widget(map, area);
}

/// The tooltip of the selected cell, or a hint for free spots
fn render_spot_details(f: &mut Frame, state: &AppState, view: &DashboardView, area: Rect) {
    let lines: Vec<Line> = match view.cells.get(state.selected_spot) {
        Some(SpotCell {
            tooltip: Some(tooltip),
            ..
        }) => tooltip
            .lines()
            .into_iter()
            .map(|text| Line::from(Span::styled(text, Styles::text())))
            .collect(),
        Some(cell) => vec![Line::from(Span::styled(
            format!("Spot P{} is free", cell.id),
            Styles::text_muted(),
        ))],
        None => Vec::new(),
    };

    let details = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_inactive())
            .title(" Spot details "),
    );
    f.render_widget(details, area);
}
