//! About screen: table of contents plus the scrolling product page

use super::header;
use crate::animator::{AboutPage, AboutSection, PageLine};
use crate::theme::{Styles, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use strum::IntoEnumIterator;

/// Rows above the page body: title (3) and table of contents (3)
const CHROME_HEIGHT: u16 = 6;

/// Visible page rows for a content area of `area_height` rows
pub fn page_viewport_height(area_height: u16) -> u16 {
    // Page block borders take two more rows
    area_height.saturating_sub(CHROME_HEIGHT + 2)
}

pub fn render_about_in_area(f: &mut Frame, page: &AboutPage, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    header::render_title(f, chunks[0], "About SmartPark");
    render_table_of_contents(f, chunks[1]);
    render_page(f, page, chunks[2]);
}

fn render_table_of_contents(f: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for (index, section) in AboutSection::iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled("   ", Styles::nav_hint()));
        }
        spans.push(Span::styled(format!("{}", index + 1), Styles::key_label()));
        spans.push(Span::styled(
            format!(" {} ({})", section.title(), section.anchor()),
            Styles::text(),
        ));
    }

    let toc = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_inactive())
            .title(" Contents "),
    );
    f.render_widget(toc, area);
}

fn render_page(f: &mut Frame, page: &AboutPage, area: Rect) {
    let lines: Vec<Line> = page
        .lines()
        .iter()
        .map(|line| match line {
            PageLine::Heading(section) => Line::from(Span::styled(
                section.title().to_uppercase(),
                Theme::section_heading(page.is_revealed(*section)),
            )),
            // Unrevealed sections keep their rows but show nothing yet
            PageLine::Body(section, text) if page.is_revealed(*section) => {
                Line::from(Span::styled(format!("  {text}"), Styles::text()))
            }
            PageLine::Body(..) | PageLine::Blank => Line::from(""),
        })
        .collect();

    let body = Paragraph::new(lines).scroll((page.offset(), 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active()),
    );
    f.render_widget(body, area);
}
