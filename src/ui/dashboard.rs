use std::collections::BTreeMap;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, STANDARD_STATUSES};
use crate::stats;
use crate::ui::theme;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // header
            Constraint::Min(8),    // charts
            Constraint::Length(8), // recently updated
        ])
        .split(area);

    header(f, chunks[0], app);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    histogram(f, charts[0], " By Status ", &stats::count_by_status(&app.issues));
    histogram(f, charts[1], " By Priority ", &stats::count_by_priority(&app.issues));

    recent(f, chunks[2], app);
}

fn header(f: &mut Frame, area: Rect, app: &App) {
    let user = app
        .user
        .as_ref()
        .map(|u| u.display_name.as_str())
        .unwrap_or("-");
    let account = app
        .user
        .as_ref()
        .filter(|u| !u.account_id.is_empty())
        .map(|u| format!(" ({})", u.account_id))
        .unwrap_or_default();

    let filter: Vec<&str> = STANDARD_STATUSES
        .iter()
        .zip(app.status_filter)
        .filter(|(_, on)| *on)
        .map(|(name, _)| *name)
        .collect();
    let filter = if filter.is_empty() {
        "none".to_string()
    } else {
        filter.join(", ")
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Signed in as ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(user, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(account, Style::default().add_modifier(Modifier::DIM)),
        ]),
        Line::from(vec![
            Span::styled("My issues: ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                app.issues.len().to_string(),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Filter: ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(filter),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(" Dashboard ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn histogram(f: &mut Frame, area: Rect, title: &str, counts: &BTreeMap<String, usize>) {
    let data: Vec<(&str, u64)> = counts
        .iter()
        .map(|(name, count)| (name.as_str(), *count as u64))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .title(title.to_string()),
        )
        .bar_width(11)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(
            Style::default()
                .fg(ratatui::style::Color::Black)
                .bg(theme::ACCENT),
        )
        .data(data.as_slice());
    f.render_widget(chart, area);
}

fn recent(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(" Recently Updated ");

    if app.issues.is_empty() {
        f.render_widget(Paragraph::new("No issues").block(block), area);
        return;
    }

    let recent = app.recent_issues(5);
    let rows: Vec<Row> = recent
        .iter()
        .map(|issue| {
            Row::new(vec![
                Cell::from(issue.key.clone()).style(Style::default().fg(theme::ACCENT)),
                Cell::from(issue.summary().to_string()),
                Cell::from(issue.status_name().to_string())
                    .style(Style::default().fg(theme::status_color(issue.status_name()))),
                Cell::from(issue.assignee_name().to_string()),
                Cell::from(issue.updated_display()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(13),
            Constraint::Length(14),
            Constraint::Length(17),
        ],
    )
    .header(Row::new(["Key", "Summary", "Status", "Assignee", "Updated"]).style(
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .block(block);

    f.render_widget(table, area);
}
