use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, IssueScope};
use crate::ui::theme;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = match &app.scope {
        IssueScope::Mine if app.loading => " My Issues (loading...) ".to_string(),
        IssueScope::Mine => format!(" My Issues ({}) ", app.issues.len()),
        IssueScope::Project(key) if app.loading => format!(" {key} Issues (loading...) "),
        IssueScope::Project(key) => format!(" {key} Issues ({}) ", app.issues.len()),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(title);

    if app.issues.is_empty() {
        let msg = Paragraph::new("No issues match the current filter").block(block);
        f.render_widget(msg, area);
        return;
    }

    // No table state; the selected row is styled directly, so the window
    // has to keep the selection on screen.
    let visible = area.height.saturating_sub(3) as usize;
    let offset = if visible == 0 {
        app.selected_issue
    } else {
        app.selected_issue.saturating_sub(visible - 1)
    };

    let rows: Vec<Row> = app
        .issues
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible.max(1))
        .map(|(i, issue)| {
            let style = if i == app.selected_issue {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(issue.key.clone()),
                Cell::from(issue.summary().to_string()),
                Cell::from(issue.status_name().to_string())
                    .style(Style::default().fg(theme::status_color(issue.status_name()))),
                Cell::from(issue.assignee_name().to_string()),
                Cell::from(issue.priority_name().to_string())
                    .style(Style::default().fg(theme::priority_color(issue.priority_name()))),
                Cell::from(issue.created_display()),
                Cell::from(issue.updated_display()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(24),
            Constraint::Length(13),
            Constraint::Length(14),
            Constraint::Length(10),
            Constraint::Length(17),
            Constraint::Length(17),
        ],
    )
    .header(
        Row::new(["Key", "Summary", "Status", "Assignee", "Priority", "Created", "Updated"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(block);

    f.render_widget(table, area);
}
