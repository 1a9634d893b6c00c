use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, EditMode};
use crate::model::issue::Issue;
use crate::ui::theme;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(issue) = &app.detail else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(" Issue ");
        f.render_widget(block, area);
        return;
    };

    let bottom = match app.edit {
        EditMode::View => 0,
        EditMode::Transition => (app.transitions.len() as u16 + 2).min(8),
        EditMode::Comment | EditMode::Assignee => 3,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),         // fields + description
            Constraint::Length(8),      // comments
            Constraint::Length(bottom), // edit area
        ])
        .split(area);

    info(f, chunks[0], issue);
    comments(f, chunks[1], issue);

    match app.edit {
        EditMode::View => {}
        EditMode::Transition => transitions(f, chunks[2], app),
        EditMode::Comment => input_box(f, chunks[2], app, " Comment "),
        EditMode::Assignee => input_box(f, chunks[2], app, " Assignee account id "),
    }
}

fn info(f: &mut Frame, area: Rect, issue: &Issue) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} {}", issue.key, issue.summary()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![
            label("Status: "),
            Span::styled(
                issue.status_name().to_string(),
                Style::default().fg(theme::status_color(issue.status_name())),
            ),
        ]),
        Line::from(vec![
            label("Assignee: "),
            Span::raw(issue.assignee_name().to_string()),
            Span::styled(
                issue
                    .fields
                    .assignee
                    .as_ref()
                    .and_then(|u| u.account_id.as_deref())
                    .map(|id| format!(" ({id})"))
                    .unwrap_or_default(),
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]),
        Line::from(vec![
            label("Priority: "),
            Span::styled(
                issue.priority_name().to_string(),
                Style::default().fg(theme::priority_color(issue.priority_name())),
            ),
        ]),
        Line::from(vec![
            label("Created: "),
            Span::raw(issue.created_display()),
            Span::raw("   "),
            label("Updated: "),
            Span::raw(issue.updated_display()),
        ]),
    ];

    lines.push(Line::raw(""));
    match issue.description_text() {
        Some(desc) => lines.push(Line::raw(desc)),
        None => lines.push(Line::styled(
            "No description",
            Style::default().add_modifier(Modifier::DIM),
        )),
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .title(" Issue "),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn comments(f: &mut Frame, area: Rect, issue: &Issue) {
    let all = issue.comments();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(format!(" Comments ({}) ", all.len()));

    if all.is_empty() {
        f.render_widget(Paragraph::new("No comments").block(block), area);
        return;
    }

    // Newest comments sit at the end of the list; show the last ones that fit.
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = all
        .iter()
        .rev()
        .take(visible.max(1))
        .rev()
        .map(|comment| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{}: ", comment.author_name()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(comment.body_text()),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn transitions(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .transitions
        .iter()
        .enumerate()
        .map(|(i, transition)| {
            let style = if i == app.selected_transition {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::styled(transition.name.clone(), style))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::Yellow))
            .title(" Move to "),
    );
    f.render_widget(list, area);
}

fn input_box(f: &mut Frame, area: Rect, app: &App, title: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ratatui::style::Color::Yellow))
        .title(title.to_string());
    let paragraph = Paragraph::new(app.edit_input.value().to_string()).block(block);
    f.render_widget(paragraph, area);

    let x = area.x + 1 + app.edit_input.cursor() as u16;
    let y = area.y + 1;
    f.set_cursor_position((x.min(area.x + area.width.saturating_sub(2)), y));
}

fn label(text: &str) -> Span<'static> {
    Span::styled(
        text.to_string(),
        Style::default().fg(ratatui::style::Color::Gray),
    )
}
