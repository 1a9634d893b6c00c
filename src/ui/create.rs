use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, CreateFocus};
use crate::ui::theme;
use crate::util::input::InputField;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // project picker
            Constraint::Length(3), // summary
            Constraint::Length(3), // description
        ])
        .split(area);

    projects(f, chunks[0], app);
    field(
        f,
        chunks[1],
        " Summary ",
        &app.create_summary,
        app.create_focus == CreateFocus::Summary,
    );
    field(
        f,
        chunks[2],
        " Description ",
        &app.create_description,
        app.create_focus == CreateFocus::Description,
    );
}

fn projects(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.create_focus == CreateFocus::Project;
    let border = if focused {
        Style::default().fg(ratatui::style::Color::Yellow)
    } else {
        Style::default().fg(theme::ACCENT)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" New Issue: Project ");

    if app.projects.is_empty() {
        f.render_widget(Paragraph::new("No accessible projects").block(block), area);
        return;
    }

    let items: Vec<ListItem> = app
        .projects
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let style = if i == app.selected_project {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::styled(
                format!("{} ({})", project.name, project.key),
                style,
            ))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn field(f: &mut Frame, area: Rect, title: &str, input: &InputField, focused: bool) {
    let border = if focused {
        Style::default().fg(ratatui::style::Color::Yellow)
    } else {
        Style::default().fg(ratatui::style::Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title.to_string());
    f.render_widget(
        Paragraph::new(input.value().to_string()).block(block),
        area,
    );

    if focused {
        let x = area.x + 1 + input.cursor() as u16;
        let y = area.y + 1;
        f.set_cursor_position((x.min(area.x + area.width.saturating_sub(2)), y));
    }
}
