use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, LoginFocus};
use crate::ui::theme;
use crate::util::input::InputField;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = centered(area, 62, 14);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(" Jira Login ");
    f.render_widget(block, form);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // instructions
            Constraint::Length(3), // url
            Constraint::Length(3), // email
            Constraint::Length(3), // token
        ])
        .margin(1)
        .split(form);

    let intro = Paragraph::new(Line::styled(
        "Enter your site URL, email and API token",
        Style::default().add_modifier(Modifier::DIM),
    ));
    f.render_widget(intro, inner[0]);

    field(f, inner[1], " Jira URL ", &app.login.url, app.login.focus == LoginFocus::Url, false);
    field(f, inner[2], " Email ", &app.login.email, app.login.focus == LoginFocus::Email, false);
    field(f, inner[3], " API Token ", &app.login.token, app.login.focus == LoginFocus::Token, true);
}

fn field(f: &mut Frame, area: Rect, title: &str, input: &InputField, focused: bool, mask: bool) {
    let border = if focused {
        Style::default().fg(ratatui::style::Color::Yellow)
    } else {
        Style::default().fg(ratatui::style::Color::DarkGray)
    };
    let content = if mask {
        "*".repeat(input.value().chars().count())
    } else {
        input.value().to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);
    f.render_widget(Paragraph::new(content).block(block), area);

    if focused {
        let x = area.x + 1 + input.cursor() as u16;
        let y = area.y + 1;
        f.set_cursor_position((x.min(area.x + area.width.saturating_sub(2)), y));
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
