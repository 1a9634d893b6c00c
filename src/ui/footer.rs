use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, EditMode, IssueScope, View};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    match app.view {
        View::Login => {
            spans.push(hint("tab", "next field"));
            spans.push(hint("enter", "connect"));
            spans.push(hint("esc", "quit"));
        }
        View::Dashboard => {
            spans.push(hint("enter", "issues"));
            spans.push(hint("1/2/3", "filter"));
            spans.push(hint("r", "refresh"));
            spans.push(hint("p", "projects"));
            spans.push(hint("n", "new issue"));
            spans.push(hint("q", "quit"));
        }
        View::Issues => {
            spans.push(hint("↑↓", "navigate"));
            spans.push(hint("enter", "detail"));
            if app.scope == IssueScope::Mine {
                spans.push(hint("1/2/3", "filter"));
            }
            spans.push(hint("r", "refresh"));
            spans.push(hint("←", "dashboard"));
            spans.push(hint("q", "quit"));
        }
        View::Detail => match app.edit {
            EditMode::View => {
                spans.push(hint("t", "status"));
                spans.push(hint("c", "comment"));
                spans.push(hint("a", "assignee"));
                spans.push(hint("r", "reload"));
                spans.push(hint("←", "back"));
                spans.push(hint("q", "quit"));
            }
            EditMode::Transition => {
                spans.push(hint("↑↓", "choose"));
                spans.push(hint("enter", "apply"));
                spans.push(hint("esc", "cancel"));
            }
            EditMode::Comment | EditMode::Assignee => {
                spans.push(hint("enter", "submit"));
                spans.push(hint("esc", "cancel"));
            }
        },
        View::Projects => {
            spans.push(hint("↑↓", "navigate"));
            spans.push(hint("enter", "open"));
            spans.push(hint("esc", "back"));
            spans.push(hint("q", "quit"));
        }
        View::Create => {
            spans.push(hint("tab", "field"));
            spans.push(hint("↑↓", "project"));
            spans.push(hint("enter", "create"));
            spans.push(hint("esc", "back"));
        }
    }

    if let Some((msg, _)) = &app.flash_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            msg,
            Style::default().fg(ratatui::style::Color::Yellow),
        ));
    }

    let line = Line::from(spans);
    let paragraph = Paragraph::new(line);
    f.render_widget(paragraph, area);
}

fn hint(key: &str, desc: &str) -> Span<'static> {
    Span::styled(
        format!(" {key}:{desc} "),
        Style::default().fg(ratatui::style::Color::DarkGray),
    )
}
