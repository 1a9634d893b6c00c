pub mod create;
pub mod dashboard;
pub mod detail;
pub mod footer;
pub mod issue_table;
pub mod login;
pub mod projects;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, View};

pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // main content
            Constraint::Length(1), // footer
        ])
        .split(size);

    let main_area = vertical[0];
    let footer_area = vertical[1];

    match app.view {
        View::Login => login::render(f, main_area, app),
        View::Dashboard => dashboard::render(f, main_area, app),
        View::Issues => issue_table::render(f, main_area, app),
        View::Detail => detail::render(f, main_area, app),
        View::Projects => projects::render(f, main_area, app),
        View::Create => create::render(f, main_area, app),
    }

    footer::render(f, footer_area, app);
}
