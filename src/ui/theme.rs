use ratatui::style::Color;

pub const ACCENT: Color = Color::Cyan;

pub fn status_color(status: &str) -> Color {
    match status {
        "To Do" => Color::Blue,
        "In Progress" => Color::Yellow,
        "Done" => Color::Green,
        _ => Color::Gray,
    }
}

pub fn priority_color(priority: &str) -> Color {
    match priority {
        "Highest" => Color::Red,
        "High" => Color::Yellow,
        "Medium" => Color::Blue,
        "Low" | "Lowest" => Color::Gray,
        _ => Color::Gray,
    }
}
