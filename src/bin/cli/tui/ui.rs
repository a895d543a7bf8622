use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app_state::{Screen, TuiState};
use super::{flashcard_view, home, list_view, practice_view, quiz_view, status_bar};

pub fn draw(f: &mut Frame, state: &TuiState) {
    let size = f.area();

    // Header + content area + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    let header = Paragraph::new(format!(" {} ", state.screen.title())).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(header, outer[0]);

    match state.screen {
        Screen::Home => home::draw(f, outer[1], state),
        Screen::List => list_view::draw(f, outer[1], state),
        Screen::Flashcard => flashcard_view::draw(f, outer[1], state),
        Screen::Quiz => quiz_view::draw(f, outer[1], state),
        Screen::Practice => practice_view::draw(f, outer[1], state),
    }

    status_bar::draw(f, outer[2], state);
}

/// Centered sub-rectangle taking `percent_x` of the width and `height` rows
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// One-line grade picker: `< 8급 >`
pub fn grade_picker(label: &str, active: bool) -> Line<'static> {
    let style = if active {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(vec![
        Span::raw(" 급수: "),
        Span::styled(format!("< {} >", label), style),
    ])
}
