use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app_state::TuiState;
use super::ui::{centered_rect, grade_picker};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(area);

    f.render_widget(Paragraph::new(grade_picker(state.study_filter.label(), true)), chunks[0]);

    let Some(session) = &state.flashcards else {
        let hint = Paragraph::new("급수를 고르고 s 를 눌러 카드를 뽑으세요")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, centered_rect(80, 1, chunks[1]));
        return;
    };

    let Some(card) = session.current() else {
        let empty = Paragraph::new(format!("{}에 해당하는 한자가 없습니다", session.filter()))
            .alignment(Alignment::Center);
        f.render_widget(empty, centered_rect(80, 1, chunks[1]));
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("[{}]", card.grade.label()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            card.hanja.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if session.is_revealed() {
        lines.push(Line::from(Span::styled(
            card.main_sound.clone(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(card.meaning.clone()));
    } else {
        lines.push(Line::from(Span::styled(
            "Space: 뒤집기",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .title(format!(" {} / {} ", session.index() + 1, session.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let card_view = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(card_view, centered_rect(60, 10, chunks[1]));
}
