use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use hanja_lib::study::AnswerOutcome;

use super::app_state::TuiState;
use super::ui::{centered_rect, grade_picker};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(5)])
        .split(area);

    f.render_widget(Paragraph::new(grade_picker(state.study_filter.label(), true)), chunks[0]);

    let Some(quiz) = &state.quiz else {
        let hint = Paragraph::new("급수를 고르고 s 를 눌러 퀴즈를 시작하세요")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, centered_rect(80, 1, chunks[1]));
        return;
    };

    if quiz.is_empty() {
        let empty = Paragraph::new(format!("{}에 해당하는 한자가 없습니다", quiz.filter()))
            .alignment(Alignment::Center);
        f.render_widget(empty, centered_rect(80, 1, chunks[1]));
        return;
    }

    if quiz.is_finished() {
        let (score, total) = quiz.final_score();
        let done = Paragraph::new(vec![
            Line::from(Span::styled(
                "퀴즈 완료!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("점수: {} / {}", score, total)),
            Line::from(Span::styled("r: 다시 하기", Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));
        f.render_widget(done, centered_rect(50, 5, chunks[1]));
        return;
    }

    let Some(question) = quiz.current() else {
        return;
    };

    let body = centered_rect(70, quiz.options().len() as u16 + 8, chunks[1]);
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(body);

    let prompt = Paragraph::new(vec![
        Line::from(Span::styled(
            question.hanja.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "이 한자의 뜻은?",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(format!(
                " 문제 {} / {} · 점수 {} ",
                quiz.index() + 1,
                quiz.len(),
                quiz.score()
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(prompt, parts[0]);

    let items: Vec<ListItem> = quiz
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let style = match quiz.outcome() {
                Some(_) if *option == question.meaning => Style::default().fg(Color::Green),
                Some(AnswerOutcome::Incorrect { .. }) => Style::default().fg(Color::DarkGray),
                _ => Style::default(),
            };
            ListItem::new(format!("{}. {}", i + 1, option)).style(style)
        })
        .collect();

    let options_block = Block::default()
        .borders(Borders::ALL)
        .border_style(if quiz.is_locked() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        });
    f.render_widget(List::new(items).block(options_block), parts[1]);
}
