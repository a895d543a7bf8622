use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app_state::{PracticeStatus, TuiState};
use super::ui::{centered_rect, grade_picker};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let options = state.app.worksheet_options(state.study_filter);

    let mut lines = vec![
        grade_picker(state.study_filter.label(), true),
        Line::from(format!(
            " 한자 {}개 · 칸 {}개",
            options.count, options.repeat
        )),
        Line::from(format!(" 저장 위치: {}", state.app.config.output_dir().display())),
        Line::from(""),
    ];

    match &state.practice_status {
        Some(PracticeStatus::Saved { path, rows, pages }) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            lines.push(Line::from(Span::styled(
                format!(" 저장됨: {}", name),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(format!(" {}자 · {}쪽", rows, pages)));
        }
        Some(PracticeStatus::NoData) => {
            lines.push(Line::from(Span::styled(
                " 해당 급수의 한자가 없습니다",
                Style::default().fg(Color::Yellow),
            )));
        }
        None => {
            lines.push(Line::from(Span::styled(
                " Enter: PDF 만들기",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let block = Block::default()
        .title(" 쓰기 연습지 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let panel = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(panel, centered_rect(70, 9, area));
}
