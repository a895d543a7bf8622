use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use super::app_state::TuiState;
use super::ui::grade_picker;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    // Filter line: grade picker and current query
    let query_style = if state.search_editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let mut filter_line = grade_picker(state.list_filter.label(), !state.search_editing);
    filter_line.push_span(Span::raw("   검색: "));
    filter_line.push_span(Span::styled(state.search_input.clone(), query_style));

    let filter_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(Paragraph::new(filter_line).block(filter_block), chunks[0]);

    let (rows, title) = match &state.results {
        Some(page) => {
            let rows: Vec<Row> = page
                .records
                .iter()
                .map(|r| {
                    Row::new(vec![
                        r.grade.label().to_string(),
                        r.hanja.clone(),
                        r.main_sound.clone(),
                        r.meaning.clone(),
                    ])
                })
                .collect();
            let title = format!(
                " {} / {} 페이지 · 총 {}개 ",
                page.page,
                page.total_pages(),
                page.total_count
            );
            (rows, title)
        }
        None => (Vec::new(), " 결과 없음 ".to_string()),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(4),
            Constraint::Length(6),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new(vec!["급수", "한자", "음", "뜻"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(table, chunks[1]);
}
