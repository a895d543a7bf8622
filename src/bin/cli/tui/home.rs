use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use super::app_state::{Screen, TuiState};
use super::ui::centered_rect;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default()
        .title(" 전국한자능력검정시험 대비 ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = Screen::MENU
        .iter()
        .enumerate()
        .map(|(i, screen)| ListItem::new(format!("{}. {}", i + 1, screen.title())))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.home_selected));

    let menu_area = centered_rect(50, Screen::MENU.len() as u16 + 2, area);
    f.render_stateful_widget(list, menu_area, &mut list_state);
}
