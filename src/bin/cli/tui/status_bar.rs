use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app_state::{Flash, Screen, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    match &state.flash {
        Some(Flash::Info(msg)) => {
            let flash = Paragraph::new(format!(" {}", msg))
                .style(Style::default().bg(Color::Green).fg(Color::Black));
            f.render_widget(flash, area);
            return;
        }
        Some(Flash::Error(msg)) => {
            let flash = Paragraph::new(format!(" {}", msg))
                .style(Style::default().bg(Color::Red).fg(Color::White));
            f.render_widget(flash, area);
            return;
        }
        None => {}
    }

    if state.screen == Screen::List && state.search_editing {
        let text = format!(" 검색: {}█", state.search_input);
        let prompt = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
        f.render_widget(prompt, area);
        return;
    }

    let hints = match state.screen {
        Screen::Home => " j/k: move  Enter/1-4: open  q: quit ",
        Screen::List => " /: search  [/]: grade  h/l: page  Esc: home  q: quit ",
        Screen::Flashcard => " [/]: grade  s: draw  Space: flip  h/l: prev/next  Esc: home ",
        Screen::Quiz => " [/]: grade  s: start  1-9: answer  Enter: next  r: restart  Esc: home ",
        Screen::Practice => " [/]: grade  Enter: generate PDF  Esc: home  q: quit ",
    };

    let status = Paragraph::new(hints).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
