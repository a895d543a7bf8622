use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app_state::{Screen, TuiState};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.quit = true;
        return;
    }

    match state.screen {
        Screen::Home => handle_home_key(state, key),
        Screen::List if state.search_editing => handle_search_input_key(state, key),
        Screen::List => handle_list_key(state, key),
        Screen::Flashcard => handle_flashcard_key(state, key),
        Screen::Quiz => handle_quiz_key(state, key),
        Screen::Practice => handle_practice_key(state, key),
    }
}

/// Keys shared by every screen except home
fn handle_common_key(state: &mut TuiState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => state.quit = true,
        KeyCode::Esc | KeyCode::Backspace => state.go_home(),
        _ => return false,
    }
    true
}

fn handle_home_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit = true,
        KeyCode::Char('j') | KeyCode::Down => state.home_move(1),
        KeyCode::Char('k') | KeyCode::Up => state.home_move(-1),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => state.open_selected(),
        KeyCode::Char(c @ '1'..='4') => {
            state.home_selected = c as usize - '1' as usize;
            state.open_selected();
        }
        _ => {}
    }
}

fn handle_list_key(state: &mut TuiState, key: KeyEvent) {
    if handle_common_key(state, key) {
        return;
    }
    match key.code {
        KeyCode::Char('/') => state.search_editing = true,
        KeyCode::Char(']') | KeyCode::Tab => state.cycle_list_filter(true),
        KeyCode::Char('[') | KeyCode::BackTab => state.cycle_list_filter(false),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Char('n') => state.next_page(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('p') => state.prev_page(),
        _ => {}
    }
}

fn handle_search_input_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.search_editing = false,
        KeyCode::Enter => state.submit_search(),
        KeyCode::Backspace => {
            state.search_input.pop();
        }
        KeyCode::Char(c) => state.search_input.push(c),
        _ => {}
    }
}

fn handle_flashcard_key(state: &mut TuiState, key: KeyEvent) {
    if handle_common_key(state, key) {
        return;
    }
    match key.code {
        KeyCode::Char(']') | KeyCode::Tab => state.cycle_study_filter(true),
        KeyCode::Char('[') | KeyCode::BackTab => state.cycle_study_filter(false),
        KeyCode::Char('s') | KeyCode::Enter => state.start_flashcards(),
        KeyCode::Char(' ') => {
            if let Some(cards) = state.flashcards.as_mut() {
                cards.flip();
            }
        }
        KeyCode::Char('l') | KeyCode::Right => {
            if let Some(cards) = state.flashcards.as_mut() {
                cards.next();
            }
        }
        KeyCode::Char('h') | KeyCode::Left => {
            if let Some(cards) = state.flashcards.as_mut() {
                cards.prev();
            }
        }
        _ => {}
    }
}

fn handle_quiz_key(state: &mut TuiState, key: KeyEvent) {
    if handle_common_key(state, key) {
        return;
    }
    match key.code {
        KeyCode::Char(']') | KeyCode::Tab => state.cycle_study_filter(true),
        KeyCode::Char('[') | KeyCode::BackTab => state.cycle_study_filter(false),
        KeyCode::Char('s') => state.start_quiz(),
        KeyCode::Char('r') => state.restart_quiz(),
        KeyCode::Char(c @ '1'..='9') => state.answer(c as usize - '1' as usize),
        KeyCode::Enter | KeyCode::Char('n') => match state.quiz.as_ref().map(|q| q.is_finished()) {
            Some(true) => state.restart_quiz(),
            Some(false) => state.next_question(),
            None => state.start_quiz(),
        },
        _ => {}
    }
}

fn handle_practice_key(state: &mut TuiState, key: KeyEvent) {
    if handle_common_key(state, key) {
        return;
    }
    match key.code {
        KeyCode::Char(']') | KeyCode::Tab | KeyCode::Char('j') | KeyCode::Down => {
            state.cycle_study_filter(true)
        }
        KeyCode::Char('[') | KeyCode::BackTab | KeyCode::Char('k') | KeyCode::Up => {
            state.cycle_study_filter(false)
        }
        KeyCode::Enter | KeyCode::Char('g') => state.generate_worksheet(),
        _ => {}
    }
}
