use std::path::PathBuf;

use anyhow::Result;

use hanja_lib::catalog::{GradeFilter, SearchPage};
use hanja_lib::study::{AnswerOutcome, FlashcardSession, QuizSession};

use crate::app::App;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    List,
    Flashcard,
    Quiz,
    Practice,
}

impl Screen {
    /// Home menu entries in display order
    pub const MENU: [Screen; 4] = [Screen::List, Screen::Flashcard, Screen::Quiz, Screen::Practice];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "한자 학습",
            Screen::List => "한자 목록",
            Screen::Flashcard => "플래시카드",
            Screen::Quiz => "퀴즈",
            Screen::Practice => "쓰기 연습",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Info(String),
    Error(String),
}

/// Result of the last worksheet request on the practice screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeStatus {
    Saved { path: PathBuf, rows: usize, pages: usize },
    NoData,
}

pub struct TuiState {
    pub app: App,
    pub screen: Screen,
    pub home_selected: usize,

    // List screen
    pub list_filter: GradeFilter,
    pub search_input: String,
    pub search_editing: bool,
    pub list_page: usize,
    pub results: Option<SearchPage>,

    // Study screens share the grade picker
    pub study_filter: GradeFilter,
    pub flashcards: Option<FlashcardSession>,
    pub quiz: Option<QuizSession>,

    pub practice_status: Option<PracticeStatus>,

    pub flash: Option<Flash>,
    pub quit: bool,
}

impl TuiState {
    pub fn new(app: App) -> Self {
        Self {
            app,
            screen: Screen::Home,
            home_selected: 0,
            list_filter: GradeFilter::All,
            search_input: String::new(),
            search_editing: false,
            list_page: 1,
            results: None,
            study_filter: GradeFilter::All,
            flashcards: None,
            quiz: None,
            practice_status: None,
            flash: None,
            quit: false,
        }
    }

    /// Keep the value on success, show the error in the status line otherwise
    fn report<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("{:#}", e);
                self.flash = Some(Flash::Error(format!("{:#}", e)));
                None
            }
        }
    }

    // ==================== Navigation ====================

    pub fn home_move(&mut self, delta: isize) {
        let len = Screen::MENU.len() as isize;
        self.home_selected = (self.home_selected as isize + delta).rem_euclid(len) as usize;
    }

    pub fn open(&mut self, screen: Screen) {
        self.screen = screen;
        if screen == Screen::List && self.results.is_none() {
            self.refresh_list();
        }
    }

    pub fn open_selected(&mut self) {
        let screen = Screen::MENU[self.home_selected];
        self.open(screen);
    }

    pub fn go_home(&mut self) {
        self.search_editing = false;
        self.screen = Screen::Home;
    }

    // ==================== List ====================

    pub fn refresh_list(&mut self) {
        let result = self.app.search(
            self.list_filter,
            &self.search_input,
            self.list_page,
            self.app.config.page_size,
        );
        if let Some(page) = self.report(result) {
            self.list_page = page.page;
            self.results = Some(page);
        }
    }

    pub fn cycle_list_filter(&mut self, forward: bool) {
        self.list_filter = if forward {
            self.list_filter.next()
        } else {
            self.list_filter.prev()
        };
        self.list_page = 1;
        self.refresh_list();
    }

    pub fn submit_search(&mut self) {
        self.search_editing = false;
        self.list_page = 1;
        self.refresh_list();
    }

    pub fn next_page(&mut self) {
        if self.results.as_ref().is_some_and(|r| r.has_next()) {
            self.list_page += 1;
            self.refresh_list();
        }
    }

    pub fn prev_page(&mut self) {
        if self.list_page > 1 {
            self.list_page -= 1;
            self.refresh_list();
        }
    }

    // ==================== Flashcards ====================

    pub fn cycle_study_filter(&mut self, forward: bool) {
        self.study_filter = if forward {
            self.study_filter.next()
        } else {
            self.study_filter.prev()
        };
    }

    pub fn start_flashcards(&mut self) {
        let result = self.app.start_flashcards(self.study_filter);
        if let Some(session) = self.report(result) {
            if session.is_empty() {
                self.flash = Some(Flash::Info(format!("{}에 해당하는 한자가 없습니다", self.study_filter)));
            }
            self.flashcards = Some(session);
        }
    }

    // ==================== Quiz ====================

    pub fn start_quiz(&mut self) {
        let result = self.app.start_quiz(self.study_filter);
        if let Some(quiz) = self.report(result) {
            if quiz.is_empty() {
                self.flash = Some(Flash::Info(format!("{}에 해당하는 한자가 없습니다", self.study_filter)));
            }
            self.quiz = Some(quiz);
        }
    }

    /// Answer with option `choice` (0-based)
    pub fn answer(&mut self, choice: usize) {
        let outcome = self.quiz.as_mut().and_then(|quiz| quiz.submit_choice(choice));
        match outcome {
            Some(AnswerOutcome::Correct) => self.flash = Some(Flash::Info(AnswerOutcome::Correct.message())),
            Some(outcome) => self.flash = Some(Flash::Error(outcome.message())),
            None => {}
        }
    }

    pub fn next_question(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        if !quiz.is_locked() {
            return;
        }
        let result = quiz.next(&self.app.store, &mut self.app.rng);
        let finished = quiz.is_finished();
        let (score, total) = quiz.final_score();

        if self.report(result.map_err(anyhow::Error::from)).is_some() && finished {
            self.flash = Some(Flash::Info(format!("퀴즈 완료! 점수: {} / {}", score, total)));
        }
    }

    pub fn restart_quiz(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        let result = quiz.restart(&self.app.store, &mut self.app.rng);
        self.report(result.map_err(anyhow::Error::from));
    }

    // ==================== Practice ====================

    pub fn generate_worksheet(&mut self) {
        let options = self.app.worksheet_options(self.study_filter);
        let result = self.app.generate_worksheet(&options);
        let Some(generated) = self.report(result) else {
            return;
        };

        let Some(sheet) = generated else {
            self.practice_status = Some(PracticeStatus::NoData);
            self.flash = Some(Flash::Info(format!("{}에 해당하는 한자가 없습니다", self.study_filter)));
            return;
        };

        let saved = self.app.save_worksheet(&sheet, None);
        if let Some(path) = self.report(saved) {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.flash = Some(Flash::Info(format!("PDF 저장 완료: {}", name)));
            self.practice_status = Some(PracticeStatus::Saved {
                path,
                rows: sheet.row_count,
                pages: sheet.page_count,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanja_lib::catalog::{self, Grade};
    use hanja_lib::config::AppConfig;
    use tempfile::TempDir;

    const SEED: &str = "main_sound,level,hanja,meaning,radical,strokes,total_strokes
수,8급,水,\"[[['물'], ['수']]]\",水,0,4
화,8급,火,\"[[['불'], ['화']]]\",火,0,4
목,8급,木,\"[[['나무'], ['목']]]\",木,0,4
금,8급,金,\"[[['쇠'], ['금']]]\",金,0,8
토,8급,土,\"[[['흙'], ['토']]]\",土,0,3
인,7급,人,\"[[['사람'], ['인']]]\",人,0,2
";

    fn create_test_state() -> (TuiState, TempDir) {
        let temp = TempDir::new().unwrap();
        let config = AppConfig {
            database_path: temp.path().join("hanja.sqlite3"),
            output_dir: Some(temp.path().join("out")),
            page_size: 2,
            seed: Some(11),
            ..Default::default()
        };
        let app = App::from_config(config).unwrap();
        catalog::import::import_reader(&app.store, SEED.as_bytes()).unwrap();
        (TuiState::new(app), temp)
    }

    #[test]
    fn test_home_menu_wraps() {
        let (mut state, _temp) = create_test_state();
        state.home_move(-1);
        assert_eq!(Screen::MENU[state.home_selected], Screen::Practice);
        state.home_move(1);
        assert_eq!(state.home_selected, 0);
        state.open_selected();
        assert_eq!(state.screen, Screen::List);
    }

    #[test]
    fn test_list_pages_and_filter() {
        let (mut state, _temp) = create_test_state();
        state.open(Screen::List);

        let page = state.results.as_ref().unwrap();
        assert_eq!(page.total_count, 6);
        assert_eq!(page.total_pages(), 3);

        state.next_page();
        state.next_page();
        state.next_page();
        assert_eq!(state.list_page, 3);
        state.prev_page();
        assert_eq!(state.list_page, 2);

        // 전체 → 8급 resets paging
        state.cycle_list_filter(true);
        assert_eq!(state.list_filter, GradeFilter::Only(Grade::Eighth));
        assert_eq!(state.list_page, 1);
        assert_eq!(state.results.as_ref().unwrap().total_count, 5);
    }

    #[test]
    fn test_search_input_filters_results() {
        let (mut state, _temp) = create_test_state();
        state.open(Screen::List);
        state.search_editing = true;
        state.search_input = "나무".to_string();
        state.submit_search();

        assert!(!state.search_editing);
        let page = state.results.as_ref().unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.records[0].hanja, "木");
    }

    #[test]
    fn test_flashcards_empty_grade_flashes() {
        let (mut state, _temp) = create_test_state();
        state.study_filter = GradeFilter::Only(Grade::First);
        state.start_flashcards();

        assert!(state.flashcards.as_ref().unwrap().is_empty());
        assert!(matches!(state.flash, Some(Flash::Info(_))));
    }

    #[test]
    fn test_quiz_round_trip_to_final_score() {
        let (mut state, _temp) = create_test_state();
        state.start_quiz();
        let total = state.quiz.as_ref().unwrap().len();
        assert_eq!(total, 6);

        for _ in 0..total {
            let quiz = state.quiz.as_ref().unwrap();
            let correct = quiz.current().unwrap().meaning.clone();
            let pos = quiz.options().iter().position(|o| *o == correct).unwrap();
            state.answer(pos);
            assert_eq!(state.flash, Some(Flash::Info("정답입니다!".to_string())));

            // Second answer is ignored while locked
            state.answer(pos);
            state.next_question();
        }

        let quiz = state.quiz.as_ref().unwrap();
        assert!(quiz.is_finished());
        assert_eq!(quiz.final_score(), (6, 6));
        assert_eq!(state.flash, Some(Flash::Info("퀴즈 완료! 점수: 6 / 6".to_string())));

        state.restart_quiz();
        let quiz = state.quiz.as_ref().unwrap();
        assert_eq!(quiz.score(), 0);
        assert!(!quiz.is_finished());
    }

    #[test]
    fn test_next_question_requires_answer() {
        let (mut state, _temp) = create_test_state();
        state.start_quiz();
        state.next_question();
        assert_eq!(state.quiz.as_ref().unwrap().index(), 0);
    }

    #[test]
    fn test_practice_saves_pdf() {
        let (mut state, temp) = create_test_state();
        state.study_filter = GradeFilter::Only(Grade::Eighth);
        state.generate_worksheet();

        match state.practice_status.as_ref().unwrap() {
            PracticeStatus::Saved { path, rows, pages } => {
                assert!(path.starts_with(temp.path().join("out")));
                assert!(path.exists());
                assert_eq!(*rows, 5);
                assert_eq!(*pages, 1);
            }
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[test]
    fn test_practice_without_data() {
        let (mut state, _temp) = create_test_state();
        state.study_filter = GradeFilter::Only(Grade::Special);
        state.generate_worksheet();
        assert_eq!(state.practice_status, Some(PracticeStatus::NoData));
    }
}
