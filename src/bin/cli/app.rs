use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;

use hanja_lib::catalog::{CatalogStore, GradeFilter, SearchPage};
use hanja_lib::config::AppConfig;
use hanja_lib::study::{session_rng, FlashcardSession, QuizSession};
use hanja_lib::worksheet::{self, Worksheet, WorksheetOptions};

/// Shared application state for CLI commands and the TUI
pub struct App {
    pub config: AppConfig,
    pub store: CatalogStore,
    pub rng: StdRng,
}

impl App {
    /// Load the config, apply a database override and open the catalog
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let mut config = AppConfig::load().context("Failed to load configuration")?;
        if let Some(path) = db_path {
            config.database_path = path;
        }
        Self::from_config(config)
    }

    pub fn from_config(config: AppConfig) -> Result<Self> {
        let store = config.store();
        // An empty catalog still answers queries with zero rows
        store
            .ensure_schema()
            .with_context(|| format!("Failed to open catalog at {}", store.path().display()))?;
        let rng = session_rng(config.seed);

        Ok(Self { config, store, rng })
    }

    pub fn search(&self, filter: GradeFilter, query: &str, page: usize, page_size: usize) -> Result<SearchPage> {
        self.store
            .search(filter, query, page, page_size)
            .context("Failed to search catalog")
    }

    pub fn start_flashcards(&mut self, filter: GradeFilter) -> Result<FlashcardSession> {
        FlashcardSession::start(&self.store, filter, self.config.flashcard_count, &mut self.rng)
            .context("Failed to draw flashcards")
    }

    pub fn start_quiz(&mut self, filter: GradeFilter) -> Result<QuizSession> {
        QuizSession::start(
            &self.store,
            filter,
            self.config.quiz_count,
            self.config.quiz_options,
            &mut self.rng,
        )
        .context("Failed to start quiz")
    }

    /// Worksheet options from the config, with the grade filled in
    pub fn worksheet_options(&self, filter: GradeFilter) -> WorksheetOptions {
        WorksheetOptions {
            filter,
            ..self.config.worksheet_options()
        }
    }

    pub fn generate_worksheet(&mut self, options: &WorksheetOptions) -> Result<Option<Worksheet>> {
        let today = chrono::Local::now().date_naive();
        worksheet::generate(&self.store, options, today, &mut self.rng)
            .context("Failed to generate worksheet")
    }

    /// Save into `out`, or the configured output directory
    pub fn save_worksheet(&self, sheet: &Worksheet, out: Option<&Path>) -> Result<PathBuf> {
        let dir = match out {
            Some(dir) => dir.to_path_buf(),
            None => self.config.output_dir(),
        };
        let now = chrono::Local::now().naive_local();
        worksheet::save_to_dir(&dir, sheet, now)
            .with_context(|| format!("Failed to save worksheet to {}", dir.display()))
    }
}
