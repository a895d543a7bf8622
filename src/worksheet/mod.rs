//! Writing practice worksheets
//!
//! A worksheet is one A4 document with a row per sampled character: grade,
//! glyph, reading, a shortened meaning and a strip of tracing boxes.

pub mod layout;
pub mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use rand::RngCore;
use thiserror::Error;

use crate::catalog::{CatalogError, CharacterRecord, GradeFilter};
use crate::study::CharacterSource;

pub use layout::{PageLayout, RowLayout, TracingBox, WorksheetLayout};

pub const DEFAULT_WORKSHEET_COUNT: usize = 10;
pub const DEFAULT_REPEAT: usize = 10;

const TITLE: &str = "일일 한자 쓰기 연습";
const FOOTER: &str = "한자 학습 - 전국한자능력검정시험 대비";

#[derive(Error, Debug)]
pub enum WorksheetError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WorksheetError>;

#[derive(Debug, Clone, Copy)]
pub struct WorksheetOptions {
    pub filter: GradeFilter,
    pub count: usize,
    pub repeat: usize,
}

impl Default for WorksheetOptions {
    fn default() -> Self {
        Self {
            filter: GradeFilter::All,
            count: DEFAULT_WORKSHEET_COUNT,
            repeat: DEFAULT_REPEAT,
        }
    }
}

/// A rendered worksheet
#[derive(Debug, Clone)]
pub struct Worksheet {
    pub bytes: Vec<u8>,
    pub row_count: usize,
    pub page_count: usize,
}

/// Title, date line and paginated rows for the given records
pub fn build_layout(
    records: &[CharacterRecord],
    filter: GradeFilter,
    repeat: usize,
    today: NaiveDate,
) -> WorksheetLayout {
    let title = match filter.grade() {
        Some(grade) => format!("{} ({})", TITLE, grade.label()),
        None => TITLE.to_string(),
    };

    WorksheetLayout {
        title,
        date_line: today.format("%Y년 %m월 %d일").to_string(),
        pages: layout::layout_rows(records, repeat),
    }
}

/// Sample characters and render a worksheet. Returns `None` when nothing
/// matches the filter.
pub fn generate<S: CharacterSource + ?Sized>(
    source: &S,
    options: &WorksheetOptions,
    today: NaiveDate,
    rng: &mut dyn RngCore,
) -> Result<Option<Worksheet>> {
    let records = source.random_sample(options.filter, options.count, rng)?;
    if records.is_empty() {
        log::info!("No characters available for a worksheet ({})", options.filter);
        return Ok(None);
    }

    let layout = build_layout(&records, options.filter, options.repeat, today);
    let bytes = pdf::render(&layout, FOOTER)?;

    log::info!(
        "Generated worksheet: {} rows on {} pages",
        layout.row_count(),
        layout.pages.len()
    );
    Ok(Some(Worksheet {
        bytes,
        row_count: layout.row_count(),
        page_count: layout.pages.len(),
    }))
}

/// `hanja_practice_YYYYMMDD_HHMMSS.pdf`
pub fn file_name(now: NaiveDateTime) -> String {
    format!("hanja_practice_{}.pdf", now.format("%Y%m%d_%H%M%S"))
}

/// The user's downloads folder, or the current directory when there is none
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Write the worksheet into `dir` under a timestamped name
pub fn save_to_dir(dir: &Path, worksheet: &Worksheet, now: NaiveDateTime) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name(now));
    fs::write(&path, &worksheet.bytes)?;
    log::info!("Saved worksheet to {}", path.display());
    Ok(path)
}
