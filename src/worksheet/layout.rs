//! Worksheet geometry
//!
//! All positions are in millimetres from the bottom-left corner of an A4 page,
//! matching PDF user space before the mm→pt conversion.

use serde::{Deserialize, Serialize};

use crate::catalog::CharacterRecord;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

pub const TITLE_OFFSET_MM: f32 = 30.0;
pub const DATE_OFFSET_MM: f32 = 38.0;
pub const FIRST_ROW_OFFSET_MM: f32 = 55.0;
pub const CONTINUATION_TOP_OFFSET_MM: f32 = 25.0;
pub const BOTTOM_MARGIN_MM: f32 = 25.0;
pub const LEFT_MARGIN_MM: f32 = 15.0;
pub const LABEL_COLUMN_MM: f32 = 55.0;
pub const RIGHT_MARGIN_MM: f32 = 10.0;
pub const CELL_PITCH_MM: f32 = 18.0;
pub const BOX_SIZE_MM: f32 = 16.0;
pub const BOX_DROP_MM: f32 = 3.0;
pub const ROW_GUTTER_MM: f32 = 5.0;
pub const FOOTER_OFFSET_MM: f32 = 10.0;

pub const MEANING_MAX_CHARS: usize = 20;
pub const ELLIPSIS: &str = "...";

/// Vertical distance between consecutive rows
pub const ROW_SPACING_MM: f32 = CELL_PITCH_MM + ROW_GUTTER_MM;

/// A tracing box with its dashed center guides
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracingBox {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl TracingBox {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.size / 2.0, self.y + self.size / 2.0)
    }
}

/// One character row: labels on the left, tracing boxes on the right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowLayout {
    /// Baseline of the row
    pub y: f32,
    pub grade_label: String,
    pub glyph: String,
    pub reading: String,
    pub meaning: String,
    pub boxes: Vec<TracingBox>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub rows: Vec<RowLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetLayout {
    pub title: String,
    pub date_line: String,
    pub pages: Vec<PageLayout>,
}

impl WorksheetLayout {
    pub fn row_count(&self) -> usize {
        self.pages.iter().map(|p| p.rows.len()).sum()
    }
}

/// Cut a meaning to `MEANING_MAX_CHARS` characters, marking the cut with "..."
pub fn truncate_meaning(meaning: &str) -> String {
    if meaning.chars().count() > MEANING_MAX_CHARS {
        let mut cut: String = meaning.chars().take(MEANING_MAX_CHARS).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        meaning.to_string()
    }
}

/// Number of tracing boxes that fit between the label column and the right margin
pub fn max_columns() -> usize {
    let width = PAGE_WIDTH_MM - RIGHT_MARGIN_MM - LEFT_MARGIN_MM - LABEL_COLUMN_MM;
    (width / CELL_PITCH_MM).floor() as usize
}

/// Box positions for one row, stopping before the right margin
pub fn row_boxes(row_y: f32, repeat: usize) -> Vec<TracingBox> {
    let grid_start_x = LEFT_MARGIN_MM + LABEL_COLUMN_MM;
    let right_limit = PAGE_WIDTH_MM - RIGHT_MARGIN_MM;

    let mut boxes = Vec::with_capacity(repeat.min(max_columns()));
    for i in 0..repeat {
        let x = grid_start_x + i as f32 * CELL_PITCH_MM;
        if x + CELL_PITCH_MM > right_limit {
            break;
        }
        boxes.push(TracingBox {
            x,
            y: row_y - BOX_DROP_MM,
            size: BOX_SIZE_MM,
        });
    }
    boxes
}

/// Lay out one row per record, breaking pages at the bottom margin
pub fn layout_rows(records: &[CharacterRecord], repeat: usize) -> Vec<PageLayout> {
    let mut pages = vec![PageLayout::default()];
    let mut cursor = PAGE_HEIGHT_MM - FIRST_ROW_OFFSET_MM;

    for record in records {
        if cursor < BOTTOM_MARGIN_MM {
            pages.push(PageLayout::default());
            cursor = PAGE_HEIGHT_MM - CONTINUATION_TOP_OFFSET_MM;
        }

        let row = RowLayout {
            y: cursor,
            grade_label: format!("[{}]", record.grade.label()),
            glyph: record.hanja.clone(),
            reading: record.main_sound.clone(),
            meaning: truncate_meaning(&record.meaning),
            boxes: row_boxes(cursor, repeat),
        };
        if let Some(page) = pages.last_mut() {
            page.rows.push(row);
        }
        cursor -= ROW_SPACING_MM;
    }

    pages
}
