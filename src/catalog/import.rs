//! Seed import from the hanja CSV list
//!
//! Expected header: `main_sound,level,hanja,meaning,radical,strokes,total_strokes`.
//! Rows are rebuilt from scratch on every run; the progress table is left as is.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rusqlite::params;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::meaning::format_meaning;
use super::models::{Grade, GradeCount};
use super::storage::{grade_counts, CatalogError, CatalogStore};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Seed file not found: {0}")]
    SeedNotFound(PathBuf),

    #[error("Seed header is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

pub type Result<T> = std::result::Result<T, ImportError>;

/// One row of the seed file as written by the upstream word list
#[derive(Debug, Clone, Deserialize)]
struct SeedRow {
    main_sound: String,
    level: String,
    hanja: String,
    meaning: String,
    #[serde(default)]
    radical: Option<String>,
    #[serde(default)]
    strokes: Option<String>,
    #[serde(default)]
    total_strokes: Option<String>,
}

/// Result of a seed import
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub inserted: usize,
    pub skipped: usize,
    pub grade_counts: Vec<GradeCount>,
    /// Progress rows present after the import (unchanged by it)
    pub progress_entries: usize,
}

/// Rebuild the catalog at `store` from the seed file at `seed_path`
pub fn initialize(store: &CatalogStore, seed_path: &Path) -> Result<ImportSummary> {
    if !seed_path.exists() {
        return Err(ImportError::SeedNotFound(seed_path.to_path_buf()));
    }

    log::info!("Database path: {}", store.path().display());
    log::info!("Seed file path: {}", seed_path.display());

    let file = File::open(seed_path)?;
    import_reader(store, file)
}

/// Rebuild the catalog from any CSV source
pub fn import_reader<R: Read>(store: &CatalogStore, source: R) -> Result<ImportSummary> {
    store.ensure_schema()?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);
    check_columns(reader.headers()?)?;

    let mut conn = store.connect()?;
    // Progress rows reference hanja ids that are about to be replaced
    conn.pragma_update(None, "foreign_keys", false)?;
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM hanja", [])?;

    let mut inserted = 0usize;
    let mut skipped = 0usize;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO hanja (main_sound, level, level_order, hanja, meaning, radical, strokes, total_strokes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;

        for (line, result) in reader.deserialize::<SeedRow>().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    log::warn!("Skipping malformed seed row {}: {}", line + 1, e);
                    skipped += 1;
                    continue;
                }
            };

            let Some(grade) = Grade::from_label(&row.level) else {
                log::warn!(
                    "Skipping seed row {} ({}): unknown level '{}'",
                    line + 1,
                    row.hanja,
                    row.level
                );
                skipped += 1;
                continue;
            };

            let radical = row
                .radical
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty());

            stmt.execute(params![
                row.main_sound.trim(),
                grade.label(),
                grade.rank(),
                row.hanja.trim(),
                format_meaning(&row.meaning),
                radical,
                parse_count(row.strokes.as_deref()),
                parse_count(row.total_strokes.as_deref()),
            ])?;
            inserted += 1;

            if inserted % 500 == 0 {
                log::info!("Imported {} hanja...", inserted);
            }
        }
    }

    let counts = grade_counts(&tx)?;
    tx.commit()?;

    let summary = ImportSummary {
        inserted,
        skipped,
        grade_counts: counts,
        progress_entries: store.progress_count()?,
    };
    log::info!(
        "Imported {} hanja ({} skipped, {} progress entries kept)",
        summary.inserted,
        summary.skipped,
        summary.progress_entries
    );
    Ok(summary)
}

const REQUIRED_COLUMNS: [&str; 4] = ["main_sound", "level", "hanja", "meaning"];

fn check_columns(headers: &csv::StringRecord) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h.trim() == **col))
        .map(|col| col.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::MissingColumns(missing))
    }
}

/// Stroke counts are optional; blanks and junk become NULL
fn parse_count(value: Option<&str>) -> Option<i64> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            // Some exports write counts as floats ("12.0")
            value.parse::<f64>().ok().filter(|f| f.fract() == 0.0).map(|f| f as i64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::GradeFilter;
    use tempfile::TempDir;

    const HEADER: &str = "main_sound,level,hanja,meaning,radical,strokes,total_strokes\n";

    fn create_store() -> (CatalogStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = CatalogStore::new(temp_dir.path().join("data").join("hanja.sqlite3"));
        (store, temp_dir)
    }

    fn csv_of(rows: &[&str]) -> String {
        let mut out = HEADER.to_string();
        for row in rows {
            out.push_str(row);
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_single_row_seed_is_searchable() {
        let (store, _temp) = create_store();
        let seed = csv_of(&[r#"수,8급,水,"[[['물'], ['수']]]",水,0,4"#]);

        let summary = import_reader(&store, seed.as_bytes()).unwrap();
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.skipped, 0);

        let page = store.search(GradeFilter::Only(Grade::Eighth), "", 1, 20).unwrap();
        assert_eq!(page.records.len(), 1);
        let record = &page.records[0];
        assert_eq!(record.hanja, "水");
        assert_eq!(record.meaning, "물 [수]");
        assert_eq!(record.level_order, 1);
        assert_eq!(record.strokes, Some(0));
        assert_eq!(record.total_strokes, Some(4));

        let none = store.search(GradeFilter::Only(Grade::Seventh), "", 1, 20).unwrap();
        assert_eq!(none.total_count, 0);
        assert!(none.records.is_empty());
    }

    #[test]
    fn test_malformed_meaning_is_stored_verbatim() {
        let (store, _temp) = create_store();
        let seed = csv_of(&[r#"화,8급,火,"불 (fire",火,,"#]);

        import_reader(&store, seed.as_bytes()).unwrap();
        let page = store.search(GradeFilter::All, "", 1, 20).unwrap();
        assert_eq!(page.records[0].meaning, "불 (fire");
        assert_eq!(page.records[0].strokes, None);
        assert_eq!(page.records[0].total_strokes, None);
    }

    #[test]
    fn test_unknown_level_rows_are_skipped() {
        let (store, _temp) = create_store();
        let seed = csv_of(&[
            r#"수,8급,水,"[[['물'], ['수']]]",水,0,4"#,
            r#"화,9급,火,"[[['불'], ['화']]]",火,0,4"#,
        ]);

        let summary = import_reader(&store, seed.as_bytes()).unwrap();
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(store.total_count().unwrap(), 1);
    }

    #[test]
    fn test_short_rows_are_skipped_without_aborting() {
        let (store, _temp) = create_store();
        let seed = csv_of(&["수,8급", r#"목,8급,木,"[[['나무'], ['목']]]",木,0,4"#]);

        let summary = import_reader(&store, seed.as_bytes()).unwrap();
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn test_rerun_replaces_records_and_keeps_progress() {
        let (store, _temp) = create_store();
        let seed = csv_of(&[
            r#"수,8급,水,"[[['물'], ['수']]]",水,0,4"#,
            r#"화,8급,火,"[[['불'], ['화']]]",火,0,4"#,
            r#"일,7급,日,"[[['날'], ['일']]]",日,0,4"#,
        ]);

        import_reader(&store, seed.as_bytes()).unwrap();
        {
            let conn = store.connect().unwrap();
            conn.execute(
                "INSERT INTO progress (client_id, hanja_id, result) VALUES ('client-a', 1, 'correct')",
                [],
            )
            .unwrap();
        }

        let summary = import_reader(&store, seed.as_bytes()).unwrap();
        assert_eq!(store.total_count().unwrap(), 3);
        assert_eq!(store.progress_count().unwrap(), 1);
        assert_eq!(summary.progress_entries, 1);
        assert_eq!(
            summary.grade_counts,
            vec![
                GradeCount { grade: Grade::Eighth, count: 2 },
                GradeCount { grade: Grade::Seventh, count: 1 },
            ]
        );
    }

    #[test]
    fn test_wrong_header_keeps_existing_catalog() {
        let (store, _temp) = create_store();
        let seed = csv_of(&[r#"수,8급,水,"[[['물'], ['수']]]",水,0,4"#]);
        import_reader(&store, seed.as_bytes()).unwrap();

        let bad = "sound,grade,char\n수,8급,水\n화,8급,火\n";
        let result = import_reader(&store, bad.as_bytes());
        match result {
            Err(ImportError::MissingColumns(cols)) => {
                assert_eq!(cols, vec!["main_sound", "level", "hanja", "meaning"]);
            }
            other => panic!("expected missing columns, got {:?}", other),
        }
        assert_eq!(store.total_count().unwrap(), 1);
    }

    #[test]
    fn test_initialize_from_file() {
        let (store, temp) = create_store();
        let seed_path = temp.path().join("hanja.csv");
        std::fs::write(&seed_path, csv_of(&[r#"수,8급,水,"[[['물'], ['수']]]",水,0,4"#])).unwrap();

        let summary = initialize(&store, &seed_path).unwrap();
        assert_eq!(summary.inserted, 1);
        assert!(store.path().exists());
    }

    #[test]
    fn test_initialize_missing_seed() {
        let (store, temp) = create_store();
        let result = initialize(&store, &temp.path().join("missing.csv"));
        assert!(matches!(result, Err(ImportError::SeedNotFound(_))));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(Some("12")), Some(12));
        assert_eq!(parse_count(Some(" 7 ")), Some(7));
        assert_eq!(parse_count(Some("12.0")), Some(12));
        assert_eq!(parse_count(Some("")), None);
        assert_eq!(parse_count(Some("n/a")), None);
        assert_eq!(parse_count(None), None);
    }
}
