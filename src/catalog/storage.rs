//! SQLite-backed catalog store
//!
//! The store only remembers where the database lives. Each operation opens its
//! own connection and drops it before returning, so no handle outlives a call.
//!
//! Tables:
//! ```text
//! hanja     character records (rebuilt by the seed import)
//! progress  per-client answer outcomes (reserved, left alone by imports)
//! ```

use std::path::{Path, PathBuf};

use rand::seq::index;
use rand::Rng;
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use thiserror::Error;

use super::models::*;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid grade stored for record {id}: {level}")]
    InvalidGrade { id: i64, level: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

pub(crate) const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS hanja (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        main_sound TEXT NOT NULL,
        level TEXT NOT NULL,
        level_order INTEGER NOT NULL,
        hanja TEXT NOT NULL,
        meaning TEXT NOT NULL,
        radical TEXT,
        strokes INTEGER,
        total_strokes INTEGER
    );

    CREATE TABLE IF NOT EXISTS progress (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        client_id TEXT NOT NULL,
        hanja_id INTEGER NOT NULL,
        result TEXT NOT NULL CHECK(result IN ('correct', 'incorrect')),
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (hanja_id) REFERENCES hanja(id)
    );

    CREATE INDEX IF NOT EXISTS idx_hanja_level ON hanja(level);
    CREATE INDEX IF NOT EXISTS idx_hanja_sound ON hanja(main_sound);
    CREATE INDEX IF NOT EXISTS idx_progress_client ON progress(client_id);
    CREATE INDEX IF NOT EXISTS idx_progress_hanja ON progress(hanja_id);
"#;

/// Largest LIMIT/OFFSET that survives the conversion to an SQLite integer
const MAX_SQL_INT: usize = i64::MAX as usize;

const RECORD_COLUMNS: &str =
    "id, hanja, main_sound, meaning, level, level_order, radical, strokes, total_strokes";

/// Handle to the catalog database file
#[derive(Debug, Clone)]
pub struct CatalogStore {
    db_path: PathBuf,
}

impl CatalogStore {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection for a single operation
    pub(crate) fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)?;
        register_functions(&conn)?;
        Ok(conn)
    }

    /// Create the parent directory and both tables if they are missing
    pub fn ensure_schema(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    // ==================== Queries ====================

    /// One page of records matching the grade filter and free-text query.
    ///
    /// Pages are 1-based. Ordering is rank, then reading, then id, so pages
    /// never overlap.
    pub fn search(
        &self,
        filter: GradeFilter,
        query: &str,
        page: usize,
        page_size: usize,
    ) -> Result<SearchPage> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_SQL_INT);

        let (where_clause, mut values) = search_conditions(filter, query);
        let conn = self.connect()?;

        let total_count: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM hanja WHERE {}", where_clause),
            params_from_iter(values.iter()),
            |row| row.get(0),
        )?;

        values.push(Value::Integer(page_size as i64));
        let offset = (page - 1).saturating_mul(page_size).min(MAX_SQL_INT);
        values.push(Value::Integer(offset as i64));

        let sql = format!(
            "SELECT {} FROM hanja WHERE {} ORDER BY level_order, main_sound, id LIMIT ? OFFSET ?",
            RECORD_COLUMNS, where_clause
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(values.iter()), read_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(into_record(row?)?);
        }

        Ok(SearchPage {
            records,
            total_count: total_count as usize,
            page,
            page_size,
        })
    }

    /// Uniform random selection of up to `count` records without replacement.
    ///
    /// When fewer records match, all of them are returned in random order.
    pub fn random_sample<R: Rng + ?Sized>(
        &self,
        filter: GradeFilter,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<CharacterRecord>> {
        let conn = self.connect()?;

        let ids: Vec<i64> = match filter.grade() {
            Some(grade) => {
                let mut stmt = conn.prepare("SELECT id FROM hanja WHERE level = ?1 ORDER BY id")?;
                let ids = stmt
                    .query_map(params![grade.label()], |row| row.get(0))?
                    .collect::<std::result::Result<Vec<i64>, _>>()?;
                ids
            }
            None => {
                let mut stmt = conn.prepare("SELECT id FROM hanja ORDER BY id")?;
                let ids = stmt
                    .query_map([], |row| row.get(0))?
                    .collect::<std::result::Result<Vec<i64>, _>>()?;
                ids
            }
        };

        let amount = count.min(ids.len());
        if amount == 0 {
            return Ok(Vec::new());
        }

        let chosen: Vec<i64> = index::sample(rng, ids.len(), amount)
            .into_iter()
            .map(|i| ids[i])
            .collect();

        let mut stmt = conn.prepare(&format!("SELECT {} FROM hanja WHERE id = ?1", RECORD_COLUMNS))?;
        let mut records = Vec::with_capacity(chosen.len());
        for id in chosen {
            let raw = stmt.query_row(params![id], read_row)?;
            records.push(into_record(raw)?);
        }

        log::debug!("Sampled {} of {} records ({})", records.len(), ids.len(), filter);
        Ok(records)
    }

    /// Up to `count` distinct meanings different from `exclude`, chosen at random
    pub fn distinct_other_meanings<R: Rng + ?Sized>(
        &self,
        exclude: &str,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare("SELECT DISTINCT meaning FROM hanja WHERE meaning != ?1 ORDER BY meaning")?;
        let meanings: Vec<String> = stmt
            .query_map(params![exclude], |row| row.get(0))?
            .collect::<std::result::Result<_, _>>()?;

        let amount = count.min(meanings.len());
        Ok(index::sample(rng, meanings.len(), amount)
            .into_iter()
            .map(|i| meanings[i].clone())
            .collect())
    }

    // ==================== Statistics ====================

    pub fn total_count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM hanja", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Record counts per grade, lowest grade first. Grades without records are omitted.
    pub fn grade_counts(&self) -> Result<Vec<GradeCount>> {
        let conn = self.connect()?;
        grade_counts(&conn)
    }

    /// Number of rows in the progress table
    pub fn progress_count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM progress", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

pub(crate) fn grade_counts(conn: &Connection) -> Result<Vec<GradeCount>> {
    let mut stmt = conn.prepare(
        "SELECT level, COUNT(*) FROM hanja GROUP BY level ORDER BY MIN(level_order)",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;

    let mut counts = Vec::new();
    for row in rows {
        let (level, count) = row?;
        match Grade::from_label(&level) {
            Some(grade) => counts.push(GradeCount {
                grade,
                count: count as usize,
            }),
            None => log::warn!("Ignoring {} records with unknown level '{}'", count, level),
        }
    }
    Ok(counts)
}

/// `fold_case(text)`: Unicode lowercase, matching the folding applied to the
/// query. SQLite's own `LOWER` only folds ASCII.
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    Ok(())
}

/// Build the WHERE clause and its positional values for a search
fn search_conditions(filter: GradeFilter, query: &str) -> (String, Vec<Value>) {
    let mut conditions = Vec::new();
    let mut values = Vec::new();

    if let Some(grade) = filter.grade() {
        conditions.push("level = ?".to_string());
        values.push(Value::Text(grade.label().to_string()));
    }

    let query = query.trim();
    if !query.is_empty() {
        let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
        conditions.push(
            "(fold_case(hanja) LIKE ? ESCAPE '\\' OR fold_case(main_sound) LIKE ? ESCAPE '\\' OR fold_case(meaning) LIKE ? ESCAPE '\\')"
                .to_string(),
        );
        for _ in 0..3 {
            values.push(Value::Text(pattern.clone()));
        }
    }

    let where_clause = if conditions.is_empty() {
        "1=1".to_string()
    } else {
        conditions.join(" AND ")
    };
    (where_clause, values)
}

fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Row as stored, before the level label is validated
struct RawRecord {
    id: i64,
    hanja: String,
    main_sound: String,
    meaning: String,
    level: String,
    level_order: i64,
    radical: Option<String>,
    strokes: Option<i64>,
    total_strokes: Option<i64>,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawRecord> {
    Ok(RawRecord {
        id: row.get(0)?,
        hanja: row.get(1)?,
        main_sound: row.get(2)?,
        meaning: row.get(3)?,
        level: row.get(4)?,
        level_order: row.get(5)?,
        radical: row.get(6)?,
        strokes: row.get(7)?,
        total_strokes: row.get(8)?,
    })
}

fn into_record(raw: RawRecord) -> Result<CharacterRecord> {
    let grade = Grade::from_label(&raw.level).ok_or(CatalogError::InvalidGrade {
        id: raw.id,
        level: raw.level.clone(),
    })?;

    Ok(CharacterRecord {
        id: raw.id,
        hanja: raw.hanja,
        main_sound: raw.main_sound,
        meaning: raw.meaning,
        grade,
        level_order: raw.level_order,
        radical: raw.radical.filter(|r| !r.is_empty()),
        strokes: raw.strokes,
        total_strokes: raw.total_strokes,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::TempDir;

    pub struct Seed<'a> {
        pub hanja: &'a str,
        pub sound: &'a str,
        pub meaning: &'a str,
        pub grade: Grade,
    }

    pub fn seed(hanja: &'static str, sound: &'static str, meaning: &'static str, grade: Grade) -> Seed<'static> {
        Seed {
            hanja,
            sound,
            meaning,
            grade,
        }
    }

    /// A fresh store in a temporary directory filled with the given rows
    pub fn create_test_store(rows: &[Seed<'_>]) -> (CatalogStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = CatalogStore::new(temp_dir.path().join("catalog.sqlite3"));
        store.ensure_schema().unwrap();

        let conn = store.connect().unwrap();
        for row in rows {
            conn.execute(
                "INSERT INTO hanja (main_sound, level, level_order, hanja, meaning) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![row.sound, row.grade.label(), row.grade.rank(), row.hanja, row.meaning],
            )
            .unwrap();
        }
        (store, temp_dir)
    }

    /// `n` rows spread across grades with unique glyphs and meanings
    pub fn create_numbered_store(n: usize) -> (CatalogStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = CatalogStore::new(temp_dir.path().join("catalog.sqlite3"));
        store.ensure_schema().unwrap();

        let conn = store.connect().unwrap();
        for i in 0..n {
            let grade = Grade::ALL[i % 3];
            conn.execute(
                "INSERT INTO hanja (main_sound, level, level_order, hanja, meaning) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    format!("음{}", i % 7),
                    grade.label(),
                    grade.rank(),
                    format!("字{}", i),
                    format!("뜻{}", i),
                ],
            )
            .unwrap();
        }
        (store, temp_dir)
    }
}
