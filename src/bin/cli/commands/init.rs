use std::path::PathBuf;

use anyhow::{Context, Result};

use hanja_lib::catalog;
use hanja_lib::config::AppConfig;

use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(
    db_path: Option<PathBuf>,
    seed_path: Option<PathBuf>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let mut config = AppConfig::load().context("Failed to load configuration")?;
    if let Some(path) = db_path {
        config.database_path = path;
    }
    if let Some(path) = seed_path {
        config.seed_path = path;
    }

    let store = config.store();
    let summary = catalog::initialize(&store, &config.seed_path).with_context(|| {
        format!(
            "Failed to initialize {} from {}",
            store.path().display(),
            config.seed_path.display()
        )
    })?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "databasePath": store.path().to_string_lossy(),
                "seedPath": config.seed_path.to_string_lossy(),
                "summary": summary,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Database: {}", store.path().display());
            println!();
            for entry in &summary.grade_counts {
                println!("  {:<5} {:>5}개", entry.grade.label(), entry.count);
            }
            println!();
            println!(
                "{}",
                paint(
                    &format!("총 {}개 한자 가져오기 완료", summary.inserted),
                    Color::GREEN,
                    use_color
                )
            );
            if summary.skipped > 0 {
                println!(
                    "{}",
                    paint(&format!("Skipped {} invalid rows", summary.skipped), Color::YELLOW, use_color)
                );
            }
            println!("Progress entries kept: {}", summary.progress_entries);
        }
    }

    Ok(())
}
