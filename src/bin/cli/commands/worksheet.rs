use std::path::Path;

use anyhow::Result;

use hanja_lib::worksheet::WorksheetOptions;

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    options: &WorksheetOptions,
    out: Option<&Path>,
    format: &OutputFormat,
) -> Result<()> {
    let Some(sheet) = app.generate_worksheet(options)? else {
        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({ "saved": false, "grade": options.filter.label() });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Plain => {
                println!("No characters at {}; nothing to print.", options.filter.label());
            }
        }
        return Ok(());
    };

    let path = app.save_worksheet(&sheet, out)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "saved": true,
                "path": path.to_string_lossy(),
                "grade": options.filter.label(),
                "rows": sheet.row_count,
                "pages": sheet.page_count,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "Saved {} ({} characters, {} pages)",
                path.display(),
                sheet.row_count,
                sheet.page_count
            );
        }
    }

    Ok(())
}
