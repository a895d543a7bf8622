use anyhow::Result;

use hanja_lib::catalog::GradeFilter;

use crate::app::App;
use crate::render::terminal::{paint, record_line, Color};
use crate::OutputFormat;

const MEANING_WIDTH: usize = 48;

pub fn run(
    app: &App,
    filter: GradeFilter,
    query: &str,
    page: usize,
    per_page: Option<usize>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let page_size = per_page.unwrap_or(app.config.page_size);
    let results = app.search(filter, query, page, page_size)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "grade": filter.label(),
                "query": query,
                "page": results.page,
                "pageSize": results.page_size,
                "totalPages": results.total_pages(),
                "totalCount": results.total_count,
                "records": results.records,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if results.records.is_empty() {
                if query.trim().is_empty() {
                    println!("No characters at {}.", filter.label());
                } else {
                    println!("No results found for '{}' ({}).", query.trim(), filter.label());
                }
                return Ok(());
            }

            for record in &results.records {
                println!("{}", record_line(record, MEANING_WIDTH, use_color));
            }

            println!(
                "\n{}",
                paint(
                    &format!(
                        "page {} / {}  ({} results, {})",
                        results.page,
                        results.total_pages(),
                        results.total_count,
                        filter.label()
                    ),
                    Color::DIM,
                    use_color
                )
            );
        }
    }

    Ok(())
}
