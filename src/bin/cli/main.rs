mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hanja_lib::catalog::GradeFilter;

#[derive(Parser)]
#[command(name = "hanja-cli", about = "Hanja exam study CLI and TUI", version)]
struct Cli {
    /// Catalog database path (overrides the config file and HANJA_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database and (re)load characters from the seed CSV
    Init {
        /// Seed CSV path (default: config, HANJA_SEED_PATH, ./hanja.csv)
        #[arg(long)]
        seed: Option<PathBuf>,
    },

    /// Search characters by glyph, reading or meaning
    Search {
        /// Text to match; empty lists everything
        query: Option<String>,
        /// Grade label such as 8급 or 5급Ⅱ (default: 전체)
        #[arg(long, default_value = "전체")]
        grade: GradeFilter,
        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: usize,
        /// Results per page (default: config page_size)
        #[arg(long)]
        per_page: Option<usize>,
    },

    /// Generate a PDF writing practice sheet
    Worksheet {
        /// Grade label (default: 전체)
        #[arg(long, default_value = "전체")]
        grade: GradeFilter,
        /// Number of characters
        #[arg(long)]
        count: Option<usize>,
        /// Tracing boxes per character
        #[arg(long)]
        repeat: Option<usize>,
        /// Output directory (default: downloads folder)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Launch interactive TUI
    #[cfg(feature = "tui")]
    Tui,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            #[cfg(feature = "tui")]
            {
                tui::run(cli.db)?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
        Some(Command::Init { seed }) => {
            commands::init::run(cli.db, seed, &cli.format, use_color)?;
        }
        Some(Command::Search { query, grade, page, per_page }) => {
            let app = app::App::new(cli.db)?;
            let query = query.unwrap_or_default();
            commands::search::run(&app, grade, &query, page, per_page, &cli.format, use_color)?;
        }
        Some(Command::Worksheet { grade, count, repeat, out }) => {
            let mut app = app::App::new(cli.db)?;
            let mut options = app.worksheet_options(grade);
            if let Some(count) = count {
                options.count = count;
            }
            if let Some(repeat) = repeat {
                options.repeat = repeat;
            }
            commands::worksheet::run(&mut app, &options, out.as_deref(), &cli.format)?;
        }
        #[cfg(feature = "tui")]
        Some(Command::Tui) => {
            tui::run(cli.db)?;
        }
    }

    Ok(())
}
