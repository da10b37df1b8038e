//! lectio - Terminal Daily Bible Reader
//!
//! Follows a yearly reading plan and compares two translations side by
//! side, with verses and pericope headings aligned row by row.
//!
//! ## Usage
//!
//! ```bash
//! lectio                          # today's reading, ESV vs TB
//! lectio -d 12-25 -t KJV -c CUV   # pick date and translations
//! lectio -o - --single            # print today's reading to stdout
//! ```
//!
//! ## Navigation (Vim-style)
//!
//! - `j/k`: move between rows
//! - `Tab`: switch panel
//! - `Space`/`y`: select and copy verses
//! - `[`/`]`: previous/next day
//! - `:q`: quit

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;

use lectio::align::align_passages;
use lectio::api::Client;
use lectio::books::BookOrder;
use lectio::controller::{fetch_both, run_app};
use lectio::model::{parse_month_day, AppState, ComparisonView};
use lectio::plan::ReadingPlan;
use lectio::ui::{render_comparison_text, render_passage_text};

/// Runs CLI mode: fetch the day's reading and write it to the output.
fn run_cli_mode(client: &Client, plan: &ReadingPlan, date: NaiveDate, args: &Args) -> Result<()> {
    let output = args.output.as_deref().unwrap_or("-");

    let Some(verses_string) = plan.verses_string_for(date) else {
        anyhow::bail!("No readings found for {}", date.format("%B %-d"));
    };

    let text = if args.single {
        let passage = match client.fetch_day_data(&args.translation, &verses_string) {
            Ok(passage) => passage,
            Err(error) => anyhow::bail!("{}: {error}", args.translation),
        };
        render_passage_text(&passage, args.width)
    } else {
        let (result1, result2) = fetch_both(client, &args.translation, &args.compare, &verses_string);
        let passage1 = match result1 {
            Ok(passage) => passage,
            Err(error) => anyhow::bail!("{}: {error}", args.translation),
        };
        let passage2 = match result2 {
            Ok(passage) => passage,
            Err(error) => anyhow::bail!("{}: {error}", args.compare),
        };

        let order = BookOrder::canonical();
        let (rows1, rows2) = align_passages(&passage1, &passage2, Some(&order));
        render_comparison_text(
            &ComparisonView { rows1, rows2 },
            &args.translation,
            &args.compare,
            args.width,
        )
    };

    if output == "-" {
        // Write to stdout
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(text.as_bytes())?;
    } else {
        // Write to file
        fs::write(output, &text)?;
        eprintln!("Wrote {} reading to {}", date.format("%B %-d"), output);
    }

    Ok(())
}

/// lectio - A terminal viewer for daily Bible readings
///
/// When run without -o/--output, opens an interactive TUI comparing two
/// translations side by side. With -o/--output, runs in CLI mode and
/// writes the day's reading to a file (or stdout with "-").
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Reading plan JSON file (array indexed by day of year)
    #[arg(short = 'p', long = "plan", default_value = "reading_plan.json")]
    plan: PathBuf,

    /// Date to open, as MM-DD (defaults to today)
    #[arg(short = 'd', long = "date")]
    date: Option<String>,

    /// Primary translation (left panel)
    #[arg(short = 't', long = "translation", default_value = "ESV")]
    translation: String,

    /// Comparison translation (right panel)
    #[arg(short = 'c', long = "compare", default_value = "TB")]
    compare: String,

    /// Verse API base URL
    #[arg(long = "api-url", default_value = "https://api.blessings365.top")]
    api_url: String,

    /// Output file (enables CLI mode). Use "-" for stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// In CLI mode, write only the primary translation without comparison
    #[arg(long = "single")]
    single: bool,

    /// Output width in columns for CLI mode
    #[arg(long = "width", default_value = "100")]
    width: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let today = chrono::Local::now().date_naive();
    let date = match &args.date {
        Some(input) => match parse_month_day(input, chrono::Datelike::year(&today)) {
            Some(date) => date,
            None => anyhow::bail!("Invalid date '{}': expected MM-DD", input),
        },
        None => today,
    };

    if args.width < 24 {
        anyhow::bail!("Output width must be at least 24 (got {})", args.width);
    }

    let plan = ReadingPlan::load(&args.plan)?;
    let client = Client::new(&args.api_url);

    // CLI mode: output to file/stdout
    if args.output.is_some() {
        run_cli_mode(&client, &plan, date, &args)?;
    } else {
        // TUI mode
        let state = AppState::new(date, &args.translation, &args.compare);
        if let Some(copied) = run_app(state, client, plan)? {
            // Staged copy text, printed now that the terminal is restored.
            println!("{copied}");
        }
    }

    Ok(())
}
