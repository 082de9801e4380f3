mod cli;

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, fmt};

use cli::{Cli, Commands};
use nikud_prep::{PrepareConfig, canonicalize, load_book, prepare_dataset, review_rows, strip};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(log_level(cli.verbose));

    match cli.command {
        Commands::Prepare(args) => {
            let config = PrepareConfig::from(args);
            let report = prepare_dataset(&config)
                .with_context(|| format!("preparing dataset from {}", config.source.display()))?;
            println!(
                "{} pairs from {} records ({} skipped)",
                report.pairs, report.records, report.skipped
            );
            println!("input:    {}", report.input_path.display());
            println!("expected: {}", report.expected_path.display());
        }
        Commands::ExportReview(args) => {
            let book = load_book(&args.book)?;
            let rows = review_rows(&book);
            nikud_prep::write_review_csv(&rows, &args.out)?;
            println!("{} verses of {} -> {}", rows.len(), book.name, args.out.display());
        }
        Commands::Canonicalize(args) => match args.text {
            Some(text) => print_forms(&text),
            None => {
                for line in io::stdin().lock().lines() {
                    print_forms(&line.context("reading stdin")?);
                }
            }
        },
    }

    Ok(())
}

fn print_forms(text: &str) {
    let canonical = canonicalize(text);
    println!("{}\t{}", canonical, strip(&canonical));
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_tracing(level: LevelFilter) {
    let subscriber = fmt().with_max_level(level).with_target(false).finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}
