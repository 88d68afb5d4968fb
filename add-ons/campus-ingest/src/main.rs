//! Document ingestion CLI: extracts `.txt`, `.docx` and `.pdf` files into a JSON array of
//! `{title, content}` records.
//!
//! Usage:
//!   campus-ingest                                   # ChatBot/data_files -> ChatBot/documents.json
//!   campus-ingest --data-dir docs --output kb.json

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "campus-ingest", version, about = "Extract campus documents into JSON records")]
struct Cli {
    /// Directory holding the source documents
    #[arg(long, default_value = "ChatBot/data_files")]
    data_dir: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "ChatBot/documents.json")]
    output: PathBuf,

    /// Verbose logging (lists skipped files)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), campus_skills::IngestError> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    let filter = if cli.verbose {
        "campus_skills=debug,campus_ingest=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let records = campus_skills::build_records(&cli.data_dir)?;
    campus_skills::write_records(&records, &cli.output)?;
    tracing::info!(
        count = records.len(),
        output = %cli.output.display(),
        "Documents extracted"
    );
    println!(
        "✅ Extracted data from {} files and saved to {}",
        records.len(),
        cli.output.display()
    );
    Ok(())
}
