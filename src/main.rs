use anyhow::{Context, Result};
use clap::Parser;
use grammar_notes::{
    config, logging,
    processing::{NotesError, NotesService},
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "grammar-notes",
    version,
    about = "Process all .txt files in a given directory, sending sentences to a language model for translation and grammar notes."
)]
struct Cli {
    /// Path to the directory containing .txt files to process.
    input_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();

    let config = config::load_config().context("failed to load configuration")?;
    let service =
        NotesService::from_config(&config).context("failed to initialize annotation client")?;

    match service.run(&cli.input_dir).await {
        Ok(outcome) => {
            let metrics = outcome
                .metrics
                .to_json()
                .context("failed to serialize run metrics")?;
            tracing::info!(
                output = %outcome.output_dir.display(),
                %metrics,
                "Run complete"
            );
            Ok(())
        }
        Err(error @ NotesError::InputDirectoryMissing(_)) => {
            tracing::error!("Error: {error}");
            Ok(())
        }
        Err(error) => Err(anyhow::Error::new(error).context("grammar notes run aborted")),
    }
}
