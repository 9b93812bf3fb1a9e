use anyhow::Result;
use clap::Parser;
use std::io::Write;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transcript_extractor::{Cli, Config, ExtractionPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "transcript_extractor=debug"
    } else {
        "transcript_extractor=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load().await?;
    if let Some(dir) = cli.output {
        config.output_dir = dir;
    }

    let reference = match cli.reference {
        Some(reference) => reference,
        None => prompt_for_reference()?,
    };
    let reference = reference.trim().to_string();
    if reference.is_empty() {
        return Ok(());
    }

    let pipeline = ExtractionPipeline::new(config);
    let path = pipeline.run(&reference, cli.translate).await?;

    println!("Transcript saved to: {}", path.display());

    Ok(())
}

fn prompt_for_reference() -> Result<String> {
    print!("유튜브 영상 ID 또는 URL을 입력하세요: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    Ok(line)
}
