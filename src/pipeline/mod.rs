use std::path::PathBuf;

use crate::config::Config;
use crate::metadata::{MetadataChain, VideoMetadata};
use crate::output::{self, Report};
use crate::resolve::resolve;
use crate::transcript::{innertube::InnerTubeSource, TranscriptAssembler};
use crate::translate::GoogleTranslator;
use crate::Result;

/// Sequences the extraction run: resolve the reference, fetch metadata and
/// transcript, and persist the assembled report
pub struct ExtractionPipeline {
    assembler: TranscriptAssembler,
    metadata_chain: MetadataChain,
    output_dir: PathBuf,
}

impl ExtractionPipeline {
    /// Create a pipeline wired to the remote providers
    pub fn new(config: Config) -> Self {
        let client = reqwest::Client::new();

        let assembler = TranscriptAssembler::new(
            Box::new(InnerTubeSource::new(client.clone())),
            Box::new(GoogleTranslator::new(client.clone())),
            config.languages.clone(),
            config.translation_language.clone(),
        );

        let metadata_chain = MetadataChain::new(&client, config.api_key.clone());

        Self {
            assembler,
            metadata_chain,
            output_dir: config.output_dir,
        }
    }

    /// Create a pipeline from explicit components
    pub fn with_components(
        assembler: TranscriptAssembler,
        metadata_chain: MetadataChain,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            assembler,
            metadata_chain,
            output_dir,
        }
    }

    /// Run a single extraction and return the written report path.
    ///
    /// Transcript failure aborts the run without writing a file. An exhausted
    /// metadata chain substitutes synthetic defaults instead.
    pub async fn run(&self, raw_reference: &str, translate: bool) -> Result<PathBuf> {
        let id = resolve(raw_reference);
        tracing::info!("Resolved reference to video ID: {}", id);

        // No data dependency between the two fetches
        let (metadata, lines) = tokio::join!(
            self.metadata_chain.fetch(&id),
            self.assembler.assemble(&id, translate),
        );

        let lines = lines?;

        let metadata = metadata.unwrap_or_else(|| {
            tracing::warn!("No metadata source succeeded for {}; using defaults", id);
            VideoMetadata::fallback(&id)
        });

        let report = Report {
            metadata,
            body: lines,
        };

        let path = output::write_report(&report, &self.output_dir)?;
        tracing::info!("Report written to {}", path.display());

        Ok(path)
    }
}
