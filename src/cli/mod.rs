use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "transcript-extractor",
    about = "Extract YouTube transcripts into timestamped Markdown reports",
    version,
    long_about = "Resolves a YouTube video ID or URL, fetches the transcript and video \
metadata, and saves a Markdown report with clickable per-line timestamps. Pass --translate \
to append a Korean translation line after each transcript line."
)]
pub struct Cli {
    /// YouTube video ID or URL (prompts interactively when omitted)
    #[arg(value_name = "REFERENCE")]
    pub reference: Option<String>,

    /// Append a Korean translation line after each transcript line
    #[arg(short, long)]
    pub translate: bool,

    /// Override the configured output directory
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_and_flags() {
        let cli = Cli::parse_from(["transcript-extractor", "dQw4w9WgXcQ", "--translate"]);
        assert_eq!(cli.reference.as_deref(), Some("dQw4w9WgXcQ"));
        assert!(cli.translate);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_parse_short_translate_flag() {
        let cli = Cli::parse_from(["transcript-extractor", "-t", "dQw4w9WgXcQ"]);
        assert!(cli.translate);
    }

    #[test]
    fn test_parse_without_reference() {
        let cli = Cli::parse_from(["transcript-extractor"]);
        assert!(cli.reference.is_none());
        assert!(!cli.translate);
    }

    #[test]
    fn test_parse_output_override() {
        let cli = Cli::parse_from(["transcript-extractor", "dQw4w9WgXcQ", "-o", "reports"]);
        assert_eq!(cli.output, Some(PathBuf::from("reports")));
    }
}
