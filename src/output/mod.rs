use std::path::{Path, PathBuf};

use crate::metadata::VideoMetadata;
use crate::transcript::FormattedLine;
use crate::utils::sanitize_filename;
use crate::{ExtractorError, Result};

/// Assembled report: metadata plus the ordered transcript body.
/// Constructed once, written once, never mutated after persistence.
pub struct Report {
    pub metadata: VideoMetadata,
    pub body: Vec<FormattedLine>,
}

impl Report {
    /// Render the full Markdown document
    pub fn render(&self) -> String {
        let mut doc = String::new();

        doc.push_str(&format!("# {}\n\n", self.metadata.title));
        doc.push_str(&format!("**채널명:** {}\n\n", self.metadata.channel));
        doc.push_str(&format!("**URL:** {}\n\n", self.metadata.url));
        doc.push_str("---\n\n");
        doc.push_str("## 트랜스크립트\n\n");

        let lines: Vec<String> = self.body.iter().map(FormattedLine::render).collect();
        doc.push_str(&lines.join("\n"));

        doc
    }
}

/// Persist a report under `output_dir`, deriving the filename from the write
/// time and the sanitized title.
///
/// A same-second write with an identical title overwrites the prior file; the
/// write itself is a single open-write-close with no partial-file cleanup.
pub fn write_report(report: &Report, output_dir: &Path) -> Result<PathBuf> {
    fs_err::create_dir_all(output_dir).map_err(|e| {
        ExtractorError::PersistenceFailed(format!(
            "could not create output directory {}: {}",
            output_dir.display(),
            e
        ))
    })?;

    let time_str = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let file_name = format!("{}_{}.md", time_str, sanitize_filename(&report.metadata.title));
    let path = output_dir.join(file_name);

    fs_err::write(&path, report.render()).map_err(|e| {
        ExtractorError::PersistenceFailed(format!("could not write {}: {}", path.display(), e))
    })?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        Report {
            metadata: VideoMetadata {
                title: "Sample Video".to_string(),
                channel: "Sample Channel".to_string(),
                url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            },
            body: vec![
                FormattedLine {
                    timestamp: "00:00:00".to_string(),
                    deep_link: "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=0s".to_string(),
                    text: "first".to_string(),
                    translated: false,
                },
                FormattedLine {
                    timestamp: "00:00:05".to_string(),
                    deep_link: "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=5s".to_string(),
                    text: "second".to_string(),
                    translated: false,
                },
            ],
        }
    }

    #[test]
    fn test_render_layout() {
        let doc = sample_report().render();

        let expected = "\
# Sample Video

**채널명:** Sample Channel

**URL:** https://www.youtube.com/watch?v=dQw4w9WgXcQ

---

## 트랜스크립트

[00:00:00](https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=0s) first
[00:00:05](https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=5s) second";

        assert_eq!(doc, expected);
    }

    #[test]
    fn test_write_report_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let report = sample_report();

        let path = write_report(&report, dir.path()).unwrap();
        let written = fs_err::read_to_string(&path).unwrap();

        assert_eq!(written.lines().next().unwrap(), "# Sample Video");
        let body_lines = written
            .lines()
            .skip_while(|l| *l != "## 트랜스크립트")
            .skip(2)
            .count();
        assert_eq!(body_lines, report.body.len());
    }

    #[test]
    fn test_write_failure_surfaces_as_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the output directory should be makes create_dir_all fail
        let blocker = dir.path().join("occupied");
        fs_err::write(&blocker, "not a directory").unwrap();

        let err = write_report(&sample_report(), &blocker).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExtractorError>(),
            Some(ExtractorError::PersistenceFailed(_))
        ));
    }

    #[test]
    fn test_filename_shape() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = sample_report();
        report.metadata.title = "What? A/B Test: <Results>".to_string();

        let path = write_report(&report, dir.path()).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();

        // YYYYMMDD_HHMMSS prefix, sanitized title suffix
        assert_eq!(&name[8..9], "_");
        assert!(name[..8].chars().all(|c| c.is_ascii_digit()));
        assert!(name.ends_with("_What AB Test Results.md"));
        assert!(!name.contains('?'));
        assert!(!name.contains('<'));
    }
}
