/// Format a fractional-second offset as a zero-padded `HH:MM:SS` clock string.
///
/// The offset is truncated (not rounded) to whole seconds before decomposition.
/// The hours field grows past two digits for very long durations.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Strip characters that cannot appear in filenames.
///
/// No length truncation and no collision handling; a same-second write with an
/// identical title overwrites the prior file.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| !matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|'))
        .collect()
}
