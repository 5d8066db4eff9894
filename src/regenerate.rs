use thiserror::Error;

use crate::coordinates::{CoordinateLine, parse_coordinate_lines, trim_text};
use crate::markers::{GLOBAL_HEADER, first_region_marker};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RegenerateError {
    #[error("coordinate line {line} ({text:?}) is not in the form x,y,w,h")]
    MalformedCoordinateLine { line: usize, text: String },
}

/// Rebuild the region section of a .til file from typed coordinates.
///
/// The `[GLOBAL]` section of `content` (if any) is carried over, followed by one
/// `[IMG<n>]` block per non-empty line of `coordinate_text`, numbered from 1 in input
/// order. Region blocks already present in `content` are dropped.
///
/// # Errors
///
/// Fails without producing any output if a single coordinate line is malformed.
pub fn regenerate(content: &str, coordinate_text: &str) -> Result<String, RegenerateError> {
    let lines = parse_coordinate_lines(coordinate_text)?;
    Ok(render(extract_preamble(content), &lines))
}

/// The slice of `content` from the `[GLOBAL]` header up to the first region marker,
/// or to the end of `content` when no marker follows.
pub fn extract_preamble(content: &str) -> Option<&str> {
    let (_, section) = content.split_at_checked(content.find(GLOBAL_HEADER)?)?;
    match first_region_marker(section) {
        Some(end) => section.get(..end),
        None => Some(section),
    }
}

/// Format a preamble and region blocks as file text.
pub fn render(preamble: Option<&str>, lines: &[CoordinateLine]) -> String {
    let mut out = String::new();
    if let Some(preamble) = preamble {
        out.push_str(trim_text(preamble));
        out.push_str("\n\n");
    }
    for (i, line) in lines.iter().enumerate() {
        out.push_str(&format!("[IMG{}]\nSOURCE_RECT={}\n\n", i + 1, line.text));
    }
    let len = out.trim_end_matches(crate::coordinates::is_text_whitespace).len();
    out.truncate(len);
    out
}
