//! Reads the already-decoded résumé text from a file or stdin.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::errors::AppError;
use crate::models::RawDocument;

fn decode(bytes: Vec<u8>, origin: &str) -> Result<RawDocument, AppError> {
    let text = String::from_utf8(bytes)
        .map_err(|e| AppError::InvalidInput(format!("{origin} is not valid UTF-8: {e}")))?;
    debug!(origin, bytes = text.len(), "input read");
    Ok(RawDocument::new(text))
}

pub fn read_path(path: &Path) -> Result<RawDocument, AppError> {
    let bytes = std::fs::read(path)?;
    decode(bytes, &path.display().to_string())
}

pub fn read_from<R: Read>(mut reader: R) -> Result<RawDocument, AppError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(bytes, "input")
}

/// `None` or `-` reads stdin.
pub fn read_input(path: Option<&Path>) -> Result<RawDocument, AppError> {
    match path {
        Some(p) if p != Path::new("-") => read_path(p),
        _ => read_from(std::io::stdin().lock()),
    }
}
