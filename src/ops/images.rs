use std::fs;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

/// Error type for image loading
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} does not look like an image")]
    NotAnImage { path: PathBuf },
}

/// Read an image file into a `data:` URL, the form pictures are persisted
/// in. `None` (no file chosen) yields an empty string, which callers treat
/// as "leave state untouched" — the same contract as the site's file picker
/// callback.
pub fn read_data_url(path: Option<&Path>) -> Result<String, ImageError> {
    let Some(path) = path else {
        return Ok(String::new());
    };

    let mime = mime_guess::from_path(path)
        .first()
        .filter(|m| m.type_() == mime_guess::mime::IMAGE)
        .ok_or_else(|| ImageError::NotAnImage {
            path: path.to_path_buf(),
        })?;

    let bytes = fs::read(path).map_err(|e| ImageError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(format!(
        "data:{};base64,{}",
        mime.essence_str(),
        STANDARD.encode(bytes)
    ))
}
