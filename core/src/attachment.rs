//! Image attachments: load from disk, normalize to PNG, encode as data URL.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageFormat;
use playground_types::ImageAttachment;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read image {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unsupported or corrupt image {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),
}

/// Read any supported image and re-encode it as PNG.
pub fn load_attachment(path: &Path) -> Result<ImageAttachment, ImageError> {
    let bytes = std::fs::read(path).map_err(|source| ImageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| ImageError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let mut png = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(ImageError::Encode)?;

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    tracing::debug!(
        name = %name,
        width = decoded.width(),
        height = decoded.height(),
        png_bytes = png.len(),
        "Prepared image attachment"
    );
    Ok(ImageAttachment::new(name, png))
}

#[must_use]
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png))
}
