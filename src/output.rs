//! PNG encoding and file output

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageOutputFormat, RgbaImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("cannot write output file: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode a finished canvas as PNG bytes.
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, OutputError> {
    let mut buffer = Cursor::new(Vec::new());
    canvas.write_to(&mut buffer, ImageOutputFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Write PNG bytes to `path`, creating parent directories as needed.
pub fn save_png(bytes: &[u8], path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    Ok(())
}
