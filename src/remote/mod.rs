//! Remote image-generation clients.
//!
//! Two variants talk to the same hosted models: [`sync`] calls the
//! blocking run endpoint and gets the result in one round trip; [`queue`]
//! submits to the queue REST API and polls until the job completes.
//! Both walk the same manifest and share the download/resize tail.

pub mod queue;
pub mod sync;

use std::fs;
use std::path::Path;

use crate::error::PipelineError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "FAL_KEY";

/// Read the API key from the environment.
pub fn api_key_from_env() -> Result<String, PipelineError> {
    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(PipelineError::MissingEnv(API_KEY_ENV))
}

/// Write image bytes to `path`, creating parent directories.
pub fn write_image_bytes(path: &Path, bytes: &[u8]) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}

/// Resize the image at `path` in place to `[width, height]` with a
/// Lanczos filter.
pub fn resize_in_place(path: &Path, size: [u32; 2]) -> Result<(), PipelineError> {
    let img = image::open(path)?.to_rgba8();
    if img.dimensions() == (size[0], size[1]) {
        return Ok(());
    }
    let resized = image::imageops::resize(&img, size[0], size[1], image::imageops::FilterType::Lanczos3);
    resized.save(path)?;
    Ok(())
}
