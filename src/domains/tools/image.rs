//! Image compression before upload.
//!
//! Uploaded covers are downscaled to fit within [`MAX_WIDTH`]×[`MAX_HEIGHT`]
//! and re-encoded as JPEG at [`JPEG_QUALITY`]. Smaller images keep their size.

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use thiserror::Error;
use tracing::{debug, info};

pub const MAX_WIDTH: u32 = 400;
pub const MAX_HEIGHT: u32 = 300;
pub const JPEG_QUALITY: u8 = 75;

/// Standard alphabet, padding optional.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors raised while preparing an image for upload.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Failed to process image: {0}")]
    Codec(#[from] image::ImageError),

    #[error("Image processing task failed: {0}")]
    Task(String),
}

/// Strip a `data:image/<type>;base64,` prefix if present.
pub fn strip_data_url(data: &str) -> &str {
    let trimmed = data.trim();
    match trimmed.strip_prefix("data:") {
        Some(rest) => match rest.split_once(";base64,") {
            Some((_, payload)) => payload,
            None => trimmed,
        },
        None => trimmed,
    }
}

/// Decode base64 image data (optionally a data URL).
///
/// Line breaks and other ASCII whitespace are ignored, as is missing padding.
pub fn decode_base64(data: &str) -> Result<Vec<u8>, ImageError> {
    let payload: String = strip_data_url(data)
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(LENIENT.decode(payload)?)
}

/// Resize to fit the bounding box and re-encode as JPEG.
pub fn compress(bytes: &[u8]) -> Result<Vec<u8>, ImageError> {
    let img = image::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();

    let img = if width > MAX_WIDTH || height > MAX_HEIGHT {
        img.resize(MAX_WIDTH, MAX_HEIGHT, FilterType::Lanczos3)
    } else {
        img
    };

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)?;

    debug!(
        "Compressed {}x{} ({} bytes) to {}x{} ({} bytes)",
        width,
        height,
        bytes.len(),
        rgb.width(),
        rgb.height(),
        out.len()
    );

    Ok(out)
}

/// Compress raw image bytes on the blocking pool and return them base64-encoded.
pub async fn compress_to_base64(bytes: Vec<u8>) -> Result<String, ImageError> {
    let compressed = tokio::task::spawn_blocking(move || compress(&bytes))
        .await
        .map_err(|e| ImageError::Task(e.to_string()))??;

    info!("Image compressed to {} bytes", compressed.len());
    Ok(STANDARD.encode(compressed))
}
