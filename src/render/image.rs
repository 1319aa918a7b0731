//! Card image download, decode, and thumbnailing.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info};

use crate::api::Transport;
use crate::error::PadError;

/// Default thumbnail bounding box.
pub const THUMBNAIL_SIZE: (u32, u32) = (100, 100);

/// Download `url` and decode it into a bitmap. Non-2xx responses are errors.
pub fn load_image<T: Transport>(transport: &T, url: &str) -> Result<DynamicImage, PadError> {
    let response = transport.get(url)?.error_for_status(url)?;
    let img = image::load_from_memory(&response.body)
        .map_err(|e| PadError::Image(format!("Failed to decode image from {}: {}", url, e)))?;
    info!("Loaded image {}: {}x{}", url, img.width(), img.height());
    Ok(img)
}

/// Download `url` and shrink it to fit within `size`, keeping aspect ratio.
pub fn create_thumbnail<T: Transport>(
    transport: &T,
    url: &str,
    size: (u32, u32),
) -> Result<DynamicImage, PadError> {
    let img = load_image(transport, url)?;
    let thumb = fit_within(img, size.0, size.1);
    debug!("Thumbnail for {}: {}x{}", url, thumb.width(), thumb.height());
    Ok(thumb)
}

/// Scale down so both sides fit the box; never scales up.
pub fn fit_within(img: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    if width <= max_width && height <= max_height {
        return img;
    }

    let scale = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_width.max(1));
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_height.max(1));

    img.resize_exact(new_width, new_height, image::imageops::FilterType::Lanczos3)
}

/// PNG-encode an image as a `data:` URI for inline `<img>` sources.
pub fn thumbnail_data_uri(img: &DynamicImage) -> Result<String, PadError> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(buffer.into_inner())))
}
