// SPDX-License-Identifier: GPL-3.0-only

//! Still encoding
//!
//! Captured stills are encoded as PNG (lossless); the export filename
//! contract fixes the container, so there is no format selection here.

use crate::errors::CaptureError;
use image::RgbImage;
use tracing::debug;

/// Encoded still image, self-contained and ready for export
#[derive(Clone)]
pub struct EncodedStill {
    /// PNG-encoded image bytes
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Debug for EncodedStill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EncodedStill({}x{}, {} bytes)",
            self.width,
            self.height,
            self.data.len()
        )
    }
}

/// Encode an RGB image as PNG
pub fn encode_png(image: RgbImage) -> Result<EncodedStill, CaptureError> {
    let (width, height) = image.dimensions();
    let mut buffer = Vec::new();

    image
        .write_to(
            &mut std::io::Cursor::new(&mut buffer),
            image::ImageFormat::Png,
        )
        .map_err(|e| CaptureError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    debug!(size = buffer.len(), width, height, "Encoding complete");

    Ok(EncodedStill {
        data: buffer,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_produces_png_magic() {
        let image = RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
        let still = encode_png(image).expect("encoding should succeed");
        assert_eq!(&still.data[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(still.width, 2);
        assert_eq!(still.height, 2);
    }
}
