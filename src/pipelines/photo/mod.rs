// SPDX-License-Identifier: GPL-3.0-only

//! Still capture pipeline
//!
//! One call turns the current live frame into a self-contained encoded still:
//!
//! ```text
//! LiveFrame snapshot → mirror → filter → RGB convert → PNG encode
//! ```
//!
//! The pipeline is pure with respect to sequencing state: it reads the
//! frame's pixel content at call time and retains no reference to the stream.
//! The CPU-bound stages run on `spawn_blocking` so the countdown and preview
//! stay responsive.

pub mod encoding;
pub mod filters;

pub use encoding::EncodedStill;
pub use filters::FilterType;

use crate::backends::frame_source::LiveFrame;
use crate::errors::CaptureError;
use image::RgbImage;
use tracing::{debug, info};

/// Capture one still from the given live frame
///
/// `mirror` flips the image horizontally so the saved photo matches the
/// selfie preview orientation.
pub async fn capture_still(
    frame: LiveFrame,
    filter: FilterType,
    mirror: bool,
) -> Result<EncodedStill, CaptureError> {
    info!(
        frame = frame.sequence,
        width = frame.width,
        height = frame.height,
        filter = filter.display_name(),
        "Capturing still"
    );

    tokio::task::spawn_blocking(move || {
        let mut rgba = frame.data.to_vec();

        if mirror {
            mirror_rows(&mut rgba, frame.width, frame.height);
        }

        filters::apply_filter_rgba(&mut rgba, filter);

        let rgb = convert_rgba_to_rgb(&rgba, frame.width, frame.height)?;
        let still = encoding::encode_png(rgb)?;

        debug!(size = still.data.len(), "Still ready");
        Ok(still)
    })
    .await
    .map_err(|e| CaptureError::EncodingFailed(format!("Capture task error: {}", e)))?
}

/// Flip RGBA rows horizontally in place
fn mirror_rows(rgba: &mut [u8], width: u32, height: u32) {
    if width < 2 {
        return;
    }
    let row_len = (width * 4) as usize;
    for y in 0..height as usize {
        let row = &mut rgba[y * row_len..(y + 1) * row_len];
        let (mut left, mut right) = (0usize, width as usize - 1);
        while left < right {
            for c in 0..4 {
                row.swap(left * 4 + c, right * 4 + c);
            }
            left += 1;
            right -= 1;
        }
    }
}

/// Convert RGBA data to an RGB image (drop alpha channel)
fn convert_rgba_to_rgb(
    rgba_data: &[u8],
    width: u32,
    height: u32,
) -> Result<RgbImage, CaptureError> {
    let expected_size = (width * height * 4) as usize;
    if rgba_data.len() < expected_size {
        return Err(CaptureError::EncodingFailed(format!(
            "RGBA data too small: expected {}, got {}",
            expected_size,
            rgba_data.len()
        )));
    }

    let rgb_data: Vec<u8> = rgba_data
        .chunks(4)
        .take((width * height) as usize)
        .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
        .collect();

    RgbImage::from_raw(width, height, rgb_data).ok_or_else(|| {
        CaptureError::EncodingFailed("Failed to create RGB image from converted data".into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn frame_2x1(left: [u8; 4], right: [u8; 4]) -> LiveFrame {
        let mut data = Vec::new();
        data.extend_from_slice(&left);
        data.extend_from_slice(&right);
        LiveFrame {
            data: Arc::from(data.into_boxed_slice()),
            width: 2,
            height: 1,
            sequence: 0,
        }
    }

    #[test]
    fn test_mirror_swaps_row_ends() {
        let mut rgba = vec![1, 2, 3, 4, 5, 6, 7, 8];
        mirror_rows(&mut rgba, 2, 1);
        assert_eq!(rgba, vec![5, 6, 7, 8, 1, 2, 3, 4]);
    }

    #[test]
    fn test_convert_drops_alpha() {
        let rgb = convert_rgba_to_rgb(&[10, 20, 30, 255, 40, 50, 60, 0], 2, 1)
            .expect("conversion should succeed");
        assert_eq!(rgb.as_raw(), &vec![10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn test_convert_rejects_short_buffer() {
        assert!(convert_rgba_to_rgb(&[0u8; 4], 2, 1).is_err());
    }

    #[tokio::test]
    async fn test_capture_still_encodes_png() {
        let frame = frame_2x1([255, 0, 0, 255], [0, 0, 255, 255]);
        let still = capture_still(frame, FilterType::Standard, false)
            .await
            .expect("capture should succeed");
        assert_eq!(&still.data[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!((still.width, still.height), (2, 1));
    }
}
