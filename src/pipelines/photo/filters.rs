// SPDX-License-Identifier: GPL-3.0-only

//! Cosmetic filters applied during still compositing
//!
//! Filters are pure per-pixel transforms on RGBA data. They run on the
//! captured snapshot only; the live preview is the consumer's concern.

use serde::{Deserialize, Serialize};

/// Available capture filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// No filter applied (displays as "ORIGINAL")
    #[default]
    Standard,
    /// Black & white / monochrome filter
    Mono,
    /// Sepia tone filter (warm brownish tint)
    Sepia,
    /// Noir filter (high contrast black & white)
    Noir,
    /// Warm - orange/amber color temperature
    Warm,
    /// Fade - lifted blacks with muted colors
    Fade,
}

impl FilterType {
    /// All filter variants for UI iteration
    pub const ALL: [FilterType; 6] = [
        FilterType::Standard,
        FilterType::Mono,
        FilterType::Sepia,
        FilterType::Noir,
        FilterType::Warm,
        FilterType::Fade,
    ];

    /// Get display name for the filter
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterType::Standard => "Original",
            FilterType::Mono => "Mono",
            FilterType::Sepia => "Sepia",
            FilterType::Noir => "Noir",
            FilterType::Warm => "Warm",
            FilterType::Fade => "Fade",
        }
    }

    /// Parse a filter from its lowercase CLI name
    pub fn from_name(name: &str) -> Option<Self> {
        FilterType::ALL
            .into_iter()
            .find(|f| f.display_name().eq_ignore_ascii_case(name))
    }
}

/// Rec. 601 luma for a pixel
fn luma(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

/// Apply a filter in place on RGBA pixel data
///
/// The alpha channel is left untouched. `Standard` is a no-op.
pub fn apply_filter_rgba(data: &mut [u8], filter: FilterType) {
    if filter == FilterType::Standard {
        return;
    }

    for pixel in data.chunks_exact_mut(4) {
        let r = pixel[0] as f32;
        let g = pixel[1] as f32;
        let b = pixel[2] as f32;

        let (r, g, b) = match filter {
            FilterType::Standard => (r, g, b),
            FilterType::Mono => {
                let gray = luma(r, g, b);
                (gray, gray, gray)
            }
            FilterType::Sepia => (
                0.393 * r + 0.769 * g + 0.189 * b,
                0.349 * r + 0.686 * g + 0.168 * b,
                0.272 * r + 0.534 * g + 0.131 * b,
            ),
            FilterType::Noir => {
                // Monochrome with a contrast push around mid-gray
                let gray = (luma(r, g, b) - 128.0) * 1.4 + 128.0;
                (gray, gray, gray)
            }
            FilterType::Warm => (r + 18.0, g + 6.0, b - 18.0),
            FilterType::Fade => {
                // Lift blacks, then pull colors toward gray
                let lift = |v: f32| v * 0.85 + 34.0;
                let (r, g, b) = (lift(r), lift(g), lift(b));
                let gray = luma(r, g, b);
                (
                    gray + (r - gray) * 0.8,
                    gray + (g - gray) * 0.8,
                    gray + (b - gray) * 0.8,
                )
            }
        };

        pixel[0] = r.clamp(0.0, 255.0) as u8;
        pixel[1] = g.clamp(0.0, 255.0) as u8;
        pixel[2] = b.clamp(0.0, 255.0) as u8;
    }
}
