//! Square fill content: captured images or placeholder palette colors.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SquareColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl From<Color> for SquareColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SquareColor> for Color {
    fn from(color: SquareColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Fixed placeholder palette (Tailwind 500-level shades). New squares with
/// no captured image get one of these.
pub const PALETTE: [SquareColor; 12] = [
    SquareColor::rgb(239, 68, 68),   // red
    SquareColor::rgb(249, 115, 22),  // orange
    SquareColor::rgb(234, 179, 8),   // yellow
    SquareColor::rgb(132, 204, 22),  // lime
    SquareColor::rgb(34, 197, 94),   // green
    SquareColor::rgb(20, 184, 166),  // teal
    SquareColor::rgb(59, 130, 246),  // blue
    SquareColor::rgb(99, 102, 241),  // indigo
    SquareColor::rgb(168, 85, 247),  // purple
    SquareColor::rgb(236, 72, 153),  // pink
    SquareColor::rgb(120, 113, 108), // stone
    SquareColor::rgb(30, 41, 59),    // slate
];

/// Pick the next palette color pseudo-randomly.
///
/// Uses a counter + hash approach that works on all platforms including
/// WASM, so no entropy source is required.
pub fn next_palette_color() -> SquareColor {
    PALETTE[(next_seed() as usize) % PALETTE.len()]
}

/// Counter-seeded splitmix32-style hash.
fn next_seed() -> u32 {
    use std::sync::atomic::{AtomicU32, Ordering};

    static SEED_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut x = counter.wrapping_mul(0x9E37_79B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EB_CA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2_AE35);
    x ^= x >> 16;
    x
}

/// Image format for captured payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
}

impl ImageFormat {
    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        None
    }
}

/// A captured image payload used as a square's visual fill.
///
/// Data is kept base64-encoded for easy JSON serialization; the rendering
/// collaborator decodes on display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    /// Image format.
    pub format: ImageFormat,
    /// Original capture width in pixels.
    pub source_width: u32,
    /// Original capture height in pixels.
    pub source_height: u32,
    /// Image bytes, base64-encoded.
    pub data_base64: String,
}

impl ImageData {
    /// Create an image payload from raw encoded bytes.
    pub fn new(data: &[u8], source_width: u32, source_height: u32, format: ImageFormat) -> Self {
        use base64::{Engine, engine::general_purpose::STANDARD};

        Self {
            format,
            source_width,
            source_height,
            data_base64: STANDARD.encode(data),
        }
    }

    /// Create an image payload, detecting the format from magic bytes.
    /// Returns `None` for unrecognized data.
    pub fn from_bytes(data: &[u8], source_width: u32, source_height: u32) -> Option<Self> {
        let format = ImageFormat::from_magic_bytes(data)?;
        Some(Self::new(data, source_width, source_height, format))
    }

    /// Get the raw image bytes (decoded from base64).
    pub fn data(&self) -> Option<Vec<u8>> {
        use base64::{Engine, engine::general_purpose::STANDARD};
        STANDARD.decode(&self.data_base64).ok()
    }

    /// Source aspect ratio (width / height). The capture collaborator crops
    /// frames to the destination square's aspect before encoding; this is
    /// the payload's actual ratio.
    pub fn aspect_ratio(&self) -> f64 {
        self.source_width as f64 / (self.source_height as f64).max(1.0)
    }
}

/// The visual fill of a square: image data and palette colors are used
/// interchangeably by the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Fill {
    /// Captured photo.
    Image(ImageData),
    /// Solid placeholder color.
    Color(SquareColor),
}

impl Fill {
    /// Resolve a fill from an optional captured image: the image when one
    /// was supplied, otherwise the next pseudo-random palette color.
    pub fn from_capture(image: Option<ImageData>) -> Self {
        match image {
            Some(data) => Fill::Image(data),
            None => Fill::Color(next_palette_color()),
        }
    }

    /// A fresh placeholder color fill.
    pub fn placeholder() -> Self {
        Fill::Color(next_palette_color())
    }

    /// Check if this fill is a captured image.
    pub fn is_image(&self) -> bool {
        matches!(self, Fill::Image(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_pick_in_range() {
        for _ in 0..64 {
            let color = next_palette_color();
            assert!(PALETTE.contains(&color));
        }
    }

    #[test]
    fn test_palette_picks_vary() {
        let picks: Vec<SquareColor> = (0..32).map(|_| next_palette_color()).collect();
        let first = picks[0];
        assert!(picks.iter().any(|&c| c != first));
    }

    #[test]
    fn test_format_detection() {
        let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert_eq!(ImageFormat::from_magic_bytes(&png), Some(ImageFormat::Png));

        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0];
        assert_eq!(ImageFormat::from_magic_bytes(&jpeg), Some(ImageFormat::Jpeg));

        let webp = *b"RIFF\x00\x00\x00\x00WEBP";
        assert_eq!(ImageFormat::from_magic_bytes(&webp), Some(ImageFormat::WebP));

        assert_eq!(ImageFormat::from_magic_bytes(b"nope"), None);
    }

    #[test]
    fn test_image_data_round_trip() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3];
        let image = ImageData::from_bytes(&bytes, 640, 480).unwrap();
        assert_eq!(image.format, ImageFormat::Jpeg);
        assert_eq!(image.data().unwrap(), bytes);
    }

    #[test]
    fn test_aspect_ratio() {
        let image = ImageData::new(&[0u8; 4], 1280, 720, ImageFormat::Png);
        assert!((image.aspect_ratio() - 1280.0 / 720.0).abs() < 1e-9);
    }

    #[test]
    fn test_fill_from_capture() {
        let image = ImageData::new(&[0u8; 4], 100, 100, ImageFormat::Png);
        assert!(Fill::from_capture(Some(image)).is_image());
        assert!(!Fill::from_capture(None).is_image());
    }

    #[test]
    fn test_color_peniko_round_trip() {
        let color = SquareColor::rgb(59, 130, 246);
        let peniko: peniko::Color = color.into();
        assert_eq!(SquareColor::from(peniko), color);
    }
}
