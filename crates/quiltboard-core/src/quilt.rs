//! Quilt configuration and working-surface geometry.

use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dimension validation errors, raised at the input boundary before any
/// layout mutation runs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DimensionError {
    #[error("width must be positive, got {0}")]
    NonPositiveWidth(f64),
    #[error("height must be positive, got {0}")]
    NonPositiveHeight(f64),
    #[error("buffer must be non-negative, got {0}")]
    NegativeBuffer(f64),
}

/// Validate a square's dimensions before handing them to the layout.
///
/// Layout mutations assume pre-validated sizes; callers run form input
/// through this first.
pub fn validate_size(width: f64, height: f64) -> Result<(), DimensionError> {
    if !(width > 0.0) {
        return Err(DimensionError::NonPositiveWidth(width));
    }
    if !(height > 0.0) {
        return Err(DimensionError::NonPositiveHeight(height));
    }
    Ok(())
}

/// Quilt dimensions plus the optional uniform buffer margin, in inches.
///
/// The *working surface* is the quilt rectangle inflated by the buffer on
/// all four sides; squares are placed anywhere inside it, buffer included.
/// Only the validating constructor can produce a config, so a held value is
/// always positive-sized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuiltConfig {
    width: f64,
    height: f64,
    buffer: f64,
}

impl Default for QuiltConfig {
    fn default() -> Self {
        // Throw-size quilt, no buffer: the form defaults.
        Self {
            width: 60.0,
            height: 48.0,
            buffer: 0.0,
        }
    }
}

impl QuiltConfig {
    /// Create a validated config. Width and height must be positive, the
    /// buffer non-negative.
    pub fn new(width: f64, height: f64, buffer: f64) -> Result<Self, DimensionError> {
        validate_size(width, height)?;
        if !(buffer >= 0.0) {
            return Err(DimensionError::NegativeBuffer(buffer));
        }
        Ok(Self {
            width,
            height,
            buffer,
        })
    }

    /// Inner quilt width in inches.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Inner quilt height in inches.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Uniform buffer margin in inches.
    pub fn buffer(&self) -> f64 {
        self.buffer
    }

    /// Total working-surface width: quilt width plus buffer on both sides.
    pub fn total_width(&self) -> f64 {
        self.width + 2.0 * self.buffer
    }

    /// Total working-surface height: quilt height plus buffer on both sides.
    pub fn total_height(&self) -> f64 {
        self.height + 2.0 * self.buffer
    }

    /// Total working-surface size.
    pub fn total_size(&self) -> Size {
        Size::new(self.total_width(), self.total_height())
    }

    /// The working surface as a rectangle anchored at the origin.
    pub fn surface_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.total_width(), self.total_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let quilt = QuiltConfig::new(60.0, 48.0, 2.0).unwrap();
        assert!((quilt.total_width() - 64.0).abs() < f64::EPSILON);
        assert!((quilt.total_height() - 52.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_buffer() {
        let quilt = QuiltConfig::new(10.0, 10.0, 0.0).unwrap();
        assert!((quilt.total_width() - 10.0).abs() < f64::EPSILON);
        assert!((quilt.total_height() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert_eq!(
            QuiltConfig::new(0.0, 48.0, 0.0),
            Err(DimensionError::NonPositiveWidth(0.0))
        );
        assert_eq!(
            QuiltConfig::new(60.0, -1.0, 0.0),
            Err(DimensionError::NonPositiveHeight(-1.0))
        );
        assert_eq!(
            QuiltConfig::new(60.0, 48.0, -0.5),
            Err(DimensionError::NegativeBuffer(-0.5))
        );
    }

    #[test]
    fn test_rejects_nan() {
        assert!(QuiltConfig::new(f64::NAN, 48.0, 0.0).is_err());
        assert!(QuiltConfig::new(60.0, 48.0, f64::NAN).is_err());
        assert!(validate_size(f64::NAN, 12.0).is_err());
    }

    #[test]
    fn test_validate_size() {
        assert!(validate_size(12.0, 12.0).is_ok());
        assert_eq!(
            validate_size(-3.0, 12.0),
            Err(DimensionError::NonPositiveWidth(-3.0))
        );
        assert_eq!(
            validate_size(12.0, 0.0),
            Err(DimensionError::NonPositiveHeight(0.0))
        );
    }
}
