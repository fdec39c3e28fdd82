use crate::foundation::error::{TranspegError, TranspegResult};

/// Default palette size for PNG masks.
pub const DEFAULT_MASK_COLORS: u16 = 8;
/// Default JPEG quality for both the color layer and JPEG masks.
pub const DEFAULT_QUALITY: u8 = 75;
/// Largest palette an indexed PNG can hold.
pub const MAX_MASK_COLORS: u16 = 256;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// Encoding policy for the greyscale opacity mask.
pub enum MaskType {
    /// Lossless PNG, optionally reduced to an adaptive grey palette.
    Png,
    /// Lossy greyscale JPEG.
    #[default]
    Jpeg,
}

impl MaskType {
    /// Lowercase name as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }
}

impl std::fmt::Display for MaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Resolved encoding parameters for one conversion.
///
/// `mask_colors` only applies to PNG masks and `mask_quality` only to JPEG masks; the
/// inapplicable one is ignored rather than rejected.
pub struct EncodingConfig {
    /// Mask encoding policy.
    pub mask_type: MaskType,
    /// PNG mask palette size, `0` disables palette reduction.
    pub mask_colors: u16,
    /// Color layer JPEG quality (0-100).
    pub quality: u8,
    /// JPEG mask quality (0-100).
    pub mask_quality: u8,
    /// Gzip the serialized document (SVGZ).
    pub svgz: bool,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            mask_type: MaskType::default(),
            mask_colors: DEFAULT_MASK_COLORS,
            quality: DEFAULT_QUALITY,
            mask_quality: DEFAULT_QUALITY,
            svgz: false,
        }
    }
}

impl EncodingConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> TranspegResult<()> {
        if self.quality > 100 {
            return Err(TranspegError::validation(format!(
                "quality must be within 0..=100, got {}",
                self.quality
            )));
        }
        if self.mask_quality > 100 {
            return Err(TranspegError::validation(format!(
                "mask quality must be within 0..=100, got {}",
                self.mask_quality
            )));
        }
        if self.mask_colors > MAX_MASK_COLORS {
            return Err(TranspegError::validation(format!(
                "mask colors must be within 0..={MAX_MASK_COLORS}, got {}",
                self.mask_colors
            )));
        }
        Ok(())
    }

    /// Replace the mask policy.
    pub fn with_mask_type(mut self, mask_type: MaskType) -> Self {
        self.mask_type = mask_type;
        self
    }

    /// Replace the PNG mask palette size.
    pub fn with_mask_colors(mut self, mask_colors: u16) -> Self {
        self.mask_colors = mask_colors;
        self
    }

    /// Replace the color layer quality.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Replace the JPEG mask quality.
    pub fn with_mask_quality(mut self, mask_quality: u8) -> Self {
        self.mask_quality = mask_quality;
        self
    }

    /// Toggle gzip output.
    pub fn with_svgz(mut self, svgz: bool) -> Self {
        self.svgz = svgz;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
