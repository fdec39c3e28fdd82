use std::{
    io::{Cursor, ErrorKind},
    path::Path,
};

use image::{
    DynamicImage, ImageError, ImageFormat, ImageReader,
    error::{DecodingError, ImageFormatHint},
};

use crate::foundation::error::{TranspegError, TranspegResult};

#[derive(Clone, Debug)]
/// Decoded source image plus what is known about where it came from.
pub struct RasterImage {
    image: DynamicImage,
    format: ImageFormat,
    source_len: usize,
}

impl RasterImage {
    /// Wrap an already decoded image. Both dimensions must be non-zero.
    pub fn new(image: DynamicImage, format: ImageFormat, source_len: usize) -> TranspegResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(TranspegError::validation(format!(
                "image must have non-zero dimensions, got {}x{}",
                image.width(),
                image.height()
            )));
        }
        Ok(Self {
            image,
            format,
            source_len,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether the decoded pixel format carries an alpha channel.
    pub fn has_alpha(&self) -> bool {
        self.image.color().has_alpha()
    }

    /// Container format the pixels were decoded from.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Size of the encoded input in bytes.
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Borrow the decoded pixels.
    pub fn pixels(&self) -> &DynamicImage {
        &self.image
    }
}

/// Read `path` fully into memory and decode it.
pub fn read_image(path: &Path) -> TranspegResult<RasterImage> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => TranspegError::InputNotFound(path.to_path_buf()),
        _ => TranspegError::InputRead {
            path: path.to_path_buf(),
            source,
        },
    })?;
    decode_image(&bytes, path)
}

/// Decode encoded image bytes. `path` is only used for format fallback and error messages.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8], path: &Path) -> TranspegResult<RasterImage> {
    let format = sniff_format(bytes, path)
        .ok_or_else(|| TranspegError::UnrecognizedFormat(path.to_path_buf()))?;

    let image = ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(|source| match source {
            ImageError::Unsupported(_) => TranspegError::UnrecognizedFormat(path.to_path_buf()),
            source => TranspegError::InputDecode {
                path: path.to_path_buf(),
                source,
            },
        })?;

    if image.width() == 0 || image.height() == 0 {
        return Err(TranspegError::InputDecode {
            path: path.to_path_buf(),
            source: ImageError::Decoding(DecodingError::new(
                ImageFormatHint::Exact(format),
                "image has no pixels",
            )),
        });
    }

    tracing::debug!(
        ?format,
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "decoded input"
    );
    RasterImage::new(image, format, bytes.len())
}

// TGA has no magic number, so it is the only format trusted by extension alone.
fn sniff_format(bytes: &[u8], path: &Path) -> Option<ImageFormat> {
    image::guess_format(bytes).ok().or_else(|| {
        ImageFormat::from_path(path)
            .ok()
            .filter(|format| *format == ImageFormat::Tga)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/codec/decode.rs"]
mod tests;
