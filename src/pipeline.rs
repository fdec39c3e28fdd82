use std::path::Path;

use crate::{
    codec::decode::{RasterImage, read_image},
    document::output::assemble,
    foundation::{
        config::EncodingConfig,
        error::{TranspegError, TranspegResult},
    },
    layers::{
        color::encode_color, decompose::decompose, encoded::EncodedLayer, mask::encode_mask,
    },
};

#[derive(Clone, Debug)]
/// Result of converting one decoded image in memory.
pub struct Conversion {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Encoded color layer.
    pub color: EncodedLayer,
    /// Encoded opacity mask.
    pub mask: EncodedLayer,
    /// Serialized document (SVG text or gzip-compressed SVG).
    pub document: Vec<u8>,
}

impl Conversion {
    /// Size diagnostics for this conversion, given the encoded input size.
    pub fn report(&self, input_len: usize) -> ConversionReport {
        ConversionReport {
            color_text_len: self.color.base64().len(),
            mask_text_len: self.mask.base64().len(),
            input_len,
            output_len: self.document.len(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Size diagnostics printed after a successful write.
pub struct ConversionReport {
    /// Base64 length of the color layer.
    pub color_text_len: usize,
    /// Base64 length of the mask layer.
    pub mask_text_len: usize,
    /// Input file size in bytes.
    pub input_len: usize,
    /// Output file size in bytes.
    pub output_len: usize,
}

impl ConversionReport {
    /// Input size divided by output size.
    pub fn compression_ratio(&self) -> f64 {
        if self.output_len == 0 {
            return 0.0;
        }
        self.input_len as f64 / self.output_len as f64
    }
}

/// Decompose, encode and assemble one decoded image.
pub fn convert(image: &RasterImage, config: &EncodingConfig) -> TranspegResult<Conversion> {
    config.validate()?;

    let (color, alpha) = decompose(image);
    let color = encode_color(&color, config)?;
    let mask = encode_mask(&alpha, config)?;
    let document = assemble(&color, &mask, image.width(), image.height(), config.svgz)?;

    Ok(Conversion {
        width: image.width(),
        height: image.height(),
        color,
        mask,
        document,
    })
}

/// Convert the image at `input` and write the document to `output`.
///
/// The output file is only touched once the whole document exists in memory.
#[tracing::instrument(skip(config))]
pub fn convert_file(
    input: &Path,
    output: &Path,
    config: &EncodingConfig,
) -> TranspegResult<ConversionReport> {
    config.validate()?;

    let image = read_image(input)?;
    tracing::debug!(
        format = ?image.format(),
        alpha = image.has_alpha(),
        "read input"
    );
    let conversion = convert(&image, config)?;

    std::fs::write(output, &conversion.document).map_err(|source| {
        TranspegError::OutputWrite {
            path: output.to_path_buf(),
            source,
        }
    })?;
    tracing::debug!(bytes = conversion.document.len(), "wrote output");

    Ok(conversion.report(image.source_len()))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
