use image::ExtendedColorType;

use crate::{
    codec::encode::{JpegParams, encode_jpeg},
    foundation::{config::EncodingConfig, error::TranspegResult},
    layers::{
        decompose::ColorLayer,
        encoded::{EncodedLayer, LayerFormat},
    },
};

/// Encode the color layer as an RGB JPEG at the configured quality.
#[tracing::instrument(skip_all, fields(quality = config.quality))]
pub fn encode_color(color: &ColorLayer, config: &EncodingConfig) -> TranspegResult<EncodedLayer> {
    let bytes = encode_jpeg(
        color.pixels.as_raw(),
        color.width(),
        color.height(),
        ExtendedColorType::Rgb8,
        JpegParams::new(config.quality),
    )?;
    tracing::debug!(bytes = bytes.len(), "encoded color layer");
    Ok(EncodedLayer::new(LayerFormat::Jpeg, bytes))
}

#[cfg(test)]
#[path = "../../tests/unit/layers/color.rs"]
mod tests;
