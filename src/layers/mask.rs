use image::ExtendedColorType;

use crate::{
    codec::encode::{JpegParams, encode_jpeg, encode_png_grey, encode_png_indexed},
    foundation::{
        config::{EncodingConfig, MaskType},
        error::TranspegResult,
    },
    layers::{
        decompose::AlphaLayer,
        encoded::{EncodedLayer, LayerFormat},
        quantize::quantize_alpha,
    },
};

/// Encode the alpha layer according to the configured mask policy.
///
/// PNG masks ignore `mask_quality`; JPEG masks ignore `mask_colors`.
#[tracing::instrument(skip_all, fields(mask_type = %config.mask_type))]
pub fn encode_mask(alpha: &AlphaLayer, config: &EncodingConfig) -> TranspegResult<EncodedLayer> {
    let layer = match config.mask_type {
        MaskType::Png => png_mask(alpha, config.mask_colors)?,
        MaskType::Jpeg => jpeg_mask(alpha, config.mask_quality)?,
    };
    tracing::debug!(bytes = layer.bytes().len(), "encoded mask layer");
    Ok(layer)
}

fn png_mask(alpha: &AlphaLayer, mask_colors: u16) -> TranspegResult<EncodedLayer> {
    let bytes = if mask_colors == 0 {
        encode_png_grey(alpha.pixels.as_raw(), alpha.width(), alpha.height())?
    } else {
        let quantized = quantize_alpha(alpha, mask_colors)?;
        encode_png_indexed(
            &quantized.indices,
            &quantized.levels,
            quantized.width,
            quantized.height,
        )?
    };
    Ok(EncodedLayer::new(LayerFormat::Png, bytes))
}

fn jpeg_mask(alpha: &AlphaLayer, quality: u8) -> TranspegResult<EncodedLayer> {
    let bytes = encode_jpeg(
        alpha.pixels.as_raw(),
        alpha.width(),
        alpha.height(),
        ExtendedColorType::L8,
        JpegParams::new(quality),
    )?;
    Ok(EncodedLayer::new(LayerFormat::Jpeg, bytes))
}

#[cfg(test)]
#[path = "../../tests/unit/layers/mask.rs"]
mod tests;
