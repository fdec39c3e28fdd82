//! Adaptive grey palettes for PNG masks, computed with `imagequant`.

use crate::{
    foundation::error::{TranspegError, TranspegResult},
    layers::decompose::AlphaLayer,
};

#[derive(Clone, Debug)]
/// Alpha layer re-expressed as indices into a grey palette.
pub struct QuantizedMask {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Grey level of each palette entry.
    pub levels: Vec<u8>,
    /// One palette index per pixel, row-major.
    pub indices: Vec<u8>,
}

/// Reduce an alpha layer to a palette of at most `max_colors` grey levels.
///
/// Sources that already use no more than `max_colors` levels keep them exactly.
#[tracing::instrument(skip(alpha), fields(width = alpha.width(), height = alpha.height()))]
pub fn quantize_alpha(alpha: &AlphaLayer, max_colors: u16) -> TranspegResult<QuantizedMask> {
    let raw = alpha.pixels.as_raw();
    let max_colors = max_colors.max(1) as usize;

    let mut seen = [false; 256];
    raw.iter().for_each(|&v| seen[v as usize] = true);
    let distinct: Vec<u8> = (0..=255u8).filter(|&v| seen[v as usize]).collect();

    let (levels, indices) = if distinct.len() <= max_colors {
        let mut slot = [0u8; 256];
        for (i, &v) in distinct.iter().enumerate() {
            slot[v as usize] = i as u8;
        }
        let indices = raw.iter().map(|&v| slot[v as usize]).collect();
        (distinct, indices)
    } else if max_colors == 1 {
        // imagequant needs room for at least two entries.
        let sum: u64 = raw.iter().map(|&v| v as u64).sum();
        let n = raw.len() as u64;
        (vec![((sum + n / 2) / n) as u8], vec![0; raw.len()])
    } else {
        remap_with_imagequant(alpha, max_colors)?
    };

    tracing::debug!(?levels, "quantized mask");
    Ok(QuantizedMask {
        width: alpha.width(),
        height: alpha.height(),
        levels,
        indices,
    })
}

fn remap_with_imagequant(
    alpha: &AlphaLayer,
    max_colors: usize,
) -> TranspegResult<(Vec<u8>, Vec<u8>)> {
    let quant_err = |e: imagequant::Error| TranspegError::encode(format!("quantize mask: {e:?}"));

    let pixels: Vec<imagequant::RGBA> = alpha
        .pixels
        .as_raw()
        .iter()
        .map(|&v| imagequant::RGBA::new(v, v, v, u8::MAX))
        .collect();

    let mut attr = imagequant::Attributes::new();
    attr.set_max_colors(max_colors as u32).map_err(quant_err)?;

    let mut image = attr
        .new_image(
            pixels,
            alpha.width() as usize,
            alpha.height() as usize,
            0.0,
        )
        .map_err(quant_err)?;
    let mut result = attr.quantize(&mut image).map_err(quant_err)?;
    // Dithering would scatter noise into the mask.
    result.set_dithering_level(0.0).map_err(quant_err)?;

    let (palette, indices) = result.remapped(&mut image).map_err(quant_err)?;
    let levels = palette
        .iter()
        .map(|c| ((c.r as u16 + c.g as u16 + c.b as u16 + 1) / 3) as u8)
        .collect();
    Ok((levels, indices))
}

#[cfg(test)]
#[path = "../../tests/unit/layers/quantize.rs"]
mod tests;
