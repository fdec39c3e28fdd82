use anyhow::Context;
use image::ExtendedColorType;
use mozjpeg::{ColorSpace, Compress};

use crate::foundation::error::{TranspegError, TranspegResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// JPEG encoder parameters.
pub struct JpegParams {
    /// Requested quality (0-100). Values below the codec minimum are raised to 1.
    pub quality: u8,
    /// Compute Huffman tables for this image instead of using the standard ones.
    pub optimize: bool,
}

impl JpegParams {
    /// Parameters for `quality` with optimization requested.
    pub fn new(quality: u8) -> Self {
        Self {
            quality,
            optimize: true,
        }
    }

    /// Quality actually handed to the codec.
    pub fn effective_quality(self) -> u8 {
        self.quality.clamp(1, 100)
    }
}

/// Encode 8-bit RGB or greyscale pixels as a baseline JPEG.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    color: ExtendedColorType,
    params: JpegParams,
) -> TranspegResult<Vec<u8>> {
    let (space, channels) = match color {
        ExtendedColorType::Rgb8 => (ColorSpace::JCS_RGB, 3),
        ExtendedColorType::L8 => (ColorSpace::JCS_GRAYSCALE, 1),
        other => {
            return Err(TranspegError::encode(format!(
                "jpeg layers must be Rgb8 or L8, got {other:?}"
            )));
        }
    };
    let expected = width as usize * height as usize * channels;
    if pixels.len() != expected {
        return Err(TranspegError::encode(format!(
            "jpeg buffer holds {} bytes, expected {expected}",
            pixels.len()
        )));
    }

    tracing::debug!(
        quality = params.effective_quality(),
        optimize = params.optimize,
        ?color,
        "encode jpeg"
    );

    let mut comp = Compress::new(space);
    // Baseline profile: no progressive scans, no trellis.
    comp.set_fastest_defaults();
    comp.set_size(width as usize, height as usize);
    comp.set_quality(params.effective_quality() as f32);
    comp.set_optimize_coding(params.optimize);

    let mut out = Vec::new();
    {
        let mut writer = comp.start_compress(&mut out).context("start jpeg stream")?;
        let stride = width as usize * channels;
        for row in pixels.chunks(stride) {
            writer.write_scanlines(row).context("write jpeg scanlines")?;
        }
        writer.finish().context("finish jpeg stream")?;
    }
    Ok(out)
}

/// Encode 8-bit greyscale pixels as a PNG at maximum compression.
pub fn encode_png_grey(pixels: &[u8], width: u32, height: u32) -> TranspegResult<Vec<u8>> {
    check_len(pixels.len(), width, height)?;
    write_png(
        width,
        height,
        png::ColorType::Grayscale,
        png::BitDepth::Eight,
        None,
        pixels,
    )
}

/// Encode palette indices (one byte per pixel) as an indexed PNG whose palette entries are the
/// given grey levels.
///
/// The bit depth is the narrowest one that can address the palette; indices are packed
/// accordingly.
pub fn encode_png_indexed(
    indices: &[u8],
    levels: &[u8],
    width: u32,
    height: u32,
) -> TranspegResult<Vec<u8>> {
    check_len(indices.len(), width, height)?;
    if levels.is_empty() || levels.len() > 256 {
        return Err(TranspegError::encode(format!(
            "palette must hold 1..=256 entries, got {}",
            levels.len()
        )));
    }
    if let Some(bad) = indices.iter().find(|&&idx| idx as usize >= levels.len()) {
        return Err(TranspegError::encode(format!(
            "palette index {bad} out of range for {} entries",
            levels.len()
        )));
    }

    let bits = palette_bit_depth(levels.len());
    let palette: Vec<u8> = levels.iter().flat_map(|&g| [g, g, g]).collect();
    let packed = pack_indices(indices, width as usize, bits);
    let depth = match bits {
        1 => png::BitDepth::One,
        2 => png::BitDepth::Two,
        4 => png::BitDepth::Four,
        _ => png::BitDepth::Eight,
    };

    write_png(
        width,
        height,
        png::ColorType::Indexed,
        depth,
        Some(palette),
        &packed,
    )
}

/// Smallest PNG bit depth able to index `entries` palette colors.
pub fn palette_bit_depth(entries: usize) -> u8 {
    match entries {
        0..=2 => 1,
        3..=4 => 2,
        5..=16 => 4,
        _ => 8,
    }
}

fn check_len(len: usize, width: u32, height: u32) -> TranspegResult<()> {
    let expected = width as usize * height as usize;
    if len != expected {
        return Err(TranspegError::encode(format!(
            "pixel buffer holds {len} samples, expected {width}x{height} = {expected}"
        )));
    }
    Ok(())
}

fn pack_indices(indices: &[u8], width: usize, bits: u8) -> Vec<u8> {
    if bits == 8 || width == 0 {
        return indices.to_vec();
    }

    let per_byte = (8 / bits) as usize;
    let row_bytes = width.div_ceil(per_byte);
    let mut packed = Vec::with_capacity(row_bytes * (indices.len() / width));
    for row in indices.chunks_exact(width) {
        for group in row.chunks(per_byte) {
            let mut byte = 0u8;
            for (i, &idx) in group.iter().enumerate() {
                let shift = 8 - bits as usize * (i + 1);
                byte |= idx << shift;
            }
            packed.push(byte);
        }
    }
    packed
}

fn write_png(
    width: u32,
    height: u32,
    color: png::ColorType,
    depth: png::BitDepth,
    palette: Option<Vec<u8>>,
    data: &[u8],
) -> TranspegResult<Vec<u8>> {
    tracing::debug!(?color, ?depth, "encode png");

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        encoder.set_compression(png::Compression::High);
        if let Some(palette) = palette {
            encoder.set_palette(palette);
        }
        let mut writer = encoder.write_header().context("write png header")?;
        writer.write_image_data(data).context("write png data")?;
        writer.finish().context("finish png stream")?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/encode.rs"]
mod tests;
