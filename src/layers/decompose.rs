use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

use crate::codec::decode::RasterImage;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Opaque RGB color data of the source image.
///
/// Transparent pixels keep whatever RGB the source stored for them; nothing is blended against a
/// background. The mask hides them on render.
pub struct ColorLayer {
    /// Row-major RGB8 pixels.
    pub pixels: RgbImage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Per-pixel opacity as a greyscale image (0 transparent, 255 opaque).
pub struct AlphaLayer {
    /// Row-major L8 pixels.
    pub pixels: GrayImage,
}

impl ColorLayer {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

impl AlphaLayer {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// A uniformly opaque layer.
    pub fn opaque(width: u32, height: u32) -> Self {
        Self {
            pixels: GrayImage::from_pixel(width, height, Luma([u8::MAX])),
        }
    }

    /// Whether every pixel is fully opaque.
    pub fn is_opaque(&self) -> bool {
        self.pixels.as_raw().iter().all(|&a| a == u8::MAX)
    }
}

/// Split a decoded image into its color and opacity layers.
#[tracing::instrument(
    skip_all,
    fields(width = image.width(), height = image.height(), alpha = image.has_alpha())
)]
pub fn decompose(image: &RasterImage) -> (ColorLayer, AlphaLayer) {
    split_layers(image.pixels())
}

fn split_layers(image: &DynamicImage) -> (ColorLayer, AlphaLayer) {
    let (width, height) = (image.width(), image.height());

    if !image.color().has_alpha() {
        return (
            ColorLayer {
                pixels: image.to_rgb8(),
            },
            AlphaLayer::opaque(width, height),
        );
    }

    let rgba = image.to_rgba8();
    let mut pixels = RgbImage::new(width, height);
    let mut mask = GrayImage::new(width, height);
    for ((src, rgb), alpha) in rgba
        .pixels()
        .zip(pixels.pixels_mut())
        .zip(mask.pixels_mut())
    {
        let [r, g, b, a] = src.0;
        *rgb = Rgb([r, g, b]);
        *alpha = Luma([a]);
    }

    (ColorLayer { pixels }, AlphaLayer { pixels: mask })
}

#[cfg(test)]
#[path = "../../tests/unit/layers/decompose.rs"]
mod tests;
