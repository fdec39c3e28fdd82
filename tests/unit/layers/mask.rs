use std::collections::BTreeSet;

use image::{GrayImage, Luma};

use super::*;

fn soft_edge(width: u32, height: u32) -> AlphaLayer {
    AlphaLayer {
        pixels: GrayImage::from_fn(width, height, |x, _| Luma([(x * 255 / (width - 1)) as u8])),
    }
}

fn distinct_levels(bytes: &[u8]) -> BTreeSet<u8> {
    image::load_from_memory(bytes)
        .unwrap()
        .to_luma8()
        .into_raw()
        .into_iter()
        .collect()
}

#[test]
fn png_without_palette_is_lossless() {
    let alpha = soft_edge(40, 3);
    let cfg = EncodingConfig::default()
        .with_mask_type(MaskType::Png)
        .with_mask_colors(0);

    let layer = encode_mask(&alpha, &cfg).unwrap();
    assert_eq!(layer.format(), LayerFormat::Png);

    let decoded = image::load_from_memory(layer.bytes()).unwrap().to_luma8();
    assert_eq!(decoded, alpha.pixels);
    let source: BTreeSet<u8> = alpha.pixels.as_raw().iter().copied().collect();
    assert_eq!(distinct_levels(layer.bytes()), source);
}

#[test]
fn png_with_palette_respects_color_budget() {
    let alpha = soft_edge(64, 4);
    for colors in [1u16, 2, 8, 16] {
        let cfg = EncodingConfig::default()
            .with_mask_type(MaskType::Png)
            .with_mask_colors(colors);
        let layer = encode_mask(&alpha, &cfg).unwrap();
        assert_eq!(layer.mime(), "image/png");
        assert!(distinct_levels(layer.bytes()).len() <= colors as usize);
    }
}

#[test]
fn png_mask_ignores_mask_quality() {
    let alpha = soft_edge(20, 20);
    let cfg = EncodingConfig::default().with_mask_type(MaskType::Png);
    let a = encode_mask(&alpha, &cfg.clone().with_mask_quality(5)).unwrap();
    let b = encode_mask(&alpha, &cfg.with_mask_quality(95)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn jpeg_mask_ignores_mask_colors() {
    let alpha = soft_edge(33, 17);
    let cfg = EncodingConfig::default().with_mask_type(MaskType::Jpeg);
    let a = encode_mask(&alpha, &cfg.clone().with_mask_colors(0)).unwrap();
    let b = encode_mask(&alpha, &cfg.clone().with_mask_colors(2)).unwrap();
    let c = encode_mask(&alpha, &cfg.with_mask_colors(256)).unwrap();
    assert_eq!(a.format(), LayerFormat::Jpeg);
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn jpeg_mask_is_greyscale() {
    let alpha = soft_edge(16, 16);
    let layer = encode_mask(&alpha, &EncodingConfig::default()).unwrap();
    let decoded = image::load_from_memory(layer.bytes()).unwrap();
    assert_eq!(decoded.color(), image::ColorType::L8);
    assert_eq!((decoded.width(), decoded.height()), (16, 16));
}
