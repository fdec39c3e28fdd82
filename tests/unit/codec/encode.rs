use std::collections::BTreeSet;

use super::*;

fn gradient_rgb(width: u32, height: u32) -> image::RgbImage {
    image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([
            (x * 255 / (width - 1)) as u8,
            (y * 255 / (height - 1)) as u8,
            128,
        ])
    })
}

#[test]
fn jpeg_quality_100_round_trip_is_close() {
    let src = gradient_rgb(32, 32);
    let bytes = encode_jpeg(
        src.as_raw(),
        32,
        32,
        ExtendedColorType::Rgb8,
        JpegParams::new(100),
    )
    .unwrap();

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (32, 32));

    let mut max_diff = 0u8;
    let mut total = 0u64;
    for (a, b) in src.as_raw().iter().zip(decoded.as_raw()) {
        let d = a.abs_diff(*b);
        max_diff = max_diff.max(d);
        total += d as u64;
    }
    let mean = total as f64 / src.as_raw().len() as f64;
    assert!(max_diff <= 24, "max diff {max_diff}");
    assert!(mean < 3.0, "mean diff {mean}");
}

#[test]
fn jpeg_lowest_qualities_still_decode() {
    let src = gradient_rgb(17, 9);
    for quality in [0, 1] {
        let bytes = encode_jpeg(
            src.as_raw(),
            17,
            9,
            ExtendedColorType::Rgb8,
            JpegParams::new(quality),
        )
        .unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (17, 9));
    }
}

#[test]
fn jpeg_quality_is_clamped() {
    assert_eq!(JpegParams::new(0).effective_quality(), 1);
    assert_eq!(JpegParams::new(75).effective_quality(), 75);
    assert_eq!(JpegParams::new(255).effective_quality(), 100);
}

#[test]
fn optimized_huffman_tables_shrink_the_stream() {
    let src = gradient_rgb(64, 64);
    let encode = |optimize| {
        encode_jpeg(
            src.as_raw(),
            64,
            64,
            ExtendedColorType::Rgb8,
            JpegParams {
                quality: 75,
                optimize,
            },
        )
        .unwrap()
    };

    let optimized = encode(true);
    let standard = encode(false);
    assert_ne!(optimized, standard);
    assert!(
        optimized.len() < standard.len(),
        "optimized {} vs standard {}",
        optimized.len(),
        standard.len()
    );

    let a = image::load_from_memory(&optimized).unwrap().to_rgb8();
    let b = image::load_from_memory(&standard).unwrap().to_rgb8();
    assert_eq!(a, b);
}

#[test]
fn jpeg_checks_buffer_length() {
    let err = encode_jpeg(&[0; 10], 2, 2, ExtendedColorType::Rgb8, JpegParams::new(75))
        .unwrap_err();
    assert!(matches!(err, TranspegError::Encode(_)));
}

#[test]
fn jpeg_rejects_alpha_buffers() {
    let err = encode_jpeg(
        &[0; 4],
        1,
        1,
        ExtendedColorType::Rgba8,
        JpegParams::new(75),
    )
    .unwrap_err();
    assert!(matches!(err, TranspegError::Encode(_)));
}

#[test]
fn grey_png_is_lossless() {
    let pixels: Vec<u8> = (0..=255u8).collect();
    let bytes = encode_png_grey(&pixels, 16, 16).unwrap();

    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!(decoded.color(), image::ColorType::L8);
    assert_eq!(decoded.to_luma8().into_raw(), pixels);
}

#[test]
fn grey_png_checks_buffer_length() {
    assert!(encode_png_grey(&[0; 5], 2, 2).is_err());
}

#[test]
fn indexed_png_round_trips_through_palette() {
    let levels = [0u8, 85, 170, 255];
    let indices: Vec<u8> = (0..15u8).map(|i| i % 4).collect();
    let bytes = encode_png_indexed(&indices, &levels, 5, 3).unwrap();

    let decoded = image::load_from_memory(&bytes).unwrap().to_luma8();
    let expected: Vec<u8> = indices.iter().map(|&i| levels[i as usize]).collect();
    assert_eq!(decoded.into_raw(), expected);
}

#[test]
fn indexed_png_odd_widths_pack_correctly() {
    for (entries, width) in [(2usize, 9u32), (3, 7), (11, 3), (200, 5)] {
        let levels: Vec<u8> = (0..entries).map(|i| (i * 255 / entries.max(2)) as u8).collect();
        let indices: Vec<u8> = (0..width * 4).map(|i| (i as usize % entries) as u8).collect();
        let bytes = encode_png_indexed(&indices, &levels, width, 4).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap().to_luma8();
        let distinct: BTreeSet<u8> = decoded.as_raw().iter().copied().collect();
        assert!(distinct.len() <= entries);
        let expected: Vec<u8> = indices.iter().map(|&i| levels[i as usize]).collect();
        assert_eq!(decoded.into_raw(), expected);
    }
}

#[test]
fn indexed_png_rejects_bad_indices() {
    assert!(encode_png_indexed(&[0, 2], &[0, 255], 2, 1).is_err());
    assert!(encode_png_indexed(&[0], &[], 1, 1).is_err());
}

#[test]
fn palette_depths() {
    assert_eq!(palette_bit_depth(1), 1);
    assert_eq!(palette_bit_depth(2), 1);
    assert_eq!(palette_bit_depth(3), 2);
    assert_eq!(palette_bit_depth(8), 4);
    assert_eq!(palette_bit_depth(16), 4);
    assert_eq!(palette_bit_depth(17), 8);
    assert_eq!(palette_bit_depth(256), 8);
}
