use super::*;

#[test]
fn report_ratio_divides_input_by_output() {
    let report = ConversionReport {
        color_text_len: 10,
        mask_text_len: 4,
        input_len: 300,
        output_len: 120,
    };
    assert!((report.compression_ratio() - 2.5).abs() < 1e-12);
}

#[test]
fn report_ratio_with_empty_output_is_zero() {
    let report = ConversionReport {
        color_text_len: 0,
        mask_text_len: 0,
        input_len: 1,
        output_len: 0,
    };
    assert_eq!(report.compression_ratio(), 0.0);
}

#[test]
fn convert_rejects_invalid_config_before_decoding() {
    let cfg = EncodingConfig::default().with_quality(150);
    let err = convert_file(Path::new("does/not/matter.png"), Path::new("x.svg"), &cfg)
        .unwrap_err();
    assert!(matches!(err, TranspegError::Validation(_)));
}

#[test]
fn conversion_report_uses_base64_lengths() {
    let image = RasterImage::new(
        image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            4,
            4,
            image::Rgba([1, 2, 3, 128]),
        )),
        image::ImageFormat::Png,
        99,
    )
    .unwrap();
    let conversion = convert(&image, &EncodingConfig::default()).unwrap();
    let report = conversion.report(image.source_len());

    assert_eq!(report.color_text_len, conversion.color.base64().len());
    assert_eq!(report.mask_text_len, conversion.mask.base64().len());
    assert_eq!(report.input_len, 99);
    assert_eq!(report.output_len, conversion.document.len());
    assert_eq!((conversion.width, conversion.height), (4, 4));
}
