//! transpeg emulates a transparent JPEG with an SVG document.
//!
//! The source image is split into an RGB color layer, stored as JPEG, and a greyscale opacity
//! layer, stored as PNG or JPEG. Both are embedded as base64 data URIs; the color image is drawn
//! through an SVG `<mask>` built from the opacity image.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: input bytes -> [`RasterImage`]
//! 2. **Decompose**: [`RasterImage`] -> [`ColorLayer`] + [`AlphaLayer`] (no background blending)
//! 3. **Encode**: color as JPEG, alpha per [`MaskType`] -> two [`EncodedLayer`]s
//! 4. **Assemble**: [`SvgDocument`] -> markup, optionally gzip-compressed (SVGZ)
//!
//! [`convert_file`] runs all of it and writes the result; [`convert`] stops before IO.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod document;
mod foundation;
mod layers;
mod pipeline;

pub use codec::decode::{RasterImage, decode_image, read_image};
pub use codec::encode::{
    JpegParams, encode_jpeg, encode_png_grey, encode_png_indexed, palette_bit_depth,
};
pub use document::output::{assemble, gzip_bytes};
pub use document::svg::{ImageElement, MASK_ID, MarkupStyle, MaskDefinition, SvgDocument};
pub use foundation::config::{
    DEFAULT_MASK_COLORS, DEFAULT_QUALITY, EncodingConfig, MAX_MASK_COLORS, MaskType,
};
pub use foundation::error::{TranspegError, TranspegResult};
pub use layers::color::encode_color;
pub use layers::decompose::{AlphaLayer, ColorLayer, decompose};
pub use layers::encoded::{EncodedLayer, LayerFormat};
pub use layers::mask::encode_mask;
pub use layers::quantize::{QuantizedMask, quantize_alpha};
pub use pipeline::{Conversion, ConversionReport, convert, convert_file};
