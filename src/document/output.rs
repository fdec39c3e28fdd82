use std::io::Write as _;

use anyhow::Context;
use flate2::{Compression, GzBuilder};

use crate::{
    document::svg::{MarkupStyle, SvgDocument},
    foundation::error::TranspegResult,
    layers::encoded::EncodedLayer,
};

/// Assemble the SVG document for two encoded layers and serialize it.
///
/// Plain output is pretty-printed UTF-8 text. Gzip output is compact markup compressed with a
/// zero modification time, so identical inputs give identical bytes.
#[tracing::instrument(skip(color, mask))]
pub fn assemble(
    color: &EncodedLayer,
    mask: &EncodedLayer,
    width: u32,
    height: u32,
    gzip: bool,
) -> TranspegResult<Vec<u8>> {
    let document = SvgDocument::new(color, mask, width, height);
    let style = if gzip {
        MarkupStyle::Compact
    } else {
        MarkupStyle::Pretty
    };
    let markup = document.to_markup(style)?;
    tracing::debug!(markup_len = markup.len(), "serialized svg");

    if gzip {
        gzip_bytes(markup.as_bytes())
    } else {
        Ok(markup.into_bytes())
    }
}

/// Gzip `data` at best compression with a fixed header timestamp.
pub fn gzip_bytes(data: &[u8]) -> TranspegResult<Vec<u8>> {
    let mut encoder = GzBuilder::new()
        .mtime(0)
        .write(Vec::new(), Compression::best());
    encoder.write_all(data).context("gzip svg")?;
    Ok(encoder.finish().context("finish gzip stream")?)
}

#[cfg(test)]
#[path = "../../tests/unit/document/output.rs"]
mod tests;
