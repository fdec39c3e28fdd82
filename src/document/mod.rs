//! SVG document assembly and serialization.

pub(crate) mod output;
pub(crate) mod svg;
