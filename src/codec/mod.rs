//! Raster decode and JPEG/PNG encode.
//!
//! Everything here is a thin, explicitly parameterized wrapper around `image` and `png`; the
//! layer policy lives in [`crate::layers`].

pub(crate) mod decode;
pub(crate) mod encode;
