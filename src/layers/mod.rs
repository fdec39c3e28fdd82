//! Color/alpha decomposition and per-layer encoding policy.

pub(crate) mod color;
pub(crate) mod decompose;
pub(crate) mod encoded;
pub(crate) mod mask;
pub(crate) mod quantize;
