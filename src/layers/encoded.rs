use base64::{Engine as _, engine::general_purpose::STANDARD};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Container format of an encoded layer.
pub enum LayerFormat {
    /// JPEG stream.
    Jpeg,
    /// PNG stream.
    Png,
}

impl LayerFormat {
    /// MIME type used in the layer's data URI.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One encoded raster layer ready to be embedded in the document.
pub struct EncodedLayer {
    format: LayerFormat,
    bytes: Vec<u8>,
    base64: String,
}

impl EncodedLayer {
    /// Wrap encoded bytes, computing their base64 text once.
    pub fn new(format: LayerFormat, bytes: Vec<u8>) -> Self {
        let base64 = STANDARD.encode(&bytes);
        Self {
            format,
            bytes,
            base64,
        }
    }

    /// Container format.
    pub fn format(&self) -> LayerFormat {
        self.format
    }

    /// MIME type of the encoded bytes.
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }

    /// Raw encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Base64 text of the encoded bytes.
    pub fn base64(&self) -> &str {
        &self.base64
    }

    /// `data:` URI embedding the layer.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime(), self.base64)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/encoded.rs"]
mod tests;
