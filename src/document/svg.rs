use anyhow::Context;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, Event},
};

use crate::{foundation::error::TranspegResult, layers::encoded::EncodedLayer};

/// Identifier of the mask definition the color image refers to.
pub const MASK_ID: &str = "mask";

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
const INDENT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Whitespace layout of the serialized markup.
pub enum MarkupStyle {
    /// One element per line, four-space indentation.
    Pretty,
    /// No insignificant whitespace.
    Compact,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// An `<image>` element embedding a layer as a data URI.
pub struct ImageElement {
    /// `xlink:href` value.
    pub href: String,
    /// Width in user units.
    pub width: u32,
    /// Height in user units.
    pub height: u32,
    /// Optional `mask` reference, e.g. `url(#mask)`.
    pub mask: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A `<mask>` definition holding the opacity image.
pub struct MaskDefinition {
    /// Element id.
    pub id: String,
    /// Embedded mask image.
    pub image: ImageElement,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Scene graph of the output document: one mask definition and one masked color image.
pub struct SvgDocument {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Mask definition placed in `<defs>`.
    pub mask: MaskDefinition,
    /// Top-level color image.
    pub image: ImageElement,
}

impl SvgDocument {
    /// Build the document for a color layer masked by `mask`, both stretched to the canvas.
    pub fn new(color: &EncodedLayer, mask: &EncodedLayer, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mask: MaskDefinition {
                id: MASK_ID.to_string(),
                image: ImageElement {
                    href: mask.data_uri(),
                    width,
                    height,
                    mask: None,
                },
            },
            image: ImageElement {
                href: color.data_uri(),
                width,
                height,
                mask: Some(format!("url(#{MASK_ID})")),
            },
        }
    }

    /// Serialize to SVG markup, starting with an XML declaration.
    pub fn to_markup(&self, style: MarkupStyle) -> TranspegResult<String> {
        let mut writer = match style {
            MarkupStyle::Pretty => Writer::new_with_indent(Vec::new(), b' ', INDENT),
            MarkupStyle::Compact => Writer::new(Vec::new()),
        };

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .context("write xml declaration")?;

        let width = self.width.to_string();
        let height = self.height.to_string();
        let view_box = format!("0 0 {} {}", self.width, self.height);
        let root = BytesStart::new("svg").with_attributes([
            ("xmlns", SVG_NS),
            ("xmlns:xlink", XLINK_NS),
            ("version", "1.1"),
            ("baseProfile", "full"),
            ("width", width.as_str()),
            ("height", height.as_str()),
            ("viewBox", view_box.as_str()),
        ]);
        writer
            .write_event(Event::Start(root))
            .context("write svg root")?;

        writer
            .write_event(Event::Start(BytesStart::new("defs")))
            .context("write defs")?;
        let mask = BytesStart::new("mask").with_attributes([("id", self.mask.id.as_str())]);
        writer
            .write_event(Event::Start(mask))
            .context("write mask")?;
        write_image(&mut writer, &self.mask.image)?;
        writer
            .write_event(Event::End(BytesEnd::new("mask")))
            .context("close mask")?;
        writer
            .write_event(Event::End(BytesEnd::new("defs")))
            .context("close defs")?;

        write_image(&mut writer, &self.image)?;
        writer
            .write_event(Event::End(BytesEnd::new("svg")))
            .context("close svg root")?;

        let mut bytes = writer.into_inner();
        if style == MarkupStyle::Pretty {
            bytes.push(b'\n');
        }
        Ok(String::from_utf8(bytes).context("svg markup is not utf-8")?)
    }
}

fn write_image(writer: &mut Writer<Vec<u8>>, image: &ImageElement) -> TranspegResult<()> {
    let width = image.width.to_string();
    let height = image.height.to_string();
    let mut el = BytesStart::new("image").with_attributes([
        ("width", width.as_str()),
        ("height", height.as_str()),
    ]);
    if let Some(mask) = &image.mask {
        el.push_attribute(("mask", mask.as_str()));
    }
    el.push_attribute(("xlink:href", image.href.as_str()));

    writer
        .write_event(Event::Empty(el))
        .context("write image element")?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/document/svg.rs"]
mod tests;
