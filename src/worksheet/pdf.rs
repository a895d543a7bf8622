//! PDF rendering of a worksheet layout
//!
//! Text uses the non-embedded Adobe-Korea1 CID font `HYSMyeongJo-Medium` with
//! the `UniKS-UCS2-H` CMap, so strings are written as UCS-2 big-endian.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::layout::*;

const FONT_NAME: &str = "HYSMyeongJo-Medium";
const FONT_ENCODING: &str = "UniKS-UCS2-H";
const FONT_KEY: &str = "F1";

/// Stand-in for characters the UCS-2 CMap cannot address
const REPLACEMENT: char = '\u{3013}';

const TITLE_SIZE: f32 = 16.0;
const DATE_SIZE: f32 = 10.0;
const GRADE_SIZE: f32 = 8.0;
const GLYPH_SIZE: f32 = 28.0;
const INFO_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 8.0;

fn pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

fn real(value: f32) -> Object {
    value.into()
}

/// UCS-2 big-endian bytes for the CID font
fn encode_text(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len() * 2);
    for c in text.chars() {
        let c = if (c as u32) > 0xFFFF { REPLACEMENT } else { c };
        let mut units = [0u16; 2];
        for unit in c.encode_utf16(&mut units) {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
    }
    bytes
}

/// Approximate advance width: ASCII is half-width, everything else full-width
fn text_width(text: &str, size: f32) -> f32 {
    text.chars()
        .map(|c| if c.is_ascii() { 0.5 } else { 1.0 })
        .sum::<f32>()
        * size
}

/// Builder for a page content stream
struct PageOps {
    ops: Vec<Operation>,
}

impl PageOps {
    fn new() -> Self {
        Self { ops: Vec::new() }
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.ops.push(Operation::new(operator, operands));
    }

    fn fill_gray(&mut self, level: f32) {
        self.op("rg", vec![real(level), real(level), real(level)]);
    }

    fn stroke_gray(&mut self, level: f32) {
        self.op("RG", vec![real(level), real(level), real(level)]);
    }

    /// Text with its baseline starting at (x, y) in mm
    fn text(&mut self, x: f32, y: f32, size: f32, text: &str) {
        self.op("BT", vec![]);
        self.op("Tf", vec![FONT_KEY.into(), real(size)]);
        self.op("Td", vec![real(pt(x)), real(pt(y))]);
        self.op(
            "Tj",
            vec![Object::String(encode_text(text), StringFormat::Hexadecimal)],
        );
        self.op("ET", vec![]);
    }

    fn centered_text(&mut self, y: f32, size: f32, text: &str) {
        let width_mm = text_width(text, size) * 25.4 / 72.0;
        self.text((PAGE_WIDTH_MM - width_mm) / 2.0, y, size, text);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.op("m", vec![real(pt(x1)), real(pt(y1))]);
        self.op("l", vec![real(pt(x2)), real(pt(y2))]);
        self.op("S", vec![]);
    }

    fn tracing_box(&mut self, b: &TracingBox) {
        self.stroke_gray(0.7);
        self.op("w", vec![real(0.5)]);
        self.op(
            "re",
            vec![real(pt(b.x)), real(pt(b.y)), real(pt(b.size)), real(pt(b.size))],
        );
        self.op("S", vec![]);

        self.stroke_gray(0.85);
        self.op("d", vec![vec![real(2.0), real(2.0)].into(), 0.into()]);
        let (cx, cy) = b.center();
        self.line(b.x, cy, b.x + b.size, cy);
        self.line(cx, b.y, cx, b.y + b.size);
        self.op("d", vec![Vec::<Object>::new().into(), 0.into()]);
    }

    fn row(&mut self, row: &RowLayout) {
        self.fill_gray(0.0);
        self.text(LEFT_MARGIN_MM, row.y + 12.0, GRADE_SIZE, &row.grade_label);
        self.text(LEFT_MARGIN_MM, row.y - 2.0, GLYPH_SIZE, &row.glyph);
        self.text(LEFT_MARGIN_MM + 22.0, row.y + 8.0, INFO_SIZE, &row.reading);
        self.text(LEFT_MARGIN_MM + 22.0, row.y, INFO_SIZE, &row.meaning);

        for b in &row.boxes {
            self.tracing_box(b);
        }
    }

    fn footer(&mut self, text: &str) {
        self.fill_gray(0.5);
        self.centered_text(FOOTER_OFFSET_MM, FOOTER_SIZE, text);
    }

    fn encode(self) -> lopdf::Result<Vec<u8>> {
        Content {
            operations: self.ops,
        }
        .encode()
    }
}

fn add_font(doc: &mut Document) -> ObjectId {
    let bbox: Vec<Object> = vec![0.into(), (-148).into(), 1001.into(), 880.into()];
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => FONT_NAME,
        "Flags" => 6,
        "FontBBox" => bbox,
        "ItalicAngle" => 0,
        "Ascent" => 880,
        "Descent" => -120,
        "CapHeight" => 880,
        "StemV" => 59,
    });

    // CIDs 1-95 are the proportional ASCII range in Adobe-Korea1
    let widths: Vec<Object> = vec![1.into(), 95.into(), 500.into()];
    let cid_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType0",
        "BaseFont" => FONT_NAME,
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Korea1"),
            "Supplement" => 1,
        },
        "FontDescriptor" => descriptor_id,
        "DW" => 1000,
        "W" => widths,
    });

    let descendants: Vec<Object> = vec![cid_font_id.into()];
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => format!("{}-{}", FONT_NAME, FONT_ENCODING),
        "Encoding" => FONT_ENCODING,
        "DescendantFonts" => descendants,
    })
}

/// Render the layout to PDF bytes. The footer is drawn on every page.
pub fn render(layout: &WorksheetLayout, footer: &str) -> lopdf::Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = add_font(&mut doc);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_KEY => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for (page_no, page) in layout.pages.iter().enumerate() {
        let mut ops = PageOps::new();

        if page_no == 0 {
            ops.fill_gray(0.0);
            ops.centered_text(PAGE_HEIGHT_MM - TITLE_OFFSET_MM, TITLE_SIZE, &layout.title);
            ops.centered_text(PAGE_HEIGHT_MM - DATE_OFFSET_MM, DATE_SIZE, &layout.date_line);
        }
        for row in &page.rows {
            ops.row(row);
        }
        ops.footer(footer);

        let content_id = doc.add_object(Stream::new(dictionary! {}, ops.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        real(pt(PAGE_WIDTH_MM)),
        real(pt(PAGE_HEIGHT_MM)),
    ];
    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_text_ucs2() {
        assert_eq!(encode_text("A"), vec![0x00, 0x41]);
        assert_eq!(encode_text("水"), vec![0x6C, 0x34]);
        // Outside the BMP
        assert_eq!(encode_text("\u{20000}"), vec![0x30, 0x13]);
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("ab", 10.0), 10.0);
        assert_eq!(text_width("한자", 10.0), 20.0);
    }

    #[test]
    fn test_mm_to_points() {
        assert!((pt(25.4) - 72.0).abs() < 1e-4);
        assert!((pt(PAGE_WIDTH_MM) - 595.28).abs() < 0.01);
    }
}
