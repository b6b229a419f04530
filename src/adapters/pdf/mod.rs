//! PDF adapter: Implementation of DocumentEncoder using lopdf.
//!
//! Pages are written uncompressed with the two standard Helvetica faces, so
//! no font files are embedded. Nothing time-dependent (creation date,
//! document ID) is written, which keeps output byte-for-byte reproducible.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::domain::report::{Font, PAGE_HEIGHT, PAGE_WIDTH};
use crate::domain::ReportLayout;
use crate::ports::{DocumentEncoder, DocumentError};

const PDF_VERSION: &str = "1.5";

/// Writes report layouts as PDF documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfEncoder;

impl PdfEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn font_key(font: Font) -> &'static str {
    match font {
        Font::Helvetica => "F1",
        Font::HelveticaBold => "F2",
    }
}

/// Map text onto the bytes the standard fonts can show.
///
/// Anything outside printable ASCII becomes `?`, matching the widths the
/// layout was measured with.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (' '..='~').contains(&c) { c as u8 } else { b'?' })
        .collect()
}

fn add_font(doc: &mut Document, font: Font) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_name(),
        "Encoding" => "WinAnsiEncoding",
    })
}

impl DocumentEncoder for PdfEncoder {
    fn encode(&self, layout: &ReportLayout) -> Result<Vec<u8>, DocumentError> {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();

        let regular = add_font(&mut doc, Font::Helvetica);
        let bold = add_font(&mut doc, Font::HelveticaBold);
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                font_key(Font::Helvetica) => regular,
                font_key(Font::HelveticaBold) => bold,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(layout.page_count());
        for page in layout.pages() {
            let mut operations = Vec::with_capacity(page.lines.len() * 5);
            for line in &page.lines {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![font_key(line.font).into(), line.size.into()],
                ));
                operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_text(&line.text))],
                ));
                operations.push(Operation::new("ET", vec![]));
            }

            let content = Content { operations }
                .encode()
                .map_err(|e| DocumentError::Pdf(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    PAGE_WIDTH.into(),
                    PAGE_HEIGHT.into(),
                ],
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| DocumentError::Pdf(e.to_string()))?;

        tracing::debug!(
            "Encoded report: {} page(s), {} bytes",
            layout.page_count(),
            bytes.len()
        );
        Ok(bytes)
    }
}
