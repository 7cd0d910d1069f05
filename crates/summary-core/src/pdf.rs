//! Single-page PDF rendering of the summary text
//!
//! Writes one `BT ... ET` block with the standard Helvetica font at the
//! layout's origin. Explicit newlines start a new line; there is no
//! word-wrap and text running off the page is simply clipped by viewers.

use crate::config::PdfLayout;
use crate::error::SummaryError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

const FONT_RESOURCE: &str = "F1";

/// Render `text` onto a single page and serialize the document
pub fn render_summary_pdf(text: &str, layout: &PdfLayout) -> Result<Vec<u8>, SummaryError> {
    layout.validate()?;

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id,
        },
    });

    let content = Content {
        operations: text_operations(text, layout),
    };
    let encoded = content
        .encode()
        .map_err(|e| SummaryError::Pdf(format!("Content encoding failed: {}", e)))?;
    let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(layout.page_width),
            Object::Real(layout.page_height),
        ],
        "Contents" => content_id,
        "Resources" => resources_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("Summary"),
        "Producer" => Object::string_literal(concat!("summary-core ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| SummaryError::Pdf(format!("Save failed: {}", e)))?;

    tracing::debug!(bytes = buffer.len(), "rendered summary pdf");
    Ok(buffer)
}

fn text_operations(text: &str, layout: &PdfLayout) -> Vec<Operation> {
    let (x, y) = layout.origin();

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(FONT_RESOURCE.as_bytes().to_vec()),
                Object::Real(layout.font_size),
            ],
        ),
        Operation::new("TL", vec![Object::Real(layout.leading())]),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
    ];

    for (i, line) in text.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if i > 0 {
            // next line, one leading below
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(line), StringFormat::Literal)],
        ));
    }

    operations.push(Operation::new("ET", vec![]));
    operations
}

/// Map text onto the single-byte font encoding; unmappable chars become '?'
fn encode_win_ansi(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| match u32::from(c) {
            code @ 0x20..=0x7E | code @ 0xA0..=0xFF => code as u8,
            0x09 => b' ',
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decode the operations of the only page
    fn page_operations(bytes: &[u8]) -> Vec<Operation> {
        let doc = Document::load_mem(bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let page_id = *pages.values().next().unwrap();
        let content = doc.get_page_content(page_id).unwrap();
        Content::decode(&content).unwrap().operations
    }

    fn shown_strings(ops: &[Operation]) -> Vec<Vec<u8>> {
        ops.iter()
            .filter(|op| op.operator == "Tj")
            .map(|op| op.operands[0].as_str().unwrap().to_vec())
            .collect()
    }

    #[test]
    fn test_renders_single_page_pdf() {
        let bytes = render_summary_pdf("Hello world", &PdfLayout::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_text_is_shown_at_fixed_position() {
        let layout = PdfLayout::default();
        let bytes = render_summary_pdf("Hello world", &layout).unwrap();
        let ops = page_operations(&bytes);

        let td = ops.iter().find(|op| op.operator == "Td").unwrap();
        let x = td.operands[0].as_float().unwrap();
        let y = td.operands[1].as_float().unwrap();
        let (expected_x, expected_y) = layout.origin();
        assert!((x - expected_x).abs() < 0.01);
        assert!((y - expected_y).abs() < 0.01);

        assert_eq!(shown_strings(&ops), vec![b"Hello world".to_vec()]);
    }

    #[test]
    fn test_parentheses_survive_escaping() {
        let bytes = render_summary_pdf("f(x) = (a) \\ b", &PdfLayout::default()).unwrap();
        let ops = page_operations(&bytes);
        assert_eq!(shown_strings(&ops), vec![b"f(x) = (a) \\ b".to_vec()]);
    }

    #[test]
    fn test_newlines_become_separate_lines() {
        let bytes = render_summary_pdf("first\r\nsecond\nthird", &PdfLayout::default()).unwrap();
        let ops = page_operations(&bytes);
        assert_eq!(
            shown_strings(&ops),
            vec![b"first".to_vec(), b"second".to_vec(), b"third".to_vec()]
        );
        assert!(ops.iter().any(|op| op.operator == "TL"));
        assert_eq!(ops.iter().filter(|op| op.operator == "T*").count(), 2);
    }

    #[test]
    fn test_font_is_declared() {
        let bytes = render_summary_pdf("x", &PdfLayout::default()).unwrap();
        let ops = page_operations(&bytes);
        let tf = ops.iter().find(|op| op.operator == "Tf").unwrap();
        assert_eq!(tf.operands[0].as_name().unwrap(), b"F1");
        assert_eq!(tf.operands[1].as_float().unwrap(), 16.0);
    }

    #[test]
    fn test_empty_text_still_renders() {
        let bytes = render_summary_pdf("", &PdfLayout::default()).unwrap();
        let ops = page_operations(&bytes);
        assert_eq!(shown_strings(&ops), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_bad_layout_is_a_pdf_error() {
        let layout = PdfLayout {
            page_height: -1.0,
            ..PdfLayout::default()
        };
        let err = render_summary_pdf("Hello", &layout).unwrap_err();
        assert!(matches!(err, SummaryError::Pdf(_)));
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("要約"), b"??".to_vec());
        assert_eq!(encode_win_ansi("a\tb"), b"a b".to_vec());
    }
}
