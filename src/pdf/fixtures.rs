//! In-memory PDF documents for tests

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

const IDENTITY_UCS_CMAP: &[u8] = b"/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
6 beginbfchar
<0001> <004B>
<0002> <006C>
<0003> <0069>
<0004> <0065>
<0005> <006E>
<0006> <0074>
endbfchar
endcmap
end
end";

/// String operand for `text`: a literal for ASCII, UTF-16BE with BOM otherwise
pub(crate) fn text_object(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// One text object showing each run with its own `Tj`, each at a new position
pub(crate) fn show_runs(runs: &[&str]) -> Vec<Operation> {
    let mut ops = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 720.into()]),
    ];
    for (index, run) in runs.iter().enumerate() {
        if index > 0 {
            ops.push(Operation::new("Td", vec![60.into(), 0.into()]));
        }
        ops.push(Operation::new("Tj", vec![text_object(run)]));
    }
    ops.push(Operation::new("ET", vec![]));
    ops
}

pub(crate) fn standard_font(_doc: &mut Document) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    }
}

/// Type0 font whose glyph ids 1..=6 map to "K", "l", "i", "e", "n", "t"
pub(crate) fn composite_font(doc: &mut Document) -> Dictionary {
    let cmap_id = doc.add_object(Stream::new(dictionary! {}, IDENTITY_UCS_CMAP.to_vec()));
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => "ArialMT",
        "Encoding" => "Identity-H",
        "ToUnicode" => cmap_id,
    }
}

/// Serialize a document with one page per operation list, all sharing font `F1`
pub(crate) fn pdf_from_operations(
    pages: Vec<Vec<Operation>>,
    font: impl FnOnce(&mut Document) -> Dictionary,
) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font = font(&mut doc);
    let font_id = doc.add_object(font);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("serialize PDF");
    buffer
}

/// A document with the given text runs per page
pub(crate) fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
    let pages = pages.iter().map(|runs| show_runs(runs)).collect();
    pdf_from_operations(pages, standard_font)
}
