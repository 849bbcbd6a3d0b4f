use lopdf::content::{Content, Operation};
use lopdf::{Object, Stream, dictionary};

use super::*;

pub(crate) fn certificate_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();
    let font_id = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::<Object>::new();
    for lines in pages {
        let mut operations = Vec::new();
        let mut y: i64 = 760;
        for line in lines.iter() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 14.into()]));
            operations.push(Operation::new("Td", vec![72.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
            y -= 24;
        }

        let content = Content { operations };
        let content_id = document.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode page content"),
        ));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    document.save_to(&mut buffer).expect("save fixture pdf");
    buffer
}

fn three_page_pdf() -> Vec<u8> {
    certificate_pdf(&[
        &["ATTESTATO DI PARTECIPAZIONE", "MARIO ROSSI", "NUMERO PETTORALE 101"],
        &["ATTESTATO DI PARTECIPAZIONE", "ANNA BIANCHI", "NUMERO PETTORALE 102"],
        &["ATTESTATO DI PARTECIPAZIONE", "LUCA VERDI", "NUMERO PETTORALE 103"],
    ])
}

#[test]
fn pdf_document_reports_page_count() {
    let document = PdfDocument::from_bytes(&three_page_pdf()).expect("open pdf");
    assert_eq!(document.page_count(), 3);
}

#[test]
fn pdf_document_extracts_page_text() {
    let document = PdfDocument::from_bytes(&three_page_pdf()).expect("open pdf");
    let text = document.page_text(2).expect("page text");
    assert!(text.contains("ANNA BIANCHI"));
    assert!(!text.contains("MARIO ROSSI"));
}

#[test]
fn extract_single_page_yields_one_page_document() {
    let document = PdfDocument::from_bytes(&three_page_pdf()).expect("open pdf");

    let bytes = document.extract_single_page(1).expect("single page");
    let single = PdfDocument::from_bytes(&bytes).expect("reopen single page");

    assert_eq!(single.page_count(), 1);
    assert_eq!(document.page_count(), 3);
}

#[test]
fn extract_single_page_rejects_out_of_range_pages() {
    let document = PdfDocument::from_bytes(&three_page_pdf()).expect("open pdf");

    assert!(document.extract_single_page(0).is_err());
    assert!(document.extract_single_page(4).is_err());
}

#[test]
fn from_bytes_rejects_non_pdf_input() {
    assert!(PdfDocument::from_bytes(b"not a pdf at all").is_err());
}

#[test]
fn split_text_blocks_groups_lines_between_blank_lines() {
    let blocks = split_text_blocks("ATTESTATO\n\nMARIO ROSSI\nNOME\n  \n\nPETTORALE 12\n");
    assert_eq!(
        blocks,
        vec![
            "ATTESTATO".to_string(),
            "MARIO ROSSI\nNOME".to_string(),
            "PETTORALE 12".to_string(),
        ]
    );
}

#[test]
fn split_text_blocks_keeps_unbroken_page_as_one_block() {
    let blocks = split_text_blocks("MARIO ROSSI\nNUMERO PETTORALE 7");
    assert_eq!(blocks, vec!["MARIO ROSSI\nNUMERO PETTORALE 7".to_string()]);
}

#[test]
fn fixture_pages_report_unreadable_pages() {
    let fixture = FixturePages::new(&["one", "two"]).with_unreadable_page(2);

    assert_eq!(fixture.page_text(1).expect("page one"), "one");
    assert!(fixture.page_text(2).is_err());
    assert!(fixture.page_text(3).is_err());
}

#[test]
fn extract_page_returns_nothing_for_invalid_pages() {
    let document = PdfDocument::from_bytes(&three_page_pdf()).expect("open pdf");

    assert!(extract_page(&document, 2).is_some());
    assert!(extract_page(&document, 0).is_none());
    assert!(extract_page(&document, 9).is_none());
}
