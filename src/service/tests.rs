use tempfile::TempDir;

use super::*;
use crate::document::tests::certificate_pdf;

fn race_pdf() -> Vec<u8> {
    certificate_pdf(&[
        &["ATTESTATO DI PARTECIPAZIONE", "MARIO ROSSI", "NUMERO PETTORALE 101"],
        &["ATTESTATO DI PARTECIPAZIONE", "LUCA VERDI", "NUMERO PETTORALE 102"],
        &["ATTESTATO DI PARTECIPAZIONE", "ANNA BIANCHI", "NUMERO PETTORALE 103"],
        &["ATTESTATO DI PARTECIPAZIONE", "LUCA VERDI", "NUMERO PETTORALE 104"],
    ])
}

fn ingested_service() -> (TempDir, CertificateService) {
    let dir = TempDir::new().expect("tempdir");
    let service = CertificateService::new(dir.path()).expect("service");
    service
        .ingest("maratona", "attestati.pdf", &race_pdf())
        .expect("ingest");
    (dir, service)
}

#[test]
fn ingest_indexes_every_certificate() {
    let dir = TempDir::new().expect("tempdir");
    let service = CertificateService::new(dir.path()).expect("service");

    let counts = service
        .ingest("maratona", "Attestati.PDF", &race_pdf())
        .expect("ingest");

    assert_eq!(
        counts,
        IndexCounts {
            bib_count: 4,
            name_count: 3
        }
    );

    let index = service.load_index("maratona").expect("load index");
    let meta = index.meta.expect("index meta");
    assert_eq!(meta.page_count, 4);
    assert_eq!(meta.source_sha256, sha256_hex(&race_pdf()));
    assert!(meta.failed_pages.is_empty());
}

#[test]
fn ingest_rejects_invalid_input_without_storing_anything() {
    let dir = TempDir::new().expect("tempdir");
    let service = CertificateService::new(dir.path()).expect("service");

    assert!(service.ingest("bad id", "attestati.pdf", &race_pdf()).is_err());
    assert!(service.ingest("maratona", "attestati.docx", &race_pdf()).is_err());
    assert!(service.ingest("maratona", "attestati.pdf", b"garbage").is_err());

    let status = service.status("maratona").expect("status");
    assert!(!status.document_present);
    assert!(!status.index_present);
}

#[test]
fn query_resolves_bib_and_name() {
    let (_dir, service) = ingested_service();

    assert_eq!(
        service.query("maratona", "103", false).expect("query"),
        Some(Resolution::Single {
            page: 3,
            matched_by: MatchKind::Bib
        })
    );
    assert_eq!(
        service.query("maratona", " mario rossi ", false).expect("query"),
        Some(Resolution::Single {
            page: 1,
            matched_by: MatchKind::Name
        })
    );
}

#[test]
fn query_reports_ambiguous_names_unless_first_only() {
    let (_dir, service) = ingested_service();

    assert_eq!(
        service.query("maratona", "Luca Verdi", false).expect("query"),
        Some(Resolution::Multiple { pages: vec![2, 4] })
    );
    assert_eq!(
        service.query("maratona", "Luca Verdi", true).expect("query"),
        Some(Resolution::Single {
            page: 2,
            matched_by: MatchKind::Name
        })
    );
}

#[test]
fn query_distinguishes_not_found_from_missing_collection() {
    let (_dir, service) = ingested_service();

    assert_eq!(
        service.query("maratona", "999", false).expect("query"),
        Some(Resolution::NotFound)
    );
    assert_eq!(service.query("trail", "101", false).expect("query"), None);
    assert!(service.query("maratona", "   ", false).is_err());
}

#[test]
fn materialize_page_produces_single_page_document() {
    let (_dir, service) = ingested_service();

    let bytes = service
        .materialize_page("maratona", 2)
        .expect("materialize")
        .expect("document present");
    let single = PdfDocument::from_bytes(&bytes).expect("reopen");

    assert_eq!(single.page_count(), 1);
    assert!(single.page_text(1).expect("text").contains("LUCA VERDI"));
}

#[test]
fn materialize_page_rejects_out_of_range_pages() {
    let (_dir, service) = ingested_service();

    assert!(service.materialize_page("maratona", 0).is_err());
    assert!(service.materialize_page("maratona", 5).is_err());
    assert_eq!(service.materialize_page("trail", 1).expect("missing"), None);
}

#[test]
fn reindex_rebuilds_identical_mappings() {
    let (_dir, service) = ingested_service();
    let before = service.load_index("maratona").expect("load before");

    let counts = service.reindex("maratona").expect("reindex");
    let after = service.load_index("maratona").expect("load after");

    assert_eq!(
        counts,
        Some(IndexCounts {
            bib_count: 4,
            name_count: 3
        })
    );
    assert_eq!(before.by_bib, after.by_bib);
    assert_eq!(before.by_name, after.by_name);
}

#[test]
fn reindex_of_missing_collection_is_none() {
    let dir = TempDir::new().expect("tempdir");
    let service = CertificateService::new(dir.path()).expect("service");

    assert_eq!(service.reindex("maratona").expect("reindex"), None);
    assert!(service.reindex("").is_err());
}

#[test]
fn list_collections_reports_ingested_collection() {
    let (_dir, service) = ingested_service();

    let collections = service.list_collections().expect("list");

    assert_eq!(collections.len(), 1);
    assert_eq!(collections[0].id, "maratona");
    assert_eq!(collections[0].display_name, "Maratona");
    assert!(collections[0].document_present);
    assert!(collections[0].index_present);
}

#[test]
fn page_dump_exposes_text_and_blocks() {
    let (_dir, service) = ingested_service();

    let dump = service
        .page_dump("maratona", 3)
        .expect("page dump")
        .expect("document present");

    assert_eq!(dump.page, 3);
    assert!(dump.text.contains("ANNA BIANCHI"));
    assert!(!dump.blocks.is_empty());
    assert!(service.page_dump("maratona", 7).is_err());
}

#[test]
fn download_names_follow_match_kind() {
    assert_eq!(
        query_download_name("maratona", "101", MatchKind::Bib),
        "attestato_maratona_pettorale_101.pdf"
    );
    assert_eq!(
        query_download_name("maratona", "D'Angelo Nicolò", MatchKind::Name),
        "attestato_maratona_D_Angelo_Nicol_.pdf"
    );
    assert_eq!(
        query_download_name("maratona", &"a".repeat(80), MatchKind::Name),
        format!("attestato_maratona_{}.pdf", "a".repeat(50))
    );
    assert_eq!(page_download_name("maratona", 4), "attestato_maratona_p4.pdf");
}

#[test]
fn ingest_removes_new_document_when_index_cannot_be_saved() {
    let dir = TempDir::new().expect("tempdir");
    let service = CertificateService::new(dir.path()).expect("service");
    std::fs::create_dir_all(dir.path().join("maratona").join("index.json")).expect("block index");

    assert!(service.ingest("maratona", "attestati.pdf", &race_pdf()).is_err());

    let status = service.status("maratona").expect("status");
    assert!(!status.document_present);
}

#[test]
fn failed_reingest_keeps_previous_document() {
    let (dir, service) = ingested_service();
    let index_path = dir.path().join("maratona").join("index.json");
    std::fs::remove_file(&index_path).expect("remove index");
    std::fs::create_dir(&index_path).expect("block index");

    let replacement = certificate_pdf(&[&["ATTESTATO", "ANNA BIANCHI", "NUMERO PETTORALE 9"]]);
    assert!(service.ingest("maratona", "attestati.pdf", &replacement).is_err());

    let stored = std::fs::read(dir.path().join("maratona").join("attestati.pdf")).expect("stored document");
    assert_eq!(stored, race_pdf());
}
