//! Archive and merge writers against real files.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use certgen_output::{
    ARCHIVE_FILE_NAME, CertificateArchive, MERGED_FILE_NAME, OutputError, PdfMerger,
    TransientFile,
};
use lopdf::{Document, Object, Stream, dictionary};

fn one_page_pdf(label: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let content = format!("BT /F1 24 Tf 100 600 Td ({label}) Tj ET");
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize pdf");
    bytes
}

fn read_entry(archive_path: &Path, name: &str) -> Vec<u8> {
    let mut archive = zip::ZipArchive::new(File::open(archive_path).expect("open zip"))
        .expect("read zip");
    let mut entry = archive.by_name(name).expect("entry present");
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes).expect("read entry");
    bytes
}

#[test]
fn archive_holds_one_entry_per_certificate() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archive_path = dir.path().join(ARCHIVE_FILE_NAME);
    let mut archive = CertificateArchive::create(&archive_path).expect("create archive");

    for (name, body) in [("Asha_C1.pdf", b"first".as_slice()), ("Ravi_C2.pdf", b"second")] {
        let file = TransientFile::write(dir.path(), name, body).expect("write");
        archive.add_file(name, file.path()).expect("add entry");
        file.remove();
    }
    assert_eq!(archive.entry_count(), 2);

    let finished = archive.finish().expect("finish");
    assert_eq!(finished.entries, vec!["Asha_C1.pdf", "Ravi_C2.pdf"]);
    assert!(finished.bytes > 0);
    assert_eq!(read_entry(&archive_path, "Ravi_C2.pdf"), b"second");
    assert!(!dir.path().join("Asha_C1.pdf").exists());
}

#[test]
fn empty_archive_is_still_a_valid_zip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archive_path = dir.path().join(ARCHIVE_FILE_NAME);
    let finished = CertificateArchive::create(&archive_path)
        .expect("create")
        .finish()
        .expect("finish");
    assert!(finished.entries.is_empty());
    let archive = zip::ZipArchive::new(File::open(&archive_path).expect("open")).expect("read");
    assert_eq!(archive.len(), 0);
}

#[test]
fn archive_source_must_exist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut archive =
        CertificateArchive::create(&dir.path().join(ARCHIVE_FILE_NAME)).expect("create");
    let err = archive
        .add_file("ghost.pdf", &dir.path().join("ghost.pdf"))
        .unwrap_err();
    assert!(matches!(err, OutputError::Io { .. }));
}

#[test]
fn merged_pdf_keeps_pages_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut merger = PdfMerger::new();
    for label in ["first", "second", "third"] {
        let path = dir.path().join(format!("{label}.pdf"));
        fs::write(&path, one_page_pdf(label)).expect("write pdf");
        merger.add_file(&path).expect("add pdf");
    }
    assert_eq!(merger.page_count(), 3);
    assert_eq!(merger.document_count(), 3);

    let out = dir.path().join(MERGED_FILE_NAME);
    merger.save(&out).expect("save merged");

    let merged = Document::load(&out).expect("load merged");
    let pages = merged.get_pages();
    assert_eq!(pages.len(), 3);
    let texts: Vec<String> = pages
        .values()
        .map(|id| {
            let content = merged.get_page_content(*id).expect("page content");
            String::from_utf8_lossy(&content).into_owned()
        })
        .collect();
    assert!(texts[0].contains("first"));
    assert!(texts[2].contains("third"));
}

#[test]
fn empty_merge_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join(MERGED_FILE_NAME);
    let err = PdfMerger::new().save(&out).unwrap_err();
    assert!(matches!(err, OutputError::NoPages));
    assert!(!out.exists());
}

#[test]
fn non_pdf_input_is_a_pdf_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.pdf");
    fs::write(&path, b"not a pdf").expect("write");
    let err = PdfMerger::new().add_file(&path).unwrap_err();
    assert!(matches!(err, OutputError::Pdf { .. }));
}
