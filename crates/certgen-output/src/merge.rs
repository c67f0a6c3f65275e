//! Merge single-certificate PDFs into one document.

use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::Path;

use lopdf::{Document, Object, ObjectId};
use tracing::debug;

use crate::error::{OutputError, Result};

/// File name of the merged document written in email mode.
pub const MERGED_FILE_NAME: &str = "certificates.pdf";

/// Running accumulator of PDF pages.
///
/// Each added document is renumbered past the objects already held so ids
/// never collide; catalogs and page trees are rebuilt on [`PdfMerger::save`].
#[derive(Default)]
pub struct PdfMerger {
    max_id: u32,
    pages: Vec<(ObjectId, Object)>,
    objects: BTreeMap<ObjectId, Object>,
    documents: usize,
}

fn dictionary_type(object: &Object) -> Option<&[u8]> {
    object.as_dict().ok()?.get(b"Type").ok()?.as_name().ok()
}

impl PdfMerger {
    pub fn new() -> Self {
        Self {
            max_id: 1,
            ..Self::default()
        }
    }

    /// Load the PDF at `path` and append its pages.
    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        let document = Document::load(path).map_err(|source| OutputError::Pdf {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_document(document);
        Ok(())
    }

    pub fn add_document(&mut self, mut document: Document) {
        document.renumber_objects_with(self.max_id);
        self.max_id = document.max_id + 1;
        let page_count = self.pages.len();
        for (_, page_id) in document.get_pages() {
            if let Ok(page) = document.get_object(page_id) {
                self.pages.push((page_id, page.to_owned()));
            }
        }
        self.objects.extend(document.objects);
        self.documents += 1;
        debug!(
            pages = self.pages.len() - page_count,
            total_pages = self.pages.len(),
            "document appended to merge"
        );
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn document_count(&self) -> usize {
        self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Build the merged document.
    pub fn into_document(self) -> Result<Document> {
        let mut merged = Document::with_version("1.5");
        let mut catalog: Option<(ObjectId, Object)> = None;
        let mut page_root: Option<(ObjectId, Object)> = None;

        for (object_id, object) in &self.objects {
            match dictionary_type(object).unwrap_or(b"") {
                b"Catalog" => {
                    let id = catalog.as_ref().map_or(*object_id, |(id, _)| *id);
                    catalog = Some((id, object.clone()));
                }
                b"Pages" => {
                    if let Ok(dictionary) = object.as_dict() {
                        let mut dictionary = dictionary.clone();
                        if let Some((_, previous)) = &page_root
                            && let Ok(previous) = previous.as_dict()
                        {
                            dictionary.extend(previous);
                        }
                        let id = page_root.as_ref().map_or(*object_id, |(id, _)| *id);
                        page_root = Some((id, Object::Dictionary(dictionary)));
                    }
                }
                b"Page" | b"Outlines" | b"Outline" => {}
                _ => {
                    merged.objects.insert(*object_id, object.clone());
                }
            }
        }

        let (pages_id, pages_object) = page_root.ok_or(OutputError::NoPages)?;
        let (catalog_id, catalog_object) = catalog.ok_or(OutputError::NoPages)?;

        for (page_id, page) in &self.pages {
            if let Ok(dictionary) = page.as_dict() {
                let mut dictionary = dictionary.clone();
                dictionary.set("Parent", pages_id);
                merged
                    .objects
                    .insert(*page_id, Object::Dictionary(dictionary));
            }
        }

        if let Ok(dictionary) = pages_object.as_dict() {
            let mut dictionary = dictionary.clone();
            dictionary.set("Count", self.pages.len() as u32);
            dictionary.set(
                "Kids",
                self.pages
                    .iter()
                    .map(|(page_id, _)| Object::Reference(*page_id))
                    .collect::<Vec<_>>(),
            );
            merged
                .objects
                .insert(pages_id, Object::Dictionary(dictionary));
        }

        if let Ok(dictionary) = catalog_object.as_dict() {
            let mut dictionary = dictionary.clone();
            dictionary.set("Pages", pages_id);
            dictionary.remove(b"Outlines");
            merged
                .objects
                .insert(catalog_id, Object::Dictionary(dictionary));
        }

        merged.trailer.set("Root", catalog_id);
        merged.max_id = merged.objects.len() as u32;
        merged.renumber_objects();
        merged.adjust_zero_pages();
        merged.compress();
        Ok(merged)
    }

    /// Write the merged document to `path`.
    pub fn save(self, path: &Path) -> Result<()> {
        if self.is_empty() {
            return Err(OutputError::NoPages);
        }
        let mut merged = self.into_document()?;
        let mut file = File::create(path).map_err(|e| OutputError::io(path, e))?;
        merged
            .save_to(&mut file)
            .map_err(|e| OutputError::io(path, io::Error::other(e.to_string())))?;
        debug!(path = %path.display(), "merged document saved");
        Ok(())
    }
}
