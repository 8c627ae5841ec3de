//! OOXML container refinement.
//!
//! A zip holding `[Content_Types].xml` could be a workbook, a document or a
//! presentation. The manifest lists the main part's content type, which is
//! enough to tell them apart without parsing any relationships.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;
use zip::read::read_zipfile_from_stream;
use zip::result::ZipResult;

use crate::common::mime;
use crate::ooxml::opc::constants::manifest_marker;

const MANIFEST_NAME: &str = "[Content_Types].xml";

/// Manifest substring to the MIME type it identifies, checked in order.
const MARKERS: [(&str, &str); 3] = [
    (manifest_marker::SPREADSHEET, mime::XLSX),
    (manifest_marker::WORDPROCESSING, mime::DOCX),
    (manifest_marker::PRESENTATION, mime::PPTX),
];

/// MIME type of the OOXML container at `path`, or `fallback` when the
/// manifest is missing, unreadable or names none of the known kinds.
pub fn refine(path: &Path, fallback: &str) -> String {
    match read_manifest(path) {
        Ok(Some(manifest)) => match classify_manifest(&manifest) {
            Some(refined) => refined.to_string(),
            None => {
                debug!(fallback, "manifest names no known document kind");
                fallback.to_string()
            },
        },
        Ok(None) => {
            debug!(fallback, "container has no content types manifest");
            fallback.to_string()
        },
        Err(err) => {
            debug!(error = %err, fallback, "container could not be read");
            fallback.to_string()
        },
    }
}

/// MIME type named by the first marker that occurs in `manifest`.
pub fn classify_manifest(manifest: &str) -> Option<&'static str> {
    MARKERS
        .iter()
        .find(|(marker, _)| manifest.contains(marker))
        .map(|&(_, mime)| mime)
}

/// Read the manifest entry, if any.
///
/// The central directory is tried first. When it cannot be read, the local
/// headers are scanned from the start of the file instead, so a package cut
/// short after its manifest still refines.
fn read_manifest(path: &Path) -> ZipResult<Option<String>> {
    match ZipArchive::new(BufReader::new(File::open(path)?)) {
        Ok(mut archive) => manifest_from_archive(&mut archive),
        Err(err) => {
            debug!(error = %err, "central directory unreadable, scanning local headers");
            manifest_from_local_headers(&mut BufReader::new(File::open(path)?))
        },
    }
}

fn manifest_from_archive<R: Read + Seek>(archive: &mut ZipArchive<R>) -> ZipResult<Option<String>> {
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.name() != MANIFEST_NAME {
            continue;
        }
        return read_entry(&mut entry).map(Some);
    }

    Ok(None)
}

/// Walk the local file headers in order until the manifest or the central
/// directory is reached.
fn manifest_from_local_headers<R: Read>(reader: &mut R) -> ZipResult<Option<String>> {
    while let Some(mut entry) = read_zipfile_from_stream(&mut *reader)? {
        if entry.name() == MANIFEST_NAME {
            return read_entry(&mut entry).map(Some);
        }
    }

    Ok(None)
}

fn read_entry<R: Read>(entry: &mut R) -> ZipResult<String> {
    let mut raw = Vec::new();
    entry.read_to_end(&mut raw)?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}
