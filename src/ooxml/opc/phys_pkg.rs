//! Physical access to the zip container behind an OPC package.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::io::{Read, Seek};
use zip::ZipArchive;
use zip::result::ZipError;

/// Physical package reader that provides access to parts in a ZIP-based OPC package.
///
/// Members are decompressed on demand; nothing is cached.
pub struct PhysPkgReader<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> PhysPkgReader<R> {
    /// Read the central directory of the zip in `reader`.
    pub fn new(reader: R) -> Result<Self> {
        Ok(Self {
            archive: ZipArchive::new(reader)?,
        })
    }

    /// Whether the archive has a member for `pack_uri`.
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.archive.index_for_name(pack_uri.membername()).is_some()
    }

    /// Decompressed content of the part at `pack_uri`.
    pub fn blob_for(&mut self, pack_uri: &PackURI) -> Result<Vec<u8>> {
        let mut blob = Vec::new();
        self.open(pack_uri)?.read_to_end(&mut blob)?;
        Ok(blob)
    }

    /// Content of the `.rels` part for `source_uri`, `None` when it has none.
    pub fn rels_xml_for(&mut self, source_uri: &PackURI) -> Result<Option<Vec<u8>>> {
        let rels_uri = source_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        if !self.contains(&rels_uri) {
            return Ok(None);
        }
        self.blob_for(&rels_uri).map(Some)
    }

    /// Open the part at `pack_uri` for streaming reads.
    pub fn open(&mut self, pack_uri: &PackURI) -> Result<impl Read + '_> {
        self.archive
            .by_name(pack_uri.membername())
            .map_err(|err| match err {
                ZipError::FileNotFound => OpcError::PartNotFound(pack_uri.to_string()),
                other => OpcError::ZipError(other),
            })
    }
}
