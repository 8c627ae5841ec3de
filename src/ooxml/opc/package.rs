//! Read-only view of an OPC package.
//!
//! Opening a package reads `[Content_Types].xml` and the package-level
//! relationships. Every other part is read only when asked for.

use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::rel::{Relationship, Relationships};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Content type map for looking up content types by part name or extension.
///
/// Implements the OPC content type discovery algorithm using Default and
/// Override elements from `[Content_Types].xml`.
#[derive(Debug, Default)]
pub struct ContentTypeMap {
    /// Maps lower-case file extensions to default content types
    defaults: HashMap<String, String>,
    /// Maps specific partnames to override content types
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    /// Parse content types from `[Content_Types].xml`.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let entry = match e.local_name().as_ref() {
                        b"Default" => Some((&b"Extension"[..], true)),
                        b"Override" => Some((&b"PartName"[..], false)),
                        _ => None,
                    };

                    if let Some((key_attr, is_default)) = entry {
                        let mut key = None;
                        let mut content_type = None;
                        for attr in e.attributes() {
                            let attr = attr?;
                            let name = attr.key.as_ref();
                            if name == key_attr {
                                key = Some(attr.unescape_value()?.to_string());
                            } else if name == b"ContentType" {
                                content_type = Some(attr.unescape_value()?.to_string());
                            }
                        }

                        if let (Some(key), Some(ct)) = (key, content_type) {
                            // Extensions and part names compare case-insensitively
                            let key = key.to_ascii_lowercase();
                            if is_default {
                                map.defaults.insert(key, ct);
                            } else {
                                map.overrides.insert(key, ct);
                            }
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!(
                        "Content types parse error: {}",
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Get the content type for a partname.
    ///
    /// First checks for an override, then falls back to the default
    /// based on file extension.
    pub fn get(&self, pack_uri: &PackURI) -> Result<&str> {
        if let Some(ct) = self.overrides.get(&pack_uri.as_str().to_ascii_lowercase()) {
            return Ok(ct);
        }

        let ext = pack_uri
            .filename()
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        self.defaults
            .get(&ext)
            .map(String::as_str)
            .ok_or_else(|| OpcError::ContentTypeNotFound(pack_uri.to_string()))
    }

    /// Whether nothing was declared at all.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.overrides.is_empty()
    }
}

/// An opened OPC package.
pub struct OpcPackage<R: Read + Seek> {
    phys: PhysPkgReader<R>,
    content_types: ContentTypeMap,
    rels: Relationships,
}

impl OpcPackage<BufReader<File>> {
    /// Open the package stored in the file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> OpcPackage<R> {
    /// Open the package in `reader`.
    ///
    /// Fails when the zip is unreadable or `[Content_Types].xml` is missing.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut phys = PhysPkgReader::new(reader)?;

        let content_types_uri =
            PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        let content_types_xml = phys.blob_for(&content_types_uri)?;
        let content_types = ContentTypeMap::from_xml(&content_types_xml)?;

        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let rels = match phys.rels_xml_for(&package_uri)? {
            Some(xml) => Relationships::from_xml(&xml, package_uri.base_uri())?,
            None => Relationships::default(),
        };

        Ok(Self {
            phys,
            content_types,
            rels,
        })
    }

    /// Package-level relationships.
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    #[inline]
    pub fn content_types(&self) -> &ContentTypeMap {
        &self.content_types
    }

    /// Relationship to the main document part (transitional or strict).
    pub fn main_document_rel(&self) -> Result<&Relationship> {
        self.rels
            .first_internal(relationship_type::is_office_document)
            .ok_or_else(|| {
                OpcError::RelationshipNotFound("package has no officeDocument relationship".into())
            })
    }

    /// Content type declared for `partname`.
    pub fn content_type(&self, partname: &PackURI) -> Result<&str> {
        self.content_types.get(partname)
    }

    /// Whether the archive holds `partname`.
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.phys.contains(partname)
    }

    /// Relationships whose source is `partname`.
    pub fn part_rels(&mut self, partname: &PackURI) -> Result<Relationships> {
        match self.phys.rels_xml_for(partname)? {
            Some(xml) => Relationships::from_xml(&xml, partname.base_uri()),
            None => Ok(Relationships::default()),
        }
    }

    /// Full content of `partname`.
    pub fn blob(&mut self, partname: &PackURI) -> Result<Vec<u8>> {
        self.phys.blob_for(partname)
    }

    /// Stream the content of `partname`.
    pub fn open_part(&mut self, partname: &PackURI) -> Result<impl Read + '_> {
        self.phys.open(partname)
    }
}
