use super::consts::*;
use std::io::{self, Read, Seek, SeekFrom};
use thiserror::Error;
use zerocopy::{FromBytes, LE, U16, U32, U64};
use zerocopy_derive::FromBytes as DeriveFromBytes;

/// Raw OLE directory entry structure (128 bytes)
///
/// This represents the on-disk format of a directory entry.
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawDirectoryEntry {
    /// Entry name in UTF-16LE (64 bytes, null-padded)
    name: [u8; 64],
    /// Length of name in bytes (including null terminator)
    name_len: U16<LE>,
    /// Entry type (1 = storage, 2 = stream, 5 = root)
    entry_type: u8,
    node_color: u8,
    sid_left: U32<LE>,
    sid_right: U32<LE>,
    sid_child: U32<LE>,
    clsid: [u8; 16],
    state_bits: U32<LE>,
    creation_time: U64<LE>,
    modified_time: U64<LE>,
    /// Starting sector
    start_sector: U32<LE>,
    /// Stream size
    stream_size: U64<LE>,
}

/// Read-only view of an OLE2 structured storage file.
///
/// Only what a structural check needs is loaded up front: the FAT, the
/// MiniFAT and the directory tree. Stream contents are read on demand.
#[derive(Debug)]
pub struct OleFile<R: Read + Seek> {
    reader: R,
    file_size: u64,
    /// Sector size (512 or 4096 bytes)
    sector_size: usize,
    /// Mini sector size (always 64 bytes)
    mini_sector_size: usize,
    /// Streams smaller than this live in the mini stream
    mini_stream_cutoff: u32,
    /// File Allocation Table - maps sector to next sector in chain
    fat: Vec<u32>,
    /// Mini FAT - for streams smaller than cutoff size
    minifat: Vec<u32>,
    first_dir_sector: u32,
    root: Option<DirectoryEntry>,
    /// All directory entries indexed by SID
    dir_entries: Vec<Option<DirectoryEntry>>,
    /// Mini stream data (loaded on demand)
    ministream: Option<Vec<u8>>,
}

/// Represents an OLE directory entry (stream or storage)
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Storage ID (index in directory)
    pub sid: u32,
    /// Entry name (UTF-16 decoded to UTF-8)
    pub name: String,
    /// Entry type (stream, storage, root, etc.)
    pub entry_type: u8,
    pub sid_left: u32,
    pub sid_right: u32,
    pub sid_child: u32,
    /// First sector of the stream
    pub start_sector: u32,
    /// Size of the stream in bytes
    pub size: u64,
    /// Whether this stream is in MiniFAT
    pub is_minifat: bool,
}

/// Error types for OLE file parsing
#[derive(Error, Debug)]
pub enum OleError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Not an OLE file")]
    NotOleFile,

    #[error("Corrupted file: {0}")]
    CorruptedFile(String),

    #[error("Stream not found: {0}")]
    StreamNotFound(String),
}

/// Read a little-endian u16 at `offset`, 0 when out of range.
#[inline]
fn le_u16(bytes: &[u8], offset: usize) -> u16 {
    bytes
        .get(offset..offset + 2)
        .and_then(|b| U16::<LE>::read_from_bytes(b).ok())
        .map(|v| v.get())
        .unwrap_or(0)
}

/// Read a little-endian u32 at `offset`, 0 when out of range.
#[inline]
fn le_u32(bytes: &[u8], offset: usize) -> u32 {
    bytes
        .get(offset..offset + 4)
        .and_then(|b| U32::<LE>::read_from_bytes(b).ok())
        .map(|v| v.get())
        .unwrap_or(0)
}

impl<R: Read + Seek> OleFile<R> {
    /// Open and parse an OLE file from a reader
    pub fn open(mut reader: R) -> Result<Self, OleError> {
        let file_size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        if file_size < MINIMAL_OLEFILE_SIZE as u64 {
            return Err(OleError::NotOleFile);
        }

        let mut header = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header)?;

        if &header[0..8] != MAGIC {
            return Err(OleError::NotOleFile);
        }

        let dll_version = le_u16(&header, OFFSET_DLL_VERSION);
        let byte_order = le_u16(&header, OFFSET_BYTE_ORDER);
        let sector_shift = le_u16(&header, OFFSET_SECTOR_SHIFT);
        let mini_sector_shift = le_u16(&header, OFFSET_MINI_SECTOR_SHIFT);
        let first_dir_sector = le_u32(&header, OFFSET_FIRST_DIR_SECTOR);
        let mini_stream_cutoff = le_u32(&header, OFFSET_MINI_STREAM_CUTOFF);
        let first_minifat_sector = le_u32(&header, OFFSET_FIRST_MINIFAT_SECTOR);
        let num_minifat_sectors = le_u32(&header, OFFSET_NUM_MINIFAT_SECTORS);
        let first_difat_sector = le_u32(&header, OFFSET_FIRST_DIFAT_SECTOR);
        let num_difat_sectors = le_u32(&header, OFFSET_NUM_DIFAT_SECTORS);

        if byte_order != BYTE_ORDER_LE {
            return Err(OleError::InvalidFormat("Invalid byte order".to_string()));
        }

        // Only the two shifts defined by the format are accepted; anything else
        // would make the shift below overflow.
        let expected_shift = match dll_version {
            3 => SECTOR_SHIFT_V3,
            4 => SECTOR_SHIFT_V4,
            other => {
                return Err(OleError::InvalidFormat(format!(
                    "Unsupported major version {}",
                    other
                )));
            },
        };
        if sector_shift != expected_shift {
            return Err(OleError::InvalidFormat("Sector size mismatch".to_string()));
        }
        if mini_sector_shift != MINI_SECTOR_SHIFT {
            return Err(OleError::InvalidFormat(
                "Invalid mini sector size".to_string(),
            ));
        }

        let mut ole = OleFile {
            reader,
            file_size,
            sector_size: 1usize << sector_shift,
            mini_sector_size: 1usize << mini_sector_shift,
            mini_stream_cutoff,
            fat: Vec::new(),
            minifat: Vec::new(),
            first_dir_sector,
            root: None,
            dir_entries: Vec::new(),
            ministream: None,
        };

        ole.load_fat(&header, first_difat_sector, num_difat_sectors)?;
        ole.load_directory()?;

        if num_minifat_sectors > 0 {
            ole.load_minifat(first_minifat_sector)?;
        }

        Ok(ole)
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Load the File Allocation Table (FAT)
    ///
    /// The first 109 FAT sector indexes are stored in the header, additional
    /// indexes are stored in DIFAT sectors.
    fn load_fat(
        &mut self,
        header: &[u8; HEADER_SIZE],
        first_difat_sector: u32,
        num_difat_sectors: u32,
    ) -> Result<(), OleError> {
        // Every FAT or DIFAT sector has to lie inside the file
        let sector_count = (self.file_size / self.sector_size as u64) as usize;

        let mut fat_sectors = Vec::new();
        for i in 0..HEADER_DIFAT_ENTRIES {
            let sector = le_u32(header, OFFSET_HEADER_DIFAT + i * 4);
            if sector == FREESECT || sector == ENDOFCHAIN {
                break;
            }
            fat_sectors.push(sector);
        }

        if num_difat_sectors > 0 {
            if num_difat_sectors as usize > sector_count {
                return Err(OleError::CorruptedFile(format!(
                    "{} DIFAT sectors declared in a file of {} sectors",
                    num_difat_sectors, sector_count
                )));
            }

            let mut seen = vec![false; sector_count];
            let mut difat_sector = first_difat_sector;
            let entries_per_sector = (self.sector_size / 4) - 1; // -1 for next DIFAT pointer

            for _ in 0..num_difat_sectors {
                match seen.get(difat_sector as usize) {
                    Some(false) => seen[difat_sector as usize] = true,
                    Some(true) => {
                        return Err(OleError::CorruptedFile("Cyclic DIFAT chain".to_string()));
                    },
                    None => {
                        return Err(OleError::CorruptedFile(
                            "Invalid sector index in DIFAT".to_string(),
                        ));
                    },
                }
                let sector_data = self.read_sector(difat_sector)?;

                for i in 0..entries_per_sector {
                    let sector = le_u32(&sector_data, i * 4);
                    if sector == FREESECT || sector == ENDOFCHAIN {
                        break;
                    }
                    fat_sectors.push(sector);
                }

                difat_sector = le_u32(&sector_data, entries_per_sector * 4);
                if difat_sector == ENDOFCHAIN || difat_sector == FREESECT {
                    break;
                }
            }
        }

        if fat_sectors.len() > sector_count {
            return Err(OleError::CorruptedFile(
                "More FAT sectors than the file holds".to_string(),
            ));
        }
        if fat_sectors.is_empty() {
            return Err(OleError::CorruptedFile("No FAT sectors".to_string()));
        }

        let entries_per_sector = self.sector_size / 4;
        self.fat.reserve(fat_sectors.len() * entries_per_sector);

        for &sector_id in &fat_sectors {
            let sector_data = self.read_sector(sector_id)?;
            for i in 0..entries_per_sector {
                self.fat.push(le_u32(&sector_data, i * 4));
            }
        }

        Ok(())
    }

    /// Load the Mini FAT (for small streams)
    fn load_minifat(&mut self, first_minifat_sector: u32) -> Result<(), OleError> {
        let minifat_data = self.read_stream_from_fat(first_minifat_sector)?;
        self.minifat = minifat_data
            .chunks_exact(4)
            .map(|chunk| le_u32(chunk, 0))
            .collect();
        Ok(())
    }

    /// Load directory entries
    fn load_directory(&mut self) -> Result<(), OleError> {
        let dir_data = self.read_stream_from_fat(self.first_dir_sector)?;

        let num_entries = dir_data.len() / DIRENTRY_SIZE;
        if num_entries == 0 {
            return Err(OleError::CorruptedFile("Empty directory".to_string()));
        }
        self.dir_entries = vec![None; num_entries];

        // Root entry is always at index 0
        let root = self.parse_directory_entry(&dir_data[0..DIRENTRY_SIZE], 0)?;
        if root.entry_type != STGTY_ROOT {
            return Err(OleError::CorruptedFile(
                "First directory entry is not the root".to_string(),
            ));
        }
        let root_child_sid = root.sid_child;
        self.dir_entries[0] = Some(root.clone());
        self.root = Some(root);

        self.build_storage_tree(root_child_sid, &dir_data)?;

        Ok(())
    }

    /// Parse a single directory entry from 128 bytes
    fn parse_directory_entry(&self, data: &[u8], sid: u32) -> Result<DirectoryEntry, OleError> {
        let raw = RawDirectoryEntry::read_from_bytes(data)
            .map_err(|_| OleError::InvalidFormat("Failed to parse directory entry".to_string()))?;

        let name_len = raw.name_len.get() as usize;
        let name_bytes = &raw.name[0..name_len.saturating_sub(2).min(64)];
        let name = decode_utf16le(name_bytes);

        // 512-byte sectors only use the low 32 bits of the size
        let size = if self.sector_size == 512 {
            raw.stream_size.get() & 0xFFFFFFFF
        } else {
            raw.stream_size.get()
        };

        let is_minifat = size < self.mini_stream_cutoff as u64 && raw.entry_type == STGTY_STREAM;

        Ok(DirectoryEntry {
            sid,
            name,
            entry_type: raw.entry_type,
            sid_left: raw.sid_left.get(),
            sid_right: raw.sid_right.get(),
            sid_child: raw.sid_child.get(),
            start_sector: raw.start_sector.get(),
            size,
            is_minifat,
        })
    }

    /// Walk the red-black tree below `child_sid`, parsing each entry once.
    ///
    /// The walk keeps its own worklist, so the depth of a sibling chain never
    /// reaches the call stack. Entries that were already parsed are skipped,
    /// which also breaks cyclic links.
    fn build_storage_tree(&mut self, child_sid: u32, dir_data: &[u8]) -> Result<(), OleError> {
        let mut pending = vec![child_sid];

        while let Some(sid) = pending.pop() {
            if sid == NOSTREAM {
                continue;
            }
            let index = sid as usize;
            if index >= self.dir_entries.len() {
                return Err(OleError::CorruptedFile(
                    "Invalid directory entry index".to_string(),
                ));
            }
            if self.dir_entries[index].is_some() {
                continue;
            }

            let offset = index * DIRENTRY_SIZE;
            let entry = self.parse_directory_entry(&dir_data[offset..offset + DIRENTRY_SIZE], sid)?;
            pending.extend([entry.sid_child, entry.sid_right, entry.sid_left]);
            self.dir_entries[index] = Some(entry);
        }

        Ok(())
    }

    /// Read a single sector from the file
    fn read_sector(&mut self, sector_id: u32) -> Result<Vec<u8>, OleError> {
        // Sector position in file: (sector_id + 1) * sector_size
        let position = ((sector_id as u64) + 1) * (self.sector_size as u64);
        if position + self.sector_size as u64 > self.file_size {
            return Err(OleError::CorruptedFile(format!(
                "Sector {} lies beyond the end of the file",
                sector_id
            )));
        }
        self.reader.seek(SeekFrom::Start(position))?;

        let mut buffer = vec![0u8; self.sector_size];
        self.reader.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Read a stream by following the FAT chain
    fn read_stream_from_fat(&mut self, start_sector: u32) -> Result<Vec<u8>, OleError> {
        let mut data = Vec::new();
        let mut sector = start_sector;
        // A chain can never be longer than the FAT itself
        let mut remaining = self.fat.len();

        while sector != ENDOFCHAIN {
            if sector as usize >= self.fat.len() {
                return Err(OleError::CorruptedFile(
                    "Invalid sector index in FAT".to_string(),
                ));
            }
            if remaining == 0 {
                return Err(OleError::CorruptedFile("Cyclic FAT chain".to_string()));
            }
            remaining -= 1;

            let sector_data = self.read_sector(sector)?;
            data.extend_from_slice(&sector_data);

            sector = self.fat[sector as usize];
        }

        Ok(data)
    }

    /// Read a stream by following the MiniFAT chain
    fn read_stream_from_minifat(
        &mut self,
        start_sector: u32,
        size: u64,
    ) -> Result<Vec<u8>, OleError> {
        if self.ministream.is_none() {
            let root_start = self
                .root
                .as_ref()
                .map(|root| root.start_sector)
                .ok_or_else(|| OleError::CorruptedFile("No root entry".to_string()))?;
            let ministream_data = self.read_stream_from_fat(root_start)?;
            self.ministream = Some(ministream_data);
        }

        let ministream = match self.ministream.as_ref() {
            Some(data) => data,
            None => return Err(OleError::CorruptedFile("No mini stream".to_string())),
        };
        let mut data = Vec::new();
        let mut sector = start_sector;
        let mut remaining = self.minifat.len();

        while sector != ENDOFCHAIN {
            if sector as usize >= self.minifat.len() {
                return Err(OleError::CorruptedFile(
                    "Invalid sector index in MiniFAT".to_string(),
                ));
            }
            if remaining == 0 {
                return Err(OleError::CorruptedFile("Cyclic MiniFAT chain".to_string()));
            }
            remaining -= 1;

            let position = (sector as usize) * self.mini_sector_size;
            if position + self.mini_sector_size > ministream.len() {
                return Err(OleError::CorruptedFile(
                    "Mini sector out of bounds".to_string(),
                ));
            }

            data.extend_from_slice(&ministream[position..position + self.mini_sector_size]);
            sector = self.minifat[sector as usize];
        }

        if (data.len() as u64) < size {
            return Err(OleError::CorruptedFile(
                "Mini stream chain shorter than declared size".to_string(),
            ));
        }
        data.truncate(size as usize);
        Ok(data)
    }

    /// Open a stream by path and return its contents
    ///
    /// # Arguments
    /// * `path` - Path to the stream as a slice of storage/stream names
    pub fn open_stream(&mut self, path: &[&str]) -> Result<Vec<u8>, OleError> {
        let entry = self.find_entry(path)?;

        if entry.entry_type != STGTY_STREAM {
            return Err(OleError::InvalidFormat("Not a stream".to_string()));
        }

        if entry.is_minifat {
            self.read_stream_from_minifat(entry.start_sector, entry.size)
        } else {
            let mut data = self.read_stream_from_fat(entry.start_sector)?;
            if (data.len() as u64) < entry.size {
                return Err(OleError::CorruptedFile(format!(
                    "Stream '{}' is shorter than its declared size",
                    entry.name
                )));
            }
            data.truncate(entry.size as usize);
            Ok(data)
        }
    }

    /// Find a directory entry by path
    fn find_entry(&self, path: &[&str]) -> Result<DirectoryEntry, OleError> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| OleError::StreamNotFound(path.join("/")))?;
        if path.is_empty() {
            return Ok(root.clone());
        }

        let mut current_sid = root.sid_child;
        let mut found = None;
        for &name in path {
            let entry = self
                .find_child_by_name(current_sid, name)
                .ok_or_else(|| OleError::StreamNotFound(path.join("/")))?;
            current_sid = entry.sid_child;
            found = Some(entry);
        }

        found.ok_or_else(|| OleError::StreamNotFound(path.join("/")))
    }

    /// Find a child entry by name in a red-black tree
    ///
    /// Sibling links are not trusted to form a tree: every entry is looked at
    /// once at most.
    fn find_child_by_name(&self, sid: u32, name: &str) -> Option<DirectoryEntry> {
        let mut visited = vec![false; self.dir_entries.len()];
        let mut pending = vec![sid];

        while let Some(sid) = pending.pop() {
            let Some(seen) = visited.get_mut(sid as usize) else {
                continue;
            };
            if *seen {
                continue;
            }
            *seen = true;

            let Some(entry) = self.dir_entries[sid as usize].as_ref() else {
                continue;
            };
            // Case-insensitive comparison
            if entry.name.eq_ignore_ascii_case(name) {
                return Some(entry.clone());
            }
            pending.push(entry.sid_right);
            pending.push(entry.sid_left);
        }

        None
    }

    /// Check if a stream exists
    pub fn exists(&self, path: &[&str]) -> bool {
        self.find_entry(path).is_ok()
    }
}

/// Decode UTF-16LE bytes to String
fn decode_utf16le(bytes: &[u8]) -> String {
    let utf16_units: Vec<u16> = bytes.chunks_exact(2).map(|chunk| le_u16(chunk, 0)).collect();

    String::from_utf16_lossy(&utf16_units)
        .trim_end_matches('\0')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use std::io::Cursor;

    #[test]
    fn test_open_stream_round_trip() {
        let payload: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        let bytes = fixtures::compound_file("Workbook", &payload);

        let mut ole = OleFile::open(Cursor::new(bytes)).unwrap();
        assert!(ole.exists(&["Workbook"]));
        assert!(ole.exists(&["workbook"]));
        assert!(!ole.exists(&["WordDocument"]));
        assert_eq!(ole.open_stream(&["Workbook"]).unwrap(), payload);
    }

    #[test]
    fn test_rejects_non_ole_data() {
        let err = OleFile::open(Cursor::new(vec![0u8; 2048])).unwrap_err();
        assert!(matches!(err, OleError::NotOleFile));

        let err = OleFile::open(Cursor::new(MAGIC.to_vec())).unwrap_err();
        assert!(matches!(err, OleError::NotOleFile));
    }

    #[test]
    fn test_truncated_stream_is_corrupted() {
        let bytes = fixtures::compound_file("Workbook", &vec![1u8; 4608]);
        let truncated = bytes[..2048].to_vec();
        let mut ole = OleFile::open(Cursor::new(truncated)).unwrap();
        let err = ole.open_stream(&["Workbook"]).unwrap_err();
        assert!(matches!(err, OleError::CorruptedFile(_)));
    }

    #[test]
    fn test_missing_stream() {
        let bytes = fixtures::compound_file("Book", &vec![0u8; 4096]);
        let mut ole = OleFile::open(Cursor::new(bytes)).unwrap();
        let err = ole.open_stream(&["Workbook"]).unwrap_err();
        assert!(matches!(err, OleError::StreamNotFound(_)));
    }

    fn patch_u32(bytes: &mut [u8], offset: usize, value: u32) {
        bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    #[test]
    fn test_shared_sibling_links_are_searched_once() {
        // Both links of every entry point at the next one
        let entries = fixtures::chained_directory(48, |next| (next, next, NOSTREAM));
        let ole = OleFile::open(Cursor::new(fixtures::compound_file_with_directory(&entries))).unwrap();

        assert!(ole.exists(&["Entry48"]));
        assert!(!ole.exists(&["Workbook"]));
        assert!(!ole.exists(&["Book"]));
    }

    #[test]
    fn test_cyclic_links_terminate() {
        let entries = fixtures::chained_directory(12, |next| (1, next, 0));
        let ole = OleFile::open(Cursor::new(fixtures::compound_file_with_directory(&entries))).unwrap();

        assert!(ole.exists(&["Entry12"]));
        assert!(!ole.exists(&["Workbook"]));
        assert!(!ole.exists(&["Entry3", "Workbook"]));
    }

    #[test]
    fn test_long_sibling_chain() {
        let entries = fixtures::chained_directory(30_000, |next| (NOSTREAM, next, NOSTREAM));
        let ole = OleFile::open(Cursor::new(fixtures::compound_file_with_directory(&entries))).unwrap();

        assert!(ole.exists(&["Entry30000"]));
        assert!(!ole.exists(&["Workbook"]));
    }

    #[test]
    fn test_sibling_link_out_of_range() {
        let entries = fixtures::chained_directory(2, |_| (NOSTREAM, 900, NOSTREAM));
        let err = OleFile::open(Cursor::new(fixtures::compound_file_with_directory(&entries))).unwrap_err();
        assert!(matches!(err, OleError::CorruptedFile(_)));
    }

    #[test]
    fn test_cyclic_fat_chain() {
        // Eight entries fill directory sectors 1 and 2; sector 2 loops back to 1
        let entries = fixtures::chained_directory(7, |next| (NOSTREAM, next, NOSTREAM));
        let mut bytes = fixtures::compound_file_with_directory(&entries);
        patch_u32(&mut bytes, HEADER_SIZE + 2 * 4, 1);

        let err = OleFile::open(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, OleError::CorruptedFile(_)), "{}", err);
    }

    #[test]
    fn test_cyclic_difat_chain() {
        let entries = fixtures::chained_directory(2, |next| (NOSTREAM, next, NOSTREAM));
        let mut bytes = fixtures::compound_file_with_directory(&entries);

        // Sector 2: no FAT sector indexes, next DIFAT sector is itself
        let mut difat = vec![0xFFu8; 512];
        patch_u32(&mut difat, 508, 2);
        bytes.extend_from_slice(&difat);
        patch_u32(&mut bytes, OFFSET_FIRST_DIFAT_SECTOR, 2);
        patch_u32(&mut bytes, OFFSET_NUM_DIFAT_SECTORS, 2);

        let err = OleFile::open(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, OleError::CorruptedFile(_)), "{}", err);
    }

    #[test]
    fn test_difat_count_beyond_file() {
        let entries = fixtures::chained_directory(2, |next| (NOSTREAM, next, NOSTREAM));
        let mut bytes = fixtures::compound_file_with_directory(&entries);
        patch_u32(&mut bytes, OFFSET_FIRST_DIFAT_SECTOR, 0);
        patch_u32(&mut bytes, OFFSET_NUM_DIFAT_SECTORS, u32::MAX);

        let err = OleFile::open(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, OleError::CorruptedFile(_)), "{}", err);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn link_strategy() -> impl Strategy<Value = u32> {
            prop_oneof![Just(NOSTREAM), 0u32..24]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_arbitrary_links_never_hang_or_panic(
                links in prop::collection::vec((link_strategy(), link_strategy(), link_strategy()), 1..20),
                root_child in link_strategy(),
            ) {
                let mut entries = vec![fixtures::directory_entry(
                    "Root Entry",
                    STGTY_ROOT,
                    (NOSTREAM, NOSTREAM, root_child),
                    ENDOFCHAIN,
                    0,
                )];
                for (i, link) in links.iter().enumerate() {
                    entries.push(fixtures::directory_entry(
                        &format!("Entry{}", i + 1),
                        STGTY_STREAM,
                        *link,
                        ENDOFCHAIN,
                        0,
                    ));
                }
                let bytes = fixtures::compound_file_with_directory(&entries);

                if let Ok(ole) = OleFile::open(Cursor::new(bytes)) {
                    let _ = ole.exists(&["Workbook"]);
                    let _ = ole.exists(&["Entry1", "Entry2"]);
                }
            }
        }
    }
}
