/// Magic bytes that should be at the beginning of every OLE file
pub const MAGIC: &[u8; 8] = b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1";

/// Minimal size of an empty OLE file with 512-byte sectors (1536 bytes)
pub const MINIMAL_OLEFILE_SIZE: usize = 1536;

/// Size of the compound file header in bytes
pub const HEADER_SIZE: usize = 512;

/// Size of a directory entry in bytes
pub const DIRENTRY_SIZE: usize = 128;

/// Sector shift for version 3 files (512-byte sectors)
pub const SECTOR_SHIFT_V3: u16 = 9;

/// Sector shift for version 4 files (4096-byte sectors)
pub const SECTOR_SHIFT_V4: u16 = 12;

/// Mini sector shift mandated by the format (64-byte mini sectors)
pub const MINI_SECTOR_SHIFT: u16 = 6;

/// Number of FAT sector indexes stored directly in the header
pub const HEADER_DIFAT_ENTRIES: usize = 109;

// Header field offsets
pub const OFFSET_DLL_VERSION: usize = 0x1A;
pub const OFFSET_BYTE_ORDER: usize = 0x1C;
pub const OFFSET_SECTOR_SHIFT: usize = 0x1E;
pub const OFFSET_MINI_SECTOR_SHIFT: usize = 0x20;
pub const OFFSET_FIRST_DIR_SECTOR: usize = 0x30;
pub const OFFSET_MINI_STREAM_CUTOFF: usize = 0x38;
pub const OFFSET_FIRST_MINIFAT_SECTOR: usize = 0x3C;
pub const OFFSET_NUM_MINIFAT_SECTORS: usize = 0x40;
pub const OFFSET_FIRST_DIFAT_SECTOR: usize = 0x44;
pub const OFFSET_NUM_DIFAT_SECTORS: usize = 0x48;
pub const OFFSET_HEADER_DIFAT: usize = 0x4C;

/// Little-endian byte order mark stored in the header
pub const BYTE_ORDER_LE: u16 = 0xFFFE;

// Sector IDs (from AAF specifications)
/// Denotes a FAT sector in a FAT
pub const FATSECT: u32 = 0xFFFFFFFD; // -3
/// End of a virtual stream chain
pub const ENDOFCHAIN: u32 = 0xFFFFFFFE; // -2
/// Unallocated sector
pub const FREESECT: u32 = 0xFFFFFFFF; // -1

/// Unallocated directory entry
pub const NOSTREAM: u32 = 0xFFFFFFFF; // -1

// Object types in storage (from AAF specifications)
/// Element is a stream object
pub const STGTY_STREAM: u8 = 2;
/// Element is a root storage
pub const STGTY_ROOT: u8 = 5;
