//! Magic number signatures of the containers the sniffer recognizes.

use memchr::memchr;

pub const OLE2_SIGNATURE: &[u8] = crate::ole::consts::MAGIC;
pub const ZIP_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x03, 0x04];
/// Signature of an empty zip archive (end of central directory only)
pub const ZIP_EMPTY_SIGNATURE: &[u8] = &[0x50, 0x4B, 0x05, 0x06];

#[inline]
pub fn is_ole2(head: &[u8]) -> bool {
    head.starts_with(OLE2_SIGNATURE)
}

#[inline]
pub fn is_zip(head: &[u8]) -> bool {
    head.starts_with(ZIP_SIGNATURE) || head.starts_with(ZIP_EMPTY_SIGNATURE)
}

/// Whether `head` reads as text: no NUL byte and at most one control byte
/// in 32 (TAB, LF, FF and CR do not count).
pub fn looks_textual(head: &[u8]) -> bool {
    if head.is_empty() || memchr(0, head).is_some() {
        return false;
    }
    let controls = head
        .iter()
        .filter(|&&b| (b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r')) || b == 0x7F)
        .count();
    controls * 32 <= head.len()
}
