//! Byte Order Mark (BOM) utilities shared across modules.
//!
//! Only the UTF-8 mark matters for template validation: it is authoritative
//! for the CSV encoding decision and is skipped before content sniffing.

/// UTF-8 BOM bytes.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Returns `true` when `bytes` begins with the UTF-8 BOM.
#[inline]
pub fn has_utf8_bom(bytes: &[u8]) -> bool {
    bytes.starts_with(&UTF8_BOM)
}

/// Returns `bytes` without a leading UTF-8 BOM.
#[inline]
pub fn strip_utf8_bom(bytes: &[u8]) -> &[u8] {
    if has_utf8_bom(bytes) {
        &bytes[UTF8_BOM.len()..]
    } else {
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_utf8_bom() {
        assert_eq!(strip_utf8_bom(b"\xEF\xBB\xBFa,b"), b"a,b");
        assert_eq!(strip_utf8_bom(b"a,b"), b"a,b");
        assert_eq!(strip_utf8_bom(b"\xEF\xBB"), b"\xEF\xBB");
    }
}
