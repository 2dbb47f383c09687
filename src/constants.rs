use crate::document::SectionId;

/// Index reserved for properties that appear before any `[name]` header.
pub const GLOBAL_SECTION: SectionId = SectionId::new(0);

/// The only stored value that reads as boolean `true`.
pub const TRUE_LITERAL: &str = "true";

pub const FALSE_LITERAL: &str = "false";

pub(crate) const BOM: char = '\u{FEFF}';

#[inline]
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t')
}

#[inline]
pub fn is_comment_marker(byte: u8) -> bool {
    matches!(byte, b';' | b'#')
}

#[inline]
pub fn is_delimiter(byte: u8) -> bool {
    byte == b'='
}

#[inline]
pub fn is_newline(byte: u8) -> bool {
    byte == b'\n'
}

#[inline]
pub fn is_section_open(byte: u8) -> bool {
    byte == b'['
}

#[inline]
pub fn is_section_close(byte: u8) -> bool {
    byte == b']'
}
