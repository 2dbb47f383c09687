//! Single-pass, lenient INI parser.
//!
//! ```
//! use ini_lite::GLOBAL_SECTION;
//!
//! let doc = ini_lite::parse("network=wireless\n[database]\nport=143\n");
//! let database = doc.find_section("database").unwrap();
//! assert_eq!(doc.value(GLOBAL_SECTION, "network"), Some("wireless"));
//! assert_eq!(doc.value_as_int(database, "port"), Some(143));
//! ```

pub mod constants;
pub mod decode;
pub mod document;
pub mod error;
pub mod num;
pub mod options;
mod serde;
pub mod types;

use std::io::Read;

pub use crate::constants::GLOBAL_SECTION;
pub use crate::document::{Document, Property, Section, SectionId};
pub use crate::error::{Error, ValueKind};
pub use crate::options::ParseOptions;
pub use crate::types::Value;

pub type Result<T> = std::result::Result<T, Error>;

pub fn parse(input: &str) -> Document {
    parse_with_options(input, &ParseOptions::default())
}

pub fn parse_with_options(input: &str, options: &ParseOptions) -> Document {
    decode::parse(input, options)
}

pub fn from_slice(input: &[u8]) -> Result<Document> {
    from_slice_with_options(input, &ParseOptions::default())
}

pub fn from_slice_with_options(input: &[u8], options: &ParseOptions) -> Result<Document> {
    decode::from_slice(input, options)
}

pub fn from_reader<R: Read>(reader: R) -> Result<Document> {
    from_reader_with_options(reader, &ParseOptions::default())
}

pub fn from_reader_with_options<R: Read>(reader: R, options: &ParseOptions) -> Result<Document> {
    decode::from_reader(reader, options)
}
