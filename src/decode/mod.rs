mod scanner;

use std::io::Read;

use crate::{Document, ParseOptions, Result};

use scanner::Scanner;

pub fn parse(input: &str, options: &ParseOptions) -> Document {
    Scanner::new(input, options).run()
}

pub fn from_slice(input: &[u8], options: &ParseOptions) -> Result<Document> {
    let text = std::str::from_utf8(input)?;
    Ok(parse(text, options))
}

pub fn from_reader<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Document> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    from_slice(&buf, options)
}
