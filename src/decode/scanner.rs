use memchr::memchr;
use tracing::{debug, trace};

use crate::constants::{
    is_comment_marker, is_delimiter, is_newline, is_section_close, is_section_open,
    is_whitespace, BOM, GLOBAL_SECTION,
};
use crate::document::{Document, SectionId, Span};
use crate::ParseOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectKey,
    /// Inside `[...]`; `start` is set at the first non-blank name byte.
    SectionName { start: Option<usize> },
    Key { start: usize },
    ExpectSeparator { key: Span },
    ExpectValue { key: Span },
    Value { key: Span, start: usize },
}

/// Single forward pass over the input.
///
/// Every structural byte is ASCII, so spans always fall on UTF-8 boundaries
/// and captured slices can be copied into the document as `&str`.
pub(crate) struct Scanner<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    state: State,
    section: SectionId,
    trim_carriage_return: bool,
    document: Document,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(input: &'a str, options: &ParseOptions) -> Self {
        let input = if options.strip_bom {
            input.strip_prefix(BOM).unwrap_or(input)
        } else {
            input
        };
        Self {
            input,
            position: 0,
            line: 1,
            state: State::ExpectKey,
            section: GLOBAL_SECTION,
            trim_carriage_return: options.trim_carriage_return,
            document: Document::with_text_capacity(input.len()),
        }
    }

    pub(crate) fn run(mut self) -> Document {
        let input = self.input;
        let bytes = input.as_bytes();
        while let Some(&byte) = bytes.get(self.position) {
            let at = self.position;
            self.position += 1;
            self.step(byte, at);
            if is_newline(byte) {
                self.line += 1;
            }
        }
        self.finish()
    }

    fn step(&mut self, byte: u8, at: usize) {
        match self.state {
            State::ExpectKey => {
                if is_comment_marker(byte) {
                    self.skip_to_line_end();
                } else if is_section_open(byte) {
                    self.state = State::SectionName { start: None };
                } else if is_delimiter(byte) {
                    self.state = State::ExpectValue {
                        key: Span::new(at, at),
                    };
                } else if !is_whitespace(byte) && !is_newline(byte) {
                    self.state = State::Key { start: at };
                }
            }
            State::SectionName { start } => {
                if is_section_close(byte) {
                    let input = self.input;
                    let name = start.map_or("", |start| {
                        input[start..at].trim_end_matches(|ch: char| ch == ' ' || ch == '\t')
                    });
                    self.open_section(name);
                } else if is_newline(byte) {
                    trace!(line = self.line, "discarding unterminated section header");
                    self.state = State::ExpectKey;
                } else if start.is_none() && !is_whitespace(byte) {
                    self.state = State::SectionName { start: Some(at) };
                }
            }
            State::Key { start } => {
                let key = Span::new(start, at);
                if is_delimiter(byte) {
                    self.state = State::ExpectValue { key };
                } else if is_whitespace(byte) {
                    self.state = State::ExpectSeparator { key };
                } else if is_newline(byte) {
                    self.discard_key(key);
                }
            }
            State::ExpectSeparator { key } => {
                if is_delimiter(byte) {
                    self.state = State::ExpectValue { key };
                } else if is_comment_marker(byte) {
                    self.skip_to_line_end();
                } else if is_newline(byte) {
                    self.discard_key(key);
                }
            }
            State::ExpectValue { key } => {
                if is_comment_marker(byte) {
                    self.skip_to_line_end();
                } else if is_newline(byte) {
                    self.commit_property(key, Span::new(at, at));
                } else if !is_whitespace(byte) {
                    self.state = State::Value { key, start: at };
                    self.skip_to_line_end();
                }
            }
            State::Value { key, start } => {
                if is_newline(byte) {
                    self.commit_property(key, Span::new(start, at));
                }
            }
        }
    }

    /// Moves to the next newline without consuming it.
    fn skip_to_line_end(&mut self) {
        let rest = &self.input.as_bytes()[self.position..];
        self.position = match memchr(b'\n', rest) {
            Some(offset) => self.position + offset,
            None => self.input.len(),
        };
    }

    fn open_section(&mut self, name: &str) {
        self.section = self.document.push_section(name);
        trace!(
            line = self.line,
            section = self.section.index(),
            name,
            "opened section"
        );
        self.state = State::ExpectKey;
    }

    fn discard_key(&mut self, key: Span) {
        trace!(
            line = self.line,
            key = &self.input[key.start..key.end],
            "discarding key without separator"
        );
        self.state = State::ExpectKey;
    }

    fn commit_property(&mut self, key: Span, value: Span) {
        let input = self.input;
        let key = &input[key.start..key.end];
        let mut value = &input[value.start..value.end];
        if self.trim_carriage_return {
            value = value.strip_suffix('\r').unwrap_or(value);
        }
        self.document.push_property(self.section, key, value);
        self.state = State::ExpectKey;
    }

    fn finish(mut self) -> Document {
        match self.state {
            State::Value { key, start } => {
                let end = self.input.len();
                self.commit_property(key, Span::new(start, end));
            }
            State::ExpectKey => {}
            pending => {
                trace!(line = self.line, state = ?pending, "discarding incomplete entry at end of input");
            }
        }
        debug!(
            bytes = self.input.len(),
            sections = self.document.section_count(),
            properties = self.document.property_count(),
            "parsed ini document"
        );
        self.document
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn scan(input: &str) -> Document {
        Scanner::new(input, &ParseOptions::default()).run()
    }

    #[rstest]
    #[case("color = red #ff0000 ; note\n", "red #ff0000 ; note")]
    #[case("color = #ff0000 ; red\n", "")]
    #[case("color =\t;red\n", "")]
    fn test_comment_markers_in_values(#[case] input: &str, #[case] expected: &str) {
        let doc = scan(input);
        assert_eq!(doc.value(GLOBAL_SECTION, "color"), Some(expected));
    }

    #[rstest]
    fn test_carriage_return_trimming_is_configurable() {
        assert_eq!(scan("k = v\r\n").value(GLOBAL_SECTION, "k"), Some("v"));
        assert_eq!(scan("k = v\r").value(GLOBAL_SECTION, "k"), Some("v"));

        let verbatim = Scanner::new(
            "k = v\r\n",
            &ParseOptions::default().with_trim_carriage_return(false),
        )
        .run();
        assert_eq!(verbatim.value(GLOBAL_SECTION, "k"), Some("v\r"));
    }

    #[rstest]
    fn test_comment_after_separator_leaves_empty_value() {
        let doc = scan("key = ; nothing here\nnext=1\n");
        assert_eq!(doc.value(GLOBAL_SECTION, "key"), Some(""));
        assert_eq!(doc.value(GLOBAL_SECTION, "next"), Some("1"));
    }

    #[rstest]
    fn test_junk_before_separator_is_ignored() {
        let doc = scan("key junk = value\n");
        assert_eq!(doc.value(GLOBAL_SECTION, "key"), Some("value"));
        assert_eq!(doc.property_count(), 1);
    }

    #[rstest]
    fn test_key_keeps_brackets_and_markers() {
        let doc = scan("a;b[c]=1\n");
        assert_eq!(doc.value(GLOBAL_SECTION, "a;b[c]"), Some("1"));
    }

    #[rstest]
    fn test_empty_key() {
        let doc = scan("= orphan\n");
        assert_eq!(doc.value(GLOBAL_SECTION, ""), Some("orphan"));
    }

    #[rstest]
    fn test_section_name_trims_blanks() {
        let doc = scan("[  spaced name \t]\n[]\n");
        assert_eq!(doc.find_section("spaced name"), Some(SectionId::new(1)));
        assert_eq!(doc.find_section(""), Some(SectionId::new(2)));
    }

    #[rstest]
    fn test_section_name_keeps_inner_markers() {
        let doc = scan("[a=b;c]\nk=v\n");
        let section = doc.find_section("a=b;c").expect("section registered");
        assert_eq!(doc.value(section, "k"), Some("v"));
    }

    #[rstest]
    fn test_pending_states_at_end_of_input() {
        assert_eq!(scan("key").property_count(), 0);
        assert_eq!(scan("key =").property_count(), 0);
        assert_eq!(scan("key = ").property_count(), 0);
        assert_eq!(scan("[open").section_count(), 0);
        assert_eq!(scan("key = v").value(GLOBAL_SECTION, "key"), Some("v"));
    }

    #[rstest]
    fn test_comment_at_end_of_input_without_newline() {
        let doc = scan("a=1\n; trailing");
        assert_eq!(doc.property_count(), 1);
    }

    #[rstest]
    fn test_multibyte_text_is_preserved() {
        let doc = scan("[größe]\nname = Zoë ☃\n");
        let section = doc.find_section("größe").expect("section registered");
        assert_eq!(doc.value(section, "name"), Some("Zoë ☃"));
    }

    #[rstest]
    fn test_bom_is_skipped_by_default() {
        let doc = scan("\u{FEFF}[owner]\nname=x\n");
        assert!(doc.section_exists("owner"));

        let kept = Scanner::new(
            "\u{FEFF}a=1\n",
            &ParseOptions::default().with_strip_bom(false),
        )
        .run();
        assert_eq!(kept.value(GLOBAL_SECTION, "\u{FEFF}a"), Some("1"));
    }
}
