use std::fmt;

use crate::constants::GLOBAL_SECTION;
use crate::types::Value;

/// Position of a section in declaration order.
///
/// Index 0 is the global section; `[name]` headers are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(usize);

impl SectionId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }

    pub fn is_global(self) -> bool {
        self == GLOBAL_SECTION
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SectionEntry {
    name: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PropertyEntry {
    section: SectionId,
    key: Span,
    value: Span,
}

/// A parsed INI file.
///
/// Section names, keys and values are copied into one owned text buffer, so a
/// `Document` does not borrow the input it was parsed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    sections: Vec<SectionEntry>,
    properties: Vec<PropertyEntry>,
}

impl Document {
    pub fn parse(input: &str) -> Self {
        crate::parse(input)
    }

    /// Captured text never exceeds the input, so sizing the buffer from the
    /// input length means it is allocated once.
    pub(crate) fn with_text_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            sections: Vec::new(),
            properties: Vec::new(),
        }
    }

    fn store(&mut self, value: &str) -> Span {
        let start = self.text.len();
        self.text.push_str(value);
        Span::new(start, self.text.len())
    }

    fn slice(&self, span: Span) -> &str {
        &self.text[span.start..span.end]
    }

    pub(crate) fn push_section(&mut self, name: &str) -> SectionId {
        let name = self.store(name);
        self.sections.push(SectionEntry { name });
        SectionId(self.sections.len())
    }

    pub(crate) fn push_property(&mut self, section: SectionId, key: &str, value: &str) {
        let key = self.store(key);
        let value = self.store(value);
        self.properties.push(PropertyEntry {
            section,
            key,
            value,
        });
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.properties.is_empty()
    }

    /// Returns the first section declared with exactly `name`.
    pub fn find_section(&self, name: &str) -> Option<SectionId> {
        self.sections
            .iter()
            .position(|section| self.slice(section.name) == name)
            .map(|idx| SectionId(idx + 1))
    }

    pub fn section_exists(&self, name: &str) -> bool {
        self.find_section(name).is_some()
    }

    /// Name of a declared section. The global section has none.
    pub fn section_name(&self, section: SectionId) -> Option<&str> {
        if section.is_global() {
            return None;
        }
        self.sections
            .get(section.0 - 1)
            .map(|entry| self.slice(entry.name))
    }

    pub fn sections(&self) -> impl Iterator<Item = Section<'_>> + '_ {
        self.sections
            .iter()
            .enumerate()
            .map(move |(idx, entry)| Section {
                id: SectionId(idx + 1),
                name: self.slice(entry.name),
            })
    }

    pub fn properties(&self, section: SectionId) -> impl Iterator<Item = Property<'_>> + '_ {
        self.properties
            .iter()
            .filter(move |entry| entry.section == section)
            .map(move |entry| self.view(entry))
    }

    fn view<'a>(&'a self, entry: &PropertyEntry) -> Property<'a> {
        Property {
            section: entry.section,
            key: self.slice(entry.key),
            value: self.slice(entry.value),
        }
    }

    fn matching<'a>(
        &'a self,
        section: SectionId,
        key: &'a str,
    ) -> impl Iterator<Item = &'a PropertyEntry> + 'a {
        self.properties
            .iter()
            .filter(move |entry| entry.section == section && self.slice(entry.key) == key)
    }

    pub fn property_exists(&self, section: SectionId, key: &str) -> bool {
        self.matching(section, key).next().is_some()
    }

    /// Value of the first property in `section` named `key`.
    pub fn value(&self, section: SectionId, key: &str) -> Option<&str> {
        self.matching(section, key)
            .next()
            .map(|entry| self.slice(entry.value))
    }

    /// Every value stored under `key` in `section`, in file order.
    pub fn values<'a>(
        &'a self,
        section: SectionId,
        key: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.matching(section, key)
            .map(move |entry| self.slice(entry.value))
    }

    pub fn get(&self, section: SectionId, key: &str) -> Option<Value<'_>> {
        self.value(section, key).map(Value::new)
    }

    pub fn value_as_int(&self, section: SectionId, key: &str) -> Option<i64> {
        self.get(section, key).map(|value| value.as_int())
    }

    pub fn value_as_float(&self, section: SectionId, key: &str) -> Option<f64> {
        self.get(section, key).map(|value| value.as_float())
    }

    pub fn value_as_bool(&self, section: SectionId, key: &str) -> Option<bool> {
        self.get(section, key).map(|value| value.as_bool())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    id: SectionId,
    name: &'a str,
}

impl<'a> Section<'a> {
    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property<'a> {
    section: SectionId,
    key: &'a str,
    value: &'a str,
}

impl<'a> Property<'a> {
    pub fn section(&self) -> SectionId {
        self.section
    }

    pub fn key(&self) -> &'a str {
        self.key
    }

    pub fn value(&self) -> Value<'a> {
        Value::new(self.value)
    }
}
