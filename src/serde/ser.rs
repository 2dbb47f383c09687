use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::constants::GLOBAL_SECTION;
use crate::document::{Document, SectionId};

#[derive(serde::Serialize)]
struct SectionView<'a> {
    index: usize,
    name: Option<&'a str>,
    properties: Vec<PropertyView<'a>>,
}

#[derive(serde::Serialize)]
struct PropertyView<'a> {
    key: &'a str,
    value: &'a str,
}

fn section_view(doc: &Document, id: SectionId) -> SectionView<'_> {
    SectionView {
        index: id.index(),
        name: doc.section_name(id),
        properties: doc
            .properties(id)
            .map(|property| PropertyView {
                key: property.key(),
                value: property.value().as_str(),
            })
            .collect(),
    }
}

/// Serializes as `{"sections": [...]}` with the global section first, so
/// duplicate sections and keys survive the trip into map-based formats.
impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sections: Vec<SectionView<'_>> = std::iter::once(GLOBAL_SECTION)
            .chain(self.sections().map(|section| section.id()))
            .map(|id| section_view(self, id))
            .collect();
        let mut state = serializer.serialize_struct("Document", 1)?;
        state.serialize_field("sections", &sections)?;
        state.end()
    }
}

impl Serialize for crate::types::Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::parse;

    #[rstest::rstest]
    fn test_document_serializes_global_section_first() {
        let doc = parse("network=wireless\n[owner]\nname = John Doe\nname = Jane\n");
        let value = serde_json::to_value(&doc).expect("serialize document");
        assert_eq!(
            value,
            json!({
                "sections": [
                    {"index": 0, "name": null, "properties": [
                        {"key": "network", "value": "wireless"}
                    ]},
                    {"index": 1, "name": "owner", "properties": [
                        {"key": "name", "value": "John Doe"},
                        {"key": "name", "value": "Jane"}
                    ]}
                ]
            })
        );
    }

    #[rstest::rstest]
    fn test_empty_document_keeps_global_section() {
        let value = serde_json::to_value(parse("")).expect("serialize document");
        assert_eq!(
            value,
            json!({"sections": [{"index": 0, "name": null, "properties": []}]})
        );
    }
}
