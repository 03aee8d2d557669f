//! Nested JSON encoding of a document.

use std::io::Write;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::app::models::{Document, Record};
use crate::error::Result;

/// Write the document as `{"metadata": {...}, "data": [...]}`.
///
/// Pretty-printed with four-space indentation; each data object carries
/// its fields in the document type's fixed order.
pub fn write_json(document: &Document, target: &Path) -> Result<()> {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(temp.as_file_mut(), formatter);
    JsonDocument(document).serialize(&mut serializer)?;
    temp.as_file_mut().write_all(b"\n")?;

    super::persist_temp(temp, target)?;
    debug!(path = %target.display(), rows = document.records.len(), "wrote json output");
    Ok(())
}

struct JsonDocument<'a>(&'a Document);

impl Serialize for JsonDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Document", 2)?;
        state.serialize_field("metadata", &self.0.metadata)?;
        let data: Vec<OrderedRecord> = self.0.records.iter().map(OrderedRecord).collect();
        state.serialize_field("data", &data)?;
        state.end()
    }
}

/// Serializes a record as a JSON object with fields in the document
/// type's declared order, independent of the underlying map ordering
struct OrderedRecord<'a>(&'a Record);

impl Serialize for OrderedRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let order = self.0.doc_type.field_order();
        let mut map = serializer.serialize_map(Some(order.len()))?;
        for field in order {
            map.serialize_entry(field, self.0.get(field))?;
        }
        map.end()
    }
}
