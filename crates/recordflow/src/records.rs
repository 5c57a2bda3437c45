use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of a multi-record-link cell: a pointer to another record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLink {
    pub id: String,
}

impl RecordLink {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A single-select cell value, identified by its option name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

/// The nested lookup cell shape: links grouped by the record they were
/// looked up through.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedLookup {
    pub linked_record_ids: Vec<String>,
    pub values_by_linked_record_id: BTreeMap<String, Vec<RecordLink>>,
}

impl LinkedLookup {
    /// Links reachable through the first linked record id, the slot the
    /// host data source populates for single-source lookups.
    pub fn primary_values(&self) -> &[RecordLink] {
        self.linked_record_ids
            .first()
            .and_then(|id| self.values_by_linked_record_id.get(id))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Lookup(LinkedLookup),
    Links(Vec<RecordLink>),
    Select(SelectOption),
}

impl CellValue {
    pub fn as_links(&self) -> Option<&[RecordLink]> {
        match self {
            Self::Links(links) => Some(links),
            _ => None,
        }
    }

    pub fn as_select(&self) -> Option<&SelectOption> {
        match self {
            Self::Select(option) => Some(option),
            _ => None,
        }
    }

    pub fn as_lookup(&self) -> Option<&LinkedLookup> {
        match self {
            Self::Lookup(lookup) => Some(lookup),
            _ => None,
        }
    }
}

/// A record as exposed by the host data source. Read-only to this crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub cell_values_by_field_id: BTreeMap<String, CellValue>,
}

impl SourceRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_deleted: false,
            cell_values_by_field_id: BTreeMap::new(),
        }
    }

    pub fn cell(&self, field_id: &str) -> Option<&CellValue> {
        self.cell_values_by_field_id.get(field_id)
    }

    pub fn links(&self, field_id: &str) -> &[RecordLink] {
        self.cell(field_id)
            .and_then(CellValue::as_links)
            .unwrap_or_default()
    }

    pub fn select(&self, field_id: &str) -> Option<&SelectOption> {
        self.cell(field_id).and_then(CellValue::as_select)
    }

    pub fn lookup(&self, field_id: &str) -> Option<&LinkedLookup> {
        self.cell(field_id).and_then(CellValue::as_lookup)
    }

    /// Whether the given multi-link field contains a link to `record_id`.
    pub fn links_to(&self, field_id: &str, record_id: &str) -> bool {
        self.links(field_id).iter().any(|link| link.id == record_id)
    }
}

/// An ordered record collection with lookup by id. Lookup may legitimately
/// miss: a link can point at a record that was removed from the view.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    records: Vec<SourceRecord>,
}

impl RecordSet {
    pub fn new(records: Vec<SourceRecord>) -> Self {
        Self { records }
    }

    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<SourceRecord> = serde_json::from_str(payload)?;
        Ok(Self::new(records))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceRecord> {
        self.records.iter()
    }

    pub fn get(&self, record_id: &str) -> Option<&SourceRecord> {
        self.records.iter().find(|record| record.id == record_id)
    }

    /// Zero-based position of a record among the non-deleted records, the
    /// visitation index the builder colors self-links by.
    pub fn visitation_index(&self, record_id: &str) -> Option<usize> {
        self.records
            .iter()
            .filter(|record| !record.is_deleted)
            .position(|record| record.id == record_id)
    }
}

impl FromIterator<SourceRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = SourceRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
