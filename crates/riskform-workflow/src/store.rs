//! # Entry Store
//!
//! Ordered, append-only list of committed records. Insertion order is the
//! display and export order. Records are never removed or edited.

use riskform_core::AssessmentRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryStore {
    records: Vec<AssessmentRecord>,
}

impl EntryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed record at the end.
    pub fn append(&mut self, record: AssessmentRecord) {
        self.records.push(record);
    }

    /// The most recently appended record.
    pub fn last(&self) -> Option<&AssessmentRecord> {
        self.records.last()
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[AssessmentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssessmentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a EntryStore {
    type Item = &'a AssessmentRecord;
    type IntoIter = std::slice::Iter<'a, AssessmentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
