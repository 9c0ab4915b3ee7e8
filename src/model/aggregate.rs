//! Combined, page-ordered output of a run

use crate::model::record::Record;

/// All records of a run in page order, with per-page counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    /// Records of page 1, then page 2, and so on, each in document order
    pub records: Vec<Record>,

    /// Number of page slots that were combined
    pub pages_total: u32,

    /// Pages whose table was extracted (including pages with zero rows)
    pub pages_extracted: u32,

    /// Pages that failed every attempt and contributed nothing
    pub pages_degraded: u32,
}

impl Aggregate {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Aggregate {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
