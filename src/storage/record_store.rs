use crate::document::Record;
use crate::storage::codec;
use crate::Result;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Deduplicating `id → name` mapping
///
/// Inserting an id that is already present replaces its name. The same item
/// showing up on two pages is normal when the listing shifts during a
/// harvest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: HashMap<String, String>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a single record
    pub fn insert(&mut self, record: Record) {
        self.records.insert(record.id, record.name);
    }

    /// Inserts or overwrites every record, later ones winning
    pub fn merge<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = Record>,
    {
        for record in records {
            self.insert(record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up the name stored for `id`
    pub fn get(&self, id: &str) -> Option<&str> {
        self.records.get(id).map(String::as_str)
    }

    /// All records, ordered by id
    ///
    /// Numeric ids compare by value; the ordering only exists to keep
    /// written files stable between runs.
    pub fn records(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self
            .records
            .iter()
            .map(|(id, name)| Record::new(id.clone(), name.clone()))
            .collect();
        records.sort_by(|a, b| compare_ids(&a.id, &b.id));
        records
    }

    /// Encodes the store as `id;name` rows
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        codec::write_records(&mut buffer, &self.records())?;
        Ok(buffer)
    }
}

impl FromIterator<Record> for RecordStore {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut store = Self::new();
        store.merge(iter);
        store
    }
}

/// Shorter digit strings first, so "9" sorts before "10"
fn compare_ids(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
