use std::collections::HashMap;

use serde_json::Value;

use crate::domain::{DataAccessError, Record, RecordStore};
use crate::infrastructure::validate_key;

/// メモリ上にJSON文字列としてレコードを保持するストア
#[derive(Clone, Debug, Default)]
pub struct InMemoryRecordStore {
    records: HashMap<String, String>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn write_record(&mut self, key: &str, record: &Record) -> Result<(), DataAccessError> {
        validate_key(key)?;
        self.records
            .insert(key.to_owned(), serde_json::to_string(record)?);
        Ok(())
    }

    fn read_record(&self, key: &str) -> Result<Record, DataAccessError> {
        validate_key(key)?;
        let text = self
            .records
            .get(key)
            .ok_or_else(|| DataAccessError::NotFound(key.to_owned()))?;
        Record::try_from(serde_json::from_str::<Value>(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store() {
        let mut store = InMemoryRecordStore::new();
        assert!(store.is_empty());
        let record = Record::new().with("name", "John Doe");
        store.write_record("customer-John Doe", &record).unwrap();
        store.write_record("customer-John Doe", &record).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.read_record("customer-John Doe").unwrap(), record);
        assert!(matches!(
            store.read_record("customer-Jane Doe"),
            Err(DataAccessError::NotFound(_))
        ));
    }
}
