use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::domain::{DataAccessError, Entity, Record, RecordStore};

/// 顧客エンティティ
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Customer {
    name: String,
    email: String,
}

impl Customer {
    pub fn create(name: String, email: String) -> Self {
        Self { name, email }
    }

    /// 顧客情報を変更して保存する。`None`や空文字の項目は変更しない
    pub fn modify_info<S: RecordStore + ?Sized>(
        &mut self,
        store: &mut S,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<(), DataAccessError> {
        let previous = self.clone();
        if let Some(name) = name.filter(|s| !s.is_empty()) {
            self.name = name;
        }
        if let Some(email) = email.filter(|s| !s.is_empty()) {
            self.email = email;
        }
        if let Err(e) = self.save(store) {
            *self = previous;
            return Err(e);
        }
        debug!(customer = %self.name, "顧客情報を変更しました");
        Ok(())
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Entity for Customer {
    const ENTITY_NAME: &'static str = "customer";

    fn name(&self) -> &str {
        &self.name
    }

    fn to_record(&self) -> Record {
        Record::new()
            .with("name", Value::from(self.name.as_str()))
            .with("email", Value::from(self.email.as_str()))
    }

    fn from_record(record: &Record) -> Result<Self, DataAccessError> {
        Ok(Self::create(record.field("name")?, record.field("email")?))
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Customer Name: {}", self.name)?;
        write!(f, "Email: {}", self.email)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::infrastructure::core::InMemoryRecordStore;

    use super::*;

    fn customer() -> Customer {
        Customer::create("John Doe".to_owned(), "john.doe@example.com".to_owned())
    }

    #[test]
    fn test_customer_create() {
        let customer = customer();
        assert_eq!(customer.name(), "John Doe");
        assert_eq!(customer.email(), "john.doe@example.com");
    }

    #[test]
    fn test_customer_record() {
        let customer = customer();
        let record = customer.to_record();
        assert_eq!(
            serde_json::Value::from(record.clone()),
            json!({ "name": "John Doe", "email": "john.doe@example.com" })
        );
        assert_eq!(Customer::from_record(&record).unwrap(), customer);
    }

    #[test]
    fn test_customer_from_record_missing_field() {
        let record = Record::new().with("name", "John Doe");
        assert!(matches!(
            Customer::from_record(&record),
            Err(DataAccessError::MissingField(field)) if field == "email"
        ));
    }

    #[test]
    fn test_customer_from_record_ignores_unknown_fields() {
        let record = customer().to_record().with("phone", "000-0000");
        assert_eq!(Customer::from_record(&record).unwrap(), customer());
    }

    #[test]
    fn test_customer_save_and_load() {
        let mut store = InMemoryRecordStore::new();
        customer().save(&mut store).unwrap();
        assert_eq!(Customer::load(&store, "John Doe").unwrap(), customer());
        assert!(matches!(
            Customer::load(&store, "Jane Doe"),
            Err(DataAccessError::NotFound(_))
        ));
        assert_eq!(Customer::find_by_name(&store, "Jane Doe"), None);
    }

    #[test]
    fn test_customer_modify_info() {
        let mut store = InMemoryRecordStore::new();
        let mut customer = customer();
        customer
            .modify_info(&mut store, None, Some("updated@example.com".to_owned()))
            .unwrap();
        assert_eq!(customer.name(), "John Doe");
        assert_eq!(customer.email(), "updated@example.com");
        assert_eq!(Customer::load(&store, "John Doe").unwrap(), customer);

        customer
            .modify_info(&mut store, Some("Jane Doe".to_owned()), Some(String::new()))
            .unwrap();
        assert_eq!(customer.name(), "Jane Doe");
        assert_eq!(customer.email(), "updated@example.com");
        assert_eq!(Customer::load(&store, "Jane Doe").unwrap(), customer);
    }

    #[test]
    fn test_customer_modify_info_rolls_back_on_failure() {
        let mut store = InMemoryRecordStore::new();
        let mut customer = customer();
        let result = customer.modify_info(&mut store, Some("../escape".to_owned()), None);
        assert!(matches!(result, Err(DataAccessError::InvalidKey(_))));
        assert_eq!(customer.name(), "John Doe");
    }

    #[test]
    fn test_customer_display() {
        assert_eq!(
            customer().to_string(),
            "Customer Name: John Doe\nEmail: john.doe@example.com"
        );
    }
}
