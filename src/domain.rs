pub mod core;

use derive_more::{Deref, DerefMut, From};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::error;

/// 名前をキーとして永続化されるエンティティ
pub trait Entity: Sized {
    const ENTITY_NAME: &'static str;

    fn name(&self) -> &str;
    fn to_record(&self) -> Record;
    fn from_record(record: &Record) -> Result<Self, DataAccessError>;

    /// エンティティの全状態を保存する
    fn save<S: RecordStore + ?Sized>(&self, store: &mut S) -> Result<(), DataAccessError> {
        store.write_record(&record_key::<Self>(self.name()), &self.to_record())
    }

    /// 名前からエンティティを読み込む
    fn load<S: RecordStore + ?Sized>(store: &S, name: &str) -> Result<Self, DataAccessError> {
        let record = store.read_record(&record_key::<Self>(name))?;
        Self::from_record(&record)
    }

    /// 名前からエンティティを読み込む。失敗した場合はログを出力して`None`を返す
    fn find_by_name<S: RecordStore + ?Sized>(store: &S, name: &str) -> Option<Self> {
        match Self::load(store, name) {
            Ok(entity) => Some(entity),
            Err(e) => {
                error!(entity = Self::ENTITY_NAME, key = %name, "読み込みに失敗しました: {}", e);
                None
            }
        }
    }
}

/// レコードの読み書きを行うストア
pub trait RecordStore {
    /// キーに対応するレコードを上書き保存する
    fn write_record(&mut self, key: &str, record: &Record) -> Result<(), DataAccessError>;
    /// キーに対応するレコードを読み込む
    fn read_record(&self, key: &str) -> Result<Record, DataAccessError>;
}

#[derive(Error, Debug)]
pub enum DataAccessError {
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("Missing field `{0}`")]
    MissingField(String),
    #[error("Invalid record key: {0:?}")]
    InvalidKey(String),
    #[error("I/O failure: {0}")]
    IoFailure(#[from] std::io::Error),
}

/// 永続化されたエンティティの状態
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, From, Deref, DerefMut)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_owned(), value.into());
        self
    }

    /// フィールドを取り出して`T`に変換する
    pub fn field<T: DeserializeOwned>(&self, field: &str) -> Result<T, DataAccessError> {
        let value = self
            .0
            .get(field)
            .ok_or_else(|| DataAccessError::MissingField(field.to_owned()))?;
        T::deserialize(value)
            .map_err(|e| DataAccessError::MalformedRecord(format!("field `{}`: {}", field, e)))
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Object(value.0)
    }
}

impl TryFrom<Value> for Record {
    type Error = DataAccessError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DataAccessError::MalformedRecord(format!(
                "expected an object, found {}",
                other
            ))),
        }
    }
}

pub fn record_key<E: Entity>(name: &str) -> String {
    E::ENTITY_NAME.to_owned() + "-" + name
}
