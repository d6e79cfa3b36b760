use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use tracing::debug;

use crate::domain::{DataAccessError, Record, RecordStore};
use crate::infrastructure::validate_key;

const EXTENSION: &str = "json";

/// レコードを1件1ファイルのJSONとして保存するストア
#[derive(Clone, Debug)]
pub struct JsonFileRecordStore {
    directory: PathBuf,
}

impl JsonFileRecordStore {
    /// 保存先ディレクトリを作成してストアを開く
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, DataAccessError> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{}.{}", key, EXTENSION))
    }
}

impl RecordStore for JsonFileRecordStore {
    fn write_record(&mut self, key: &str, record: &Record) -> Result<(), DataAccessError> {
        validate_key(key)?;
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        record.serialize(&mut ser)?;

        // 一時ファイルに書き込んでから置き換える
        let path = self.path(key);
        let tmp_path = self.directory.join(format!("{}.{}.tmp", key, EXTENSION));
        if let Err(e) = fs::write(&tmp_path, &buf).and_then(|_| fs::rename(&tmp_path, &path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        debug!(path = %path.display(), bytes = buf.len(), "レコードを保存しました");
        Ok(())
    }

    fn read_record(&self, key: &str) -> Result<Record, DataAccessError> {
        validate_key(key)?;
        let path = self.path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DataAccessError::NotFound(key.to_owned()))
            }
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_slice::<Value>(&bytes).map_err(|e| {
            DataAccessError::MalformedRecord(format!("{}: {}", path.display(), e))
        })?;
        Record::try_from(value)
    }
}
