pub mod core;

use crate::domain::DataAccessError;

impl From<serde_json::Error> for DataAccessError {
    fn from(value: serde_json::Error) -> Self {
        match value.classify() {
            serde_json::error::Category::Io => Self::IoFailure(value.into()),
            _ => Self::MalformedRecord(value.to_string()),
        }
    }
}

/// ファイル名として安全なキーかどうかを検証する
fn validate_key(key: &str) -> Result<(), DataAccessError> {
    if key.is_empty()
        || key.contains(['/', '\\', '\0'])
        || key.split('-').any(|s| s == "..")
        || key.starts_with('.')
    {
        return Err(DataAccessError::InvalidKey(key.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("hotel-Grand Hotel").is_ok());
        assert!(validate_key("customer-John Doe").is_ok());
        assert!(matches!(
            validate_key("customer-../escape"),
            Err(DataAccessError::InvalidKey(_))
        ));
        assert!(validate_key("hotel-..").is_err());
        assert!(validate_key("").is_err());
        assert!(validate_key(".hidden").is_err());
    }

    #[test]
    fn test_from_serde_json_error() {
        let error = serde_json::from_str::<serde_json::Value>("{ \"name\": ").unwrap_err();
        assert!(matches!(
            DataAccessError::from(error),
            DataAccessError::MalformedRecord(_)
        ));
    }
}
