//! Shared helpers for filter construction.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, ShikiriError};

/// Deserialize filter parameters, treating `null` as an empty object.
///
/// Unknown or ill-typed fields surface as a config error naming the filter.
pub fn deserialize_args<T: DeserializeOwned>(kind: &str, args: &Value) -> Result<T> {
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other.clone(),
    };
    serde_json::from_value(args)
        .map_err(|e| ShikiriError::config(format!("invalid args for '{kind}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Args {
        #[serde(default)]
        flag: bool,
    }

    #[test]
    fn test_null_is_empty_object() {
        let args: Args = deserialize_args("test", &Value::Null).unwrap();
        assert!(!args.flag);
    }

    #[test]
    fn test_unknown_field_is_config_error() {
        let err = deserialize_args::<Args>("test", &json!({"flga": true})).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("test"));
    }
}
