//! `${VAR}` substitution in config values.
//!
//! Only uppercase `[A-Z_][A-Z0-9_]*` names are recognised. `$${VAR}` is an
//! escape and becomes the literal text `${VAR}`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

/// Matches both `${VAR}` and the escaped form `$${VAR}`.
static ENV_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute references using an explicit variable map.
///
/// A variable that is unset or empty is an error.
pub fn resolve_env_vars_with(
    value: &Value,
    env: &HashMap<String, String>,
) -> Result<Value, MissingEnvVarError> {
    substitute(value, env, "")
}

fn substitute(
    value: &Value,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<Value, MissingEnvVarError> {
    match value {
        Value::String(s) => substitute_str(s, env, path).map(Value::String),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| substitute(v, env, &format!("{path}[{i}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let child = if path.is_empty() { k.clone() } else { format!("{path}.{k}") };
                out.insert(k.clone(), substitute(v, env, &child)?);
            }
            Ok(Value::Object(out))
        }
        other => Ok(other.clone()),
    }
}

fn substitute_str(
    s: &str,
    env: &HashMap<String, String>,
    path: &str,
) -> Result<String, MissingEnvVarError> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }

    let mut missing: Option<MissingEnvVarError> = None;
    let replaced = ENV_REF.replace_all(s, |caps: &Captures| {
        let name = &caps[1];
        if caps[0].starts_with("$$") {
            return format!("${{{name}}}");
        }
        match env.get(name).filter(|v| !v.is_empty()) {
            Some(v) => v.clone(),
            None => {
                missing.get_or_insert_with(|| MissingEnvVarError {
                    var_name: name.to_string(),
                    config_path: path.to_string(),
                });
                String::new()
            }
        }
    });

    match missing {
        Some(err) => Err(err),
        None => Ok(replaced.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn substitutes_channel_secret() {
        let v = json!({"channel": {"channelSecret": "${LINE_CHANNEL_SECRET}"}});
        let result = resolve_env_vars_with(&v, &env(&[("LINE_CHANNEL_SECRET", "abc123")])).unwrap();
        assert_eq!(result["channel"]["channelSecret"], "abc123");
    }

    #[test]
    fn error_names_variable_and_path() {
        let v = json!({"channel": {"channelAccessToken": "${MISSING_TOKEN}"}});
        let err = resolve_env_vars_with(&v, &HashMap::new()).unwrap_err();
        assert_eq!(err.var_name, "MISSING_TOKEN");
        assert_eq!(err.config_path, "channel.channelAccessToken");
    }

    #[test]
    fn empty_variable_counts_as_missing() {
        let v = json!({"key": "${EMPTY}"});
        assert!(resolve_env_vars_with(&v, &env(&[("EMPTY", "")])).is_err());
    }

    #[test]
    fn escaped_reference_is_literal() {
        let v = json!({"key": "$${NOT_A_VAR} and ${REAL}"});
        let result = resolve_env_vars_with(&v, &env(&[("REAL", "yes")])).unwrap();
        assert_eq!(result["key"], "${NOT_A_VAR} and yes");
    }

    #[test]
    fn passthrough_non_strings() {
        let v = json!({"server": {"port": 8080}, "list": ["plain"]});
        assert_eq!(resolve_env_vars_with(&v, &HashMap::new()).unwrap(), v);
    }
}
