//! Environment variable handling for the salon booking proxy.
//!
//! Configuration values come from `SALON__SECTION__KEY` variables, secrets from
//! `SALON_SECRET_SECTION_KEY` or the shorter `SECTION_KEY` form.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "SALON";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "SALON_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker value replaced by an environment variable at load time
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `"meevo.tenant_id"` becomes `"SALON__MEEVO__TENANT_ID"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `"meevo.client_secret"` becomes `"SALON_SECRET_MEEVO_CLIENT_SECRET"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to the short, unprefixed variable name
///
/// `"meevo.client_secret"` becomes `"MEEVO_CLIENT_SECRET"`.
pub fn short_secret_path_to_env_var(path: &str) -> String {
    path.replace('.', SECRET_SEPARATOR).to_uppercase()
}

/// Get an environment variable for a configuration path
pub fn get_config_env_var(path: &str) -> Option<String> {
    env::var(config_path_to_env_var(path)).ok()
}

/// Get an environment variable for a secret path, preferring the prefixed name.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    if let Ok(value) = env::var(secret_path_to_env_var(path)) {
        return Some(value);
    }
    env::var(short_secret_path_to_env_var(path)).ok()
}

/// Paths containing "secret", "password" or "token" are treated as secrets.
pub fn is_secret_path(path: &str) -> bool {
    let path_lower = path.to_lowercase();
    path_lower.contains("secret") || path_lower.contains("password") || path_lower.contains("token")
}

/// Get an environment variable for a path, using the secret naming for secret paths.
pub fn get_env_var(path: &str) -> Option<String> {
    if is_secret_path(path) {
        get_secret_env_var(path)
    } else {
        get_config_env_var(path).or_else(|| env::var(short_secret_path_to_env_var(path)).ok())
    }
}

/// Replaces every `"secret_from_env"` string in `value` with its environment variable.
///
/// Returns the paths that were left unresolved.
pub fn inject_env_vars(value: &mut serde_json::Value) -> Vec<String> {
    use serde_json::Value;

    fn walk(path: Vec<String>, obj: &mut Value, missing: &mut Vec<String>) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    walk(new_path, v, missing);
                }
            }
            Value::Array(arr) => {
                for (i, v) in arr.iter_mut().enumerate() {
                    let mut new_path = path.clone();
                    new_path.push(i.to_string());
                    walk(new_path, v, missing);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                match get_env_var(&path_str) {
                    Some(env_val) => *s = env_val,
                    None => missing.push(path_str),
                }
            }
            _ => {}
        }
    }

    let mut missing = Vec::new();
    walk(vec![], value, &mut missing);
    missing
}

/// Replaces the value of every secret path with `"***"`, for logging.
pub fn redact_secrets(value: &mut serde_json::Value) {
    use serde_json::Value;

    fn walk(path: &str, obj: &mut Value) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let new_path = if path.is_empty() {
                        k.to_string()
                    } else {
                        format!("{}.{}", path, k)
                    };
                    walk(&new_path, v);
                }
            }
            Value::String(s) if is_secret_path(path) => *s = "***".to_string(),
            _ => {}
        }
    }

    walk("", value);
}
