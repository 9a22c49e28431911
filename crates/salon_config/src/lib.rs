use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

pub mod env_vars;
pub mod models;
pub use models::*;

use env_vars::{get_config_prefix, inject_env_vars, redact_secrets, CONFIG_SEPARATOR};

/// Loads the layered application configuration.
///
/// Sources, later ones winning: `<CONFIG_DIR>/default`, `<CONFIG_DIR>/<RUN_ENV>`,
/// then `SALON__*` environment variables. `CONFIG_DIR` defaults to `config`
/// and `RUN_ENV` to `debug`. Afterwards `"secret_from_env"` markers are
/// resolved and a plain `PORT` variable overrides `server.port`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    load_config_from(Path::new(&config_dir))
}

/// Same as [`load_config`] with an explicit configuration directory.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, ConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = get_config_prefix();

    let default_path: PathBuf = config_dir.join("default");
    let env_path: PathBuf = config_dir.join(&run_env);

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .prefix_separator(CONFIG_SEPARATOR)
                .separator(CONFIG_SEPARATOR),
        );

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    let mut config = apply_env_overrides_from_marker(raw_config)?;

    if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        config.server.port = port;
    }

    Ok(config)
}

/// Resolves `"secret_from_env"` markers in the serialized config.
///
/// Unresolved markers are logged and left in place, so the affected upstream
/// call fails at request time instead of at startup.
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    for path in inject_env_vars(&mut json) {
        warn!("No environment variable found for secret_from_env at '{}'", path);
    }
    serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))
}

/// Config as JSON with secret values masked, for startup logging.
pub fn redacted(config: &AppConfig) -> serde_json::Value {
    let mut json = serde_json::to_value(config).unwrap_or_default();
    redact_secrets(&mut json);
    json
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment once.
///
/// `DOTENV_OVERRIDE` names an alternate file; otherwise a first command line
/// argument starting with `.env` is used, falling back to `.env`.
/// Returns the path that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

/// Serializes tests that read or write process environment variables.
#[cfg(test)]
pub(crate) fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
