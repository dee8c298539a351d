//! Configuration loader
//!
//! Builds the typed [`AppConfig`] the rest of the application is handed at
//! construction time. Nothing outside this module reads the environment.
//!
//! ## Loading Strategy
//! 1. Start from the compiled-in defaults
//! 2. Overlay an optional config file (TOML or JSON)
//! 3. Overlay environment variables; env wins over file, file over defaults
//!
//! ## Environment Variables
//! - `CHAINBOARD_CONFIG_PATH`: Explicit config file path (must exist if set)
//! - `CHAINBOARD_LISTEN_ADDR`: HTTP listen address, e.g. `127.0.0.1:8080`
//! - `CHAINBOARD_UPSTREAM_URL`: Chain-index base URL
//! - `CHAINBOARD_UPSTREAM_TIMEOUT_SECS`: Upstream request deadline in seconds
//! - `CHAINBOARD_CACHE_TTL_SECS`: Series cache freshness TTL in seconds
//!
//! ## File Locations
//! Without `CHAINBOARD_CONFIG_PATH`, the loader probes `./chainboard.toml`
//! then `./chainboard.json` in the working directory; absence of both is not
//! an error.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chainboard_domain::{AppConfig, ChainboardError, Result};
use url::Url;

/// Load configuration with the defaults → file → environment overlay.
///
/// # Errors
/// Returns `ChainboardError::Config` if:
/// - `CHAINBOARD_CONFIG_PATH` points at a missing file
/// - A config file exists but cannot be read or parsed
/// - An environment override has an invalid value
pub fn load() -> Result<AppConfig> {
    let mut config = match config_file_path()? {
        Some(path) => load_from_file(&path)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from a file.
///
/// Format is detected by file extension; `.toml` and `.json` are supported,
/// and a missing extension is treated as JSON.
///
/// # Errors
/// Returns `ChainboardError::Config` if the file is missing, unreadable, in
/// an unsupported format, or fails to parse.
pub fn load_from_file(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Err(ChainboardError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| ChainboardError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

/// Parse configuration from string content.
fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ChainboardError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ChainboardError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ChainboardError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Resolve which config file to read, if any.
///
/// An explicit `CHAINBOARD_CONFIG_PATH` always wins and must exist; without
/// it the working directory is probed and absence is fine.
fn config_file_path() -> Result<Option<PathBuf>> {
    if let Ok(explicit) = std::env::var("CHAINBOARD_CONFIG_PATH") {
        let path = PathBuf::from(explicit);
        if !path.exists() {
            return Err(ChainboardError::Config(format!(
                "CHAINBOARD_CONFIG_PATH points at a missing file: {}",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    Ok(probe_config_paths())
}

/// Probe the working directory for a config file.
///
/// # Returns
/// The first of `chainboard.toml` / `chainboard.json` that exists, or `None`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    [cwd.join("chainboard.toml"), cwd.join("chainboard.json")]
        .into_iter()
        .find(|path| path.exists())
}

/// Apply `CHAINBOARD_*` environment overrides onto `config`.
fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
    if let Some(addr) = env_parsed::<SocketAddr>("CHAINBOARD_LISTEN_ADDR")? {
        config.listen_addr = addr;
    }

    if let Ok(base_url) = std::env::var("CHAINBOARD_UPSTREAM_URL") {
        Url::parse(&base_url).map_err(|e| {
            ChainboardError::Config(format!("Invalid CHAINBOARD_UPSTREAM_URL {base_url:?}: {e}"))
        })?;
        config.upstream.base_url = base_url;
    }

    if let Some(secs) = env_parsed::<u64>("CHAINBOARD_UPSTREAM_TIMEOUT_SECS")? {
        config.upstream.timeout_secs = secs;
    }

    if let Some(secs) = env_parsed::<u64>("CHAINBOARD_CACHE_TTL_SECS")? {
        config.cache.ttl_secs = secs;
    }

    Ok(())
}

/// Read and parse an optional environment variable.
///
/// # Errors
/// Returns `ChainboardError::Config` when the variable is set but does not
/// parse; an unset variable is simply `None`.
fn env_parsed<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ChainboardError::Config(format!("Invalid value for {key} ({raw:?}): {e}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    // Env-var tests share process state; serialize them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ALL_VARS: [&str; 5] = [
        "CHAINBOARD_CONFIG_PATH",
        "CHAINBOARD_LISTEN_ADDR",
        "CHAINBOARD_UPSTREAM_URL",
        "CHAINBOARD_UPSTREAM_TIMEOUT_SECS",
        "CHAINBOARD_CACHE_TTL_SECS",
    ];

    fn clear_env() {
        for var in ALL_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_load_defaults_when_nothing_configured() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let config = load().expect("should load defaults");

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_env_overrides_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CHAINBOARD_LISTEN_ADDR", "0.0.0.0:9999");
        std::env::set_var("CHAINBOARD_UPSTREAM_URL", "http://indexer:10086");
        std::env::set_var("CHAINBOARD_UPSTREAM_TIMEOUT_SECS", "3");
        std::env::set_var("CHAINBOARD_CACHE_TTL_SECS", "60");

        let config = load().expect("should load overridden config");

        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:9999");
        assert_eq!(config.upstream.base_url, "http://indexer:10086");
        assert_eq!(config.upstream.timeout_secs, 3);
        assert_eq!(config.cache.ttl_secs, 60);

        clear_env();
    }

    #[test]
    fn test_invalid_env_number_is_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CHAINBOARD_CACHE_TTL_SECS", "five minutes");

        let err = load().unwrap_err();
        assert!(matches!(err, ChainboardError::Config(_)));
        assert!(err.to_string().contains("CHAINBOARD_CACHE_TTL_SECS"));

        clear_env();
    }

    #[test]
    fn test_invalid_env_listen_addr_is_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CHAINBOARD_LISTEN_ADDR", "not-an-addr");

        let err = load().unwrap_err();
        assert!(matches!(err, ChainboardError::Config(_)));

        clear_env();
    }

    #[test]
    fn test_invalid_env_upstream_url_is_config_error() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CHAINBOARD_UPSTREAM_URL", "::not a url::");

        let err = load().unwrap_err();
        assert!(matches!(err, ChainboardError::Config(_)));

        clear_env();
    }

    #[test]
    fn test_load_from_file_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chainboard.toml");
        std::fs::write(
            &path,
            r#"
listen_addr = "127.0.0.1:8081"

[upstream]
base_url = "http://indexer:10086"
timeout_secs = 5

[cache]
ttl_secs = 120
"#,
        )
        .unwrap();

        let config = load_from_file(&path).expect("should parse TOML config");

        assert_eq!(config.listen_addr.port(), 8081);
        assert_eq!(config.upstream.timeout_secs, 5);
        assert_eq!(config.cache.ttl_secs, 120);
    }

    #[test]
    fn test_load_from_file_json_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chainboard.json");
        std::fs::write(&path, r#"{"cache": {"ttl_secs": 45}}"#).unwrap();

        let config = load_from_file(&path).expect("should parse JSON config");

        assert_eq!(config.cache.ttl_secs, 45);
        // Omitted sections keep their defaults.
        assert_eq!(config.upstream, AppConfig::default().upstream);
    }

    #[test]
    fn test_load_from_file_not_found() {
        let err = load_from_file(Path::new("/nonexistent/chainboard.toml")).unwrap_err();
        assert!(matches!(err, ChainboardError::Config(_)));
    }

    #[test]
    fn test_load_from_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chainboard.toml");
        std::fs::write(&path, "listen_addr = [broken").unwrap();

        let err = load_from_file(&path).unwrap_err();
        assert!(matches!(err, ChainboardError::Config(_)));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let err = parse_config("anything", Path::new("chainboard.yaml")).unwrap_err();
        assert!(err.to_string().contains("Unsupported config format"));
    }

    #[test]
    fn test_env_wins_over_file() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chainboard.toml");
        std::fs::write(&path, "[cache]\nttl_secs = 120\n").unwrap();

        std::env::set_var("CHAINBOARD_CONFIG_PATH", &path);
        std::env::set_var("CHAINBOARD_CACHE_TTL_SECS", "60");

        let config = load().expect("should load layered config");

        assert_eq!(config.cache.ttl_secs, 60);

        clear_env();
    }

    #[test]
    fn test_explicit_config_path_must_exist() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("CHAINBOARD_CONFIG_PATH", "/nonexistent/chainboard.toml");

        let err = load().unwrap_err();
        assert!(matches!(err, ChainboardError::Config(_)));

        clear_env();
    }
}
