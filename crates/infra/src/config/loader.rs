//! Resolves a [`Config`] for the CLI.
//!
//! The environment wins when `LOGCHECKER_API_URL` is set; the optional
//! variables below then override individual defaults. Otherwise the first
//! existing file from [`probe_config_paths`] is parsed as JSON or TOML by
//! extension.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `LOGCHECKER_API_URL` | `api.base_url` |
//! | `LOGCHECKER_API_TIMEOUT` | `api.timeout_seconds` |
//! | `LOGCHECKER_API_MAX_ATTEMPTS` | `api.max_attempts` |
//! | `LOGCHECKER_DRIVER_CACHE_TTL` | `api.driver_cache_ttl_seconds` |
//! | `LOGCHECKER_UTC_OFFSET` | `grid.utc_offset` |
//! | `LOGCHECKER_RANGE_DAYS` | `grid.default_range_days` |
//! | `LOGCHECKER_LOG` | `logging.filter` |

use std::path::{Path, PathBuf};
use std::str::FromStr;

use logchecker_domain::{parse_utc_offset, Config, LogCheckerError, Result};
use tracing::{debug, info};

const API_URL_VAR: &str = "LOGCHECKER_API_URL";

/// File names looked for in each probed directory, most specific last.
const FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "logchecker.json", "logchecker.toml"];

/// Environment first, then the first config file found.
///
/// # Errors
/// `Config` when neither source produces a valid configuration.
pub fn load() -> Result<Config> {
    if std::env::var_os(API_URL_VAR).is_none() {
        debug!("{API_URL_VAR} unset, probing for a config file");
        return load_from_file(None);
    }

    let config = load_from_env()?;
    info!(base_url = %config.api.base_url, "configuration taken from environment");
    Ok(config)
}

/// Build a configuration from `LOGCHECKER_*` variables. Only the API URL is
/// required.
///
/// # Errors
/// `Config` naming the variable that is missing or unparsable.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    config.api.base_url = env_opt(API_URL_VAR)
        .ok_or_else(|| LogCheckerError::Config(format!("{API_URL_VAR} is not set")))?;

    override_with(&mut config.api.timeout_seconds, "LOGCHECKER_API_TIMEOUT")?;
    override_with(&mut config.api.max_attempts, "LOGCHECKER_API_MAX_ATTEMPTS")?;
    override_with(&mut config.api.driver_cache_ttl_seconds, "LOGCHECKER_DRIVER_CACHE_TTL")?;
    override_with(&mut config.grid.default_range_days, "LOGCHECKER_RANGE_DAYS")?;
    override_with(&mut config.logging.filter, "LOGCHECKER_LOG")?;
    config.grid.utc_offset = env_opt("LOGCHECKER_UTC_OFFSET");

    validate(&config)?;
    Ok(config)
}

/// Parse `path`, or the first probed file when `path` is `None`.
///
/// # Errors
/// `Config` when no file exists, it cannot be read or parsed, or it fails
/// [`validate`].
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let path = match path {
        Some(path) if path.exists() => path,
        Some(path) => {
            return Err(LogCheckerError::Config(format!("{} does not exist", path.display())));
        }
        None => probe_config_paths().ok_or_else(|| {
            LogCheckerError::Config(format!("none of {FILE_NAMES:?} found near cwd or executable"))
        })?,
    };

    info!(path = %path.display(), "reading configuration file");
    let contents = std::fs::read_to_string(&path)
        .map_err(|e| LogCheckerError::Config(format!("cannot read {}: {e}", path.display())))?;

    let config = parse_config(&contents, &path)?;
    validate(&config)?;
    Ok(config)
}

/// Reject values that would otherwise fail at request or grid time.
///
/// # Errors
/// `Config` naming the offending key.
pub fn validate(config: &Config) -> Result<()> {
    let invalid = |key: &str, why: &str| Err(LogCheckerError::Config(format!("{key} {why}")));

    if config.api.base_url.trim().is_empty() {
        return invalid("api.base_url", "must not be empty");
    }
    if config.api.max_attempts == 0 {
        return invalid("api.max_attempts", "must be at least 1");
    }
    if config.grid.default_range_days == 0 {
        return invalid("grid.default_range_days", "must be at least 1");
    }
    if let Some(raw) = config.grid.utc_offset.as_deref() {
        if let Err(e) = parse_utc_offset(raw) {
            return invalid("grid.utc_offset", &e.to_string());
        }
    }
    Ok(())
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(contents)
            .map_err(|e| LogCheckerError::Config(format!("TOML in {}: {e}", path.display()))),
        Some("json") | None => serde_json::from_str(contents)
            .map_err(|e| LogCheckerError::Config(format!("JSON in {}: {e}", path.display()))),
        Some(other) => Err(LogCheckerError::Config(format!("unsupported config format .{other}"))),
    }
}

/// First existing config file, searching the working directory and its two
/// parents, then the executable's directory.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let exe_dir = std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf));

    let mut dirs = Vec::new();
    if let Some(cwd) = cwd {
        dirs.extend(cwd.ancestors().take(3).map(Path::to_path_buf));
    }
    dirs.extend(exe_dir);

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

/// Set and non-blank value of `key`.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn override_with<T>(target: &mut T, key: &str) -> Result<()>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(raw) = env_opt(key) {
        *target = raw
            .parse()
            .map_err(|e| LogCheckerError::Config(format!("{key}={raw:?} is invalid: {e}")))?;
    }
    Ok(())
}
