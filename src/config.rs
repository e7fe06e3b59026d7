//! Operator configuration: Challonge credentials and tournament addressing.

use std::{
    env, fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

/// Default location on disk where the console looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "BRACKET_CONSOLE_CONFIG_PATH";
const USERNAME_ENV: &str = "CHALLONGE_USERNAME";
const API_KEY_ENV: &str = "CHALLONGE_API_KEY";
const BASE_URL_ENV: &str = "CHALLONGE_BASE_URL";

/// Failures while assembling the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config `{}`", .path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The config file is not valid JSON of the expected shape.
    #[error("failed to parse config `{}`", .path.display())]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
    /// Neither the file nor the environment supplied a credential.
    #[error("missing Challonge {field}: set it in the config file or via `{env}`")]
    MissingCredential {
        /// Config file key.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The tournament argument could not be turned into a key.
    #[error("`{input}` is neither a bracket URL nor a tournament key")]
    InvalidTournament {
        /// Argument as given.
        input: String,
    },
}

/// Immutable runtime configuration for one console run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Challonge account name.
    pub username: String,
    /// Challonge API key.
    pub api_key: String,
    /// API root override; the backend default is used when absent.
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Load the config file (explicit path, env override, or default location)
    /// and apply credential overrides from the environment.
    ///
    /// A missing file is fine as long as the environment supplies credentials.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(resolve_config_path);
        let raw = read_raw_config(&path)?;
        Self::from_sources(raw, |name| env::var(name).ok())
    }

    fn from_sources(
        raw: RawConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let lookup = |name: &str, fallback: Option<String>| {
            env(name)
                .filter(|value| !value.trim().is_empty())
                .or(fallback)
                .filter(|value| !value.trim().is_empty())
        };

        let username = lookup(USERNAME_ENV, raw.challonge.username).ok_or(
            ConfigError::MissingCredential {
                field: "username",
                env: USERNAME_ENV,
            },
        )?;
        let api_key = lookup(API_KEY_ENV, raw.challonge.api_key).ok_or(
            ConfigError::MissingCredential {
                field: "api_key",
                env: API_KEY_ENV,
            },
        )?;
        let base_url = lookup(BASE_URL_ENV, raw.challonge.base_url);

        Ok(Self {
            username,
            api_key,
            base_url,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    challonge: RawChallonge,
}

#[derive(Debug, Default, Deserialize)]
struct RawChallonge {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
}

fn read_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let raw = serde_json::from_str::<RawConfig>(&contents).map_err(|source| {
                ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            info!(path = %path.display(), "loaded config file");
            Ok(raw)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!(
                path = %path.display(),
                "config file not found; relying on environment credentials"
            );
            Ok(RawConfig::default())
        }
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Turn a bracket URL or bare key into the key used in API paths.
///
/// `https://challonge.com/foo` gives `foo`; a community subdomain is prefixed,
/// so `https://melee.challonge.com/foo` gives `melee-foo`.
pub fn tournament_key(input: &str) -> Result<String, ConfigError> {
    let input = input.trim();
    let invalid = || ConfigError::InvalidTournament {
        input: input.to_string(),
    };

    if !input.contains("://") {
        let is_key = !input.is_empty()
            && input
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        return if is_key { Ok(input.to_string()) } else { Err(invalid()) };
    }

    let url = Url::parse(input).map_err(|_| invalid())?;
    let host = url.host_str().ok_or_else(invalid)?;
    let name = url
        .path_segments()
        .and_then(|mut segments| segments.find(|segment| !segment.is_empty()))
        .ok_or_else(invalid)?;

    let subdomain = host
        .strip_suffix("challonge.com")
        .and_then(|prefix| prefix.strip_suffix('.'))
        .filter(|prefix| !prefix.is_empty() && *prefix != "www");

    Ok(match subdomain {
        Some(subdomain) => format!("{subdomain}-{name}"),
        None => name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn raw(username: Option<&str>, api_key: Option<&str>) -> RawConfig {
        RawConfig {
            challonge: RawChallonge {
                username: username.map(Into::into),
                api_key: api_key.map(Into::into),
                base_url: None,
            },
        }
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn file_credentials_are_used() {
        let config = AppConfig::from_sources(raw(Some("to"), Some("secret")), env_from(&[])).unwrap();
        assert_eq!(config.username, "to");
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, None);
    }

    #[test]
    fn environment_overrides_file() {
        let config = AppConfig::from_sources(
            raw(Some("to"), Some("secret")),
            env_from(&[(API_KEY_ENV, "rotated"), (BASE_URL_ENV, "http://localhost:9000")]),
        )
        .unwrap();
        assert_eq!(config.username, "to");
        assert_eq!(config.api_key, "rotated");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = AppConfig::from_sources(raw(Some("to"), Some("  ")), env_from(&[])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingCredential {
                field: "api_key",
                ..
            }
        ));
    }

    #[test]
    fn parses_config_file_shape() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"challonge": {"username": "to", "api_key": "k"}}"#).unwrap();
        assert_eq!(raw.challonge.username.as_deref(), Some("to"));
    }

    #[test]
    fn tournament_keys_from_urls() {
        assert_eq!(tournament_key("https://challonge.com/weekly42").unwrap(), "weekly42");
        assert_eq!(
            tournament_key("https://www.challonge.com/weekly42/").unwrap(),
            "weekly42"
        );
        assert_eq!(
            tournament_key("http://melee.challonge.com/weekly42").unwrap(),
            "melee-weekly42"
        );
        assert_eq!(tournament_key("melee-weekly42").unwrap(), "melee-weekly42");
    }

    #[test]
    fn rejects_garbage_tournaments() {
        assert!(tournament_key("").is_err());
        assert!(tournament_key("https://challonge.com/").is_err());
        assert!(tournament_key("two words").is_err());
    }
}
