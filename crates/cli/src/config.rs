use anyhow::{Context as AnyhowContext, Result};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

pub const ADDR_ENV: &str = "ADDR";
pub const SERVER_NAME_ENV: &str = "SERVER_NAME";
pub const REPO_URL_ENV: &str = "REPO_URL";
pub const GHCR_IMAGE_ENV: &str = "GHCR_IMAGE";
pub const WORDLIST_ENV: &str = "FIXPHRASE_WORDLIST";

/// Optional file of `KEY=value` lines read from the working directory
pub const DOTENV_FILE: &str = ".env";

const DEFAULT_ADDR: &str = ":7080";
const DEFAULT_SERVER_NAME: &str = "fixphrase";
const DEFAULT_WORDLIST: &str = "wordlist/wordlist.json";

/// Values given on the command line; they win over the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub addr: Option<String>,
    pub wordlist: Option<PathBuf>,
}

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Socket address to bind, `host:port`
    pub addr: String,
    pub server_name: String,
    pub repo_url: String,
    pub ghcr_image: String,
    pub wordlist: PathBuf,
}

impl Config {
    pub fn from_env(overrides: ConfigOverrides) -> Self {
        Self::from_env_file(overrides, Path::new(DOTENV_FILE))
    }

    /// Resolve from the process environment, falling back to `dotenv`.
    ///
    /// Variables already set in the environment win over the file. A missing
    /// file is ignored and an unreadable one is logged and skipped.
    pub fn from_env_file(overrides: ConfigOverrides, dotenv: &Path) -> Self {
        let file = dotenv_values(dotenv).unwrap_or_else(|err| {
            log::warn!("Ignoring {}: {err:#}", dotenv.display());
            HashMap::new()
        });
        Self::resolve(overrides, |key| {
            env::var(key).ok().or_else(|| file.get(key).cloned())
        })
    }

    /// Resolve each field from the override, then `lookup`, then the default.
    ///
    /// Blank values count as unset.
    pub fn resolve(overrides: ConfigOverrides, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, fallback: &str| {
            non_blank(lookup(key)).unwrap_or_else(|| fallback.to_string())
        };

        let addr = non_blank(overrides.addr).unwrap_or_else(|| get(ADDR_ENV, DEFAULT_ADDR));
        let wordlist = overrides
            .wordlist
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(get(WORDLIST_ENV, DEFAULT_WORDLIST)));

        Self {
            addr: normalize_addr(&addr),
            server_name: get(SERVER_NAME_ENV, DEFAULT_SERVER_NAME),
            repo_url: get(REPO_URL_ENV, ""),
            ghcr_image: get(GHCR_IMAGE_ENV, ""),
            wordlist,
        }
    }
}

/// Variables defined in a `.env` file; an absent file yields none
pub fn dotenv_values(path: &Path) -> Result<HashMap<String, String>> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => iter
            .collect::<std::result::Result<HashMap<_, _>, _>>()
            .with_context(|| format!("parse {}", path.display())),
        Err(err) if err.not_found() => Ok(HashMap::new()),
        Err(err) => Err(err).with_context(|| format!("read {}", path.display())),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Expand the `:port` shorthand to an all-interfaces bind address
pub fn normalize_addr(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr.to_string()
    }
}

/// Version stamp baked in at compile time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: &'static str,
    pub date: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            commit: match option_env!("FIXPHRASE_GIT_COMMIT") {
                Some(commit) => commit,
                None => "none",
            },
            date: match option_env!("FIXPHRASE_BUILD_DATE") {
                Some(date) => date,
                None => "unknown",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::resolve(ConfigOverrides::default(), lookup(&[]));
        assert_eq!(config.addr, "0.0.0.0:7080");
        assert_eq!(config.server_name, "fixphrase");
        assert_eq!(config.repo_url, "");
        assert_eq!(config.ghcr_image, "");
        assert_eq!(config.wordlist, PathBuf::from("wordlist/wordlist.json"));
    }

    #[test]
    fn environment_values_are_trimmed_and_blank_means_unset() {
        let config = Config::resolve(
            ConfigOverrides::default(),
            lookup(&[
                ("ADDR", " 127.0.0.1:9000 "),
                ("SERVER_NAME", "   "),
                ("REPO_URL", "https://example.org/fixphrase"),
            ]),
        );
        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.server_name, "fixphrase");
        assert_eq!(config.repo_url, "https://example.org/fixphrase");
    }

    #[test]
    fn overrides_win_over_environment() {
        let config = Config::resolve(
            ConfigOverrides {
                addr: Some(":8080".to_string()),
                wordlist: Some(PathBuf::from("/tmp/words.json")),
            },
            lookup(&[("ADDR", "127.0.0.1:9000"), ("FIXPHRASE_WORDLIST", "other.json")]),
        );
        assert_eq!(config.addr, "0.0.0.0:8080");
        assert_eq!(config.wordlist, PathBuf::from("/tmp/words.json"));
    }

    #[test]
    fn dotenv_file_is_parsed_and_absence_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(".env");
        assert!(dotenv_values(&missing).unwrap().is_empty());

        fs::write(&missing, "SERVER_NAME=from-dotenv\n# comment\nGHCR_IMAGE=\"ghcr.io/x/y:1\"\n")
            .unwrap();
        let values = dotenv_values(&missing).unwrap();
        assert_eq!(values.get("SERVER_NAME").map(String::as_str), Some("from-dotenv"));
        assert_eq!(values.get("GHCR_IMAGE").map(String::as_str), Some("ghcr.io/x/y:1"));
    }

    #[test]
    fn dotenv_values_feed_config_when_environment_is_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "SERVER_NAME=x\n").unwrap();

        let config = Config::from_env_file(ConfigOverrides::default(), &path);
        let expected = env::var("SERVER_NAME")
            .ok()
            .and_then(|v| non_blank(Some(v)))
            .unwrap_or_else(|| "x".to_string());
        assert_eq!(config.server_name, expected);
    }

    #[test]
    fn malformed_dotenv_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "NOT A VALID LINE\n").unwrap();
        assert!(dotenv_values(&path).is_err());
    }

    #[test]
    fn build_info_has_fallback_stamps() {
        let build = BuildInfo::current();
        assert_eq!(build.version, env!("CARGO_PKG_VERSION"));
        assert!(!build.commit.is_empty());
        assert!(!build.date.is_empty());
    }
}
