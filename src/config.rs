use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::parser::types::FieldPath;
use crate::probe::target::ProbeTarget;
use crate::version::error::SpecError;
use crate::version::expected::ExpectedSpec;

// =============================================================================
// Defaults
// =============================================================================

/// Host probed when nothing else is configured
pub const DEFAULT_HOST: &str = "localhost";

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid expected version: {0}")]
    Expected(#[from] SpecError),

    #[error("invalid port in {name}: {value}")]
    InvalidPort { name: String, value: String },

    #[error("expected version and expected version pattern are mutually exclusive")]
    ConflictingExpectations,

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// Configuration file structure. Every field is optional.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub expected: Option<String>,
    pub expected_regex: Option<String>,
    pub timeout_secs: Option<u64>,
    pub target: ProbeTarget,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A config file together with the reason it was skipped, if it was
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub file: FileConfig,
    /// Set when the default config file exists but could not be used
    pub ignored: Option<String>,
}

/// Load the configuration file.
///
/// An explicitly requested file must load. The default file is optional, and
/// a broken one only produces a note so the check can still run.
pub fn load_config_file(
    explicit: Option<&Path>,
    default_path: &Path,
) -> Result<LoadedConfig, ConfigError> {
    if let Some(path) = explicit {
        return FileConfig::load(path).map(|file| LoadedConfig {
            file,
            ignored: None,
        });
    }

    if !default_path.exists() {
        return Ok(LoadedConfig::default());
    }

    match FileConfig::load(default_path) {
        Ok(file) => Ok(LoadedConfig {
            file,
            ignored: None,
        }),
        Err(e) => {
            warn!("Ignoring default config file: {}", e);
            Ok(LoadedConfig {
                file: FileConfig::default(),
                ignored: Some(format!("ignored {e}")),
            })
        }
    }
}

/// Values given on the command line; they win over everything else
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub expected: Option<String>,
    pub expected_regex: Option<String>,
    pub timeout_secs: Option<u64>,
    pub software: Option<String>,
    pub url_path: Option<String>,
    pub field_path: Option<String>,
    pub markup_tag: Option<String>,
    pub markup_attribute: Option<String>,
    pub markup_value: Option<String>,
}

/// Fully resolved settings for one check
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub host: String,
    pub port: u16,
    pub expected: ExpectedSpec,
    pub timeout: Duration,
    pub target: ProbeTarget,
}

impl ProbeConfig {
    /// Merge command line, config file and environment, in that order of precedence.
    ///
    /// `env` looks up environment variables; it is a parameter so resolution
    /// can be tested without touching the process environment.
    pub fn resolve(
        overrides: Overrides,
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let target = apply_target_overrides(file.target, &overrides);
        let prefix = target.env_prefix();

        let host = overrides
            .host
            .or(file.host)
            .or_else(|| env(&format!("{prefix}_HOST")))
            .or_else(|| env("HOST"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match overrides.port.or(file.port) {
            Some(port) => port,
            None => env_port(&env, &[format!("{prefix}_PORT"), "PORT".to_string()])?
                .unwrap_or(target.default_port),
        };

        let expected = match (
            overrides.expected.or(file.expected),
            overrides.expected_regex.or(file.expected_regex),
        ) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingExpectations),
            (Some(spec), None) => spec.parse::<ExpectedSpec>()?,
            (None, Some(pattern)) => ExpectedSpec::pattern(&pattern)?,
            (None, None) => ExpectedSpec::Any,
        };

        let timeout_secs = overrides
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            host,
            port,
            expected,
            timeout: Duration::from_secs(timeout_secs),
            target,
        })
    }
}

fn apply_target_overrides(mut target: ProbeTarget, overrides: &Overrides) -> ProbeTarget {
    if let Some(software) = &overrides.software {
        target.software = software.clone();
    }
    if let Some(url_path) = &overrides.url_path {
        target.url_path = url_path.clone();
    }
    if let Some(field_path) = &overrides.field_path {
        target.field_path = FieldPath::from_dotted(field_path);
    }
    if let Some(tag) = &overrides.markup_tag {
        target.markup.tag = tag.clone();
    }
    if let Some(attribute) = &overrides.markup_attribute {
        target.markup.attribute = attribute.clone();
    }
    if let Some(value) = &overrides.markup_value {
        target.markup.value = value.clone();
    }
    target
}

/// First of `names` that is set, parsed as a port
fn env_port(
    env: &impl Fn(&str) -> Option<String>,
    names: &[String],
) -> Result<Option<u16>, ConfigError> {
    let Some((name, value)) = names
        .iter()
        .find_map(|name| env(name.as_str()).map(|value| (name, value)))
    else {
        return Ok(None);
    };

    match value.trim().parse::<u16>() {
        Ok(port) => Ok(Some(port)),
        Err(_) => Err(ConfigError::InvalidPort {
            name: name.clone(),
            value,
        }),
    }
}

/// Returns the path to the default configuration file.
/// Uses $XDG_CONFIG_HOME/version-probe/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/version-probe/config.json,
/// or ./version-probe/config.json if neither is available.
pub fn default_config_path() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
        .join(CONFIG_FILE_NAME)
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("version-probe")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::types::MarkupKey;
    use std::collections::HashMap;
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    fn no_env() -> impl Fn(&str) -> Option<String> {
        env_from(&[])
    }

    #[test]
    fn resolve_without_settings_uses_solr_defaults() {
        let config = ProbeConfig::resolve(Overrides::default(), FileConfig::default(), no_env())
            .unwrap();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8983);
        assert!(matches!(config.expected, ExpectedSpec::Any));
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.target, ProbeTarget::solr());
    }

    #[test]
    fn resolve_prefers_overrides_then_file_then_env() {
        let overrides = Overrides {
            host: Some("cli-host".to_string()),
            ..Overrides::default()
        };
        let file = FileConfig {
            host: Some("file-host".to_string()),
            port: Some(9000),
            ..FileConfig::default()
        };
        let env = env_from(&[("SOLR_HOST", "env-host"), ("SOLR_PORT", "9999")]);

        let config = ProbeConfig::resolve(overrides, file, env).unwrap();

        assert_eq!(config.host, "cli-host");
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn resolve_prefers_software_specific_env_over_generic() {
        let env = env_from(&[
            ("SOLR_HOST", "solr-host"),
            ("HOST", "generic-host"),
            ("PORT", "8080"),
        ]);

        let config = ProbeConfig::resolve(Overrides::default(), FileConfig::default(), env)
            .unwrap();

        assert_eq!(config.host, "solr-host");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn resolve_env_prefix_follows_software_override() {
        let overrides = Overrides {
            software: Some("Search".to_string()),
            ..Overrides::default()
        };
        let env = env_from(&[("SOLR_HOST", "solr-host"), ("SEARCH_HOST", "search-host")]);

        let config = ProbeConfig::resolve(overrides, FileConfig::default(), env).unwrap();

        assert_eq!(config.host, "search-host");
    }

    #[test]
    fn resolve_rejects_invalid_env_port() {
        let env = env_from(&[("SOLR_PORT", "solr")]);

        let result = ProbeConfig::resolve(Overrides::default(), FileConfig::default(), env);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidPort { ref name, .. }) if name == "SOLR_PORT"
        ));
    }

    #[test]
    fn resolve_parses_expected_spec() {
        let overrides = Overrides {
            expected: Some(">=7.0".to_string()),
            ..Overrides::default()
        };

        let config = ProbeConfig::resolve(overrides, FileConfig::default(), no_env()).unwrap();

        assert!(matches!(config.expected, ExpectedSpec::Minimum(_)));
    }

    #[test]
    fn resolve_builds_pattern_from_file() {
        let file = FileConfig {
            expected_regex: Some(r"7\..*".to_string()),
            ..FileConfig::default()
        };

        let config = ProbeConfig::resolve(Overrides::default(), file, no_env()).unwrap();

        assert!(matches!(config.expected, ExpectedSpec::Pattern { .. }));
    }

    #[test]
    fn resolve_rejects_exact_and_pattern_together() {
        let overrides = Overrides {
            expected: Some("7.1.0".to_string()),
            ..Overrides::default()
        };
        let file = FileConfig {
            expected_regex: Some("7.*".to_string()),
            ..FileConfig::default()
        };

        let result = ProbeConfig::resolve(overrides, file, no_env());

        assert!(matches!(result, Err(ConfigError::ConflictingExpectations)));
    }

    #[test]
    fn resolve_rejects_invalid_expectation() {
        let overrides = Overrides {
            expected: Some("latest".to_string()),
            ..Overrides::default()
        };

        let result = ProbeConfig::resolve(overrides, FileConfig::default(), no_env());

        assert!(matches!(result, Err(ConfigError::Expected(_))));
    }

    #[test]
    fn resolve_rejects_zero_timeout() {
        let overrides = Overrides {
            timeout_secs: Some(0),
            ..Overrides::default()
        };

        let result = ProbeConfig::resolve(overrides, FileConfig::default(), no_env());

        assert!(matches!(result, Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn resolve_applies_target_overrides() {
        let overrides = Overrides {
            url_path: Some("/status".to_string()),
            field_path: Some("app.version".to_string()),
            markup_tag: Some("span".to_string()),
            markup_attribute: Some("id".to_string()),
            markup_value: Some("app-version".to_string()),
            ..Overrides::default()
        };

        let config = ProbeConfig::resolve(overrides, FileConfig::default(), no_env()).unwrap();

        assert_eq!(config.target.url_path, "/status");
        assert_eq!(config.target.field_path, FieldPath::new(["app", "version"]));
        assert_eq!(
            config.target.markup,
            MarkupKey {
                tag: "span".to_string(),
                attribute: "id".to_string(),
                value: "app-version".to_string(),
            }
        );
        assert_eq!(config.target.default_port, 8983);
    }

    #[test]
    fn file_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<FileConfig>(json!({
            "host": "solr.internal",
            "expected": "7.1.0"
        }))
        .unwrap();

        assert_eq!(result.host.as_deref(), Some("solr.internal"));
        assert_eq!(result.expected.as_deref(), Some("7.1.0"));
        assert_eq!(result.port, None);
        assert_eq!(result.target, ProbeTarget::solr());
    }

    #[test]
    fn file_config_load_reads_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"port": 18983, "timeoutSecs": 3, "target": {{"software": "SolrCloud"}}}}"#
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();

        assert_eq!(config.port, Some(18983));
        assert_eq!(config.timeout_secs, Some(3));
        assert_eq!(config.target.software, "SolrCloud");
        assert_eq!(config.target.url_path, "/solr/admin/info/system");
    }

    #[test]
    fn file_config_load_reports_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(matches!(
            FileConfig::load(file.path()),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn file_config_load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            FileConfig::load(&dir.path().join("missing.json")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn load_config_file_requires_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");

        let result = load_config_file(Some(&missing), &dir.path().join("default.json"));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn load_config_file_without_default_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let loaded = load_config_file(None, &dir.path().join("config.json")).unwrap();

        assert_eq!(loaded.file, FileConfig::default());
        assert!(loaded.ignored.is_none());
    }

    #[test]
    fn load_config_file_reads_default_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"host": "solr.internal"}}"#).unwrap();

        let loaded = load_config_file(None, file.path()).unwrap();

        assert_eq!(loaded.file.host.as_deref(), Some("solr.internal"));
        assert!(loaded.ignored.is_none());
    }

    #[test]
    fn load_config_file_notes_broken_default_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "host = solr").unwrap();

        let loaded = load_config_file(None, file.path()).unwrap();

        assert_eq!(loaded.file, FileConfig::default());
        assert!(loaded.ignored.unwrap().starts_with("ignored invalid config file"));
    }

    #[test]
    fn config_dir_with_env_uses_xdg_config_home_when_set() {
        let path = config_dir_with_env(
            Some("/tmp/test-config".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-config/version-probe"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_home_config() {
        let path = config_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(path, PathBuf::from("/home/user/.config/version-probe"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = config_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./version-probe"));
    }
}
