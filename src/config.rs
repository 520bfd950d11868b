//! Configuration management for the saslauthd client
//!
//! Configuration is resolved at the caller boundary and handed to the
//! verifier explicitly; the library itself never reads the environment.

use config::{Config, Environment, File, Map};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Socket used when no runtime directory is configured
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/saslauthd/mux";

/// Socket file name inside the daemon's runtime directory.
/// Some saslauthd builds may name it differently; `socket_path` overrides it.
pub const SOCKET_NAME: &str = "mux";

/// Optional config file looked up in the working directory
const CONFIG_FILE: &str = "saslauthd-verify";

/// Client configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClientConfig {
    /// Explicit socket path, overrides everything else
    /// Environment: SADV_SOCKET_PATH
    #[serde(default)]
    pub socket_path: Option<PathBuf>,

    /// saslauthd runtime directory holding the mux socket
    /// Environment: PATH_SASLAUTHD_RUNDIR
    #[serde(default)]
    pub rundir: Option<String>,

    /// Service name sent when the caller passes none
    /// Environment: SADV_SERVICE
    #[serde(default)]
    pub service: Option<String>,

    /// Caller-side deadline for the whole transaction
    /// Environment: SADV_TIMEOUT_SECS
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Load from the optional config file with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(File::with_name(CONFIG_FILE).required(false), None)
    }

    /// Load from an explicit config file with environment overrides
    pub fn from_file(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(File::from(path), None)
    }

    /// `env` replaces the process environment when set
    fn build<S>(file: S, env: Option<Map<String, String>>) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("SADV").source(env.clone()))
            .add_source(Environment::with_prefix("PATH_SASLAUTHD").source(env))
            .build()?;
        let config: ClientConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.timeout_secs == Some(0) {
            return Err(config::ConfigError::Message(
                "timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Socket path for one verification call
    pub fn resolve_socket_path(&self) -> PathBuf {
        resolve_socket_path(self.socket_path.as_deref(), self.rundir.as_deref())
    }

    /// Configured service, if any
    pub fn service(&self) -> &str {
        self.service.as_deref().unwrap_or_default()
    }

    /// Get transaction timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Pick the daemon socket: explicit path, then `<rundir>/mux`, then the default.
/// Empty values count as unset.
pub fn resolve_socket_path(explicit: Option<&Path>, rundir: Option<&str>) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return path.to_path_buf();
    }
    match rundir.filter(|dir| !dir.is_empty()) {
        Some(dir) => Path::new(dir).join(SOCKET_NAME),
        None => PathBuf::from(DEFAULT_SOCKET_PATH),
    }
}

/// Credentials the command-line wrapper reads from SASLUSER / SASLPASS
#[derive(Debug, Deserialize, Clone, Default)]
pub struct EnvCredentials {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub pass: String,
}

impl EnvCredentials {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_env(None)
    }

    fn from_env(env: Option<Map<String, String>>) -> Result<Self, config::ConfigError> {
        Config::builder()
            .add_source(
                Environment::with_prefix("SASL")
                    .prefix_separator("")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn rundir_gets_mux_appended() {
        assert_eq!(
            resolve_socket_path(None, Some("/tmp/x")),
            PathBuf::from("/tmp/x/mux")
        );
    }

    #[test]
    fn no_configuration_uses_default() {
        assert_eq!(
            resolve_socket_path(None, None),
            PathBuf::from(DEFAULT_SOCKET_PATH)
        );
        assert_eq!(
            resolve_socket_path(Some(Path::new("")), Some("")),
            PathBuf::from(DEFAULT_SOCKET_PATH)
        );
    }

    #[test]
    fn explicit_path_overrides_everything() {
        let explicit = Path::new("/run/custom.sock");
        assert_eq!(resolve_socket_path(Some(explicit), Some("/tmp/x")), explicit);
        assert_eq!(resolve_socket_path(Some(explicit), None), explicit);
    }

    #[test]
    fn config_resolves_through_same_rules() {
        let config = ClientConfig {
            rundir: Some("/run/saslauthd".into()),
            ..ClientConfig::default()
        };
        assert_eq!(
            config.resolve_socket_path(),
            PathBuf::from("/run/saslauthd/mux")
        );
        assert_eq!(config.service(), "");
        assert_eq!(config.timeout(), None);
    }

    fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn no_file() -> impl config::Source + Send + Sync + 'static {
        File::with_name("does-not-exist/saslauthd-verify").required(false)
    }

    #[test]
    fn loads_from_toml_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            "socket_path = \"/srv/sasl/mux\"\nservice = \"smtp\"\ntimeout_secs = 5"
        )
        .unwrap();

        let config = ClientConfig::build(File::from(file.path()), env(&[])).unwrap();
        assert_eq!(config.resolve_socket_path(), PathBuf::from("/srv/sasl/mux"));
        assert_eq!(config.service(), "smtp");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "timeout_secs = 0").unwrap();
        assert!(ClientConfig::build(File::from(file.path()), env(&[])).is_err());
    }

    #[test]
    fn rundir_variable_selects_mux_socket() {
        let config = ClientConfig::build(
            no_file(),
            env(&[
                ("PATH_SASLAUTHD_RUNDIR", "/tmp/x"),
                ("SADV_TIMEOUT_SECS", "7"),
                ("SADV_SERVICE", "smtp"),
                ("PATH", "/usr/bin"),
            ]),
        )
        .unwrap();
        assert_eq!(config.rundir.as_deref(), Some("/tmp/x"));
        assert_eq!(config.resolve_socket_path(), PathBuf::from("/tmp/x/mux"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(7)));
        assert_eq!(config.service(), "smtp");
    }

    #[test]
    fn socket_path_variable_beats_rundir() {
        let config = ClientConfig::build(
            no_file(),
            env(&[
                ("PATH_SASLAUTHD_RUNDIR", "/tmp/x"),
                ("SADV_SOCKET_PATH", "/run/custom.sock"),
            ]),
        )
        .unwrap();
        assert_eq!(config.resolve_socket_path(), PathBuf::from("/run/custom.sock"));
    }

    #[test]
    fn empty_environment_uses_default_socket() {
        let config = ClientConfig::build(no_file(), env(&[])).unwrap();
        assert_eq!(config.resolve_socket_path(), PathBuf::from(DEFAULT_SOCKET_PATH));
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn environment_overrides_file() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "timeout_secs = 5").unwrap();
        let config =
            ClientConfig::build(File::from(file.path()), env(&[("SADV_TIMEOUT_SECS", "9")]))
                .unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(9)));
    }

    #[test]
    fn credentials_come_from_sasluser_and_saslpass() {
        let creds = EnvCredentials::from_env(env(&[
            ("SASLUSER", "alice"),
            ("SASLPASS", "pw"),
            ("HOME", "/root"),
        ]))
        .unwrap();
        assert_eq!(creds.user, "alice");
        assert_eq!(creds.pass, "pw");

        let missing = EnvCredentials::from_env(env(&[])).unwrap();
        assert!(missing.user.is_empty());
        assert!(missing.pass.is_empty());
    }
}
