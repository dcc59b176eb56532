//! Site configuration.
//!
//! Loaded once at startup and passed down by value; nothing reads the
//! environment after that. Sources, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `WEBHOOK_SECRET`
//! 3. `TIMS_*` variables (`TIMS_BIND_ADDR`, `TIMS_DEPLOY_SCRIPT`, ...)
//!
//! A `.env` file in the working directory is folded into the process
//! environment first by [`load_dotenv`], without overriding variables that
//! are already set.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Serialized};
use figment::Figment;
use secrecy::{ExposeSecret, SecretString};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Placeholder secret used when `WEBHOOK_SECRET` is unset. Never acceptable
/// in production.
pub const DEFAULT_WEBHOOK_SECRET: &str = "change-me-in-production";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";
pub const DEFAULT_DEPLOY_SCRIPT: &str = "deploy.sh";
pub const DEFAULT_DEPLOY_SHELL: &str = "bash";
pub const DEFAULT_STATIC_DIR: &str = "static";

pub const ENV_WEBHOOK_SECRET: &str = "WEBHOOK_SECRET";
pub const ENV_PREFIX: &str = "TIMS_";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error from the Figment configuration library.
    #[error("configuration error: {0}")]
    Figment(Box<figment::Error>),

    #[error("cannot determine installation directory: {0}")]
    InstallDir(#[source] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Raw settings as extracted from the providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct Settings {
    #[serde(deserialize_with = "scalar_string")]
    webhook_secret: Option<String>,
    bind_addr: SocketAddr,
    deploy_script: PathBuf,
    deploy_shell: String,
    static_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = SiteConfig::default();
        Self {
            webhook_secret: None,
            bind_addr: defaults.bind_addr,
            deploy_script: defaults.deploy_script,
            deploy_shell: defaults.deploy_shell,
            static_dir: defaults.static_dir,
        }
    }
}

/// Env values are parsed before extraction, so a purely numeric secret
/// arrives as a number. Accept any scalar and keep its text.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or number")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_owned()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}

/// Site configuration.
#[derive(Debug)]
pub struct SiteConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,
    /// Shared secret for webhook signatures.
    webhook_secret: SecretString,
    /// Whether `webhook_secret` is the placeholder.
    default_secret: bool,
    /// Deployment script, relative paths resolve against the install dir.
    pub deploy_script: PathBuf,
    /// Interpreter the script runs under.
    pub deploy_shell: String,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

impl SiteConfig {
    /// Creates a configuration with the given secret and defaults elsewhere.
    pub fn new(webhook_secret: impl Into<String>) -> Self {
        let secret: String = webhook_secret.into();
        Self {
            webhook_secret: SecretString::from(secret),
            default_secret: false,
            ..Self::default()
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Env::raw().only(&[ENV_WEBHOOK_SECRET]))
            .merge(Env::prefixed(ENV_PREFIX));
        Self::from_figment(&figment)
    }

    /// Extract from an already assembled figment. An empty secret counts as
    /// unset.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let settings: Settings = figment.extract()?;

        let (webhook_secret, default_secret) = match settings.webhook_secret {
            Some(secret) if !secret.is_empty() => (secret, false),
            _ => (DEFAULT_WEBHOOK_SECRET.to_string(), true),
        };

        Ok(Self {
            bind_addr: settings.bind_addr,
            webhook_secret: SecretString::from(webhook_secret),
            default_secret,
            deploy_script: settings.deploy_script,
            deploy_shell: settings.deploy_shell,
            static_dir: settings.static_dir,
        })
    }

    /// Sets the bind address.
    #[must_use]
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Sets the deployment script path.
    #[must_use]
    pub fn with_deploy_script(mut self, script: impl Into<PathBuf>) -> Self {
        self.deploy_script = script.into();
        self
    }

    /// Sets the interpreter used to run the script.
    #[must_use]
    pub fn with_deploy_shell(mut self, shell: impl Into<String>) -> Self {
        self.deploy_shell = shell.into();
        self
    }

    /// Sets the static asset directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    /// Shared secret for webhook signatures. Wrapped so it stays out of
    /// `Debug` output and logs.
    pub fn webhook_secret(&self) -> &SecretString {
        &self.webhook_secret
    }

    /// True when the placeholder secret is in use.
    pub fn uses_default_secret(&self) -> bool {
        self.default_secret
    }

    /// Resolve the deployment script against `install_dir`.
    ///
    /// Absolute paths are used as is.
    pub fn deploy_script_in(&self, install_dir: &Path) -> PathBuf {
        if self.deploy_script.is_absolute() {
            self.deploy_script.clone()
        } else {
            install_dir.join(&self.deploy_script)
        }
    }

    /// Copy of the secret for handing to the verifier.
    pub(crate) fn secret_copy(&self) -> SecretString {
        SecretString::from(self.webhook_secret.expose_secret().to_owned())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5001)),
            webhook_secret: SecretString::from(DEFAULT_WEBHOOK_SECRET.to_string()),
            default_secret: true,
            deploy_script: PathBuf::from(DEFAULT_DEPLOY_SCRIPT),
            deploy_shell: DEFAULT_DEPLOY_SHELL.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

/// Fold a `.env` file from the working directory (or a parent) into the
/// process environment. Variables that are already set keep their values.
///
/// A missing file is normal; any other failure is logged and ignored.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded .env file");
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            warn!(error = %e, "failed to load .env file");
            None
        }
    }
}

/// Directory containing the running executable.
pub fn install_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::InstallDir)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        ConfigError::InstallDir(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "executable has no parent directory",
        ))
    })
}
