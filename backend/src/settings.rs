//! Environment-driven application settings.
//!
//! Values are read through [`mockable::Env`] so parsing is testable without
//! touching the process environment.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::NewAccount;

const BIND_ADDR_ENV: &str = "BIND_ADDR";
const SWEEP_SECS_ENV: &str = "VERIFICATION_SWEEP_SECS";
const EXPOSE_CODE_ENV: &str = "VERIFICATION_EXPOSE_CODE";
const SEED_ACCOUNTANT_ENV: &str = "SEED_TAX_ACCOUNTANT";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SWEEP_SECS: u64 = 30;

const ADDR_EXPECTED: &str = "host:port socket address";
const SECS_EXPECTED: &str = "positive whole number of seconds";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SEED_EXPECTED: &str = "username:email:password:name";

/// Build mode used to pick defaults.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Development builds echo verification codes by default.
    Debug,
    /// Release builds keep codes server-side unless told otherwise.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Credentials for a tax accountant created at startup.
#[derive(Clone)]
pub struct SeedAccountant {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password, hashed on provisioning.
    pub password: Zeroizing<String>,
    /// Display name.
    pub name: String,
}

impl SeedAccountant {
    /// Convert into an account ready for provisioning.
    #[must_use]
    pub fn to_account(&self) -> NewAccount {
        NewAccount::tax_accountant(&self.username, &self.email, &self.password, &self.name)
    }
}

impl fmt::Debug for SeedAccountant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedAccountant")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}

/// Process-wide settings.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Socket the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Period of the expired verification code sweep.
    pub sweep_period: Duration,
    /// Echo issued verification codes to the caller.
    pub expose_verification_code: bool,
    /// Optional accountant account created at startup.
    pub seed_accountant: Option<SeedAccountant>,
}

/// Errors raised while reading settings.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Raw value as read.
        value: String,
        /// Accepted format.
        expected: &'static str,
    },
}

/// Read settings from `env`.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use taxdesk::settings::{BuildMode, settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "BIND_ADDR" => Some("127.0.0.1:9000".to_owned()),
///     _ => None,
/// });
///
/// let settings = settings_from_env(&env, BuildMode::Release).unwrap();
/// assert_eq!(settings.bind_addr.port(), 9000);
/// assert!(!settings.expose_verification_code);
/// ```
pub fn settings_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<AppSettings, ConfigError> {
    Ok(AppSettings {
        bind_addr: bind_addr_from_env(env)?,
        sweep_period: sweep_period_from_env(env)?,
        expose_verification_code: expose_code_from_env(env, mode)?,
        seed_accountant: seed_accountant_from_env(env)?,
    })
}

fn bind_addr_from_env<E: Env>(env: &E) -> Result<SocketAddr, ConfigError> {
    let value = env
        .string(BIND_ADDR_ENV)
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    value.parse().map_err(|_| ConfigError::InvalidEnv {
        name: BIND_ADDR_ENV,
        value,
        expected: ADDR_EXPECTED,
    })
}

fn sweep_period_from_env<E: Env>(env: &E) -> Result<Duration, ConfigError> {
    let Some(value) = env.string(SWEEP_SECS_ENV) else {
        return Ok(Duration::from_secs(DEFAULT_SWEEP_SECS));
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidEnv {
            name: SWEEP_SECS_ENV,
            value,
            expected: SECS_EXPECTED,
        }),
    }
}

fn expose_code_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, ConfigError> {
    let Some(value) = env.string(EXPOSE_CODE_ENV) else {
        return Ok(mode.is_debug());
    };
    let Some(flag) = parse_bool(&value) else {
        return Err(ConfigError::InvalidEnv {
            name: EXPOSE_CODE_ENV,
            value,
            expected: BOOL_EXPECTED,
        });
    };
    if flag && !mode.is_debug() {
        warn!("VERIFICATION_EXPOSE_CODE enabled in a release build");
    }
    Ok(flag)
}

fn seed_accountant_from_env<E: Env>(env: &E) -> Result<Option<SeedAccountant>, ConfigError> {
    let Some(value) = env.string(SEED_ACCOUNTANT_ENV) else {
        return Ok(None);
    };
    let parts: Vec<&str> = value.split(':').map(str::trim).collect();
    match parts.as_slice() {
        [username, email, password, name]
            if parts.iter().all(|part| !part.is_empty()) && email.contains('@') =>
        {
            Ok(Some(SeedAccountant {
                username: (*username).to_owned(),
                email: (*email).to_owned(),
                password: Zeroizing::new((*password).to_owned()),
                name: (*name).to_owned(),
            }))
        }
        // The raw value carries a password; never echo it.
        _ => Err(ConfigError::InvalidEnv {
            name: SEED_ACCOUNTANT_ENV,
            value: "<redacted>".to_owned(),
            expected: SEED_EXPECTED,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
