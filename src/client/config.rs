// Copyright 2023 rust-dns-sdk authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::fmt;
use std::time::Duration;

use reqwest::header::InvalidHeaderValue;
use thiserror::Error;
use ultradns_macros::require_fields;
use url::Url;

use crate::error::Cause;

pub const DEFAULT_HOST_URL: &str = "https://api.ultradns.com";
pub const DEFAULT_USER_AGENT: &str = concat!("ultradns-rust-sdk/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_USERNAME: &str = "ULTRADNS_USERNAME";
const ENV_PASSWORD: &str = "ULTRADNS_PASSWORD";
const ENV_TOKEN: &str = "ULTRADNS_TOKEN";
const ENV_HOST_URL: &str = "ULTRADNS_HOST_URL";
const ENV_USER_AGENT: &str = "ULTRADNS_USER_AGENT";
const ENV_TIMEOUT_SECS: &str = "ULTRADNS_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config validation failure: {0} is missing")]
    Missing(&'static str),

    #[error("config validation failure: host url is invalid : {0}")]
    InvalidHostUrl(#[source] url::ParseError),

    #[error("config validation failure: host url scheme {0} is not supported")]
    UnsupportedScheme(String),

    #[error("config validation failure: timeout {0} is invalid")]
    InvalidTimeout(String),

    #[error("config validation failure: {name} is not a valid header value")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: InvalidHeaderValue,
    },

    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("unable to build http client : {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("authentication failure : {0}")]
    Authentication(#[source] Cause),
}

/// Connection settings for the management API.
///
/// Either `token` or the `username`/`password` pair must be present. With no
/// token the client performs a password grant when it is constructed.
#[derive(Clone)]
pub struct Config {
    pub username: String,
    pub password: String,
    pub token: Option<String>,
    pub host_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            token: None,
            host_url: DEFAULT_HOST_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("host_url", &self.host_url)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reads the `ULTRADNS_*` environment variables on top of the defaults.
    /// The result is not validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();
        for (var, key) in [
            (ENV_USERNAME, "username"),
            (ENV_PASSWORD, "password"),
            (ENV_TOKEN, "token"),
            (ENV_HOST_URL, "host_url"),
            (ENV_USER_AGENT, "user_agent"),
            (ENV_TIMEOUT_SECS, "timeout"),
        ] {
            if let Ok(value) = std::env::var(var) {
                builder = builder.set_param(key, &value)?;
            }
        }
        Ok(builder.config)
    }

    /// True when a non-blank bearer token was supplied.
    pub fn has_token(&self) -> bool {
        require_fields!(self, { token: Option => "token" }).is_ok()
    }

    /// Checks the required fields and returns the parsed host url.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        require_fields!(self, { host_url: String => "host url" }).map_err(ConfigError::Missing)?;

        if !self.has_token() {
            require_fields!(self, {
                username: String => "username",
                password: String => "password",
            })
            .map_err(ConfigError::Missing)?;
        }

        let url = Url::parse(self.host_url.trim()).map_err(ConfigError::InvalidHostUrl)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Sets a configuration parameter by name.
    ///
    /// Supported keys:
    /// - "username"
    /// - "password"
    /// - "token"
    /// - "host_url"
    /// - "user_agent"
    /// - "timeout" (whole seconds)
    pub fn set_param(mut self, key: &str, value: &str) -> Result<Self, ConfigError> {
        match key {
            "username" => self.config.username = value.into(),
            "password" => self.config.password = value.into(),
            "token" => self.config.token = Some(value.into()),
            "host_url" => self.config.host_url = value.into(),
            "user_agent" => self.config.user_agent = value.into(),
            "timeout" => {
                let secs: u64 = value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(value.to_string()))?;
                self.config.timeout = Duration::from_secs(secs);
            }
            _ => return Err(ConfigError::UnknownParameter(key.to_string())),
        }
        Ok(self)
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
