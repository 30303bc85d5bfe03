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

pub mod auth;
pub mod config;

use std::fmt;

use log::{debug, trace};
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};

use url::Url;

use crate::utils::request::{DefaultHttpClient, HttpClient, HttpResponse, TransportError};
use config::{Config, ConfigError};

/// Authenticated handle on the management API.
///
/// Immutable once built. Share it between services with an `Arc`.
pub struct Client<H: HttpClient = DefaultHttpClient> {
    /// HTTP client for making requests
    http_client: H,
    /// API endpoint, without a trailing slash
    base_url: String,
    /// Sent with every request
    headers: HeaderMap,
}

impl Client {
    /// Validates `config`, builds a `reqwest` client with the configured timeout
    /// and authenticates.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let url = config.validate()?;
        let http_client = DefaultHttpClient::with_timeout(config.timeout).map_err(ConfigError::HttpClient)?;
        Self::connect(config, &url, http_client)
    }
}

impl<H: HttpClient> Client<H> {
    /// Same as [`Client::new`] over a caller supplied transport.
    pub fn with_http_client(config: Config, http_client: H) -> Result<Self, ConfigError> {
        let url = config.validate()?;
        Self::connect(config, &url, http_client)
    }

    /// Builds the fixed headers and authenticates against an already validated `url`.
    fn connect(config: Config, url: &Url, http_client: H) -> Result<Self, ConfigError> {
        let base_url = url.as_str().trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|source| ConfigError::InvalidHeader {
                name: "user agent",
                source,
            })?,
        );

        let token = match config.token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => auth::password_grant(&http_client, &base_url, &headers, &config.username, &config.password)?.access_token,
        };
        let mut bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|source| ConfigError::InvalidHeader { name: "token", source })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        debug!("client ready for {base_url}");
        Ok(Self {
            http_client,
            base_url,
            headers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        self.headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    /// Performs one round trip to `<base url>/<path>`.
    ///
    /// Transport failures are returned as they are. Status codes are not
    /// interpreted here.
    pub fn send(&self, method: Method, path: &str, body: Option<String>) -> Result<HttpResponse, TransportError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("{method} {url}");
        if let Some(body) = &body {
            trace!("request body: {body}");
        }

        let response = self.http_client.request(method, url, self.headers.clone(), body)?;

        debug!("{} from {}", response.status, response.url);
        trace!("response body: {}", response.body);
        Ok(response)
    }
}

impl<H: HttpClient> fmt::Debug for Client<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent())
            .finish_non_exhaustive()
    }
}
