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

use log::{debug, warn};
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::client::config::ConfigError;
use crate::envelope::{self, DecodeError, Envelope, ErrorPayload};
use crate::error::Cause;
use crate::utils::request::HttpClient;

pub(crate) const TOKEN_PATH: &str = "v3/authorization/token";

/// Access token issued by the password grant.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<String>,
    #[serde(rename = "tokenType", default)]
    pub token_type: Option<String>,
    /// Sent as a string by some API versions and as a number by others.
    #[serde(rename = "expiresIn", default)]
    pub expires_in: Option<Value>,
}

/// Exchanges username and password for an access token.
pub(crate) fn password_grant<H: HttpClient>(
    http_client: &H,
    base_url: &str,
    headers: &HeaderMap,
    username: &str,
    password: &str,
) -> Result<Token, ConfigError> {
    let body = form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "password")
        .append_pair("username", username)
        .append_pair("password", password)
        .finish();

    let mut headers = headers.clone();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/x-www-form-urlencoded"));

    debug!("requesting access token for {username}");
    let response = http_client
        .request(Method::POST, format!("{base_url}/{TOKEN_PATH}"), headers, Some(body))
        .map_err(|e| ConfigError::Authentication(Cause::Transport(e)))?;

    let status = response.status;
    match envelope::decode::<Token, ErrorPayload>(&response) {
        Ok(Envelope::Success(Some(token))) => Ok(token),
        Ok(Envelope::Success(None)) => Err(ConfigError::Authentication(Cause::Decode(DecodeError::Empty {
            status: status.as_u16(),
        }))),
        Ok(Envelope::Failure(payload)) => {
            let errors = envelope::api_errors(status, payload)
                .map_err(|e| ConfigError::Authentication(Cause::Decode(e)))?;
            warn!("authentication for {username} rejected with status {status}");
            Err(ConfigError::Authentication(Cause::api(errors)))
        }
        Err(e) => Err(ConfigError::Authentication(Cause::Decode(e))),
    }
}
