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

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Failure to complete a single request/response cycle.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Custom(Box<dyn std::error::Error + Send + Sync>),
}

/// A fully read HTTP response.
///
/// The body has been drained and the connection released by the time a value
/// of this type exists.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub url: String,
    pub body: String,
}

/// Performs exactly one blocking round trip.
pub trait HttpClient: Send + Sync {
    fn request(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<HttpResponse, TransportError>;
}

/// `reqwest` backed implementation used by default.
#[derive(Debug, Clone)]
pub struct DefaultHttpClient {
    inner: Client,
}

impl DefaultHttpClient {
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let inner = Client::builder().timeout(timeout).build()?;
        Ok(Self { inner })
    }
}

impl HttpClient for DefaultHttpClient {
    fn request(
        &self,
        method: Method,
        url: String,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<HttpResponse, TransportError> {
        let mut req = self.inner.request(method, url).headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }
        let response = req.send()?;

        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().to_string();
        // `text` consumes the response, so the body stream is closed on both
        // the success and the error path.
        let body = response.text()?;

        Ok(HttpResponse {
            status,
            headers,
            url,
            body,
        })
    }
}
