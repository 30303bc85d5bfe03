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

//! Wire encoding of request payloads and status driven decoding of responses.
//!
//! The API answers with differently shaped JSON for success and failure, so the
//! decode target is picked from the status class and never sniffed from the body.

use std::fmt;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::request::HttpResponse;

/// Outcome of decoding one response. Exactly one slot is populated per call.
#[derive(Debug)]
pub enum Envelope<S, E> {
    /// 2xx response. `None` when the body was empty.
    Success(Option<S>),
    /// Any other status.
    Failure(E),
}

/// Response metadata handed back to callers next to the decoded payload.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub url: String,
}

impl From<&HttpResponse> for RawResponse {
    fn from(response: &HttpResponse) -> Self {
        Self {
            status: response.status,
            headers: response.headers.clone(),
            url: response.url.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed response body (status {status}) : {source}")]
    Malformed {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("empty response body (status {status})")]
    Empty { status: u16 },

    #[error("error response without error details (status {status})")]
    NoDetails { status: u16 },
}

/// Remote error code. The code space is not known up front, so both numeric and
/// textual codes are kept as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(i64),
    Text(String),
}

impl ErrorCode {
    pub fn as_number(&self) -> Option<i64> {
        match self {
            ErrorCode::Number(n) => Some(*n),
            ErrorCode::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Number(n) => write!(f, "{n}"),
            ErrorCode::Text(s) => f.write_str(s),
        }
    }
}

/// One entry of a remote error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(rename = "errorCode")]
    pub error_code: ErrorCode,
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,
}

/// Error body as sent by the API: a lone object or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorPayload {
    Many(Vec<ApiError>),
    One(ApiError),
}

impl ErrorPayload {
    pub fn into_errors(self) -> Vec<ApiError> {
        match self {
            ErrorPayload::Many(errors) => errors,
            ErrorPayload::One(error) => vec![error],
        }
    }
}

/// Serializes a request payload. An absent payload yields no body.
pub fn encode<P: Serialize + ?Sized>(payload: Option<&P>) -> Result<Option<String>, serde_json::Error> {
    payload.map(serde_json::to_string).transpose()
}

/// Decodes `response` into the success slot for 2xx statuses and into the
/// error slot otherwise.
pub fn decode<S, E>(response: &HttpResponse) -> Result<Envelope<S, E>, DecodeError>
where
    S: DeserializeOwned,
    E: DeserializeOwned,
{
    let status = response.status.as_u16();
    let body = response.body.trim();

    if response.status.is_success() {
        if body.is_empty() {
            return Ok(Envelope::Success(None));
        }
        let data = serde_json::from_str(body).map_err(|source| DecodeError::Malformed { status, source })?;
        return Ok(Envelope::Success(Some(data)));
    }

    if body.is_empty() {
        return Err(DecodeError::Empty { status });
    }
    let error = serde_json::from_str(body).map_err(|source| DecodeError::Malformed { status, source })?;
    Ok(Envelope::Failure(error))
}

/// Decodes a failure body into its non-empty list of remote errors.
pub fn api_errors(status: StatusCode, payload: ErrorPayload) -> Result<Vec<ApiError>, DecodeError> {
    let errors = payload.into_errors();
    if errors.is_empty() {
        return Err(DecodeError::NoDetails {
            status: status.as_u16(),
        });
    }
    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Message {
        message: String,
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            url: "https://api.ultradns.com/v3/zones".to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn absent_payload_encodes_to_no_body() {
        assert_eq!(encode::<()>(None).unwrap(), None);
    }

    #[test]
    fn payload_encodes_to_json() {
        let body = encode(Some(&serde_json::json!({"ttl": 300}))).unwrap();
        assert_eq!(body.as_deref(), Some(r#"{"ttl":300}"#));
    }

    #[test]
    fn success_status_fills_success_slot() {
        let decoded = decode::<Message, ErrorPayload>(&response(201, r#"{"message":"Successful"}"#)).unwrap();
        match decoded {
            Envelope::Success(Some(m)) => assert_eq!(m.message, "Successful"),
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[test]
    fn empty_success_body_is_absent_payload() {
        let decoded = decode::<Message, ErrorPayload>(&response(204, "")).unwrap();
        assert!(matches!(decoded, Envelope::Success(None)));
    }

    #[test]
    fn error_status_fills_error_slot_even_when_shape_matches_success() {
        let decoded =
            decode::<serde_json::Value, ErrorPayload>(&response(404, r#"[{"errorCode":1801,"errorMessage":"Zone does not exist in the system."}]"#))
                .unwrap();
        match decoded {
            Envelope::Failure(payload) => {
                let errors = payload.into_errors();
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].error_code, ErrorCode::Number(1801));
            }
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[test]
    fn single_object_error_body_is_accepted() {
        let decoded = decode::<Message, ErrorPayload>(&response(400, r#"{"errorCode":"E42","errorMessage":"bad"}"#)).unwrap();
        let Envelope::Failure(payload) = decoded else {
            panic!("expected failure slot");
        };
        let errors = payload.into_errors();
        assert_eq!(errors[0].error_code, ErrorCode::Text("E42".to_string()));
        assert_eq!(errors[0].error_code.to_string(), "E42");
    }

    #[test]
    fn malformed_success_body_is_surfaced() {
        let err = decode::<Message, ErrorPayload>(&response(200, "<html>")).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { status: 200, .. }));
    }

    #[test]
    fn empty_error_body_is_surfaced() {
        let err = decode::<Message, ErrorPayload>(&response(502, "  ")).unwrap_err();
        assert!(matches!(err, DecodeError::Empty { status: 502 }));
    }

    #[test]
    fn empty_error_list_has_no_details() {
        let err = api_errors(StatusCode::BAD_REQUEST, ErrorPayload::Many(Vec::new())).unwrap_err();
        assert_eq!(err.to_string(), "error response without error details (status 400)");
    }

    #[test]
    fn textual_numeric_code_converts() {
        assert_eq!(ErrorCode::Text(" 70002".to_string()).as_number(), Some(70002));
        assert_eq!(ErrorCode::Text("invalid_grant".to_string()).as_number(), None);
    }
}
