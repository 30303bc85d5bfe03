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

//! Per resource family service façades.
//!
//! Every operation goes through [`Request`]: encode the payload, send it,
//! decode by status class and wrap any failure with the operation kind, the
//! service name and the addressed resource.

pub mod record;
pub mod zone;

use log::debug;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::Client;
use crate::envelope::{self, DecodeError, Envelope, ErrorPayload, RawResponse};
use crate::error::{Cause, Error, Operation, Target};
use crate::query::SuccessResponse;
use crate::utils::request::HttpClient;

/// One logical operation, ready to be dispatched.
pub(crate) struct Request<'a, P: ?Sized = ()> {
    service: &'static str,
    operation: Operation,
    method: Method,
    path: String,
    target: Target,
    payload: Option<&'a P>,
}

impl Request<'static> {
    pub fn new(service: &'static str, operation: Operation, method: Method, path: String, target: Target) -> Self {
        Self {
            service,
            operation,
            method,
            path,
            target,
            payload: None,
        }
    }

    pub fn payload<P: Serialize + ?Sized>(self, payload: &P) -> Request<'_, P> {
        Request {
            service: self.service,
            operation: self.operation,
            method: self.method,
            path: self.path,
            target: self.target,
            payload: Some(payload),
        }
    }
}

impl<P: Serialize + ?Sized> Request<'_, P> {
    /// Performs the round trip. The success slot is `None` when the API sent
    /// no body.
    pub fn dispatch<H, S>(&self, client: &Client<H>) -> Result<(RawResponse, Option<S>), Error>
    where
        H: HttpClient,
        S: DeserializeOwned,
    {
        let body = envelope::encode(self.payload).map_err(|e| self.fail(Cause::Encode(e), None))?;
        let response = client
            .send(self.method.clone(), &self.path, body)
            .map_err(|e| self.fail(Cause::Transport(e), None))?;

        let raw = RawResponse::from(&response);
        match envelope::decode::<S, ErrorPayload>(&response) {
            Ok(Envelope::Success(data)) => Ok((raw, data)),
            Ok(Envelope::Failure(payload)) => {
                let cause = match envelope::api_errors(response.status, payload) {
                    Ok(errors) => Cause::api(errors),
                    Err(e) => Cause::Decode(e),
                };
                Err(self.fail(cause, Some(raw)))
            }
            Err(e) => Err(self.fail(Cause::Decode(e), Some(raw))),
        }
    }

    /// Like [`Request::dispatch`] for calls whose answer must carry a body.
    pub fn fetch<H, S>(&self, client: &Client<H>) -> Result<(RawResponse, S), Error>
    where
        H: HttpClient,
        S: DeserializeOwned,
    {
        match self.dispatch(client)? {
            (raw, Some(data)) => Ok((raw, data)),
            (raw, None) => {
                let status = raw.status.as_u16();
                Err(self.fail(Cause::Decode(DecodeError::Empty { status }), Some(raw)))
            }
        }
    }

    /// Runs a mutating call. An empty body counts as success.
    pub fn execute<H: HttpClient>(&self, client: &Client<H>) -> Result<(RawResponse, SuccessResponse), Error> {
        let (raw, data) = self.dispatch::<H, SuccessResponse>(client)?;
        Ok((raw, data.unwrap_or_default()))
    }

    fn fail(&self, cause: Cause, response: Option<RawResponse>) -> Error {
        let error = Error::operation(self.operation, self.service, self.target.clone(), cause, response);
        debug!("{} {} failed: {error}", self.method, self.path);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::config::Config;
    use crate::utils::stub::StubHttpClient;

    fn client(stub: &StubHttpClient) -> Client<StubHttpClient> {
        let config = Config {
            token: Some("t".into()),
            ..Config::default()
        };
        Client::with_http_client(config, stub.clone()).unwrap()
    }

    fn read(path: &str) -> Request<'static> {
        Request::new("Zone", Operation::Read, Method::GET, path.to_string(), Target::Resource("z.".into()))
    }

    #[test]
    fn no_payload_sends_no_body() {
        let stub = StubHttpClient::default().reply(200, r#"{"a":1}"#);
        let (raw, data) = read("v3/zones/z.").fetch::<_, serde_json::Value>(&client(&stub)).unwrap();
        assert_eq!(raw.status, reqwest::StatusCode::OK);
        assert_eq!(data["a"], 1);
        assert!(stub.recorded()[0].body.is_none());
    }

    #[test]
    fn payload_is_json_encoded() {
        let stub = StubHttpClient::default().reply(201, r#"{"message":"Successful"}"#);
        let payload = serde_json::json!({"properties": {"name": "z."}});
        let (_, success) = Request::new("Zone", Operation::Create, Method::POST, "v3/zones".into(), Target::Resource("z.".into()))
            .payload(&payload)
            .execute(&client(&stub))
            .unwrap();
        assert_eq!(success.message, "Successful");
        assert_eq!(stub.recorded()[0].body.as_deref(), Some(r#"{"properties":{"name":"z."}}"#));
    }

    #[test]
    fn empty_success_body_is_fine_for_mutations() {
        let stub = StubHttpClient::default().reply(204, "");
        let request = Request::new("Zone", Operation::Delete, Method::DELETE, "v3/zones/z.".into(), Target::Resource("z.".into()));
        let (raw, success) = request.execute(&client(&stub)).unwrap();
        assert_eq!(raw.status, reqwest::StatusCode::NO_CONTENT);
        assert_eq!(success, SuccessResponse::default());
    }

    #[test]
    fn empty_success_body_is_a_decode_error_for_reads() {
        let stub = StubHttpClient::default().reply(200, "");
        let err = read("v3/zones/z.").fetch::<_, serde_json::Value>(&client(&stub)).unwrap_err();
        assert_eq!(err.to_string(), "error while reading zone - z. : empty response body (status 200)");
        assert!(err.raw_response().is_some());
    }

    #[test]
    fn api_error_keeps_raw_response() {
        let stub = StubHttpClient::default().reply(404, r#"[{"errorCode":1801,"errorMessage":"Zone does not exist in the system."}]"#);
        let err = read("v3/zones/z.").fetch::<_, serde_json::Value>(&client(&stub)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "error while reading zone - z. : error code : 1801 - error message : Zone does not exist in the system."
        );
        assert_eq!(err.raw_response().unwrap().status, reqwest::StatusCode::NOT_FOUND);
        assert!(err.is_not_found());
    }

    #[test]
    fn malformed_success_body_is_surfaced() {
        let stub = StubHttpClient::default().reply(200, "{not json");
        let err = read("v3/zones/z.").fetch::<_, serde_json::Value>(&client(&stub)).unwrap_err();
        assert!(matches!(err.cause(), Some(Cause::Decode(DecodeError::Malformed { status: 200, .. }))));
    }

    #[test]
    fn transport_error_is_wrapped_without_response() {
        let stub = StubHttpClient::default();
        let err = read("v3/zones/z.").fetch::<_, serde_json::Value>(&client(&stub)).unwrap_err();
        assert_eq!(err.to_string(), "error while reading zone - z. : connection refused");
        assert!(err.is_transport());
        assert!(err.raw_response().is_none());
        assert!(!err.is_not_found());
    }
}
