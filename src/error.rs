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

use thiserror::Error as ThisError;

use crate::client::config::ConfigError;
use crate::envelope::{ApiError, DecodeError, ErrorCode, RawResponse};
use crate::utils::request::TransportError;

/// Remote codes that mean the addressed resource does not exist.
const NOT_FOUND_CODES: [i64; 3] = [1801, 56001, 70002];

/// The verb an operation error is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    PartialUpdate,
    Read,
    Delete,
    List,
}

impl Operation {
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Create => "creating",
            Operation::Update => "updating",
            Operation::PartialUpdate => "partial updating",
            Operation::Read => "reading",
            Operation::Delete => "deleting",
            Operation::List => "listing",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// What a failed operation was addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A single resource, by identifier. The identifier may be empty.
    Resource(String),
    /// A collection, by the full path and query string that was requested.
    Listing(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Resource(id) => write!(f, " - {id}"),
            Target::Listing(path) => write!(f, " : path and query params - {path}"),
        }
    }
}

/// Underlying reason an operation failed.
#[derive(Debug, ThisError)]
pub enum Cause {
    /// The API answered with a non-2xx status and an error body. `code` and
    /// `message` are those of the first reported error, `details` holds all of them.
    #[error("error code : {code} - error message : {message}")]
    Api {
        code: ErrorCode,
        message: String,
        details: Vec<ApiError>,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("request encoding failure : {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl Cause {
    /// Builds an `Api` cause from a non-empty list of remote errors.
    pub fn api(details: Vec<ApiError>) -> Self {
        let (code, message) = details
            .first()
            .map(|e| (e.error_code.clone(), e.error_message.clone()))
            .unwrap_or_else(|| (ErrorCode::Text(String::new()), String::new()));
        Cause::Api {
            code,
            message,
            details,
        }
    }
}

#[derive(Debug, ThisError)]
pub enum Error {
    /// A service could not be constructed from its configuration.
    #[error("config error while creating {service} service : {source}")]
    Config {
        service: &'static str,
        #[source]
        source: ConfigError,
    },

    /// A service was used without being attached to a live client.
    #[error("{service} service is not properly configured")]
    NotConfigured { service: &'static str },

    #[error("error while {operation} {}{target} : {cause}", .service.to_lowercase())]
    Operation {
        operation: Operation,
        service: &'static str,
        target: Target,
        #[source]
        cause: Cause,
        response: Option<Box<RawResponse>>,
    },
}

impl Error {
    pub fn config(service: &'static str, source: ConfigError) -> Self {
        Error::Config { service, source }
    }

    pub fn not_configured(service: &'static str) -> Self {
        Error::NotConfigured { service }
    }

    pub fn operation(
        operation: Operation,
        service: &'static str,
        target: Target,
        cause: Cause,
        response: Option<RawResponse>,
    ) -> Self {
        Error::Operation {
            operation,
            service,
            target,
            cause,
            response: response.map(Box::new),
        }
    }

    /// Name of the service that produced the error.
    pub fn service(&self) -> &'static str {
        match self {
            Error::Config { service, .. } | Error::NotConfigured { service } | Error::Operation { service, .. } => {
                *service
            }
        }
    }

    pub fn operation_kind(&self) -> Option<Operation> {
        match self {
            Error::Operation { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Identifier of the single resource the failed call addressed, if any.
    pub fn resource_id(&self) -> Option<&str> {
        match self {
            Error::Operation {
                target: Target::Resource(id),
                ..
            } => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Error::Operation { cause, .. } => Some(cause),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<&ErrorCode> {
        match self.cause() {
            Some(Cause::Api { code, .. }) => Some(code),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self.cause() {
            Some(Cause::Api { message, .. }) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Every error entry the API reported, empty for non-API failures.
    pub fn api_errors(&self) -> &[ApiError] {
        match self.cause() {
            Some(Cause::Api { details, .. }) => details.as_slice(),
            _ => &[],
        }
    }

    /// Metadata of the HTTP response that carried the failure, when one was received.
    pub fn raw_response(&self) -> Option<&RawResponse> {
        match self {
            Error::Operation { response, .. } => response.as_deref(),
            _ => None,
        }
    }

    /// True when the API reported that the addressed resource does not exist.
    pub fn is_not_found(&self) -> bool {
        let Some(Cause::Api { details, .. }) = self.cause() else {
            return false;
        };
        let by_code = details
            .iter()
            .filter_map(|e| e.error_code.as_number())
            .any(|code| NOT_FOUND_CODES.contains(&code));
        let by_status = self
            .raw_response()
            .is_some_and(|r| r.status == reqwest::StatusCode::NOT_FOUND);
        by_code || by_status
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.cause(), Some(Cause::Transport(_)))
    }
}
