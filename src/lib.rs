//! SDK for the UltraDNS REST management API
//!
//! Supported features:
//! - Zone and RRSet lifecycle: create, read, update, partial update, delete, list
//! - Blocking calls, one round trip per operation, no retries
//! - Uniform, resource aware errors for every service
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ultradns_sdk::{Client, Config, QueryInfo, RecordService, ZoneService};
//!
//! let config = Config::builder()
//!     .set_param("username", "your_username")?
//!     .set_param("password", "your_password")?
//!     .build()?;
//! let client = Arc::new(Client::new(config)?);
//!
//! let zones = ZoneService::from_client(client.clone());
//! let records = RecordService::from_client(client);
//! let (_, listing) = zones.list_zones(&QueryInfo::with_query("name:example"))?;
//! # let _ = (listing, records);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

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

pub mod client;
pub mod envelope;
pub mod error;
pub mod query;
pub mod rrset;
pub mod services;
pub mod utils;

pub use client::Client;
pub use client::config::{Config, ConfigBuilder, ConfigError};
pub use envelope::{ApiError, ErrorCode, RawResponse};
pub use error::{Cause, Error, Operation, Target};
pub use query::{QueryInfo, ResultInfo, SuccessResponse};
pub use rrset::{RRSet, RRSetKey, RRSetListResponse};
pub use services::record::RecordService;
pub use services::zone::{Zone, ZoneListResponse, ZoneProperties, ZoneResponse, ZoneService};
pub use utils::request::{DefaultHttpClient, HttpClient, HttpResponse, TransportError};
