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

use std::sync::Arc;

use reqwest::Method;

use crate::client::Client;
use crate::client::config::Config;
use crate::envelope::RawResponse;
use crate::error::{Error, Operation, Target};
use crate::query::{QueryInfo, SuccessResponse};
use crate::rrset::{self, RRSet, RRSetKey, RRSetListResponse};
use crate::services::Request;
use crate::utils::request::{DefaultHttpClient, HttpClient};

const SERVICE_NAME: &str = "Record";

/// Resource record set operations.
pub struct RecordService<H: HttpClient = DefaultHttpClient> {
    client: Option<Arc<Client<H>>>,
}

impl<H: HttpClient> Default for RecordService<H> {
    fn default() -> Self {
        Self { client: None }
    }
}

impl<H: HttpClient> Clone for RecordService<H> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl RecordService {
    pub fn new(config: Config) -> Result<Self, Error> {
        let client = Client::new(config).map_err(|e| Error::config(SERVICE_NAME, e))?;
        Ok(Self::from_client(Arc::new(client)))
    }
}

impl<H: HttpClient> RecordService<H> {
    pub fn attach(client: Option<Arc<Client<H>>>) -> Result<Self, Error> {
        client
            .map(Self::from_client)
            .ok_or_else(|| Error::not_configured(SERVICE_NAME))
    }

    pub fn from_client(client: Arc<Client<H>>) -> Self {
        Self { client: Some(client) }
    }

    fn client(&self) -> Result<&Client<H>, Error> {
        self.client
            .as_deref()
            .ok_or_else(|| Error::not_configured(SERVICE_NAME))
    }

    fn request(operation: Operation, method: Method, key: &RRSetKey) -> Request<'static> {
        Request::new(SERVICE_NAME, operation, method, key.uri(), Target::Resource(key.id()))
    }

    pub fn create_record(&self, key: &RRSetKey, rrset: &RRSet) -> Result<(RawResponse, SuccessResponse), Error> {
        let client = self.client()?;
        Self::request(Operation::Create, Method::POST, key).payload(rrset).execute(client)
    }

    pub fn update_record(&self, key: &RRSetKey, rrset: &RRSet) -> Result<(RawResponse, SuccessResponse), Error> {
        let client = self.client()?;
        Self::request(Operation::Update, Method::PUT, key).payload(rrset).execute(client)
    }

    pub fn partial_update_record(&self, key: &RRSetKey, rrset: &RRSet) -> Result<(RawResponse, SuccessResponse), Error> {
        let client = self.client()?;
        Self::request(Operation::PartialUpdate, Method::PATCH, key)
            .payload(rrset)
            .execute(client)
    }

    pub fn read_record(&self, key: &RRSetKey) -> Result<(RawResponse, RRSetListResponse), Error> {
        let client = self.client()?;
        Self::request(Operation::Read, Method::GET, key).fetch(client)
    }

    pub fn delete_record(&self, key: &RRSetKey) -> Result<(RawResponse, SuccessResponse), Error> {
        let client = self.client()?;
        Self::request(Operation::Delete, Method::DELETE, key).execute(client)
    }

    /// Lists the rrsets of `zone`. Errors quote the requested path and query string.
    pub fn list_records(&self, zone: &str, query: &QueryInfo) -> Result<(RawResponse, RRSetListResponse), Error> {
        let client = self.client()?;
        let path = rrset::list_uri(zone, query);

        Request::new(SERVICE_NAME, Operation::List, Method::GET, path.clone(), Target::Listing(path)).fetch(client)
    }
}
