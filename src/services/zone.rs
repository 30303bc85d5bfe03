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

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;
use crate::client::config::Config;
use crate::envelope::RawResponse;
use crate::error::{Error, Operation, Target};
use crate::query::{CursorInfo, QueryEcho, QueryInfo, ResultInfo, SuccessResponse};
use crate::services::Request;
use crate::utils::request::{DefaultHttpClient, HttpClient};
use crate::utils::serde_utils::{api_timestamp, is_null_or_none, vec_is_empty};

const SERVICE_NAME: &str = "Zone";
const ZONES_PATH: &str = "v3/zones";

/// Zone creation or update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    #[serde(rename = "properties", default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<ZoneProperties>,
    #[serde(rename = "primaryCreateInfo", default, skip_serializing_if = "Option::is_none")]
    pub primary_create_info: Option<PrimaryZone>,
    #[serde(rename = "secondaryCreateInfo", default, skip_serializing_if = "Option::is_none")]
    pub secondary_create_info: Option<SecondaryZone>,
    #[serde(rename = "aliasCreateInfo", default, skip_serializing_if = "Option::is_none")]
    pub alias_create_info: Option<AliasZone>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneProperties {
    #[serde(rename = "name", default)]
    pub name: String,
    #[serde(rename = "accountName", default, skip_serializing_if = "String::is_empty")]
    pub account_name: String,
    /// PRIMARY, SECONDARY or ALIAS.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub zone_type: String,
    #[serde(rename = "dnssecStatus", default, skip_serializing_if = "Option::is_none")]
    pub dnssec_status: Option<String>,
    #[serde(rename = "status", default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "owner", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(rename = "resourceRecordCount", default, skip_serializing_if = "Option::is_none")]
    pub resource_record_count: Option<i64>,
    #[serde(
        rename = "lastModifiedDateTime",
        default,
        skip_serializing_if = "Option::is_none",
        with = "api_timestamp"
    )]
    pub last_modified_date_time: Option<DateTime<Utc>>,
}

impl ZoneProperties {
    pub fn new(name: impl Into<String>, zone_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zone_type: zone_type.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryZone {
    #[serde(rename = "forceImport", default, skip_serializing_if = "Option::is_none")]
    pub force_import: Option<bool>,
    /// NEW, COPY, TRANSFER or UPLOAD.
    #[serde(rename = "createType", default, skip_serializing_if = "String::is_empty")]
    pub create_type: String,
    #[serde(rename = "nameServer", default, skip_serializing_if = "is_null_or_none")]
    pub name_server: Option<Value>,
    #[serde(rename = "originalZoneName", default, skip_serializing_if = "Option::is_none")]
    pub original_zone_name: Option<String>,
    #[serde(rename = "restrictIPList", default, skip_serializing_if = "vec_is_empty")]
    pub restrict_ip_list: Vec<RestrictIp>,
    #[serde(rename = "tsig", default, skip_serializing_if = "is_null_or_none")]
    pub tsig: Option<Value>,
    #[serde(rename = "notifyAddresses", default, skip_serializing_if = "vec_is_empty")]
    pub notify_addresses: Vec<NotifyAddress>,
    #[serde(rename = "inherit", default, skip_serializing_if = "Option::is_none")]
    pub inherit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecondaryZone {
    #[serde(rename = "primaryNameServers", default, skip_serializing_if = "is_null_or_none")]
    pub primary_name_servers: Option<Value>,
    #[serde(rename = "notificationEmailAddress", default, skip_serializing_if = "Option::is_none")]
    pub notification_email_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AliasZone {
    #[serde(rename = "originalZoneName", default)]
    pub original_zone_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestrictIp {
    #[serde(rename = "startIP", default, skip_serializing_if = "String::is_empty")]
    pub start_ip: String,
    #[serde(rename = "endIP", default, skip_serializing_if = "String::is_empty")]
    pub end_ip: String,
    #[serde(rename = "cidr", default, skip_serializing_if = "String::is_empty")]
    pub cidr: String,
    #[serde(rename = "singleIP", default, skip_serializing_if = "String::is_empty")]
    pub single_ip: String,
    #[serde(rename = "comment", default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotifyAddress {
    #[serde(rename = "notifyAddress", default)]
    pub notify_address: String,
    #[serde(rename = "description", default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Body returned when reading a zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneResponse {
    #[serde(rename = "properties", default)]
    pub properties: Option<ZoneProperties>,
    #[serde(rename = "registrarInfo", default)]
    pub registrar_info: Option<Value>,
    #[serde(rename = "tsig", default)]
    pub tsig: Option<Value>,
    #[serde(rename = "restrictIPList", default)]
    pub restrict_ip_list: Vec<RestrictIp>,
    #[serde(rename = "notifyAddresses", default)]
    pub notify_addresses: Vec<NotifyAddress>,
    #[serde(rename = "originalZoneName", default)]
    pub original_zone_name: Option<String>,
    #[serde(rename = "inherit", default)]
    pub inherit: Option<String>,
}

/// Body returned when listing zones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneListResponse {
    #[serde(rename = "queryInfo", default)]
    pub query_info: Option<QueryEcho>,
    #[serde(rename = "cursorInfo", default)]
    pub cursor_info: Option<CursorInfo>,
    #[serde(rename = "resultInfo", default)]
    pub result_info: Option<ResultInfo>,
    #[serde(rename = "zones", default)]
    pub zones: Vec<ZoneResponse>,
}

fn zone_uri(zone_name: &str) -> String {
    format!("{ZONES_PATH}/{zone_name}")
}

/// Zone lifecycle operations.
pub struct ZoneService<H: HttpClient = DefaultHttpClient> {
    client: Option<Arc<Client<H>>>,
}

impl<H: HttpClient> Default for ZoneService<H> {
    /// A service attached to nothing. Every call fails with a configuration error.
    fn default() -> Self {
        Self { client: None }
    }
}

impl<H: HttpClient> Clone for ZoneService<H> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl ZoneService {
    /// Builds a dedicated client from `config`.
    pub fn new(config: Config) -> Result<Self, Error> {
        let client = Client::new(config).map_err(|e| Error::config(SERVICE_NAME, e))?;
        Ok(Self::from_client(Arc::new(client)))
    }
}

impl<H: HttpClient> ZoneService<H> {
    /// Attaches to an existing client. `None` is a configuration error.
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

    pub fn create_zone(&self, zone: &Zone) -> Result<(RawResponse, SuccessResponse), Error> {
        let client = self.client()?;
        let name = zone.properties.as_ref().map(|p| p.name.clone()).unwrap_or_default();

        Request::new(SERVICE_NAME, Operation::Create, Method::POST, ZONES_PATH.to_string(), Target::Resource(name))
            .payload(zone)
            .execute(client)
    }

    pub fn update_zone(&self, zone_name: &str, zone: &Zone) -> Result<(RawResponse, SuccessResponse), Error> {
        let client = self.client()?;

        Request::new(SERVICE_NAME, Operation::Update, Method::PUT, zone_uri(zone_name), Target::Resource(zone_name.to_string()))
            .payload(zone)
            .execute(client)
    }

    pub fn partial_update_zone(&self, zone_name: &str, zone: &Zone) -> Result<(RawResponse, SuccessResponse), Error> {
        let client = self.client()?;

        Request::new(
            SERVICE_NAME,
            Operation::PartialUpdate,
            Method::PATCH,
            zone_uri(zone_name),
            Target::Resource(zone_name.to_string()),
        )
        .payload(zone)
        .execute(client)
    }

    pub fn read_zone(&self, zone_name: &str) -> Result<(RawResponse, ZoneResponse), Error> {
        let client = self.client()?;

        Request::new(SERVICE_NAME, Operation::Read, Method::GET, zone_uri(zone_name), Target::Resource(zone_name.to_string()))
            .fetch(client)
    }

    pub fn delete_zone(&self, zone_name: &str) -> Result<(RawResponse, SuccessResponse), Error> {
        let client = self.client()?;

        Request::new(SERVICE_NAME, Operation::Delete, Method::DELETE, zone_uri(zone_name), Target::Resource(zone_name.to_string()))
            .execute(client)
    }

    /// Lists zones. Errors quote the requested path and query string.
    pub fn list_zones(&self, query: &QueryInfo) -> Result<(RawResponse, ZoneListResponse), Error> {
        let client = self.client()?;
        let path = format!("{ZONES_PATH}/{}", query.to_query_string());

        Request::new(SERVICE_NAME, Operation::List, Method::GET, path.clone(), Target::Listing(path)).fetch(client)
    }
}
