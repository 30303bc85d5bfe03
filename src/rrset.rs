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

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::query::{CursorInfo, QueryEcho, QueryInfo, ResultInfo};
use crate::utils::serde_utils::{is_null_or_none, is_zero, vec_is_empty};

/// Record type used in paths when none is given.
pub const ANY_RECORD_TYPE: &str = "ANY";

/// A resource record set. Record semantics are not interpreted, fields are
/// forwarded to the API as given and empty ones are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RRSet {
    #[serde(rename = "ownerName", default, skip_serializing_if = "String::is_empty")]
    pub owner_name: String,
    #[serde(rename = "rrtype", default, skip_serializing_if = "String::is_empty")]
    pub rr_type: String,
    #[serde(rename = "ttl", default, skip_serializing_if = "is_zero")]
    pub ttl: i64,
    #[serde(rename = "rdata", default, skip_serializing_if = "vec_is_empty")]
    pub rdata: Vec<String>,
    #[serde(rename = "profile", default, skip_serializing_if = "is_null_or_none")]
    pub profile: Option<Value>,
}

/// Addresses one rrset by owner, zone and type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RRSetKey {
    pub owner: String,
    pub zone: String,
    pub record_type: String,
}

impl RRSetKey {
    pub fn new(owner: impl Into<String>, zone: impl Into<String>, record_type: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            zone: zone.into(),
            record_type: record_type.into(),
        }
    }

    /// The record type, `ANY` when blank.
    pub fn record_type(&self) -> &str {
        match self.record_type.trim() {
            "" => ANY_RECORD_TYPE,
            t => t,
        }
    }

    pub fn uri(&self) -> String {
        format!("v3/zones/{}/rrsets/{}/{}", self.zone, self.record_type(), self.owner)
    }

    /// Short identifier used in error messages.
    pub fn id(&self) -> String {
        format!("{}:{}:{}", self.owner, self.zone, self.record_type())
    }
}

/// Path of the rrset listing of `zone`, query string included.
pub fn list_uri(zone: &str, query: &QueryInfo) -> String {
    format!("v3/zones/{}/rrsets/{}", zone, query.to_query_string())
}

/// Body returned when reading or listing rrsets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RRSetListResponse {
    #[serde(rename = "zoneName", default)]
    pub zone_name: String,
    #[serde(rename = "rrSets", default)]
    pub rrsets: Vec<RRSet>,
    #[serde(rename = "queryInfo", default)]
    pub query_info: Option<QueryEcho>,
    #[serde(rename = "resultInfo", default)]
    pub result_info: Option<ResultInfo>,
    #[serde(rename = "cursorInfo", default)]
    pub cursor_info: Option<CursorInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_renders_path_and_id() {
        let key = RRSetKey::new("www", "example.com.", "A");
        assert_eq!(key.uri(), "v3/zones/example.com./rrsets/A/www");
        assert_eq!(key.id(), "www:example.com.:A");
    }

    #[test]
    fn blank_type_means_any() {
        let key = RRSetKey::new("www", "example.com.", "");
        assert_eq!(key.uri(), "v3/zones/example.com./rrsets/ANY/www");
        assert_eq!(key.id(), "www:example.com.:ANY");
    }

    #[test]
    fn empty_rrset_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&RRSet::default()).unwrap(), "{}");
    }

    #[test]
    fn negative_ttl_is_sent() {
        let rrset = RRSet {
            ttl: -1,
            ..RRSet::default()
        };
        assert_eq!(serde_json::to_string(&rrset).unwrap(), r#"{"ttl":-1}"#);
    }

    #[test]
    fn list_response_decodes() {
        let body = r#"{
            "zoneName": "example.com.",
            "rrSets": [{"ownerName": "www.example.com.", "rrtype": "A (1)", "ttl": 300, "rdata": ["192.168.1.1"]}],
            "queryInfo": {"sort": "OWNER", "reverse": false, "limit": 100},
            "resultInfo": {"totalCount": 1, "offset": 0, "returnedCount": 1}
        }"#;
        let list: RRSetListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(list.zone_name, "example.com.");
        assert_eq!(list.rrsets[0].rdata, vec!["192.168.1.1"]);
        assert_eq!(list.result_info.unwrap().returned_count, 1);
    }
}
