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

pub const DEFAULT_LIMIT: i64 = 100;

/// Filter, paging and ordering parameters of a list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInfo {
    /// Free text filter, `field:value` terms separated by spaces.
    pub query: String,
    pub offset: i64,
    pub cursor: String,
    pub limit: i64,
    pub sort: String,
    pub reverse: bool,
}

impl Default for QueryInfo {
    fn default() -> Self {
        Self {
            query: String::new(),
            offset: 0,
            cursor: String::new(),
            limit: DEFAULT_LIMIT,
            sort: String::new(),
            reverse: false,
        }
    }
}

impl QueryInfo {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Renders the query string appended to list paths.
    ///
    /// Parameter order and the leading `?&` are fixed and values are not
    /// escaped, error messages quote the resulting path as is.
    pub fn to_query_string(&self) -> String {
        format!(
            "?&q={}&offset={}&cursor={}&limit={}&sort={}&reverse={}",
            self.query, self.offset, self.cursor, self.limit, self.sort, self.reverse
        )
    }
}

/// Query echo returned by list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryEcho {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub sort: String,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub limit: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultInfo {
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub returned_count: i64,
}

/// Cursor paging links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

/// Body of successful mutating calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub message: String,
}
