//! In-memory stand-in for the UltraDNS v3 REST API.
//!
//! Holds zones and rrsets in a shared store, answers with the API's error codes
//! and messages, and records every request it receives so tests can inspect
//! headers or assert that no call was made.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tokio::{net::TcpListener, sync::RwLock};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";
pub const ACCESS_TOKEN: &str = "mock-access-token";
pub const TOKEN_PATH: &str = "/v3/authorization/token";

const ZONE_NOT_FOUND: (i64, &str) = (1801, "Zone does not exist in the system.");
const RRSET_NOT_FOUND: (i64, &str) = (
    56001,
    "Cannot find resource record data for the input zone, record type and owner combination.",
);
const DATA_NOT_FOUND: (i64, &str) = (70002, "Data not found.");
const RDATA_REQUIRED: (i64, &str) = (70005, "At least one field must be specified: rdata or profile");
const INVALID_TTL: (i64, &str) = (1000, "Invalid TTL Format.");
const PROPERTIES_REQUIRED: (i64, &str) = (55001, "properties is required field.");

/// A request as seen by the server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query string.
    pub uri: String,
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub user_agent: Option<String>,
    pub authorization: Option<String>,
}

struct StoredZone {
    properties: Map<String, Value>,
    create_info: Value,
    /// Keyed by (record type, owner).
    rrsets: BTreeMap<(String, String), Value>,
}

#[derive(Default)]
pub struct MockState {
    zones: RwLock<BTreeMap<String, StoredZone>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or_default()
    }

    fn record(&self, request: RecordedRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
    }
}

pub fn app(state: Arc<MockState>) -> Router {
    Router::new()
        .route(TOKEN_PATH, post(issue_token))
        .route("/v3/zones", post(create_zone))
        .route("/v3/zones/", get(list_zones))
        .route(
            "/v3/zones/{zone}",
            get(read_zone).put(update_zone).patch(patch_zone).delete(delete_zone),
        )
        .route("/v3/zones/{zone}/rrsets/", get(list_rrsets))
        .route(
            "/v3/zones/{zone}/rrsets/{rtype}/{owner}",
            post(create_rrset)
                .put(update_rrset)
                .patch(patch_rrset)
                .get(read_rrset)
                .delete(delete_rrset),
        )
        .layer(middleware::from_fn_with_state(state.clone(), record_and_authorize))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: Arc<MockState>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

fn api_error(status: StatusCode, (code, message): (i64, &str)) -> Response {
    (status, Json(json!([{ "errorCode": code, "errorMessage": message }]))).into_response()
}

fn successful(status: StatusCode) -> Response {
    (status, Json(json!({ "message": "Successful" }))).into_response()
}

async fn record_and_authorize(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    let recorded = {
        let headers = request.headers();
        let header_value = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        RecordedRequest {
            method: request.method().to_string(),
            uri: request.uri().to_string(),
            content_type: header_value(header::CONTENT_TYPE),
            accept: header_value(header::ACCEPT),
            user_agent: header_value(header::USER_AGENT),
            authorization: header_value(header::AUTHORIZATION),
        }
    };
    let authorized = recorded.authorization.as_deref() == Some(format!("Bearer {ACCESS_TOKEN}").as_str());
    let is_token_request = request.uri().path() == TOKEN_PATH;
    state.record(recorded);

    if !is_token_request && !authorized {
        return api_error(StatusCode::UNAUTHORIZED, (60001, "invalid_token:Unauthorized"));
    }
    next.run(request).await
}

#[derive(Deserialize)]
struct TokenRequest {
    grant_type: String,
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

async fn issue_token(Form(form): Form<TokenRequest>) -> Response {
    if form.grant_type != "password" || form.username != USERNAME || form.password != PASSWORD {
        let body = json!({
            "errorCode": 60001,
            "errorMessage": "invalid_grant:Invalid username & password combination."
        });
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    }
    Json(json!({
        "tokenType": "Bearer",
        "accessToken": ACCESS_TOKEN,
        "refreshToken": "mock-refresh-token",
        "expiresIn": "3600"
    }))
    .into_response()
}

fn now() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%MZ").to_string()
}

fn zone_view(zone: &StoredZone) -> Value {
    let mut properties = zone.properties.clone();
    properties.insert("resourceRecordCount".into(), json!(zone.rrsets.len()));

    let mut view = json!({ "properties": properties });
    let info = &zone.create_info;
    for key in ["restrictIPList", "notifyAddresses", "tsig", "inherit", "originalZoneName"] {
        if let Some(value) = info.get(key) {
            view[key] = value.clone();
        }
    }
    view
}

fn create_info(body: &Value) -> Value {
    ["primaryCreateInfo", "secondaryCreateInfo", "aliasCreateInfo"]
        .iter()
        .find_map(|key| body.get(*key).cloned())
        .unwrap_or_else(|| json!({}))
}

async fn create_zone(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Result<Response, Response> {
    let properties = body
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, PROPERTIES_REQUIRED))?;
    let name = properties
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, (55001, "properties.name is required field.")))?
        .to_string();

    let mut zones = state.zones.write().await;
    if zones.contains_key(&name) {
        return Err(api_error(StatusCode::BAD_REQUEST, (1802, "Zone already exists in the system.")));
    }
    let create_info = create_info(&body);
    if let Some(original) = body.pointer("/aliasCreateInfo/originalZoneName").and_then(Value::as_str) {
        if !zones.contains_key(original) {
            return Err(api_error(StatusCode::NOT_FOUND, ZONE_NOT_FOUND));
        }
    }

    let mut stored = properties.clone();
    stored.entry("accountName").or_insert_with(|| json!("mock-account"));
    stored.insert("status".into(), json!("ACTIVE"));
    stored.insert("dnssecStatus".into(), json!("UNSIGNED"));
    stored.insert("owner".into(), json!(USERNAME));
    stored.insert("lastModifiedDateTime".into(), json!(now()));

    zones.insert(
        name,
        StoredZone {
            properties: stored,
            create_info,
            rrsets: BTreeMap::new(),
        },
    );
    Ok(successful(StatusCode::CREATED))
}

async fn read_zone(State(state): State<Arc<MockState>>, Path(zone): Path<String>) -> Result<Response, Response> {
    let zones = state.zones.read().await;
    let stored = zones
        .get(&zone)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, ZONE_NOT_FOUND))?;
    Ok(Json(zone_view(stored)).into_response())
}

async fn update_zone(
    State(state): State<Arc<MockState>>,
    Path(zone): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, Response> {
    let mut zones = state.zones.write().await;
    let stored = zones
        .get_mut(&zone)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, ZONE_NOT_FOUND))?;
    stored.create_info = create_info(&body);
    stored.properties.insert("lastModifiedDateTime".into(), json!(now()));
    Ok(successful(StatusCode::OK))
}

async fn patch_zone(
    State(state): State<Arc<MockState>>,
    Path(zone): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, Response> {
    let mut zones = state.zones.write().await;
    let stored = zones
        .get_mut(&zone)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, ZONE_NOT_FOUND))?;
    if let (Some(target), Some(patch)) = (stored.create_info.as_object_mut(), create_info(&body).as_object()) {
        for (key, value) in patch {
            target.insert(key.clone(), value.clone());
        }
    }
    stored.properties.insert("lastModifiedDateTime".into(), json!(now()));
    Ok(successful(StatusCode::OK))
}

async fn delete_zone(State(state): State<Arc<MockState>>, Path(zone): Path<String>) -> Result<Response, Response> {
    let mut zones = state.zones.write().await;
    zones
        .remove(&zone)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, ZONE_NOT_FOUND))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Parses the `q` parameter into (field, value) terms, rejecting fields not in `allowed`.
fn parse_terms(q: &str, allowed: &[&str]) -> Result<Vec<(String, String)>, Response> {
    q.split_whitespace()
        .map(|term| {
            let (field, value) = term.split_once(':').unwrap_or((term, ""));
            if allowed.contains(&field.to_lowercase().as_str()) {
                Ok((field.to_lowercase(), value.to_lowercase()))
            } else {
                let message = format!("Invalid input: q.{field}");
                Err(api_error(StatusCode::BAD_REQUEST, (53005, message.as_str())))
            }
        })
        .collect()
}

struct Paging {
    offset: usize,
    limit: usize,
    reverse: bool,
}

impl Paging {
    fn from_params(params: &HashMap<String, String>) -> Self {
        let number = |key: &str, default: usize| {
            params
                .get(key)
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(default)
        };
        Self {
            offset: number("offset", 0),
            limit: number("limit", 100),
            reverse: params.get("reverse").is_some_and(|v| v == "true"),
        }
    }

    fn page(&self, mut items: Vec<Value>) -> (usize, Vec<Value>) {
        if self.reverse {
            items.reverse();
        }
        let total = items.len();
        (total, items.into_iter().skip(self.offset).take(self.limit).collect())
    }
}

async fn list_zones(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, Response> {
    let q = params.get("q").cloned().unwrap_or_default();
    let terms = parse_terms(&q, &["name", "zone_type", "zone_status", "account_name"])?;
    let paging = Paging::from_params(&params);

    let zones = state.zones.read().await;
    let matching: Vec<Value> = zones
        .values()
        .filter(|zone| {
            terms.iter().all(|(field, value)| {
                let property = |key: &str| {
                    zone.properties
                        .get(key)
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_lowercase()
                };
                match field.as_str() {
                    "name" => property("name").contains(value.as_str()),
                    "zone_type" => property("type") == *value,
                    "zone_status" => property("status") == *value,
                    _ => property("accountName") == *value,
                }
            })
        })
        .map(zone_view)
        .collect();

    let (total, page) = paging.page(matching);
    Ok(Json(json!({
        "queryInfo": { "q": q, "sort": "NAME", "reverse": paging.reverse, "limit": paging.limit },
        "resultInfo": { "totalCount": total, "offset": paging.offset, "returnedCount": page.len() },
        "zones": page
    }))
    .into_response())
}

fn type_label(rtype: &str) -> String {
    let code = match rtype {
        "A" => 1,
        "NS" => 2,
        "CNAME" => 5,
        "SOA" => 6,
        "PTR" => 12,
        "MX" => 15,
        "TXT" => 16,
        "AAAA" => 28,
        "SRV" => 33,
        "CAA" => 257,
        _ => return rtype.to_string(),
    };
    format!("{rtype} ({code})")
}

fn owner_fqdn(owner: &str, zone: &str) -> String {
    if owner.ends_with('.') {
        owner.to_string()
    } else {
        format!("{owner}.{zone}")
    }
}

/// Checks an rrset body the way the API does for full writes.
fn validate_rrset(body: &Value) -> Result<(), Response> {
    let has_rdata = body
        .get("rdata")
        .and_then(Value::as_array)
        .is_some_and(|r| !r.is_empty());
    let has_profile = body.get("profile").is_some_and(|p| !p.is_null());
    if !has_rdata && !has_profile {
        return Err(api_error(StatusCode::BAD_REQUEST, RDATA_REQUIRED));
    }
    validate_ttl(body)
}

fn validate_ttl(body: &Value) -> Result<(), Response> {
    match body.get("ttl") {
        Some(ttl) if ttl.as_i64().is_none_or(|t| t < 0) => Err(api_error(StatusCode::BAD_REQUEST, INVALID_TTL)),
        _ => Ok(()),
    }
}

fn rrset_view(zone: &str, rtype: &str, owner: &str, body: &Value) -> Value {
    let mut rrset = json!({
        "ownerName": owner_fqdn(owner, zone),
        "rrtype": type_label(rtype),
        "ttl": body.get("ttl").and_then(Value::as_i64).unwrap_or(86400),
    });
    for key in ["rdata", "profile"] {
        if let Some(value) = body.get(key).filter(|v| !v.is_null()) {
            rrset[key] = value.clone();
        }
    }
    rrset
}

fn rrset_list(zone: &str, rrsets: Vec<Value>, total: usize, offset: usize, reverse: bool, limit: usize) -> Value {
    json!({
        "zoneName": zone,
        "rrSets": rrsets,
        "queryInfo": { "sort": "OWNER", "reverse": reverse, "limit": limit },
        "resultInfo": { "totalCount": total, "offset": offset, "returnedCount": rrsets.len() }
    })
}

async fn create_rrset(
    State(state): State<Arc<MockState>>,
    Path((zone, rtype, owner)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Result<Response, Response> {
    let mut zones = state.zones.write().await;
    let stored = zones
        .get_mut(&zone)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, ZONE_NOT_FOUND))?;
    validate_rrset(&body)?;

    let key = (rtype.to_uppercase(), owner.clone());
    if stored.rrsets.contains_key(&key) {
        let message = format!("Resource Record of type {} with these attributes already exists in the system.", key.0);
        return Err(api_error(StatusCode::BAD_REQUEST, (2111, message.as_str())));
    }
    let view = rrset_view(&zone, &key.0, &owner, &body);
    stored.rrsets.insert(key, view);
    Ok(successful(StatusCode::CREATED))
}

async fn update_rrset(
    State(state): State<Arc<MockState>>,
    Path((zone, rtype, owner)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Result<Response, Response> {
    let mut zones = state.zones.write().await;
    let stored = zones
        .get_mut(&zone)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, ZONE_NOT_FOUND))?;
    validate_rrset(&body)?;

    let key = (rtype.to_uppercase(), owner.clone());
    let view = rrset_view(&zone, &key.0, &owner, &body);
    let existing = stored
        .rrsets
        .get_mut(&key)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, RRSET_NOT_FOUND))?;
    *existing = view;
    Ok(successful(StatusCode::OK))
}

async fn patch_rrset(
    State(state): State<Arc<MockState>>,
    Path((zone, rtype, owner)): Path<(String, String, String)>,
    Json(body): Json<Value>,
) -> Result<Response, Response> {
    let mut zones = state.zones.write().await;
    let stored = zones
        .get_mut(&zone)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, ZONE_NOT_FOUND))?;
    validate_ttl(&body)?;

    let existing = stored
        .rrsets
        .get_mut(&(rtype.to_uppercase(), owner))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, RRSET_NOT_FOUND))?;
    for key in ["ttl", "rdata", "profile"] {
        if let Some(value) = body.get(key) {
            existing[key] = value.clone();
        }
    }
    Ok(successful(StatusCode::OK))
}

async fn read_rrset(
    State(state): State<Arc<MockState>>,
    Path((zone, rtype, owner)): Path<(String, String, String)>,
) -> Result<Response, Response> {
    let zones = state.zones.read().await;
    let stored = zones
        .get(&zone)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, ZONE_NOT_FOUND))?;

    let rtype = rtype.to_uppercase();
    let found: Vec<Value> = stored
        .rrsets
        .iter()
        .filter(|((t, o), _)| *o == owner && (rtype == "ANY" || *t == rtype))
        .map(|(_, v)| v.clone())
        .collect();
    if found.is_empty() {
        return Err(api_error(StatusCode::NOT_FOUND, DATA_NOT_FOUND));
    }
    let total = found.len();
    Ok(Json(rrset_list(&zone, found, total, 0, false, 100)).into_response())
}

async fn delete_rrset(
    State(state): State<Arc<MockState>>,
    Path((zone, rtype, owner)): Path<(String, String, String)>,
) -> Result<Response, Response> {
    let mut zones = state.zones.write().await;
    let stored = zones
        .get_mut(&zone)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, ZONE_NOT_FOUND))?;
    stored
        .rrsets
        .remove(&(rtype.to_uppercase(), owner))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, RRSET_NOT_FOUND))?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn list_rrsets(
    State(state): State<Arc<MockState>>,
    Path(zone): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, Response> {
    let q = params.get("q").cloned().unwrap_or_default();
    let terms = parse_terms(&q, &["owner", "kind", "ttl", "value"])?;
    let paging = Paging::from_params(&params);

    let zones = state.zones.read().await;
    let stored = zones
        .get(&zone)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, ZONE_NOT_FOUND))?;

    let matching: Vec<Value> = stored
        .rrsets
        .iter()
        .filter(|((rtype, _), rrset)| {
            terms.iter().all(|(field, value)| match field.as_str() {
                "owner" => rrset["ownerName"]
                    .as_str()
                    .is_some_and(|o| o.to_lowercase().contains(value.as_str())),
                "kind" => rtype.to_lowercase() == *value,
                "ttl" => rrset["ttl"].to_string() == *value,
                _ => rrset["rdata"]
                    .as_array()
                    .is_some_and(|r| r.iter().any(|d| d.as_str().is_some_and(|d| d.to_lowercase().contains(value.as_str())))),
            })
        })
        .map(|(_, rrset)| rrset.clone())
        .collect();

    let (total, page) = paging.page(matching);
    Ok(Json(rrset_list(&zone, page, total, paging.offset, paging.reverse, paging.limit)).into_response())
}
