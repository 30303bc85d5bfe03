mod common;

use common::MockApi;
use ultradns_sdk::services::zone::PrimaryZone;
use ultradns_sdk::{QueryInfo, RRSet, RRSetKey, RecordService, Zone, ZoneProperties, ZoneService};

const ZONE: &str = "records.example.";

fn setup(api: &MockApi) -> RecordService {
    let client = api.client();
    let zone = Zone {
        properties: Some(ZoneProperties::new(ZONE, "PRIMARY")),
        primary_create_info: Some(PrimaryZone {
            create_type: "NEW".into(),
            ..PrimaryZone::default()
        }),
        ..Zone::default()
    };
    ZoneService::from_client(client.clone()).create_zone(&zone).unwrap();
    RecordService::from_client(client)
}

fn a_record(ttl: i64, address: &str) -> RRSet {
    RRSet {
        ttl,
        rdata: vec![address.into()],
        ..RRSet::default()
    }
}

#[test]
fn new_and_attach() {
    let api = MockApi::start();
    assert!(RecordService::new(api.config()).is_ok());
    assert_eq!(
        RecordService::<ultradns_sdk::DefaultHttpClient>::attach(None).err().unwrap().to_string(),
        "Record service is not properly configured"
    );

    let config = ultradns_sdk::Config {
        username: String::new(),
        ..api.config()
    };
    assert_eq!(
        RecordService::new(config).err().unwrap().to_string(),
        "config error while creating Record service : config validation failure: username is missing"
    );
}

#[test]
fn record_lifecycle() {
    let api = MockApi::start();
    let records = setup(&api);
    let key = RRSetKey::new("www", ZONE, "A");

    let (raw, _) = records.create_record(&key, &a_record(300, "192.0.2.1")).unwrap();
    assert_eq!(raw.status.as_u16(), 201);

    let (_, read) = records.read_record(&key).unwrap();
    assert_eq!(read.zone_name, ZONE);
    assert_eq!(read.result_info.unwrap().returned_count, 1);
    assert_eq!(read.rrsets[0].owner_name, "www.records.example.");
    assert_eq!(read.rrsets[0].rdata, ["192.0.2.1"]);

    records.update_record(&key, &a_record(600, "192.0.2.2")).unwrap();
    let patch = RRSet {
        ttl: 900,
        ..RRSet::default()
    };
    records.partial_update_record(&key, &patch).unwrap();

    let (_, read) = records.read_record(&key).unwrap();
    assert_eq!(read.rrsets[0].ttl, 900);
    assert_eq!(read.rrsets[0].rdata, ["192.0.2.2"]);

    records.delete_record(&key).unwrap();
    let err = records.read_record(&key).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "error while reading record - www:records.example.:A : error code : 70002 - error message : Data not found."
    );
}

#[test]
fn blank_type_reads_any() {
    let api = MockApi::start();
    let records = setup(&api);
    records
        .create_record(&RRSetKey::new("mail", ZONE, "A"), &a_record(300, "192.0.2.10"))
        .unwrap();
    records
        .create_record(&RRSetKey::new("mail", ZONE, "TXT"), &a_record(300, "v=spf1 -all"))
        .unwrap();

    let (_, read) = records.read_record(&RRSetKey::new("mail", ZONE, "")).unwrap();
    assert_eq!(read.rrsets.len(), 2);
    assert!(api.state.requests().iter().any(|r| r.uri == "/v3/zones/records.example./rrsets/ANY/mail"));
}

#[test]
fn validation_failures_carry_api_messages() {
    let api = MockApi::start();
    let records = setup(&api);
    let key = RRSetKey::new("www", ZONE, "A");

    assert_eq!(
        records.create_record(&key, &RRSet::default()).unwrap_err().to_string(),
        "error while creating record - www:records.example.:A : error code : 70005 - error message : At least one field must be specified: rdata or profile"
    );

    records.create_record(&key, &a_record(300, "192.0.2.1")).unwrap();
    assert_eq!(
        records.update_record(&key, &RRSet::default()).unwrap_err().to_string(),
        "error while updating record - www:records.example.:A : error code : 70005 - error message : At least one field must be specified: rdata or profile"
    );
    assert_eq!(
        records.partial_update_record(&key, &a_record(-1, "192.0.2.1")).unwrap_err().to_string(),
        "error while partial updating record - www:records.example.:A : error code : 1000 - error message : Invalid TTL Format."
    );
}

#[test]
fn deleting_a_missing_record_is_not_found() {
    let api = MockApi::start();
    let records = setup(&api);

    let err = records.delete_record(&RRSetKey::new("ghost", ZONE, "A")).unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_transport());
    assert_eq!(
        err.to_string(),
        "error while deleting record - ghost:records.example.:A : error code : 56001 - error message : Cannot find resource record data for the input zone, record type and owner combination."
    );
}

#[test]
fn listing() {
    let api = MockApi::start();
    let records = setup(&api);
    for owner in ["a", "b", "c"] {
        records
            .create_record(&RRSetKey::new(owner, ZONE, "A"), &a_record(300, "192.0.2.1"))
            .unwrap();
    }

    let (_, all) = records.list_records(ZONE, &QueryInfo::default()).unwrap();
    assert_eq!(all.result_info.as_ref().unwrap().total_count, 3);

    let (_, again) = records.list_records(ZONE, &QueryInfo::default()).unwrap();
    assert_eq!(all, again);

    let query = QueryInfo {
        limit: 2,
        ..QueryInfo::with_query("kind:a")
    };
    let (_, page) = records.list_records(ZONE, &query).unwrap();
    assert_eq!(page.rrsets.len(), 2);

    let err = records
        .list_records(ZONE, &QueryInfo::with_query("colour:red"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "error while listing record : path and query params - v3/zones/records.example./rrsets/?&q=colour:red&offset=0&cursor=&limit=100&sort=&reverse=false : error code : 53005 - error message : Invalid input: q.colour"
    );
}
