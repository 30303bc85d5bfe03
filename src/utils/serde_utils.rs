use serde_json::Value;

pub fn is_null_or_none(value: &Option<Value>) -> bool {
    match value {
        None => true,
        Some(v) => v.is_null(),
    }
}

pub fn is_zero(value: &i64) -> bool {
    *value == 0
}

pub fn vec_is_empty<T>(v: &Vec<T>) -> bool {
    v.is_empty()
}

/// `lastModifiedDateTime` as sent by the API: minute precision
/// (`2014-04-01T20:58Z`) or full RFC 3339.
pub mod api_timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

    pub fn parse(value: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|t| t.with_timezone(&Utc))
            .or_else(|_| NaiveDateTime::parse_from_str(value, MINUTE_FORMAT).map(|t| t.and_utc()))
            .ok()
    }

    pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Secs, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::api_timestamp::parse;

    #[test]
    fn minute_precision_timestamp() {
        let t = parse("2014-04-01T20:58Z").unwrap();
        assert_eq!(t.to_rfc3339(), "2014-04-01T20:58:00+00:00");
    }

    #[test]
    fn rfc3339_timestamp() {
        let t = parse("2023-06-01T10:15:30+02:00").unwrap();
        assert_eq!(t.to_rfc3339(), "2023-06-01T08:15:30+00:00");
        assert!(parse("yesterday").is_none());
    }
}
