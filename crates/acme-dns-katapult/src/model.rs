//! Katapult wire types
//!
//! Request and response envelopes exchanged with the Katapult core API.
//! Zones and records themselves are the core [`Zone`] and [`Record`] types.

use acme_dns_core::traits::{CHALLENGE_TTL, Record, TXT_RECORD_TYPE, Zone, ZoneRef};
use serde::{Deserialize, Serialize};

/// `GET core/v1/dns_zones/_`
#[derive(Debug, Deserialize)]
pub struct ZoneResponse {
    pub dns_zone: Zone,
}

/// `GET core/v1/dns_zones/_/records`
#[derive(Debug, Deserialize)]
pub struct RecordsResponse {
    pub dns_records: Vec<Record>,
}

/// `POST core/v1/dns_zones/_/records`
#[derive(Debug, Deserialize)]
pub struct RecordResponse {
    pub dns_record: Record,
}

/// Body of a record creation request
#[derive(Debug, Serialize)]
pub struct RecordCreateRequest<'a> {
    pub dns_zone: ZoneRef,
    pub properties: RecordProperties<'a>,
}

#[derive(Debug, Serialize)]
pub struct RecordProperties<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub record_type: &'a str,
    pub ttl: u32,
    pub content: RecordContent<'a>,
}

/// Type-keyed record content; only TXT is ever sent
#[derive(Debug, Serialize)]
pub struct RecordContent<'a> {
    #[serde(rename = "TXT")]
    pub txt: TxtContent<'a>,
}

#[derive(Debug, Serialize)]
pub struct TxtContent<'a> {
    pub content: &'a str,
}

impl<'a> RecordCreateRequest<'a> {
    /// TXT record request with the challenge TTL
    pub fn txt(zone: ZoneRef, name: &'a str, content: &'a str) -> Self {
        Self {
            dns_zone: zone,
            properties: RecordProperties {
                name,
                record_type: TXT_RECORD_TYPE,
                ttl: CHALLENGE_TTL,
                content: RecordContent {
                    txt: TxtContent { content },
                },
            },
        }
    }
}

/// `{"error": {"code": ..., "description": ...}}` sent with non-200 responses
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_shape() {
        let request = RecordCreateRequest::txt(
            ZoneRef::Id("dnszone_abc".to_string()),
            "_acme-challenge",
            "token",
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "dns_zone": { "id": "dnszone_abc" },
                "properties": {
                    "name": "_acme-challenge",
                    "type": "TXT",
                    "ttl": 60,
                    "content": { "TXT": { "content": "token" } }
                }
            })
        );
    }

    #[test]
    fn test_error_envelope_without_description() {
        let envelope: ErrorEnvelope =
            serde_json::from_str(r#"{"error":{"code":"invalid_api_token"}}"#).unwrap();

        assert_eq!(envelope.error.code, "invalid_api_token");
        assert!(envelope.error.description.is_empty());
    }
}
