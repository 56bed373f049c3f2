//! `DnsApi` implementation on top of the Katapult request primitive
//!
//! Every operation is exactly one call to [`KatapultClient::request`].

use acme_dns_core::traits::{DnsApi, Record, Zone};
use acme_dns_core::{Error, Result};
use async_trait::async_trait;
use reqwest::Method;

use crate::client::{KatapultClient, Params};
use crate::model::{RecordCreateRequest, RecordResponse, RecordsResponse, ZoneResponse};

const ZONE_PATH: &str = "core/v1/dns_zones/_";
const ZONE_RECORDS_PATH: &str = "core/v1/dns_zones/_/records";
const RECORD_PATH: &str = "core/v1/dns_records/_";

#[async_trait]
impl DnsApi for KatapultClient {
    /// ```http
    /// GET /core/v1/dns_zones/_?dns_zone[name]=example.com
    /// ```
    async fn zone(&self, name: &str) -> Result<Zone> {
        if name.is_empty() {
            return Err(Error::invalid_input("zone name cannot be empty"));
        }

        let params = Params::from([("dns_zone[name]".to_string(), name.to_string())]);
        let body = self.request(Method::GET, ZONE_PATH, &params, None).await?;
        let response: ZoneResponse = serde_json::from_slice(&body)?;

        tracing::debug!("Found zone {} ({})", response.dns_zone.name, response.dns_zone.id);
        Ok(response.dns_zone)
    }

    /// ```http
    /// GET /core/v1/dns_zones/_/records?dns_zone[id]=dnszone_...
    /// ```
    ///
    /// Only the first page is read.
    async fn records(&self, zone: &Zone) -> Result<Vec<Record>> {
        let zone_ref = zone.by_id();
        let params = Params::from([(
            format!("dns_zone[{}]", zone_ref.field()),
            zone_ref.value().to_string(),
        )]);

        let body = self
            .request(Method::GET, ZONE_RECORDS_PATH, &params, None)
            .await?;
        let response: RecordsResponse = serde_json::from_slice(&body)?;

        tracing::debug!(
            "Listed {} record(s) in zone {}",
            response.dns_records.len(),
            zone.name
        );
        Ok(response.dns_records)
    }

    /// ```http
    /// POST /core/v1/dns_zones/_/records
    /// {
    ///   "dns_zone": { "id": "dnszone_..." },
    ///   "properties": { "name": "_acme-challenge", "type": "TXT", "ttl": 60,
    ///                   "content": { "TXT": { "content": "..." } } }
    /// }
    /// ```
    async fn create_txt_record(&self, zone: &Zone, name: &str, content: &str) -> Result<Record> {
        let request = RecordCreateRequest::txt(zone.by_id(), name, content);
        let request_json =
            serde_json::to_string(&request).map_err(|e| Error::serialization(e.to_string()))?;

        let body = self
            .request(
                Method::POST,
                ZONE_RECORDS_PATH,
                &Params::new(),
                Some(request_json),
            )
            .await?;
        let response: RecordResponse = serde_json::from_slice(&body)?;

        Ok(response.dns_record)
    }

    /// ```http
    /// DELETE /core/v1/dns_records/_?dns_record[id]=dnsrec_...
    /// ```
    async fn delete_record(&self, record: &Record) -> Result<()> {
        let params = Params::from([("dns_record[id]".to_string(), record.id.clone())]);
        self.request(Method::DELETE, RECORD_PATH, &params, None)
            .await?;

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "katapult"
    }
}
