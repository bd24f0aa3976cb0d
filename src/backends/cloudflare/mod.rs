mod restful;

use std::fmt;
use std::time::Duration;

use crate::backends::{DnsBackend, DnsRecord, RecordType};
use crate::err::*;
use restful::Restful;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const API_BASE: &str = "https://api.cloudflare.com/client/v4";

pub struct Cloudflare {
    api_token: String,
    api_base: String,
    rest: Restful,
}

// The api token must not reach the logs through Debug output.
impl fmt::Debug for Cloudflare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cloudflare")
            .field("api_token", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Envelope every v4 endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    code: u32,
    message: String,
}

impl Cloudflare {
    pub fn new(api_token: String, timeout: Duration) -> Result<Self> {
        Self::with_api_base(api_token, timeout, API_BASE.to_string())
    }

    fn with_api_base(api_token: String, timeout: Duration, api_base: String) -> Result<Self> {
        Ok(Self {
            api_token,
            api_base,
            rest: Restful::new(timeout)?,
        })
    }

    fn auth_header(&self) -> (String, String) {
        let k = "Authorization".to_string();
        let v = format!("Bearer {}", self.api_token);
        (k, v)
    }

    fn unwrap_envelope<T>(resp: ApiResponse<T>) -> Result<Option<T>> {
        if !resp.success {
            let detail = match resp.errors.first() {
                Some(e) => format!("code {} \"{}\"", e.code, e.message),
                None => "no error detail given".to_string(),
            };
            return Err(AppErr::Provider(format!("api reported failure: {}", detail)));
        }

        Ok(resp.result)
    }
}

#[async_trait]
impl DnsBackend for Cloudflare {
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        let url = format!("{}/zones/{}/dns_records", self.api_base, zone_id);

        let (k, v) = self.auth_header();
        let headers: Vec<(&str, &str)> = vec![(&k, &v)];
        let resp = self.rest.get(&url, Some(headers)).await?;

        let envelope: ApiResponse<Vec<DnsRecord>> = serde_json::from_value(resp)?;
        let records = Self::unwrap_envelope(envelope)?.ok_or(AppErr::Provider(
            "record listing came back without a result field".to_string(),
        ))?;

        debug!("zone {} holds {} record(s)", zone_id, records.len());

        Ok(records)
    }

    async fn create_record(
        &self,
        zone_id: &str,
        record_type: RecordType,
        name: &str,
        content: &str,
    ) -> Result<()> {
        let url = format!("{}/zones/{}/dns_records", self.api_base, zone_id);

        // ttl 1 means "automatic" on this api. New records stay unproxied
        // so the name keeps resolving to the origin address.
        let body = json!({
            "type": record_type.as_str(),
            "name": name,
            "content": content,
            "ttl": 1,
            "proxied": false,
        });

        let (k, v) = self.auth_header();
        let headers: Vec<(&str, &str)> = vec![(&k, &v)];
        let resp = self.rest.post(&url, Some(headers), &body).await?;

        let envelope: ApiResponse<serde_json::Value> = serde_json::from_value(resp)?;
        Self::unwrap_envelope(envelope)?;

        Ok(())
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record_type: RecordType,
        name: &str,
        content: &str,
    ) -> Result<()> {
        let url = format!(
            "{}/zones/{}/dns_records/{}",
            self.api_base, zone_id, record_id,
        );

        let body = json!({
            "type": record_type.as_str(),
            "name": name,
            "content": content,
        });

        let (k, v) = self.auth_header();
        let headers: Vec<(&str, &str)> = vec![(&k, &v)];
        let resp = self.rest.patch(&url, Some(headers), &body).await?;

        let envelope: ApiResponse<serde_json::Value> = serde_json::from_value(resp)?;
        Self::unwrap_envelope(envelope)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn backend(server: &MockServer) -> Cloudflare {
        Cloudflare::with_api_base(
            "test-token".to_string(),
            Duration::from_secs(5),
            server.uri(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn list_decodes_the_envelope_and_keeps_foreign_types() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zones/zone-1/dns_records"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": [
                    {
                        "id": "rec-1",
                        "type": "A",
                        "name": "home.example.com",
                        "content": "1.2.3.4",
                        "ttl": 1,
                        "proxied": false,
                    },
                    {
                        "id": "rec-2",
                        "type": "TXT",
                        "name": "home.example.com",
                        "content": "v=spf1 -all",
                    },
                ],
            })))
            .mount(&server)
            .await;

        let records = backend(&server).await.list_records("zone-1").await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "rec-1");
        assert_eq!(records[0].record_type, "A");
        assert_eq!(records[0].content, "1.2.3.4");
        assert_eq!(records[1].record_type, "TXT");
    }

    #[tokio::test]
    async fn an_api_level_failure_becomes_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zones/zone-1/dns_records"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "errors": [{ "code": 9109, "message": "Invalid access token" }],
                "result": null,
            })))
            .mount(&server)
            .await;

        let err = backend(&server)
            .await
            .list_records("zone-1")
            .await
            .unwrap_err();

        assert!(matches!(err, AppErr::Provider(_)));
        assert!(err.to_string().contains("9109"));
    }

    #[tokio::test]
    async fn a_transport_level_failure_becomes_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/zones/zone-1/dns_records"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = backend(&server)
            .await
            .list_records("zone-1")
            .await
            .unwrap_err();

        assert!(matches!(err, AppErr::Provider(_)));
    }

    #[tokio::test]
    async fn create_posts_an_automatic_ttl_unproxied_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/zones/zone-1/dns_records"))
            .and(header("Authorization", "Bearer test-token"))
            .and(body_json(json!({
                "type": "AAAA",
                "name": "home.example.com",
                "content": "2001:db8::1",
                "ttl": 1,
                "proxied": false,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": {
                    "id": "rec-9",
                    "type": "AAAA",
                    "name": "home.example.com",
                    "content": "2001:db8::1",
                    "ttl": 1,
                    "proxied": false,
                },
            })))
            .expect(1)
            .mount(&server)
            .await;

        backend(&server)
            .await
            .create_record("zone-1", RecordType::AAAA, "home.example.com", "2001:db8::1")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_patches_the_existing_record_id() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/zones/zone-1/dns_records/rec-1"))
            .and(header("Authorization", "Bearer test-token"))
            .and(body_json(json!({
                "type": "A",
                "name": "home.example.com",
                "content": "5.6.7.8",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "errors": [],
                "result": {
                    "id": "rec-1",
                    "type": "A",
                    "name": "home.example.com",
                    "content": "5.6.7.8",
                    "ttl": 1,
                    "proxied": false,
                },
            })))
            .expect(1)
            .mount(&server)
            .await;

        backend(&server)
            .await
            .update_record("zone-1", "rec-1", RecordType::A, "home.example.com", "5.6.7.8")
            .await
            .unwrap();
    }

    #[test]
    fn debug_output_redacts_the_token() {
        let cloudflare = Cloudflare::new("secret".to_string(), Duration::from_secs(5)).unwrap();
        let debug = format!("{:?}", cloudflare);

        assert!(!debug.contains("secret"));
    }
}
