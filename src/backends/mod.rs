mod cloudflare;
pub use cloudflare::*;

use crate::err::*;
use crate::get_ip::IpFamily;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The record types this tool manages.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    A,
    AAAA,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AAAA => "AAAA",
        }
    }
}

impl From<IpFamily> for RecordType {
    fn from(family: IpFamily) -> Self {
        match family {
            IpFamily::V4 => Self::A,
            IpFamily::V6 => Self::AAAA,
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DNS record as the provider reports it. The type stays a plain string
/// because a zone listing also carries records (TXT, MX, ...) this tool
/// never touches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(skip_serializing, default)]
    pub id: String,

    #[serde(rename(serialize = "type", deserialize = "type"))]
    pub record_type: String,

    pub name: String,

    #[serde(default)]
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

/// The provider operations the reconciler is built on.
#[async_trait]
pub trait DnsBackend {
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>>;

    async fn create_record(
        &self,
        zone_id: &str,
        record_type: RecordType,
        name: &str,
        content: &str,
    ) -> Result<()>;

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record_type: RecordType,
        name: &str,
        content: &str,
    ) -> Result<()>;
}

#[derive(Debug)]
pub enum Backend {
    Cloudflare(Cloudflare),
}

#[async_trait]
impl DnsBackend for Backend {
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        match self {
            Backend::Cloudflare(cloudflare) => cloudflare.list_records(zone_id).await,
        }
    }

    async fn create_record(
        &self,
        zone_id: &str,
        record_type: RecordType,
        name: &str,
        content: &str,
    ) -> Result<()> {
        match self {
            Backend::Cloudflare(cloudflare) => {
                cloudflare
                    .create_record(zone_id, record_type, name, content)
                    .await
            }
        }
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record_type: RecordType,
        name: &str,
        content: &str,
    ) -> Result<()> {
        match self {
            Backend::Cloudflare(cloudflare) => {
                cloudflare
                    .update_record(zone_id, record_id, record_type, name, content)
                    .await
            }
        }
    }
}
