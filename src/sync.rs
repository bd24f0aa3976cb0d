use std::net::IpAddr;

use crate::backends::{DnsBackend, DnsRecord, RecordType};
use crate::err::*;

use tracing::{info, warn};

/// What a reconciliation run did to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    Updated,
    Unchanged,
}

/// Bring the `(record_type, hostname)` record of the zone in line with the
/// freshly observed address. One listing, then at most one mutation; no
/// retries and no deletions.
pub async fn sync_record<B>(
    backend: &B,
    zone_id: &str,
    record_type: RecordType,
    hostname: &str,
    addr: IpAddr,
) -> Result<SyncOutcome>
where
    B: DnsBackend,
{
    let records = backend.list_records(zone_id).await?;
    let desired = addr.to_string();

    let mut matched = records
        .iter()
        .filter(|r| r.record_type == record_type.as_str() && r.name == hostname);

    let found = matched.next();
    let extras = matched.count();
    if extras > 0 {
        // Out-of-band duplicates. Reconcile the first, never delete.
        warn!(
            "zone has {} extra '{}' record(s) for {}, reconciling the first one only",
            extras, record_type, hostname
        );
    }

    let Some(record) = found else {
        info!("'{}' record for {} is missing, creating", record_type, hostname);
        log_new_record(record_type, hostname, &desired)?;

        backend
            .create_record(zone_id, record_type, hostname, &desired)
            .await?;
        info!(
            "created a '{}' record for {} with content {}",
            record_type, hostname, desired
        );

        return Ok(SyncOutcome::Created);
    };

    if record.content == desired {
        info!(
            "'{}' record for {} is already up to date",
            record_type, hostname
        );
        return Ok(SyncOutcome::Unchanged);
    }

    info!(
        "'{}' record for {} exists but the address differs, updating",
        record_type, hostname
    );
    log_update(record, &desired)?;

    backend
        .update_record(zone_id, &record.id, record_type, hostname, &desired)
        .await?;
    info!("updated record {} with content {}", hostname, desired);

    Ok(SyncOutcome::Updated)
}

fn log_update(remote: &DnsRecord, content: &str) -> Result<()> {
    use tabled::{
        builder::Builder,
        settings::{object::Rows, Alignment, Modify},
    };

    let old_json = serde_json::to_string_pretty(remote)?;

    let mut builder = Builder::default();
    builder.push_record(vec!["Old Record", "New Content"]);
    builder.push_record(vec![old_json.as_str(), content]);
    let mut table = builder.build();
    table.with(Modify::new(Rows::first()).with(Alignment::center()));
    info!("\n{}", table);

    Ok(())
}

fn log_new_record(record_type: RecordType, hostname: &str, content: &str) -> Result<()> {
    use tabled::{
        builder::Builder,
        settings::{object::Rows, Alignment, Modify},
    };

    let record = DnsRecord {
        id: String::new(),
        record_type: record_type.as_str().to_string(),
        name: hostname.to_string(),
        content: content.to_string(),
        proxied: Some(false),
        ttl: Some(1),
    };
    let record_json = serde_json::to_string_pretty(&record)?;

    let mut builder = Builder::default();
    builder.push_record(vec!["New DNS Record"]);
    builder.push_record(vec![record_json.as_str()]);
    let mut table = builder.build();
    table.with(Modify::new(Rows::first()).with(Alignment::center()));
    info!("\n{}", table);

    Ok(())
}
