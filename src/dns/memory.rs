// ABOUTME: In-memory DnsManager implementation
// ABOUTME: Stages writes until publish and serves published records sorted by priority

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::error::{DnsError, Result};
use super::record::{in_domain, DnsRecord, DnsRecordMatch};
use super::DnsManager;
use crate::priority::sort_by_priority;
use crate::template::has_templates;

#[derive(Debug, Default)]
struct Zone {
    published: Vec<DnsRecord>,
    pending: Vec<DnsRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryDnsManager {
    zone: RwLock<Zone>,
}

impl MemoryDnsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of written records not yet published
    pub async fn pending_count(&self) -> usize {
        self.zone.read().await.pending.len()
    }
}

fn validate(record: &DnsRecord) -> Result<()> {
    let invalid = |reason: &str| DnsError::InvalidRecord {
        fqdn: record.fqdn.clone(),
        reason: reason.to_string(),
    };

    if record.fqdn.trim().is_empty() {
        return Err(invalid("fqdn is empty"));
    }
    if record.value.trim().is_empty() {
        return Err(invalid("value is empty"));
    }
    if has_templates(&record.fqdn) || has_templates(&record.value) {
        return Err(invalid("record still contains unrendered templates"));
    }
    Ok(())
}

fn upsert(records: &mut Vec<DnsRecord>, record: DnsRecord) {
    match records.iter_mut().find(|existing| existing.same_identity(&record)) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
}

#[async_trait]
impl DnsManager for MemoryDnsManager {
    async fn list(&self, criteria: &DnsRecordMatch) -> Result<Vec<DnsRecord>> {
        let zone = self.zone.read().await;
        let mut records: Vec<DnsRecord> = zone
            .published
            .iter()
            .filter(|record| criteria.matches(record))
            .cloned()
            .collect();
        sort_by_priority(&mut records);
        Ok(records)
    }

    async fn write(&self, record: DnsRecord) -> Result<()> {
        validate(&record)?;
        debug!(
            "Staging {} record {} -> {}",
            record.record_type, record.fqdn, record.value
        );
        let mut zone = self.zone.write().await;
        upsert(&mut zone.pending, record);
        Ok(())
    }

    async fn publish(&self) -> Result<()> {
        let mut zone = self.zone.write().await;
        let pending = std::mem::take(&mut zone.pending);
        let count = pending.len();
        for record in pending {
            upsert(&mut zone.published, record);
        }
        info!("Published {} DNS record(s)", count);
        Ok(())
    }

    async fn remove(&self, criteria: &DnsRecordMatch) -> Result<usize> {
        let mut zone = self.zone.write().await;
        let before = zone.published.len() + zone.pending.len();
        zone.published.retain(|record| !criteria.matches(record));
        zone.pending.retain(|record| !criteria.matches(record));
        let removed = before - (zone.published.len() + zone.pending.len());
        debug!("Removed {} DNS record(s)", removed);
        Ok(removed)
    }

    async fn remove_all(&self, domain: &str) -> Result<()> {
        let mut zone = self.zone.write().await;
        zone.published.retain(|record| !in_domain(&record.fqdn, domain));
        zone.pending.retain(|record| !in_domain(&record.fqdn, domain));
        info!("Removed all DNS records under {}", domain);
        Ok(())
    }
}
