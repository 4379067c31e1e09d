// ABOUTME: DNS record management contract
// ABOUTME: Defines the DnsManager trait, record types and an in-memory implementation

pub mod error;
pub mod memory;
pub mod record;

use async_trait::async_trait;

pub use error::{DnsError, Result};
pub use memory::MemoryDnsManager;
pub use record::{DnsRecord, DnsRecordMatch, DnsType, DEFAULT_TTL};

#[async_trait]
pub trait DnsManager: Send + Sync {
    /// Published records matching `criteria`
    async fn list(&self, criteria: &DnsRecordMatch) -> Result<Vec<DnsRecord>>;

    /// Stage a record for the next publish
    async fn write(&self, record: DnsRecord) -> Result<()>;

    /// Make staged records visible
    async fn publish(&self) -> Result<()>;

    /// Remove matching records, returning how many were removed
    async fn remove(&self, criteria: &DnsRecordMatch) -> Result<usize>;

    /// Remove every record in `domain` and below it
    async fn remove_all(&self, domain: &str) -> Result<()>;
}
