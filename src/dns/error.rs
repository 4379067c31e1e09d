// ABOUTME: Error types for DNS record management
// ABOUTME: Defines failures reported by DnsManager implementations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    #[error("Invalid DNS record '{fqdn}': {reason}")]
    InvalidRecord { fqdn: String, reason: String },

    #[error("Unknown DNS record type: {0}")]
    UnknownType(String),
}

pub type Result<T> = std::result::Result<T, DnsError>;
