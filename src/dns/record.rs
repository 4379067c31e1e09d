// ABOUTME: DNS record and record-match data types
// ABOUTME: Records carry an optional priority and expose fqdn/value for template rendering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::DnsError;
use crate::priority::HasPriority;
use crate::template::{Reflectable, StringProperty};

pub const DEFAULT_TTL: u32 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Txt,
    Srv,
    Caa,
    Ptr,
}

impl DnsType {
    pub fn as_str(self) -> &'static str {
        match self {
            DnsType::A => "A",
            DnsType::Aaaa => "AAAA",
            DnsType::Cname => "CNAME",
            DnsType::Mx => "MX",
            DnsType::Ns => "NS",
            DnsType::Txt => "TXT",
            DnsType::Srv => "SRV",
            DnsType::Caa => "CAA",
            DnsType::Ptr => "PTR",
        }
    }
}

impl FromStr for DnsType {
    type Err = DnsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(DnsType::A),
            "AAAA" => Ok(DnsType::Aaaa),
            "CNAME" => Ok(DnsType::Cname),
            "MX" => Ok(DnsType::Mx),
            "NS" => Ok(DnsType::Ns),
            "TXT" => Ok(DnsType::Txt),
            "SRV" => Ok(DnsType::Srv),
            "CAA" => Ok(DnsType::Caa),
            "PTR" => Ok(DnsType::Ptr),
            _ => Err(DnsError::UnknownType(s.to_string())),
        }
    }
}

impl fmt::Display for DnsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(rename = "type")]
    pub record_type: DnsType,
    pub fqdn: String,
    pub value: String,
    #[serde(default = "default_ttl")]
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

fn default_ttl() -> u32 {
    DEFAULT_TTL
}

impl DnsRecord {
    pub fn new(record_type: DnsType, fqdn: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            record_type,
            fqdn: fqdn.into(),
            value: value.into(),
            ttl: DEFAULT_TTL,
            priority: None,
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Records are identified by type, name and value
    pub fn same_identity(&self, other: &DnsRecord) -> bool {
        self.record_type == other.record_type
            && self.fqdn.eq_ignore_ascii_case(&other.fqdn)
            && self.value == other.value
    }
}

impl HasPriority for DnsRecord {
    fn priority(&self) -> Option<i32> {
        self.priority
    }
}

fn get_fqdn(record: &DnsRecord) -> Option<&str> {
    Some(&record.fqdn)
}

fn set_fqdn(record: &mut DnsRecord, value: String) {
    record.fqdn = value;
}

fn get_value(record: &DnsRecord) -> Option<&str> {
    Some(&record.value)
}

fn set_value(record: &mut DnsRecord, value: String) {
    record.value = value;
}

impl Reflectable for DnsRecord {
    fn string_properties() -> Vec<StringProperty<Self>> {
        vec![
            StringProperty::new("fqdn", get_fqdn, set_fqdn),
            StringProperty::new("value", get_value, set_value),
        ]
    }
}

/// Filter over records. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordMatch {
    #[serde(default, rename = "type")]
    pub record_type: Option<DnsType>,
    #[serde(default)]
    pub fqdn: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    /// Matches the domain itself and every name below it
    #[serde(default)]
    pub subdomain: Option<String>,
}

impl DnsRecordMatch {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn for_fqdn(fqdn: impl Into<String>) -> Self {
        Self {
            fqdn: Some(fqdn.into()),
            ..Self::default()
        }
    }

    pub fn for_subdomain(domain: impl Into<String>) -> Self {
        Self {
            subdomain: Some(domain.into()),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, record_type: DnsType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn matches(&self, record: &DnsRecord) -> bool {
        if let Some(record_type) = self.record_type {
            if record.record_type != record_type {
                return false;
            }
        }
        if let Some(ref fqdn) = self.fqdn {
            if !record.fqdn.eq_ignore_ascii_case(fqdn) {
                return false;
            }
        }
        if let Some(ref value) = self.value {
            if &record.value != value {
                return false;
            }
        }
        if let Some(ref domain) = self.subdomain {
            if !in_domain(&record.fqdn, domain) {
                return false;
            }
        }
        true
    }
}

pub(crate) fn in_domain(fqdn: &str, domain: &str) -> bool {
    let fqdn = fqdn.trim_end_matches('.').to_ascii_lowercase();
    let domain = domain.trim_end_matches('.').to_ascii_lowercase();
    fqdn == domain || fqdn.ends_with(&format!(".{}", domain))
}
