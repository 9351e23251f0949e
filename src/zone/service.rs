//! Zone and service data model
//!
//! A zone maps relative subdomain names (the apex is the empty string) to
//! the list of services deployed there. A service is a logical grouping of
//! resource records under a named capability: its wire shape carries the
//! meta fields `_domain`, `_id`, `_ttl` and `_comment` next to a payload
//! tagged by `_svctype`. Service specifications (`ServiceInfos`) and the
//! hosting provider's declared capabilities (`ProviderInfos`) come from
//! external registries; this module only models their contents.

use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};

use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use uuid::Uuid;

use crate::records::caa::CaaRecord;
use crate::records::dkim::DkimRecord;
use crate::records::dmarc::DmarcRecord;
use crate::records::mtasts::MtaStsRecord;
use crate::records::tlsrpt::TlsRptRecord;
use crate::zone::name::{domain_compare, HasDomain};

/// A DNS zone: the unit of service management
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub default_ttl: u32,
    pub last_modified: DateTime<Utc>,
    /// Services deployed per relative subdomain; `""` is the zone apex
    #[serde(default)]
    pub services: HashMap<String, Vec<ServiceCombined>>,
}

impl Zone {
    pub fn new(default_ttl: u32) -> Zone {
        Zone {
            id: Uuid::new_v4().to_string(),
            default_ttl,
            last_modified: Utc::now(),
            services: HashMap::new(),
        }
    }

    /// Services currently deployed at `subdomain`, if any
    pub fn services_at(&self, subdomain: &str) -> &[ServiceCombined] {
        self.services
            .get(subdomain)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// Attach a service to `subdomain`, preserving insertion order
    pub fn add_service(&mut self, subdomain: &str, service: ServiceCombined) {
        self.services
            .entry(subdomain.to_string())
            .or_insert_with(Vec::new)
            .push(service);
        self.last_modified = Utc::now();
    }

    /// Subdomain keys in zone tree display order: parents before children,
    /// siblings alphabetical
    pub fn subdomains_sorted(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.services.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| domain_compare(a, b));
        keys
    }
}

/// One deployed service: shared meta fields plus the type-tagged payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCombined {
    #[serde(rename = "_domain")]
    pub domain: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "_ttl", default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(rename = "_comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(flatten)]
    pub payload: ServicePayload,
}

impl ServiceCombined {
    /// The service type identifier, as carried by the `_svctype` tag
    pub fn svctype(&self) -> &'static str {
        self.payload.svctype()
    }
}

impl HasDomain for ServiceCombined {
    fn domain(&self) -> &str {
        &self.domain
    }
}

/// Type-specific service payload, tagged by the `_svctype` identifier
///
/// Replaces the untyped per-type dictionaries of the wire format with
/// exhaustively checked variants; decoders for the policy types live in
/// [`crate::records`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_svctype")]
pub enum ServicePayload {
    /// Certificate issuance policy: the CAA record set of one name
    #[serde(rename = "caa")]
    CertIssuance { records: Vec<CaaRecord> },
    /// DKIM public key published under `<selector>._domainkey`
    #[serde(rename = "dkim")]
    DkimKey { selector: String, record: DkimRecord },
    /// DMARC mail authentication policy
    #[serde(rename = "dmarc")]
    DmarcPolicy { record: DmarcRecord },
    /// MTA-STS policy presence marker
    #[serde(rename = "mta_sts")]
    MtaSts { record: MtaStsRecord },
    /// SMTP TLS reporting policy
    #[serde(rename = "tls_rpt")]
    TlsRpt { record: TlsRptRecord },
    /// Plain server hosting: address records
    #[serde(rename = "server")]
    Server {
        #[serde(default)]
        v4: Vec<Ipv4Addr>,
        #[serde(default)]
        v6: Vec<Ipv6Addr>,
    },
    /// Subzone delegation to external name servers
    #[serde(rename = "delegation")]
    Delegation { ns: Vec<String> },
}

impl ServicePayload {
    pub fn svctype(&self) -> &'static str {
        match self {
            ServicePayload::CertIssuance { .. } => "caa",
            ServicePayload::DkimKey { .. } => "dkim",
            ServicePayload::DmarcPolicy { .. } => "dmarc",
            ServicePayload::MtaSts { .. } => "mta_sts",
            ServicePayload::TlsRpt { .. } => "tls_rpt",
            ServicePayload::Server { .. } => "server",
            ServicePayload::Delegation { .. } => "delegation",
        }
    }
}

/// Presentation family of a service specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceFamily {
    Abstract,
    Provider,
    Hidden,
}

impl Default for ServiceFamily {
    fn default() -> ServiceFamily {
        ServiceFamily::Provider
    }
}

/// Specification of a service type, as published by the service registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfos {
    pub name: String,
    #[serde(rename = "_svctype")]
    pub svctype: String,
    #[serde(default)]
    pub family: ServiceFamily,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<ServiceRestrictions>,
}

/// Declarative constraints on where a service may be deployed
///
/// Absence of the whole struct means the service is unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceRestrictions {
    /// Requires to be the only service in its subdomain
    pub alone: bool,
    /// Service types this one cannot coexist with
    pub exclusive: Vec<String>,
    /// May be deployed under a leaf service
    pub glue: bool,
    /// Forbids subdomains beneath it
    pub leaf: bool,
    /// Tolerated next to an `alone` service
    #[serde(rename = "nearAlone")]
    pub near_alone: bool,
    /// RR type codes the hosting provider must support
    #[serde(rename = "needTypes")]
    pub need_types: Vec<u16>,
    /// Only deployable at the zone apex
    #[serde(rename = "rootOnly")]
    pub root_only: bool,
    /// At most one instance per subdomain
    pub single: bool,
}

/// Hosting provider description: which records it can host
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderInfos {
    #[serde(default)]
    pub name: String,
    /// Capability strings; entries shaped `rr-<typecode>-<mnemonic>`
    /// declare hostable RR types
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// Read-only snapshot of the service specification registry
///
/// The registry is loaded asynchronously by an external collaborator; an
/// empty snapshot means "not yet populated" and restriction checks degrade
/// permissively. Always passed explicitly, never ambient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceRegistry {
    specs: HashMap<String, ServiceInfos>,
}

impl ServiceRegistry {
    pub fn new() -> ServiceRegistry {
        ServiceRegistry::default()
    }

    pub fn insert(&mut self, infos: ServiceInfos) {
        self.specs.insert(infos.svctype.clone(), infos);
    }

    pub fn get(&self, svctype: &str) -> Option<&ServiceInfos> {
        self.specs.get(svctype)
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Display name for a service type, falling back to the raw identifier
    /// when the registry has no entry for it
    pub fn display_name<'a>(&'a self, svctype: &'a str) -> &'a str {
        self.get(svctype).map(|s| s.name.as_str()).unwrap_or(svctype)
    }
}
