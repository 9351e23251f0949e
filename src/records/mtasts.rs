//! MTA-STS TXT record codec - RFC 8461 section 3.1
//!
//! The `_mta-sts.<domain>` TXT record only signals that a policy exists and
//! when it last changed: `v` (version) and `id` (policy instance
//! identifier).

use log::trace;
use serde_derive::{Deserialize, Serialize};

use crate::records::attributes::{field_separator, split_attributes};

pub const MTA_STS_VERSION: &str = "STSv1";

/// Decoded MTA-STS TXT record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MtaStsRecord {
    pub v: Option<String>,
    pub id: Option<String>,
}

/// Decode an MTA-STS TXT record. Never fails; unknown tags are dropped.
pub fn parse_mta_sts(raw: &str) -> MtaStsRecord {
    let mut record = MtaStsRecord::default();
    for (key, value) in split_attributes(raw) {
        match key.as_str() {
            "v" => record.v = Some(value),
            "id" => record.id = Some(value),
            other => trace!("ignoring unknown MTA-STS tag {:?}", other),
        }
    }
    record
}

/// Encode an MTA-STS record, defaulting the version and omitting an unset
/// `id`. The separator style follows `existing` when supplied.
pub fn stringify_mta_sts(record: &MtaStsRecord, existing: Option<&str>) -> String {
    let separator = field_separator(existing);
    let mut fields = Vec::new();

    fields.push(format!(
        "v={}",
        record.v.as_deref().unwrap_or(MTA_STS_VERSION)
    ));
    if let Some(id) = &record.id {
        fields.push(format!("id={}", id));
    }

    fields.join(separator)
}
