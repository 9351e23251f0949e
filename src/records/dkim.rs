//! DKIM key record codec - RFC 6376 section 3.6.1
//!
//! A DKIM public key is published as a TXT record under
//! `<selector>._domainkey.<domain>`. Known tags: `v` (version), `g`
//! (granularity), `h` (acceptable hash algorithms), `k` (key type), `n`
//! (notes), `p` (public key data), `s` (service types), `t` (flags) and
//! `f`. The `h`, `s`, `t` and `f` tags hold colon-separated lists.

use log::trace;
use serde_derive::{Deserialize, Serialize};

use crate::records::attributes::{field_separator, split_attributes, split_list};

pub const DKIM_VERSION: &str = "DKIM1";

/// Decoded DKIM key record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DkimRecord {
    pub v: Option<String>,
    pub g: Option<String>,
    pub h: Vec<String>,
    pub k: Option<String>,
    pub n: Option<String>,
    pub p: Option<String>,
    pub s: Vec<String>,
    pub t: Vec<String>,
    pub f: Vec<String>,
}

/// Decode a DKIM TXT record. Never fails; unknown tags are dropped and
/// absent lists decode as empty.
pub fn parse_dkim(raw: &str) -> DkimRecord {
    let mut record = DkimRecord::default();
    for (key, value) in split_attributes(raw) {
        match key.as_str() {
            "v" => record.v = Some(value),
            "g" => record.g = Some(value),
            "h" => record.h = split_list(&value, ':'),
            "k" => record.k = Some(value),
            "n" => record.n = Some(value),
            "p" => record.p = Some(value),
            "s" => record.s = split_list(&value, ':'),
            "t" => record.t = split_list(&value, ':'),
            "f" => record.f = split_list(&value, ':'),
            other => trace!("ignoring unknown DKIM tag {:?}", other),
        }
    }
    record
}

/// Encode a DKIM record in canonical tag order, defaulting the version and
/// omitting unset scalars and empty lists. The separator style follows
/// `existing` when supplied.
pub fn stringify_dkim(record: &DkimRecord, existing: Option<&str>) -> String {
    let separator = field_separator(existing);
    let mut fields = Vec::new();

    fields.push(format!("v={}", record.v.as_deref().unwrap_or(DKIM_VERSION)));
    if let Some(g) = &record.g {
        fields.push(format!("g={}", g));
    }
    if !record.h.is_empty() {
        fields.push(format!("h={}", record.h.join(":")));
    }
    if let Some(k) = &record.k {
        fields.push(format!("k={}", k));
    }
    if let Some(n) = &record.n {
        fields.push(format!("n={}", n));
    }
    if let Some(p) = &record.p {
        fields.push(format!("p={}", p));
    }
    if !record.s.is_empty() {
        fields.push(format!("s={}", record.s.join(":")));
    }
    if !record.t.is_empty() {
        fields.push(format!("t={}", record.t.join(":")));
    }
    if !record.f.is_empty() {
        fields.push(format!("f={}", record.f.join(":")));
    }

    fields.join(separator)
}
