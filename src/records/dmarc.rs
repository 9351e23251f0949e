//! DMARC policy record codec - RFC 7489 section 6.3
//!
//! Published as a TXT record at `_dmarc.<domain>`. Known tags: `v`
//! (version), `p` (policy), `sp` (subdomain policy), `adkim`/`aspf`
//! (alignment modes), `fo` (failure reporting options), `rf` (report
//! formats), `ri` (report interval), `rua`/`ruf` (aggregate/failure report
//! addresses) and `pct` (sampling rate). The `rua`, `ruf`, `fo` and `rf`
//! tags hold comma-separated lists.

use log::trace;
use serde_derive::{Deserialize, Serialize};

use crate::records::attributes::{field_separator, split_attributes, split_list};

pub const DMARC_VERSION: &str = "DMARCv1";

/// Decoded DMARC policy record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DmarcRecord {
    pub v: Option<String>,
    pub p: Option<String>,
    pub sp: Option<String>,
    pub adkim: Option<String>,
    pub aspf: Option<String>,
    pub fo: Vec<String>,
    pub rf: Vec<String>,
    pub ri: Option<String>,
    pub rua: Vec<String>,
    pub ruf: Vec<String>,
    pub pct: Option<String>,
}

/// Decode a DMARC TXT record. Never fails; unknown tags are dropped and
/// absent lists decode as empty.
pub fn parse_dmarc(raw: &str) -> DmarcRecord {
    let mut record = DmarcRecord::default();
    for (key, value) in split_attributes(raw) {
        match key.as_str() {
            "v" => record.v = Some(value),
            "p" => record.p = Some(value),
            "sp" => record.sp = Some(value),
            "adkim" => record.adkim = Some(value),
            "aspf" => record.aspf = Some(value),
            "fo" => record.fo = split_list(&value, ','),
            "rf" => record.rf = split_list(&value, ','),
            "ri" => record.ri = Some(value),
            "rua" => record.rua = split_list(&value, ','),
            "ruf" => record.ruf = split_list(&value, ','),
            "pct" => record.pct = Some(value),
            other => trace!("ignoring unknown DMARC tag {:?}", other),
        }
    }
    record
}

/// Encode a DMARC record in canonical tag order, defaulting the version and
/// omitting unset scalars and empty lists. The separator style follows
/// `existing` when supplied.
pub fn stringify_dmarc(record: &DmarcRecord, existing: Option<&str>) -> String {
    let separator = field_separator(existing);
    let mut fields = Vec::new();

    fields.push(format!(
        "v={}",
        record.v.as_deref().unwrap_or(DMARC_VERSION)
    ));
    if let Some(p) = &record.p {
        fields.push(format!("p={}", p));
    }
    if let Some(sp) = &record.sp {
        fields.push(format!("sp={}", sp));
    }
    if let Some(adkim) = &record.adkim {
        fields.push(format!("adkim={}", adkim));
    }
    if let Some(aspf) = &record.aspf {
        fields.push(format!("aspf={}", aspf));
    }
    if !record.fo.is_empty() {
        fields.push(format!("fo={}", record.fo.join(",")));
    }
    if !record.rf.is_empty() {
        fields.push(format!("rf={}", record.rf.join(",")));
    }
    if let Some(ri) = &record.ri {
        fields.push(format!("ri={}", ri));
    }
    if !record.rua.is_empty() {
        fields.push(format!("rua={}", record.rua.join(",")));
    }
    if !record.ruf.is_empty() {
        fields.push(format!("ruf={}", record.ruf.join(",")));
    }
    if let Some(pct) = &record.pct {
        fields.push(format!("pct={}", pct));
    }

    fields.join(separator)
}
