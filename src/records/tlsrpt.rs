//! TLS-RPT record codec - RFC 8460 section 3
//!
//! The `_smtp._tls.<domain>` TXT record declares where SMTP TLS reports
//! should be delivered: `v` (version) and `rua` (comma-separated list of
//! report URIs). [`TlsRptPolicy`] is the live view bound to one TXT
//! resource record: every mutation immediately re-encodes into the bound
//! record's text, so the raw text is always the current state.

use log::trace;
use serde_derive::{Deserialize, Serialize};

use crate::records::attributes::{field_separator, split_attributes, split_list};

pub const TLS_RPT_VERSION: &str = "TLSRPTv1";

/// Decoded TLS-RPT record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsRptRecord {
    pub v: Option<String>,
    pub rua: Vec<String>,
}

/// Decode a TLS-RPT TXT record. Never fails; unknown tags are dropped.
pub fn parse_tls_rpt(raw: &str) -> TlsRptRecord {
    let mut record = TlsRptRecord::default();
    for (key, value) in split_attributes(raw) {
        match key.as_str() {
            "v" => record.v = Some(value),
            "rua" => record.rua = split_list(&value, ','),
            other => trace!("ignoring unknown TLS-RPT tag {:?}", other),
        }
    }
    record
}

/// Encode a TLS-RPT record, defaulting the version and omitting an empty
/// `rua` list. The separator style follows `existing` when supplied.
pub fn stringify_tls_rpt(record: &TlsRptRecord, existing: Option<&str>) -> String {
    let separator = field_separator(existing);
    let mut fields = Vec::new();

    fields.push(format!(
        "v={}",
        record.v.as_deref().unwrap_or(TLS_RPT_VERSION)
    ));
    if !record.rua.is_empty() {
        fields.push(format!("rua={}", record.rua.join(",")));
    }

    fields.join(separator)
}

/// The TXT resource record a [`TlsRptPolicy`] is bound to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundTxtRecord {
    /// Owner name of the record
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Raw TXT data; the system of record
    pub text: String,
}

/// Live TLS reporting policy view over one TXT record.
///
/// A write-through derived view: accessors mutate the decoded value and
/// immediately re-encode it into the bound record's text, using the
/// record's previous text as the separator-style reference. There is no
/// separate commit step.
#[derive(Debug, Clone)]
pub struct TlsRptPolicy {
    record: BoundTxtRecord,
    value: TlsRptRecord,
}

impl TlsRptPolicy {
    /// Bind to a TXT record, decoding its current text.
    pub fn new(record: BoundTxtRecord) -> TlsRptPolicy {
        let value = parse_tls_rpt(&record.text);
        TlsRptPolicy { record, value }
    }

    pub fn record(&self) -> &BoundTxtRecord {
        &self.record
    }

    /// Release the bound record, e.g. to hand it back to the zone editor.
    pub fn into_record(self) -> BoundTxtRecord {
        self.record
    }

    pub fn version(&self) -> &str {
        self.value.v.as_deref().unwrap_or(TLS_RPT_VERSION)
    }

    pub fn set_version(&mut self, version: &str) {
        self.value.v = Some(version.to_string());
        self.sync();
    }

    pub fn rua(&self) -> &[String] {
        &self.value.rua
    }

    pub fn set_rua(&mut self, rua: Vec<String>) {
        self.value.rua = rua;
        self.sync();
    }

    pub fn add_rua(&mut self, uri: &str) {
        self.value.rua.push(uri.to_string());
        self.sync();
    }

    pub fn update_rua(&mut self, index: usize, uri: &str) {
        if let Some(slot) = self.value.rua.get_mut(index) {
            *slot = uri.to_string();
            self.sync();
        }
    }

    pub fn remove_rua(&mut self, index: usize) {
        if index < self.value.rua.len() {
            self.value.rua.remove(index);
            self.sync();
        }
    }

    fn sync(&mut self) {
        self.record.text = stringify_tls_rpt(&self.value, Some(&self.record.text));
    }
}
