//! CAA record values and certificate issuance policy view - RFC 8659
//!
//! A CAA record carries a tag (`issue`, `issuewild`, `issuemail`, `iodef`)
//! and a value. Issue-family values name an issuer domain followed by
//! `;`-separated `tag=value` parameters; the lone value `;` is the sentinel
//! that disallows issuance entirely. Iodef values are report URLs.
//! [`CaaPolicy`] is the live view over all CAA records of one name, keeping
//! the three disallow flags consistent with the record set after every
//! mutation.

use serde_derive::{Deserialize, Serialize};

use crate::records::attributes::field_separator;

/// Tags of the issue family plus incident reporting
pub const TAG_ISSUE: &str = "issue";
pub const TAG_ISSUE_WILD: &str = "issuewild";
pub const TAG_ISSUE_MAIL: &str = "issuemail";
pub const TAG_IODEF: &str = "iodef";

/// The value sentinel that disallows issuance for its tag
const DISALLOW_SENTINEL: &str = ";";

/// One `tag=value` parameter of an issue-family value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaaParameter {
    #[serde(rename = "Tag")]
    pub tag: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Decode one issuer parameter; only the first `=` separates tag from
/// value.
pub fn parse_caa_parameter(raw: &str) -> CaaParameter {
    match raw.find('=') {
        Some(idx) => CaaParameter {
            tag: raw[..idx].to_string(),
            value: raw[idx + 1..].to_string(),
        },
        None => CaaParameter {
            tag: raw.to_string(),
            value: String::new(),
        },
    }
}

pub fn stringify_caa_parameter(parameter: &CaaParameter) -> String {
    format!("{}={}", parameter.tag, parameter.value)
}

/// Decoded issue/issuewild/issuemail value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaaIssuer {
    /// `None` distinguishes "not yet chosen" in a fresh record from an
    /// explicitly empty issuer
    #[serde(rename = "IssuerDomainName", default, skip_serializing_if = "Option::is_none")]
    pub issuer_domain_name: Option<String>,
    #[serde(rename = "Parameters", default)]
    pub parameters: Vec<CaaParameter>,
}

/// Decode an issue-family value: `domain;param;param`.
///
/// With `newone` set an empty issuer domain decodes to `None` instead of
/// the empty string, so a fresh record shows no preselected issuer.
pub fn parse_caa_issuer(raw: &str, newone: bool) -> CaaIssuer {
    let mut fields = raw.split(';').map(str::trim);
    let domain = fields.next().unwrap_or("").to_string();
    let issuer_domain_name = if domain.is_empty() && newone {
        None
    } else {
        Some(domain)
    };
    let parameters = fields
        .filter(|field| !field.is_empty())
        .map(parse_caa_parameter)
        .collect();

    CaaIssuer {
        issuer_domain_name,
        parameters,
    }
}

/// Encode an issue-family value. The separator style follows `existing`
/// when supplied.
pub fn stringify_caa_issuer(issuer: &CaaIssuer, existing: Option<&str>) -> String {
    let separator = field_separator(existing);
    let mut fields = vec![issuer.issuer_domain_name.clone().unwrap_or_default()];
    for parameter in &issuer.parameters {
        fields.push(stringify_caa_parameter(parameter));
    }
    fields.join(separator)
}

/// Decoded iodef value: a report URL classified by scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaaIodef {
    pub kind: String,
    pub url: String,
}

/// Decode an iodef value. `mailto:` URLs keep only the address part;
/// web URLs keep the full URL and derive the kind from the scheme with a
/// trailing `s` stripped, so `https:` and `http:` both classify as `http`.
pub fn parse_caa_iodef(raw: &str) -> CaaIodef {
    if let Some(address) = raw.strip_prefix("mailto:") {
        CaaIodef {
            kind: "mailto".to_string(),
            url: address.to_string(),
        }
    } else {
        let scheme = raw.split(':').next().unwrap_or("");
        let kind = scheme.strip_suffix('s').unwrap_or(scheme).to_string();
        CaaIodef {
            kind,
            url: raw.to_string(),
        }
    }
}

pub fn stringify_caa_iodef(iodef: &CaaIodef) -> String {
    if iodef.kind == "mailto" {
        format!("mailto:{}", iodef.url)
    } else {
        iodef.url.clone()
    }
}

/// One CAA resource record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaaRecord {
    #[serde(default)]
    pub flags: u8,
    pub tag: String,
    pub value: String,
}

/// Live certificate issuance policy view over the CAA record set of one
/// name.
///
/// The record set is the system of record; the three disallow flags are
/// derived and refreshed after every mutation, so they always equal
/// [`CaaPolicy::has_disallow_issue`] recomputed over the records.
#[derive(Debug, Clone, Default)]
pub struct CaaPolicy {
    domain: String,
    records: Vec<CaaRecord>,
    disallow_issue: bool,
    disallow_issue_wild: bool,
    disallow_issue_mail: bool,
}

impl CaaPolicy {
    pub fn new(domain: &str, records: Vec<CaaRecord>) -> CaaPolicy {
        let mut policy = CaaPolicy {
            domain: domain.to_string(),
            records,
            disallow_issue: false,
            disallow_issue_wild: false,
            disallow_issue_mail: false,
        };
        policy.refresh_disallow_flags();
        policy
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn records(&self) -> &[CaaRecord] {
        &self.records
    }

    /// Release the record set, e.g. to hand it back to the zone editor.
    pub fn into_records(self) -> Vec<CaaRecord> {
        self.records
    }

    /// True iff a record with `tag` carries the disallow sentinel.
    pub fn has_disallow_issue(&self, tag: &str) -> bool {
        self.records
            .iter()
            .any(|record| record.tag == tag && record.value.trim() == DISALLOW_SENTINEL)
    }

    pub fn disallow_issue(&self) -> bool {
        self.disallow_issue
    }

    pub fn disallow_issue_wild(&self) -> bool {
        self.disallow_issue_wild
    }

    pub fn disallow_issue_mail(&self) -> bool {
        self.disallow_issue_mail
    }

    /// Toggle the disallow sentinel for `tag`: checking adds a sentinel
    /// record, unchecking removes every matching sentinel record.
    pub fn set_disallow_issue(&mut self, tag: &str, checked: bool) {
        if checked {
            self.records.push(CaaRecord {
                flags: 0,
                tag: tag.to_string(),
                value: DISALLOW_SENTINEL.to_string(),
            });
        } else {
            self.records
                .retain(|record| !(record.tag == tag && record.value.trim() == DISALLOW_SENTINEL));
        }
        self.refresh_disallow_flags();
    }

    pub fn add_record(&mut self, record: CaaRecord) {
        self.records.push(record);
        self.refresh_disallow_flags();
    }

    pub fn remove_record(&mut self, index: usize) {
        if index < self.records.len() {
            self.records.remove(index);
            self.refresh_disallow_flags();
        }
    }

    /// Decoded issuers for an issue-family tag, sentinels excluded.
    pub fn issuers(&self, tag: &str) -> Vec<CaaIssuer> {
        self.records
            .iter()
            .filter(|record| record.tag == tag && record.value.trim() != DISALLOW_SENTINEL)
            .map(|record| parse_caa_issuer(&record.value, false))
            .collect()
    }

    /// Decoded incident reporting URLs.
    pub fn iodefs(&self) -> Vec<CaaIodef> {
        self.records
            .iter()
            .filter(|record| record.tag == TAG_IODEF)
            .map(|record| parse_caa_iodef(&record.value))
            .collect()
    }

    fn refresh_disallow_flags(&mut self) {
        self.disallow_issue = self.has_disallow_issue(TAG_ISSUE);
        self.disallow_issue_wild = self.has_disallow_issue(TAG_ISSUE_WILD);
        self.disallow_issue_mail = self.has_disallow_issue(TAG_ISSUE_MAIL);
    }
}
