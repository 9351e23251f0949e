//! Domain name expansion, ordering and validation
//!
//! Names are handled in their textual form. The canonical (absolute) form of
//! a name ends with a dot; the zone apex is written as the empty string or
//! `@` and expands to the zone origin. Ordering is DNS-tree aware: labels
//! are compared from the TLD inward so that a parent sorts before its
//! children and siblings sort alphabetically.

use std::cmp::Ordering;

use lazy_static::lazy_static;
use regex::Regex;

/// RFC 1035 limits on textual names
const MAX_NAME_LENGTH: usize = 254;
const MAX_LABEL_LENGTH: usize = 63;

lazy_static! {
    /// Hostname label: `*`, or alphanumeric with internal hyphens, allowing
    /// one leading underscore for service labels such as `_dmarc`
    static ref HOSTNAME_LABEL_REGEX: Regex =
        Regex::new(r"^(\*|_?[A-Za-z0-9]([A-Za-z0-9-]?[A-Za-z0-9])*)$")
            .expect("Failed to compile hostname label regex");
}

/// Access to the domain name carried by a value.
///
/// Lets the comparators accept bare strings as well as richer types such as
/// [`ServiceCombined`](crate::zone::service::ServiceCombined).
pub trait HasDomain {
    fn domain(&self) -> &str;
}

impl HasDomain for str {
    fn domain(&self) -> &str {
        self
    }
}

impl<'a> HasDomain for &'a str {
    fn domain(&self) -> &str {
        self
    }
}

impl HasDomain for String {
    fn domain(&self) -> &str {
        self.as_str()
    }
}

/// Qualify a possibly-relative domain name against `origin`.
///
/// `@` and the empty string refer to the origin itself; a name already
/// ending with a dot is absolute and returned unchanged.
pub fn fqdn(input: &str, origin: &str) -> String {
    if input.is_empty() || input == "@" {
        origin.to_string()
    } else if input.ends_with('.') {
        input.to_string()
    } else {
        format!("{}.{}", input, origin)
    }
}

/// Split a name into labels ordered from the TLD inward, dropping the empty
/// label produced by a trailing dot.
fn labels_from_root(name: &str) -> Vec<&str> {
    let mut labels: Vec<&str> = name.split('.').rev().collect();
    if labels.first() == Some(&"") {
        labels.remove(0);
    }
    labels
}

/// Case-insensitive label comparison with a stable tiebreak on the raw text.
fn label_compare(a: &str, b: &str) -> Ordering {
    match a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()) {
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}

/// Compare two domain names for zone tree listings.
///
/// Labels are compared pairwise starting at the TLD; the first difference
/// wins. When one name is a prefix of the other (in tree terms, an
/// ancestor), the shorter name sorts first, so a parent always precedes its
/// subdomains.
pub fn domain_compare<A, B>(a: &A, b: &B) -> Ordering
where
    A: HasDomain + ?Sized,
    B: HasDomain + ?Sized,
{
    let a_labels = labels_from_root(a.domain());
    let b_labels = labels_from_root(b.domain());

    let depth = a_labels.len().min(b_labels.len());
    for i in 0..depth {
        match label_compare(a_labels[i], b_labels[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    a_labels.len().cmp(&b_labels.len())
}

/// Compare two fully qualified names grouping them by apex name rather than
/// by TLD.
///
/// The comparison starts at the second-level label, so `example.com` and
/// `example.org` sort next to each other; the TLD only discriminates once
/// everything else ties. This is intentionally different from
/// [`domain_compare`] and the two must not be merged.
pub fn fqdn_compare<A, B>(a: &A, b: &B) -> Ordering
where
    A: HasDomain + ?Sized,
    B: HasDomain + ?Sized,
{
    let a_labels = labels_from_root(a.domain());
    let b_labels = labels_from_root(b.domain());

    let depth = a_labels.len().min(b_labels.len());
    for i in 1..depth {
        match label_compare(a_labels[i], b_labels[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    match a_labels.len().cmp(&b_labels.len()) {
        Ordering::Equal => (),
        other => return other,
    }

    if a_labels.is_empty() {
        return Ordering::Equal;
    }
    label_compare(a_labels[0], b_labels[0])
}

/// Validate a domain name, optionally against an origin it must live under.
///
/// Returns `None` for empty input ("no opinion yet", e.g. an untouched form
/// field), `Some(false)` on the first violated constraint, `Some(true)`
/// otherwise. With `hostname` set, each label must additionally look like a
/// hostname label (or `*`, or an underscore-prefixed service label).
pub fn validate_domain(dn: &str, origin: &str, hostname: bool) -> Option<bool> {
    if dn.is_empty() {
        return None;
    }

    let expanded = fqdn(dn, origin);
    if !expanded.ends_with(origin) {
        return Some(false);
    }
    if expanded.is_empty() || expanded.len() > MAX_NAME_LENGTH {
        return Some(false);
    }

    let mut labels: Vec<&str> = expanded.split('.').collect();
    if labels.last() == Some(&"") {
        labels.pop();
    }

    for label in labels {
        if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
            return Some(false);
        }
        if hostname && !HOSTNAME_LABEL_REGEX.is_match(label) {
            return Some(false);
        }
    }

    Some(true)
}

/// Render a TTL in seconds as the `1d 2h 3m 1s` shorthand, zero components
/// omitted. Zero renders as the empty string.
pub fn nsttl(input: u32) -> String {
    const UNITS: [(&str, u32); 4] = [("d", 86400), ("h", 3600), ("m", 60), ("s", 1)];

    let mut remaining = input;
    let mut parts = Vec::new();
    for &(unit, seconds) in UNITS.iter() {
        let count = remaining / seconds;
        if count > 0 {
            parts.push(format!("{}{}", count, unit));
            remaining %= seconds;
        }
    }
    parts.join(" ")
}
