//! Reverse zone (in-addr.arpa / ip6.arpa) conversion
//!
//! IPv4 reverse names carry one decimal octet per label, IPv6 reverse names
//! one hexadecimal nibble per label, both in reversed order under their
//! respective arpa suffix. Conversion is textual: addresses round-trip
//! modulo IPv6 zero-compression normalization.

const IPV4_SUFFIX: &str = "in-addr.arpa.";
const IPV6_SUFFIX: &str = "ip6.arpa.";

/// True iff the name lives under one of the reverse zone suffixes.
pub fn is_reverse_zone(dn: &str) -> bool {
    dn.ends_with(IPV4_SUFFIX) || dn.ends_with(IPV6_SUFFIX)
}

/// Convert a textual IPv4 or IPv6 address to its reverse zone name.
///
/// IPv4 accepts the classful shorthand: missing octets are filled with `0`
/// just before the last given octet, so `192.1` means `192.0.0.1`.
pub fn reverse_domain(ip: &str) -> String {
    if ip.contains(':') {
        reverse_ipv6(ip)
    } else {
        reverse_ipv4(ip)
    }
}

fn reverse_ipv4(ip: &str) -> String {
    let mut fields: Vec<String> = ip.split('.').map(str::to_string).collect();
    while fields.len() < 4 {
        let last = fields.len() - 1;
        fields.insert(last, "0".to_string());
    }

    let labels: Vec<String> = fields
        .into_iter()
        .rev()
        .map(|field| strip_leading_zeros(&field))
        .collect();

    format!("{}.{}", labels.join("."), IPV4_SUFFIX)
}

fn reverse_ipv6(ip: &str) -> String {
    let fields: Vec<&str> = ip.split(':').collect();
    let field_count = fields.len();

    let mut nibbles = String::new();
    for field in fields {
        if field.is_empty() {
            // The :: compression point stands in for the elided groups
            for _ in 0..4 * 7usize.saturating_sub(field_count) {
                nibbles.push('0');
            }
        } else {
            for _ in field.len()..4 {
                nibbles.push('0');
            }
            nibbles.push_str(&field.to_ascii_lowercase());
        }
    }

    let labels: Vec<String> = nibbles.chars().rev().map(|c| c.to_string()).collect();
    format!("{}.{}", labels.join("."), IPV6_SUFFIX)
}

/// Convert a reverse zone name back to a textual address.
///
/// The inverse of [`reverse_domain`]: octet labels are reassembled in
/// address order, nibble labels are regrouped into 16-bit fields and the
/// longest run of all-zero fields collapses to `::`. A name under neither
/// reverse suffix is returned unchanged.
pub fn unreverse_domain(dn: &str) -> String {
    if let Some(rest) = strip_suffix(dn, IPV4_SUFFIX) {
        let octets: Vec<&str> = rest.split('.').filter(|l| !l.is_empty()).collect();
        return octets.into_iter().rev().collect::<Vec<&str>>().join(".");
    }

    if let Some(rest) = strip_suffix(dn, IPV6_SUFFIX) {
        let nibbles: Vec<&str> = rest.split('.').filter(|l| !l.is_empty()).collect();
        let ordered: String = nibbles.into_iter().rev().collect();
        return compress_ipv6(&group_nibbles(&ordered));
    }

    dn.to_string()
}

fn strip_suffix<'a>(dn: &'a str, suffix: &str) -> Option<&'a str> {
    if dn.ends_with(suffix) {
        Some(dn[..dn.len() - suffix.len()].trim_end_matches('.'))
    } else {
        None
    }
}

fn strip_leading_zeros(field: &str) -> String {
    let stripped = field.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Regroup a nibble string into 16-bit address fields, leading zeros
/// stripped per field.
fn group_nibbles(nibbles: &str) -> Vec<String> {
    let chars: Vec<char> = nibbles.chars().collect();
    chars
        .chunks(4)
        .map(|chunk| strip_leading_zeros(&chunk.iter().collect::<String>()))
        .collect()
}

/// Collapse the longest run of all-zero fields to `::`.
fn compress_ipv6(groups: &[String]) -> String {
    let mut best_start = None;
    let mut best_len = 0;

    let mut i = 0;
    while i < groups.len() {
        if groups[i] == "0" {
            let start = i;
            while i < groups.len() && groups[i] == "0" {
                i += 1;
            }
            if i - start > best_len {
                best_len = i - start;
                best_start = Some(start);
            }
        } else {
            i += 1;
        }
    }

    match best_start {
        None => groups.join(":"),
        Some(start) => {
            let head = groups[..start].join(":");
            let tail = groups[start + best_len..].join(":");
            format!("{}::{}", head, tail)
        }
    }
}
