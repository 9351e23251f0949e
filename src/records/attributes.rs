//! Shared key=value attribute tokenizer
//!
//! The TXT policy grammars (DKIM, DMARC, MTA-STS, TLS-RPT and CAA issuer
//! values) all encode an attribute sequence: fields separated by `;`, each
//! field a `key=value` pair, list values further delimited by `:` or `,`.
//! Records are operator free text, frequently mid-edit, so tokenization is
//! tolerant: empty fields are skipped and a field without `=` becomes a key
//! with an empty value.

/// Split a raw record into `(key, value)` pairs.
///
/// Only the first `=` of a field separates key from value; the value may
/// itself contain `=`.
pub fn split_attributes(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| match field.find('=') {
            Some(idx) => (
                field[..idx].trim().to_string(),
                field[idx + 1..].to_string(),
            ),
            None => (field.to_string(), String::new()),
        })
        .collect()
}

/// Split a list-typed attribute value on its delimiter, dropping empty
/// entries.
pub fn split_list(value: &str, delimiter: char) -> Vec<String> {
    value
        .split(delimiter)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Pick the field separator for stringify, honoring the style of the
/// previous raw text when one is supplied. Decided once per record, never
/// per field.
pub fn field_separator(existing: Option<&str>) -> &'static str {
    match existing {
        Some(previous) if previous.contains("; ") => "; ",
        _ => ";",
    }
}
