//! Structured TXT Record Codecs
//!
//! DNS TXT records are used to carry several structured policy grammars.
//! Each codec in this module owns the bidirectional mapping between one
//! grammar and its decoded value:
//! * CAA issue/issuewild/issuemail/iodef values - RFC 8659
//! * DKIM key records - RFC 6376 section 3.6.1
//! * DMARC policy records - RFC 7489 section 6.3
//! * MTA-STS TXT records - RFC 8461 section 3.1
//! * TLS-RPT records - RFC 8460 section 3
//!
//! The raw record text is the system of record: parsers never fail (operator
//! free text degrades to empty values so the UI stays editable), and
//! stringify reproduces the separator style of the previous raw text when it
//! is supplied.
//!
//! # Module Structure
//!
//! * `attributes` - shared key=value attribute tokenizer
//! * `caa` - CAA issuer/iodef codec and the `CaaPolicy` owner object
//! * `dkim` - DKIM key record codec
//! * `dmarc` - DMARC policy codec
//! * `mtasts` - MTA-STS TXT codec
//! * `tlsrpt` - TLS-RPT codec and the `TlsRptPolicy` owner object

/// Shared key=value attribute tokenizer
pub mod attributes;

/// CAA record values and certificate issuance policy view
pub mod caa;

/// DKIM key record codec
pub mod dkim;

/// DMARC policy record codec
pub mod dmarc;

/// MTA-STS TXT record codec
pub mod mtasts;

/// TLS-RPT record codec and reporting policy view
pub mod tlsrpt;
