//! Zonekit
//!
//! The domain-logic core of a DNS zone management system. A zone groups the
//! records of a domain into named "services" (mail policy, web hosting,
//! certificate issuance policy, ...) attached to its subdomains; this crate
//! owns everything about those zones that has to be bit-exact with DNS
//! standards, while the surrounding application provides transport, storage
//! and UI.
//!
//! # Features
//!
//! * Domain name expansion, tree-aware ordering and validation
//! * IPv4/IPv6 reverse zone (in-addr.arpa / ip6.arpa) conversion
//! * Structured TXT record codecs (CAA, DKIM, DMARC, MTA-STS, TLS-RPT)
//! * Service restriction validation against provider capabilities
//!
//! # Architecture
//!
//! The crate is divided into two main modules:
//! * `zone` - Zone data model, domain name logic and service restrictions
//! * `records` - Structured TXT record grammars and their live policy views

/// Zone data model, domain name logic and service restrictions
pub mod zone;

/// Structured TXT record grammars and live policy views
pub mod records;
