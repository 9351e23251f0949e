//! Zone Management Core
//!
//! This module provides the zone-side domain logic:
//! * Domain name expansion, comparison and validation
//! * Reverse zone conversion for IPv4 and IPv6 addresses
//! * The zone/service data model shared with API collaborators
//! * Service restriction validation
//!
//! # Module Structure
//!
//! * `name` - Domain name expansion, ordering, validation and TTL display
//! * `reverse` - in-addr.arpa / ip6.arpa conversion
//! * `record_type` - DNS record type code registry
//! * `service` - Zone, service and provider data model
//! * `restrictions` - Service restriction validator

/// Domain name expansion, ordering, validation and TTL display
pub mod name;

/// Reverse zone (in-addr.arpa / ip6.arpa) conversion
pub mod reverse;

/// DNS record type code registry
pub mod record_type;

/// Zone, service and provider data model
pub mod service;

/// Service restriction validation
pub mod restrictions;
