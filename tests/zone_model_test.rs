//! Integration tests for the zone data model, name logic and restriction
//! validation working together

use std::collections::HashMap;

use zonekit::records::tlsrpt::TlsRptRecord;
use zonekit::zone::name::{domain_compare, fqdn, fqdn_compare, nsttl, validate_domain};
use zonekit::zone::restrictions::pass_restrictions;
use zonekit::zone::reverse::{reverse_domain, unreverse_domain};
use zonekit::zone::service::{
    ProviderInfos, ServiceCombined, ServiceFamily, ServiceInfos, ServicePayload, ServiceRegistry,
    ServiceRestrictions, Zone,
};

fn service(domain: &str, payload: ServicePayload) -> ServiceCombined {
    ServiceCombined {
        domain: domain.to_string(),
        id: None,
        ttl: None,
        comment: None,
        payload,
    }
}

#[test]
fn name_canonicalization_properties() {
    assert_eq!(fqdn("@", "example.com."), "example.com.");
    assert_eq!(fqdn("sub", "example.com."), "sub.example.com.");

    assert!(domain_compare("sub.example.com", "example.com") == std::cmp::Ordering::Greater);
    assert!(domain_compare("a.example.com", "b.example.com") == std::cmp::Ordering::Less);
    assert!(fqdn_compare("example.com", "example.org") == std::cmp::Ordering::Less);
    assert!(fqdn_compare("examples.com", "example.com") == std::cmp::Ordering::Greater);

    assert_eq!(nsttl(93781), "1d 2h 3m 1s");
    assert_eq!(nsttl(0), "");

    assert_eq!(validate_domain("example.com", "", false), Some(true));
    assert_eq!(
        validate_domain(&format!("{}.com", "a".repeat(64)), "", false),
        Some(false)
    );
    assert_eq!(validate_domain("-example.com", "", true), Some(false));
    assert_eq!(validate_domain("_dmarc.example.com", "", true), Some(true));
    assert_eq!(validate_domain("", "", false), None);
}

#[test]
fn reverse_zone_conversion_properties() {
    assert_eq!(reverse_domain("192.168.1.1"), "1.1.168.192.in-addr.arpa.");
    assert_eq!(unreverse_domain("1.168.192.in-addr.arpa."), "192.168.1");

    let v6 = "2001:db8::8a2e:370:7334";
    assert_eq!(unreverse_domain(&reverse_domain(v6)), v6);
}

#[test]
fn zone_json_shape_roundtrip() {
    let mut zone = Zone::new(3600);
    zone.add_service(
        "",
        service(
            "example.com.",
            ServicePayload::Server {
                v4: vec!["192.0.2.10".parse().unwrap()],
                v6: vec!["2001:db8::10".parse().unwrap()],
            },
        ),
    );
    zone.add_service(
        "_smtp._tls",
        service(
            "_smtp._tls.example.com.",
            ServicePayload::TlsRpt {
                record: TlsRptRecord {
                    v: Some("TLSRPTv1".to_string()),
                    rua: vec!["mailto:tls@example.com".to_string()],
                },
            },
        ),
    );

    let json = serde_json::to_string(&zone).unwrap();
    let back: Zone = serde_json::from_str(&json).unwrap();

    assert_eq!(back.id, zone.id);
    assert_eq!(back.default_ttl, 3600);
    assert_eq!(back.services_at("").len(), 1);
    assert_eq!(back.services_at("_smtp._tls")[0].svctype(), "tls_rpt");
}

#[test]
fn restriction_check_against_zone_snapshot() {
    let mut zone = Zone::new(3600);
    zone.add_service(
        "www",
        service(
            "www.example.com.",
            ServicePayload::Server {
                v4: vec!["192.0.2.1".parse().unwrap()],
                v6: Vec::new(),
            },
        ),
    );

    let mut registry = ServiceRegistry::new();
    registry.insert(ServiceInfos {
        name: "Web hosting".to_string(),
        svctype: "server".to_string(),
        family: ServiceFamily::Provider,
        categories: vec!["web".to_string()],
        restrictions: None,
    });
    registry.insert(ServiceInfos {
        name: "Delegation".to_string(),
        svctype: "delegation".to_string(),
        family: ServiceFamily::Provider,
        categories: vec!["infra".to_string()],
        restrictions: Some(ServiceRestrictions {
            exclusive: vec!["server".to_string()],
            ..Default::default()
        }),
    });

    let delegation = registry.get("delegation").unwrap().clone();
    let provider = ProviderInfos {
        name: "Host Ltd".to_string(),
        capabilities: vec!["rr-1-a".to_string(), "rr-2-ns".to_string()],
    };

    // Blocked where the server lives, allowed on an empty subdomain
    assert_eq!(
        pass_restrictions(&delegation, &provider, &zone.services, "www", &registry),
        Some("Delegation cannot coexist with Web hosting.".to_string())
    );
    assert_eq!(
        pass_restrictions(&delegation, &provider, &zone.services, "mail", &registry),
        None
    );
}

#[test]
fn need_types_verdict_depends_on_capabilities() {
    let candidate = ServiceInfos {
        name: "Dual-stack server".to_string(),
        svctype: "server".to_string(),
        family: ServiceFamily::Provider,
        categories: Vec::new(),
        restrictions: Some(ServiceRestrictions {
            need_types: vec![28],
            ..Default::default()
        }),
    };
    let no_v6 = ProviderInfos {
        name: "Legacy".to_string(),
        capabilities: vec!["rr-1-a".to_string(), "rr-16-txt".to_string()],
    };

    let verdict = pass_restrictions(
        &candidate,
        &no_v6,
        &HashMap::new(),
        "",
        &ServiceRegistry::new(),
    );
    assert_eq!(
        verdict,
        Some("Dual-stack server is not available on this domain name hosting provider.".to_string())
    );
}
