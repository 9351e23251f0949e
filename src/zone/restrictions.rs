//! Service restriction validation
//!
//! Decides whether a candidate service may be attached to a zone node,
//! given the services already deployed there and the hosting provider's
//! declared capabilities. Rules are evaluated in a fixed order and the
//! first failing rule's message is returned; the order is part of the user
//! experience and must not change.

use std::collections::HashMap;

use log::debug;

use crate::zone::service::{
    ProviderInfos, ServiceCombined, ServiceInfos, ServiceRegistry, ServiceRestrictions,
};

/// Derive the RR type codes a provider can host from its capability
/// strings.
///
/// Only entries shaped `rr-<digits>-<mnemonic>` count; the numeric code is
/// the text between `rr-` and the next dash. Entries that do not follow the
/// convention are skipped.
pub fn provider_record_types(provider: &ProviderInfos) -> Vec<u16> {
    let mut types = Vec::new();
    for capability in &provider.capabilities {
        if !capability.starts_with("rr-") || capability.len() < 5 {
            continue;
        }
        let end = match capability[4..].find('-') {
            Some(offset) => offset + 4,
            None => continue,
        };
        match capability[3..end].parse::<u16>() {
            Ok(code) => types.push(code),
            Err(_) => debug!("skipping malformed capability {:?}", capability),
        }
    }
    types
}

/// Check whether `candidate` may be deployed at `subdomain`.
///
/// Returns `None` when the service is allowed, `Some(reason)` with the
/// first failing rule's user-facing message otherwise. Pure over its five
/// inputs; the registry snapshot is passed explicitly and an unpopulated
/// one degrades to the permissive answer rather than blocking the UI.
pub fn pass_restrictions(
    candidate: &ServiceInfos,
    provider: &ProviderInfos,
    zone_services: &HashMap<String, Vec<ServiceCombined>>,
    subdomain: &str,
    registry: &ServiceRegistry,
) -> Option<String> {
    let unrestricted = ServiceRestrictions::default();
    let restrictions = candidate.restrictions.as_ref().unwrap_or(&unrestricted);

    // The hosting provider has to support every record type the service
    // deploys.
    if !restrictions.need_types.is_empty() {
        let available = provider_record_types(provider);
        for needed in &restrictions.need_types {
            if !available.contains(needed) {
                debug!(
                    "{} needs rr type {} unsupported by provider",
                    candidate.svctype, needed
                );
                return Some(format!(
                    "{} is not available on this domain name hosting provider.",
                    candidate.name
                ));
            }
        }
    }

    if restrictions.root_only && !subdomain.is_empty() {
        return Some(format!(
            "{} can only be present at the root of your domain.",
            candidate.name
        ));
    }

    // The remaining rules need peer data; without deployed peers or a
    // populated registry there is nothing to check.
    let peers = match zone_services.get(subdomain) {
        Some(peers) => peers,
        None => return None,
    };
    if registry.is_empty() {
        return None;
    }

    if restrictions.alone {
        for peer in peers {
            if peer.svctype() == candidate.svctype {
                continue;
            }
            let peer_near_alone = registry
                .get(peer.svctype())
                .and_then(|spec| spec.restrictions.as_ref())
                .map(|r| r.near_alone)
                .unwrap_or(false);
            if !peer_near_alone {
                return Some(format!(
                    "{} requires to be only one per subdomain.",
                    candidate.name
                ));
            }
        }
    }

    if !restrictions.exclusive.is_empty() {
        for peer in peers {
            if restrictions.exclusive.iter().any(|t| t == peer.svctype()) {
                return Some(format!(
                    "{} cannot coexist with {}.",
                    candidate.name,
                    registry.display_name(peer.svctype())
                ));
            }
        }
    }

    // Exclusions declared on the already-deployed side count just as much.
    for peer in peers {
        if let Some(spec) = registry.get(peer.svctype()) {
            if let Some(peer_restrictions) = &spec.restrictions {
                if peer_restrictions
                    .exclusive
                    .iter()
                    .any(|t| t == &candidate.svctype)
                {
                    return Some(format!(
                        "{} cannot coexist with {}.",
                        candidate.name, spec.name
                    ));
                }
            }
        }
    }

    if restrictions.single {
        for peer in peers {
            if peer.svctype() == candidate.svctype {
                return Some(format!(
                    "{} can only be present once per subdomain.",
                    candidate.name
                ));
            }
        }
    }

    // Deployed alone/leaf services constrain every newcomer; the last
    // flagged type wins when several are present.
    let mut alone_type = None;
    let mut leaf_type = None;
    for peer in peers {
        if let Some(peer_restrictions) = registry
            .get(peer.svctype())
            .and_then(|spec| spec.restrictions.as_ref())
        {
            if peer_restrictions.alone {
                alone_type = Some(peer.svctype());
            }
            if peer_restrictions.leaf {
                leaf_type = Some(peer.svctype());
            }
        }
    }

    if let Some(svctype) = alone_type {
        if svctype != candidate.svctype && !restrictions.near_alone {
            return Some(format!(
                "{} cannot coexist with {}, that requires to be the only one in the subdomain.",
                candidate.name,
                registry.display_name(svctype)
            ));
        }
    }
    if let Some(svctype) = leaf_type {
        if svctype != candidate.svctype && !restrictions.glue {
            return Some(format!(
                "{} cannot coexist with {}, that cannot have subdomains.",
                candidate.name,
                registry.display_name(svctype)
            ));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::service::{ServiceFamily, ServicePayload};

    fn spec(name: &str, svctype: &str, restrictions: Option<ServiceRestrictions>) -> ServiceInfos {
        ServiceInfos {
            name: name.to_string(),
            svctype: svctype.to_string(),
            family: ServiceFamily::Provider,
            categories: Vec::new(),
            restrictions,
        }
    }

    fn deployed(payload: ServicePayload, domain: &str) -> ServiceCombined {
        ServiceCombined {
            domain: domain.to_string(),
            id: None,
            ttl: None,
            comment: None,
            payload,
        }
    }

    fn server_payload() -> ServicePayload {
        ServicePayload::Server {
            v4: vec!["192.0.2.1".parse().unwrap()],
            v6: Vec::new(),
        }
    }

    fn delegation_payload() -> ServicePayload {
        ServicePayload::Delegation {
            ns: vec!["ns1.example.net.".to_string()],
        }
    }

    fn registry_with(specs: Vec<ServiceInfos>) -> ServiceRegistry {
        let mut registry = ServiceRegistry::new();
        for s in specs {
            registry.insert(s);
        }
        registry
    }

    #[test]
    fn test_provider_record_types() {
        let provider = ProviderInfos {
            name: "Test".to_string(),
            capabilities: vec![
                "rr-1-a".to_string(),
                "rr-28-aaaa".to_string(),
                "rr-257-caa".to_string(),
                "zone-import".to_string(),
                "rr-x-bogus".to_string(),
                "rr-16".to_string(),
            ],
        };
        assert_eq!(provider_record_types(&provider), vec![1, 28, 257]);
    }

    #[test]
    fn test_need_types_unsupported() {
        let candidate = spec(
            "IPv6 server",
            "server",
            Some(ServiceRestrictions {
                need_types: vec![28],
                ..Default::default()
            }),
        );
        let provider = ProviderInfos {
            name: "Legacy".to_string(),
            capabilities: vec!["rr-1-a".to_string()],
        };
        let verdict = pass_restrictions(
            &candidate,
            &provider,
            &HashMap::new(),
            "",
            &ServiceRegistry::new(),
        );
        assert_eq!(
            verdict,
            Some("IPv6 server is not available on this domain name hosting provider.".to_string())
        );

        let provider_v6 = ProviderInfos {
            name: "Modern".to_string(),
            capabilities: vec!["rr-1-a".to_string(), "rr-28-aaaa".to_string()],
        };
        assert_eq!(
            pass_restrictions(
                &candidate,
                &provider_v6,
                &HashMap::new(),
                "",
                &ServiceRegistry::new()
            ),
            None
        );
    }

    #[test]
    fn test_root_only() {
        let candidate = spec(
            "Origin",
            "server",
            Some(ServiceRestrictions {
                root_only: true,
                ..Default::default()
            }),
        );
        let provider = ProviderInfos::default();

        assert_eq!(
            pass_restrictions(
                &candidate,
                &provider,
                &HashMap::new(),
                "www",
                &ServiceRegistry::new()
            ),
            Some("Origin can only be present at the root of your domain.".to_string())
        );
        assert_eq!(
            pass_restrictions(
                &candidate,
                &provider,
                &HashMap::new(),
                "",
                &ServiceRegistry::new()
            ),
            None
        );
    }

    #[test]
    fn test_empty_registry_is_permissive() {
        let candidate = spec(
            "Picky",
            "server",
            Some(ServiceRestrictions {
                single: true,
                ..Default::default()
            }),
        );
        let mut zone_services = HashMap::new();
        zone_services.insert("www".to_string(), vec![deployed(server_payload(), "www")]);

        // Same-type peer present, but the registry snapshot is empty
        assert_eq!(
            pass_restrictions(
                &candidate,
                &ProviderInfos::default(),
                &zone_services,
                "www",
                &ServiceRegistry::new()
            ),
            None
        );
    }

    #[test]
    fn test_single_blocks_same_type() {
        let candidate = spec(
            "Web",
            "server",
            Some(ServiceRestrictions {
                single: true,
                ..Default::default()
            }),
        );
        let registry = registry_with(vec![spec("Web", "server", None)]);
        let mut zone_services = HashMap::new();
        zone_services.insert("www".to_string(), vec![deployed(server_payload(), "www")]);

        assert_eq!(
            pass_restrictions(
                &candidate,
                &ProviderInfos::default(),
                &zone_services,
                "www",
                &registry
            ),
            Some("Web can only be present once per subdomain.".to_string())
        );
        // A different subdomain is unaffected
        assert_eq!(
            pass_restrictions(
                &candidate,
                &ProviderInfos::default(),
                &zone_services,
                "mail",
                &registry
            ),
            None
        );
    }

    #[test]
    fn test_mutual_exclusive_blocks_both_ways() {
        let server = spec(
            "Web",
            "server",
            Some(ServiceRestrictions {
                exclusive: vec!["delegation".to_string()],
                ..Default::default()
            }),
        );
        let delegation = spec(
            "Delegation",
            "delegation",
            Some(ServiceRestrictions {
                exclusive: vec!["server".to_string()],
                ..Default::default()
            }),
        );
        let registry = registry_with(vec![server.clone(), delegation.clone()]);

        let mut with_server = HashMap::new();
        with_server.insert("sub".to_string(), vec![deployed(server_payload(), "sub")]);
        let mut with_delegation = HashMap::new();
        with_delegation.insert(
            "sub".to_string(),
            vec![deployed(delegation_payload(), "sub")],
        );

        assert_eq!(
            pass_restrictions(
                &delegation,
                &ProviderInfos::default(),
                &with_server,
                "sub",
                &registry
            ),
            Some("Delegation cannot coexist with Web.".to_string())
        );
        assert_eq!(
            pass_restrictions(
                &server,
                &ProviderInfos::default(),
                &with_delegation,
                "sub",
                &registry
            ),
            Some("Web cannot coexist with Delegation.".to_string())
        );
    }

    #[test]
    fn test_reverse_exclusive_hits_unrestricted_candidate() {
        // The candidate declares nothing; the deployed service's own
        // exclusion list still blocks it.
        let candidate = spec("Web", "server", None);
        let delegation = spec(
            "Delegation",
            "delegation",
            Some(ServiceRestrictions {
                exclusive: vec!["server".to_string()],
                ..Default::default()
            }),
        );
        let registry = registry_with(vec![candidate.clone(), delegation]);

        let mut zone_services = HashMap::new();
        zone_services.insert(
            "sub".to_string(),
            vec![deployed(delegation_payload(), "sub")],
        );

        assert_eq!(
            pass_restrictions(
                &candidate,
                &ProviderInfos::default(),
                &zone_services,
                "sub",
                &registry
            ),
            Some("Web cannot coexist with Delegation.".to_string())
        );
    }

    #[test]
    fn test_alone_rejects_non_near_alone_peers() {
        let candidate = spec(
            "Delegation",
            "delegation",
            Some(ServiceRestrictions {
                alone: true,
                ..Default::default()
            }),
        );
        let registry = registry_with(vec![
            spec("Web", "server", None),
            candidate.clone(),
        ]);

        let mut zone_services = HashMap::new();
        zone_services.insert("sub".to_string(), vec![deployed(server_payload(), "sub")]);

        assert_eq!(
            pass_restrictions(
                &candidate,
                &ProviderInfos::default(),
                &zone_services,
                "sub",
                &registry
            ),
            Some("Delegation requires to be only one per subdomain.".to_string())
        );
    }

    #[test]
    fn test_alone_peer_blocks_newcomer() {
        let deployed_alone = spec(
            "Delegation",
            "delegation",
            Some(ServiceRestrictions {
                alone: true,
                ..Default::default()
            }),
        );
        let candidate = spec("Web", "server", None);
        let near_alone_candidate = spec(
            "Glue",
            "caa",
            Some(ServiceRestrictions {
                near_alone: true,
                ..Default::default()
            }),
        );
        let registry = registry_with(vec![
            deployed_alone,
            candidate.clone(),
            near_alone_candidate.clone(),
        ]);

        let mut zone_services = HashMap::new();
        zone_services.insert(
            "sub".to_string(),
            vec![deployed(delegation_payload(), "sub")],
        );

        assert_eq!(
            pass_restrictions(
                &candidate,
                &ProviderInfos::default(),
                &zone_services,
                "sub",
                &registry
            ),
            Some(
                "Web cannot coexist with Delegation, that requires to be the only one in the subdomain."
                    .to_string()
            )
        );
        // A nearAlone candidate is tolerated next to it
        assert_eq!(
            pass_restrictions(
                &near_alone_candidate,
                &ProviderInfos::default(),
                &zone_services,
                "sub",
                &registry
            ),
            None
        );
    }

    #[test]
    fn test_leaf_peer_blocks_non_glue() {
        let leaf_spec = spec(
            "Redirect",
            "server",
            Some(ServiceRestrictions {
                leaf: true,
                ..Default::default()
            }),
        );
        let candidate = spec("Delegation", "delegation", None);
        let glue_candidate = spec(
            "Glue record",
            "caa",
            Some(ServiceRestrictions {
                glue: true,
                ..Default::default()
            }),
        );
        let registry = registry_with(vec![leaf_spec, candidate.clone(), glue_candidate.clone()]);

        let mut zone_services = HashMap::new();
        zone_services.insert("sub".to_string(), vec![deployed(server_payload(), "sub")]);

        assert_eq!(
            pass_restrictions(
                &candidate,
                &ProviderInfos::default(),
                &zone_services,
                "sub",
                &registry
            ),
            Some("Delegation cannot coexist with Redirect, that cannot have subdomains.".to_string())
        );
        assert_eq!(
            pass_restrictions(
                &glue_candidate,
                &ProviderInfos::default(),
                &zone_services,
                "sub",
                &registry
            ),
            None
        );
    }
}
