//! Single-nameserver record lookup.
//!
//! [`RecordLookup`] is the seam between the probe and the network.
//! [`TrustDnsLookup`] builds a fresh resolver for each query that talks
//! to exactly one nameserver, with no system configuration, no search
//! list and one attempt.

#![allow(clippy::missing_errors_doc)]

use crate::dns::types::{Answer, ProbeParams, RecordType};
use crate::error::{Error, Result};
use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::proto::rr::{Name, RData};
use trust_dns_resolver::TokioAsyncResolver;

/// Issues one DNS query and returns the answer records.
pub trait RecordLookup {
    /// Query `params.domain` for `params.record_type` at `params.host:params.port`.
    fn lookup(&self, params: &ProbeParams) -> impl Future<Output = Result<Vec<Answer>>> + Send;
}

/// Lookup backed by `trust-dns-resolver`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustDnsLookup;

impl TrustDnsLookup {
    /// Resolve the nameserver host to a socket address.
    ///
    /// IP literals are used as-is; anything else goes through the system
    /// resolver and the first address wins.
    pub async fn nameserver_addr(host: &str, port: u16) -> Result<SocketAddr> {
        let host = host.trim();
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, port));
        }

        let mut addrs = tokio::net::lookup_host((host, port))
            .await
            .map_err(|e| Error::network(format!("cannot resolve nameserver {host}: {e}")))?;
        addrs
            .next()
            .ok_or_else(|| Error::network(format!("nameserver {host} has no address")))
    }

    /// Build a resolver that asks only `nameserver`.
    pub fn resolver(nameserver: SocketAddr, timeout: Duration) -> Result<TokioAsyncResolver> {
        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(&[nameserver.ip()], nameserver.port(), true),
        );

        let mut opts = ResolverOpts::default();
        opts.timeout = timeout;
        opts.attempts = 1;
        opts.use_hosts_file = false;

        Ok(TokioAsyncResolver::tokio(config, opts)?)
    }
}

impl RecordLookup for TrustDnsLookup {
    async fn lookup(&self, params: &ProbeParams) -> Result<Vec<Answer>> {
        let nameserver = Self::nameserver_addr(&params.host, params.port).await?;
        let resolver = Self::resolver(nameserver, params.timeout_duration())?;
        let name = query_name(&params.domain, params.record_type)?;

        tracing::trace!(%nameserver, %name, record_type = %params.record_type, "Sending query");
        let response = resolver.lookup(name, params.record_type.to_wire()).await?;

        Ok(response.iter().filter_map(to_answer).collect())
    }
}

/// Turn the configured domain into the name actually queried.
///
/// PTR queries for an IP literal go to the reverse-mapping name.
pub fn query_name(domain: &str, record_type: RecordType) -> Result<Name> {
    let domain = domain.trim();

    if record_type == RecordType::Ptr {
        if let Ok(ip) = domain.parse::<IpAddr>() {
            return Ok(Name::from(ip));
        }
    }

    let fqdn = if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{domain}.")
    };
    Name::from_utf8(&fqdn).map_err(|e| Error::parse(format!("invalid domain {domain}: {e}")))
}

/// Reduce one answer record to what the sensor reports.
#[must_use]
pub fn to_answer(rdata: &RData) -> Option<Answer> {
    match rdata {
        RData::A(ip) => Some(Answer::Address(IpAddr::V4(*ip))),
        RData::AAAA(ip) => Some(Answer::Address(IpAddr::V6(*ip))),
        RData::MX(mx) => Some(Answer::Mail {
            preference: mx.preference(),
            exchange: display_name(mx.exchange()),
        }),
        RData::NS(name) | RData::CNAME(name) | RData::PTR(name) => {
            Some(Answer::Name(display_name(name)))
        }
        RData::SOA(soa) => Some(Answer::Authority {
            mname: display_name(soa.mname()),
            rname: display_name(soa.rname()),
            serial: soa.serial(),
        }),
        _ => None,
    }
}

/// Names are printed without the trailing root dot.
fn display_name(name: &Name) -> String {
    name.to_utf8().trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};
    use trust_dns_resolver::proto::rr::rdata::{MX, SOA};

    #[test]
    fn test_query_name_fqdn() {
        let name = query_name("example.com", RecordType::A).unwrap();
        assert!(name.is_fqdn());
        assert_eq!(name.to_utf8(), "example.com.");

        let name = query_name("example.com.", RecordType::A).unwrap();
        assert_eq!(name.to_utf8(), "example.com.");
    }

    #[test]
    fn test_query_name_reverse_for_ptr() {
        let name = query_name("192.0.2.10", RecordType::Ptr).unwrap();
        assert_eq!(name.to_utf8(), "10.2.0.192.in-addr.arpa.");

        // Only PTR rewrites addresses
        let name = query_name("192.0.2.10", RecordType::A).unwrap();
        assert_eq!(name.to_utf8(), "192.0.2.10.");
    }

    #[test]
    fn test_query_name_invalid() {
        let long_label = format!("{}.com", "a".repeat(64));
        assert!(query_name(&long_label, RecordType::A).is_err());
    }

    #[test]
    fn test_to_answer() {
        assert_eq!(
            to_answer(&RData::A(Ipv4Addr::new(192, 0, 2, 1))),
            Some(Answer::Address("192.0.2.1".parse().unwrap()))
        );
        assert_eq!(
            to_answer(&RData::AAAA(Ipv6Addr::LOCALHOST)),
            Some(Answer::Address("::1".parse().unwrap()))
        );

        let exchange = Name::from_ascii("mail1.example.com.").unwrap();
        assert_eq!(
            to_answer(&RData::MX(MX::new(10, exchange))),
            Some(Answer::Mail {
                preference: 10,
                exchange: "mail1.example.com".to_string()
            })
        );

        let ns = Name::from_ascii("ns1.example.com.").unwrap();
        assert_eq!(
            to_answer(&RData::NS(ns)),
            Some(Answer::Name("ns1.example.com".to_string()))
        );
    }

    #[test]
    fn test_to_answer_soa() {
        let soa = SOA::new(
            Name::from_ascii("ns1.example.com.").unwrap(),
            Name::from_ascii("hostmaster.example.com.").unwrap(),
            7,
            3600,
            600,
            86400,
            60,
        );
        assert_eq!(
            to_answer(&RData::SOA(soa)),
            Some(Answer::Authority {
                mname: "ns1.example.com".to_string(),
                rname: "hostmaster.example.com".to_string(),
                serial: 7,
            })
        );
    }

    #[tokio::test]
    async fn test_nameserver_addr_literal() {
        let addr = TrustDnsLookup::nameserver_addr(" 192.0.2.53 ", 5353).await.unwrap();
        assert_eq!(addr, "192.0.2.53:5353".parse().unwrap());

        let addr = TrustDnsLookup::nameserver_addr("::1", 53).await.unwrap();
        assert_eq!(addr, "[::1]:53".parse().unwrap());
    }

    #[tokio::test]
    async fn test_nameserver_addr_unresolvable() {
        let result = TrustDnsLookup::nameserver_addr("no-such-host.invalid", 53).await;
        assert!(matches!(result, Err(Error::Network(_))));
    }
}
