//! Value parsers for flag types clap has no parser for.

use std::convert::Infallible;
use std::net::IpAddr;
use std::num::ParseIntError;

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use ipnet::IpNet;
use thiserror::Error;

/// An element of a network list that is not `address/prefix`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid network '{element}': {source}")]
pub struct IpNetListError {
    pub element: String,
    pub source: ipnet::AddrParseError,
}

/// Decodes standard, padded base64, ignoring surrounding whitespace.
pub fn decode_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64_STANDARD.decode(s.trim())
}

/// Decodes hex digits, ignoring surrounding whitespace.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.trim())
}

/// Parses an IP address, yielding `None` rather than an error for text that
/// is not one.
pub fn parse_ip_lenient(s: &str) -> Result<Option<IpAddr>, Infallible> {
    Ok(s.trim().parse().ok())
}

/// Parses an IP network in `address/prefix` notation, clearing the host bits
/// so that `127.0.0.1/8` becomes `127.0.0.0/8`.
pub fn parse_ip_net(s: &str) -> Result<IpNet, ipnet::AddrParseError> {
    s.parse::<IpNet>().map(|net| net.trunc())
}

/// Parses comma-separated IP networks. The empty string is the empty list.
pub fn parse_ip_net_list(s: &str) -> Result<Vec<IpNet>, IpNetListError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|element| {
            parse_ip_net(element).map_err(|source| IpNetListError {
                element: element.to_string(),
                source,
            })
        })
        .collect()
}

/// Parses a counter: `+1` counts one occurrence, anything else must be the
/// count itself.
pub fn parse_count(s: &str) -> Result<isize, ParseIntError> {
    if s == "+1" {
        return Ok(1);
    }
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_base64() {
        assert_eq!(decode_base64("QmFzZTY0").unwrap(), b"Base64");
        assert_eq!(decode_base64(" QmFzZTY0\n").unwrap(), b"Base64");
        assert!(decode_base64("QmFzZTY").is_err());
    }

    #[test]
    fn test_decode_hex() {
        assert_eq!(
            decode_hex("deadbeadcafe").unwrap(),
            vec![0xde, 0xad, 0xbe, 0xad, 0xca, 0xfe]
        );
        assert!(decode_hex("abc").is_err());
        assert!(decode_hex("zz").is_err());
    }

    #[test]
    fn test_parse_ip_net_truncates() {
        let net = parse_ip_net("127.0.0.1/8").unwrap();
        assert_eq!(net.to_string(), "127.0.0.0/8");
        assert!(parse_ip_net("127.0.0.1").is_err());
    }

    #[test]
    fn test_parse_ip_net_list() {
        assert!(parse_ip_net_list("").unwrap().is_empty());

        let nets = parse_ip_net_list("127.0.0.1/8,192.168.0.1/24").unwrap();
        assert_eq!(nets.len(), 2);
        assert_eq!(nets[1].to_string(), "192.168.0.0/24");

        let err = parse_ip_net_list("127.0.0.1/8,,10.0.0.0/8").unwrap_err();
        assert_eq!(err.element, "");

        let err = parse_ip_net_list("127.0.0.1/8,abc/666").unwrap_err();
        assert_eq!(err.element, "abc/666");
        assert_eq!(
            err.to_string(),
            "invalid network 'abc/666': invalid IP address syntax"
        );
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("+1"), Ok(1));
        assert_eq!(parse_count("3"), Ok(3));
        assert!(parse_count("+2x").is_err());
    }
}
