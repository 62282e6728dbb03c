//! Parser for originator-table data lines.
//!
//! Pure functions from one line of the query command's output to a
//! structured entry, testable on canned text.
//!
//! Data line layout:
//!
//! ```text
//! AA:BB:CC:DD:EE:FF <age>s (<quality>) GG:HH:II:JJ:KK:LL [outgoingIF]: potential next hops ...
//! ```
//!
//! Only the first four fields are read; the outgoing interface and the
//! potential next hops are ignored. One malformed field fails the line:
//! the command output is all-or-nothing well-formed, so callers abort the
//! whole read on the first bad line instead of skipping it.

use std::fmt;

use crate::mac::NodeAddr;

/// Number of header lines preceding the data lines.
pub const HEADER_LINES: usize = 2;

/// Error type for line parsing failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}

/// One parsed originator-table entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginatorEntry {
    /// Mesh node this entry routes to.
    pub originator: NodeAddr,
    /// Seconds since the node was last seen.
    pub last_seen_secs: f64,
    /// Link quality count out of 255.
    pub quality: u8,
    /// Neighbor currently used to reach the originator.
    pub next_hop: NodeAddr,
}

/// Parses one data line into an entry.
///
/// The first four whitespace-separated fields must be present and
/// well-formed; anything after the next hop is ignored.
pub fn parse_entry_line(line: &str) -> Result<OriginatorEntry, ParseError> {
    let mut fields = line.split_whitespace();
    let originator = parse_mac(
        fields
            .next()
            .ok_or_else(|| ParseError::new("missing originator"))?,
    )?;
    let last_seen_secs = parse_age(
        fields
            .next()
            .ok_or_else(|| ParseError::new("missing last-seen age"))?,
    )?;
    let quality = parse_quality(
        fields
            .next()
            .ok_or_else(|| ParseError::new("missing quality"))?,
    )?;
    let next_hop = parse_mac(
        fields
            .next()
            .ok_or_else(|| ParseError::new("missing next hop"))?,
    )?;

    Ok(OriginatorEntry {
        originator,
        last_seen_secs,
        quality,
        next_hop,
    })
}

/// Parses a colon-separated MAC address of six one-or-two-digit hex octets.
fn parse_mac(token: &str) -> Result<NodeAddr, ParseError> {
    let mut octets = [0u8; 6];
    let mut parts = token.split(':');

    for octet in octets.iter_mut() {
        let part = parts
            .next()
            .ok_or_else(|| ParseError::new(format!("'{token}': expected 6 address octets")))?;
        if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseError::new(format!("'{token}': bad octet '{part}'")));
        }
        *octet = u8::from_str_radix(part, 16)
            .map_err(|_| ParseError::new(format!("'{token}': bad octet '{part}'")))?;
    }

    if parts.next().is_some() {
        return Err(ParseError::new(format!(
            "'{token}': more than 6 address octets"
        )));
    }

    Ok(NodeAddr::from_octets(octets))
}

/// Parses the `<float>s` last-seen field.
fn parse_age(token: &str) -> Result<f64, ParseError> {
    let number = token
        .strip_suffix('s')
        .ok_or_else(|| ParseError::new(format!("'{token}': age must end in 's'")))?;
    let age: f64 = number
        .parse()
        .map_err(|_| ParseError::new(format!("'{token}': bad age")))?;
    if !age.is_finite() || age < 0.0 {
        return Err(ParseError::new(format!("'{token}': age out of range")));
    }
    Ok(age)
}

/// Parses the `(<quality>)` field, a count out of 255.
fn parse_quality(token: &str) -> Result<u8, ParseError> {
    let inner = token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or_else(|| ParseError::new(format!("'{token}': quality must be parenthesized")))?;
    inner
        .parse::<u8>()
        .map_err(|_| ParseError::new(format!("'{token}': bad quality")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_line() {
        let line = "fe:fe:00:00:02:01    0.560s   (255) fe:fe:00:00:03:01 [      wlan0]: fe:fe:00:00:02:01 (255)";
        let entry = parse_entry_line(line).unwrap();
        assert_eq!(entry.originator.value(), 0xfe_fe_00_00_02_01);
        assert_eq!(entry.last_seen_secs, 0.560);
        assert_eq!(entry.quality, 255);
        assert_eq!(entry.next_hop.value(), 0xfe_fe_00_00_03_01);
    }

    #[test]
    fn test_parse_minimal_line() {
        let entry = parse_entry_line("aa:bb:cc:dd:ee:01 1.0s (200) ff:ee:dd:cc:bb:01").unwrap();
        assert_eq!(entry.originator.to_string(), "aabbccddee01");
        assert_eq!(entry.last_seen_secs, 1.0);
        assert_eq!(entry.quality, 200);
        assert_eq!(entry.next_hop.to_string(), "ffeeddccbb01");
    }

    #[test]
    fn test_parse_single_digit_octets() {
        let entry = parse_entry_line("a:b:c:d:e:f 0.0s (1) 0:1:2:3:4:5").unwrap();
        assert_eq!(entry.originator.value(), 0x0a_0b_0c_0d_0e_0f);
        assert_eq!(entry.next_hop.value(), 0x00_01_02_03_04_05);
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(parse_entry_line("").is_err());
        assert!(parse_entry_line("aa:bb:cc:dd:ee:01").is_err());
        assert!(parse_entry_line("aa:bb:cc:dd:ee:01 1.0s").is_err());
        assert!(parse_entry_line("aa:bb:cc:dd:ee:01 1.0s (200)").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_mac() {
        // too few, too many, oversized, and non-hex octets
        assert!(parse_entry_line("aa:bb:cc:dd:ee 1.0s (200) ff:ee:dd:cc:bb:01").is_err());
        assert!(parse_entry_line("aa:bb:cc:dd:ee:01:02 1.0s (200) ff:ee:dd:cc:bb:01").is_err());
        assert!(parse_entry_line("aaa:bb:cc:dd:ee:01 1.0s (200) ff:ee:dd:cc:bb:01").is_err());
        assert!(parse_entry_line("gg:bb:cc:dd:ee:01 1.0s (200) ff:ee:dd:cc:bb:01").is_err());
        assert!(parse_entry_line("aa::cc:dd:ee:01 1.0s (200) ff:ee:dd:cc:bb:01").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_age() {
        assert!(parse_entry_line("aa:bb:cc:dd:ee:01 1.0 (200) ff:ee:dd:cc:bb:01").is_err());
        assert!(parse_entry_line("aa:bb:cc:dd:ee:01 xs (200) ff:ee:dd:cc:bb:01").is_err());
        assert!(parse_entry_line("aa:bb:cc:dd:ee:01 -1.0s (200) ff:ee:dd:cc:bb:01").is_err());
        assert!(parse_entry_line("aa:bb:cc:dd:ee:01 infs (200) ff:ee:dd:cc:bb:01").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_quality() {
        assert!(parse_entry_line("aa:bb:cc:dd:ee:01 1.0s 200 ff:ee:dd:cc:bb:01").is_err());
        assert!(parse_entry_line("aa:bb:cc:dd:ee:01 1.0s (256) ff:ee:dd:cc:bb:01").is_err());
        assert!(parse_entry_line("aa:bb:cc:dd:ee:01 1.0s (#/255) ff:ee:dd:cc:bb:01").is_err());
        assert!(parse_entry_line("aa:bb:cc:dd:ee:01 1.0s () ff:ee:dd:cc:bb:01").is_err());
    }

    #[test]
    fn test_parse_ignores_trailing_fields() {
        let with_trailing = parse_entry_line(
            "aa:bb:cc:dd:ee:01 1.0s (200) ff:ee:dd:cc:bb:01 [ wlan0]: 11:22:33:44:55:66 (12)",
        )
        .unwrap();
        let without = parse_entry_line("aa:bb:cc:dd:ee:01 1.0s (200) ff:ee:dd:cc:bb:01").unwrap();
        assert_eq!(with_trailing, without);
    }

    #[test]
    fn test_parse_quality_bounds() {
        let zero = parse_entry_line("aa:bb:cc:dd:ee:01 1.0s (0) ff:ee:dd:cc:bb:01").unwrap();
        assert_eq!(zero.quality, 0);
        let max = parse_entry_line("aa:bb:cc:dd:ee:01 1.0s (255) ff:ee:dd:cc:bb:01").unwrap();
        assert_eq!(max.quality, 255);
    }
}
