//! Pre-built originator tables for testing.
//!
//! These scenarios reproduce realistic `batctl o` output: a banner line,
//! a column-header line, then one routing entry per line.

use super::MockTable;

/// The two header lines preceding the data lines.
pub const HEADERS: &str = "\
[B.A.T.M.A.N. adv 2013.4.0, MainIF/MAC: wlan0/fe:fe:00:00:01:01 (bat0)]
  Originator      last-seen (#/255)           Nexthop [outgoingIF]:   Potential nexthops ...
";

impl MockTable {
    /// A three-node mesh with well-formed entries, including potential
    /// next hops after the fields the collector reads.
    pub fn small_mesh() -> Self {
        Self::new(format!(
            "{HEADERS}\
fe:fe:00:00:02:01    0.560s   (255) fe:fe:00:00:02:01 [      wlan0]: fe:fe:00:00:02:01 (255)
fe:fe:00:00:03:01    0.980s   (203) fe:fe:00:00:02:01 [      wlan0]: fe:fe:00:00:02:01 (203) fe:fe:00:00:03:01 (188)
fe:fe:00:00:04:01    2.220s   (140) fe:fe:00:00:02:01 [      wlan0]: fe:fe:00:00:02:01 (140)
"
        ))
    }

    /// Headers followed by no data lines (a mesh with no other nodes).
    pub fn empty_table() -> Self {
        Self::new(HEADERS)
    }

    /// Output that breaks off inside the headers.
    pub fn truncated_header() -> Self {
        Self::new("[B.A.T.M.A.N. adv 2013.4.0, MainIF/MAC: wlan0/fe:fe:00:00:01:01 (bat0)]\n")
    }

    /// A table whose second entry is garbled (quality field malformed).
    pub fn garbled_entry() -> Self {
        Self::new(format!(
            "{HEADERS}\
fe:fe:00:00:02:01    0.560s   (255) fe:fe:00:00:02:01 [      wlan0]: fe:fe:00:00:02:01 (255)
fe:fe:00:00:03:01    0.980s   (#/255) fe:fe:00:00:02:01 [      wlan0]: fe:fe:00:00:02:01 (203)
fe:fe:00:00:04:01    2.220s   (140) fe:fe:00:00:02:01 [      wlan0]: fe:fe:00:00:02:01 (140)
"
        ))
    }
}
