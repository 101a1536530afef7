//! Routing socket message types (`RTM_*` in Darwin's `<net/route.h>`).

use std::fmt;

pub const RTM_ADD: u8 = 0x1;
pub const RTM_DELETE: u8 = 0x2;
pub const RTM_CHANGE: u8 = 0x3;
pub const RTM_GET: u8 = 0x4;
pub const RTM_LOSING: u8 = 0x5;
pub const RTM_REDIRECT: u8 = 0x6;
pub const RTM_MISS: u8 = 0x7;
pub const RTM_LOCK: u8 = 0x8;
pub const RTM_OLDADD: u8 = 0x9;
pub const RTM_OLDDEL: u8 = 0xa;
pub const RTM_RESOLVE: u8 = 0xb;
pub const RTM_NEWADDR: u8 = 0xc;
pub const RTM_DELADDR: u8 = 0xd;
pub const RTM_IFINFO: u8 = 0xe;
pub const RTM_NEWMADDR: u8 = 0xf;
pub const RTM_DELMADDR: u8 = 0x10;
pub const RTM_IFINFO2: u8 = 0x12;
pub const RTM_NEWMADDR2: u8 = 0x13;
pub const RTM_GET2: u8 = 0x14;

/// Message type names in header order.
const NAMES: [(u8, &str); 19] = [
    (RTM_ADD, "RTM_ADD"),
    (RTM_DELETE, "RTM_DELETE"),
    (RTM_CHANGE, "RTM_CHANGE"),
    (RTM_GET, "RTM_GET"),
    (RTM_LOSING, "RTM_LOSING"),
    (RTM_REDIRECT, "RTM_REDIRECT"),
    (RTM_MISS, "RTM_MISS"),
    (RTM_LOCK, "RTM_LOCK"),
    (RTM_OLDADD, "RTM_OLDADD"),
    (RTM_OLDDEL, "RTM_OLDDEL"),
    (RTM_RESOLVE, "RTM_RESOLVE"),
    (RTM_NEWADDR, "RTM_NEWADDR"),
    (RTM_DELADDR, "RTM_DELADDR"),
    (RTM_IFINFO, "RTM_IFINFO"),
    (RTM_NEWMADDR, "RTM_NEWMADDR"),
    (RTM_DELMADDR, "RTM_DELMADDR"),
    (RTM_IFINFO2, "RTM_IFINFO2"),
    (RTM_NEWMADDR2, "RTM_NEWMADDR2"),
    (RTM_GET2, "RTM_GET2"),
];

/// Layout family of a message body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// `rt_msghdr` followed by sockaddrs
    Route,
    /// `if_msghdr`, `ifa_msghdr` or `ifma_msghdr` and their `2` variants
    Interface,
}

/// The `rtm_type` byte of a routing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageType(pub u8);

impl MessageType {
    /// Symbolic name, if the type is one Darwin defines.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        NAMES
            .iter()
            .find(|(value, _)| *value == self.0)
            .map(|(_, name)| *name)
    }

    /// How the message body is laid out.  `None` for obsolete or unknown
    /// types, which carry nothing worth decoding.
    #[must_use]
    pub fn kind(self) -> Option<MessageKind> {
        match self.0 {
            RTM_ADD | RTM_DELETE | RTM_CHANGE | RTM_GET | RTM_LOSING | RTM_REDIRECT | RTM_MISS
            | RTM_LOCK | RTM_RESOLVE | RTM_GET2 => Some(MessageKind::Route),
            RTM_NEWADDR | RTM_DELADDR | RTM_IFINFO | RTM_NEWMADDR | RTM_DELMADDR | RTM_IFINFO2
            | RTM_NEWMADDR2 => Some(MessageKind::Interface),
            _ => None,
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "RTM_{:#x}", self.0),
        }
    }
}
