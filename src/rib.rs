//! Decoding of routing information base dumps.
//!
//! A dump is a sequence of routing socket messages, each starting with its
//! own length, version and type, laid out as Darwin's `<net/route.h>`
//! describes them.

use crate::{
    address::{parse_addrs, Address, RTAX_MAX},
    message_type::{MessageKind, MessageType},
    RoutingFlags,
};
use std::fmt;

/// `RTM_VERSION` on Darwin
pub const RTM_VERSION: u8 = 5;

/// `sizeof(struct rt_msghdr)` (and `rt_msghdr2`) on Darwin
const SIZEOF_RT_MSGHDR: usize = 0x5c;

/// Errors that make a whole dump untrustworthy
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("message at offset {offset} declares zero length")]
    InvalidMessage { offset: usize },
    #[error("message at offset {offset} declares {declared} bytes but only {available} remain")]
    MessageTooShort {
        offset: usize,
        declared: usize,
        available: usize,
    },
    #[error("malformed address in slot {slot} of message at offset {offset}")]
    InvalidAddress { offset: usize, slot: usize },
}

/// A decoded `rt_msghdr` and its addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMessage {
    pub version: u8,
    pub message_type: MessageType,
    pub flags: RoutingFlags,
    /// Index of the interface the route goes through
    pub index: u16,
    /// Sender's process ID
    pub pid: i32,
    pub seq: i32,
    /// Error reported by the kernel for this message, 0 if none
    pub errno: i32,
    /// Addresses by `RTAX_*` slot
    pub addrs: [Option<Address>; RTAX_MAX],
}

impl RouteMessage {
    /// Number of populated address slots, counted up to the first empty one.
    #[must_use]
    pub fn populated(&self) -> usize {
        self.addrs.iter().take_while(|addr| addr.is_some()).count()
    }
}

impl fmt::Display for RouteMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type {} ({}), flags {:#x} [{}], index {}, pid {}, seq {}, errno {}",
            self.message_type.0,
            self.message_type,
            self.flags.0,
            self.flags,
            self.index,
            self.pid,
            self.seq,
            self.errno
        )
    }
}

/// One message from a dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Route(RouteMessage),
    /// Interface and interface address messages; only the type is kept
    Interface { message_type: MessageType },
}

fn read_u16(b: &[u8], at: usize) -> u16 {
    u16::from_ne_bytes([b[at], b[at + 1]])
}

fn read_u32(b: &[u8], at: usize) -> u32 {
    u32::from_ne_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

fn read_i32(b: &[u8], at: usize) -> i32 {
    i32::from_ne_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

/// Split a dump into messages.  Messages of another `rtm_version` are
/// skipped.
///
/// # Errors
///
/// Returns an error if any message is framed inconsistently or carries an
/// address that cannot be decoded.  No partial result is returned.
pub fn parse_rib(rib: &[u8]) -> Result<Vec<Message>, ParseError> {
    let mut msgs = Vec::new();
    let mut offset = 0;

    while rib.len() - offset > 4 {
        let b = &rib[offset..];
        let len = usize::from(read_u16(b, 0));
        if len == 0 {
            return Err(ParseError::InvalidMessage { offset });
        }
        if b.len() < len {
            return Err(ParseError::MessageTooShort {
                offset,
                declared: len,
                available: b.len(),
            });
        }
        if b[2] != RTM_VERSION {
            tracing::debug!(offset, version = b[2], "skipping message of foreign version");
            offset += len;
            continue;
        }

        let message_type = MessageType(b[3]);
        match message_type.kind() {
            Some(MessageKind::Route) => {
                msgs.push(Message::Route(parse_route_message(offset, &b[..len])?));
            }
            Some(MessageKind::Interface) => msgs.push(Message::Interface { message_type }),
            None => (),
        }

        offset += len;
    }

    Ok(msgs)
}

// rt_msghdr:
// +---------------------------------+
// | 0  msglen u16 | version | type  |
// | 4  index u16  | (pad)           |
// | 8  flags                        |
// | 12 addrs                        |
// | 16 pid                          |
// | 20 seq                          |
// | 24 errno                        |
// | 28 use, inits, rt_metrics       |
// +---------------------------------+
fn parse_route_message(offset: usize, b: &[u8]) -> Result<RouteMessage, ParseError> {
    if b.len() < SIZEOF_RT_MSGHDR {
        return Err(ParseError::MessageTooShort {
            offset,
            declared: SIZEOF_RT_MSGHDR,
            available: b.len(),
        });
    }

    let addrs = parse_addrs(offset, read_u32(b, 12), &b[SIZEOF_RT_MSGHDR..])?;

    Ok(RouteMessage {
        version: b[2],
        message_type: MessageType(b[3]),
        flags: RoutingFlags(read_u32(b, 8)),
        index: read_u16(b, 4),
        pid: read_i32(b, 16),
        seq: read_i32(b, 20),
        errno: read_i32(b, 24),
        addrs,
    })
}
