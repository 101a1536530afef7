//! Socket addresses carried by route messages.
//!
//! Each address is a `sockaddr` whose first byte is its length and second
//! byte its family.  Entries are packed back to back, each padded to a
//! 4-byte boundary, in `RTAX_*` slot order; only slots whose bit is set in
//! `rtm_addrs` are present.

use crate::rib::ParseError;
use std::{
    fmt,
    net::{Ipv4Addr, Ipv6Addr},
};

pub const AF_UNSPEC: u8 = 0;
pub const AF_INET: u8 = 2;
pub const AF_LINK: u8 = 18;
pub const AF_INET6: u8 = 30;

pub const RTAX_DST: usize = 0;
pub const RTAX_GATEWAY: usize = 1;
pub const RTAX_NETMASK: usize = 2;
/// Number of address slots in a route message
pub const RTAX_MAX: usize = 8;

const SIZEOF_SOCKADDR_INET: usize = 16;
const SIZEOF_SOCKADDR_INET6: usize = 28;
const SIZEOF_SOCKADDR_DL_HEADER: usize = 8;
const KERNEL_ALIGN: usize = 4;

/// A link-layer (`AF_LINK`) address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAddress {
    /// Interface index the address is attached to
    pub index: u16,
    /// Interface name, when the kernel included one
    pub name: Option<String>,
    /// Hardware address bytes; empty when there is none
    pub hardware: Vec<u8>,
}

/// An address from one `RTAX_*` slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Inet4(Ipv4Addr),
    Inet6(Ipv6Addr),
    Link(LinkAddress),
    /// A family this tool does not decode
    Unknown { family: u8, raw: Vec<u8> },
}

impl Address {
    /// The address family tag
    #[must_use]
    pub fn family(&self) -> u8 {
        match self {
            Address::Inet4(_) => AF_INET,
            Address::Inet6(_) => AF_INET6,
            Address::Link(_) => AF_LINK,
            Address::Unknown { family, .. } => *family,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Inet4(ip) => write!(f, "inet {ip}"),
            Address::Inet6(ip) => write!(f, "inet6 {ip}"),
            Address::Link(LinkAddress {
                index,
                name,
                hardware,
            }) => {
                write!(f, "link index {index}")?;
                if let Some(name) = name {
                    write!(f, " name {name}")?;
                }
                write!(f, " addr {hardware:02x?}")
            }
            Address::Unknown { family, raw } => write!(f, "family {family} raw {raw:02x?}"),
        }
    }
}

/// Bytes a sockaddr of length `len` occupies in a message.
fn roundup(len: usize) -> usize {
    if len == 0 {
        return KERNEL_ALIGN;
    }
    (len + KERNEL_ALIGN - 1) & !(KERNEL_ALIGN - 1)
}

/// Decode the sockaddrs following a route message header into their slots.
///
/// `offset` is the position of the enclosing message in the dump, used only
/// for error reporting.
pub(crate) fn parse_addrs(
    offset: usize,
    attrs: u32,
    mut b: &[u8],
) -> Result<[Option<Address>; RTAX_MAX], ParseError> {
    let mut addrs: [Option<Address>; RTAX_MAX] = Default::default();

    for (i, slot) in addrs.iter_mut().enumerate() {
        if b.len() < roundup(0) {
            break;
        }
        if attrs & (1 << i) == 0 {
            continue;
        }

        let sa_len = usize::from(b[0]);
        if sa_len > b.len() {
            return Err(ParseError::InvalidAddress { offset, slot: i });
        }
        let sa = &b[..sa_len];
        *slot = Some(match b[1] {
            AF_LINK => Address::Link(
                parse_link_addr(sa).ok_or(ParseError::InvalidAddress { offset, slot: i })?,
            ),
            AF_INET6 => Address::Inet6(parse_inet6_addr(sa)),
            // Netmasks come in kernel form: truncated, often without a family
            AF_INET | AF_UNSPEC => Address::Inet4(parse_inet4_addr(sa)),
            family => Address::Unknown {
                family,
                raw: sa.to_vec(),
            },
        });

        // The final entry may be left unpadded.
        b = &b[roundup(sa_len).min(b.len())..];
    }

    Ok(addrs)
}

/// Copy a possibly truncated sockaddr into a zeroed buffer of its full size.
fn zero_filled<const N: usize>(sa: &[u8]) -> [u8; N] {
    let mut full = [0u8; N];
    let len = sa.len().min(N);
    full[..len].copy_from_slice(&sa[..len]);
    full
}

fn parse_inet4_addr(sa: &[u8]) -> Ipv4Addr {
    let sin: [u8; SIZEOF_SOCKADDR_INET] = zero_filled(sa);
    Ipv4Addr::new(sin[4], sin[5], sin[6], sin[7])
}

fn parse_inet6_addr(sa: &[u8]) -> Ipv6Addr {
    let sin6: [u8; SIZEOF_SOCKADDR_INET6] = zero_filled(sa);
    let mut octets = [0u8; 16];
    octets.copy_from_slice(&sin6[8..24]);
    Ipv6Addr::from(octets)
}

// sockaddr_dl:
// +------------------------------+
// | Length             (1 octet) |
// | Family             (1 octet) |
// | Index             (2 octets) |
// | Type               (1 octet) |
// | Name length        (1 octet) |
// | Address length     (1 octet) |
// | Selector length    (1 octet) |
// | Data              (variable) |
// +------------------------------+
fn parse_link_addr(sa: &[u8]) -> Option<LinkAddress> {
    if sa.len() < SIZEOF_SOCKADDR_DL_HEADER {
        return None;
    }
    let index = u16::from_ne_bytes([sa[2], sa[3]]);

    // All-bits-one means "don't care".
    let len = |b: u8| if b == 0xff { 0 } else { usize::from(b) };
    let (nlen, alen, slen) = (len(sa[5]), len(sa[6]), len(sa[7]));

    let data = &sa[SIZEOF_SOCKADDR_DL_HEADER..];
    if data.len() < nlen + alen + slen {
        return None;
    }
    let name = if nlen > 0 {
        Some(std::str::from_utf8(&data[..nlen]).ok()?.to_owned())
    } else {
        None
    };
    let hardware = data[nlen..nlen + alen].to_vec();

    Some(LinkAddress {
        index,
        name,
        hardware,
    })
}
