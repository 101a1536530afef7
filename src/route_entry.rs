use crate::{
    address::{Address, RTAX_DST, RTAX_GATEWAY, RTAX_NETMASK},
    Entity, InterfaceNames, RouteMessage, RoutingFlag, RoutingFlags,
};
use cidr::Ipv4Inet;

/// A single route, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Destination.  E.g., a host or CIDR
    pub dest: Entity,

    /// Gateway (i.e., how to reach the destination)
    pub gateway: Entity,

    /// Network interface that holds this route
    pub net_if: String,

    /// Routing flags
    pub flags: RoutingFlags,
}

/// Reasons a route message yields no entry.  None of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no interface with index {index}: {source}")]
    NoSuchInterface {
        index: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("route message has {0} leading addresses, need at least 2")]
    TooFewAddresses(usize),
    #[error("destination is not an IPv4 address (family {0})")]
    DestinationNotInet4(u8),
    #[error("netmask is not an IPv4 address (family {0})")]
    NetmaskNotInet4(u8),
    #[error("unknown gateway address family {0}")]
    UnknownGatewayFamily(u8),
}

impl RouteEntry {
    /// Build the entry for a route message, resolving its interface through
    /// `interfaces`.
    ///
    /// Returns `Ok(None)` for host routes that only pin an interface
    /// reference (gateway, host and ifref all set); those are never shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the interface is gone or the addresses do not
    /// describe an IPv4 route.
    pub fn from_message(
        msg: &RouteMessage,
        interfaces: &impl InterfaceNames,
    ) -> Result<Option<Self>, Error> {
        if msg.flags.contains(RoutingFlag::Gateway)
            && msg.flags.contains(RoutingFlag::Host)
            && msg.flags.contains(RoutingFlag::IfRef)
        {
            return Ok(None);
        }

        let net_if = interfaces
            .name_of(msg.index)
            .map_err(|source| Error::NoSuchInterface {
                index: msg.index,
                source,
            })?;

        let populated = msg.populated();
        if populated < 2 {
            return Err(Error::TooFewAddresses(populated));
        }

        let addr = match &msg.addrs[RTAX_DST] {
            Some(Address::Inet4(addr)) => *addr,
            other => return Err(Error::DestinationNotInet4(family(other.as_ref()))),
        };

        let netmask = if populated >= 3 {
            match &msg.addrs[RTAX_NETMASK] {
                Some(Address::Inet4(mask)) => Some(*mask),
                other => return Err(Error::NetmaskNotInet4(family(other.as_ref()))),
            }
        } else {
            None
        };

        let dest = match netmask {
            Some(mask) => {
                let len = u32::from(mask).leading_ones();
                if len == 0 {
                    Entity::Default
                } else {
                    // At most 32 leading ones, always a valid length
                    #[allow(clippy::cast_possible_truncation)]
                    let inet = Ipv4Inet::new(addr, len as u8).unwrap_or_else(|_| unreachable!());
                    Entity::Cidr(inet)
                }
            }
            None => Entity::Host(addr),
        };

        let gateway = match &msg.addrs[RTAX_GATEWAY] {
            Some(Address::Inet4(addr)) => Entity::Host(*addr),
            Some(Address::Link(link)) if netmask.is_some() => Entity::Link(link.index),
            Some(Address::Link(link)) => Entity::Hardware(link.hardware.clone()),
            other => return Err(Error::UnknownGatewayFamily(family(other.as_ref()))),
        };

        Ok(Some(RouteEntry {
            dest,
            gateway,
            net_if,
            flags: msg.flags,
        }))
    }
}

fn family(addr: Option<&Address>) -> u8 {
    addr.map_or(crate::AF_UNSPEC, Address::family)
}

#[cfg(test)]
mod tests {
    use super::{Error, RouteEntry};
    use crate::{
        message_type::RTM_GET, Address, Entity, LinkAddress, MessageType, RouteMessage,
        RoutingFlags, AF_INET6, RTAX_MAX, RTM_VERSION,
    };
    use std::{
        collections::HashMap,
        net::{Ipv4Addr, Ipv6Addr},
    };

    const UP: u32 = 0x1;
    const GATEWAY: u32 = 0x2;
    const HOST: u32 = 0x4;
    const IFREF: u32 = 0x400_0000;

    fn interfaces() -> HashMap<u16, String> {
        vec![(1, "lo0".to_string()), (4, "en0".to_string())]
            .into_iter()
            .collect()
    }

    fn message(index: u16, flags: u32, addrs: Vec<Address>) -> RouteMessage {
        let mut slots: [Option<Address>; RTAX_MAX] = Default::default();
        for (slot, addr) in slots.iter_mut().zip(addrs) {
            *slot = Some(addr);
        }
        RouteMessage {
            version: RTM_VERSION,
            message_type: MessageType(RTM_GET),
            flags: RoutingFlags(flags),
            index,
            pid: 0,
            seq: 1,
            errno: 0,
            addrs: slots,
        }
    }

    fn inet(a: u8, b: u8, c: u8, d: u8) -> Address {
        Address::Inet4(Ipv4Addr::new(a, b, c, d))
    }

    fn link(index: u16, hardware: &[u8]) -> Address {
        Address::Link(LinkAddress {
            index,
            name: None,
            hardware: hardware.to_vec(),
        })
    }

    fn entry(msg: &RouteMessage) -> RouteEntry {
        RouteEntry::from_message(msg, &interfaces())
            .expect("map route message")
            .expect("entry not dropped")
    }

    #[test]
    fn default_route() {
        let msg = message(
            4,
            UP | GATEWAY,
            vec![inet(0, 0, 0, 0), inet(10, 0, 0, 1), inet(0, 0, 0, 0)],
        );
        let route = entry(&msg);
        assert_eq!(route.dest, Entity::Default);
        assert_eq!(route.gateway.to_string(), "10.0.0.1");
        assert_eq!(route.net_if, "en0");
        assert_eq!(route.flags.to_string(), "RTF_GATEWAY,RTF_UP");
    }

    #[test]
    fn prefix_lengths() {
        for (mask, dest) in [
            (inet(255, 255, 255, 0), "10.0.0.0/24"),
            (inet(255, 255, 255, 255), "10.0.0.0/32"),
            (inet(255, 0, 0, 0), "10.0.0.0/8"),
            (inet(0, 0, 0, 0), "default"),
        ] {
            let msg = message(4, UP, vec![inet(10, 0, 0, 0), inet(192, 168, 1, 1), mask]);
            assert_eq!(entry(&msg).dest.to_string(), dest);
        }
    }

    #[test]
    fn two_slots_is_bare_host() {
        let msg = message(4, UP, vec![inet(10, 0, 0, 0), inet(192, 168, 1, 1)]);
        let route = entry(&msg);
        assert_eq!(route.dest.to_string(), "10.0.0.0");
        assert_eq!(route.gateway.to_string(), "192.168.1.1");
    }

    #[test]
    fn link_gateway() {
        // With a netmask the link's own index is shown, not the message's
        let msg = message(
            4,
            UP,
            vec![inet(10, 0, 0, 0), link(7, &[]), inet(255, 255, 255, 0)],
        );
        assert_eq!(entry(&msg).gateway.to_string(), "link#7");

        let msg = message(4, UP | HOST, vec![inet(10, 0, 0, 9), link(4, &[0x02, 0xab])]);
        assert_eq!(entry(&msg).gateway.to_string(), "2:ab");
    }

    #[test]
    fn interface_reference_dropped() {
        let msg = message(
            1,
            UP | GATEWAY | HOST | IFREF,
            vec![inet(127, 0, 0, 1), inet(127, 0, 0, 1)],
        );
        assert!(RouteEntry::from_message(&msg, &interfaces())
            .unwrap()
            .is_none());

        // Any two of the three are kept
        for flags in [GATEWAY | HOST, GATEWAY | IFREF, HOST | IFREF] {
            let msg = message(1, UP | flags, vec![inet(127, 0, 0, 1), inet(127, 0, 0, 1)]);
            assert!(RouteEntry::from_message(&msg, &interfaces())
                .unwrap()
                .is_some());
        }
    }

    #[test]
    fn dropped_before_interface_lookup() {
        let msg = message(
            99,
            UP | GATEWAY | HOST | IFREF,
            vec![inet(127, 0, 0, 1)],
        );
        assert!(RouteEntry::from_message(&msg, &interfaces())
            .unwrap()
            .is_none());
    }

    #[test]
    fn no_such_interface() {
        let msg = message(9, UP, vec![inet(10, 0, 0, 0), inet(10, 0, 0, 1)]);
        let err = RouteEntry::from_message(&msg, &interfaces()).unwrap_err();
        assert!(matches!(err, Error::NoSuchInterface { index: 9, .. }));
        // Coverage of display formatting
        let _ = err.to_string();
    }

    #[test]
    fn too_few_addresses() {
        let msg = message(4, UP, vec![inet(10, 0, 0, 0)]);
        assert!(matches!(
            RouteEntry::from_message(&msg, &interfaces()),
            Err(Error::TooFewAddresses(1))
        ));

        // Slots after a gap do not count
        let mut msg = message(4, UP, vec![inet(10, 0, 0, 0)]);
        msg.addrs[2] = Some(inet(255, 255, 255, 0));
        assert!(matches!(
            RouteEntry::from_message(&msg, &interfaces()),
            Err(Error::TooFewAddresses(1))
        ));
    }

    #[test]
    fn wrong_families() {
        let v6 = Address::Inet6(Ipv6Addr::LOCALHOST);

        let msg = message(4, UP, vec![v6.clone(), inet(10, 0, 0, 1)]);
        assert!(matches!(
            RouteEntry::from_message(&msg, &interfaces()),
            Err(Error::DestinationNotInet4(AF_INET6))
        ));

        let msg = message(4, UP, vec![inet(10, 0, 0, 0), inet(10, 0, 0, 1), v6.clone()]);
        assert!(matches!(
            RouteEntry::from_message(&msg, &interfaces()),
            Err(Error::NetmaskNotInet4(AF_INET6))
        ));

        let msg = message(4, UP, vec![inet(10, 0, 0, 0), v6.clone()]);
        assert!(matches!(
            RouteEntry::from_message(&msg, &interfaces()),
            Err(Error::UnknownGatewayFamily(AF_INET6))
        ));

        // The destination is reported before the netmask
        let msg = message(4, UP, vec![v6.clone(), inet(10, 0, 0, 1), v6]);
        assert!(matches!(
            RouteEntry::from_message(&msg, &interfaces()),
            Err(Error::DestinationNotInet4(AF_INET6))
        ));

        let unknown = Address::Unknown {
            family: 42,
            raw: vec![4, 42, 0, 0],
        };
        let msg = message(4, UP, vec![inet(10, 0, 0, 0), unknown]);
        assert!(matches!(
            RouteEntry::from_message(&msg, &interfaces()),
            Err(Error::UnknownGatewayFamily(42))
        ));
    }
}
