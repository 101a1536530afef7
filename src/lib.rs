mod address;
mod fetch;
mod interface;
mod message_type;
mod rib;
mod route_entry;
mod routing_flag;
mod routing_table;
mod table_writer;

use std::{fmt::Write, net::Ipv4Addr};

pub use fetch::{fetch_rib, SystemCallError, NET_RT_DUMP};
pub use rib::{parse_rib, Message, ParseError, RouteMessage, RTM_VERSION};

// Exports
pub use address::{Address, LinkAddress, AF_INET, AF_INET6, AF_LINK, AF_UNSPEC, RTAX_MAX};
pub use interface::{InterfaceNames, SystemInterfaces};
pub use message_type::{MessageKind, MessageType};
pub use route_entry::{Error as RouteEntryError, RouteEntry};
pub use routing_flag::{RoutingFlag, RoutingFlags};
pub use routing_table::{Error, RoutingTable};
pub use table_writer::TableWriter;

use cidr::Ipv4Inet;

/// A generic network entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    /// The default route (prefix length 0)
    Default,
    /// A network address with its prefix length
    Cidr(Ipv4Inet),
    Host(Ipv4Addr),
    /// A directly connected interface, by index
    Link(u16),
    /// A link-layer hardware address
    Hardware(Vec<u8>),
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Default => f.write_str("default"),
            Entity::Cidr(inet) => write!(f, "{}/{}", inet.address(), inet.network_length()),
            Entity::Host(addr) => write!(f, "{addr}"),
            Entity::Link(index) => write!(f, "link#{index}"),
            Entity::Hardware(bytes) => {
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_char(':')?;
                    }
                    write!(f, "{byte:x}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Entity;
    use cidr::Ipv4Inet;
    use std::net::Ipv4Addr;

    #[test]
    fn display() {
        assert_eq!(Entity::Default.to_string(), "default");
        let inet = Ipv4Inet::new(Ipv4Addr::new(10, 0, 0, 0), 24).unwrap();
        assert_eq!(Entity::Cidr(inet).to_string(), "10.0.0.0/24");
        // A /32 keeps its suffix; bare hosts have none
        let inet = Ipv4Inet::new(Ipv4Addr::new(10, 0, 0, 1), 32).unwrap();
        assert_eq!(Entity::Cidr(inet).to_string(), "10.0.0.1/32");
        assert_eq!(
            Entity::Host(Ipv4Addr::new(192, 168, 1, 1)).to_string(),
            "192.168.1.1"
        );
        assert_eq!(Entity::Link(4).to_string(), "link#4");
    }

    #[test]
    fn hardware_is_unpadded() {
        assert_eq!(Entity::Hardware(vec![0x02, 0xab]).to_string(), "2:ab");
        assert_eq!(
            Entity::Hardware(vec![0x02, 0xab, 0x0c, 0x01, 0x00, 0xff]).to_string(),
            "2:ab:c:1:0:ff"
        );
        assert_eq!(Entity::Hardware(vec![]).to_string(), "");
    }
}
