use crate::{
    address::AF_INET, fetch_rib, parse_rib, InterfaceNames, Message, ParseError, RouteEntry,
    SystemCallError, TableWriter, NET_RT_DUMP,
};
use std::io::{self, Write};
use tracing::{debug, trace, warn};

/// A snapshot of the IPv4 routing table
#[derive(Debug)]
pub struct RoutingTable {
    messages: Vec<Message>,
}

/// Various errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to fetch routing table: {0}")]
    Fetch(#[from] SystemCallError),
    #[error("failed to parse routing table: {0}")]
    Parse(#[from] ParseError),
}

impl RoutingTable {
    /// Dump the kernel's IPv4 routing table.
    ///
    /// # Errors
    ///
    /// Returns an error if the kernel does not hand over the table, or hands
    /// over one that does not decode.
    pub fn load() -> Result<Self, Error> {
        let rib = fetch_rib(i32::from(AF_INET), NET_RT_DUMP, 0)?;
        Self::from_rib(&rib)
    }

    /// Generate a `RoutingTable` from a raw routing information base, as
    /// returned by [`fetch_rib`].
    ///
    /// # Errors
    ///
    /// Returns an error if any message in the dump is malformed.
    pub fn from_rib(rib: &[u8]) -> Result<Self, Error> {
        let messages = parse_rib(rib)?;
        debug!(messages = messages.len(), "parsed routing table");
        Ok(RoutingTable { messages })
    }

    /// Every decoded message, in kernel order
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Write the table as aligned columns: destination, gateway, interface
    /// and flags.  Route messages that cannot be shown are logged and
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn render<W: Write>(&self, out: W, interfaces: &impl InterfaceNames) -> io::Result<()> {
        let mut tw = TableWriter::new(out);
        writeln!(tw, "Destination\tGateway\tNetif\tFlags")?;

        for message in &self.messages {
            let msg = match message {
                Message::Route(msg) => msg,
                Message::Interface { message_type } => {
                    warn!("skipping non-route message {message_type}");
                    continue;
                }
            };

            debug!("{msg}");
            for (slot, addr) in msg.addrs.iter().enumerate() {
                if let Some(addr) = addr {
                    debug!(slot, "  {addr}");
                }
            }

            match RouteEntry::from_message(msg, interfaces) {
                Ok(Some(route)) => writeln!(
                    tw,
                    "{}\t{}\t{}\t{}",
                    route.dest, route.gateway, route.net_if, route.flags
                )?,
                Ok(None) => trace!(seq = msg.seq, "skipping interface reference route"),
                Err(err) => warn!(seq = msg.seq, "skipping route: {err}"),
            }
        }

        tw.flush()
    }
}
