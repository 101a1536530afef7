use std::fmt;

/// Route flags (`RTF_*` in Darwin's `<net/route.h>`)
#[derive(Clone, Copy, Debug, std::hash::Hash, Eq, PartialEq)]
pub enum RoutingFlag {
    Blackhole,
    Broadcast,
    Cloning,
    Condemned,
    Dead,
    DelClone,
    Done,
    Dynamic,
    Gateway,
    Global,
    Host,
    IfRef,
    IfScope,
    LlInfo,
    Local,
    Modified,
    Multicast,
    NoIfRef,
    Pinned,
    PrCloning,
    Proto1,
    Proto2,
    Proto3,
    Proxy,
    Reject,
    Router,
    Static,
    Up,
    WasCloned,
    XResolve,
}

impl RoutingFlag {
    /// Every known flag, in the order names are reported.
    pub const SCAN_ORDER: [RoutingFlag; 30] = [
        RoutingFlag::Blackhole,
        RoutingFlag::Broadcast,
        RoutingFlag::Cloning,
        RoutingFlag::Condemned,
        RoutingFlag::Dead,
        RoutingFlag::DelClone,
        RoutingFlag::Done,
        RoutingFlag::Dynamic,
        RoutingFlag::Gateway,
        RoutingFlag::Global,
        RoutingFlag::Host,
        RoutingFlag::IfRef,
        RoutingFlag::IfScope,
        RoutingFlag::LlInfo,
        RoutingFlag::Local,
        RoutingFlag::Modified,
        RoutingFlag::Multicast,
        RoutingFlag::NoIfRef,
        RoutingFlag::Pinned,
        RoutingFlag::PrCloning,
        RoutingFlag::Proto1,
        RoutingFlag::Proto2,
        RoutingFlag::Proto3,
        RoutingFlag::Proxy,
        RoutingFlag::Reject,
        RoutingFlag::Router,
        RoutingFlag::Static,
        RoutingFlag::Up,
        RoutingFlag::WasCloned,
        RoutingFlag::XResolve,
    ];

    /// The flag's bit in `rtm_flags`
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            RoutingFlag::Up => 0x1,
            RoutingFlag::Gateway => 0x2,
            RoutingFlag::Host => 0x4,
            RoutingFlag::Reject => 0x8,
            RoutingFlag::Dynamic => 0x10,
            RoutingFlag::Modified => 0x20,
            RoutingFlag::Done => 0x40,
            RoutingFlag::DelClone => 0x80,
            RoutingFlag::Cloning => 0x100,
            RoutingFlag::XResolve => 0x200,
            RoutingFlag::LlInfo => 0x400,
            RoutingFlag::Static => 0x800,
            RoutingFlag::Blackhole => 0x1000,
            RoutingFlag::NoIfRef => 0x2000,
            RoutingFlag::Proto2 => 0x4000,
            RoutingFlag::Proto1 => 0x8000,
            RoutingFlag::PrCloning => 0x1_0000,
            RoutingFlag::WasCloned => 0x2_0000,
            RoutingFlag::Proto3 => 0x4_0000,
            RoutingFlag::Pinned => 0x10_0000,
            RoutingFlag::Local => 0x20_0000,
            RoutingFlag::Broadcast => 0x40_0000,
            RoutingFlag::Multicast => 0x80_0000,
            RoutingFlag::IfScope => 0x100_0000,
            RoutingFlag::Condemned => 0x200_0000,
            RoutingFlag::IfRef => 0x400_0000,
            RoutingFlag::Proxy => 0x800_0000,
            RoutingFlag::Router => 0x1000_0000,
            RoutingFlag::Dead => 0x2000_0000,
            RoutingFlag::Global => 0x4000_0000,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            RoutingFlag::Blackhole => "RTF_BLACKHOLE",
            RoutingFlag::Broadcast => "RTF_BROADCAST",
            RoutingFlag::Cloning => "RTF_CLONING",
            RoutingFlag::Condemned => "RTF_CONDEMNED",
            RoutingFlag::Dead => "RTF_DEAD",
            RoutingFlag::DelClone => "RTF_DELCLONE",
            RoutingFlag::Done => "RTF_DONE",
            RoutingFlag::Dynamic => "RTF_DYNAMIC",
            RoutingFlag::Gateway => "RTF_GATEWAY",
            RoutingFlag::Global => "RTF_GLOBAL",
            RoutingFlag::Host => "RTF_HOST",
            RoutingFlag::IfRef => "RTF_IFREF",
            RoutingFlag::IfScope => "RTF_IFSCOPE",
            RoutingFlag::LlInfo => "RTF_LLINFO",
            RoutingFlag::Local => "RTF_LOCAL",
            RoutingFlag::Modified => "RTF_MODIFIED",
            RoutingFlag::Multicast => "RTF_MULTICAST",
            RoutingFlag::NoIfRef => "RTF_NOIFREF",
            RoutingFlag::Pinned => "RTF_PINNED",
            RoutingFlag::PrCloning => "RTF_PRCLONING",
            RoutingFlag::Proto1 => "RTF_PROTO1",
            RoutingFlag::Proto2 => "RTF_PROTO2",
            RoutingFlag::Proto3 => "RTF_PROTO3",
            RoutingFlag::Proxy => "RTF_PROXY",
            RoutingFlag::Reject => "RTF_REJECT",
            RoutingFlag::Router => "RTF_ROUTER",
            RoutingFlag::Static => "RTF_STATIC",
            RoutingFlag::Up => "RTF_UP",
            RoutingFlag::WasCloned => "RTF_WASCLONED",
            RoutingFlag::XResolve => "RTF_XRESOLVE",
        }
    }
}

impl fmt::Display for RoutingFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The raw `rtm_flags` bitmask of a route message
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RoutingFlags(pub u32);

impl RoutingFlags {
    #[must_use]
    pub const fn contains(self, flag: RoutingFlag) -> bool {
        self.0 & flag.bits() == flag.bits()
    }

    /// Known flags that are set, in [`RoutingFlag::SCAN_ORDER`].  Bits with
    /// no known flag are skipped.
    pub fn iter(self) -> impl Iterator<Item = RoutingFlag> {
        IntoIterator::into_iter(RoutingFlag::SCAN_ORDER).filter(move |flag| self.contains(*flag))
    }
}

impl fmt::Display for RoutingFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, flag) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(flag.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{RoutingFlag, RoutingFlags};
    use std::collections::HashSet;

    #[test]
    fn scan_order_is_alphabetical() {
        let names: Vec<_> = RoutingFlag::SCAN_ORDER.iter().map(|f| f.name()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn one_bit_per_flag() {
        let mut seen = HashSet::new();
        for flag in &RoutingFlag::SCAN_ORDER {
            assert_eq!(flag.bits().count_ones(), 1, "{}", flag);
            assert!(seen.insert(flag.bits()), "{} shares a bit", flag);
        }
    }

    #[test]
    fn gateway_up() {
        let flags = RoutingFlags(0x3);
        assert_eq!(flags.to_string(), "RTF_GATEWAY,RTF_UP");
        assert!(flags.contains(RoutingFlag::Up));
        assert!(!flags.contains(RoutingFlag::Host));
    }

    #[test]
    fn unknown_bits_omitted() {
        // 0x8000_0000 has no name on Darwin
        let flags = RoutingFlags(0x8000_0000 | 0x800);
        assert_eq!(flags.iter().collect::<Vec<_>>(), vec![RoutingFlag::Static]);
        assert_eq!(RoutingFlags(0x8000_0000).to_string(), "");
    }
}
