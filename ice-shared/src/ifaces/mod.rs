#[cfg(not(windows))]
mod unix;
#[cfg(not(windows))]
pub use self::unix::ifaces;

use std::net::IpAddr;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Kind {
    Ipv4,
    Ipv6,
}

/// One address bound to a local network interface.
#[derive(Debug, Clone)]
pub struct Interface {
    pub name: String,
    pub kind: Kind,
    pub addr: IpAddr,
    /// IPv6 scope id, zero when the address is not scoped.
    pub scope_id: u32,
    pub loopback: bool,
}

impl Interface {
    /// Reports whether this is an IPv6 unicast link-local address (fe80::/10).
    pub fn is_link_local(&self) -> bool {
        match self.addr {
            IpAddr::V4(ip) => ip.is_link_local(),
            IpAddr::V6(ip) => (ip.segments()[0] & 0xffc0) == 0xfe80,
        }
    }
}

#[cfg(windows)]
pub fn ifaces() -> crate::error::Result<Vec<Interface>> {
    Err(crate::error::Error::ErrNoInterface)
}
