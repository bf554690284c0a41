use super::{Interface, Kind};
use crate::error::Result;

use nix::net::if_::InterfaceFlags;
use nix::sys::socket::{AddressFamily, SockaddrLike, SockaddrStorage};
use std::io;
use std::net::{IpAddr, Ipv4Addr};

fn ss_to_ip(ss: &SockaddrStorage) -> Option<(IpAddr, u32)> {
    match ss.family() {
        Some(AddressFamily::Inet) => ss
            .as_sockaddr_in()
            .map(|sin| (IpAddr::V4(Ipv4Addr::from(sin.ip())), 0)),
        Some(AddressFamily::Inet6) => ss
            .as_sockaddr_in6()
            .map(|sin6| (IpAddr::V6(sin6.ip()), sin6.scope_id())),
        _ => None,
    }
}

/// Query the local system for all IP addresses of interfaces that are up.
pub fn ifaces() -> Result<Vec<Interface>> {
    let mut ret = Vec::new();
    for ifa in nix::ifaddrs::getifaddrs().map_err(io::Error::from)? {
        if !ifa.flags.contains(InterfaceFlags::IFF_UP) {
            continue;
        }

        let Some((addr, scope_id)) = ifa.address.as_ref().and_then(ss_to_ip) else {
            continue;
        };

        let kind = if addr.is_ipv4() { Kind::Ipv4 } else { Kind::Ipv6 };
        ret.push(Interface {
            name: ifa.interface_name,
            kind,
            addr,
            scope_id,
            loopback: ifa.flags.contains(InterfaceFlags::IFF_LOOPBACK) || addr.is_loopback(),
        });
    }

    Ok(ret)
}
