
use shared::error::*;
use shared::ifaces::{ifaces, Interface, Kind};
use std::sync::Arc;

/// Source of the textual IP addresses configured on the local host.
///
/// The order of the returned list is used as a ranking key when computing
/// local preferences, so it must not change within one gathering pass.
/// IPv6 entries may carry a `%zone` suffix.
pub trait LocalIpProvider {
    fn local_ips(&self, include_loopback: bool) -> Result<Vec<String>>;
}

impl<T: LocalIpProvider + ?Sized> LocalIpProvider for &T {
    fn local_ips(&self, include_loopback: bool) -> Result<Vec<String>> {
        (**self).local_ips(include_loopback)
    }
}

impl<T: LocalIpProvider + ?Sized> LocalIpProvider for Arc<T> {
    fn local_ips(&self, include_loopback: bool) -> Result<Vec<String>> {
        (**self).local_ips(include_loopback)
    }
}

/// A snapshot of a previous enumeration, returned as is.
impl LocalIpProvider for Vec<String> {
    fn local_ips(&self, _include_loopback: bool) -> Result<Vec<String>> {
        Ok(self.clone())
    }
}

impl<const N: usize> LocalIpProvider for [&str; N] {
    fn local_ips(&self, _include_loopback: bool) -> Result<Vec<String>> {
        Ok(self.iter().map(|ip| (*ip).to_owned()).collect())
    }
}

/// Enumerates the addresses of the host's network interfaces on every call.
#[derive(Default, Debug, Clone, Copy)]
pub struct SystemLocalIps;

impl LocalIpProvider for SystemLocalIps {
    fn local_ips(&self, include_loopback: bool) -> Result<Vec<String>> {
        let interfaces = ifaces().inspect_err(|err| {
            log::warn!("failed to enumerate local interfaces: {err}");
        })?;

        Ok(local_ips_from_interfaces(interfaces, include_loopback))
    }
}

/// Orders interface addresses the way the local preference expects them:
/// regular addresses first, loopback addresses last, no duplicates.
pub(crate) fn local_ips_from_interfaces(
    interfaces: impl IntoIterator<Item = Interface>,
    include_loopback: bool,
) -> Vec<String> {
    let mut ips: Vec<String> = vec![];
    let mut loopbacks: Vec<String> = vec![];

    for iface in interfaces {
        let link_local_v6 = iface.kind == Kind::Ipv6 && iface.is_link_local();
        if !include_loopback && (iface.loopback || link_local_v6) {
            continue;
        }

        let ip = if link_local_v6 && iface.scope_id != 0 {
            format!("{}%{}", iface.addr, iface.name)
        } else {
            iface.addr.to_string()
        };

        if ips.contains(&ip) || loopbacks.contains(&ip) {
            continue;
        }

        if iface.loopback {
            loopbacks.push(ip);
        } else {
            ips.push(ip);
        }
    }

    ips.extend(loopbacks);
    ips
}
