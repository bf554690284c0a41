
pub mod candidate_host;
pub mod candidate_pair;
pub mod candidate_peer_reflexive;
pub mod candidate_relay;
pub mod candidate_server_reflexive;

use serde::{Deserialize, Serialize};
use shared::error::*;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU8;
use std::str::FromStr;
use std::sync::Arc;

use crate::relay::TurnServer;

/// Indicates that the candidate is used for RTP.
pub const COMPONENT_RTP: NonZeroU8 = NonZeroU8::MIN;
/// Indicates that the candidate is used for RTCP.
pub const COMPONENT_RTCP: NonZeroU8 = match NonZeroU8::new(2) {
    Some(component) => component,
    None => unreachable!(),
};

/// Represents the type of candidate `CandidateType` enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateType {
    #[serde(rename = "host")]
    Host,
    #[serde(rename = "srflx")]
    ServerReflexive,
    #[serde(rename = "prflx")]
    PeerReflexive,
    #[serde(rename = "relay")]
    Relayed,
}

impl CandidateType {
    pub const fn as_str(self) -> &'static str {
        match self {
            CandidateType::Host => "host",
            CandidateType::ServerReflexive => "srflx",
            CandidateType::PeerReflexive => "prflx",
            CandidateType::Relayed => "relay",
        }
    }
}

// String makes CandidateType printable
impl fmt::Display for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateType {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "host" => Ok(CandidateType::Host),
            "srflx" => Ok(CandidateType::ServerReflexive),
            "prflx" => Ok(CandidateType::PeerReflexive),
            "relay" => Ok(CandidateType::Relayed),
            _ => Err(Error::ErrUnknownCandidateType),
        }
    }
}

/// Transport over which a candidate is reachable, including the TCP
/// connection direction of RFC 6544.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateTransport {
    #[default]
    #[serde(rename = "udp")]
    Udp,
    #[serde(rename = "tcp-act")]
    TcpActive,
    #[serde(rename = "tcp-pass")]
    TcpPassive,
    #[serde(rename = "tcp-so")]
    TcpSimultaneousOpen,
}

impl CandidateTransport {
    pub const fn as_str(self) -> &'static str {
        match self {
            CandidateTransport::Udp => "udp",
            CandidateTransport::TcpActive => "tcp-act",
            CandidateTransport::TcpPassive => "tcp-pass",
            CandidateTransport::TcpSimultaneousOpen => "tcp-so",
        }
    }

    pub const fn is_udp(self) -> bool {
        matches!(self, CandidateTransport::Udp)
    }
}

impl fmt::Display for CandidateTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CandidateTransport {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "udp" => Ok(CandidateTransport::Udp),
            "tcp-act" => Ok(CandidateTransport::TcpActive),
            "tcp-pass" => Ok(CandidateTransport::TcpPassive),
            "tcp-so" => Ok(CandidateTransport::TcpSimultaneousOpen),
            _ => Err(Error::ErrUnknownTransport),
        }
    }
}

/// How a candidate was obtained. Relayed candidates carry the TURN server
/// descriptor of the allocation they belong to; candidates from the same
/// allocation share one descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum CandidateKind {
    Host,
    ServerReflexive,
    PeerReflexive,
    Relayed(Arc<TurnServer>),
}

impl CandidateKind {
    pub fn candidate_type(&self) -> CandidateType {
        match self {
            CandidateKind::Host => CandidateType::Host,
            CandidateKind::ServerReflexive => CandidateType::ServerReflexive,
            CandidateKind::PeerReflexive => CandidateType::PeerReflexive,
            CandidateKind::Relayed(_) => CandidateType::Relayed,
        }
    }
}

/// Common fields of the per-type candidate configs.
#[derive(Default, Clone, Debug)]
pub struct CandidateConfig {
    pub address: String,
    pub port: u16,
    /// Address of the local socket the candidate was derived from. Left
    /// empty, the candidate address is used.
    pub base_address: String,
    pub base_port: u16,
    pub component: u16,
    pub transport: CandidateTransport,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl CandidateConfig {
    pub(crate) fn new_candidate(self, kind: CandidateKind) -> Result<Candidate> {
        let component_id = u8::try_from(self.component)
            .ok()
            .and_then(NonZeroU8::new)
            .ok_or(Error::ErrInvalidComponentId(self.component))?;

        let ip: IpAddr = self.address.parse()?;
        let addr = SocketAddr::new(ip, self.port);

        let base_addr = if self.base_address.is_empty() {
            addr
        } else {
            let base_ip: IpAddr = self.base_address.parse()?;
            SocketAddr::new(base_ip, self.base_port)
        };

        Ok(Candidate {
            kind,
            transport: self.transport,
            addr,
            base_addr,
            component_id,
            username: self.username,
            password: self.password,
            stun_server: None,
        })
    }
}

/// A transport address a peer can be reached at.
///
/// Cloning a candidate duplicates its credentials and addresses; a relayed
/// candidate's clone shares the TURN server descriptor with the original.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub transport: CandidateTransport,
    pub addr: SocketAddr,
    /// Equal to `addr` for host candidates.
    pub base_addr: SocketAddr,
    pub component_id: NonZeroU8,
    pub username: Option<String>,
    pub password: Option<String>,
    /// STUN server the reflexive discovery request was sent to.
    pub stun_server: Option<SocketAddr>,
}

// String makes the Candidate printable
impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.base_addr != self.addr {
            write!(
                f,
                "{} {} {} base {}",
                self.transport,
                self.candidate_type(),
                self.addr,
                self.base_addr,
            )
        } else {
            write!(f, "{} {} {}", self.transport, self.candidate_type(), self.addr)
        }
    }
}

impl Candidate {
    /// Creates a UDP candidate of the given kind for component 1 with
    /// unspecified addresses and no credentials.
    pub fn new(kind: CandidateKind) -> Self {
        let unspecified = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0);
        Self {
            kind,
            transport: CandidateTransport::default(),
            addr: unspecified,
            base_addr: unspecified,
            component_id: COMPONENT_RTP,
            username: None,
            password: None,
            stun_server: None,
        }
    }

    /// Returns candidate type.
    pub fn candidate_type(&self) -> CandidateType {
        self.kind.candidate_type()
    }

    /// Returns the TURN server descriptor of a relayed candidate.
    pub fn relay(&self) -> Option<&Arc<TurnServer>> {
        match &self.kind {
            CandidateKind::Relayed(turn) => Some(turn),
            _ => None,
        }
    }

    /// Two candidates target the same destination when they share transport
    /// and address, whatever their type, base, component or credentials.
    pub fn equal_target(&self, other: &Candidate) -> bool {
        self.transport == other.transport && self.addr == other.addr
    }

    /// Returns the address of the TURN server a relayed candidate was
    /// allocated on.
    pub fn relay_address(&self) -> Result<SocketAddr> {
        self.relay()
            .map(|turn| turn.server)
            .ok_or(Error::ErrNotRelayedCandidate)
    }

    /// Returns the STUN server used for discovery, if one was recorded.
    pub fn stun_server_address(&self) -> Result<Option<SocketAddr>> {
        if self.candidate_type() == CandidateType::ServerReflexive {
            return Err(Error::ErrStunServerOnServerReflexive);
        }
        Ok(self.stun_server)
    }
}
