use shared::error::*;

use crate::candidate::{Candidate, CandidateKind, CandidateTransport, CandidateType};
use crate::local_ips::LocalIpProvider;
use crate::relay::MAX_TURN_SERVERS;

/// The maximum number of local addresses the other preference bits can rank.
pub const MAX_LOCAL_ADDRESSES: usize = 64;

/// MS-ICE transport preference of UDP candidates.
pub const TRANSPORT_MS_PREF_UDP: u8 = 15;
/// MS-ICE transport preference of TCP candidates.
pub const TRANSPORT_MS_PREF_TCP: u8 = 6;
/// MS-ICE direction preference of passive TCP candidates.
pub const DIRECTION_MS_PREF_PASSIVE: u8 = 2;
/// MS-ICE direction preference of TCP candidates that open the connection.
pub const DIRECTION_MS_PREF_ACTIVE: u8 = 5;

/// TCP direction preference, 3 bits.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DirectionPreference(u8);

impl DirectionPreference {
    pub fn new(value: u16) -> Result<Self> {
        if value >= 8 {
            return Err(Error::ErrDirectionPreferenceOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u16 {
        u16::from(self.0)
    }
}

/// Rank of the TURN server a relayed candidate was allocated on, 3 bits.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TurnPreference(u8);

impl TurnPreference {
    pub fn new(value: u16) -> Result<Self> {
        if value >= u16::from(MAX_TURN_SERVERS) {
            return Err(Error::ErrTurnPreferenceOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u16 {
        u16::from(self.0)
    }
}

/// Rank of the local IP address a candidate was obtained from, 6 bits.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct OtherPreference(u8);

impl OtherPreference {
    pub fn new(value: usize) -> Result<Self> {
        if value >= MAX_LOCAL_ADDRESSES {
            return Err(Error::ErrOtherPreferenceOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u16 {
        u16::from(self.0)
    }
}

/// MS-ICE transport preference, 4 bits.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TransportPreference(u8);

impl TransportPreference {
    pub fn new(value: u16) -> Result<Self> {
        if value >= 16 {
            return Err(Error::ErrTransportPreferenceOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u16 {
        u16::from(self.0)
    }
}

/// Local preference laid out as
///
/// ```text
/// bits  0- 5: other preference
///       6- 8: turn preference
///       9-12: unused
///      13-15: direction preference
/// ```
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct IceLocalPreference {
    pub direction: DirectionPreference,
    pub turn: TurnPreference,
    pub other: OtherPreference,
}

impl IceLocalPreference {
    pub fn pack(&self) -> u16 {
        (self.direction.value() << 13) + (self.turn.value() << 6) + self.other.value()
    }
}

/// MS-ICE local preference laid out as
///
/// ```text
/// bits  0- 5: other preference
///       6- 8: turn preference
///       9-11: direction preference
///      12-15: transport preference
/// ```
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MsIceLocalPreference {
    pub transport: TransportPreference,
    pub direction: DirectionPreference,
    pub turn: TurnPreference,
    pub other: OtherPreference,
}

impl MsIceLocalPreference {
    pub fn pack(&self) -> u16 {
        (self.transport.value() << 12)
            + (self.direction.value() << 9)
            + (self.turn.value() << 6)
            + self.other.value()
    }
}

/// RFC 6544, section 4.2: host and server reflexive candidates favour the
/// side that opens the connection, peer reflexive and relayed ones the
/// reverse.
fn ice_direction_preference(candidate: &Candidate) -> DirectionPreference {
    let host_or_srflx = matches!(
        candidate.candidate_type(),
        CandidateType::Host | CandidateType::ServerReflexive
    );

    let value = match (candidate.transport, host_or_srflx) {
        (CandidateTransport::TcpActive, true) => 4,
        (CandidateTransport::TcpActive, false) => 6,
        (CandidateTransport::TcpPassive, true) => 2,
        (CandidateTransport::TcpPassive, false) => 4,
        (CandidateTransport::TcpSimultaneousOpen, true) => 6,
        (CandidateTransport::TcpSimultaneousOpen, false) => 2,
        (CandidateTransport::Udp, _) => 1,
    };

    DirectionPreference(value)
}

/// Relayed candidates are told apart by the preference their TURN
/// allocation was assigned at creation time.
fn turn_preference(candidate: &Candidate) -> Result<TurnPreference> {
    match &candidate.kind {
        CandidateKind::Relayed(turn) => TurnPreference::new(u16::from(turn.preference)),
        _ => Ok(TurnPreference::default()),
    }
}

/// Ranks the IP of the candidate (host) or of its base (other types) among
/// the local addresses, so otherwise identical candidates of a multihomed
/// host get distinct priorities as RFC 5245 section 4.1.2.1 requires. An
/// address missing from the list ranks after all of them.
pub fn ip_local_preference<P>(candidate: &Candidate, local_ips: &P) -> Result<OtherPreference>
where
    P: LocalIpProvider + ?Sized,
{
    let ip = if candidate.candidate_type() == CandidateType::Host {
        candidate.addr.ip()
    } else {
        candidate.base_addr.ip()
    };
    let ip_string = ip.to_string();

    let ips = local_ips.local_ips(true)?;
    let rank = ips
        .iter()
        .position(|entry| entry.split('%').next() == Some(ip_string.as_str()))
        .unwrap_or_else(|| {
            log::debug!("{ip_string} is not among the {} local addresses", ips.len());
            ips.len()
        });

    OtherPreference::new(rank)
}

pub fn ice_local_preference<P>(candidate: &Candidate, local_ips: &P) -> Result<IceLocalPreference>
where
    P: LocalIpProvider + ?Sized,
{
    Ok(IceLocalPreference {
        direction: ice_direction_preference(candidate),
        turn: turn_preference(candidate)?,
        other: ip_local_preference(candidate, local_ips)?,
    })
}

pub fn ms_ice_local_preference<P>(
    candidate: &Candidate,
    local_ips: &P,
) -> Result<MsIceLocalPreference>
where
    P: LocalIpProvider + ?Sized,
{
    let (transport, direction) = match candidate.transport {
        CandidateTransport::TcpActive | CandidateTransport::TcpSimultaneousOpen => {
            (TRANSPORT_MS_PREF_TCP, DIRECTION_MS_PREF_ACTIVE)
        }
        CandidateTransport::TcpPassive => (TRANSPORT_MS_PREF_TCP, DIRECTION_MS_PREF_PASSIVE),
        CandidateTransport::Udp => (TRANSPORT_MS_PREF_UDP, 0),
    };

    Ok(MsIceLocalPreference {
        transport: TransportPreference(transport),
        direction: DirectionPreference(direction),
        turn: turn_preference(candidate)?,
        other: ip_local_preference(candidate, local_ips)?,
    })
}
