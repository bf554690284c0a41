#[cfg(test)]
mod priority_test;

pub mod local_preference;

use serde::{Deserialize, Serialize};
use shared::error::*;
use std::num::NonZeroU8;

use crate::candidate::{Candidate, CandidateKind, CandidateType};
use crate::local_ips::{LocalIpProvider, SystemLocalIps};
use crate::relay::RelayType;
use local_preference::*;

/// 4.1.2.2.  Guidelines for Choosing Type and Local Preferences
/// The type preference MUST be an integer from 0 to 126 inclusive, and
/// represents the preference for the type of the candidate.
pub const TYPE_PREF_HOST: u8 = 120;
pub const TYPE_PREF_PEER_REFLEXIVE: u8 = 110;
/// RFC 6544, section 4.2: NAT-assisted candidates.
pub const TYPE_PREF_NAT_ASSISTED: u8 = 105;
pub const TYPE_PREF_SERVER_REFLEXIVE: u8 = 100;
pub const TYPE_PREF_RELAYED_UDP: u8 = 30;
pub const TYPE_PREF_RELAYED: u8 = 20;

const MAX_TYPE_PREFERENCE: u8 = 126;

/// Preference for the type of a candidate, 0 to 126 inclusive.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypePreference(u8);

impl TypePreference {
    pub fn new(value: u8) -> Result<Self> {
        if value > MAX_TYPE_PREFERENCE {
            return Err(Error::ErrTypePreferenceOutOfRange(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Returns the type preference of a candidate. When the transport of the
/// candidate does not match the reliability the stream asks for, the
/// preference is halved.
pub fn type_preference(candidate: &Candidate, reliable: bool, nat_assisted: bool) -> TypePreference {
    let preference = match &candidate.kind {
        CandidateKind::Host => TYPE_PREF_HOST,
        CandidateKind::PeerReflexive => TYPE_PREF_PEER_REFLEXIVE,
        CandidateKind::ServerReflexive if nat_assisted => TYPE_PREF_NAT_ASSISTED,
        CandidateKind::ServerReflexive => TYPE_PREF_SERVER_REFLEXIVE,
        CandidateKind::Relayed(turn) if turn.relay_type == RelayType::TurnUdp => {
            TYPE_PREF_RELAYED_UDP
        }
        CandidateKind::Relayed(_) => TYPE_PREF_RELAYED,
    };

    if reliable == candidate.transport.is_udp() {
        TypePreference(preference / 2)
    } else {
        TypePreference(preference)
    }
}

/// ICE 4.1.2.1. "Recommended Formula"
///
/// priority = (2^24)*(type preference) +
///            (2^8)*(local preference) +
///            (2^0)*(256 - component ID)
pub fn ice_priority_full(
    type_preference: TypePreference,
    local_preference: u16,
    component_id: NonZeroU8,
) -> u32 {
    0x100_0000 * u32::from(type_preference.value())
        + 0x100 * u32::from(local_preference)
        + (0x100 - u32::from(component_id.get()))
}

/// Computes the RFC 5245 priority of a candidate.
pub fn ice_priority<P>(
    candidate: &Candidate,
    reliable: bool,
    nat_assisted: bool,
    local_ips: &P,
) -> Result<u32>
where
    P: LocalIpProvider + ?Sized,
{
    let type_pref = type_preference(candidate, reliable, nat_assisted);
    let local_pref = ice_local_preference(candidate, local_ips)?.pack();
    let priority = ice_priority_full(type_pref, local_pref, candidate.component_id);

    log::trace!(
        "ice priority of {candidate}: type {} local {local_pref:#06x} -> {priority}",
        type_pref.value()
    );

    Ok(priority)
}

/// Computes the MS-ICE priority of a candidate. It only differs from the
/// RFC 5245 priority by the layout of the local preference.
pub fn ms_ice_priority<P>(
    candidate: &Candidate,
    reliable: bool,
    nat_assisted: bool,
    local_ips: &P,
) -> Result<u32>
where
    P: LocalIpProvider + ?Sized,
{
    let type_pref = type_preference(candidate, reliable, nat_assisted);
    let local_pref = ms_ice_local_preference(candidate, local_ips)?.pack();
    let priority = ice_priority_full(type_pref, local_pref, candidate.component_id);

    log::trace!(
        "ms-ice priority of {candidate}: type {} local {local_pref:#06x} -> {priority}",
        type_pref.value()
    );

    Ok(priority)
}

/// Priority used by the Google Talk (Jingle) dialect.
pub fn jingle_priority(candidate: &Candidate) -> u32 {
    match candidate.candidate_type() {
        CandidateType::Host => 1000,
        CandidateType::ServerReflexive | CandidateType::PeerReflexive => 900,
        CandidateType::Relayed => 500,
    }
}

/// Priority used by the MSN dialect.
pub fn msn_priority(candidate: &Candidate) -> u32 {
    match candidate.candidate_type() {
        CandidateType::Host => 830,
        CandidateType::ServerReflexive | CandidateType::PeerReflexive => 550,
        CandidateType::Relayed => 450,
    }
}

/// ICE dialect spoken with the remote agent.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Compatibility {
    #[default]
    #[serde(rename = "rfc5245")]
    Rfc5245,
    #[serde(rename = "google")]
    Google,
    #[serde(rename = "msn")]
    Msn,
    /// MS-ICE 2, as spoken by Office Communicator 2007 R2 and its successors.
    #[serde(rename = "oc2007r2")]
    Oc2007R2,
}

/// Collects the inputs of candidate priority computation.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityConfig {
    #[serde(default)]
    pub compatibility: Compatibility,
    /// The stream needs a reliable transport, so UDP candidates are penalized.
    #[serde(default)]
    pub reliable: bool,
    /// Server reflexive candidates were obtained with the help of the NAT.
    #[serde(default)]
    pub nat_assisted: bool,
}

/// Computes candidate priorities for one stream according to its
/// compatibility mode.
pub struct PriorityEngine<P = SystemLocalIps> {
    config: PriorityConfig,
    local_ips: P,
}

impl Default for PriorityEngine {
    fn default() -> Self {
        Self::new(PriorityConfig::default(), SystemLocalIps)
    }
}

impl<P: LocalIpProvider> PriorityEngine<P> {
    pub fn new(config: PriorityConfig, local_ips: P) -> Self {
        Self { config, local_ips }
    }

    pub fn config(&self) -> &PriorityConfig {
        &self.config
    }

    /// Returns the priority of a candidate in the configured dialect.
    pub fn priority(&self, candidate: &Candidate) -> Result<u32> {
        let PriorityConfig {
            compatibility,
            reliable,
            nat_assisted,
        } = self.config;

        match compatibility {
            Compatibility::Rfc5245 => ice_priority(candidate, reliable, nat_assisted, &self.local_ips),
            Compatibility::Oc2007R2 => {
                ms_ice_priority(candidate, reliable, nat_assisted, &self.local_ips)
            }
            Compatibility::Google => Ok(jingle_priority(candidate)),
            Compatibility::Msn => Ok(msn_priority(candidate)),
        }
    }

    /// Sorts candidates from the most to the least preferred, keeping the
    /// relative order of candidates with equal priorities.
    pub fn sort_candidates(&self, candidates: Vec<Candidate>) -> Result<Vec<Candidate>> {
        let mut keyed = candidates
            .into_iter()
            .map(|c| Ok((self.priority(&c)?, c)))
            .collect::<Result<Vec<_>>>()?;
        keyed.sort_by(|(a, _), (b, _)| b.cmp(a));

        Ok(keyed.into_iter().map(|(_, c)| c).collect())
    }
}
