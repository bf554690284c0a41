use serde::{Deserialize, Serialize};
use shared::error::*;
use std::fmt;
use std::net::SocketAddr;

/// The maximum number of TURN servers whose relayed candidates can be told
/// apart by the turn preference bits of the local preference.
pub const MAX_TURN_SERVERS: u8 = 8;

/// Protocol spoken between the agent and the TURN server.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelayType {
    #[default]
    #[serde(rename = "turn-udp")]
    TurnUdp,
    #[serde(rename = "turn-tcp")]
    TurnTcp,
    #[serde(rename = "turn-tls")]
    TurnTls,
}

impl fmt::Display for RelayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RelayType::TurnUdp => "turn-udp",
            RelayType::TurnTcp => "turn-tcp",
            RelayType::TurnTls => "turn-tls",
        };
        write!(f, "{s}")
    }
}

/// Describes a TURN server allocation shared by the relayed candidates it
/// produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnServer {
    pub server: SocketAddr,
    pub relay_type: RelayType,
    /// Unique per allocation, assigned when the allocation is created.
    pub preference: u8,
    pub username: String,
    pub password: String,
}

impl TurnServer {
    pub fn new(
        server: SocketAddr,
        relay_type: RelayType,
        preference: u8,
        username: String,
        password: String,
    ) -> Result<Self> {
        if preference >= MAX_TURN_SERVERS {
            return Err(Error::ErrTurnPreferenceOutOfRange(u16::from(preference)));
        }

        Ok(Self {
            server,
            relay_type,
            preference,
            username,
            password,
        })
    }
}
