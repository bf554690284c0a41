#![allow(dead_code)]

use std::io;
use std::net;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("no interface is available")]
    ErrNoInterface,

    // ICE candidate errors
    /// Indicates a component id outside of [1, 255].
    #[error("component id {0} is out of range [1, 255]")]
    ErrInvalidComponentId(u16),
    /// Indicates an unknown candidate type token.
    #[error("unknown candidate type")]
    ErrUnknownCandidateType,
    /// Indicates an unknown candidate transport token.
    #[error("unknown candidate transport")]
    ErrUnknownTransport,
    /// Indicates the relay address was requested on a candidate that was not
    /// obtained from a TURN allocation.
    #[error("candidate is not a relayed candidate")]
    ErrNotRelayedCandidate,
    /// Indicates the STUN server address was requested on a server reflexive candidate.
    #[error("server reflexive candidates do not record a stun server")]
    ErrStunServerOnServerReflexive,

    // Priority errors
    #[error("type preference {0} exceeds 126")]
    ErrTypePreferenceOutOfRange(u8),
    #[error("transport preference {0} does not fit in 4 bits")]
    ErrTransportPreferenceOutOfRange(u16),
    #[error("direction preference {0} does not fit in 3 bits")]
    ErrDirectionPreferenceOutOfRange(u16),
    #[error("turn preference {0} exceeds the maximum number of turn servers")]
    ErrTurnPreferenceOutOfRange(u16),
    #[error("other preference {0} exceeds the maximum number of local addresses")]
    ErrOtherPreferenceOutOfRange(usize),

    //Third Party Error
    #[error("parse ip: {0}")]
    ParseIp(#[from] net::AddrParseError),
    #[error("{0}")]
    Io(#[source] IoError),
}

#[derive(Debug, Error)]
#[error("io error: {0}")]
pub struct IoError(#[from] pub io::Error);

// Workaround for wanting PartialEq for io::Error.
impl PartialEq for IoError {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind() == other.0.kind()
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(IoError(e))
    }
}
