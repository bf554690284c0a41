use super::*;

/// The config required to create a new peer reflexive `Candidate`.
#[derive(Default)]
pub struct CandidatePeerReflexiveConfig {
    pub base_config: CandidateConfig,

    pub stun_server: Option<SocketAddr>,
}

impl CandidatePeerReflexiveConfig {
    /// Creates a new peer reflexive candidate.
    pub fn new_candidate_peer_reflexive(self) -> Result<Candidate> {
        let mut c = self
            .base_config
            .new_candidate(CandidateKind::PeerReflexive)?;
        c.stun_server = self.stun_server;
        Ok(c)
    }
}
