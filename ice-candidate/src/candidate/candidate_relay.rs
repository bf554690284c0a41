use super::*;

/// The config required to create a new relayed `Candidate`.
pub struct CandidateRelayConfig {
    pub base_config: CandidateConfig,

    /// Descriptor of the TURN allocation the candidate was obtained from.
    pub turn: Arc<TurnServer>,
}

impl CandidateRelayConfig {
    /// Creates a new relayed candidate holding a reference to its TURN server.
    pub fn new_candidate_relay(self) -> Result<Candidate> {
        self.base_config
            .new_candidate(CandidateKind::Relayed(self.turn))
    }
}
