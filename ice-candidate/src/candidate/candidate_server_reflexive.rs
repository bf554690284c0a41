use super::*;

/// The config required to create a new server reflexive `Candidate`.
#[derive(Default)]
pub struct CandidateServerReflexiveConfig {
    pub base_config: CandidateConfig,
}

impl CandidateServerReflexiveConfig {
    /// Creates a new server reflexive candidate.
    pub fn new_candidate_server_reflexive(self) -> Result<Candidate> {
        self.base_config
            .new_candidate(CandidateKind::ServerReflexive)
    }
}
