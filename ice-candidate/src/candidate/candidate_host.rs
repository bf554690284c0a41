use super::*;

/// The config required to create a new host `Candidate`.
#[derive(Default)]
pub struct CandidateHostConfig {
    pub base_config: CandidateConfig,
}

impl CandidateHostConfig {
    /// Creates a new host candidate. Its base is its own address.
    pub fn new_candidate_host(self) -> Result<Candidate> {
        let mut c = self.base_config.new_candidate(CandidateKind::Host)?;
        c.base_addr = c.addr;
        Ok(c)
    }
}
