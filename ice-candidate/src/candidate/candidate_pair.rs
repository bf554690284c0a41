use std::cmp::Ordering;
use std::fmt;

/// RFC 5245 - 5.7.2.  Computing Pair Priority and Ordering Pairs
/// Let G be the priority for the candidate provided by the controlling
/// agent.  Let D be the priority for the candidate provided by the
/// controlled agent.
/// pair priority = 2^32*MIN(G,D) + 2*MAX(G,D) + (G>D?1:0)
///
/// Remote priorities are not bounded by the local type preferences, so the
/// result wraps modulo 2^64 once MAX(G,D) reaches 2^31.
pub fn pair_priority(o_prio: u32, a_prio: u32) -> u64 {
    let min = u64::from(std::cmp::min(o_prio, a_prio));
    let max = u64::from(std::cmp::max(o_prio, a_prio));

    (min << 32)
        .wrapping_add(max.wrapping_mul(2))
        .wrapping_add(u64::from(o_prio > a_prio))
}

/// Renders a pair priority as `min:max:tie-breaker` for diagnostics.
pub fn pair_priority_to_string(priority: u64) -> String {
    PairPriority(priority).to_string()
}

/// A 64-bit candidate pair priority.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairPriority(pub u64);

impl PairPriority {
    pub fn new(o_prio: u32, a_prio: u32) -> Self {
        Self(pair_priority(o_prio, a_prio))
    }
}

impl fmt::Display for PairPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}:{:08x}:{}",
            self.0 >> 32,
            (self.0 >> 1) & 0x7fff_ffff,
            self.0 & 1
        )
    }
}

/// Represents a combination of a local and remote candidate, by priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandidatePair {
    pub local_priority: u32,
    pub remote_priority: u32,
    pub ice_role_controlling: bool,
}

impl fmt::Display for CandidatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "prio {} (local, prio {}) <-> (remote, prio {})",
            self.priority(),
            self.local_priority,
            self.remote_priority,
        )
    }
}

impl CandidatePair {
    #[must_use]
    pub fn new(local_priority: u32, remote_priority: u32, ice_role_controlling: bool) -> Self {
        Self {
            local_priority,
            remote_priority,
            ice_role_controlling,
        }
    }

    /// The controlling agent's candidate takes the offerer side of the
    /// pair priority formula.
    pub fn priority(&self) -> PairPriority {
        let (g, d) = if self.ice_role_controlling {
            (self.local_priority, self.remote_priority)
        } else {
            (self.remote_priority, self.local_priority)
        };

        PairPriority::new(g, d)
    }
}

impl PartialOrd for CandidatePair {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CandidatePair {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority()
            .cmp(&other.priority())
            .then_with(|| self.local_priority.cmp(&other.local_priority))
            .then_with(|| self.remote_priority.cmp(&other.remote_priority))
            .then_with(|| self.ice_role_controlling.cmp(&other.ice_role_controlling))
    }
}
