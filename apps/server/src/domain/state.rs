/// Monotonic per-process player id, allocated from 1 on connect and never
/// reused.
pub type PlayerId = u64;

/// Overall session progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Waiting for names, colors and readiness.
    Lobby,
    /// Board layout disclosed to everyone; play not yet allowed.
    Previewing,
    /// Round underway; cells may be locked and revealed.
    Active,
    /// Round over; leaderboard published.
    Finished,
}
