/// Turn counters maintained by the turn driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Completed scheduler passes (actions and skipped passes alike).
    pub passes: u64,

    /// Completed player turns; cooldowns tick once per increment.
    pub player_turns: u64,

    /// Increments with every dispatched controller call, retries included.
    /// Mixed into per-turn RNG seeds so a retried turn rolls fresh values.
    pub nonce: u64,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }
}
