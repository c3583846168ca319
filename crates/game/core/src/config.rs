/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// How many times a non-player controller may ask to retry the same turn
    /// before the driver gives up with a fatal error.
    pub max_npc_retries: u32,

    /// Manhattan radius cleared by a detonating bomb (the bomb included).
    pub detonation_radius: u32,

    /// Half-extent of the square a totem rebroadcasts incoming effects to.
    pub totem_extent: i32,

    /// Countdown a freshly spawned bomb starts with.
    pub bomb_timer: i32,

    /// Sight radius used by the bundled visibility provider.
    pub vision_radius: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of hotbar slots in the ability cooldown bank.
    pub const ABILITY_SLOTS: usize = 10;
    pub const MAX_STATUS_EFFECTS: usize = 8;
    pub const DEFAULT_HP: i32 = 10;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_NPC_RETRIES: u32 = 8;
    pub const DEFAULT_DETONATION_RADIUS: u32 = 2;
    pub const DEFAULT_TOTEM_EXTENT: i32 = 2;
    pub const DEFAULT_BOMB_TIMER: i32 = 5;
    pub const DEFAULT_VISION_RADIUS: u32 = 8;

    pub fn new() -> Self {
        Self {
            max_npc_retries: Self::DEFAULT_MAX_NPC_RETRIES,
            detonation_radius: Self::DEFAULT_DETONATION_RADIUS,
            totem_extent: Self::DEFAULT_TOTEM_EXTENT,
            bomb_timer: Self::DEFAULT_BOMB_TIMER,
            vision_radius: Self::DEFAULT_VISION_RADIUS,
        }
    }

    pub fn with_max_npc_retries(mut self, max_npc_retries: u32) -> Self {
        self.max_npc_retries = max_npc_retries;
        self
    }

    pub fn with_bomb_timer(mut self, bomb_timer: i32) -> Self {
        self.bomb_timer = bomb_timer;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
