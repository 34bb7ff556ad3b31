// =============================================================================
// TIER REWARDS STATE
// =============================================================================
//
// - EngineConfig: role table, pause switch, program-wide totals
// - TierTable: ordered score partition with per-tier rewards
// - ProgressionRecord / ProgressionRegistry: best score and best tier per
//   participant, plus the distinct-participant counter
// - RewardBalance / CollectibleHoldings: where issued rewards land
// =============================================================================

pub mod engine_config;
pub mod progression;
pub mod rewards;
pub mod tier_table;

pub use engine_config::*;
pub use progression::*;
pub use rewards::*;
pub use tier_table::*;
