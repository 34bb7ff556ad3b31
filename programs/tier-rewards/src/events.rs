use anchor_lang::prelude::*;

#[event]
pub struct EngineInitialized {
    pub admin: Pubkey,
    pub tier_count: u8,
}

/// First accepted score for a participant
#[event]
pub struct ParticipantRegistered {
    pub participant: Pubkey,
}

#[event]
pub struct ScoreAccepted {
    pub participant: Pubkey,
    pub score: u64,
    /// Tier of the submitted score, not necessarily the best tier
    pub tier_level: u8,
    pub best_score: u64,
}

/// Tier transition: reward credited and collectible minted
#[event]
pub struct RewardIssued {
    pub participant: Pubkey,
    pub tier_level: u8,
    pub amount: u64,
    pub collectible_id: Option<u64>,
}

#[event]
pub struct BatchProcessed {
    pub submitted: u32,
    pub skipped: u32,
}

#[event]
pub struct TierCreated {
    pub level: u8,
    pub min_score: u64,
    pub max_score: u64,
    pub reward_amount: u64,
    pub collectible_id: Option<u64>,
}

#[event]
pub struct TierUpdated {
    pub level: u8,
    pub min_score: u64,
    pub max_score: u64,
    pub reward_amount: u64,
    pub collectible_id: Option<u64>,
}

#[event]
pub struct PauseToggled {
    pub admin: Pubkey,
    pub paused: bool,
}

#[event]
pub struct OperatorGranted {
    pub admin: Pubkey,
    pub operator: Pubkey,
}

#[event]
pub struct OperatorRevoked {
    pub admin: Pubkey,
    pub operator: Pubkey,
}
