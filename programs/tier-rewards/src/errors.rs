use anchor_lang::prelude::*;

#[error_code]
pub enum TierRewardsError {
    #[msg("Unauthorized: caller may not perform this operation")]
    Unauthorized,

    #[msg("Engine is halted")]
    Halted,

    #[msg("Engine is not halted")]
    NotHalted,

    #[msg("Invalid range: min score exceeds max score")]
    InvalidRange,

    #[msg("Invalid tier level: levels start at 1")]
    InvalidTierLevel,

    #[msg("Participant and score lists differ in length")]
    ArityMismatch,

    #[msg("Batch is empty")]
    EmptyBatch,

    #[msg("Invalid participant: cannot submit a score for the zero address")]
    InvalidParticipant,

    #[msg("Tier already exists")]
    DuplicateTier,

    #[msg("Tier does not exist")]
    UnknownTier,

    #[msg("Tier table is full")]
    TierTableFull,

    #[msg("No configured tier covers this score")]
    NoTierForScore,

    #[msg("Reentrant call rejected")]
    ReentrantCall,

    #[msg("Reward arithmetic overflow")]
    RewardOverflow,

    #[msg("Collectible holdings are full")]
    HoldingsFull,

    #[msg("Participant account does not match its expected address or owner")]
    ParticipantAccountMismatch,

    #[msg("Missing participant accounts for batch submission")]
    MissingParticipantAccounts,

    #[msg("Invalid operator: cannot grant the zero address")]
    InvalidOperator,

    #[msg("Operator list is full")]
    OperatorListFull,
}
