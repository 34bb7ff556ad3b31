use anchor_lang::prelude::*;

pub mod dispatcher;
pub mod errors;
pub mod events;
pub mod gate;
pub mod instructions;
pub mod state;

use instructions::*;
use state::{ProgressionRecord, Tier, TierParams};

declare_id!("8WA67QGDBvq5PKK9R5FVx8jb1ec74tGa931dfjSqTRxX");

#[program]
pub mod tier_rewards {
    use super::*;

    // === Setup ===

    /// Create the engine config and the default tier partition. The signer
    /// becomes admin and first score operator.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    // === Roles ===

    pub fn grant_operator(ctx: Context<ManageRoles>, operator: Pubkey) -> Result<()> {
        instructions::manage_roles::grant_operator(ctx, operator)
    }

    pub fn revoke_operator(ctx: Context<ManageRoles>, operator: Pubkey) -> Result<()> {
        instructions::manage_roles::revoke_operator(ctx, operator)
    }

    /// Halt score submission and tier administration
    pub fn pause(ctx: Context<TogglePause>) -> Result<()> {
        instructions::pause::pause(ctx)
    }

    pub fn unpause(ctx: Context<TogglePause>) -> Result<()> {
        instructions::pause::unpause(ctx)
    }

    // === Tier Administration ===

    pub fn create_tier(
        ctx: Context<AdministerTiers>,
        level: u8,
        params: TierParams,
    ) -> Result<()> {
        instructions::administer_tiers::create_tier(ctx, level, params)
    }

    pub fn update_tier(
        ctx: Context<AdministerTiers>,
        level: u8,
        params: TierParams,
    ) -> Result<()> {
        instructions::administer_tiers::update_tier(ctx, level, params)
    }

    // === Score Submission ===

    /// Record a score and issue the reward of any newly reached tier
    pub fn submit_score(
        ctx: Context<SubmitScore>,
        participant: Pubkey,
        score: u64,
    ) -> Result<()> {
        instructions::submit_score::handler(ctx, participant, score)
    }

    /// Submit parallel participant/score lists. Zero-address entries are
    /// skipped; any other failure aborts the whole batch.
    pub fn batch_submit_scores<'info>(
        ctx: Context<'_, '_, '_, 'info, BatchSubmitScores<'info>>,
        participants: Vec<Pubkey>,
        scores: Vec<u64>,
    ) -> Result<()> {
        instructions::batch_submit_scores::handler(ctx, participants, scores)
    }

    // === Queries ===

    pub fn lookup_tier(ctx: Context<ReadTiers>, score: u64) -> Result<u8> {
        instructions::queries::lookup_tier(ctx, score)
    }

    pub fn reward_for(ctx: Context<ReadTiers>, score: u64) -> Result<u64> {
        instructions::queries::reward_for(ctx, score)
    }

    pub fn collectible_for(ctx: Context<ReadTiers>, score: u64) -> Result<Option<u64>> {
        instructions::queries::collectible_for(ctx, score)
    }

    pub fn get_tier(ctx: Context<ReadTiers>, level: u8) -> Result<Tier> {
        instructions::queries::get_tier(ctx, level)
    }

    pub fn tier_count(ctx: Context<ReadTiers>) -> Result<u8> {
        instructions::queries::tier_count(ctx)
    }

    pub fn participant_count(ctx: Context<ReadConfig>) -> Result<u64> {
        instructions::queries::participant_count(ctx)
    }

    pub fn total_reward_issued(ctx: Context<ReadConfig>) -> Result<u64> {
        instructions::queries::total_reward_issued(ctx)
    }

    pub fn get_progress(
        ctx: Context<ReadProgress>,
        participant: Pubkey,
    ) -> Result<ProgressionRecord> {
        instructions::queries::get_progress(ctx, participant)
    }
}
