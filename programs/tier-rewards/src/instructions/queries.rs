use anchor_lang::prelude::*;
use crate::instructions::participant_accounts::PdaSlot;
use crate::state::{
    EngineConfig, ProgressionRecord, Tier, TierTable, ENGINE_CONFIG_SEED, PROGRESS_SEED,
    TIER_TABLE_SEED,
};

// Read-only views. Values come back through transaction return data.

#[derive(Accounts)]
pub struct ReadTiers<'info> {
    #[account(
        seeds = [TIER_TABLE_SEED],
        bump = tier_table.bump,
    )]
    pub tier_table: Account<'info, TierTable>,
}

#[derive(Accounts)]
pub struct ReadConfig<'info> {
    #[account(
        seeds = [ENGINE_CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, EngineConfig>,
}

#[derive(Accounts)]
pub struct ReadProgress<'info> {
    /// CHECK: may not exist yet; address and owner are checked in the handler
    pub progress: UncheckedAccount<'info>,
}

pub fn lookup_tier(ctx: Context<ReadTiers>, score: u64) -> Result<u8> {
    ctx.accounts.tier_table.lookup_tier(score)
}

pub fn reward_for(ctx: Context<ReadTiers>, score: u64) -> Result<u64> {
    ctx.accounts.tier_table.reward_for(score)
}

pub fn collectible_for(ctx: Context<ReadTiers>, score: u64) -> Result<Option<u64>> {
    ctx.accounts.tier_table.collectible_for(score)
}

pub fn get_tier(ctx: Context<ReadTiers>, level: u8) -> Result<Tier> {
    ctx.accounts.tier_table.tier(level).copied()
}

pub fn tier_count(ctx: Context<ReadTiers>) -> Result<u8> {
    Ok(ctx.accounts.tier_table.tier_count)
}

pub fn participant_count(ctx: Context<ReadConfig>) -> Result<u64> {
    Ok(ctx.accounts.config.participant_count)
}

pub fn total_reward_issued(ctx: Context<ReadConfig>) -> Result<u64> {
    Ok(ctx.accounts.config.total_reward_issued)
}

/// Zero-valued record when the participant has never been accepted
pub fn get_progress(ctx: Context<ReadProgress>, participant: Pubkey) -> Result<ProgressionRecord> {
    let slot = PdaSlot::bind(&ctx.accounts.progress.to_account_info(), PROGRESS_SEED, participant)?;
    Ok(slot
        .read::<ProgressionRecord>()?
        .filter(ProgressionRecord::is_claimed)
        .unwrap_or_else(|| ProgressionRecord::unseen(participant)))
}
