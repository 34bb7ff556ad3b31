use anchor_lang::prelude::*;
use crate::dispatcher::TierAdmin;
use crate::events::{TierCreated, TierUpdated};
use crate::gate::{Gatekeeper, SessionLock};
use crate::state::{EngineConfig, TierParams, TierTable, ENGINE_CONFIG_SEED, TIER_TABLE_SEED};

#[derive(Accounts)]
pub struct AdministerTiers<'info> {
    pub admin: Signer<'info>,

    #[account(
        seeds = [ENGINE_CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, EngineConfig>,

    #[account(
        mut,
        seeds = [TIER_TABLE_SEED],
        bump = tier_table.bump,
    )]
    pub tier_table: Account<'info, TierTable>,
}

pub fn create_tier(ctx: Context<AdministerTiers>, level: u8, params: TierParams) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let lock = SessionLock::default();
    let accounts = &mut *ctx.accounts;
    let gatekeeper = Gatekeeper::new(&lock, &*accounts.config, &*accounts.config);

    let tier = TierAdmin::new(gatekeeper, &mut accounts.tier_table).create_tier(&admin, level, params)?;

    emit!(TierCreated {
        level: tier.level,
        min_score: tier.min_score,
        max_score: tier.max_score,
        reward_amount: tier.reward_amount,
        collectible_id: tier.collectible_id,
    });
    msg!(
        "Created tier {} [{}, {}] (reward: {}, tier count: {})",
        tier.level,
        tier.min_score,
        tier.max_score,
        tier.reward_amount,
        accounts.tier_table.tier_count
    );

    Ok(())
}

pub fn update_tier(ctx: Context<AdministerTiers>, level: u8, params: TierParams) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let lock = SessionLock::default();
    let accounts = &mut *ctx.accounts;
    let gatekeeper = Gatekeeper::new(&lock, &*accounts.config, &*accounts.config);

    let tier = TierAdmin::new(gatekeeper, &mut accounts.tier_table).update_tier(&admin, level, params)?;

    emit!(TierUpdated {
        level: tier.level,
        min_score: tier.min_score,
        max_score: tier.max_score,
        reward_amount: tier.reward_amount,
        collectible_id: tier.collectible_id,
    });
    msg!(
        "Updated tier {} [{}, {}] (reward: {})",
        tier.level,
        tier.min_score,
        tier.max_score,
        tier.reward_amount
    );

    Ok(())
}
