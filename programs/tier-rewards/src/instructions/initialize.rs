use anchor_lang::prelude::*;
use crate::events::EngineInitialized;
use crate::state::{EngineConfig, TierTable, ENGINE_CONFIG_SEED, TIER_TABLE_SEED};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = 8 + EngineConfig::INIT_SPACE,
        seeds = [ENGINE_CONFIG_SEED],
        bump,
    )]
    pub config: Account<'info, EngineConfig>,

    #[account(
        init,
        payer = admin,
        space = 8 + TierTable::INIT_SPACE,
        seeds = [TIER_TABLE_SEED],
        bump,
    )]
    pub tier_table: Account<'info, TierTable>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    let admin = ctx.accounts.admin.key();

    let config = &mut ctx.accounts.config;
    config.admin = admin;
    // The deployer submits scores too until operators are granted
    config.operators = vec![admin];
    config.paused = false;
    config.participant_count = 0;
    config.total_reward_issued = 0;
    config.bump = ctx.bumps.config;

    let tier_table = &mut ctx.accounts.tier_table;
    tier_table.install_default_partition()?;
    tier_table.bump = ctx.bumps.tier_table;

    emit!(EngineInitialized {
        admin,
        tier_count: tier_table.tier_count,
    });
    msg!(
        "Initialized tier rewards engine (admin: {}, tiers: {})",
        admin,
        tier_table.tier_count
    );

    Ok(())
}
