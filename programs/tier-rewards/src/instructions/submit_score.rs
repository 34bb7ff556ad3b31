use anchor_lang::prelude::*;
use crate::dispatcher::RewardDispatcher;
use crate::gate::{Gatekeeper, SessionLock};
use crate::state::{
    CollectibleHoldings, EngineConfig, ProgressionRecord, ProgressionRegistry, RewardBalance,
    TierTable, COLLECTIBLES_SEED, ENGINE_CONFIG_SEED, PROGRESS_SEED, REWARD_BALANCE_SEED,
    TIER_TABLE_SEED,
};

#[derive(Accounts)]
#[instruction(participant: Pubkey)]
pub struct SubmitScore<'info> {
    #[account(mut)]
    pub operator: Signer<'info>,

    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, EngineConfig>,

    #[account(
        seeds = [TIER_TABLE_SEED],
        bump = tier_table.bump,
    )]
    pub tier_table: Account<'info, TierTable>,

    #[account(
        init_if_needed,
        payer = operator,
        space = 8 + ProgressionRecord::INIT_SPACE,
        seeds = [PROGRESS_SEED, participant.as_ref()],
        bump,
    )]
    pub progress: Account<'info, ProgressionRecord>,

    #[account(
        init_if_needed,
        payer = operator,
        space = 8 + RewardBalance::INIT_SPACE,
        seeds = [REWARD_BALANCE_SEED, participant.as_ref()],
        bump,
    )]
    pub reward_balance: Account<'info, RewardBalance>,

    #[account(
        init_if_needed,
        payer = operator,
        space = 8 + CollectibleHoldings::INIT_SPACE,
        seeds = [COLLECTIBLES_SEED, participant.as_ref()],
        bump,
    )]
    pub holdings: Account<'info, CollectibleHoldings>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<SubmitScore>, participant: Pubkey, score: u64) -> Result<()> {
    let operator = ctx.accounts.operator.key();

    // Freshly allocated accounts are zeroed; claim them for the participant
    if ctx.accounts.reward_balance.owner == Pubkey::default() {
        ctx.accounts
            .reward_balance
            .set_inner(RewardBalance::empty(participant, ctx.bumps.reward_balance));
    }
    if ctx.accounts.holdings.owner == Pubkey::default() {
        ctx.accounts
            .holdings
            .set_inner(CollectibleHoldings::empty(participant, ctx.bumps.holdings));
    }

    let mut registry = ProgressionRegistry::new(ctx.accounts.config.participant_count);
    if ctx.accounts.progress.is_claimed() {
        registry.load((*ctx.accounts.progress).clone());
    }

    let lock = SessionLock::default();
    let outcome = {
        let accounts = &mut *ctx.accounts;
        let gatekeeper = Gatekeeper::new(&lock, &*accounts.config, &*accounts.config);
        RewardDispatcher::new(
            gatekeeper,
            &accounts.tier_table,
            &mut *accounts.reward_balance,
            &mut *accounts.holdings,
        )
        .submit_score(&operator, &mut registry, participant, score)?
    };

    let mut record = registry.get(&participant);
    record.bump = ctx.bumps.progress;
    record.last_updated = Clock::get()?.unix_timestamp;
    ctx.accounts.progress.set_inner(record);

    let config = &mut ctx.accounts.config;
    config.participant_count = registry.participant_count();
    if let Some(reward) = outcome.reward {
        config.add_reward_issued(reward.amount)?;
    }

    msg!(
        "Accepted score {} for {} (tier: {}, best tier: {}, rewarded: {})",
        score,
        participant,
        outcome.tier_level,
        ctx.accounts.progress.best_tier_reached,
        outcome.reward.map_or(0, |reward| reward.amount)
    );

    Ok(())
}
