use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use crate::dispatcher::RewardDispatcher;
use crate::gate::{Gatekeeper, SessionLock};
use crate::instructions::participant_accounts::ParticipantAccounts;
use crate::state::{
    CollectibleHoldings, EngineConfig, ProgressionRecord, ProgressionRegistry, RewardBalance,
    TierTable, ENGINE_CONFIG_SEED, TIER_TABLE_SEED,
};

/// Remaining accounts: one (progress, reward balance, holdings) PDA triple
/// per distinct non-zero participant, in order of first appearance.
#[derive(Accounts)]
pub struct BatchSubmitScores<'info> {
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

    pub system_program: Program<'info, System>,
}

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, BatchSubmitScores<'info>>,
    participants: Vec<Pubkey>,
    scores: Vec<u64>,
) -> Result<()> {
    let operator = ctx.accounts.operator.key();
    let bound = ParticipantAccounts::bind_all(&participants, ctx.remaining_accounts)?;

    let mut registry = ProgressionRegistry::new(ctx.accounts.config.participant_count);
    let mut balances = BTreeMap::new();
    let mut holdings = BTreeMap::new();
    for accounts in &bound {
        let participant = accounts.participant;
        if let Some(record) = accounts.progress.read::<ProgressionRecord>()? {
            if record.is_claimed() {
                registry.load(record);
            }
        }
        let balance = accounts
            .reward_balance
            .read::<RewardBalance>()?
            .unwrap_or_else(|| RewardBalance::empty(participant, accounts.reward_balance.bump));
        balances.insert(participant, balance);
        let held = accounts
            .holdings
            .read::<CollectibleHoldings>()?
            .unwrap_or_else(|| CollectibleHoldings::empty(participant, accounts.holdings.bump));
        holdings.insert(participant, held);
    }

    let lock = SessionLock::default();
    let report = {
        let gatekeeper = Gatekeeper::new(&lock, &*ctx.accounts.config, &*ctx.accounts.config);
        RewardDispatcher::new(gatekeeper, &ctx.accounts.tier_table, &mut balances, &mut holdings)
            .batch_submit_scores(&operator, &mut registry, &participants, &scores)?
    };

    let payer = ctx.accounts.operator.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    let now = Clock::get()?.unix_timestamp;
    for accounts in &bound {
        let participant = accounts.participant;

        let mut record = registry.get(&participant);
        record.bump = accounts.progress.bump;
        record.last_updated = now;
        accounts.progress.write(&record, &payer, &system_program)?;

        if let Some(balance) = balances.get(&participant) {
            accounts.reward_balance.write(balance, &payer, &system_program)?;
        }
        if let Some(held) = holdings.get(&participant) {
            accounts.holdings.write(held, &payer, &system_program)?;
        }
    }

    let config = &mut ctx.accounts.config;
    config.participant_count = registry.participant_count();
    config.add_reward_issued(report.total_rewarded()?)?;

    msg!(
        "Processed batch of {} scores ({} skipped, {} rewards, participants: {})",
        report.outcomes.len(),
        report.skipped,
        report.outcomes.iter().filter(|outcome| outcome.reward.is_some()).count(),
        config.participant_count
    );

    Ok(())
}
