use anchor_lang::prelude::*;
use crate::errors::TierRewardsError;
use crate::events::{BatchProcessed, ParticipantRegistered, RewardIssued, ScoreAccepted};
use crate::gate::{Gatekeeper, Operation};
use crate::state::{PendingProgress, ProgressionRegistry, ScoreTransition, Tier, TierParams, TierTable};

// =============================================================================
// REWARD DISPATCHER
// =============================================================================
//
// Turns a score submission into an updated best-score record and, on a tier
// transition, exactly one reward issuance for the tier reached.
//
// 1. Open a guarded session (reentrancy → authorization → pause)
// 2. Resolve the score's tier
// 3. Get-or-create the participant record (counted once)
// 4. A score that does not beat the best is accepted with no further effect;
//    otherwise advance best score / best tier, never backward
// 5. On a tier transition, credit the ledger and mint the collectible
// 6. Commit registry writes only after every step above succeeded
// =============================================================================

/// Credits fungible reward amounts
pub trait RewardLedger {
    fn credit(&mut self, participant: &Pubkey, amount: u64) -> Result<()>;
}

/// Mints non-fungible achievement records
pub trait CollectibleRegistry {
    fn issue(&mut self, participant: &Pubkey, collectible_id: u64, count: u64) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssuedReward {
    pub tier_level: u8,
    pub amount: u64,
    pub collectible_id: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub participant: Pubkey,
    pub score: u64,
    /// Tier the submitted score falls in
    pub tier_level: u8,
    pub transition: ScoreTransition,
    pub reward: Option<IssuedReward>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One outcome per processed pair, in submission order
    pub outcomes: Vec<SubmissionOutcome>,
    /// Pairs dropped for carrying the zero address
    pub skipped: u32,
}

impl BatchReport {
    pub fn total_rewarded(&self) -> Result<u64> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.reward)
            .try_fold(0u64, |total, reward| total.checked_add(reward.amount))
            .ok_or_else(|| error!(TierRewardsError::RewardOverflow))
    }
}

pub struct RewardDispatcher<'a> {
    gatekeeper: Gatekeeper<'a, 'a>,
    tiers: &'a TierTable,
    ledger: &'a mut dyn RewardLedger,
    collectibles: &'a mut dyn CollectibleRegistry,
}

impl<'a> RewardDispatcher<'a> {
    pub fn new(
        gatekeeper: Gatekeeper<'a, 'a>,
        tiers: &'a TierTable,
        ledger: &'a mut dyn RewardLedger,
        collectibles: &'a mut dyn CollectibleRegistry,
    ) -> Self {
        Self {
            gatekeeper,
            tiers,
            ledger,
            collectibles,
        }
    }

    pub fn submit_score(
        &mut self,
        caller: &Pubkey,
        registry: &mut ProgressionRegistry,
        participant: Pubkey,
        score: u64,
    ) -> Result<SubmissionOutcome> {
        let _session = self.gatekeeper.enter(caller, Operation::SubmitScores)?;
        require!(
            participant != Pubkey::default(),
            TierRewardsError::InvalidParticipant
        );

        let mut pending = PendingProgress::new(registry);
        let outcome = self.settle(&mut pending, participant, score)?;
        let writes = pending.finish();
        registry.commit(writes);

        Ok(outcome)
    }

    /// Structural problems (length mismatch, empty lists) fail the whole
    /// batch; zero-address entries are skipped and the rest still settle.
    pub fn batch_submit_scores(
        &mut self,
        caller: &Pubkey,
        registry: &mut ProgressionRegistry,
        participants: &[Pubkey],
        scores: &[u64],
    ) -> Result<BatchReport> {
        let _session = self.gatekeeper.enter(caller, Operation::SubmitScores)?;
        require!(
            participants.len() == scores.len(),
            TierRewardsError::ArityMismatch
        );
        require!(!participants.is_empty(), TierRewardsError::EmptyBatch);

        let mut pending = PendingProgress::new(registry);
        let mut report = BatchReport::default();
        for (participant, score) in participants.iter().zip(scores) {
            if *participant == Pubkey::default() {
                report.skipped += 1;
                continue;
            }
            let outcome = self.settle(&mut pending, *participant, *score)?;
            report.outcomes.push(outcome);
        }
        let writes = pending.finish();
        registry.commit(writes);

        emit!(BatchProcessed {
            submitted: report.outcomes.len() as u32,
            skipped: report.skipped,
        });

        Ok(report)
    }

    fn settle(
        &mut self,
        pending: &mut PendingProgress<'_>,
        participant: Pubkey,
        score: u64,
    ) -> Result<SubmissionOutcome> {
        let tier = *self.tiers.resolve(score)?;
        let transition = pending.record_score(participant, score, tier.level);

        let reward = if transition.tier_improved {
            self.ledger.credit(&participant, tier.reward_amount)?;
            if let Some(collectible_id) = tier.collectible_id {
                self.collectibles.issue(&participant, collectible_id, 1)?;
            }
            pending.set_reward_issued(&participant, tier.reward_amount);
            Some(IssuedReward {
                tier_level: tier.level,
                amount: tier.reward_amount,
                collectible_id: tier.collectible_id,
            })
        } else {
            None
        };

        if transition.is_new_participant {
            emit!(ParticipantRegistered { participant });
        }
        emit!(ScoreAccepted {
            participant,
            score,
            tier_level: tier.level,
            best_score: pending.get(&participant).best_score,
        });
        if let Some(issued) = reward {
            emit!(RewardIssued {
                participant,
                tier_level: issued.tier_level,
                amount: issued.amount,
                collectible_id: issued.collectible_id,
            });
        }

        Ok(SubmissionOutcome {
            participant,
            score,
            tier_level: tier.level,
            transition,
            reward,
        })
    }
}

/// Guarded tier administration
pub struct TierAdmin<'a> {
    gatekeeper: Gatekeeper<'a, 'a>,
    tiers: &'a mut TierTable,
}

impl<'a> TierAdmin<'a> {
    pub fn new(gatekeeper: Gatekeeper<'a, 'a>, tiers: &'a mut TierTable) -> Self {
        Self { gatekeeper, tiers }
    }

    pub fn create_tier(&mut self, caller: &Pubkey, level: u8, params: TierParams) -> Result<Tier> {
        let _session = self.gatekeeper.enter(caller, Operation::AdministerTiers)?;
        self.tiers.create_tier(level, params)
    }

    pub fn update_tier(&mut self, caller: &Pubkey, level: u8, params: TierParams) -> Result<Tier> {
        let _session = self.gatekeeper.enter(caller, Operation::AdministerTiers)?;
        self.tiers.update_tier(level, params)
    }
}
