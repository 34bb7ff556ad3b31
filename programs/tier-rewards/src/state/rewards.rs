use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use crate::dispatcher::{CollectibleRegistry, RewardLedger};
use crate::errors::TierRewardsError;

// =============================================================================
// REWARD LEDGER AND COLLECTIBLE HOLDINGS
// =============================================================================
//
// On-chain collaborators behind the RewardLedger / CollectibleRegistry traits.
// A single account serves a single-participant submission; a map keyed by
// participant serves a batch.
// =============================================================================

/// Maximum distinct collectibles one participant can hold
pub const MAX_COLLECTIBLE_KINDS: usize = 32;

#[constant]
pub const REWARD_BALANCE_SEED: &[u8] = b"reward_balance";

#[constant]
pub const COLLECTIBLES_SEED: &[u8] = b"collectibles";

/// Fungible reward balance. Seeds: [b"reward_balance", participant]
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct RewardBalance {
    pub owner: Pubkey,
    /// Credited amount in base units
    pub balance: u64,
    pub bump: u8,
}

impl RewardBalance {
    pub fn empty(owner: Pubkey, bump: u8) -> Self {
        Self { owner, balance: 0, bump }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct CollectibleEntry {
    pub collectible_id: u64,
    pub count: u64,
}

/// Non-fungible achievement records. Seeds: [b"collectibles", participant]
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct CollectibleHoldings {
    pub owner: Pubkey,
    #[max_len(MAX_COLLECTIBLE_KINDS)]
    pub entries: Vec<CollectibleEntry>,
    pub bump: u8,
}

impl CollectibleHoldings {
    pub fn empty(owner: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            entries: Vec::new(),
            bump,
        }
    }

    pub fn count_of(&self, collectible_id: u64) -> u64 {
        self.entries
            .iter()
            .find(|entry| entry.collectible_id == collectible_id)
            .map_or(0, |entry| entry.count)
    }
}

impl RewardLedger for RewardBalance {
    fn credit(&mut self, participant: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(
            self.owner,
            *participant,
            TierRewardsError::ParticipantAccountMismatch
        );
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| error!(TierRewardsError::RewardOverflow))?;
        Ok(())
    }
}

impl RewardLedger for BTreeMap<Pubkey, RewardBalance> {
    fn credit(&mut self, participant: &Pubkey, amount: u64) -> Result<()> {
        self.get_mut(participant)
            .ok_or_else(|| error!(TierRewardsError::MissingParticipantAccounts))?
            .credit(participant, amount)
    }
}

impl CollectibleRegistry for CollectibleHoldings {
    fn issue(&mut self, participant: &Pubkey, collectible_id: u64, count: u64) -> Result<()> {
        require_keys_eq!(
            self.owner,
            *participant,
            TierRewardsError::ParticipantAccountMismatch
        );

        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.collectible_id == collectible_id)
        {
            entry.count = entry
                .count
                .checked_add(count)
                .ok_or_else(|| error!(TierRewardsError::RewardOverflow))?;
            return Ok(());
        }

        require!(
            self.entries.len() < MAX_COLLECTIBLE_KINDS,
            TierRewardsError::HoldingsFull
        );
        self.entries.push(CollectibleEntry {
            collectible_id,
            count,
        });
        Ok(())
    }
}

impl CollectibleRegistry for BTreeMap<Pubkey, CollectibleHoldings> {
    fn issue(&mut self, participant: &Pubkey, collectible_id: u64, count: u64) -> Result<()> {
        self.get_mut(participant)
            .ok_or_else(|| error!(TierRewardsError::MissingParticipantAccounts))?
            .issue(participant, collectible_id, count)
    }
}
