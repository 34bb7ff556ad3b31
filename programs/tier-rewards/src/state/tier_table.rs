use anchor_lang::prelude::*;
use crate::errors::TierRewardsError;

// =============================================================================
// TIER TABLE
// =============================================================================
//
// Ordered partition of the score domain. Each tier covers an inclusive
// [min_score, max_score] range and carries the one-time reward a participant
// receives on first arrival. Tiers are kept sorted by level, and level order
// is score order, so the first tier containing a score is the right one.
// =============================================================================

/// Upper bound of the score domain; only the top tier should use it.
pub const UNBOUNDED_SCORE: u64 = u64::MAX;

/// Maximum number of configured tiers
pub const MAX_TIERS: usize = 32;

/// Reward amounts are expressed in base units with this many decimals
#[constant]
pub const REWARD_DECIMALS: u8 = 9;

/// One whole reward unit in base units
pub const ONE_REWARD: u64 = 1_000_000_000;

#[constant]
pub const TIER_TABLE_SEED: &[u8] = b"tier_table";

/// Partition installed at initialization: (min, max, reward, collectible)
const DEFAULT_PARTITION: [(u64, u64, u64, Option<u64>); 5] = [
    (0, 99, 10 * ONE_REWARD, None),
    (100, 499, 50 * ONE_REWARD, Some(101)),
    (500, 999, 150 * ONE_REWARD, Some(102)),
    (1_000, 4_999, 500 * ONE_REWARD, Some(103)),
    (5_000, UNBOUNDED_SCORE, 2_000 * ONE_REWARD, Some(104)),
];

/// Admin-supplied tier fields
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TierParams {
    /// Inclusive lower bound
    pub min_score: u64,
    /// Inclusive upper bound (UNBOUNDED_SCORE for the top tier)
    pub max_score: u64,
    /// Reward credited on first arrival, in base units
    pub reward_amount: u64,
    /// Collectible minted on first arrival (None or Some(0) = none)
    pub collectible_id: Option<u64>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct Tier {
    /// Tier identity, starting at 1
    pub level: u8,
    pub min_score: u64,
    pub max_score: u64,
    pub reward_amount: u64,
    pub collectible_id: Option<u64>,
}

impl Tier {
    fn from_params(level: u8, params: TierParams) -> Self {
        Self {
            level,
            min_score: params.min_score,
            max_score: params.max_score,
            reward_amount: params.reward_amount,
            collectible_id: params.collectible_id.filter(|id| *id != 0),
        }
    }

    #[inline]
    pub fn contains(&self, score: u64) -> bool {
        self.min_score <= score && score <= self.max_score
    }

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.max_score == UNBOUNDED_SCORE
    }
}

#[account]
#[derive(InitSpace, Default, Debug)]
pub struct TierTable {
    /// Highest level ever configured
    pub tier_count: u8,
    /// Configured tiers, sorted by level
    #[max_len(MAX_TIERS)]
    pub tiers: Vec<Tier>,
    /// PDA bump seed
    pub bump: u8,
}

impl TierTable {
    /// Install the stock five-tier partition covering [0, ∞)
    pub fn install_default_partition(&mut self) -> Result<()> {
        for (index, (min_score, max_score, reward_amount, collectible_id)) in
            DEFAULT_PARTITION.iter().enumerate()
        {
            self.create_tier(
                index as u8 + 1,
                TierParams {
                    min_score: *min_score,
                    max_score: *max_score,
                    reward_amount: *reward_amount,
                    collectible_id: *collectible_id,
                },
            )?;
        }
        Ok(())
    }

    /// Store a new tier. Raises `tier_count` when `level` is above it.
    pub fn create_tier(&mut self, level: u8, params: TierParams) -> Result<Tier> {
        require!(level > 0, TierRewardsError::InvalidTierLevel);

        let slot = match self.tiers.binary_search_by_key(&level, |tier| tier.level) {
            Ok(_) => return err!(TierRewardsError::DuplicateTier),
            Err(slot) => slot,
        };
        require!(
            params.min_score <= params.max_score,
            TierRewardsError::InvalidRange
        );
        require!(self.tiers.len() < MAX_TIERS, TierRewardsError::TierTableFull);

        let tier = Tier::from_params(level, params);
        self.tiers.insert(slot, tier);
        self.tier_count = self.tier_count.max(level);

        Ok(tier)
    }

    /// Overwrite an existing tier's bounds, reward and collectible
    pub fn update_tier(&mut self, level: u8, params: TierParams) -> Result<Tier> {
        let tier = self
            .tiers
            .iter_mut()
            .find(|tier| tier.level == level)
            .ok_or_else(|| error!(TierRewardsError::UnknownTier))?;
        require!(
            params.min_score <= params.max_score,
            TierRewardsError::InvalidRange
        );

        *tier = Tier::from_params(level, params);
        Ok(*tier)
    }

    pub fn tier(&self, level: u8) -> Result<&Tier> {
        self.tiers
            .iter()
            .find(|tier| tier.level == level)
            .ok_or_else(|| error!(TierRewardsError::UnknownTier))
    }

    /// First tier, in level order, whose range contains `score`
    pub fn resolve(&self, score: u64) -> Result<&Tier> {
        self.tiers
            .iter()
            .find(|tier| tier.contains(score))
            .ok_or_else(|| error!(TierRewardsError::NoTierForScore))
    }

    pub fn lookup_tier(&self, score: u64) -> Result<u8> {
        Ok(self.resolve(score)?.level)
    }

    pub fn reward_for(&self, score: u64) -> Result<u64> {
        Ok(self.resolve(score)?.reward_amount)
    }

    pub fn collectible_for(&self, score: u64) -> Result<Option<u64>> {
        Ok(self.resolve(score)?.collectible_id)
    }
}
