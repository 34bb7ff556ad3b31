use anchor_lang::prelude::*;
use crate::errors::TierRewardsError;
use crate::gate::{AccessGate, Operation, PauseSwitch};

/// Maximum number of score operators
pub const MAX_OPERATORS: usize = 16;

#[constant]
pub const ENGINE_CONFIG_SEED: &[u8] = b"engine_config";

/// Program-wide configuration: role table, pause flag and totals
#[account]
#[derive(InitSpace, Default, Debug)]
pub struct EngineConfig {
    /// Administers tiers, roles and the pause switch
    pub admin: Pubkey,
    /// Keys allowed to submit scores (the admin is granted at initialization)
    #[max_len(MAX_OPERATORS)]
    pub operators: Vec<Pubkey>,
    /// Process-wide halt flag
    pub paused: bool,
    /// Distinct participants ever accepted
    pub participant_count: u64,
    /// Sum of every reward credited, in base units
    pub total_reward_issued: u64,
    /// PDA bump seed
    pub bump: u8,
}

impl EngineConfig {
    pub fn is_operator(&self, key: &Pubkey) -> bool {
        self.operators.contains(key)
    }

    /// Returns false when `operator` already holds the role
    pub fn grant_operator(&mut self, operator: Pubkey) -> Result<bool> {
        require!(operator != Pubkey::default(), TierRewardsError::InvalidOperator);
        if self.is_operator(&operator) {
            return Ok(false);
        }
        require!(
            self.operators.len() < MAX_OPERATORS,
            TierRewardsError::OperatorListFull
        );
        self.operators.push(operator);
        Ok(true)
    }

    /// Returns false when `operator` did not hold the role
    pub fn revoke_operator(&mut self, operator: &Pubkey) -> bool {
        let before = self.operators.len();
        self.operators.retain(|key| key != operator);
        self.operators.len() != before
    }

    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        if paused {
            require!(!self.paused, TierRewardsError::Halted);
        } else {
            require!(self.paused, TierRewardsError::NotHalted);
        }
        self.paused = paused;
        Ok(())
    }

    pub fn add_reward_issued(&mut self, amount: u64) -> Result<()> {
        self.total_reward_issued = self
            .total_reward_issued
            .checked_add(amount)
            .ok_or_else(|| error!(TierRewardsError::RewardOverflow))?;
        Ok(())
    }
}

impl AccessGate for EngineConfig {
    fn authorize(&self, caller: &Pubkey, operation: Operation) -> bool {
        match operation {
            Operation::SubmitScores => *caller == self.admin || self.is_operator(caller),
            Operation::AdministerTiers | Operation::TogglePause | Operation::ManageRoles => {
                *caller == self.admin
            }
        }
    }
}

impl PauseSwitch for EngineConfig {
    fn is_halted(&self) -> bool {
        self.paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EngineConfig {
        let admin = Pubkey::new_unique();
        EngineConfig {
            admin,
            operators: vec![admin],
            ..Default::default()
        }
    }

    #[test]
    fn admin_holds_every_role() {
        let config = config();
        let admin = config.admin;
        assert!(config.authorize(&admin, Operation::SubmitScores));
        assert!(config.authorize(&admin, Operation::AdministerTiers));
        assert!(config.authorize(&admin, Operation::TogglePause));
        assert!(config.authorize(&admin, Operation::ManageRoles));
    }

    #[test]
    fn operators_only_submit_scores() {
        let mut config = config();
        let operator = Pubkey::new_unique();
        assert!(!config.authorize(&operator, Operation::SubmitScores));

        assert!(config.grant_operator(operator).unwrap());
        assert!(config.authorize(&operator, Operation::SubmitScores));
        assert!(!config.authorize(&operator, Operation::AdministerTiers));
        assert!(!config.authorize(&operator, Operation::TogglePause));

        assert!(config.revoke_operator(&operator));
        assert!(!config.authorize(&operator, Operation::SubmitScores));
    }

    #[test]
    fn grant_is_idempotent_and_bounded() {
        let mut config = config();
        let operator = Pubkey::new_unique();
        assert!(config.grant_operator(operator).unwrap());
        assert!(!config.grant_operator(operator).unwrap());
        assert_eq!(config.operators.len(), 2);

        while config.operators.len() < MAX_OPERATORS {
            config.grant_operator(Pubkey::new_unique()).unwrap();
        }
        let overflow = config.grant_operator(Pubkey::new_unique());
        assert_eq!(overflow.unwrap_err(), TierRewardsError::OperatorListFull.into());
    }

    #[test]
    fn grant_rejects_zero_address() {
        let mut config = config();
        let result = config.grant_operator(Pubkey::default());
        assert_eq!(result.unwrap_err(), TierRewardsError::InvalidOperator.into());
    }

    #[test]
    fn revoke_of_missing_operator_is_noop() {
        let mut config = config();
        assert!(!config.revoke_operator(&Pubkey::new_unique()));
        assert_eq!(config.operators.len(), 1);
    }

    #[test]
    fn pause_toggles_follow_current_state() {
        let mut config = config();
        assert!(!config.is_halted());
        assert_eq!(config.set_paused(false).unwrap_err(), TierRewardsError::NotHalted.into());

        config.set_paused(true).unwrap();
        assert!(config.is_halted());
        assert_eq!(config.set_paused(true).unwrap_err(), TierRewardsError::Halted.into());

        config.set_paused(false).unwrap();
        assert!(!config.is_halted());
    }

    #[test]
    fn reward_total_overflow_is_reported() {
        let mut config = config();
        config.add_reward_issued(u64::MAX).unwrap();
        assert_eq!(config.add_reward_issued(1).unwrap_err(), TierRewardsError::RewardOverflow.into());
    }
}
