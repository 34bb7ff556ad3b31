use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, CreateAccount};
use anchor_lang::Space;
use crate::errors::TierRewardsError;
use crate::state::{COLLECTIBLES_SEED, PROGRESS_SEED, REWARD_BALANCE_SEED};

// =============================================================================
// PARTICIPANT PDA SLOTS
// =============================================================================
//
// Batch submissions cannot name their per-participant accounts statically, so
// they arrive as remaining accounts: one (progress, reward balance, holdings)
// triple per distinct participant, in order of first appearance. Each slot is
// checked against its derived address, read if it already exists, and
// created on write-back if it does not.
// =============================================================================

pub struct PdaSlot<'info> {
    info: AccountInfo<'info>,
    seed: &'static [u8],
    participant: Pubkey,
    pub bump: u8,
}

impl<'info> PdaSlot<'info> {
    pub fn bind(info: &AccountInfo<'info>, seed: &'static [u8], participant: Pubkey) -> Result<Self> {
        let (expected, bump) =
            Pubkey::find_program_address(&[seed, participant.as_ref()], &crate::ID);
        require_keys_eq!(
            *info.key,
            expected,
            TierRewardsError::ParticipantAccountMismatch
        );

        let slot = Self {
            info: info.clone(),
            seed,
            participant,
            bump,
        };
        if slot.is_initialized() {
            require_keys_eq!(
                *info.owner,
                crate::ID,
                TierRewardsError::ParticipantAccountMismatch
            );
        }
        Ok(slot)
    }

    pub fn is_initialized(&self) -> bool {
        !self.info.data_is_empty()
    }

    pub fn read<T: AccountDeserialize>(&self) -> Result<Option<T>> {
        if !self.is_initialized() {
            return Ok(None);
        }
        let data = self.info.try_borrow_data()?;
        T::try_deserialize(&mut &data[..]).map(Some)
    }

    /// Serialize `value` into the slot, allocating the account first if needed
    pub fn write<T: AccountSerialize + Space>(
        &self,
        value: &T,
        payer: &AccountInfo<'info>,
        system_program: &AccountInfo<'info>,
    ) -> Result<()> {
        if !self.is_initialized() {
            self.allocate(8 + T::INIT_SPACE, payer, system_program)?;
        }
        let mut data = self.info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        value.try_serialize(&mut writer)
    }

    fn allocate(
        &self,
        space: usize,
        payer: &AccountInfo<'info>,
        system_program: &AccountInfo<'info>,
    ) -> Result<()> {
        require!(self.info.is_writable, TierRewardsError::ParticipantAccountMismatch);

        let lamports = Rent::get()?.minimum_balance(space);
        let bump = [self.bump];
        let signer_seeds: &[&[u8]] = &[self.seed, self.participant.as_ref(), &bump];

        system_program::create_account(
            CpiContext::new_with_signer(
                system_program.clone(),
                CreateAccount {
                    from: payer.clone(),
                    to: self.info.clone(),
                },
                &[signer_seeds],
            ),
            lamports,
            space as u64,
            &crate::ID,
        )
    }
}

/// Accounts backing one participant of a batch
pub struct ParticipantAccounts<'info> {
    pub participant: Pubkey,
    pub progress: PdaSlot<'info>,
    pub reward_balance: PdaSlot<'info>,
    pub holdings: PdaSlot<'info>,
}

impl<'info> ParticipantAccounts<'info> {
    /// Pair every distinct non-zero participant with its remaining-account
    /// triple
    pub fn bind_all(
        participants: &[Pubkey],
        remaining: &[AccountInfo<'info>],
    ) -> Result<Vec<Self>> {
        let mut distinct: Vec<Pubkey> = Vec::new();
        for participant in participants {
            if *participant != Pubkey::default() && !distinct.contains(participant) {
                distinct.push(*participant);
            }
        }
        require!(
            remaining.len() >= distinct.len() * 3,
            TierRewardsError::MissingParticipantAccounts
        );

        distinct
            .into_iter()
            .zip(remaining.chunks_exact(3))
            .map(|(participant, infos)| -> Result<Self> {
                Ok(Self {
                    participant,
                    progress: PdaSlot::bind(&infos[0], PROGRESS_SEED, participant)?,
                    reward_balance: PdaSlot::bind(&infos[1], REWARD_BALANCE_SEED, participant)?,
                    holdings: PdaSlot::bind(&infos[2], COLLECTIBLES_SEED, participant)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ProgressionRecord;

    struct TestAccount {
        key: Pubkey,
        lamports: u64,
        data: Vec<u8>,
        owner: Pubkey,
    }

    impl TestAccount {
        fn pda(seed: &[u8], participant: &Pubkey) -> Self {
            let (key, _) = Pubkey::find_program_address(&[seed, participant.as_ref()], &crate::ID);
            Self {
                key,
                lamports: 0,
                data: Vec::new(),
                owner: anchor_lang::system_program::ID,
            }
        }

        fn info(&mut self) -> AccountInfo<'_> {
            AccountInfo::new(
                &self.key,
                false,
                true,
                &mut self.lamports,
                &mut self.data,
                &self.owner,
                false,
                0,
            )
        }
    }

    fn triple(participant: &Pubkey) -> [TestAccount; 3] {
        [
            TestAccount::pda(PROGRESS_SEED, participant),
            TestAccount::pda(REWARD_BALANCE_SEED, participant),
            TestAccount::pda(COLLECTIBLES_SEED, participant),
        ]
    }

    fn infos(accounts: &mut [TestAccount]) -> Vec<AccountInfo<'_>> {
        accounts.iter_mut().map(TestAccount::info).collect()
    }

    #[test]
    fn binds_distinct_participants_in_first_appearance_order() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let mut accounts: Vec<TestAccount> = triple(&a).into_iter().chain(triple(&b)).collect();
        let remaining = infos(&mut accounts);

        let bound = ParticipantAccounts::bind_all(&[b, Pubkey::default(), a, b], &remaining);
        // Accounts are laid out for `a` first, so `b` first in the list must not bind
        assert_eq!(
            bound.err().unwrap(),
            TierRewardsError::ParticipantAccountMismatch.into()
        );

        let bound = ParticipantAccounts::bind_all(&[a, Pubkey::default(), b, a], &remaining).unwrap();
        assert_eq!(bound.len(), 2);
        assert_eq!(bound[0].participant, a);
        assert_eq!(bound[1].participant, b);

        let (_, progress_bump) =
            Pubkey::find_program_address(&[PROGRESS_SEED, a.as_ref()], &crate::ID);
        assert_eq!(bound[0].progress.bump, progress_bump);
    }

    #[test]
    fn zero_address_needs_no_accounts() {
        let bound = ParticipantAccounts::bind_all(&[Pubkey::default(), Pubkey::default()], &[]).unwrap();
        assert!(bound.is_empty());
    }

    #[test]
    fn too_few_accounts_fail() {
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        let mut accounts: Vec<TestAccount> = triple(&a).into_iter().collect();
        let remaining = infos(&mut accounts);

        let bound = ParticipantAccounts::bind_all(&[a, b], &remaining);
        assert_eq!(
            bound.err().unwrap(),
            TierRewardsError::MissingParticipantAccounts.into()
        );
    }

    #[test]
    fn misordered_triple_is_rejected() {
        let a = Pubkey::new_unique();
        let [progress, balance, holdings] = triple(&a);
        let mut accounts = vec![balance, progress, holdings];
        let remaining = infos(&mut accounts);

        let bound = ParticipantAccounts::bind_all(&[a], &remaining);
        assert_eq!(
            bound.err().unwrap(),
            TierRewardsError::ParticipantAccountMismatch.into()
        );
    }

    #[test]
    fn initialized_account_must_belong_to_program() {
        let participant = Pubkey::new_unique();
        let mut account = TestAccount::pda(PROGRESS_SEED, &participant);
        account.data = vec![1; 16];

        let info = account.info();
        let slot = PdaSlot::bind(&info, PROGRESS_SEED, participant);
        assert_eq!(
            slot.err().unwrap(),
            TierRewardsError::ParticipantAccountMismatch.into()
        );
    }

    #[test]
    fn empty_account_reads_as_none() {
        let participant = Pubkey::new_unique();
        let mut account = TestAccount::pda(PROGRESS_SEED, &participant);

        let info = account.info();
        let slot = PdaSlot::bind(&info, PROGRESS_SEED, participant).unwrap();
        assert!(!slot.is_initialized());
        assert_eq!(slot.read::<ProgressionRecord>().unwrap(), None);
    }

    #[test]
    fn existing_record_is_read_back() {
        let participant = Pubkey::new_unique();
        let record = ProgressionRecord {
            participant,
            best_score: 640,
            best_tier_reached: 3,
            cumulative_reward_issued: 150 * crate::state::ONE_REWARD,
            last_updated: 1_700_000_000,
            bump: 254,
        };
        let mut account = TestAccount::pda(PROGRESS_SEED, &participant);
        record.try_serialize(&mut account.data).unwrap();
        account.owner = crate::ID;

        let info = account.info();
        let slot = PdaSlot::bind(&info, PROGRESS_SEED, participant).unwrap();
        assert!(slot.is_initialized());
        assert_eq!(slot.read::<ProgressionRecord>().unwrap(), Some(record));
    }
}
