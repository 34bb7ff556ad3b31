use std::collections::BTreeMap;

use anchor_lang::prelude::*;

#[constant]
pub const PROGRESS_SEED: &[u8] = b"progress";

/// Per-participant progression. Seeds: [b"progress", participant]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct ProgressionRecord {
    /// Participant this record belongs to
    pub participant: Pubkey,
    /// Highest score ever accepted; never decreases
    pub best_score: u64,
    /// Highest tier whose reward was issued; never decreases
    pub best_tier_reached: u8,
    /// Reward of the highest tier reached, in base units
    pub cumulative_reward_issued: u64,
    /// Last time a submission touched this record
    pub last_updated: i64,
    /// PDA bump seed
    pub bump: u8,
}

impl ProgressionRecord {
    /// Zero-valued record for a participant that has never been accepted
    pub fn unseen(participant: Pubkey) -> Self {
        Self {
            participant,
            ..Default::default()
        }
    }

    /// A freshly allocated account is all zeroes until a submission claims it
    pub fn is_claimed(&self) -> bool {
        self.participant != Pubkey::default()
    }

    /// Move the monotonic fields forward. Returns (score_improved, tier_improved).
    /// A score that does not beat `best_score` changes nothing, so the tier
    /// can only advance together with the score.
    fn advance(&mut self, score: u64, tier_level: u8) -> (bool, bool) {
        if score <= self.best_score {
            return (false, false);
        }
        self.best_score = score;
        let tier_improved = tier_level > self.best_tier_reached;
        if tier_improved {
            self.best_tier_reached = tier_level;
        }
        (true, tier_improved)
    }
}

/// Which parts of a record a submission actually advanced
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreTransition {
    pub is_new_participant: bool,
    pub score_improved: bool,
    pub tier_improved: bool,
}

// =============================================================================
// PROGRESSION REGISTRY
// =============================================================================
//
// Durable records keyed by participant plus the distinct-participant counter.
// Submissions never write here directly: they go through PendingProgress and
// the result is committed in one step once the whole call has succeeded.
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct ProgressionRegistry {
    records: BTreeMap<Pubkey, ProgressionRecord>,
    participant_count: u64,
}

impl ProgressionRegistry {
    pub fn new(participant_count: u64) -> Self {
        Self {
            records: BTreeMap::new(),
            participant_count,
        }
    }

    /// Make an already-durable record visible to the registry
    pub fn load(&mut self, record: ProgressionRecord) {
        self.records.insert(record.participant, record);
    }

    /// Current record, or a zero record for an unseen participant. Never
    /// creates an entry.
    pub fn get(&self, participant: &Pubkey) -> ProgressionRecord {
        self.records
            .get(participant)
            .cloned()
            .unwrap_or_else(|| ProgressionRecord::unseen(*participant))
    }

    pub fn contains(&self, participant: &Pubkey) -> bool {
        self.records.contains_key(participant)
    }

    pub fn participant_count(&self) -> u64 {
        self.participant_count
    }

    pub fn records(&self) -> impl Iterator<Item = &ProgressionRecord> {
        self.records.values()
    }

    /// Compare-and-advance for one participant, persisted immediately
    pub fn record_score(&mut self, participant: Pubkey, score: u64, tier_level: u8) -> ScoreTransition {
        let mut pending = PendingProgress::new(self);
        let transition = pending.record_score(participant, score, tier_level);
        let writes = pending.finish();
        self.commit(writes);
        transition
    }

    pub fn commit(&mut self, writes: ProgressWrites) {
        self.participant_count += writes.registered;
        self.records.extend(writes.records);
    }
}

/// Staged writes produced by a submission, applied by `commit`
#[derive(Debug, Default)]
pub struct ProgressWrites {
    records: BTreeMap<Pubkey, ProgressionRecord>,
    registered: u64,
}

impl ProgressWrites {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read-through overlay on a registry for the duration of one call
pub struct PendingProgress<'r> {
    base: &'r ProgressionRegistry,
    writes: ProgressWrites,
}

impl<'r> PendingProgress<'r> {
    pub fn new(base: &'r ProgressionRegistry) -> Self {
        Self {
            base,
            writes: ProgressWrites::default(),
        }
    }

    pub fn get(&self, participant: &Pubkey) -> ProgressionRecord {
        match self.writes.records.get(participant) {
            Some(record) => record.clone(),
            None => self.base.get(participant),
        }
    }

    fn is_known(&self, participant: &Pubkey) -> bool {
        self.writes.records.contains_key(participant) || self.base.contains(participant)
    }

    /// Get-or-create the participant's record, then advance it. Registration
    /// is counted exactly once per participant.
    pub fn record_score(&mut self, participant: Pubkey, score: u64, tier_level: u8) -> ScoreTransition {
        let is_new_participant = !self.is_known(&participant);
        if is_new_participant {
            self.writes.registered += 1;
        }

        let mut record = self.get(&participant);
        let (score_improved, tier_improved) = record.advance(score, tier_level);
        self.writes.records.insert(participant, record);

        ScoreTransition {
            is_new_participant,
            score_improved,
            tier_improved,
        }
    }

    /// Record the reward of the tier just reached. Only the destination
    /// tier's amount is kept on a jump.
    pub fn set_reward_issued(&mut self, participant: &Pubkey, amount: u64) {
        let mut record = self.get(participant);
        record.cumulative_reward_issued = amount;
        self.writes.records.insert(*participant, record);
    }

    pub fn finish(self) -> ProgressWrites {
        self.writes
    }
}
