use std::cell::Cell;

use anchor_lang::prelude::*;
use crate::errors::TierRewardsError;

// =============================================================================
// ACCESS GATE, PAUSE SWITCH AND SESSION LOCK
// =============================================================================
//
// Every mutating entry point opens a session through the Gatekeeper before it
// touches state. The order is fixed: reentrancy lock, then authorization,
// then the pause switch. The returned guard releases the lock when dropped,
// so an early `?` return can never leave the engine locked.
// =============================================================================

/// Kind of mutating operation a caller asks to perform
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Create or update tiers
    AdministerTiers,
    /// Single or batch score submission
    SubmitScores,
    /// Pause or unpause the engine
    TogglePause,
    /// Grant or revoke operators
    ManageRoles,
}

pub trait AccessGate {
    fn authorize(&self, caller: &Pubkey, operation: Operation) -> bool;
}

pub trait PauseSwitch {
    fn is_halted(&self) -> bool;
}

/// In-progress flag shared by every guarded entry point of one session
#[derive(Debug, Default)]
pub struct SessionLock {
    engaged: Cell<bool>,
}

impl SessionLock {
    pub fn enter(&self) -> Result<SessionGuard<'_>> {
        require!(!self.engaged.get(), TierRewardsError::ReentrantCall);
        self.engaged.set(true);
        Ok(SessionGuard { lock: self })
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged.get()
    }
}

/// Holds the session lock; clears it on drop
#[must_use]
pub struct SessionGuard<'l> {
    lock: &'l SessionLock,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        self.lock.engaged.set(false);
    }
}

#[derive(Clone, Copy)]
pub struct Gatekeeper<'l, 'g> {
    lock: &'l SessionLock,
    gate: &'g dyn AccessGate,
    pause: &'g dyn PauseSwitch,
}

impl<'l, 'g> Gatekeeper<'l, 'g> {
    pub fn new(lock: &'l SessionLock, gate: &'g dyn AccessGate, pause: &'g dyn PauseSwitch) -> Self {
        Self { lock, gate, pause }
    }

    /// Open a session for `operation`, honoring the pause switch
    pub fn enter(&self, caller: &Pubkey, operation: Operation) -> Result<SessionGuard<'l>> {
        let guard = self.enter_ignoring_pause(caller, operation)?;
        require!(!self.pause.is_halted(), TierRewardsError::Halted);
        Ok(guard)
    }

    /// Open a session without consulting the pause switch (pause toggling,
    /// role management)
    pub fn enter_ignoring_pause(
        &self,
        caller: &Pubkey,
        operation: Operation,
    ) -> Result<SessionGuard<'l>> {
        let guard = self.lock.enter()?;
        require!(
            self.gate.authorize(caller, operation),
            TierRewardsError::Unauthorized
        );
        Ok(guard)
    }

    pub fn lock(&self) -> &'l SessionLock {
        self.lock
    }
}
