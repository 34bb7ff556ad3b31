use anchor_lang::prelude::*;
use crate::events::{OperatorGranted, OperatorRevoked};
use crate::gate::{Gatekeeper, Operation, SessionLock};
use crate::state::{EngineConfig, ENGINE_CONFIG_SEED};

#[derive(Accounts)]
pub struct ManageRoles<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [ENGINE_CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, EngineConfig>,
}

pub fn grant_operator(ctx: Context<ManageRoles>, operator: Pubkey) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let lock = SessionLock::default();
    let _session = Gatekeeper::new(&lock, &*ctx.accounts.config, &*ctx.accounts.config)
        .enter_ignoring_pause(&admin, Operation::ManageRoles)?;

    let config = &mut ctx.accounts.config;
    if config.grant_operator(operator)? {
        emit!(OperatorGranted { admin, operator });
        msg!("Granted score operator role to {}", operator);
    } else {
        msg!("{} already holds the score operator role", operator);
    }

    Ok(())
}

pub fn revoke_operator(ctx: Context<ManageRoles>, operator: Pubkey) -> Result<()> {
    let admin = ctx.accounts.admin.key();
    let lock = SessionLock::default();
    let _session = Gatekeeper::new(&lock, &*ctx.accounts.config, &*ctx.accounts.config)
        .enter_ignoring_pause(&admin, Operation::ManageRoles)?;

    let config = &mut ctx.accounts.config;
    if config.revoke_operator(&operator) {
        emit!(OperatorRevoked { admin, operator });
        msg!("Revoked score operator role from {}", operator);
    } else {
        msg!("{} does not hold the score operator role", operator);
    }

    Ok(())
}
